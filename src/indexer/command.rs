//! Command-line construction for the external indexer.
//!
//! The shape is fixed and order-sensitive:
//!
//! ```text
//! [sudo] <bin> [--config <path>] --rotate [--all | <physical>...]
//! ```

use std::fmt;

use crate::config::IndexerConfig;

/// The invariant part of every rotation command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexerCommand {
    bin: String,
    sudo: bool,
    config_path: Option<String>,
}

impl IndexerCommand {
    pub fn new<S: Into<String>>(bin: S, sudo: bool, config_path: Option<String>) -> Self {
        Self {
            bin: bin.into(),
            sudo,
            config_path,
        }
    }

    pub fn from_config(config: &IndexerConfig) -> Self {
        Self::new(config.bin.clone(), config.sudo, config.config.clone())
    }

    /// `[sudo] bin [--config path] --rotate`
    pub fn prefix(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(6);
        if self.sudo {
            argv.push("sudo".to_string());
        }
        argv.push(self.bin.clone());
        // An empty path is treated like no path at all.
        if let Some(path) = self.config_path.as_deref().filter(|p| !p.is_empty()) {
            argv.push("--config".to_string());
            argv.push(path.to_string());
        }
        argv.push("--rotate".to_string());
        argv
    }

    /// The command that rebuilds every configured index.
    pub fn rotate_all(&self) -> CommandLine {
        let mut argv = self.prefix();
        let prefix_len = argv.len();
        argv.push("--all".to_string());
        CommandLine { argv, prefix_len }
    }

    /// The command that rebuilds the given physical indexes.
    pub fn rotate<I, S>(&self, physical: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut argv = self.prefix();
        let prefix_len = argv.len();
        argv.extend(physical.into_iter().map(Into::into));
        CommandLine { argv, prefix_len }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    pub fn sudo(&self) -> bool {
        self.sudo
    }

    pub fn config_path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }
}

/// A fully built argument vector, program first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
    /// Length of the `[sudo] bin [--config path] --rotate` part.
    prefix_len: usize,
}

impl CommandLine {
    pub fn argv(&self) -> &[String] {
        &self.argv
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Arguments after the command prefix: `--all` or physical names.
    pub fn targets(&self) -> &[String] {
        &self.argv[self.prefix_len..]
    }

    pub fn into_argv(self) -> Vec<String> {
        self.argv
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_rotate_all_command() {
        let command = IndexerCommand::new(
            "/usr/bin/indexer",
            true,
            Some("/etc/sphinx.conf".to_string()),
        );
        assert_eq!(
            command.rotate_all().to_string(),
            "sudo /usr/bin/indexer --config /etc/sphinx.conf --rotate --all"
        );
    }

    #[test]
    fn test_minimal_prefix() {
        let command = IndexerCommand::new("indexer", false, None);
        assert_eq!(command.prefix(), vec!["indexer", "--rotate"]);

        let command = IndexerCommand::new("indexer", false, Some(String::new()));
        assert_eq!(command.prefix(), vec!["indexer", "--rotate"]);
    }

    #[test]
    fn test_rotate_named() {
        let command = IndexerCommand::new("indexer", false, None);
        let line = command.rotate(["idx_a", "idx_b"]);
        assert_eq!(line.program(), "indexer");
        assert_eq!(line.args(), &["--rotate", "idx_a", "idx_b"]);
        assert_eq!(line.targets(), &["idx_a", "idx_b"]);
    }

    #[test]
    fn test_rotate_nothing() {
        let command = IndexerCommand::new("indexer", true, None);
        let line = command.rotate(Vec::<String>::new());
        assert_eq!(line.to_string(), "sudo indexer --rotate");
        assert!(line.targets().is_empty());
    }

    #[test]
    fn test_targets_with_rotate_like_config_path() {
        let command = IndexerCommand::new("indexer", false, Some("--rotate".to_string()));

        let line = command.rotate(["idx_a"]);
        assert_eq!(line.to_string(), "indexer --config --rotate --rotate idx_a");
        assert_eq!(line.targets(), &["idx_a"]);

        let line = command.rotate_all();
        assert_eq!(line.targets(), &["--all"]);
    }
}
