//! Integration tests for index rotation.

use parking_lot::Mutex;
use serde_json::json;

use sphinxsearch::error::{Result, SphinxSearchError};
use sphinxsearch::indexer::{
    Indexer, IndexerCommand, ProcessOutput, ProcessRunner, RotationRequest,
};
use sphinxsearch::registry::IndexRegistry;

#[derive(Debug)]
struct ScriptedRunner {
    output: String,
    exit_code: Option<i32>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedRunner {
    fn new(output: &str, exit_code: Option<i32>) -> Self {
        Self {
            output: output.to_string(),
            exit_code,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, argv: &[String]) -> Result<ProcessOutput> {
        self.calls.lock().push(argv.to_vec());
        Ok(ProcessOutput::new(self.output.clone(), self.exit_code))
    }
}

fn registry() -> IndexRegistry {
    IndexRegistry::new([("a", "idx_a"), ("b", "idx_b"), ("c", "idx_c")])
}

fn indexer(output: &str, exit_code: Option<i32>) -> Indexer<ScriptedRunner> {
    Indexer::with_runner(
        IndexerCommand::new(
            "/usr/bin/indexer",
            true,
            Some("/etc/sphinx.conf".to_string()),
        ),
        registry(),
        ScriptedRunner::new(output, exit_code),
    )
}

#[test]
fn test_failure_iff_marker_present() {
    let cases = [
        ("FATAL: failed to parse config file", true),
        ("collected 10 docs\nERROR: index 'idx_a': sql_query: syntax error", true),
        ("ERROR:", true),
        ("indexing index 'idx_a'...\ntotal 10 docs, 1024 bytes\nrotating indices: successfully sent SIGHUP to searchd", false),
        ("WARNING: no attributes found", false),
        ("error: lower case is not a marker", false),
        ("", false),
    ];

    for (output, should_fail) in cases {
        for exit_code in [Some(0), Some(1), None] {
            let indexer = indexer(output, exit_code);
            let result = indexer.rotate_all();
            assert_eq!(result.is_err(), should_fail, "output {output:?}, exit {exit_code:?}");

            if let Err(err) = result {
                let expected = format!("Error rotating indexes: \"{}\".", output.trim_end());
                assert_eq!(err.to_string(), expected);
            }
        }
    }
}

#[test]
fn test_rotate_all_command_line() -> Result<()> {
    let indexer = indexer("ok", Some(0));
    let outcome = indexer.rotate_all()?;

    assert_eq!(
        outcome.command,
        "sudo /usr/bin/indexer --config /etc/sphinx.conf --rotate --all"
    );
    assert_eq!(
        indexer.runner().calls.lock()[0],
        vec![
            "sudo",
            "/usr/bin/indexer",
            "--config",
            "/etc/sphinx.conf",
            "--rotate",
            "--all"
        ]
    );

    Ok(())
}

#[test]
fn test_rotate_list_skips_unknown() -> Result<()> {
    let indexer = indexer("ok", Some(0));
    indexer.rotate(vec!["a".to_string(), "unknown".to_string(), "b".to_string()])?;

    let calls = indexer.runner().calls.lock();
    let argv = &calls[0];
    assert!(argv.contains(&"idx_a".to_string()));
    assert!(argv.contains(&"idx_b".to_string()));
    assert!(!argv.contains(&"unknown".to_string()));
    assert_eq!(&argv[argv.len() - 2..], &["idx_a", "idx_b"]);

    Ok(())
}

#[test]
fn test_invalid_shape_never_spawns() {
    let indexer = indexer("ok", Some(0));

    let err = indexer.rotate_value(&json!(12)).unwrap_err();
    assert!(matches!(err, SphinxSearchError::InvalidArgument(_)));
    assert!(err.to_string().contains("integer given"));

    assert!(indexer.runner().calls.lock().is_empty());
}

#[test]
fn test_all_request_equals_rotate_all() -> Result<()> {
    let indexer = indexer("ok", Some(0));
    indexer.rotate(RotationRequest::All)?;
    indexer.rotate_all()?;

    let calls = indexer.runner().calls.lock();
    assert_eq!(calls[0], calls[1]);

    Ok(())
}

#[test]
fn test_check_index_and_get_indexes() {
    let indexer = indexer("", Some(0));

    assert!(indexer.check_index("idx_b"));
    assert!(!indexer.check_index("missing"));
    // Logical names are checked against the registry instead.
    assert!(!indexer.check_index("b"));
    assert!(indexer.registry().contains_logical("b"));
    assert_eq!(indexer.indexes(), vec!["a", "b", "c"]);
}

#[cfg(unix)]
mod real_process {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use sphinxsearch::indexer::{Indexer, IndexerCommand};
    use sphinxsearch::registry::IndexRegistry;

    fn write_script(dir: &Path, name: &str, body: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_fake_indexer_binary_success() {
        let dir = tempfile::tempdir().unwrap();
        let bin = write_script(dir.path(), "indexer", "echo \"args: $*\"; exit 1");

        let indexer = Indexer::new(
            IndexerCommand::new(bin, false, None),
            IndexRegistry::new([("Threads", "thread_idx")]),
        );
        let outcome = indexer.rotate("Threads").unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.exit_code, Some(1));
        assert_eq!(outcome.raw_output, "args: --rotate thread_idx\n");
    }

    #[test]
    fn test_fake_indexer_binary_failure_on_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let bin = write_script(
            dir.path(),
            "indexer",
            "echo 'using config file'; echo 'FATAL: no indexes found' 1>&2",
        );

        let indexer = Indexer::new(
            IndexerCommand::new(bin, false, None),
            IndexRegistry::new([("Threads", "thread_idx")]),
        );
        let err = indexer.rotate_all().unwrap_err();

        assert!(err.is_indexing());
        assert!(err.to_string().contains("FATAL: no indexes found"));
    }
}
