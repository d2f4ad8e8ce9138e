//! Integration tests for loading configuration and wiring services from it.

use std::fs;

use sphinxsearch::config::SphinxConfig;
use sphinxsearch::error::{Result, SphinxSearchError};
use sphinxsearch::indexer::Indexer;
use sphinxsearch::search::ServerAddress;

const CONFIG: &str = r#"{
    "indexer": {
        "sudo": true,
        "bin": "/opt/sphinx/bin/indexer",
        "config": "/etc/sphinx/sphinx.conf"
    },
    "indexes": {
        "Threads": "forum_thread_idx",
        "Posts": "forum_post_idx",
        "Archive": "forum_post_idx"
    },
    "searchd": {
        "host": "search.internal",
        "port": "9306"
    }
}"#;

#[test]
fn test_load_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sphinxsearch.json");
    fs::write(&path, CONFIG)?;

    let config = SphinxConfig::from_file(&path)?;
    assert!(config.indexer.sudo);
    assert_eq!(config.indexes.logical_names(), vec!["Threads", "Posts", "Archive"]);
    assert_eq!(
        config.searchd.address(),
        ServerAddress::Tcp {
            host: "search.internal".to_string(),
            port: 9306
        }
    );

    Ok(())
}

#[test]
fn test_indexer_from_config() -> Result<()> {
    let config = SphinxConfig::from_json_str(CONFIG)?;
    let indexer = Indexer::from_config(&config);

    assert_eq!(
        indexer.command().rotate_all().to_string(),
        "sudo /opt/sphinx/bin/indexer --config /etc/sphinx/sphinx.conf --rotate --all"
    );
    assert_eq!(indexer.indexes(), vec!["Threads", "Posts", "Archive"]);
    assert!(indexer.check_index("forum_post_idx"));

    Ok(())
}

#[test]
fn test_missing_file() {
    let err = SphinxConfig::from_file("/nonexistent/sphinxsearch.json").unwrap_err();
    assert!(matches!(err, SphinxSearchError::Config(_)));
}

#[test]
fn test_malformed_json() {
    let err = SphinxConfig::from_json_str("{ \"indexes\": ").unwrap_err();
    assert!(matches!(err, SphinxSearchError::Json(_)));
}
