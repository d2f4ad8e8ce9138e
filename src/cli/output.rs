//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SphinxArgs};
use crate::error::Result;

/// Result structure for listing configured indexes.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexListing {
    pub indexes: Vec<IndexEntry>,
}

/// One configured index.
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub physical: String,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &SphinxArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &SphinxArgs) -> Result<()> {
    let value = serde_json::to_value(result)?;

    if let Some(obj) = value.as_object()
        && let Some(indexes) = obj.get("indexes").and_then(|i| i.as_array())
    {
        return output_index_listing_human(indexes, args);
    }

    if args.verbosity() > 0 {
        println!("{message}");
    }
    if args.verbosity() > 1 {
        output_generic_human(&value);
    }
    Ok(())
}

/// Output the configured indexes in human format.
fn output_index_listing_human(indexes: &[serde_json::Value], args: &SphinxArgs) -> Result<()> {
    if indexes.is_empty() {
        eprintln!("Indexes not configured");
        return Ok(());
    }

    println!();
    println!(" == Indexes:");
    println!();
    for index in indexes {
        let name = index.get("name").and_then(|n| n.as_str()).unwrap_or("");
        if args.verbosity() > 1 {
            let physical = index.get("physical").and_then(|p| p.as_str()).unwrap_or("");
            println!(" >> {name} ({physical})");
        } else {
            println!(" >> {name}");
        }
    }
    Ok(())
}

fn output_generic_human(value: &serde_json::Value) {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
}

fn output_json<T: Serialize>(result: &T, args: &SphinxArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human-readable output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.trim_end().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("rotating\n".to_string())),
            "rotating"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
        assert_eq!(format_value(&serde_json::json!(["a", "b"])), "[a, b]");
    }

    #[test]
    fn test_index_listing_serialization() {
        let listing = IndexListing {
            indexes: vec![IndexEntry {
                name: "Threads".to_string(),
                physical: "thread_idx".to_string(),
            }],
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["indexes"][0]["name"], "Threads");
        assert_eq!(json["indexes"][0]["physical"], "thread_idx");
    }
}
