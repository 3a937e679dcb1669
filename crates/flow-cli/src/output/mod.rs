use std::io::IsTerminal;

use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value, table_options()),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    table::TableOptions {
        max_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|width| *width >= 40),
        color: std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Arrays render one row per element. An object holding a single array
/// (`{"audits": [...]}`) renders that array; other objects render as
/// key/value pairs.
fn render_table<T: Serialize>(value: &T, options: table::TableOptions) -> anyhow::Result<String> {
    let value = serde_json::to_value(value)?;
    match value {
        Value::Array(items) => Ok(render_array_table(&items, options)),
        Value::Object(map) => {
            let arrays: Vec<&Value> = map.values().filter(|v| v.is_array()).collect();
            if map.len() == 1 {
                if let Some(Value::Array(items)) = arrays.first() {
                    return Ok(render_array_table(items, options));
                }
            }
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), value_to_cell(value)])
                .collect::<Vec<_>>();
            Ok(table::render_entity_table(&["key", "value"], &rows, options))
        }
        scalar => Ok(table::render_entity_table(
            &["value"],
            &[vec![value_to_cell(&scalar)]],
            options,
        )),
    }
}

fn render_array_table(items: &[Value], options: table::TableOptions) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    if !items.iter().all(Value::is_object) {
        let rows = items
            .iter()
            .map(|item| vec![value_to_cell(item)])
            .collect::<Vec<_>>();
        return table::render_entity_table(&["value"], &rows, options);
    }

    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), value_to_cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    table::render_entity_table(&header_refs, &rows, options)
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::table::{TableOptions, render_entity_table};
    use super::{render, render_table};
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        reference: &'static str,
        items: u32,
    }

    #[derive(Serialize)]
    struct Listing {
        audits: Vec<Example>,
    }

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            reference: "AUD-2025-001",
            items: 5,
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["reference"], "AUD-2025-001");
        assert_eq!(parsed["items"], 5);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example {
            reference: "AUD-2025-001",
            items: 5,
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn single_array_object_renders_as_rows() {
        let value = Listing {
            audits: vec![
                Example {
                    reference: "AUD-2025-001",
                    items: 5,
                },
                Example {
                    reference: "AUD-2025-002",
                    items: 6,
                },
            ],
        };
        let out = render_table(&value, PLAIN).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("reference"));
        assert!(lines[0].contains("items"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn table_alignment_handles_mixed_widths() {
        let headers = ["reference", "status"];
        let rows = vec![
            vec!["AUD-2025-001".to_string(), "On-Site".to_string()],
            vec!["X".to_string(), "Preparation".to_string()],
        ];
        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2].find("On-Site"), lines[3].find("Preparation"));
    }
}
