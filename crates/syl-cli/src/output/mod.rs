use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
///
/// Table mode flattens the JSON form: an array of objects becomes one row
/// per element with the union of keys as columns, an object becomes
/// key/value rows. Nested values are printed as compact JSON.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(render_value_table(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response to stdout in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(value, format)?);
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_value_table(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers: Vec<&str> = Vec::new();
            for key in items.iter().filter_map(Value::as_object).flat_map(|map| map.keys()) {
                if !headers.contains(&key.as_str()) {
                    headers.push(key);
                }
            }
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                        .collect()
                })
                .collect::<Vec<_>>();
            table::render_table(&headers, &rows, table_options())
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render_table(&["value"], &rows, table_options())
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["key", "value"], &rows, table_options())
        }
        scalar => table::render_table(&["value"], &[vec![cell(scalar)]], table_options()),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Row {
        course_id: &'static str,
        tasks_indexed: u32,
        warnings: Vec<&'static str>,
    }

    fn sample() -> Vec<Row> {
        vec![Row {
            course_id: "py-basics",
            tasks_indexed: 1,
            warnings: vec!["tasks/a.json: bad", "tasks/b.json: bad"],
        }]
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&sample(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed[0]["course_id"], "py-basics");
        assert_eq!(parsed[0]["tasks_indexed"], 1);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&sample(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_uses_field_names_as_headers() {
        let out = render(&sample(), OutputFormat::Table).expect("table render should work");
        let header = out.lines().next().expect("header line");
        assert!(header.contains("course_id"));
        assert!(header.contains("tasks_indexed"));
        assert!(out.contains("tasks/a.json: bad; tasks/b.json: bad"));
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let empty: Vec<Row> = Vec::new();
        assert_eq!(render(&empty, OutputFormat::Table).unwrap(), "(no rows)");
    }
}
