//! Tool `process_csv`: Summarise inline CSV text.

use serde::Deserialize;
use serde_json::json;

use crate::types::{ToolError, ToolOutcome};

use super::descriptor::{parse_args, Arguments, ParamSpec, ParamType, ToolDescriptor};

#[derive(Debug, Deserialize)]
struct CsvParams {
    file: String,
    #[serde(default = "default_delimiter")]
    delimiter: String,
}

fn default_delimiter() -> String {
    ",".to_string()
}

pub fn descriptor() -> ToolDescriptor {
    ToolDescriptor::new(
        "process_csv",
        "CSV processing tool: reports the header columns and data row count of CSV text",
    )
    .param(ParamSpec::required(
        "file",
        ParamType::String,
        "CSV content, header line first",
    ))
    .param(ParamSpec::optional(
        "delimiter",
        ParamType::String,
        "Single-character field separator (default ',')",
    ))
}

pub fn execute(args: &Arguments, _store: &mut ()) -> ToolOutcome {
    let params: CsvParams = parse_args(args)?;

    let mut chars = params.delimiter.chars();
    let delimiter = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => c as u8,
        _ => {
            return Err(ToolError::InvalidArgument {
                name: "delimiter".to_string(),
                reason: "must be exactly one ASCII character".to_string(),
            })
        }
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(params.file.as_bytes());

    let columns: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.iter().all(String::is_empty) {
        return Err(ToolError::InvalidArgument {
            name: "file".to_string(),
            reason: "no header line".to_string(),
        });
    }

    let mut rows = 0usize;
    let mut ragged = Vec::new();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        rows += 1;
        if record.len() != columns.len() {
            // 1-based, counting the header as line 1
            ragged.push(record.position().map_or(0, |p| p.line()));
        }
    }

    Ok(json!({
        "columns": columns,
        "rows": rows,
        "ragged_lines": ragged,
    }))
}

fn malformed(e: csv::Error) -> ToolError {
    ToolError::InvalidArgument {
        name: "file".to_string(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(file: &str, delimiter: Option<&str>) -> Arguments {
        let mut args = Arguments::new();
        args.insert("file".to_string(), json!(file));
        if let Some(d) = delimiter {
            args.insert("delimiter".to_string(), json!(d));
        }
        args
    }

    #[test]
    fn test_counts_rows_and_columns() {
        let out = execute(&args("name,qty\nmouse,1\n\nhub,2\n", None), &mut ()).unwrap();
        assert_eq!(out["columns"], json!(["name", "qty"]));
        assert_eq!(out["rows"], 2);
        assert_eq!(out["ragged_lines"], json!([]));
    }

    #[test]
    fn test_reports_ragged_lines() {
        let out = execute(&args("a;b;c\n1;2;3\n4;5\n", Some(";")), &mut ()).unwrap();
        assert_eq!(out["ragged_lines"], json!([3]));
    }

    #[test]
    fn test_quoted_fields_keep_their_delimiters() {
        let out = execute(
            &args("name,note\n\"Smith, J\",ok\n\"Lee\",\"a, b, c\"\n", None),
            &mut (),
        )
        .unwrap();
        assert_eq!(out["columns"], json!(["name", "note"]));
        assert_eq!(out["rows"], 2);
        assert_eq!(out["ragged_lines"], json!([]));
    }

    #[test]
    fn test_rejects_bad_delimiter_and_empty_file() {
        let err = execute(&args("a,b", Some("::")), &mut ()).unwrap_err();
        assert!(err.to_string().contains("delimiter"));
        let err = execute(&args("  \n", None), &mut ()).unwrap_err();
        assert!(err.to_string().contains("no header line"));
    }
}
