use std::fs;

use inquire::Select;

use crate::errors::KharchaError;
use crate::record::ExpenseRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn file_name(self) -> &'static str {
        match self {
            ExportFormat::Json => "expenses.json",
            ExportFormat::Csv => "expenses.csv",
        }
    }
}

/// Pretty-printed JSON array in the same shape as the data file.
pub fn render_json(records: &[ExpenseRecord]) -> Result<String, KharchaError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Header-less `name,amount,date,category,note` lines in entry order. A
/// missing note becomes an empty field. Embedded commas are not escaped.
pub fn render_csv(records: &[ExpenseRecord]) -> String {
    records
        .iter()
        .map(csv_line)
        .collect::<Vec<String>>()
        .join("\n")
}

fn csv_line(record: &ExpenseRecord) -> String {
    format!(
        "{},{:.2},{},{},{}",
        record.name,
        record.amount,
        record.date,
        record.category,
        record.note.as_deref().unwrap_or("")
    )
}

/// Asks for a format and writes the export into the current directory.
/// Returns the written file name, or `None` on cancel.
pub fn prompt_export(records: &[ExpenseRecord]) -> Result<Option<&'static str>, KharchaError> {
    let format = match Select::new("Select export format:", vec!["JSON", "CSV", "Cancel"])
        .prompt()?
    {
        "JSON" => ExportFormat::Json,
        "CSV" => ExportFormat::Csv,
        _ => return Ok(None),
    };
    let contents = match format {
        ExportFormat::Json => render_json(records)?,
        ExportFormat::Csv => render_csv(records),
    };
    fs::write(format.file_name(), contents)?;
    Ok(Some(format.file_name()))
}
