use chrono::NaiveDate;
use thiserror::Error;

use super::download;

const UTF8_BOM: &str = "\u{feff}";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("There is nothing to export.")]
    Empty,
    #[error("Failed to build the spreadsheet: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to build the spreadsheet: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("Failed to download the spreadsheet: {0}")]
    Download(String),
}

impl From<csv::IntoInnerError<csv::Writer<Vec<u8>>>> for ExportError {
    fn from(err: csv::IntoInnerError<csv::Writer<Vec<u8>>>) -> Self {
        ExportError::Csv(err.into_error().into())
    }
}

/// CSV text with a UTF-8 BOM so spreadsheet apps pick the right encoding.
pub fn rows_to_csv(headers: &[String], rows: &[Vec<String>]) -> Result<String, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::Empty);
    }
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner()?;
    let body = String::from_utf8(bytes)?;
    Ok(format!("{}{}", UTF8_BOM, body))
}

pub fn export_file_name(stem: &str, day: NaiveDate) -> String {
    let stem: String = stem
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let stem = stem.trim_matches('-');
    let stem = if stem.is_empty() { "export" } else { stem };
    format!("{}-{}.csv", stem, day.format("%Y-%m-%d"))
}

pub fn export_rows(
    stem: &str,
    day: NaiveDate,
    headers: &[String],
    rows: &[Vec<String>],
) -> Result<String, ExportError> {
    let body = rows_to_csv(headers, rows)?;
    let file_name = export_file_name(stem, day);
    download::trigger_csv_download(&file_name, &body).map_err(ExportError::Download)?;
    log::info!("exported {} rows to {}", rows.len(), file_name);
    Ok(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn csv_has_bom_header_and_quoted_cells() {
        let body = rows_to_csv(
            &s(&["Name", "Department"]),
            &[s(&["Priya Nair", "R&D, Labs"]), s(&["Ravi \"R\" Kumar", "Sales"])],
        )
        .unwrap();
        assert!(body.starts_with(UTF8_BOM));
        let lines: Vec<&str> = body.trim_start_matches(UTF8_BOM).split("\r\n").collect();
        assert_eq!(lines[0], "Name,Department");
        assert_eq!(lines[1], "Priya Nair,\"R&D, Labs\"");
        assert_eq!(lines[2], "\"Ravi \"\"R\"\" Kumar\",Sales");
    }

    #[test]
    fn empty_exports_are_rejected() {
        assert!(matches!(rows_to_csv(&s(&["Name"]), &[]), Err(ExportError::Empty)));
    }

    #[test]
    fn file_names_are_slugged_and_dated() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(export_file_name("Work Sessions", day), "work-sessions-2025-03-09.csv");
        assert_eq!(export_file_name("  ", day), "export-2025-03-09.csv");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn download_is_unavailable_outside_the_browser() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let result = export_rows("employees", day, &s(&["Name"]), &[s(&["A"])]);
        assert!(matches!(result, Err(ExportError::Download(_))));
    }
}
