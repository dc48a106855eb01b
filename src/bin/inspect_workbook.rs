// Small dev utility: list a workbook's sheets and their header rows.
//
// Usage:
//   cargo run --bin inspect_workbook -- <file.xlsx|file.csv>
//
// Useful when preparing a column-mapping profile for sheets whose
// headers drift from the defaults.

use cruce_sap::importer::{CsvParser, ExcelParser};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: inspect_workbook <file.xlsx|file.csv>")?;

    let ext = std::path::Path::new(&path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if ext == "csv" {
        let table = CsvParser::parse(&path)?;
        println!("{} ({} data rows)", path, table.rows.len());
        for header in &table.headers {
            println!("  - {}", header);
        }
        return Ok(());
    }

    let sheets = ExcelParser::list_sheets(&path)?;
    println!("{} ({} sheets)", path, sheets.len());
    for sheet in &sheets {
        let table = ExcelParser::parse_sheet(&path, sheet)?;
        println!("[{}] {} data rows", sheet, table.rows.len());
        for header in &table.headers {
            println!("  - {}", header);
        }
    }

    Ok(())
}
