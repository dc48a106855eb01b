// ==========================================
// Cruce de Material SAP - Excel export
// ==========================================
// One worksheet, one row per output line, bold header row,
// column order fixed by the dispatch export contract
// ==========================================

use crate::domain::OutputLine;
use crate::export::error::ExportResult;
use crate::export::{OUTPUT_COLUMNS, OUTPUT_SHEET_NAME};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;
use tracing::info;

pub struct ExcelWriter;

impl ExcelWriter {
    /// Write the reconciled output as an .xlsx workbook.
    pub fn write_output<P: AsRef<Path>>(path: P, lines: &[OutputLine]) -> ExportResult<()> {
        let path = path.as_ref();
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(OUTPUT_SHEET_NAME)?;

        let header_format = Format::new().set_bold();
        for (col, header) in OUTPUT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        }

        for (idx, line) in lines.iter().enumerate() {
            let row = (idx + 1) as u32;
            Self::write_opt_string(worksheet, row, 0, line.item_id.as_deref())?;
            worksheet.write_string(row, 1, line.material_code.as_str())?;
            Self::write_opt_string(worksheet, row, 2, line.material_description.as_deref())?;
            Self::write_opt_string(worksheet, row, 3, line.site_code.as_deref())?;
            Self::write_opt_string(worksheet, row, 4, line.plan_name.as_deref())?;
            worksheet.write_number(row, 5, line.requested_qty)?;
            Self::write_opt_string(worksheet, row, 6, line.stock_description.as_deref())?;
            worksheet.write_number(row, 7, line.allocated_qty)?;
            worksheet.write_number(row, 8, line.unmet_qty)?;
            worksheet.write_string(row, 9, line.dispatchable.to_string().as_str())?;
        }

        workbook.save(path)?;
        info!(path = %path.display(), rows = lines.len(), "Excel export written");
        Ok(())
    }

    fn write_opt_string(
        worksheet: &mut rust_xlsxwriter::Worksheet,
        row: u32,
        col: u16,
        value: Option<&str>,
    ) -> ExportResult<()> {
        if let Some(v) = value {
            worksheet.write_string(row, col, v)?;
        }
        Ok(())
    }
}
