// ==========================================
// Cruce de Material SAP - CSV export
// ==========================================
// Same columns and order as the Excel export
// ==========================================

use crate::domain::OutputLine;
use crate::export::error::ExportResult;
use crate::export::OUTPUT_COLUMNS;
use std::path::Path;
use tracing::info;

pub struct CsvWriter;

impl CsvWriter {
    /// Write the reconciled output as a .csv file.
    pub fn write_output<P: AsRef<Path>>(path: P, lines: &[OutputLine]) -> ExportResult<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)?;

        writer.write_record(OUTPUT_COLUMNS)?;
        for line in lines {
            let requested = format_qty(line.requested_qty);
            let allocated = format_qty(line.allocated_qty);
            let unmet = format_qty(line.unmet_qty);
            let dispatchable = line.dispatchable.to_string();
            writer.write_record([
                line.item_id.as_deref().unwrap_or(""),
                line.material_code.as_str(),
                line.material_description.as_deref().unwrap_or(""),
                line.site_code.as_deref().unwrap_or(""),
                line.plan_name.as_deref().unwrap_or(""),
                requested.as_str(),
                line.stock_description.as_deref().unwrap_or(""),
                allocated.as_str(),
                unmet.as_str(),
                dispatchable.as_str(),
            ])?;
        }
        writer.flush()?;

        info!(path = %path.display(), rows = lines.len(), "CSV export written");
        Ok(())
    }
}

fn format_qty(value: f64) -> String {
    // integral quantities without a trailing ".0", fractions as-is
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
