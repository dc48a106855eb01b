// ==========================================
// Cruce de Material SAP - reconciliation service
// ==========================================
// Orchestrates one file-level run: parse -> map ->
// reconcile -> export -> report. Batch mode runs several
// workbooks concurrently, one job (and one stock pool)
// per file; per-file failures never abort the batch.
// ==========================================

use crate::config::MappingProfile;
use crate::domain::{OutputLine, RunReport};
use crate::engine::ReconcileEngine;
use crate::export::{CsvWriter, ExcelWriter};
use crate::importer::{CsvParser, ExcelParser, FieldMapper, RawTable};
use async_trait::async_trait;
use chrono::Utc;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info, instrument};
use uuid::Uuid;

// ==========================================
// ReconcileJob - one file-level unit of work
// ==========================================
#[derive(Debug, Clone)]
pub struct ReconcileJob {
    /// Workbook holding both sheets.
    pub input: PathBuf,
    /// Explicit requests sheet name; None resolves via the profile.
    pub requests_sheet: Option<String>,
    /// Explicit stock sheet name; None resolves via the profile.
    pub stock_sheet: Option<String>,
    /// Export destination (.xlsx or .csv); None skips the export.
    pub output: Option<PathBuf>,
}

impl ReconcileJob {
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            requests_sheet: None,
            stock_sheet: None,
            output: None,
        }
    }
}

/// Report plus the full output rows of one run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RunReport,
    pub lines: Vec<OutputLine>,
}

// ==========================================
// ReconcileService trait
// ==========================================
#[async_trait]
pub trait ReconcileService: Send + Sync {
    /// Reconcile one workbook (requests sheet vs stock sheet).
    async fn reconcile_workbook(&self, job: ReconcileJob) -> Result<RunOutcome, Box<dyn Error>>;

    /// Reconcile a pair of CSV files (requests, stock).
    async fn reconcile_csv_pair(
        &self,
        requests_csv: PathBuf,
        stock_csv: PathBuf,
        output: Option<PathBuf>,
    ) -> Result<RunOutcome, Box<dyn Error>>;

    /// Reconcile several workbooks concurrently. Each job owns its pool;
    /// failures are reported per file as strings so one bad workbook
    /// cannot take the batch down.
    async fn batch_reconcile(
        &self,
        jobs: Vec<ReconcileJob>,
    ) -> Result<Vec<Result<RunReport, String>>, Box<dyn Error>>;
}

// ==========================================
// ReconcileServiceImpl
// ==========================================
pub struct ReconcileServiceImpl {
    profile: MappingProfile,
    field_mapper: FieldMapper,
    engine: ReconcileEngine,
}

impl ReconcileServiceImpl {
    pub fn new(profile: MappingProfile) -> Self {
        Self {
            profile,
            field_mapper: FieldMapper::new(),
            engine: ReconcileEngine::new(),
        }
    }

    /// Synchronous single-workbook run; the async trait methods and the
    /// batch runner both funnel through here.
    #[instrument(skip(self), fields(input = %job.input.display()))]
    pub fn run_workbook_sync(&self, job: &ReconcileJob) -> Result<RunOutcome, Box<dyn Error>> {
        let started_at = Utc::now();
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();

        info!(run_id = %run_id, "starting workbook reconciliation");

        let sheet_names = ExcelParser::list_sheets(&job.input)?;
        let requests_sheet = ExcelParser::resolve_sheet(
            &sheet_names,
            job.requests_sheet.as_deref(),
            &self.profile.requests_sheet,
            0,
        )?;
        let stock_sheet = ExcelParser::resolve_sheet(
            &sheet_names,
            job.stock_sheet.as_deref(),
            &self.profile.stock_sheet,
            1,
        )?;
        info!(requests_sheet = %requests_sheet, stock_sheet = %stock_sheet, "sheets resolved");

        let requests_table = ExcelParser::parse_sheet(&job.input, &requests_sheet)?;
        let stock_table = ExcelParser::parse_sheet(&job.input, &stock_sheet)?;

        self.finish_run(
            run_id,
            started_at,
            start,
            &job.input,
            Some(requests_sheet),
            Some(stock_sheet),
            &requests_table,
            &stock_table,
            job.output.as_deref(),
        )
    }

    /// Synchronous CSV-pair run.
    #[instrument(skip(self), fields(
        requests = %requests_csv.display(),
        stock = %stock_csv.display()
    ))]
    pub fn run_csv_pair_sync(
        &self,
        requests_csv: &Path,
        stock_csv: &Path,
        output: Option<&Path>,
    ) -> Result<RunOutcome, Box<dyn Error>> {
        let started_at = Utc::now();
        let start = Instant::now();
        let run_id = Uuid::new_v4().to_string();

        info!(run_id = %run_id, "starting CSV-pair reconciliation");

        let requests_table = CsvParser::parse(requests_csv)?;
        let stock_table = CsvParser::parse(stock_csv)?;

        self.finish_run(
            run_id,
            started_at,
            start,
            requests_csv,
            None,
            None,
            &requests_table,
            &stock_table,
            output,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn finish_run(
        &self,
        run_id: String,
        started_at: chrono::DateTime<Utc>,
        start: Instant,
        source: &Path,
        requests_sheet: Option<String>,
        stock_sheet: Option<String>,
        requests_table: &RawTable,
        stock_table: &RawTable,
        output: Option<&Path>,
    ) -> Result<RunOutcome, Box<dyn Error>> {
        let requests = self
            .field_mapper
            .map_requests(requests_table, &self.profile.requests)?;
        let stock = self
            .field_mapper
            .map_stock(stock_table, &self.profile.stock)?;
        info!(
            request_rows = requests.len(),
            stock_rows = stock.len(),
            "tables mapped to canonical records"
        );

        let outcome = self.engine.reconcile(&requests, &stock);

        if let Some(path) = output {
            let is_csv = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false);
            if is_csv {
                CsvWriter::write_output(path, &outcome.lines)?;
            } else {
                ExcelWriter::write_output(path, &outcome.lines)?;
            }
        }

        let report = RunReport {
            run_id,
            source_file: source.display().to_string(),
            requests_sheet,
            stock_sheet,
            request_rows: requests.len(),
            stock_rows: stock.len(),
            output_rows: outcome.lines.len(),
            summary: outcome.summary.clone(),
            output_file: output.map(|p| p.display().to_string()),
            started_at,
            elapsed_ms: start.elapsed().as_millis() as i64,
        };

        info!(
            run_id = %report.run_id,
            output_rows = report.output_rows,
            dispatchable = report.summary.dispatchable_rows,
            total_unmet = report.summary.total_unmet_qty,
            elapsed_ms = report.elapsed_ms,
            "reconciliation run finished"
        );

        Ok(RunOutcome {
            report,
            lines: outcome.lines,
        })
    }
}

#[async_trait]
impl ReconcileService for ReconcileServiceImpl {
    async fn reconcile_workbook(&self, job: ReconcileJob) -> Result<RunOutcome, Box<dyn Error>> {
        self.run_workbook_sync(&job)
    }

    async fn reconcile_csv_pair(
        &self,
        requests_csv: PathBuf,
        stock_csv: PathBuf,
        output: Option<PathBuf>,
    ) -> Result<RunOutcome, Box<dyn Error>> {
        self.run_csv_pair_sync(&requests_csv, &stock_csv, output.as_deref())
    }

    async fn batch_reconcile(
        &self,
        jobs: Vec<ReconcileJob>,
    ) -> Result<Vec<Result<RunReport, String>>, Box<dyn Error>> {
        info!(job_count = jobs.len(), "starting batch reconciliation");

        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| {
                // each job gets its own service, pool and worker thread
                let service = ReconcileServiceImpl::new(self.profile.clone());
                tokio::task::spawn_blocking(move || {
                    service
                        .run_workbook_sync(&job)
                        .map(|outcome| outcome.report)
                        // errors cross the task boundary as strings
                        .map_err(|e| e.to_string())
                })
            })
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in futures::future::join_all(handles).await {
            match handle {
                Ok(result) => {
                    if let Err(message) = &result {
                        error!(error = %message, "batch job failed");
                    }
                    results.push(result);
                }
                Err(join_err) => {
                    error!(error = %join_err, "batch job panicked");
                    results.push(Err(join_err.to_string()));
                }
            }
        }

        Ok(results)
    }
}
