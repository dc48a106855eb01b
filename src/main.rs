// ==========================================
// Cruce de Material SAP - CLI entry point
// ==========================================
// Reconciles one or more workbooks (or a CSV pair) and
// writes the dispatch export
// ==========================================

use cruce_sap::config::MappingProfile;
use cruce_sap::service::{ReconcileJob, ReconcileService, ReconcileServiceImpl};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = "\
Cruce de Material SAP

Usage:
  cruce-sap [OPTIONS] <workbook.xlsx> [<more.xlsx> ...]
  cruce-sap [OPTIONS] --requests-csv <requests.csv> --stock-csv <stock.csv>

Options:
  -o, --output <file>          export destination (.xlsx or .csv);
                               single-workbook / CSV-pair mode only
      --requests-sheet <name>  requests sheet name (default: auto-detect)
      --stock-sheet <name>     stock sheet name (default: auto-detect)
      --profile <file.json>    column mapping profile
      --report-json            print the run report(s) as JSON
  -h, --help                   show this help

With several workbooks the export lands next to each input as
<stem>_cruce.xlsx and runs execute concurrently, one stock pool per file.";

struct CliArgs {
    inputs: Vec<PathBuf>,
    requests_csv: Option<PathBuf>,
    stock_csv: Option<PathBuf>,
    output: Option<PathBuf>,
    requests_sheet: Option<String>,
    stock_sheet: Option<String>,
    profile: Option<PathBuf>,
    report_json: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = CliArgs {
        inputs: Vec::new(),
        requests_csv: None,
        stock_csv: None,
        output: None,
        requests_sheet: None,
        stock_sheet: None,
        profile: None,
        report_json: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Err(String::new()),
            "-o" | "--output" => {
                args.output = Some(PathBuf::from(expect_value(&mut iter, &arg)?));
            }
            "--requests-sheet" => args.requests_sheet = Some(expect_value(&mut iter, &arg)?),
            "--stock-sheet" => args.stock_sheet = Some(expect_value(&mut iter, &arg)?),
            "--profile" => args.profile = Some(PathBuf::from(expect_value(&mut iter, &arg)?)),
            "--requests-csv" => {
                args.requests_csv = Some(PathBuf::from(expect_value(&mut iter, &arg)?));
            }
            "--stock-csv" => {
                args.stock_csv = Some(PathBuf::from(expect_value(&mut iter, &arg)?));
            }
            "--report-json" => args.report_json = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option: {}", other));
            }
            _ => args.inputs.push(PathBuf::from(arg)),
        }
    }

    let csv_mode = args.requests_csv.is_some() || args.stock_csv.is_some();
    if csv_mode && (args.requests_csv.is_none() || args.stock_csv.is_none()) {
        return Err("--requests-csv and --stock-csv must be given together".to_string());
    }
    if csv_mode && !args.inputs.is_empty() {
        return Err("CSV-pair mode does not take workbook arguments".to_string());
    }
    if !csv_mode && args.inputs.is_empty() {
        return Err("no input workbook given".to_string());
    }
    if args.inputs.len() > 1 && args.output.is_some() {
        return Err("--output applies to a single workbook only".to_string());
    }

    Ok(args)
}

fn expect_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next()
        .ok_or_else(|| format!("missing value for {}", flag))
}

fn default_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("cruce");
    input.with_file_name(format!("{}_cruce.xlsx", stem))
}

#[tokio::main]
async fn main() -> ExitCode {
    cruce_sap::logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            if message.is_empty() {
                println!("{}", USAGE);
                return ExitCode::SUCCESS;
            }
            eprintln!("error: {}\n\n{}", message, USAGE);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("{} v{}", cruce_sap::APP_NAME, cruce_sap::VERSION);

    let profile = match &args.profile {
        Some(path) => match MappingProfile::from_json_file(path) {
            Ok(profile) => profile,
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => MappingProfile::default(),
    };

    let service = ReconcileServiceImpl::new(profile);

    // CSV-pair mode
    if let (Some(requests_csv), Some(stock_csv)) = (args.requests_csv, args.stock_csv) {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| default_output(&requests_csv));
        match service
            .reconcile_csv_pair(requests_csv, stock_csv, Some(output))
            .await
        {
            Ok(outcome) => {
                print_report(&outcome.report, args.report_json);
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    // single workbook
    if args.inputs.len() == 1 {
        let input = args.inputs.into_iter().next().unwrap_or_default();
        let output = args.output.clone().unwrap_or_else(|| default_output(&input));
        let job = ReconcileJob {
            input,
            requests_sheet: args.requests_sheet,
            stock_sheet: args.stock_sheet,
            output: Some(output),
        };
        return match service.reconcile_workbook(job).await {
            Ok(outcome) => {
                print_report(&outcome.report, args.report_json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    // batch mode
    let jobs: Vec<ReconcileJob> = args
        .inputs
        .iter()
        .map(|input| ReconcileJob {
            input: input.clone(),
            requests_sheet: args.requests_sheet.clone(),
            stock_sheet: args.stock_sheet.clone(),
            output: Some(default_output(input)),
        })
        .collect();

    match service.batch_reconcile(jobs).await {
        Ok(results) => {
            let mut failures = 0;
            for result in &results {
                match result {
                    Ok(report) => print_report(report, args.report_json),
                    Err(message) => {
                        failures += 1;
                        eprintln!("error: {}", message);
                    }
                }
            }
            if failures > 0 {
                eprintln!("{} of {} workbooks failed", failures, results.len());
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &cruce_sap::domain::RunReport, as_json: bool) {
    if as_json {
        match serde_json::to_string_pretty(report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("error: report serialization failed: {}", e),
        }
        return;
    }

    println!("{}", report.source_file);
    println!(
        "  filas generadas: {}  descargables (Si): {}  no descargables: {}",
        report.summary.total_rows,
        report.summary.dispatchable_rows,
        report.summary.non_dispatchable_rows
    );
    println!("  suma de diferencia: {}", report.summary.total_unmet_qty);
    if let Some(output) = &report.output_file {
        println!("  export: {}", output);
    }
}
