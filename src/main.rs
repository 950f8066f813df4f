use anyhow::Result;
use chrono::Local;
use clap::Parser;
use log::info;
use volreport::ReportBuilder;
use volreport::cli::Cli;
use volreport::export::save_rows_csv;
use volreport::logging::init_logger;
use volreport::report::{HtmlReportContext, save_html_report};
use volreport::sources::load_series;
use volreport::summary::{SummaryContext, SummaryPaths, print_summary};

#[tokio::main]
async fn main() -> Result<()> {
    colored::control::set_override(true);

    let mut cli = Cli::parse();

    if let Some(command) = cli.command.take() {
        volreport::cli::handle_command(command)?;
        return Ok(());
    }

    let Cli {
        input,
        save_csv,
        save_html,
        archive_csv,
        minify_html,
        verbose,
        quiet,
        ..
    } = cli;

    init_logger(verbose, quiet);
    let run_started_at = Local::now();

    let series = load_series(&input).await?;
    let rows = ReportBuilder::new().build(&series);
    info!(
        "Built {} row(s), {} highlighted",
        rows.len(),
        rows.iter().filter(|row| row.highlight).count()
    );

    let csv_path = match save_csv.as_deref() {
        Some(path) => Some(save_rows_csv(&rows, path, archive_csv).await?),
        None => None,
    };

    if let Some(path) = save_html.as_deref() {
        let html_context = HtmlReportContext {
            rows: &rows,
            source_path: &input,
            run_started_at: &run_started_at,
            minify: minify_html,
        };
        save_html_report(path, &html_context).await?;
        info!("HTML report written to {}", path.display());
    }

    if !quiet {
        print_summary(&SummaryContext {
            source_path: &input,
            run_started_at: &run_started_at,
            paths: SummaryPaths {
                csv: csv_path.as_deref(),
                html: save_html.as_deref(),
            },
            rows: &rows,
        });
    }

    Ok(())
}
