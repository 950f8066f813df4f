use crate::builder::ReportRow;
use crate::formatting::format_volume;
use chrono::{DateTime, Local};
use colored::Colorize;
use std::path::Path;

pub struct SummaryPaths<'a> {
    pub csv: Option<&'a Path>,
    pub html: Option<&'a Path>,
}

pub struct SummaryContext<'a> {
    pub source_path: &'a Path,
    pub run_started_at: &'a DateTime<Local>,
    pub paths: SummaryPaths<'a>,
    pub rows: &'a [ReportRow],
}

pub fn print_summary(context: &SummaryContext<'_>) {
    println!();
    print_summary_header(context);
    print_summary_paths(&context.paths);
    println!();
    println!("{}", "Deviation Report".bold().bright_magenta());
    let table_width = print_rows_table(context.rows);
    if table_width > 0 {
        println!("{}", "=".repeat(table_width).bright_cyan());
    }
}

fn print_summary_header(context: &SummaryContext<'_>) {
    println!(
        "{}",
        "====================== Volume Report ======================"
            .bold()
            .bright_cyan()
    );
    println!(
        "{} {}",
        "Run started".bright_yellow().bold(),
        context
            .run_started_at
            .format("%Y-%m-%d %H:%M:%S %Z")
            .to_string()
            .bright_white()
    );
    let missing = context.rows.iter().filter(|row| row.v1.is_missing()).count();
    let highlighted = context.rows.iter().filter(|row| row.highlight).count();
    println!(
        "{} {} | {} | {} | {}",
        "Input".bright_yellow().bold(),
        format!("{}", context.source_path.display()).bright_white(),
        format!("Days: {}", context.rows.len()).bright_white(),
        format!("Missing: {missing}").bright_white(),
        format!("Highlighted: {highlighted}").bright_white()
    );
}

fn print_summary_paths(paths: &SummaryPaths<'_>) {
    print_path_line("Report CSV", paths.csv, "not saved (use --save-csv)");
    print_path_line("HTML Report", paths.html, "not saved (use --save-html)");
}

fn print_path_line(label: &str, path: Option<&Path>, hint: &str) {
    let label_colored = label.bright_yellow().bold();
    match path {
        Some(path) => println!(
            "{} {}",
            label_colored,
            format!("{}", path.display()).bright_white()
        ),
        None => println!("{} {}", label_colored, hint.bright_black()),
    }
}

fn print_rows_table(rows: &[ReportRow]) -> usize {
    if rows.is_empty() {
        let message = "No readings available.";
        println!("{}", message.bright_black());
        return message.len();
    }

    let header = format_table_line("Day", "V1", "V2", "%");
    let width = header.chars().count();
    println!("{}", header.bold().bright_white());
    println!("{}", divider(width).bright_black());

    for row in rows {
        let line = format_table_line(
            &row.day.to_string(),
            &format_volume(row.v1),
            &format_volume(row.v2),
            &row.percent_formatted,
        );
        if row.highlight {
            println!("{}", line.bright_red().bold());
        } else if row.v1.is_missing() {
            println!("{}", line.bright_black());
        } else {
            println!("{}", line.bright_green());
        }
    }
    width
}

fn format_table_line(day: &str, v1: &str, v2: &str, percent: &str) -> String {
    format!("{day:>4} | {v1:>18} | {v2:>18} | {percent:>9}")
}

fn divider(width: usize) -> String {
    format_table_line("", "", "", "")
        .chars()
        .map(|ch| if ch == '|' { '+' } else { '-' })
        .take(width)
        .collect()
}
