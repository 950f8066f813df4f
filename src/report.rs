use crate::builder::ReportRow;
use crate::formatting::{HIGHLIGHT_THRESHOLD, format_volume};
use crate::write_output_file;
use anyhow::Result;
use chrono::{DateTime, Local};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use minify_html::{Cfg, minify};
use std::path::Path;

pub struct HtmlReportContext<'a> {
    pub rows: &'a [ReportRow],
    pub source_path: &'a Path,
    pub run_started_at: &'a DateTime<Local>,
    pub minify: bool,
}

/// Renders the report and writes it to `output_path`, minified when requested.
///
/// # Errors
///
/// Fails when the output directory cannot be created or the file cannot be written.
pub async fn save_html_report(output_path: &Path, context: &HtmlReportContext<'_>) -> Result<()> {
    let html = render_html_report(context);
    let bytes = if context.minify {
        minify_report(&html)
    } else {
        html.into_bytes()
    };
    write_output_file(output_path, &bytes).await
}

#[must_use]
pub fn render_html_report(context: &HtmlReportContext<'_>) -> String {
    let generated_at = context
        .run_started_at
        .format("%Y-%m-%d %H:%M:%S %Z")
        .to_string();
    let missing = context
        .rows
        .iter()
        .filter(|row| row.v1.is_missing())
        .count();
    let highlighted = context.rows.iter().filter(|row| row.highlight).count();

    let page = html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Отчет по объему воды" }
                style { (PreEscaped(REPORT_STYLE)) }
            }
            body {
                div class="page" {
                    header class="hero" {
                        div class="pill" { "volreport v" (env!("CARGO_PKG_VERSION")) }
                        h1 { "Отчет по показаниям датчиков" }
                        div class="meta" {
                            div {
                                span class="label" { "Сформирован" }
                                span class="value mono" { (generated_at) }
                            }
                            div {
                                span class="label" { "Источник" }
                                span class="value mono" { (context.source_path.display().to_string()) }
                            }
                        }
                    }
                    section class="cards" {
                        (card("Дней", context.rows.len()))
                        (card("Без данных", missing))
                        (card(&format!("Выше {HIGHLIGHT_THRESHOLD}%"), highlighted))
                    }
                    section class="table-section" {
                        div class="table-wrap" {
                            table {
                                thead {
                                    tr {
                                        th { "День" }
                                        th { "V1 (м³)" }
                                        th { "V2 (м³)" }
                                        th { "%" }
                                    }
                                }
                                tbody {
                                    @for row in context.rows {
                                        (render_row(row))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };
    page.into_string()
}

fn card(label: &str, value: usize) -> Markup {
    html! {
        div class="card" {
            div class="card-label" { (label) }
            div class="card-value" { (value) }
        }
    }
}

fn render_row(row: &ReportRow) -> Markup {
    let percent_class = if row.highlight {
        "num highlight"
    } else {
        "num"
    };
    html! {
        tr class=[row.v1.is_missing().then_some("missing")] {
            td class="num" { (row.day) }
            td class="num" { (format_volume(row.v1)) }
            td class="num" { (format_volume(row.v2)) }
            td class=(percent_class) { (row.percent_formatted) }
        }
    }
}

fn minify_report(html: &str) -> Vec<u8> {
    let mut cfg = Cfg::new();
    cfg.minify_css = true;
    minify(html.as_bytes(), &cfg)
}

const REPORT_STYLE: &str = r#"
:root {
  color-scheme: light;
  --bg: #f4f7f9;
  --ink: #1b2631;
  --muted: #5d6d7e;
  --card: #ffffff;
  --accent: #1f618d;
  --alert: #fadbd8;
  --alert-ink: #922b21;
  --border: #d6dee5;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: "Segoe UI", "Helvetica Neue", sans-serif;
  color: var(--ink);
  background: var(--bg);
}

.page {
  max-width: 960px;
  margin: 0 auto;
  padding: 40px 24px 56px;
}

.hero {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 16px;
  padding: 28px 32px;
}

.pill {
  display: inline-block;
  padding: 4px 12px;
  border-radius: 999px;
  background: rgba(31, 97, 141, 0.1);
  color: var(--accent);
  font-size: 12px;
  font-weight: 600;
  text-transform: uppercase;
  letter-spacing: 0.08em;
}

h1 {
  font-size: 2rem;
  margin: 14px 0 12px;
}

.meta {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
  gap: 12px;
}

.label,
.card-label {
  display: block;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.1em;
  color: var(--muted);
  margin-bottom: 4px;
}

.value {
  font-weight: 600;
}

.mono,
.num {
  font-family: "JetBrains Mono", "SFMono-Regular", ui-monospace, monospace;
}

.cards {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
  gap: 16px;
  margin: 24px 0;
}

.card {
  background: var(--card);
  border: 1px solid var(--border);
  border-radius: 14px;
  padding: 16px 20px;
}

.card-value {
  font-size: 24px;
  font-weight: 600;
  color: var(--accent);
}

.table-wrap {
  border: 1px solid var(--border);
  border-radius: 14px;
  overflow: auto;
  background: var(--card);
}

table {
  width: 100%;
  border-collapse: collapse;
}

thead th {
  background: var(--accent);
  color: #ffffff;
  text-align: left;
  font-size: 12px;
  text-transform: uppercase;
  letter-spacing: 0.08em;
  padding: 12px 16px;
}

tbody td {
  padding: 10px 16px;
  border-bottom: 1px solid var(--border);
  font-size: 14px;
}

.num {
  text-align: right;
  font-variant-numeric: tabular-nums;
}

tr.missing td {
  color: var(--muted);
  font-style: italic;
}

td.highlight {
  background: var(--alert);
  color: var(--alert-ink);
  font-weight: 700;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{RawSeries, Reading, ReportBuilder};
    use chrono::TimeZone;

    fn render(rows: &[ReportRow]) -> String {
        let started = Local.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        render_html_report(&HtmlReportContext {
            rows,
            source_path: Path::new("data/input/<readings>.json"),
            run_started_at: &started,
            minify: false,
        })
    }

    fn sample_rows() -> Vec<ReportRow> {
        let raw: RawSeries = [
            (1, Reading::Present { v1: 100.0, v2: 90.0 }),
            (2, Reading::Present { v1: 110.0, v2: 95.0 }),
            (3, Reading::Missing),
            (4, Reading::Present { v1: 1500.0, v2: 1200.0 }),
        ]
        .into_iter()
        .collect();
        ReportBuilder::new().build(&raw)
    }

    #[test]
    fn renders_rows_newest_first() {
        let html = render(&sample_rows());
        let day_four = html.find("<td class=\"num\">4</td>").unwrap();
        let day_one = html.find("<td class=\"num\">1</td>").unwrap();
        assert!(day_four < day_one);
        assert!(html.contains("1,500.00"));
    }

    #[test]
    fn highlights_only_the_percent_cell() {
        let html = render(&sample_rows());
        assert!(html.contains("<td class=\"num highlight\">50.00%</td>"));
        assert_eq!(html.matches("highlight").count(), 2);
    }

    #[test]
    fn missing_day_uses_label_and_empty_percent() {
        let html = render(&sample_rows());
        assert!(html.contains("<tr class=\"missing\">"));
        assert_eq!(html.matches("Данные отсутствуют").count(), 2);
        assert!(html.contains("<td class=\"num\"></td>"));
    }

    #[test]
    fn escapes_source_path() {
        let html = render(&[]);
        assert!(html.contains("data/input/&lt;readings&gt;.json"));
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
