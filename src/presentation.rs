//! Presentation adapter
//!
//! Pure functions that turn a [`Poll`] into what a UI renders: the sorted
//! snapshot, per-rank colors, chart series for a pie and a bar chart, and a
//! plain HTML results table. Nothing here holds state.

use crate::Result;
use crate::types::{Color, Poll, ResultRow};
use serde::{Deserialize, Serialize};

/// Qualitative palette cycled by snapshot rank
pub const PALETTE: [Color; 10] = [
    Color::new(0x63, 0x6e, 0xfa),
    Color::new(0xef, 0x55, 0x3b),
    Color::new(0x00, 0xcc, 0x96),
    Color::new(0xab, 0x63, 0xfa),
    Color::new(0xff, 0xa1, 0x5a),
    Color::new(0x19, 0xd3, 0xf3),
    Color::new(0xff, 0x66, 0x92),
    Color::new(0xb6, 0xe8, 0x80),
    Color::new(0xff, 0x97, 0xff),
    Color::new(0xfe, 0xcb, 0x52),
];

/// Fill used for every bar of the bar chart (royal blue)
pub const BAR_COLOR: Color = Color::new(0x41, 0x69, 0xe1);

/// Size of the donut hole in the pie chart, as a fraction of the radius
pub const PIE_HOLE: f64 = 0.3;

/// Color for the row at `rank`
pub fn color_for_rank(rank: usize) -> Color {
    PALETTE[rank % PALETTE.len()]
}

/// Derive the sorted result rows for `poll`
///
/// Rows are ordered by count descending. Equal counts keep the order in
/// which the options were entered. Percentages are `0.0` while no votes
/// have been cast.
pub fn snapshot(poll: &Poll) -> Vec<ResultRow> {
    let total = poll.total_votes();

    let mut counted: Vec<(&str, u64)> = poll.tallies().collect();
    // sort_by is stable, so ties stay in option order
    counted.sort_by(|a, b| b.1.cmp(&a.1));

    counted
        .into_iter()
        .enumerate()
        .map(|(rank, (option, count))| ResultRow {
            option: option.to_string(),
            count,
            percentage: percentage(count, total),
            rank,
            color: color_for_rank(rank),
        })
        .collect()
}

fn percentage(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// Format a percentage with a fixed number of decimals, e.g. `75.0%`
pub fn format_percentage(value: f64, precision: usize) -> String {
    format!("{value:.precision$}%")
}

/// Pie chart series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<String>,
    pub hole: f64,
}

/// Bar chart series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarSeries {
    pub x: Vec<String>,
    pub y: Vec<u64>,
    /// Value labels drawn on the bars
    pub text: Vec<String>,
    pub color: String,
}

/// Everything a charting front end needs to draw the results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub total_votes: u64,
    pub pie: PieSeries,
    pub bar: BarSeries,
}

impl ChartData {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build pie and bar series from snapshot rows, keeping row order
pub fn chart_data(title: &str, rows: &[ResultRow]) -> ChartData {
    let labels: Vec<String> = rows.iter().map(|row| row.option.clone()).collect();
    let values: Vec<u64> = rows.iter().map(|row| row.count).collect();

    ChartData {
        title: title.to_string(),
        total_votes: values.iter().sum(),
        pie: PieSeries {
            labels: labels.clone(),
            values: values.clone(),
            colors: rows.iter().map(|row| row.color.to_hex()).collect(),
            hole: PIE_HOLE,
        },
        bar: BarSeries {
            x: labels,
            text: values.iter().map(u64::to_string).collect(),
            y: values,
            color: BAR_COLOR.to_hex(),
        },
    }
}

/// Render snapshot rows as an HTML table
///
/// Only structure is emitted; styling belongs to the page that embeds it.
pub fn results_table(rows: &[ResultRow], precision: usize) -> String {
    let mut html = String::from(
        "<table class=\"poll-results\">\n<thead><tr><th>Option</th><th>Votes</th><th>Share</th></tr></thead>\n<tbody>\n",
    );

    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&row.option),
            row.count,
            format_percentage(row.percentage, precision)
        ));
    }

    html.push_str("</tbody>\n</table>");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
