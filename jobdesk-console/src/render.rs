//! Terminal rendering for the banner and the jobs table

use colored::*;
use jobdesk_core::domain::job::JobStatus;
use tracing::trace;

use crate::status::{BannerView, StatusLevel, StatusMessage};
use crate::store::{JobRow, TableView};

/// Prints banner updates as single colored lines
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBanner;

impl BannerView for TerminalBanner {
    fn show(&self, status: &StatusMessage) {
        let level = colorize_level(status.level);
        if status.task_count > 0 {
            println!(
                "{} {} {}",
                level,
                status.message,
                format!("[{}]", status.task_count).dimmed()
            );
        } else {
            println!("{} {}", level, status.message);
        }
    }

    fn hide(&self) {
        trace!("Banner hidden");
    }

    fn badge(&self, count: u64) {
        trace!(count, "Task badge updated");
    }
}

/// Prints the whole table on every redraw
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalTable;

impl TableView for TerminalTable {
    fn render(&self, rows: &[JobRow]) {
        if rows.is_empty() {
            println!("{}", "No jobs found.".yellow());
            return;
        }

        println!(
            "{}",
            format!(
                "{:<12} {:<40} {:<12} {:<12} {:>6}  {}",
                "JOB", "TITLE", "BUDGET", "STATUS", "FIT", "UPDATED"
            )
            .bold()
        );
        for row in rows {
            print_row(row);
        }
        println!("{}", "─".repeat(100).dimmed());
    }
}

fn print_row(row: &JobRow) {
    let fit = row
        .job_fit
        .map(|f| format!("{:.2}", f))
        .unwrap_or_else(|| "-".to_string());

    println!(
        "{} {:<40} {:<12} {} {:>6}  {}",
        format!("{:<12}", truncate(&row.job_id, 12)).cyan(),
        truncate(&row.title, 40),
        truncate(&row.budget, 12),
        colorize_status(row.status),
        fit,
        row.last_updated_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

/// Colorize job status for display
pub fn colorize_status(status: JobStatus) -> ColoredString {
    let status_str = format!("{:<12}", status.as_str());
    match status {
        JobStatus::New => status_str.yellow(),
        JobStatus::InProgress => status_str.cyan(),
        JobStatus::Completed => status_str.green(),
        JobStatus::Cancelled => status_str.dimmed(),
    }
}

fn colorize_level(level: StatusLevel) -> ColoredString {
    match level {
        StatusLevel::Loading => "⟳".cyan(),
        StatusLevel::Success => "✓".green(),
        StatusLevel::Error => "✗".red(),
        StatusLevel::Info => "ℹ".blue(),
    }
}
