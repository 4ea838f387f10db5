// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON output for CLI commands.
//!
//! Text is colored only when stdout is a terminal and `--plain` is not set.

use std::fmt::Write as _;
use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;
use strum::IntoEnumIterator;

use collectdesk_core::CollectError;
use collectdesk_reminders::{AggregateMetrics, Bucket, Due, DueBoard, Reminder, ReminderType};

/// Where and how command results are printed.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub json: bool,
    pub color: bool,
}

impl Output {
    pub fn detect(json: bool, plain: bool) -> Self {
        Self {
            json,
            color: !json && !plain && std::io::stdout().is_terminal(),
        }
    }

    /// Print `value` as pretty JSON, or `text` otherwise.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce(bool) -> String) {
        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
            );
        } else {
            print!("{}", text(self.color));
        }
    }

    pub fn error(&self, err: &CollectError) {
        if self.json {
            let body = serde_json::json!({ "error": err.kind(), "message": err.to_string() });
            eprintln!("{body}");
        } else if self.color {
            eprintln!("{} {err}", "error:".red().bold());
        } else {
            eprintln!("error: {err}");
        }
    }
}

/// One reminder as a single line.
pub fn reminder_line(r: &Reminder, color: bool) -> String {
    let mark = match (r.is_completed, color) {
        (true, true) => "✓".green().to_string(),
        (true, false) => "[x]".to_string(),
        (false, true) => "•".yellow().to_string(),
        (false, false) => "[ ]".to_string(),
    };
    let account = r
        .account_number
        .as_deref()
        .map(|a| format!(" ({a})"))
        .unwrap_or_default();
    format!(
        "  {mark} {} {}  {}{account}  {}  [{}]\n",
        r.due_date, r.due_time, r.title, r.details, r.id
    )
}

/// Rollup counters as an indented block.
pub fn metrics_block(m: &AggregateMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Today:     {} ({} completed)", m.today, m.today_completed);
    let _ = writeln!(out, "  This week: {}", m.week);
    let _ = writeln!(out, "  This month: {}", m.month);
    let by_type: Vec<String> = ReminderType::iter()
        .map(|t| format!("{t}={}", m.by_type.get(t)))
        .collect();
    let _ = writeln!(out, "  By type:   {}", by_type.join(" "));
    out
}

/// Reminders followed by their rollups.
pub fn reminder_list(reminders: &[Reminder], metrics: &AggregateMetrics, color: bool) -> String {
    let mut out = String::new();
    if reminders.is_empty() {
        out.push_str("  no reminders\n");
    }
    for r in reminders {
        out.push_str(&reminder_line(r, color));
    }
    out.push('\n');
    out.push_str(&metrics_block(metrics));
    out
}

/// A due board, one section per bucket in overdue, due-now, upcoming order.
pub fn board_text<T: Due>(
    board: &DueBoard<T>,
    describe: impl Fn(&T) -> String,
    color: bool,
) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {} board at {}",
        board.profile.name,
        board.now.format("%Y-%m-%d %H:%M")
    );
    for bucket in Bucket::iter() {
        let entries = board.bucket(bucket);
        let label = format!("{} ({})", board.profile.label(bucket), entries.len());
        let header = match (color, bucket) {
            (false, _) => label,
            (true, Bucket::Overdue) => label.red().bold().to_string(),
            (true, Bucket::DueNow) => label.yellow().bold().to_string(),
            (true, Bucket::Upcoming) => label.green().to_string(),
        };
        let _ = writeln!(out, "\n  {header}");
        for entry in entries {
            let _ = writeln!(out, "    {:<20} {}", entry.proximity, describe(&entry.item));
        }
    }
    out
}

/// Short label for a reminder on the board.
pub fn describe_reminder(r: &Reminder) -> String {
    format!("{} [{}]", r.title, r.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collectdesk_core::{Callback, CallbackId, CallbackStatus, DebtorId, parse_datetime};
    use collectdesk_reminders::{CALLBACKS, project};

    fn reminder(id: &str, due: &str, status: CallbackStatus) -> Reminder {
        project(&Callback {
            id: CallbackId::from(id),
            agent_id: "agent-1".into(),
            agent_name: None,
            debtor_id: DebtorId("ACC-9".into()),
            phone_number: "555-0100".into(),
            callback_date: parse_datetime(due).unwrap(),
            notes: "Wants a payment plan".into(),
            status,
            created_at: parse_datetime("2025-03-01T00:00").unwrap(),
        })
    }

    #[test]
    fn plain_reminder_line() {
        let line = reminder_line(
            &reminder("cb-1", "2025-03-10T14:30", CallbackStatus::Completed),
            false,
        );
        assert_eq!(
            line,
            "  [x] 2025-03-10 14:30  Call 555-0100 (ACC-9)  Wants a payment plan  [cb-1]\n"
        );
    }

    #[test]
    fn metrics_block_lists_every_type() {
        let text = metrics_block(&AggregateMetrics::default());
        assert!(text.contains("callback=0 follow-up=0 payment=0 other=0"));
    }

    #[test]
    fn board_sections_use_view_labels() {
        let now = parse_datetime("2025-03-10T10:00").unwrap();
        let board = DueBoard::build(
            &CALLBACKS,
            vec![
                reminder("cb-1", "2025-03-10T08:00", CallbackStatus::Pending),
                reminder("cb-2", "2025-03-10T10:10", CallbackStatus::Pending),
            ],
            now,
        );
        let text = board_text(&board, describe_reminder, false);
        assert!(text.contains("past (1)"));
        assert!(text.contains("now (1)"));
        assert!(text.contains("upcoming (0)"));
        assert!(text.contains("2 hours ago"));
        assert!(text.contains("due in 10 minutes"));
    }
}
