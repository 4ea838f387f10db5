// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The incremental metrics cache must always agree with a full recompute.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use collectdesk_config::model::WeekStart;
use collectdesk_core::CallbackId;
use collectdesk_reminders::{MetricsCache, Priority, Reminder, ReminderType, recompute};
use proptest::prelude::*;
use proptest::test_runner::Config;

#[derive(Debug, Clone)]
enum Op {
    Add {
        day_offset: i64,
        minute: i64,
        kind: u8,
        done: bool,
    },
    Complete(usize),
    Delete(usize),
    /// Move "now" forward by this many hours.
    Tick(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-40_i64..10, 0_i64..1440, 0_u8..4, any::<bool>()).prop_map(
            |(day_offset, minute, kind, done)| Op::Add { day_offset, minute, kind, done }
        ),
        2 => any::<usize>().prop_map(Op::Complete),
        2 => any::<usize>().prop_map(Op::Delete),
        1 => (1_i64..72).prop_map(Op::Tick),
    ]
}

fn kind(n: u8) -> ReminderType {
    match n {
        0 => ReminderType::Callback,
        1 => ReminderType::FollowUp,
        2 => ReminderType::Payment,
        _ => ReminderType::Other,
    }
}

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 12)
        .and_then(|d| d.and_hms_opt(10, 0, 0))
        .unwrap()
}

fn reminder(id: usize, due_at: NaiveDateTime, reminder_type: ReminderType, done: bool) -> Reminder {
    Reminder {
        id: CallbackId(format!("cb-{id}")),
        title: format!("Call {id}"),
        details: String::new(),
        account_number: None,
        reminder_type,
        priority: Priority::Medium,
        due_date: due_at.date(),
        due_time: due_at.format("%H:%M").to_string(),
        due_at,
        is_completed: done,
        created_by: "agent-1".into(),
        created_at: start(),
    }
}

fn run(ops: &[Op], week_start: WeekStart) -> Result<(), TestCaseError> {
    let mut now = start();
    let mut all: Vec<Reminder> = Vec::new();
    let mut cache = MetricsCache::new(week_start);
    cache.rebuild(&all, now);

    for (n, op) in ops.iter().enumerate() {
        match op {
            Op::Add {
                day_offset,
                minute,
                kind: k,
                done,
            } => {
                let day = now.date() + Duration::days(*day_offset);
                let due = day.and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(*minute);
                let r = reminder(n, due, kind(*k), *done);
                all.push(r.clone());
                cache.on_add(&r, &all, now);
            }
            Op::Complete(i) if !all.is_empty() => {
                let i = i % all.len();
                let before = all[i].clone();
                all[i].is_completed = true;
                cache.on_update(&before, &all[i], &all, now);
            }
            Op::Delete(i) if !all.is_empty() => {
                let removed = all.remove(i % all.len());
                cache.on_delete(&removed, &all, now);
            }
            Op::Tick(hours) => now += Duration::hours(*hours),
            _ => {}
        }
        prop_assert_eq!(cache.current(&all, now), recompute(&all, now, week_start));
    }
    Ok(())
}

proptest! {
    #![proptest_config(Config::with_cases(256))]
    #[test]
    fn incremental_matches_recompute_sunday(ops in prop::collection::vec(op(), 0..60)) {
        run(&ops, WeekStart::Sunday)?;
    }

    #[test]
    fn incremental_matches_recompute_monday(ops in prop::collection::vec(op(), 0..60)) {
        run(&ops, WeekStart::Monday)?;
    }
}
