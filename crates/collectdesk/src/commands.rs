// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Every command that opens the store closes it again, whether or not the
//! command itself succeeded.

use serde::Serialize;

use collectdesk_config::CollectdeskConfig;
use collectdesk_core::{CallbackId, CallbackInput, CollectError};
use collectdesk_reminders::{CALLBACKS, Completion, MissedSweep};

use crate::Commands;
use crate::app::App;
use crate::render::{self, Output};

#[derive(Serialize)]
struct Done<'a> {
    id: &'a str,
    outcome: &'a str,
}

/// Run one subcommand to completion.
pub async fn run(
    command: Commands,
    config: &CollectdeskConfig,
    out: Output,
) -> Result<(), CollectError> {
    match command {
        Commands::Schedule {
            agent,
            agent_name,
            debtor,
            phone,
            at,
            notes,
        } => {
            let input = CallbackInput {
                agent_id: agent,
                agent_name,
                debtor_id: debtor,
                phone_number: phone,
                callback_date: at,
                notes,
            };
            let app = App::open(config).await?;
            let result = async {
                let reminder = app.service.schedule_callback(input).await?;
                out.emit(&reminder, |color| {
                    format!("scheduled\n{}", render::reminder_line(&reminder, color))
                });
                Ok::<_, CollectError>(())
            }
            .await;
            finish(app, result).await
        }

        Commands::List { agent } => {
            let app = App::open_scoped(config, agent).await?;
            let reminders = app.service.snapshot().await;
            let metrics = app.service.metrics().await;
            out.emit(
                &serde_json::json!({ "reminders": reminders, "metrics": metrics }),
                |color| render::reminder_list(&reminders, &metrics, color),
            );
            app.close().await
        }

        Commands::Complete { id } => {
            // Load the book so a repeat completion is recognized as such.
            let app = App::open_scoped(config, None).await?;
            let result = async {
                let outcome = match app.service.mark_complete(&CallbackId(id.clone())).await? {
                    Completion::Completed => "completed",
                    Completion::AlreadyCompleted => "already completed",
                };
                out.emit(&Done { id: &id, outcome }, |_| format!("{id}: {outcome}\n"));
                Ok::<_, CollectError>(())
            }
            .await;
            finish(app, result).await
        }

        Commands::Delete { id } => {
            let app = App::open(config).await?;
            let result = async {
                app.service.delete_reminder(&CallbackId(id.clone())).await?;
                let done = Done {
                    id: &id,
                    outcome: "deleted",
                };
                out.emit(&done, |_| format!("{id}: deleted\n"));
                Ok::<_, CollectError>(())
            }
            .await;
            finish(app, result).await
        }

        Commands::Due { agent } => {
            let app = App::open_scoped(config, agent).await?;
            let board = app.service.board(&CALLBACKS).await;
            out.emit(&board, |color| {
                render::board_text(&board, render::describe_reminder, color)
            });
            app.close().await
        }

        Commands::Badge { agent } => {
            let app = App::open(config).await?;
            let result = async {
                let count = app.service.workload_badge(&agent).await?;
                out.emit(
                    &serde_json::json!({ "agent": agent, "open": count }),
                    |_| format!("{agent}: {count} open callbacks\n"),
                );
                Ok::<_, CollectError>(())
            }
            .await;
            finish(app, result).await
        }

        Commands::Watch { agent } => {
            let app = App::open_scoped(config, agent).await?;
            crate::watch::run(&app, &config.reminders, out).await;
            app.close().await
        }

        Commands::Sweep => {
            let Some(sweep) = MissedSweep::from_config(&config.reminders) else {
                return Err(CollectError::Config(
                    "missed sweep is disabled; set reminders.missed_after_minutes".into(),
                ));
            };
            let app = App::open(config).await?;
            let result = async {
                let count = sweep.run(&app.service).await?;
                out.emit(&serde_json::json!({ "marked_missed": count }), |_| {
                    format!("{count} callbacks marked missed\n")
                });
                Ok::<_, CollectError>(())
            }
            .await;
            finish(app, result).await
        }
    }
}

/// Close `app`, reporting the command's own error ahead of a close error.
async fn finish(app: App, result: Result<(), CollectError>) -> Result<(), CollectError> {
    let closed = app.close().await;
    result.and(closed)
}
