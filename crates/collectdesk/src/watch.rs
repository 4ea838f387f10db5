// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `collectdesk watch`: redraw the due board on every tick until interrupted.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use collectdesk_config::model::ReminderConfig;
use collectdesk_reminders::{DueTicker, TickerSettings};

use crate::app::App;
use crate::render::{self, Output};

/// Returns a token cancelled on SIGINT (Ctrl+C) or SIGTERM.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), stopping"),
                        _ = sigterm.recv() => info!("received SIGTERM, stopping"),
                    }
                }
                Err(_) => {
                    let _ = ctrl_c.await;
                    info!("received Ctrl+C, stopping");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, stopping");
        }

        token_clone.cancel();
        debug!("signal handler completed");
    });

    token
}

/// Print the board now and after every tick until a shutdown signal.
pub async fn run(app: &App, config: &ReminderConfig, out: Output) {
    let shutdown = install_signal_handler();
    let settings = TickerSettings::from_config(config);
    info!(
        period_secs = settings.period.as_secs(),
        sweep = settings.sweep.is_some(),
        "watching due board"
    );

    let ticker = DueTicker::spawn(app.service.clone(), settings, &shutdown).await;
    let mut boards = ticker.subscribe();

    loop {
        let board = boards.borrow_and_update().clone();
        out.emit(&board, |color| {
            render::board_text(&board, render::describe_reminder, color)
        });

        tokio::select! {
            changed = boards.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = shutdown.cancelled() => break,
        }
    }

    ticker.stop().await;
}
