// SPDX-FileCopyrightText: 2026 Collectdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settlement installments and the payments-due view.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use collectdesk_core::DebtorId;

use crate::board::{Due, DueBoard};
use crate::classifier::SETTLEMENTS;

/// One scheduled payment of a negotiated settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementInstallment {
    pub id: String,
    pub debtor_id: DebtorId,
    /// Amount in minor currency units.
    pub amount_cents: i64,
    pub due_at: NaiveDateTime,
    pub paid: bool,
}

impl SettlementInstallment {
    /// Amount as a decimal string, e.g. `1250.05`.
    pub fn amount_display(&self) -> String {
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        format!("{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Due for SettlementInstallment {
    fn due_at(&self) -> NaiveDateTime {
        self.due_at
    }

    fn is_settled(&self) -> bool {
        self.paid
    }
}

/// Unpaid installments bucketed with the settlement profile.
pub fn payments_due(
    installments: impl IntoIterator<Item = SettlementInstallment>,
    now: NaiveDateTime,
) -> DueBoard<SettlementInstallment> {
    DueBoard::build(&SETTLEMENTS, installments, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use collectdesk_core::parse_datetime;

    fn installment(id: &str, due: &str, paid: bool) -> SettlementInstallment {
        SettlementInstallment {
            id: id.into(),
            debtor_id: DebtorId("ACC-1".into()),
            amount_cents: 125_005,
            due_at: parse_datetime(due).unwrap(),
            paid,
        }
    }

    #[test]
    fn buckets_unpaid_installments() {
        let now = parse_datetime("2025-03-10T10:00").unwrap();
        let board = payments_due(
            vec![
                installment("i1", "2025-03-10T08:30", false),
                installment("i2", "2025-03-10T09:00", false),
                installment("i3", "2025-03-10T11:01", false),
                installment("i4", "2025-03-09T10:00", true),
            ],
            now,
        );

        assert_eq!(board.overdue.len(), 1);
        assert_eq!(board.overdue[0].item.id, "i1");
        assert_eq!(board.overdue[0].proximity, "2 hours overdue");
        assert_eq!(board.due_now[0].item.id, "i2");
        assert_eq!(board.upcoming[0].proximity, "due in 1 hour");
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn amount_formats_cents() {
        let mut i = installment("i1", "2025-03-10T08:30", false);
        assert_eq!(i.amount_display(), "1250.05");
        i.amount_cents = -7;
        assert_eq!(i.amount_display(), "-0.07");
    }
}
