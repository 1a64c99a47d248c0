// SPDX-License-Identifier: Apache-2.0

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{SelectionId, Ticket};

/// One cart line: a ticket and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketSelection {
    pub id: SelectionId,
    pub ticket: Ticket,
    pub multiplier: u32,
}

impl TicketSelection {
    #[must_use]
    pub fn new(ticket: Ticket, multiplier: u32) -> Self {
        Self {
            id: SelectionId::generate(),
            ticket,
            multiplier,
        }
    }

    #[must_use]
    pub fn ticket_id(&self) -> &str {
        &self.ticket.id
    }

    /// `ticket_price * multiplier`, or `None` when it does not fit in a
    /// `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.ticket
            .ticket_price
            .checked_mul(Decimal::from(self.multiplier))
    }
}
