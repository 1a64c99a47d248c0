//! Ticket cart.
//!
//! At most one selection per ticket id. After every mutation `total_price`
//! equals the sum of `ticket_price * multiplier` over all selections; the
//! total is recomputed from scratch rather than adjusted incrementally. A
//! change whose total would overflow `Decimal` is rejected and leaves the cart
//! as it was.

use std::sync::Arc;

use cekilis_core::{Error, Result};
use cekilis_model::{Ticket, TicketSelection};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Quantity buttons offered next to a ticket.
pub const MULTIPLIER_PRESETS: [u32; 4] = [1, 5, 10, 20];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CartLedger {
    selections: Vec<TicketSelection>,
    total_price: Decimal,
}

impl CartLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selections(&self) -> &[TicketSelection] {
        &self.selections
    }

    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Number of tickets across all lines.
    #[must_use]
    pub fn ticket_count(&self) -> u64 {
        self.selections
            .iter()
            .map(|s| u64::from(s.multiplier))
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    #[must_use]
    pub fn get(&self, ticket_id: &str) -> Option<&TicketSelection> {
        self.selections.iter().find(|s| s.ticket_id() == ticket_id)
    }

    /// Add `multiplier` tickets, merging into an existing line for the same
    /// ticket id.
    pub fn add_ticket(&mut self, ticket: &Ticket, multiplier: u32) -> Result<&TicketSelection> {
        ensure_multiplier(ticket, multiplier)?;
        let merged = match self.position(&ticket.id) {
            Some(index) => self.selections[index]
                .multiplier
                .checked_add(multiplier)
                .ok_or_else(|| invalid_multiplier(ticket, multiplier))?,
            None => multiplier,
        };
        let index = self.write_line(ticket, merged, multiplier)?;
        debug!(
            ticket_id = %ticket.id,
            multiplier = merged,
            total = %self.total_price,
            "cart line added"
        );
        Ok(&self.selections[index])
    }

    /// Replace the quantity for `ticket`, or add a line if absent.
    pub fn set_multiplier(&mut self, ticket: &Ticket, multiplier: u32) -> Result<&TicketSelection> {
        ensure_multiplier(ticket, multiplier)?;
        let index = self.write_line(ticket, multiplier, multiplier)?;
        debug!(ticket_id = %ticket.id, multiplier, total = %self.total_price, "cart line set");
        Ok(&self.selections[index])
    }

    pub fn remove_selection(&mut self, ticket_id: &str) -> Option<TicketSelection> {
        let index = self.position(ticket_id)?;
        let removed = self.selections.remove(index);
        // Lines are non-negative, so a subset of a total that fit still fits.
        if let Some(total) = checked_total(&self.selections) {
            self.total_price = total;
        }
        debug!(ticket_id, total = %self.total_price, "cart line removed");
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.selections.clear();
        self.total_price = Decimal::ZERO;
    }

    fn position(&self, ticket_id: &str) -> Option<usize> {
        self.selections.iter().position(|s| s.ticket_id() == ticket_id)
    }

    /// Set the line for `ticket` to `multiplier` and recompute the total.
    /// When the total no longer fits in a `Decimal` the line change is undone
    /// and `requested` is reported back.
    fn write_line(&mut self, ticket: &Ticket, multiplier: u32, requested: u32) -> Result<usize> {
        let (index, previous) = match self.position(&ticket.id) {
            Some(index) => {
                let previous = std::mem::replace(&mut self.selections[index].multiplier, multiplier);
                (index, Some(previous))
            }
            None => {
                self.selections
                    .push(TicketSelection::new(ticket.clone(), multiplier));
                (self.selections.len() - 1, None)
            }
        };
        if let Some(total) = checked_total(&self.selections) {
            self.total_price = total;
            return Ok(index);
        }
        match previous {
            Some(previous) => self.selections[index].multiplier = previous,
            None => {
                self.selections.pop();
            }
        }
        warn!(ticket_id = %ticket.id, multiplier = requested, "cart total overflow; line unchanged");
        Err(invalid_multiplier(ticket, requested))
    }
}

fn checked_total(selections: &[TicketSelection]) -> Option<Decimal> {
    selections
        .iter()
        .try_fold(Decimal::ZERO, |total, line| total.checked_add(line.line_total()?))
}

fn invalid_multiplier(ticket: &Ticket, multiplier: u32) -> Error {
    Error::InvalidMultiplier {
        ticket_id: ticket.id.clone(),
        multiplier,
    }
}

fn ensure_multiplier(ticket: &Ticket, multiplier: u32) -> Result<()> {
    if multiplier == 0 {
        return Err(invalid_multiplier(ticket, multiplier));
    }
    Ok(())
}

/// Cart shared between tasks; each operation runs under one lock so a merge
/// and its total recomputation are never interleaved with another caller.
#[derive(Debug, Clone, Default)]
pub struct SharedCart {
    inner: Arc<Mutex<CartLedger>>,
}

impl SharedCart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_ticket(&self, ticket: &Ticket, multiplier: u32) -> Result<TicketSelection> {
        let mut cart = self.inner.lock().await;
        cart.add_ticket(ticket, multiplier).cloned()
    }

    pub async fn set_multiplier(&self, ticket: &Ticket, multiplier: u32) -> Result<TicketSelection> {
        let mut cart = self.inner.lock().await;
        cart.set_multiplier(ticket, multiplier).cloned()
    }

    pub async fn remove_selection(&self, ticket_id: &str) -> Option<TicketSelection> {
        self.inner.lock().await.remove_selection(ticket_id)
    }

    pub async fn clear(&self) {
        self.inner.lock().await.clear();
    }

    pub async fn total_price(&self) -> Decimal {
        self.inner.lock().await.total_price()
    }

    pub async fn snapshot(&self) -> CartLedger {
        self.inner.lock().await.clone()
    }
}
