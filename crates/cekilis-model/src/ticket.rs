// SPDX-License-Identifier: Apache-2.0

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::raffle_date::days_until_raffle;
use crate::schema::{ticket_fields as f, FromDocument};
use crate::{Categorized, Category, Collection, Document};

/// Purchasable raffle entry. Read-only display data; `purchase_count <=
/// total_ticket` is expected but belongs to the remote store to enforce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub category: Category,
    pub description: String,
    pub image_url: String,
    pub is_available: bool,
    pub is_live: bool,
    pub prize_count: u64,
    pub prize_value: i64,
    pub purchase_count: u64,
    /// `dd.MM.yy`
    pub raffle_date: String,
    pub ticket_price: Decimal,
    pub title: String,
    pub total_ticket: u64,
}

impl Ticket {
    /// Share of the supply still unsold, in percent.
    #[must_use]
    pub fn remaining_ticket_percent(&self) -> f64 {
        if self.total_ticket == 0 {
            return 0.0;
        }
        let total = self.total_ticket as f64;
        (total - self.purchase_count as f64) / total * 100.0
    }

    #[must_use]
    pub fn days_until_raffle(&self, now: DateTime<Utc>) -> i64 {
        days_until_raffle(&self.raffle_date, now)
    }
}

impl Categorized for Ticket {
    fn category(&self) -> &Category {
        &self.category
    }
}

impl FromDocument for Ticket {
    const COLLECTION: Collection = Collection::Tickets;

    fn from_document(document: &Document) -> Self {
        Self {
            id: document.id.clone(),
            category: Category::new(f::CATEGORY.read(document)),
            description: f::DESCRIPTION.read(document),
            image_url: f::IMAGE_URL.read(document),
            is_available: f::IS_AVAILABLE.read(document),
            is_live: f::IS_LIVE.read(document),
            prize_count: f::PRIZE_COUNT.read(document),
            prize_value: f::PRIZE_VALUE.read(document),
            purchase_count: f::PURCHASE_COUNT.read(document),
            raffle_date: f::RAFFLE_DATE.read(document),
            ticket_price: f::TICKET_PRICE.read(document),
            title: f::TITLE.read(document),
            total_ticket: f::TOTAL_TICKET.read(document),
        }
    }
}
