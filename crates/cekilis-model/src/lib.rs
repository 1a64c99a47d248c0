#![forbid(unsafe_code)]
//! Catalog and cart model.
//!
//! Entities are built fresh from raw store documents on every fetch and are
//! immutable afterwards. Decoding never fails on a missing or mistyped field;
//! every field has an explicit default in [`schema`].

mod artwork;
mod category;
mod collection;
mod document;
mod ids;
pub mod raffle_date;
pub mod schema;
mod selection;
mod ticket;

pub use artwork::Artwork;
pub use category::{Categorized, Category, CategoryFilter, DEFAULT_CATEGORY, KNOWN_CATEGORIES};
pub use collection::Collection;
pub use document::Document;
pub use ids::SelectionId;
pub use raffle_date::{days_until_raffle, parse_raffle_date, RAFFLE_DATE_FORMAT};
pub use schema::FromDocument;
pub use selection::TicketSelection;
pub use ticket::Ticket;

pub const CRATE_NAME: &str = "cekilis-model";
