#![forbid(unsafe_code)]
//! Storefront core: catalog retrieval, category filtering and the cart.
//!
//! [`Storefront`] is the composition root. It owns one repository per
//! collection and the shared cart; the presentation layer receives it by
//! reference instead of reaching for process-wide state.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod shuffle;
mod storefront;
pub mod telemetry;

pub use cart::{CartLedger, SharedCart, MULTIPLIER_PRESETS};
pub use catalog::CatalogRepository;
pub use config::{StoreSource, StorefrontConfig, DEFAULT_PAGE_SIZE};
pub use filter::{categories, filter, filter_by_selection};
pub use shuffle::{IdentityShuffle, RandomShuffle, SeededShuffle, Shuffle};
pub use storefront::{build_store, Storefront};
pub use telemetry::init_tracing;

pub const CRATE_NAME: &str = "cekilis-storefront";
