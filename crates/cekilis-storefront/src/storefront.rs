use std::sync::Arc;

use cekilis_core::{ClockPort, Error, Result, SystemClock};
use cekilis_model::{Artwork, CategoryFilter, Ticket};
use cekilis_store::{DocumentStore, HttpDocumentStore, InMemoryDocumentStore, LocalFsDocumentStore};
use tracing::info;

use crate::cart::SharedCart;
use crate::catalog::CatalogRepository;
use crate::config::{StoreSource, StorefrontConfig};
use crate::shuffle::Shuffle;

/// Owns one repository per collection, the cart and the clock.
pub struct Storefront {
    config: StorefrontConfig,
    tickets: CatalogRepository<Ticket>,
    artworks: CatalogRepository<Artwork>,
    cart: SharedCart,
    clock: Arc<dyn ClockPort>,
}

impl Storefront {
    pub fn new(config: StorefrontConfig, store: Arc<dyn DocumentStore>) -> Result<Self> {
        config.validate()?;
        info!(
            backend = store.backend_tag(),
            page_size = config.page_size,
            "storefront ready"
        );
        Ok(Self {
            tickets: CatalogRepository::new(Arc::clone(&store), config.page_size),
            artworks: CatalogRepository::new(store, config.page_size),
            cart: SharedCart::new(),
            clock: Arc::new(SystemClock),
            config,
        })
    }

    pub fn from_config(config: StorefrontConfig) -> Result<Self> {
        let store = build_store(&config)?;
        Self::new(config, store)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn ClockPort>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_shuffle(self, shuffle: Arc<dyn Shuffle>) -> Self {
        Self {
            tickets: self.tickets.with_shuffle(Arc::clone(&shuffle)),
            artworks: self.artworks.with_shuffle(shuffle),
            ..self
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn tickets(&self) -> &CatalogRepository<Ticket> {
        &self.tickets
    }

    #[must_use]
    pub fn artworks(&self) -> &CatalogRepository<Artwork> {
        &self.artworks
    }

    #[must_use]
    pub fn cart(&self) -> &SharedCart {
        &self.cart
    }

    /// Fetch both collections concurrently. Each result is independent.
    pub async fn refresh(&self) -> (Result<Arc<Vec<Ticket>>>, Result<Arc<Vec<Artwork>>>) {
        tokio::join!(self.tickets.fetch(), self.artworks.fetch())
    }

    #[must_use]
    pub fn category_filter(&self, selected: &str) -> CategoryFilter {
        CategoryFilter::from_selection(selected, &self.config.show_all_category)
    }

    #[must_use]
    pub fn visible_tickets(&self, selected: &str) -> Vec<Ticket> {
        self.tickets.visible(&self.category_filter(selected))
    }

    #[must_use]
    pub fn visible_artworks(&self, selected: &str) -> Vec<Artwork> {
        self.artworks.visible(&self.category_filter(selected))
    }

    #[must_use]
    pub fn find_ticket(&self, ticket_id: &str) -> Option<Ticket> {
        self.tickets
            .current()
            .iter()
            .find(|t| t.id == ticket_id)
            .cloned()
    }

    #[must_use]
    pub fn days_until_raffle(&self, ticket: &Ticket) -> i64 {
        ticket.days_until_raffle(self.clock.now())
    }
}

/// Instantiate the document store named by `config.store`.
pub fn build_store(config: &StorefrontConfig) -> Result<Arc<dyn DocumentStore>> {
    Ok(match &config.store {
        StoreSource::Memory => Arc::new(InMemoryDocumentStore::new()),
        StoreSource::LocalFs(root) => Arc::new(LocalFsDocumentStore::new(root.clone())),
        StoreSource::Http(url) => Arc::new(
            HttpDocumentStore::new(url.clone(), config.http_timeout)
                .map_err(|e| Error::Config(format!("store client: {e}")))?,
        ),
    })
}
