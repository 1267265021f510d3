use crate::api::ApiError;
use crate::models::Property;
use tracing::{debug, warn};

/// Identifies one fetch; only the newest ticket may update the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Last-known property collection plus the loading flag
#[derive(Debug, Default)]
pub struct ListingStore {
    properties: Vec<Property>,
    loading: bool,
    generation: u64,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a fetch. Readers keep seeing the previous collection until it completes.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket(self.generation)
    }

    /// Apply a fetch result. Returns false if a newer fetch superseded `ticket`.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Property>, ApiError>,
    ) -> bool {
        if ticket.0 != self.generation {
            debug!(
                "Discarding stale fetch #{} (latest is #{})",
                ticket.0, self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(properties) => {
                debug!("Fetch #{} loaded {} properties", ticket.0, properties.len());
                self.properties = properties;
            }
            Err(e) => {
                warn!("Failed to fetch properties: {}", e);
                self.properties.clear();
            }
        }
        true
    }

    /// Drop a listing locally after the API confirmed its deletion.
    pub fn remove(&mut self, id: &str) {
        self.properties.retain(|p| p.id != id);
    }
}
