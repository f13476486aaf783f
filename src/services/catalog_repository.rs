use async_trait::async_trait;
use paint_match::{CatalogAccessor, CatalogSnapshot};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Trait for paint catalog storage
///
/// Readers take an `Arc` snapshot and keep using it for the whole query,
/// so a concurrent `replace` never changes the catalog under a search.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Current catalog snapshot
    async fn snapshot(&self) -> Arc<CatalogSnapshot>;

    /// Swap in a freshly loaded catalog
    async fn replace(&self, snapshot: CatalogSnapshot);

    /// Number of paints in the current catalog
    async fn count(&self) -> usize;
}

/// In-memory catalog storage
pub struct InMemoryCatalog {
    current: RwLock<Arc<CatalogSnapshot>>,
}

impl InMemoryCatalog {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new(CatalogSnapshot::default())
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.current.read().await.clone()
    }

    async fn replace(&self, snapshot: CatalogSnapshot) {
        let count = snapshot.len();
        *self.current.write().await = Arc::new(snapshot);
        tracing::info!(paints = count, "Catalog replaced");
    }

    async fn count(&self) -> usize {
        self.current.read().await.len()
    }
}
