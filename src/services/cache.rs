use std::sync::Arc;
use std::time::Duration;

use crate::models::Catalog;
use crate::services::catalog::{CatalogError, CatalogLoader};

/// Shared, read-only catalog snapshot
///
/// The loaded catalog is held as an `Arc<Catalog>` and only ever replaced
/// wholesale, so concurrent readers see either the old or the new snapshot.
/// Empty loads are not cached; the next reader retries the source.
pub struct CatalogCache {
    loader: CatalogLoader,
    snapshots: moka::future::Cache<String, Arc<Catalog>>,
}

impl CatalogCache {
    /// Create a cache over `loader`. With `ttl_secs` set, a snapshot is
    /// reloaded after that many seconds; otherwise only on invalidation.
    pub fn new(loader: CatalogLoader, ttl_secs: Option<u64>) -> Self {
        let mut builder = moka::future::CacheBuilder::new(1);
        if let Some(secs) = ttl_secs.filter(|s| *s > 0) {
            builder = builder.time_to_live(Duration::from_secs(secs));
        }

        Self {
            loader,
            snapshots: builder.build(),
        }
    }

    pub fn loader(&self) -> &CatalogLoader {
        &self.loader
    }

    /// Current snapshot, loading it on first use
    pub async fn snapshot(&self) -> Arc<Catalog> {
        let key = self.loader.source_name();
        let loader = self.loader.clone();

        let result = self
            .snapshots
            .try_get_with(key.clone(), async move {
                let catalog = load_blocking(loader).await;
                if catalog.is_empty() {
                    Err(CatalogError::Unavailable(catalog.source().to_string()))
                } else {
                    tracing::info!("Catalog snapshot loaded: {} venues from {}", catalog.len(), catalog.source());
                    Ok(catalog)
                }
            })
            .await;

        match result {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::debug!("Serving empty catalog: {}", e);
                Arc::new(Catalog::empty(key))
            }
        }
    }

    /// Drop the current snapshot so the next reader reloads the source
    pub async fn invalidate(&self) {
        self.snapshots.invalidate(&self.loader.source_name()).await;
        tracing::info!("Catalog snapshot invalidated: {}", self.loader.path().display());
    }

    /// Invalidate and reload in one step
    pub async fn refresh(&self) -> Arc<Catalog> {
        self.invalidate().await;
        self.snapshot().await
    }
}

/// Read the catalog on the blocking pool
async fn load_blocking(loader: CatalogLoader) -> Arc<Catalog> {
    let source = loader.source_name();
    match tokio::task::spawn_blocking(move || loader.load_catalog()).await {
        Ok(catalog) => Arc::new(catalog),
        Err(e) => {
            tracing::error!("Catalog load task failed for {}: {}", source, e);
            Arc::new(Catalog::empty(source))
        }
    }
}
