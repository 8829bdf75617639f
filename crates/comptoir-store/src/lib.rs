//! # Comptoir Store - Persistence Layer
//!
//! Everything that touches disk lives here. The layout is a single
//! embedded key-value database where each named collection is one key
//! holding a JSON array, read and written wholesale.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ Store                                       │
//! │   typed collection accessors                │
//! │   proformas() invoices() clients() ...      │
//! ├─────────────────────────────────────────────┤
//! │ Records<T>          (records.rs)            │
//! │   get_all / get_by_id / create / update /   │
//! │   save / delete                             │
//! ├─────────────────────────────────────────────┤
//! │ CollectionStore     (kv.rs)                 │
//! │   collection key → JSON array bytes (redb)  │
//! └─────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod kv;
pub mod records;

pub use error::{StoreError, StoreResult};
pub use kv::{keys, CollectionStore};
pub use records::{ApiResponse, Record, Records};

use std::path::PathBuf;

use comptoir_core::{CatalogItem, Counterparty, FinancialDocument};
use tracing::info;

/// Where the collection store keeps its data.
#[derive(Debug, Clone)]
pub enum Backend {
    /// Durable single-file database.
    File(PathBuf),
    /// Volatile store for tests and demos.
    InMemory,
}

/// Store configuration, injected by the application shell.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: Backend,
}

impl StoreConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            backend: Backend::File(path.into()),
        }
    }

    pub fn in_memory() -> Self {
        StoreConfig {
            backend: Backend::InMemory,
        }
    }
}

/// Bundle of typed collection façades over one database.
///
/// Cheap to clone; all clones share the database handle.
#[derive(Clone)]
pub struct Store {
    kv: CollectionStore,
}

impl Store {
    /// Opens the store per configuration.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let kv = match &config.backend {
            Backend::File(path) => {
                info!(path = %path.display(), "Opening collection store");
                CollectionStore::open(path)?
            }
            Backend::InMemory => CollectionStore::open_in_memory()?,
        };
        Ok(Store { kv })
    }

    /// Raw collection store, for callers outside the typed façades.
    pub fn kv(&self) -> &CollectionStore {
        &self.kv
    }

    pub fn proformas(&self) -> Records<FinancialDocument> {
        Records::new(self.kv.clone(), keys::PROFORMAS, "Proforma")
    }

    pub fn invoices(&self) -> Records<FinancialDocument> {
        Records::new(self.kv.clone(), keys::INVOICES, "Facture")
    }

    pub fn purchases(&self) -> Records<FinancialDocument> {
        Records::new(self.kv.clone(), keys::PURCHASES, "Achat")
    }

    pub fn purchase_orders(&self) -> Records<FinancialDocument> {
        Records::new(self.kv.clone(), keys::PURCHASE_ORDERS, "Bon de commande")
    }

    pub fn clients(&self) -> Records<Counterparty> {
        Records::new(self.kv.clone(), keys::CLIENTS, "Client")
    }

    pub fn suppliers(&self) -> Records<Counterparty> {
        Records::new(self.kv.clone(), keys::SUPPLIERS, "Fournisseur")
    }

    pub fn inventory(&self) -> Records<CatalogItem> {
        Records::new(self.kv.clone(), keys::INVENTORY, "Article")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use comptoir_core::{DocumentKind, LineItem, Money};

    #[tokio::test]
    async fn test_collections_do_not_bleed_into_each_other() {
        let store = Store::open(&StoreConfig::in_memory()).unwrap();

        let mut doc =
            FinancialDocument::new(DocumentKind::Proforma, "PRO-2024-1001", Utc::now());
        doc.add_line(LineItem::new("Sac de riz", Money::from_units(25_000)))
            .unwrap();
        store.proformas().create(doc).await.unwrap();

        assert_eq!(store.proformas().get_all().await.unwrap().len(), 1);
        assert!(store.invoices().get_all().await.unwrap().is_empty());
        assert!(store.purchases().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_persisted_document_round_trips_with_derived_fields() {
        let store = Store::open(&StoreConfig::in_memory()).unwrap();

        let mut doc =
            FinancialDocument::new(DocumentKind::Invoice, "FAC-123456", Utc::now());
        let mut line = LineItem::new("Huile", Money::from_units(5_000));
        line.set_quantity(2);
        doc.add_line(line).unwrap();

        let created = store.invoices().create(doc).await.unwrap();
        let back = store.invoices().get_by_id(&created.id).await.unwrap();
        assert_eq!(back.total_amount, Money::from_units(10_000));
        assert_eq!(back.balance, Money::from_units(10_000));
    }
}
