//! # Key-Value Collection Store
//!
//! redb-backed adapter over a single table mapping collection keys to
//! JSON-array bytes.
//!
//! ## Persistence Layout
//!
//! | Key              | Value                                   |
//! |------------------|-----------------------------------------|
//! | `app_proformas`  | JSON array of proforma documents        |
//! | `app_invoices`   | JSON array of invoice documents         |
//! | `app_clients`    | JSON array of client counterparties     |
//! | `app_suppliers`  | JSON array of supplier counterparties   |
//! | `purchases`      | JSON array of purchase documents        |
//! | `purchaseOrders` | JSON array of purchase-order documents  |
//! | `inventory`      | JSON array of catalog items             |
//!
//! Every `commit` rewrites the whole array for its key: no partial or
//! delta writes, last writer wins. There is exactly one writer in the
//! process, so each read-modify-write in the Record API is a single
//! uninterleaved critical section.
//!
//! ## Durability
//! redb commits are durable once `commit()` returns and the file is
//! always left in a consistent state, so an unplugged till does not
//! corrupt the collections.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::StoreResult;

/// Single table: collection key → JSON array bytes.
const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Well-known collection keys.
pub mod keys {
    pub const PROFORMAS: &str = "app_proformas";
    pub const INVOICES: &str = "app_invoices";
    pub const CLIENTS: &str = "app_clients";
    pub const SUPPLIERS: &str = "app_suppliers";
    pub const PURCHASES: &str = "purchases";
    pub const PURCHASE_ORDERS: &str = "purchaseOrders";
    pub const INVENTORY: &str = "inventory";
}

/// The process-wide collection store.
///
/// Cloning is cheap; all clones share the same database handle.
#[derive(Clone)]
pub struct CollectionStore {
    db: Arc<Database>,
}

impl CollectionStore {
    /// Opens or creates the database file at the given path.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Opens an in-memory database (tests, demos).
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Reads a whole collection. A key that was never written reads as an
    /// empty list.
    pub fn get<T: DeserializeOwned>(&self, collection: &str) -> StoreResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(COLLECTIONS_TABLE)?;

        match table.get(collection)? {
            Some(value) => {
                let records: Vec<T> = serde_json::from_slice(value.value())?;
                Ok(records)
            }
            None => Ok(Vec::new()),
        }
    }

    /// Replaces a whole collection. Wholesale write: the previous array
    /// for this key is gone once the commit returns.
    pub fn commit<T: Serialize>(&self, collection: &str, records: &[T]) -> StoreResult<()> {
        let value = serde_json::to_vec(records)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(collection, value.as_slice())?;
        }
        write_txn.commit()?;

        debug!(collection, records = records.len(), "Collection committed");
        Ok(())
    }
}
