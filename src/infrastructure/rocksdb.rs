use crate::domain::driver::Driver;
use crate::domain::expense::Expense;
use crate::domain::load::Load;
use crate::domain::ports::{DriverStore, ExpenseStore, LoadStore, TripStore};
use crate::domain::trip::Trip;
use crate::error::{HaulbookError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

pub const CF_DRIVERS: &str = "drivers";
pub const CF_TRIPS: &str = "trips";
pub const CF_LOADS: &str = "loads";
pub const CF_EXPENSES: &str = "expenses";

/// Persistent back-office store on RocksDB.
///
/// One column family per entity, serde_json values keyed by UUID bytes.
/// Load/expense lookups by trip scan their column family; back-office data
/// volumes stay small enough that no secondary index is kept.
///
/// `Clone` shares the underlying `Arc<DB>`.
#[derive(Clone)]
pub struct RocksDbBackOffice {
    db: Arc<DB>,
}

impl RocksDbBackOffice {
    /// Opens or creates the database at `path`, ensuring all four column
    /// families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = [CF_DRIVERS, CF_TRIPS, CF_LOADS, CF_EXPENSES]
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs)?;
        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            HaulbookError::InternalError(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }

    fn put_json<T: Serialize>(&self, cf_name: &str, key: Uuid, value: &T) -> Result<()> {
        let cf = self.cf(cf_name)?;
        let bytes = serde_json::to_vec(value)
            .map_err(|e| HaulbookError::InternalError(Box::new(e)))?;
        self.db.put_cf(&cf, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, cf_name: &str, key: Uuid) -> Result<Option<T>> {
        let cf = self.cf(cf_name)?;
        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| HaulbookError::InternalError(Box::new(e)))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn scan_json<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = self.cf(cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(&cf, rocksdb::IteratorMode::Start) {
            let (_key, bytes) = item?;
            let value = serde_json::from_slice(&bytes)
                .map_err(|e| HaulbookError::InternalError(Box::new(e)))?;
            values.push(value);
        }
        Ok(values)
    }

    fn delete_key(&self, cf_name: &str, key: Uuid) -> Result<()> {
        let cf = self.cf(cf_name)?;
        self.db.delete_cf(&cf, key.as_bytes())?;
        Ok(())
    }
}

#[async_trait]
impl DriverStore for RocksDbBackOffice {
    async fn store(&self, driver: Driver) -> Result<()> {
        self.put_json(CF_DRIVERS, driver.id, &driver)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Driver>> {
        self.get_json(CF_DRIVERS, id)
    }

    async fn get_all(&self) -> Result<Vec<Driver>> {
        self.scan_json(CF_DRIVERS)
    }
}

#[async_trait]
impl TripStore for RocksDbBackOffice {
    async fn store(&self, trip: Trip) -> Result<()> {
        self.put_json(CF_TRIPS, trip.id, &trip)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Trip>> {
        self.get_json(CF_TRIPS, id)
    }

    async fn get_all(&self) -> Result<Vec<Trip>> {
        self.scan_json(CF_TRIPS)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.delete_key(CF_TRIPS, id)
    }
}

#[async_trait]
impl LoadStore for RocksDbBackOffice {
    async fn store(&self, load: Load) -> Result<()> {
        self.put_json(CF_LOADS, load.id, &load)
    }

    async fn for_trip(&self, trip_id: Uuid) -> Result<Vec<Load>> {
        let loads: Vec<Load> = self.scan_json(CF_LOADS)?;
        Ok(loads
            .into_iter()
            .filter(|load| load.trip_id == Some(trip_id))
            .collect())
    }

    async fn delete_for_trip(&self, trip_id: Uuid) -> Result<()> {
        let loads: Vec<Load> = self.scan_json(CF_LOADS)?;
        for load in loads.iter().filter(|l| l.trip_id == Some(trip_id)) {
            self.delete_key(CF_LOADS, load.id)?;
        }
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for RocksDbBackOffice {
    async fn replace_for_trip(&self, trip_id: Uuid, expenses: Vec<Expense>) -> Result<()> {
        ExpenseStore::delete_for_trip(self, trip_id).await?;
        for expense in expenses {
            self.put_json(CF_EXPENSES, expense.id, &expense)?;
        }
        Ok(())
    }

    async fn for_trip(&self, trip_id: Uuid) -> Result<Vec<Expense>> {
        let rows: Vec<Expense> = self.scan_json(CF_EXPENSES)?;
        Ok(rows.into_iter().filter(|row| row.trip_id == trip_id).collect())
    }

    async fn delete_for_trip(&self, trip_id: Uuid) -> Result<()> {
        let rows: Vec<Expense> = self.scan_json(CF_EXPENSES)?;
        for row in rows.iter().filter(|r| r.trip_id == trip_id) {
            self.delete_key(CF_EXPENSES, row.id)?;
        }
        Ok(())
    }
}
