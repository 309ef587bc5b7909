use crate::domain::driver::Driver;
use crate::domain::expense::Expense;
use crate::domain::load::Load;
use crate::domain::ports::{DriverStore, ExpenseStore, LoadStore, TripStore};
use crate::domain::trip::Trip;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    drivers: HashMap<Uuid, Driver>,
    trips: HashMap<Uuid, Trip>,
    loads: HashMap<Uuid, Load>,
    expenses: HashMap<Uuid, Expense>,
}

/// In-memory back-office store.
///
/// All four entity maps live behind one `RwLock`, so each port call sees a
/// consistent snapshot. The lock is released between calls; atomicity for a
/// multi-call fetch-recompute-write sequence is [`TripService`]'s job, via
/// its mutation lock. `Clone` shares the underlying tables.
///
/// [`TripService`]: crate::application::trips::TripService
#[derive(Default, Clone)]
pub struct InMemoryBackOffice {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryBackOffice {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DriverStore for InMemoryBackOffice {
    async fn store(&self, driver: Driver) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.drivers.insert(driver.id, driver);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Driver>> {
        let tables = self.tables.read().await;
        Ok(tables.drivers.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Driver>> {
        let tables = self.tables.read().await;
        Ok(tables.drivers.values().cloned().collect())
    }
}

#[async_trait]
impl TripStore for InMemoryBackOffice {
    async fn store(&self, trip: Trip) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.trips.insert(trip.id, trip);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<Trip>> {
        let tables = self.tables.read().await;
        Ok(tables.trips.get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Trip>> {
        let tables = self.tables.read().await;
        Ok(tables.trips.values().cloned().collect())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.trips.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl LoadStore for InMemoryBackOffice {
    async fn store(&self, load: Load) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.loads.insert(load.id, load);
        Ok(())
    }

    async fn for_trip(&self, trip_id: Uuid) -> Result<Vec<Load>> {
        let tables = self.tables.read().await;
        Ok(tables
            .loads
            .values()
            .filter(|load| load.trip_id == Some(trip_id))
            .cloned()
            .collect())
    }

    async fn delete_for_trip(&self, trip_id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.loads.retain(|_, load| load.trip_id != Some(trip_id));
        Ok(())
    }
}

#[async_trait]
impl ExpenseStore for InMemoryBackOffice {
    async fn replace_for_trip(&self, trip_id: Uuid, expenses: Vec<Expense>) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.expenses.retain(|_, row| row.trip_id != trip_id);
        for expense in expenses {
            tables.expenses.insert(expense.id, expense);
        }
        Ok(())
    }

    async fn for_trip(&self, trip_id: Uuid) -> Result<Vec<Expense>> {
        let tables = self.tables.read().await;
        Ok(tables
            .expenses
            .values()
            .filter(|row| row.trip_id == trip_id)
            .cloned()
            .collect())
    }

    async fn delete_for_trip(&self, trip_id: Uuid) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.expenses.retain(|_, row| row.trip_id != trip_id);
        Ok(())
    }
}
