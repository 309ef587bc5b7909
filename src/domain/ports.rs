use crate::domain::driver::Driver;
use crate::domain::expense::Expense;
use crate::domain::load::Load;
use crate::domain::trip::Trip;
use crate::error::Result;
use async_trait::async_trait;
use uuid::Uuid;

pub type DriverStoreBox = Box<dyn DriverStore>;
pub type TripStoreBox = Box<dyn TripStore>;
pub type LoadStoreBox = Box<dyn LoadStore>;
pub type ExpenseStoreBox = Box<dyn ExpenseStore>;

#[async_trait]
pub trait DriverStore: Send + Sync {
    async fn store(&self, driver: Driver) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Driver>>;
    async fn get_all(&self) -> Result<Vec<Driver>>;
}

#[async_trait]
pub trait TripStore: Send + Sync {
    async fn store(&self, trip: Trip) -> Result<()>;
    async fn get(&self, id: Uuid) -> Result<Option<Trip>>;
    async fn get_all(&self) -> Result<Vec<Trip>>;
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait LoadStore: Send + Sync {
    async fn store(&self, load: Load) -> Result<()>;
    async fn for_trip(&self, trip_id: Uuid) -> Result<Vec<Load>>;
    async fn delete_for_trip(&self, trip_id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn replace_for_trip(&self, trip_id: Uuid, expenses: Vec<Expense>) -> Result<()>;
    async fn for_trip(&self, trip_id: Uuid) -> Result<Vec<Expense>>;
    async fn delete_for_trip(&self, trip_id: Uuid) -> Result<()>;
}
