use crate::domain::driver::{Driver, DriverType};
use crate::domain::expense::{Expense, ExpenseCategory, ExpenseTotals};
use crate::domain::load::Load;
use crate::domain::ports::{DriverStoreBox, ExpenseStoreBox, LoadStoreBox, TripStoreBox};
use crate::domain::settlement::{self, LocalTripTotals, TripSummary};
use crate::domain::trip::{HoldReason, PayoutMethod, Trip, TripTotals};
use crate::error::{HaulbookError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Orchestrates trip mutations around the settlement engine.
///
/// The engine itself is pure; this service owns the storage ports and
/// enforces the one discipline the cached trip totals depend on: every
/// mutation of a trip's loads or expenses is followed by a full recompute
/// from source records and a rewrite of the cached totals.
///
/// Store ports only guarantee consistency per call, so each mutating
/// method holds `mutation` across its whole fetch-recompute-write
/// sequence. Without it a concurrent attach could land between an edit's
/// read and its totals write, leaving stale cached earnings.
pub struct TripService {
    drivers: DriverStoreBox,
    trips: TripStoreBox,
    loads: LoadStoreBox,
    expenses: ExpenseStoreBox,
    mutation: Mutex<()>,
}

/// Company net for a settled trip, per driver type.
///
/// For owner operators the company keeps only the dispatch fee. For company
/// drivers the company nets whatever remains of gross after the driver, the
/// dispatch fee and all recorded costs are paid.
pub fn company_earnings(summary: &TripSummary, driver_type: DriverType) -> Decimal {
    match driver_type {
        DriverType::OwnerOperator => summary.dispatch_fee,
        DriverType::CompanyDriver => {
            summary.total_gross_before
                - summary.driver_pay
                - summary.dispatch_fee
                - summary.other_expenses
        }
    }
}

impl TripService {
    pub fn new(
        drivers: DriverStoreBox,
        trips: TripStoreBox,
        loads: LoadStoreBox,
        expenses: ExpenseStoreBox,
    ) -> Self {
        Self {
            drivers,
            trips,
            loads,
            expenses,
            mutation: Mutex::new(()),
        }
    }

    pub async fn add_driver(&self, driver: Driver) -> Result<()> {
        self.drivers.store(driver).await
    }

    pub async fn get_driver(&self, id: Uuid) -> Result<Option<Driver>> {
        self.drivers.get(id).await
    }

    pub async fn list_drivers(&self) -> Result<Vec<Driver>> {
        self.drivers.get_all().await
    }

    pub async fn get_trip(&self, id: Uuid) -> Result<Option<Trip>> {
        self.trips.get(id).await
    }

    pub async fn list_trips(&self) -> Result<Vec<Trip>> {
        self.trips.get_all().await
    }

    /// Creates a trip from a set of loads and manually entered expenses.
    ///
    /// The driver's current type is frozen onto the trip, the summary is
    /// computed, and trip, loads and expense rows (including the computed
    /// dispatch-fee row) are persisted together.
    pub async fn create_trip(
        &self,
        driver: &Driver,
        name: impl Into<String>,
        date: NaiveDate,
        loads: Vec<Load>,
        manual: ExpenseTotals,
    ) -> Result<Trip> {
        let _guard = self.mutation.lock().await;
        let mut trip = Trip::new(driver.id, driver.driver_type, name, date);

        let summary = settlement::calculate_trip_summary(&loads, trip.driver_type, &manual);
        trip.totals = Self::totals_from(&summary, trip.driver_type);

        self.trips.store(trip.clone()).await?;
        for mut load in loads {
            load.trip_id = Some(trip.id);
            self.loads.store(load).await?;
        }
        self.expenses
            .replace_for_trip(trip.id, Self::expense_rows(trip.id, &manual, &summary))
            .await?;

        tracing::info!(trip_id = %trip.id, loads = trip.totals.total_loads, "trip created");
        Ok(trip)
    }

    /// Edits trip name/date and replaces its expenses wholesale, then
    /// recomputes the cached totals from the current loads.
    pub async fn edit_trip(
        &self,
        trip_id: Uuid,
        name: Option<String>,
        date: Option<NaiveDate>,
        manual: ExpenseTotals,
    ) -> Result<Trip> {
        let _guard = self.mutation.lock().await;
        let mut trip = self.require_trip(trip_id).await?;
        if let Some(name) = name {
            trip.name = name;
        }
        if let Some(date) = date {
            trip.date = date;
        }

        let loads = self.loads.for_trip(trip_id).await?;
        let summary = settlement::calculate_trip_summary(&loads, trip.driver_type, &manual);
        trip.totals = Self::totals_from(&summary, trip.driver_type);

        self.expenses
            .replace_for_trip(trip_id, Self::expense_rows(trip_id, &manual, &summary))
            .await?;
        self.trips.store(trip.clone()).await?;
        Ok(trip)
    }

    /// Merges a new order into an existing trip.
    ///
    /// Totals are re-derived from every source load, never patched
    /// incrementally from the previous cache.
    pub async fn attach_order(&self, trip_id: Uuid, mut load: Load) -> Result<Trip> {
        let _guard = self.mutation.lock().await;
        let mut trip = self.require_trip(trip_id).await?;
        load.trip_id = Some(trip_id);
        self.loads.store(load).await?;

        let loads = self.loads.for_trip(trip_id).await?;
        let manual = Self::manual_totals(&self.expenses.for_trip(trip_id).await?)?;
        let summary = settlement::calculate_trip_summary(&loads, trip.driver_type, &manual);
        trip.totals = Self::totals_from(&summary, trip.driver_type);

        self.expenses
            .replace_for_trip(trip_id, Self::expense_rows(trip_id, &manual, &summary))
            .await?;
        self.trips.store(trip.clone()).await?;
        Ok(trip)
    }

    /// Recomputes and returns the full audited breakdown for a trip.
    pub async fn trip_summary(&self, trip_id: Uuid) -> Result<TripSummary> {
        let trip = self.require_trip(trip_id).await?;
        let loads = self.loads.for_trip(trip_id).await?;
        let manual = Self::manual_totals(&self.expenses.for_trip(trip_id).await?)?;
        Ok(settlement::calculate_trip_summary(&loads, trip.driver_type, &manual))
    }

    /// Channel-aggregated totals for a local-driver trip, re-derived from
    /// source loads.
    pub async fn local_trip_totals(&self, trip_id: Uuid) -> Result<LocalTripTotals> {
        self.require_trip(trip_id).await?;
        let loads = self.loads.for_trip(trip_id).await?;
        Ok(settlement::settle_local_trip(&loads))
    }

    /// Deletes a trip, cascading to its loads and expenses.
    pub async fn delete_trip(&self, trip_id: Uuid) -> Result<()> {
        let _guard = self.mutation.lock().await;
        self.loads.delete_for_trip(trip_id).await?;
        self.expenses.delete_for_trip(trip_id).await?;
        self.trips.delete(trip_id).await?;
        tracing::info!(%trip_id, "trip deleted");
        Ok(())
    }

    pub async fn mark_paid_in_full(
        &self,
        trip_id: Uuid,
        method: PayoutMethod,
        date: NaiveDate,
    ) -> Result<Trip> {
        let _guard = self.mutation.lock().await;
        let mut trip = self.require_trip(trip_id).await?;
        trip.mark_paid_in_full(method, date)?;
        self.trips.store(trip.clone()).await?;
        Ok(trip)
    }

    pub async fn place_on_hold(&self, trip_id: Uuid, reason: HoldReason) -> Result<Trip> {
        let _guard = self.mutation.lock().await;
        let mut trip = self.require_trip(trip_id).await?;
        trip.place_on_hold(reason)?;
        self.trips.store(trip.clone()).await?;
        Ok(trip)
    }

    pub async fn clear_payment_status(&self, trip_id: Uuid) -> Result<Trip> {
        let _guard = self.mutation.lock().await;
        let mut trip = self.require_trip(trip_id).await?;
        trip.clear_payment_status();
        self.trips.store(trip.clone()).await?;
        Ok(trip)
    }

    async fn require_trip(&self, trip_id: Uuid) -> Result<Trip> {
        self.trips
            .get(trip_id)
            .await?
            .ok_or_else(|| HaulbookError::NotFound(format!("trip {trip_id}")))
    }

    fn totals_from(summary: &TripSummary, driver_type: DriverType) -> TripTotals {
        TripTotals {
            total_loads: summary.total_loads,
            total_invoice: summary.total_price,
            total_broker_fees: summary.total_broker_fee,
            expenses_total: summary.total_expenses,
            driver_earnings: summary.driver_pay,
            company_earnings: company_earnings(summary, driver_type),
        }
    }

    /// Rebuilds manual expense totals from persisted rows, skipping the
    /// system-computed dispatch-fee row.
    fn manual_totals(rows: &[Expense]) -> Result<ExpenseTotals> {
        let mut totals = ExpenseTotals::default();
        for row in rows {
            if row.category == ExpenseCategory::DispatchFee {
                continue;
            }
            totals.add(row.category, row.amount)?;
        }
        Ok(totals)
    }

    /// Manual expense rows plus the freshly computed dispatch-fee row.
    fn expense_rows(trip_id: Uuid, manual: &ExpenseTotals, summary: &TripSummary) -> Vec<Expense> {
        let mut rows = manual.to_expenses(trip_id);
        if summary.dispatch_fee != Decimal::ZERO {
            rows.push(Expense::new(
                trip_id,
                ExpenseCategory::DispatchFee,
                summary.dispatch_fee,
            ));
        }
        rows
    }
}
