use crate::domain::driver::DriverType;
use crate::error::{HaulbookError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a trip's settlement was ultimately paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutMethod {
    Cash,
    Check,
    Ach,
    Wire,
    Other,
}

/// Why a trip's payment is held back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldReason {
    AwaitingBrokerPayment,
    MissingDocuments,
    DamageClaim,
    Other(String),
}

/// Payment status of a trip. Exactly one variant holds at a time;
/// switching status clears the other variant's fields by construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PaymentStatus {
    #[default]
    Unset,
    PaidInFull {
        method: PayoutMethod,
        date: NaiveDate,
    },
    OnHold {
        reason: HoldReason,
    },
}

/// Denormalized settlement totals cached on a trip.
///
/// These are a cache of a pure function, not independently authored facts:
/// any mutation of the trip's loads or expenses must be followed by a
/// recomputation and rewrite of this struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripTotals {
    pub total_loads: usize,
    pub total_invoice: Decimal,
    pub total_broker_fees: Decimal,
    pub expenses_total: Decimal,
    pub driver_earnings: Decimal,
    pub company_earnings: Decimal,
}

/// A settlement unit: one driver, one date, a set of loads and expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub driver_id: Uuid,
    /// Rule set frozen at calculation time; later changes to the driver
    /// record do not retroactively recompute this trip.
    pub driver_type: DriverType,
    pub name: String,
    pub date: NaiveDate,
    pub totals: TripTotals,
    pub payment_status: PaymentStatus,
}

impl Trip {
    pub fn new(
        driver_id: Uuid,
        driver_type: DriverType,
        name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_id,
            driver_type,
            name: name.into(),
            date,
            totals: TripTotals::default(),
            payment_status: PaymentStatus::Unset,
        }
    }

    /// Marks the trip paid in full. Requires both method and date; clears
    /// any hold reason.
    pub fn mark_paid_in_full(&mut self, method: PayoutMethod, date: NaiveDate) -> Result<()> {
        self.payment_status = PaymentStatus::PaidInFull { method, date };
        Ok(())
    }

    /// Places the trip's payment on hold. The reason must be substantive:
    /// a free-text "other" with an empty label is rejected before any
    /// mutation.
    pub fn place_on_hold(&mut self, reason: HoldReason) -> Result<()> {
        if let HoldReason::Other(text) = &reason
            && text.trim().is_empty()
        {
            return Err(HaulbookError::ValidationError(
                "hold reason must not be empty".to_string(),
            ));
        }
        self.payment_status = PaymentStatus::OnHold { reason };
        Ok(())
    }

    /// Returns the trip to the unset payment state.
    pub fn clear_payment_status(&mut self) {
        self.payment_status = PaymentStatus::Unset;
    }
}
