use crate::error::{HaulbookError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operating-cost categories charged against a trip.
///
/// `DispatchFee` is system-computed (10% of trip gross) and recorded by the
/// service layer; it is never accepted from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Parking,
    EldLogbook,
    Insurance,
    Fuel,
    Ifta,
    LocalTowing,
    Prepass,
    Shipcar,
    SuperDispatch,
    DispatchFee,
    Other,
    PaidInAdvance,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Parking => "parking",
            Self::EldLogbook => "eld_logbook",
            Self::Insurance => "insurance",
            Self::Fuel => "fuel",
            Self::Ifta => "ifta",
            Self::LocalTowing => "local_towing",
            Self::Prepass => "prepass",
            Self::Shipcar => "shipcar",
            Self::SuperDispatch => "super_dispatch",
            Self::DispatchFee => "dispatch_fee",
            Self::Other => "other",
            Self::PaidInAdvance => "paid_in_advance",
        }
    }

    /// Lenient parse for ingestion; unknown categories land in `Other`,
    /// mirroring the payment-method fallback.
    pub fn from_string(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "parking" => Self::Parking,
            "eld_logbook" | "eld" | "logbook" => Self::EldLogbook,
            "insurance" => Self::Insurance,
            "fuel" => Self::Fuel,
            "ifta" => Self::Ifta,
            "local_towing" | "towing" => Self::LocalTowing,
            "prepass" => Self::Prepass,
            "shipcar" => Self::Shipcar,
            "super_dispatch" => Self::SuperDispatch,
            "dispatch_fee" => Self::DispatchFee,
            "paid_in_advance" | "advance" => Self::PaidInAdvance,
            _ => Self::Other,
        }
    }
}

/// A persisted expense row belonging to a trip. Expenses are replaced
/// wholesale on edit (delete-all, re-insert), never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub notes: Option<String>,
}

impl Expense {
    pub fn new(trip_id: Uuid, category: ExpenseCategory, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            trip_id,
            category,
            amount,
            notes: None,
        }
    }
}

/// Manually entered expense amounts for a trip, one slot per category.
/// Absent categories default to zero. The dispatch fee has no slot here
/// because it is computed, not entered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseTotals {
    pub parking: Decimal,
    pub eld_logbook: Decimal,
    pub insurance: Decimal,
    pub fuel: Decimal,
    pub ifta: Decimal,
    pub local_towing: Decimal,
    pub prepass: Decimal,
    pub shipcar: Decimal,
    pub super_dispatch: Decimal,
    pub other: Decimal,
    pub paid_in_advance: Decimal,
}

impl ExpenseTotals {
    /// Sum of all manually entered categories.
    pub fn total(&self) -> Decimal {
        self.parking
            + self.eld_logbook
            + self.insurance
            + self.fuel
            + self.ifta
            + self.local_towing
            + self.prepass
            + self.shipcar
            + self.super_dispatch
            + self.other
            + self.paid_in_advance
    }

    /// Folds a manual expense amount into its category slot.
    ///
    /// Rejects `DispatchFee`, the one category users may not enter.
    pub fn add(&mut self, category: ExpenseCategory, amount: Decimal) -> Result<()> {
        let slot = match category {
            ExpenseCategory::Parking => &mut self.parking,
            ExpenseCategory::EldLogbook => &mut self.eld_logbook,
            ExpenseCategory::Insurance => &mut self.insurance,
            ExpenseCategory::Fuel => &mut self.fuel,
            ExpenseCategory::Ifta => &mut self.ifta,
            ExpenseCategory::LocalTowing => &mut self.local_towing,
            ExpenseCategory::Prepass => &mut self.prepass,
            ExpenseCategory::Shipcar => &mut self.shipcar,
            ExpenseCategory::SuperDispatch => &mut self.super_dispatch,
            ExpenseCategory::Other => &mut self.other,
            ExpenseCategory::PaidInAdvance => &mut self.paid_in_advance,
            ExpenseCategory::DispatchFee => {
                return Err(HaulbookError::ValidationError(
                    "dispatch_fee is system-computed and cannot be entered".to_string(),
                ));
            }
        };
        *slot += amount;
        Ok(())
    }

    /// Expands the totals back into persistable rows, skipping zero slots.
    pub fn to_expenses(&self, trip_id: Uuid) -> Vec<Expense> {
        let slots = [
            (ExpenseCategory::Parking, self.parking),
            (ExpenseCategory::EldLogbook, self.eld_logbook),
            (ExpenseCategory::Insurance, self.insurance),
            (ExpenseCategory::Fuel, self.fuel),
            (ExpenseCategory::Ifta, self.ifta),
            (ExpenseCategory::LocalTowing, self.local_towing),
            (ExpenseCategory::Prepass, self.prepass),
            (ExpenseCategory::Shipcar, self.shipcar),
            (ExpenseCategory::SuperDispatch, self.super_dispatch),
            (ExpenseCategory::Other, self.other),
            (ExpenseCategory::PaidInAdvance, self.paid_in_advance),
        ];
        slots
            .into_iter()
            .filter(|(_, amount)| *amount != Decimal::ZERO)
            .map(|(category, amount)| Expense::new(trip_id, category, amount))
            .collect()
    }
}
