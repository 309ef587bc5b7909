use crate::domain::payment::PaymentChannel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single shipped vehicle/order within a trip.
///
/// Numeric coercion happens once at the ingestion boundary, so `price` and
/// `broker_fee` are always valid decimals here. Loads are immutable after
/// creation except for trip reassignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub id: Uuid,
    /// `None` while the order sits unassigned, before trip assembly.
    pub trip_id: Option<Uuid>,
    /// External load identifier from the broker/customer side.
    pub reference: String,
    pub customer: String,
    pub vehicle: String,
    pub price: Decimal,
    pub broker_fee: Decimal,
    pub payment: PaymentChannel,
    pub notes: Option<String>,
}

impl Load {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        reference: impl Into<String>,
        customer: impl Into<String>,
        vehicle: impl Into<String>,
        price: Decimal,
        broker_fee: Decimal,
        payment: PaymentChannel,
        notes: Option<String>,
    ) -> Self {
        let load = Self {
            id: Uuid::new_v4(),
            trip_id: None,
            reference: reference.into(),
            customer: customer.into(),
            vehicle: vehicle.into(),
            price,
            broker_fee,
            payment,
            notes,
        };
        if load.gross() < Decimal::ZERO {
            // Data-quality warning only; negative gross flows through the
            // engine arithmetically and is never clamped.
            tracing::warn!(
                reference = %load.reference,
                price = %load.price,
                broker_fee = %load.broker_fee,
                "broker fee exceeds price, negative gross"
            );
        }
        load
    }

    /// Invoice amount net of the broker's cut, before any split.
    pub fn gross(&self) -> Decimal {
        self.price - self.broker_fee
    }
}
