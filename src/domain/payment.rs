use serde::{Deserialize, Serialize};

/// The three channels a load's payment is collected through.
///
/// Every raw payment-method string in the system is normalized to one of
/// these before any settlement math runs, so the engine only ever branches
/// on three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentChannel {
    Cash,
    Check,
    Billing,
}

impl PaymentChannel {
    /// Normalizes a raw, case-insensitive, possibly-missing payment-method
    /// string.
    ///
    /// `cod`/`cash` map to [`PaymentChannel::Cash`], `check`/`ach` to
    /// [`PaymentChannel::Check`]; everything else, including empty or
    /// missing input, falls back to [`PaymentChannel::Billing`]. Total over
    /// all inputs, never fails. An unrecognized non-empty string is logged
    /// since it usually means a data-entry typo; `billing` itself is a
    /// recognized spelling, not a typo.
    pub fn normalize(raw: Option<&str>) -> Self {
        let lowered = raw.unwrap_or("").trim().to_lowercase();
        match lowered.as_str() {
            "cod" | "cash" => Self::Cash,
            "check" | "ach" => Self::Check,
            "" | "billing" => Self::Billing,
            other => {
                tracing::warn!(method = other, "unrecognized payment method, using billing");
                Self::Billing
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::Billing => "billing",
        }
    }
}
