use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payout rule set a driver settles under.
///
/// This is a closed enum on purpose: the bulk engine's pay percentage and
/// deduction timing differ between the two variants, and a `match` keeps
/// both rule sets exhaustively checked. Trips freeze the variant in effect
/// at calculation time, so changing a driver's type never retroactively
/// recomputes past trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverType {
    CompanyDriver,
    OwnerOperator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub driver_type: DriverType,
    pub status: DriverStatus,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Driver {
    pub fn new(name: impl Into<String>, driver_type: DriverType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            driver_type,
            status: DriverStatus::Active,
            phone: None,
            email: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_driver_is_active() {
        let driver = Driver::new("J. Alvarez", DriverType::OwnerOperator);
        assert_eq!(driver.status, DriverStatus::Active);
        assert_eq!(driver.driver_type, DriverType::OwnerOperator);
    }
}
