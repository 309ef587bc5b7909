pub mod driver;
pub mod expense;
pub mod load;
pub mod money;
pub mod payment;
pub mod ports;
pub mod settlement;
pub mod trip;
