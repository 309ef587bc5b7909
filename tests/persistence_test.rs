#![cfg(feature = "storage-rocksdb")]

use chrono::NaiveDate;
use haulbook::application::trips::TripService;
use haulbook::domain::driver::{Driver, DriverType};
use haulbook::domain::expense::ExpenseTotals;
use haulbook::domain::load::Load;
use haulbook::domain::payment::PaymentChannel;
use haulbook::infrastructure::rocksdb::RocksDbBackOffice;
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn service_at(path: &std::path::Path) -> TripService {
    let store = RocksDbBackOffice::open(path).unwrap();
    TripService::new(
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store.clone()),
        Box::new(store),
    )
}

#[tokio::test]
async fn test_trip_survives_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("backoffice_db");

    let trip_id = {
        let service = service_at(&db_path);
        let driver = Driver::new("M. Petrov", DriverType::OwnerOperator);
        service.add_driver(driver.clone()).await.unwrap();

        let load = Load::new(
            "LD-1",
            "Acme Auto",
            "2020 Toyota Camry",
            dec!(1000),
            dec!(100),
            PaymentChannel::Cash,
            None,
        );
        let trip = service
            .create_trip(
                &driver,
                "Chicago run",
                NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                vec![load],
                ExpenseTotals::default(),
            )
            .await
            .unwrap();
        trip.id
    };

    // fresh handle over the same database
    let service = service_at(&db_path);
    let trip = service.get_trip(trip_id).await.unwrap().unwrap();
    assert_eq!(trip.totals.driver_earnings, dec!(729));

    // recomputation from persisted loads/expenses matches the cache
    let summary = service.trip_summary(trip_id).await.unwrap();
    assert_eq!(summary.driver_pay, trip.totals.driver_earnings);
    assert_eq!(summary.dispatch_fee, dec!(90));
}
