use chrono::NaiveDate;
use haulbook::application::trips::TripService;
use haulbook::domain::driver::{Driver, DriverType};
use haulbook::domain::expense::{ExpenseCategory, ExpenseTotals};
use haulbook::domain::load::Load;
use haulbook::domain::payment::PaymentChannel;
use haulbook::domain::ports::{DriverStoreBox, ExpenseStoreBox, LoadStoreBox, TripStoreBox};
use haulbook::domain::trip::{HoldReason, PaymentStatus, PayoutMethod};
use haulbook::infrastructure::in_memory::InMemoryBackOffice;
use rust_decimal_macros::dec;

fn service() -> TripService {
    let store = InMemoryBackOffice::new();
    let drivers: DriverStoreBox = Box::new(store.clone());
    let trips: TripStoreBox = Box::new(store.clone());
    let loads: LoadStoreBox = Box::new(store.clone());
    let expenses: ExpenseStoreBox = Box::new(store);
    TripService::new(drivers, trips, loads, expenses)
}

fn cash_load(reference: &str, price: rust_decimal::Decimal) -> Load {
    Load::new(
        reference,
        "Acme Auto",
        "2020 Toyota Camry",
        price,
        dec!(0),
        PaymentChannel::Cash,
        None,
    )
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
}

#[tokio::test]
async fn test_cached_totals_always_match_recompute() {
    let service = service();
    let driver = Driver::new("M. Petrov", DriverType::OwnerOperator);
    service.add_driver(driver.clone()).await.unwrap();

    let trip = service
        .create_trip(
            &driver,
            "Chicago run",
            march(15),
            vec![cash_load("LD-1", dec!(800))],
            ExpenseTotals::default(),
        )
        .await
        .unwrap();

    // mutate loads, then expenses, checking the cache after each step
    let trip = service
        .attach_order(trip.id, cash_load("LD-2", dec!(200)))
        .await
        .unwrap();
    let summary = service.trip_summary(trip.id).await.unwrap();
    assert_eq!(trip.totals.driver_earnings, summary.driver_pay);
    assert_eq!(trip.totals.expenses_total, summary.total_expenses);

    let mut manual = ExpenseTotals::default();
    manual.add(ExpenseCategory::Fuel, dec!(100)).unwrap();
    let trip = service.edit_trip(trip.id, None, None, manual).await.unwrap();
    let summary = service.trip_summary(trip.id).await.unwrap();
    assert_eq!(trip.totals.driver_earnings, summary.driver_pay);
    assert_eq!(trip.totals.expenses_total, summary.total_expenses);
    // (1000 - 100 - 100) * 0.9
    assert_eq!(trip.totals.driver_earnings, dec!(720));
}

#[tokio::test]
async fn test_driver_type_frozen_on_trip() {
    let service = service();
    let mut driver = Driver::new("T. Okafor", DriverType::CompanyDriver);
    service.add_driver(driver.clone()).await.unwrap();

    let trip = service
        .create_trip(
            &driver,
            "Detroit run",
            march(16),
            vec![cash_load("LD-1", dec!(1000))],
            ExpenseTotals::default(),
        )
        .await
        .unwrap();
    assert_eq!(trip.totals.driver_earnings, dec!(320));

    // the driver switches type afterwards; the stored trip keeps settling
    // under the frozen rule set
    driver.driver_type = DriverType::OwnerOperator;
    service.add_driver(driver).await.unwrap();

    let recomputed = service.trip_summary(trip.id).await.unwrap();
    assert_eq!(recomputed.driver_pay, dec!(320));
}

#[tokio::test]
async fn test_cascade_delete_through_trait_objects() {
    let service = service();
    let driver = Driver::new("M. Petrov", DriverType::OwnerOperator);
    service.add_driver(driver.clone()).await.unwrap();

    let mut manual = ExpenseTotals::default();
    manual.add(ExpenseCategory::Parking, dec!(40)).unwrap();
    let trip = service
        .create_trip(
            &driver,
            "Chicago run",
            march(15),
            vec![cash_load("LD-1", dec!(500))],
            manual,
        )
        .await
        .unwrap();

    service.delete_trip(trip.id).await.unwrap();
    assert!(service.get_trip(trip.id).await.unwrap().is_none());
    assert!(service.list_trips().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_payment_status_round_trip() {
    let service = service();
    let driver = Driver::new("M. Petrov", DriverType::OwnerOperator);
    service.add_driver(driver.clone()).await.unwrap();

    let trip = service
        .create_trip(&driver, "Chicago run", march(15), vec![], ExpenseTotals::default())
        .await
        .unwrap();

    let held = service
        .place_on_hold(trip.id, HoldReason::Other("fuel receipt missing".to_string()))
        .await
        .unwrap();
    assert!(matches!(held.payment_status, PaymentStatus::OnHold { .. }));

    let paid = service
        .mark_paid_in_full(trip.id, PayoutMethod::Check, march(22))
        .await
        .unwrap();
    assert!(matches!(paid.payment_status, PaymentStatus::PaidInFull { .. }));

    let cleared = service.clear_payment_status(trip.id).await.unwrap();
    assert_eq!(cleared.payment_status, PaymentStatus::Unset);
}

#[tokio::test]
async fn test_concurrent_mutations_serialize() {
    // an attach landing between another mutation's read and its totals
    // write would leave stale cached earnings; the service must serialize
    // fetch-recompute-write sequences so the cache matches a recompute no
    // matter how the tasks interleave
    let service = std::sync::Arc::new(service());
    let driver = Driver::new("M. Petrov", DriverType::OwnerOperator);
    service.add_driver(driver.clone()).await.unwrap();

    let trip = service
        .create_trip(
            &driver,
            "Chicago run",
            march(15),
            vec![cash_load("LD-1", dec!(800))],
            ExpenseTotals::default(),
        )
        .await
        .unwrap();

    let mut handles = Vec::new();
    for i in 0..8u32 {
        let service = service.clone();
        let trip_id = trip.id;
        handles.push(tokio::spawn(async move {
            if i % 2 == 0 {
                let reference = format!("LD-{}", i + 2);
                service
                    .attach_order(trip_id, cash_load(&reference, dec!(150)))
                    .await
                    .unwrap();
            } else {
                let mut manual = ExpenseTotals::default();
                manual
                    .add(ExpenseCategory::Fuel, rust_decimal::Decimal::from(10 * i))
                    .unwrap();
                service.edit_trip(trip_id, None, None, manual).await.unwrap();
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let trip = service.get_trip(trip.id).await.unwrap().unwrap();
    let summary = service.trip_summary(trip.id).await.unwrap();
    assert_eq!(trip.totals.total_loads, 5);
    assert_eq!(trip.totals.total_loads, summary.total_loads);
    assert_eq!(trip.totals.driver_earnings, summary.driver_pay);
    assert_eq!(trip.totals.expenses_total, summary.total_expenses);
    assert_eq!(trip.totals.company_earnings, summary.dispatch_fee);
}

#[tokio::test]
async fn test_service_is_send_across_tasks() {
    let service = std::sync::Arc::new(service());
    let driver = Driver::new("M. Petrov", DriverType::OwnerOperator);
    service.add_driver(driver.clone()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..4 {
        let service = service.clone();
        let driver = driver.clone();
        handles.push(tokio::spawn(async move {
            service
                .create_trip(
                    &driver,
                    format!("run {i}"),
                    march(15),
                    vec![cash_load("LD-1", dec!(100))],
                    ExpenseTotals::default(),
                )
                .await
                .unwrap()
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(service.list_trips().await.unwrap().len(), 4);
}
