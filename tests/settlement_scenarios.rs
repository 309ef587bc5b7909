use haulbook::domain::driver::DriverType;
use haulbook::domain::expense::{ExpenseCategory, ExpenseTotals};
use haulbook::domain::load::Load;
use haulbook::domain::payment::PaymentChannel;
use haulbook::domain::settlement::{
    calculate_trip_summary, settle_local_order, DISPATCH_FEE_RATE,
};
use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn load(price: Decimal, broker_fee: Decimal, method: &str) -> Load {
    Load::new(
        "LD-1",
        "Acme Auto",
        "2020 Toyota Camry",
        price,
        broker_fee,
        PaymentChannel::normalize(Some(method)),
        None,
    )
}

#[test]
fn scenario_owner_operator_single_cash_load() {
    let loads = vec![load(dec!(1000), dec!(100), "cash")];
    let summary =
        calculate_trip_summary(&loads, DriverType::OwnerOperator, &ExpenseTotals::default());

    assert_eq!(summary.total_gross_before, dec!(900));
    assert_eq!(summary.dispatch_fee, dec!(90));
    assert_eq!(summary.driver_pay, dec!(729));
}

#[test]
fn scenario_company_driver_same_load() {
    let loads = vec![load(dec!(1000), dec!(100), "cash")];
    let summary =
        calculate_trip_summary(&loads, DriverType::CompanyDriver, &ExpenseTotals::default());

    // 900 * 0.32, unaffected by the dispatch fee
    assert_eq!(summary.driver_pay, dec!(288));
}

#[test]
fn scenario_proportional_allocation() {
    // cash gross 600, billing gross 400, total expenses 100 (the dispatch fee)
    let loads = vec![load(dec!(600), dec!(0), "cash"), load(dec!(400), dec!(0), "wire")];
    let summary =
        calculate_trip_summary(&loads, DriverType::OwnerOperator, &ExpenseTotals::default());

    assert_eq!(summary.total_expenses, dec!(100));
    assert_eq!(summary.expenses.cash, dec!(60));
    assert_eq!(summary.expenses.billing, dec!(40));
    assert_eq!(summary.gross_after.cash, dec!(540));
    assert_eq!(summary.gross_after.billing, dec!(360));
}

#[test]
fn scenario_local_order_with_advance_cash() {
    let order = settle_local_order(dec!(500), PaymentChannel::Cash, dec!(50));
    assert_eq!(order.dispatch_fee, dec!(50));
    assert_eq!(order.gross_after_dispatch, dec!(450));
    assert_eq!(order.driver_earnings, dec!(400));
}

#[test]
fn scenario_local_order_driver_owes_company() {
    let order = settle_local_order(dec!(100), PaymentChannel::Cash, dec!(150));
    assert_eq!(order.driver_earnings, dec!(-60));
}

#[test]
fn property_dispatch_fee_is_ten_percent_for_both_types() {
    let loads = vec![load(dec!(1234.56), dec!(34.56), "check")];
    for driver_type in [DriverType::OwnerOperator, DriverType::CompanyDriver] {
        let summary = calculate_trip_summary(&loads, driver_type, &ExpenseTotals::default());
        assert_eq!(summary.dispatch_fee, summary.total_gross_before * DISPATCH_FEE_RATE);
    }
}

#[test]
fn property_company_driver_pay_independent_of_expenses() {
    let loads = vec![load(dec!(2000), dec!(150), "check")];
    let mut with_expenses = ExpenseTotals::default();
    with_expenses.add(ExpenseCategory::Fuel, dec!(321.99)).unwrap();
    with_expenses.add(ExpenseCategory::Ifta, dec!(78.01)).unwrap();

    let a = calculate_trip_summary(&loads, DriverType::CompanyDriver, &ExpenseTotals::default());
    let b = calculate_trip_summary(&loads, DriverType::CompanyDriver, &with_expenses);
    assert_eq!(a.driver_pay, b.driver_pay);
}

#[test]
fn property_zero_gross_allocates_zero_expenses() {
    let mut expenses = ExpenseTotals::default();
    expenses.add(ExpenseCategory::Parking, dec!(75)).unwrap();

    let summary = calculate_trip_summary(&[], DriverType::OwnerOperator, &expenses);
    assert_eq!(summary.expenses.cash, Decimal::ZERO);
    assert_eq!(summary.expenses.check, Decimal::ZERO);
    assert_eq!(summary.expenses.billing, Decimal::ZERO);
}

#[test]
fn property_channel_sums_match_totals_for_random_inputs() {
    let mut rng = rand::thread_rng();
    let methods = ["cash", "check", "billing"];

    for _ in 0..200 {
        let mut loads = Vec::new();
        for _ in 0..rng.gen_range(1..=8) {
            let price = Decimal::new(rng.gen_range(0..5_000_00), 2);
            let broker_fee = Decimal::new(rng.gen_range(0..500_00), 2);
            let method = methods[rng.gen_range(0..methods.len())];
            loads.push(load(price, broker_fee, method));
        }
        let mut expenses = ExpenseTotals::default();
        expenses
            .add(ExpenseCategory::Fuel, Decimal::new(rng.gen_range(0..1_000_00), 2))
            .unwrap();

        let summary = calculate_trip_summary(&loads, DriverType::OwnerOperator, &expenses);
        // with zero total gross nothing is allocated, so the partition only
        // holds when there is gross to allocate against
        if summary.total_gross_before != Decimal::ZERO {
            assert_eq!(summary.expenses.total(), summary.total_expenses);
            assert_eq!(summary.gross_after.total(), summary.total_gross_after);
        }
        assert_eq!(
            summary.gross_before.total(),
            summary.total_gross_before,
            "channel gross must partition total gross"
        );
    }
}
