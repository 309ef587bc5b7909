//! Trip financial settlement.
//!
//! Pure functions only: callers fetch loads/expenses, pass them in, and
//! persist whatever comes back. Nothing in here does I/O or holds state
//! between calls.

use crate::domain::driver::DriverType;
use crate::domain::expense::ExpenseTotals;
use crate::domain::load::Load;
use crate::domain::payment::PaymentChannel;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 10% of trip gross, charged regardless of driver type.
pub const DISPATCH_FEE_RATE: Decimal = dec!(0.10);
/// Owner operators keep 90% of what remains after all deductions.
pub const OWNER_OPERATOR_RATE: Decimal = dec!(0.90);
/// Company drivers are paid 32% of gross, before any deduction.
pub const COMPANY_DRIVER_RATE: Decimal = dec!(0.32);

/// One amount per payment-collection channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelAmounts {
    pub cash: Decimal,
    pub check: Decimal,
    pub billing: Decimal,
}

impl ChannelAmounts {
    pub fn total(&self) -> Decimal {
        self.cash + self.check + self.billing
    }

    pub fn get(&self, channel: PaymentChannel) -> Decimal {
        match channel {
            PaymentChannel::Cash => self.cash,
            PaymentChannel::Check => self.check,
            PaymentChannel::Billing => self.billing,
        }
    }

    fn slot(&mut self, channel: PaymentChannel) -> &mut Decimal {
        match channel {
            PaymentChannel::Cash => &mut self.cash,
            PaymentChannel::Check => &mut self.check,
            PaymentChannel::Billing => &mut self.billing,
        }
    }
}

/// Complete, audited breakdown of a trip settlement.
///
/// Every intermediate quantity is exposed, not just the final driver pay:
/// downstream rendering shows the whole ladder and tests verify each step
/// independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    pub total_loads: usize,
    /// Sum of gross invoice amounts across loads.
    pub total_price: Decimal,
    pub total_broker_fee: Decimal,
    /// `total_price - total_broker_fee`, before any deduction.
    pub total_gross_before: Decimal,
    pub gross_before: ChannelAmounts,
    /// Manually entered expenses, dispatch fee excluded.
    pub other_expenses: Decimal,
    pub dispatch_fee: Decimal,
    /// `dispatch_fee + other_expenses`.
    pub total_expenses: Decimal,
    /// `total_expenses` allocated proportionally to channel gross share.
    pub expenses: ChannelAmounts,
    pub gross_after: ChannelAmounts,
    pub total_gross_after: Decimal,
    pub driver_pay: Decimal,
}

/// Settles a multi-load trip.
///
/// Driver pay branches on driver type: owner operators take 90% of gross
/// after the dispatch fee and all other expenses; company drivers take a
/// flat 32% of gross before deductions, insulated from operating expenses.
/// Zero loads produce an all-zero summary. Negative per-load gross from
/// malformed input flows through arithmetically.
pub fn calculate_trip_summary(
    loads: &[Load],
    driver_type: DriverType,
    expenses: &ExpenseTotals,
) -> TripSummary {
    let mut total_price = Decimal::ZERO;
    let mut total_broker_fee = Decimal::ZERO;
    let mut gross_before = ChannelAmounts::default();

    for load in loads {
        total_price += load.price;
        total_broker_fee += load.broker_fee;
        *gross_before.slot(load.payment) += load.gross();
    }

    let total_gross_before = total_price - total_broker_fee;
    let other_expenses = expenses.total();
    let dispatch_fee = total_gross_before * DISPATCH_FEE_RATE;
    let total_expenses = dispatch_fee + other_expenses;

    let allocated = allocate_by_share(total_expenses, &gross_before);
    let gross_after = ChannelAmounts {
        cash: gross_before.cash - allocated.cash,
        check: gross_before.check - allocated.check,
        billing: gross_before.billing - allocated.billing,
    };
    let total_gross_after = total_gross_before - total_expenses;

    let driver_pay = match driver_type {
        DriverType::OwnerOperator => total_gross_after * OWNER_OPERATOR_RATE,
        DriverType::CompanyDriver => total_gross_before * COMPANY_DRIVER_RATE,
    };

    TripSummary {
        total_loads: loads.len(),
        total_price,
        total_broker_fee,
        total_gross_before,
        gross_before,
        other_expenses,
        dispatch_fee,
        total_expenses,
        expenses: allocated,
        gross_after,
        total_gross_after,
        driver_pay,
    }
}

/// Allocates `total` across the three channels proportionally to each
/// channel's share of `gross`.
///
/// Zero total gross means zero shares everywhere (no division by zero).
/// The channel amounts must sum back exactly to `total`: each share is
/// rounded to cents first (a raw division can carry 28 significant digits,
/// and adding a residue at that precision rounds again and misses), then
/// the residue is assigned to the channel with the largest gross.
pub fn allocate_by_share(total: Decimal, gross: &ChannelAmounts) -> ChannelAmounts {
    let total_gross = gross.total();
    if total_gross == Decimal::ZERO {
        return ChannelAmounts::default();
    }

    let mut allocated = ChannelAmounts {
        cash: (total * gross.cash / total_gross).round_dp(2),
        check: (total * gross.check / total_gross).round_dp(2),
        billing: (total * gross.billing / total_gross).round_dp(2),
    };

    let residue = total - allocated.total();
    if residue != Decimal::ZERO {
        let largest = if gross.cash >= gross.check && gross.cash >= gross.billing {
            PaymentChannel::Cash
        } else if gross.check >= gross.billing {
            PaymentChannel::Check
        } else {
            PaymentChannel::Billing
        };
        *allocated.slot(largest) += residue;
    }

    allocated
}

/// Settlement of a single ad-hoc local order, outside the bulk engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalOrder {
    pub dispatch_fee: Decimal,
    pub gross_after_dispatch: Decimal,
    pub driver_earnings: Decimal,
}

/// Settles one local order from its payment amount and channel.
///
/// The 10% dispatch fee applies identically to both driver types here, and
/// unlike the bulk engine there is no per-type payout percentage at all:
/// the driver's base is always `gross_after_dispatch`. That divergence is
/// pending product clarification; do not unify the two paths silently.
///
/// For cash orders, `additional_cash` is advance cash the driver already
/// collected; earnings go negative when the advance exceeds what was earned,
/// meaning the driver owes the company the difference. That is a valid
/// outcome, never clamped.
pub fn settle_local_order(
    payment: Decimal,
    channel: PaymentChannel,
    additional_cash: Decimal,
) -> LocalOrder {
    let dispatch_fee = payment * DISPATCH_FEE_RATE;
    let gross_after_dispatch = payment - dispatch_fee;
    let driver_earnings = match channel {
        PaymentChannel::Cash => gross_after_dispatch - additional_cash,
        PaymentChannel::Check | PaymentChannel::Billing => gross_after_dispatch,
    };
    LocalOrder {
        dispatch_fee,
        gross_after_dispatch,
        driver_earnings,
    }
}

/// Channel-aggregated totals for a local-driver trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalTripTotals {
    pub collected: ChannelAmounts,
    pub dispatch_fees: Decimal,
    pub driver_earnings: Decimal,
}

/// Re-derives a local trip's totals from its source loads.
///
/// Aggregates are never patched incrementally: merging a new order into an
/// existing trip re-runs every load through [`settle_local_order`] and sums,
/// so cached per-load figures can never drift from the source records.
pub fn settle_local_trip(loads: &[Load]) -> LocalTripTotals {
    let mut totals = LocalTripTotals::default();
    for load in loads {
        let payment = load.gross();
        let additional_cash = load
            .notes
            .as_deref()
            .map(additional_cash_from_notes)
            .unwrap_or(Decimal::ZERO);
        let order = settle_local_order(payment, load.payment, additional_cash);
        *totals.collected.slot(load.payment) += payment;
        totals.dispatch_fees += order.dispatch_fee;
        totals.driver_earnings += order.driver_earnings;
    }
    totals
}

/// Extracts the advance-cash amount from a free-text note.
///
/// Recognizes the annotation `Additional Cash: $<decimal>` anywhere in the
/// note; absence of the pattern means zero.
pub fn additional_cash_from_notes(notes: &str) -> Decimal {
    const LABEL: &str = "Additional Cash:";
    let Some(pos) = notes.find(LABEL) else {
        return Decimal::ZERO;
    };
    let rest = notes[pos + LABEL.len()..].trim_start();
    let Some(rest) = rest.strip_prefix('$') else {
        return Decimal::ZERO;
    };
    let digits: String = rest
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    digits.parse().unwrap_or(Decimal::ZERO)
}
