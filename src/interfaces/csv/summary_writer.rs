use crate::domain::settlement::TripSummary;
use crate::error::Result;
use std::io::Write;

/// Writes the audited settlement breakdown as `field,amount` CSV.
///
/// Every intermediate quantity is emitted in calculation order so the
/// output reads as the same ladder the engine walked.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_summary(&mut self, summary: &TripSummary) -> Result<()> {
        self.writer.write_record(["field", "amount"])?;

        let rows = [
            ("total_loads", summary.total_loads.to_string()),
            ("total_price", summary.total_price.to_string()),
            ("total_broker_fee", summary.total_broker_fee.to_string()),
            ("total_gross_before", summary.total_gross_before.to_string()),
            ("cash_gross_before", summary.gross_before.cash.to_string()),
            ("check_gross_before", summary.gross_before.check.to_string()),
            ("billing_gross_before", summary.gross_before.billing.to_string()),
            ("other_expenses", summary.other_expenses.to_string()),
            ("dispatch_fee", summary.dispatch_fee.to_string()),
            ("total_expenses", summary.total_expenses.to_string()),
            ("cash_expenses", summary.expenses.cash.to_string()),
            ("check_expenses", summary.expenses.check.to_string()),
            ("billing_expenses", summary.expenses.billing.to_string()),
            ("cash_gross_after", summary.gross_after.cash.to_string()),
            ("check_gross_after", summary.gross_after.check.to_string()),
            ("billing_gross_after", summary.gross_after.billing.to_string()),
            ("total_gross_after", summary.total_gross_after.to_string()),
            ("driver_pay", summary.driver_pay.to_string()),
        ];
        for (field, amount) in rows {
            self.writer.write_record([field, &amount])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
