use crate::domain::expense::{ExpenseCategory, ExpenseTotals};
use crate::domain::money;
use crate::error::{HaulbookError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ExpenseRow {
    category: String,
    amount: Option<String>,
}

/// Reads manually entered expenses from a CSV source into [`ExpenseTotals`].
///
/// Unknown categories coerce to `other`; a `dispatch_fee` row is the one
/// hard rejection, since that category is always system-computed.
pub struct ExpenseReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ExpenseReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn totals(self) -> Result<ExpenseTotals> {
        let mut totals = ExpenseTotals::default();
        for result in self.reader.into_deserialize() {
            let row: ExpenseRow = result.map_err(HaulbookError::from)?;
            let category = ExpenseCategory::from_string(&row.category);
            let amount = money::lenient_opt(row.amount.as_deref());
            totals.add(category, amount)?;
        }
        Ok(totals)
    }
}
