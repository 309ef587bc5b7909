use crate::domain::load::Load;
use crate::domain::money;
use crate::domain::payment::PaymentChannel;
use crate::error::{HaulbookError, Result};
use serde::Deserialize;
use std::io::Read;

/// Raw CSV row as it arrives from an uploaded trip sheet. Numeric fields
/// stay strings here; coercion happens once, in [`LoadRow::into_load`].
#[derive(Debug, Deserialize)]
struct LoadRow {
    load_id: String,
    customer: String,
    vehicle: String,
    price: Option<String>,
    broker_fee: Option<String>,
    payment_method: Option<String>,
    notes: Option<String>,
}

impl LoadRow {
    fn into_load(self) -> Load {
        Load::new(
            self.load_id,
            self.customer,
            self.vehicle,
            money::lenient_opt(self.price.as_deref()),
            money::lenient_opt(self.broker_fee.as_deref()),
            PaymentChannel::normalize(self.payment_method.as_deref()),
            self.notes.filter(|n| !n.trim().is_empty()),
        )
    }
}

/// Reads loads from a CSV source.
///
/// Wraps `csv::Reader` with whitespace trimming and flexible record
/// lengths, and yields `Result<Load>` lazily so large trip sheets stream
/// without loading everything into memory.
pub struct LoadReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> LoadReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn loads(self) -> impl Iterator<Item = Result<Load>> {
        self.reader
            .into_deserialize()
            .map(|result: std::result::Result<LoadRow, csv::Error>| {
                result.map(LoadRow::into_load).map_err(HaulbookError::from)
            })
    }
}
