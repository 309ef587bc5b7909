use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const LOAD_HEADER: [&str; 7] = [
    "load_id",
    "customer",
    "vehicle",
    "price",
    "broker_fee",
    "payment_method",
    "notes",
];

pub fn generate_loads_csv(path: &Path, rows: &[[&str; 7]]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(LOAD_HEADER)?;
    for row in rows {
        wtr.write_record(row)?;
    }

    wtr.flush()?;
    Ok(())
}
