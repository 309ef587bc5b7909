use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use haulbook::application::trips::TripService;
use haulbook::domain::driver::{Driver, DriverType};
use haulbook::domain::expense::ExpenseTotals;
use haulbook::infrastructure::in_memory::InMemoryBackOffice;
#[cfg(feature = "storage-rocksdb")]
use haulbook::infrastructure::rocksdb::RocksDbBackOffice;
use haulbook::interfaces::csv::expense_reader::ExpenseReader;
use haulbook::interfaces::csv::load_reader::LoadReader;
use haulbook::interfaces::csv::summary_writer::SummaryWriter;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum DriverTypeArg {
    CompanyDriver,
    OwnerOperator,
}

impl From<DriverTypeArg> for DriverType {
    fn from(arg: DriverTypeArg) -> Self {
        match arg {
            DriverTypeArg::CompanyDriver => DriverType::CompanyDriver,
            DriverTypeArg::OwnerOperator => DriverType::OwnerOperator,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input loads CSV file
    input: PathBuf,

    /// Payout rule set the trip settles under
    #[arg(long, value_enum)]
    driver_type: DriverTypeArg,

    /// Optional manually entered expenses CSV (category,amount)
    #[arg(long)]
    expenses: Option<PathBuf>,

    /// Trip name recorded on the settlement
    #[arg(long, default_value = "Uploaded trip")]
    trip_name: String,

    /// Trip date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    trip_date: Option<NaiveDate>,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn service_for(db_path: Option<PathBuf>) -> Result<TripService> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDbBackOffice::open(path).into_diagnostic()?;
            Ok(TripService::new(
                Box::new(store.clone()),
                Box::new(store.clone()),
                Box::new(store.clone()),
                Box::new(store),
            ))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => Err(miette::miette!(
            "this build has no persistent storage; enable the storage-rocksdb feature"
        )),
        None => {
            let store = InMemoryBackOffice::new();
            Ok(TripService::new(
                Box::new(store.clone()),
                Box::new(store.clone()),
                Box::new(store.clone()),
                Box::new(store),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let service = service_for(cli.db_path)?;

    // Ingest loads; row-level failures are reported and skipped.
    let file = File::open(&cli.input).into_diagnostic()?;
    let mut loads = Vec::new();
    for result in LoadReader::new(file).loads() {
        match result {
            Ok(load) => loads.push(load),
            Err(e) => eprintln!("Error reading load: {}", e),
        }
    }

    let manual = match cli.expenses {
        Some(path) => {
            let file = File::open(path).into_diagnostic()?;
            ExpenseReader::new(file).totals().into_diagnostic()?
        }
        None => ExpenseTotals::default(),
    };

    let driver = Driver::new("cli-driver", cli.driver_type.into());
    service.add_driver(driver.clone()).await.into_diagnostic()?;

    let date = cli.trip_date.unwrap_or_else(|| chrono::Utc::now().date_naive());
    let trip = service
        .create_trip(&driver, cli.trip_name, date, loads, manual)
        .await
        .into_diagnostic()?;

    let summary = service.trip_summary(trip.id).await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = SummaryWriter::new(stdout.lock());
    writer.write_summary(&summary).into_diagnostic()?;

    Ok(())
}
