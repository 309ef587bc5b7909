use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a raw monetary field from an ingestion source.
///
/// Back-office spreadsheets arrive with `$` signs, thousands separators and
/// the occasional free-text garbage in numeric columns. Unparseable input is
/// coerced to zero rather than rejected; the row still settles and the
/// coercion is logged for audit.
pub fn lenient(raw: &str) -> Decimal {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    match Decimal::from_str(&cleaned) {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!(raw, "unparseable amount coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Same coercion for optional fields; `None` means zero.
pub fn lenient_opt(raw: Option<&str>) -> Decimal {
    raw.map(lenient).unwrap_or(Decimal::ZERO)
}
