use chrono::NaiveDate;
use std::collections::HashSet;

use crate::core::Reservation;
use crate::utils::error::{RentalError, Result};

/// Indented JSON array of every reservation, non-ASCII text left as is.
pub fn export_all(reservations: &[Reservation]) -> Result<String> {
    Ok(serde_json::to_string_pretty(reservations)?)
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("noleggi_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Decodes a backup document into a full replacement collection.
///
/// Anything other than a JSON array of well-formed reservations with distinct
/// ids is a `FormatError`.
pub fn import_all(document: &str) -> Result<Vec<Reservation>> {
    let value: serde_json::Value = serde_json::from_str(document)
        .map_err(|e| RentalError::format(format!("not valid JSON: {}", e)))?;

    let items = match value {
        serde_json::Value::Array(items) => items,
        other => {
            return Err(RentalError::format(format!(
                "expected a list of reservations, found {}",
                json_kind(&other)
            )))
        }
    };

    let mut seen = HashSet::with_capacity(items.len());
    let mut reservations = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let reservation: Reservation = serde_json::from_value(item)
            .map_err(|e| RentalError::format(format!("entry {}: {}", index, e)))?;
        if !seen.insert(reservation.id) {
            return Err(RentalError::format(format!(
                "entry {}: duplicate id {}",
                index, reservation.id
            )));
        }
        reservations.push(reservation);
    }

    Ok(reservations)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
