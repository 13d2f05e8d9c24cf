use crate::core::{Reservation, Storage};
use crate::utils::error::{RentalError, Result};

pub const DEFAULT_RESERVATIONS_FILE: &str = "reservations.json";

/// Loads and saves the whole reservation collection as one JSON array.
pub struct ReservationStore<S: Storage> {
    storage: S,
    file_name: String,
}

impl<S: Storage> ReservationStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_file_name(storage, DEFAULT_RESERVATIONS_FILE)
    }

    pub fn with_file_name(storage: S, file_name: impl Into<String>) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
        }
    }

    pub fn location(&self) -> String {
        self.storage.describe(&self.file_name)
    }

    /// Reads the persisted collection.
    ///
    /// Never fails: a missing, unreadable or malformed document yields an
    /// empty collection and a warning in the log.
    pub async fn load(&self) -> Vec<Reservation> {
        let bytes = match self.storage.read_file(&self.file_name).await {
            Ok(bytes) => bytes,
            Err(RentalError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No reservations file at {}, starting empty", self.location());
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!("Could not read {}: {}, starting empty", self.location(), e);
                return Vec::new();
            }
        };

        match decode_document(&bytes) {
            Ok(reservations) => {
                tracing::debug!(
                    "Loaded {} reservations from {}",
                    reservations.len(),
                    self.location()
                );
                reservations
            }
            Err(e) => {
                tracing::warn!("{} in {}, starting empty", e, self.location());
                Vec::new()
            }
        }
    }

    /// Overwrites the persisted document with `reservations`.
    pub async fn save(&self, reservations: &[Reservation]) -> Result<()> {
        let json = serde_json::to_string_pretty(reservations)?;

        self.storage
            .write_file(&self.file_name, json.as_bytes())
            .await
            .map_err(|e| match e {
                RentalError::IoError(source) => RentalError::PersistenceError {
                    path: self.location(),
                    source,
                },
                other => other,
            })?;

        tracing::debug!(
            "Saved {} reservations to {}",
            reservations.len(),
            self.location()
        );
        Ok(())
    }
}

fn decode_document(bytes: &[u8]) -> Result<Vec<Reservation>> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| RentalError::ParseError {
            message: e.to_string(),
        })?;

    if !value.is_array() {
        return Err(RentalError::ParseError {
            message: "document is not a list".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|e| RentalError::ParseError {
        message: e.to_string(),
    })
}
