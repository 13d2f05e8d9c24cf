pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, settings::Settings};
pub use self::core::{
    engine::RentalEngine, repository::ReservationRepository, store::ReservationStore,
};
pub use utils::error::{RentalError, Result};
