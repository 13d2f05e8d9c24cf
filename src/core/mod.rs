pub mod aggregator;
pub mod bridge;
pub mod engine;
pub mod repository;
pub mod store;

pub use crate::domain::model::{
    Counts, EquipmentKind, EquipmentLimits, EquipmentTotals, FilterCriteria, Financials,
    NewReservation, Reservation, StatusFilter, Summary,
};
pub use crate::domain::ports::Storage;
pub use crate::utils::error::Result;
