use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_non_negative, validate_range, Validate,
};

/// A single rental record for one client covering a date range.
///
/// Keys are persisted in snake_case; the camelCase spellings are accepted on
/// input so hand-written import files work either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub date: NaiveDate,
    #[serde(default, alias = "returnDate", skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub ombrellone: u32,
    #[serde(default)]
    pub sdraio: u32,
    #[serde(default)]
    pub lettino: u32,
    #[serde(default)]
    pub regista: u32,
    #[serde(default)]
    pub price: f64,
    #[serde(default, alias = "depositPaid")]
    pub deposit_paid: bool,
    #[serde(default)]
    pub insurance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub completed: bool,
    /// Required on decode: it orders the recent list and has no sensible
    /// fallback. `created_by` defaults to empty like the other optional fields.
    #[serde(alias = "createdAt")]
    pub created_at: NaiveDateTime,
    #[serde(default, alias = "createdBy")]
    pub created_by: String,
}

impl Reservation {
    pub fn equipment_count(&self, kind: EquipmentKind) -> u32 {
        match kind {
            EquipmentKind::Ombrellone => self.ombrellone,
            EquipmentKind::Sdraio => self.sdraio,
            EquipmentKind::Lettino => self.lettino,
            EquipmentKind::Regista => self.regista,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }
}

/// One of the four countable rental items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentKind {
    /// Beach umbrella.
    Ombrellone,
    /// Deck chair.
    Sdraio,
    /// Sun lounger.
    Lettino,
    /// Director's chair.
    Regista,
}

impl EquipmentKind {
    pub const ALL: [EquipmentKind; 4] = [
        EquipmentKind::Ombrellone,
        EquipmentKind::Sdraio,
        EquipmentKind::Lettino,
        EquipmentKind::Regista,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EquipmentKind::Ombrellone => "ombrellone",
            EquipmentKind::Sdraio => "sdraio",
            EquipmentKind::Lettino => "lettino",
            EquipmentKind::Regista => "regista",
        }
    }
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EquipmentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ombrellone" | "ombrelloni" | "umbrella" => Ok(EquipmentKind::Ombrellone),
            "sdraio" | "deck-chair" => Ok(EquipmentKind::Sdraio),
            "lettino" | "lettini" | "lounger" => Ok(EquipmentKind::Lettino),
            "regista" | "director-chair" => Ok(EquipmentKind::Regista),
            other => Err(format!("unknown equipment kind '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    Any,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(&self, reservation: &Reservation) -> bool {
        match self {
            StatusFilter::Any => true,
            StatusFilter::Active => reservation.is_active(),
            StatusFilter::Completed => reservation.completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "any" | "all" => Ok(StatusFilter::Any),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            other => Err(format!("unknown status '{}'", other)),
        }
    }
}

/// Independently optional criteria, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    pub date: Option<NaiveDate>,
    pub status: StatusFilter,
    pub name_query: Option<String>,
    pub equipment: Option<EquipmentKind>,
}

/// Per-kind upper bounds applied to form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquipmentLimits {
    pub ombrellone: u32,
    pub sdraio: u32,
    pub lettino: u32,
    pub regista: u32,
}

impl Default for EquipmentLimits {
    fn default() -> Self {
        Self {
            ombrellone: 20,
            sdraio: 50,
            lettino: 30,
            regista: 20,
        }
    }
}

impl EquipmentLimits {
    pub fn limit(&self, kind: EquipmentKind) -> u32 {
        match kind {
            EquipmentKind::Ombrellone => self.ombrellone,
            EquipmentKind::Sdraio => self.sdraio,
            EquipmentKind::Lettino => self.lettino,
            EquipmentKind::Regista => self.regista,
        }
    }
}

/// Form values for a new reservation, already type-coerced by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub ombrellone: u32,
    pub sdraio: u32,
    pub lettino: u32,
    pub regista: u32,
    pub price: f64,
    pub deposit_paid: bool,
    pub insurance: bool,
    pub notes: Option<String>,
}

impl NewReservation {
    /// A blank form for `date`: no equipment, zero price, return on the same day.
    pub fn new(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            phone: None,
            email: None,
            date,
            return_date: Some(date),
            ombrellone: 0,
            sdraio: 0,
            lettino: 0,
            regista: 0,
            price: 0.0,
            deposit_paid: false,
            insurance: false,
            notes: None,
        }
    }

    pub fn equipment_count(&self, kind: EquipmentKind) -> u32 {
        match kind {
            EquipmentKind::Ombrellone => self.ombrellone,
            EquipmentKind::Sdraio => self.sdraio,
            EquipmentKind::Lettino => self.lettino,
            EquipmentKind::Regista => self.regista,
        }
    }

    pub fn validate_with(&self, limits: &EquipmentLimits) -> Result<()> {
        validate_non_empty_string("name", &self.name)?;
        for kind in EquipmentKind::ALL {
            validate_range(kind.key(), self.equipment_count(kind), 0, limits.limit(kind))?;
        }
        validate_non_negative("price", self.price)?;
        Ok(())
    }
}

impl Validate for NewReservation {
    fn validate(&self) -> Result<()> {
        self.validate_with(&EquipmentLimits::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Counts {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
    pub today: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EquipmentTotals {
    pub ombrellone: u64,
    pub sdraio: u64,
    pub lettino: u64,
    pub regista: u64,
}

impl EquipmentTotals {
    pub fn get(&self, kind: EquipmentKind) -> u64 {
        match kind {
            EquipmentKind::Ombrellone => self.ombrellone,
            EquipmentKind::Sdraio => self.sdraio,
            EquipmentKind::Lettino => self.lettino,
            EquipmentKind::Regista => self.regista,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Financials {
    pub total_revenue: f64,
    pub average_per_rental: f64,
    pub deposits_paid: usize,
}

/// Everything the statistics view shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub counts: Counts,
    pub equipment: EquipmentTotals,
    pub financials: Financials,
}
