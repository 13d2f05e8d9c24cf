use chrono::NaiveDateTime;

use crate::core::{FilterCriteria, NewReservation, Reservation};
use crate::utils::error::{RentalError, Result};

/// The in-memory reservation collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationRepository {
    reservations: Vec<Reservation>,
}

impl ReservationRepository {
    pub fn new(reservations: Vec<Reservation>) -> Self {
        Self { reservations }
    }

    pub fn all(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == id)
    }

    /// `None` once the highest id in use is `u64::MAX`.
    pub fn next_id(&self) -> Option<u64> {
        self.reservations
            .iter()
            .map(|r| r.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    /// Appends a reservation built from `fields`.
    ///
    /// Only the client name is checked here; equipment bounds belong to the
    /// input boundary (`NewReservation::validate_with`).
    pub fn create(
        &mut self,
        fields: NewReservation,
        created_by: &str,
        now: NaiveDateTime,
    ) -> Result<&Reservation> {
        let name = fields.name.trim();
        if name.is_empty() {
            return Err(RentalError::validation("name", "Client name is required"));
        }

        let id = self
            .next_id()
            .ok_or_else(|| RentalError::validation("id", "No reservation ids left to assign"))?;

        let reservation = Reservation {
            id,
            name: name.to_string(),
            phone: non_blank(fields.phone),
            email: non_blank(fields.email),
            date: fields.date,
            return_date: fields.return_date,
            ombrellone: fields.ombrellone,
            sdraio: fields.sdraio,
            lettino: fields.lettino,
            regista: fields.regista,
            price: fields.price,
            deposit_paid: fields.deposit_paid,
            insurance: fields.insurance,
            notes: non_blank(fields.notes),
            completed: false,
            created_at: now,
            created_by: created_by.to_string(),
        };

        self.reservations.push(reservation);
        Ok(&self.reservations[self.reservations.len() - 1])
    }

    /// Removes the reservation with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let before = self.reservations.len();
        self.reservations.retain(|r| r.id != id);
        self.reservations.len() != before
    }

    /// Marking a reservation completed also marks its deposit paid; clearing
    /// the flag leaves the deposit as it is.
    pub fn set_completed(&mut self, id: u64, value: bool) -> Option<&Reservation> {
        let reservation = self.reservations.iter_mut().find(|r| r.id == id)?;
        if value && !reservation.completed {
            reservation.deposit_paid = true;
        }
        reservation.completed = value;
        Some(&*reservation)
    }

    pub fn clear(&mut self) -> usize {
        let removed = self.reservations.len();
        self.reservations.clear();
        removed
    }

    pub fn replace_all(&mut self, reservations: Vec<Reservation>) {
        self.reservations = reservations;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn filter(reservations: &[Reservation], criteria: &FilterCriteria) -> Vec<Reservation> {
    let query = criteria
        .name_query
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    reservations
        .iter()
        .filter(|r| criteria.date.map_or(true, |date| r.date == date))
        .filter(|r| criteria.status.matches(r))
        .filter(|r| {
            query
                .as_ref()
                .map_or(true, |q| r.name.to_lowercase().contains(q.as_str()))
        })
        .filter(|r| {
            criteria
                .equipment
                .map_or(true, |kind| r.equipment_count(kind) > 0)
        })
        .cloned()
        .collect()
}

/// Stable sort, newest rental date first.
pub fn sort_by_date_desc(mut reservations: Vec<Reservation>) -> Vec<Reservation> {
    reservations.sort_by(|a, b| b.date.cmp(&a.date));
    reservations
}

/// The `limit` most recent reservations: newest date first, then newest entry.
pub fn recent(reservations: &[Reservation], limit: usize) -> Vec<Reservation> {
    let mut sorted = reservations.to_vec();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    sorted.truncate(limit);
    sorted
}
