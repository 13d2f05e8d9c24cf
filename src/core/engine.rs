use chrono::{NaiveDate, NaiveDateTime};

use crate::core::aggregator;
use crate::core::bridge;
use crate::core::repository::{self, ReservationRepository};
use crate::core::store::ReservationStore;
use crate::core::{
    EquipmentLimits, FilterCriteria, NewReservation, Reservation, Storage, Summary,
};
use crate::utils::error::Result;

/// Application state: the loaded collection plus the store it came from.
///
/// Every mutation is applied in memory first and then saved. When the save
/// fails the mutation is kept, the engine is marked dirty and the
/// `PersistenceError` is returned; `persist` retries.
pub struct RentalEngine<S: Storage> {
    store: ReservationStore<S>,
    repository: ReservationRepository,
    limits: EquipmentLimits,
    dirty: bool,
}

impl<S: Storage> RentalEngine<S> {
    pub async fn open(store: ReservationStore<S>) -> Self {
        let reservations = store.load().await;
        tracing::info!(
            "Opened {} with {} reservations",
            store.location(),
            reservations.len()
        );

        Self {
            store,
            repository: ReservationRepository::new(reservations),
            limits: EquipmentLimits::default(),
            dirty: false,
        }
    }

    pub fn with_limits(mut self, limits: EquipmentLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn reservations(&self) -> &[Reservation] {
        self.repository.all()
    }

    pub fn get(&self, id: u64) -> Option<&Reservation> {
        self.repository.get(id)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    pub async fn persist(&mut self) -> Result<()> {
        self.dirty = true;
        self.store.save(self.repository.all()).await?;
        self.dirty = false;
        Ok(())
    }

    pub async fn create(
        &mut self,
        fields: NewReservation,
        created_by: &str,
        now: NaiveDateTime,
    ) -> Result<Reservation> {
        fields.validate_with(&self.limits)?;
        let created = self.repository.create(fields, created_by, now)?.clone();
        tracing::info!(
            "Created reservation {} for {} by {}",
            created.id,
            created.name,
            created_by
        );

        self.persist().await?;
        Ok(created)
    }

    /// Returns false, without touching the store, when `id` does not exist.
    pub async fn delete(&mut self, id: u64) -> Result<bool> {
        if !self.repository.delete(id) {
            tracing::debug!("Delete of unknown reservation {} ignored", id);
            return Ok(false);
        }
        tracing::info!("Deleted reservation {}", id);

        self.persist().await?;
        Ok(true)
    }

    pub async fn set_completed(&mut self, id: u64, value: bool) -> Result<Option<Reservation>> {
        let updated = match self.repository.set_completed(id, value) {
            Some(reservation) => reservation.clone(),
            None => {
                tracing::debug!("Completion change for unknown reservation {} ignored", id);
                return Ok(None);
            }
        };
        tracing::info!(
            "Reservation {} marked {}",
            id,
            if value { "completed" } else { "active" }
        );

        self.persist().await?;
        Ok(Some(updated))
    }

    pub async fn clear(&mut self) -> Result<usize> {
        let removed = self.repository.clear();
        tracing::info!("Cleared {} reservations", removed);

        self.persist().await?;
        Ok(removed)
    }

    /// Replaces the whole collection with the records in `document`.
    /// A rejected document leaves the current collection untouched.
    pub async fn import(&mut self, document: &str) -> Result<usize> {
        let imported = bridge::import_all(document)?;
        let count = imported.len();
        self.repository.replace_all(imported);
        tracing::info!("Imported {} reservations", count);

        self.persist().await?;
        Ok(count)
    }

    pub fn export(&self) -> Result<String> {
        bridge::export_all(self.repository.all())
    }

    /// Filtered view, newest rental date first.
    pub fn list(&self, criteria: &FilterCriteria) -> Vec<Reservation> {
        repository::sort_by_date_desc(repository::filter(self.repository.all(), criteria))
    }

    pub fn recent(&self, limit: usize) -> Vec<Reservation> {
        repository::recent(self.repository.all(), limit)
    }

    pub fn summary(&self, today: NaiveDate) -> Summary {
        aggregator::summary(self.repository.all(), today)
    }
}
