use anyhow::Result;
use beach_rentals::core::bridge;
use beach_rentals::core::{EquipmentKind, FilterCriteria, NewReservation, StatusFilter};
use beach_rentals::{LocalStorage, RentalEngine, RentalError, ReservationStore};
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn at(s: &str) -> NaiveDateTime {
    day(s).and_hms_opt(9, 15, 0).unwrap()
}

async fn open(dir: &TempDir) -> RentalEngine<LocalStorage> {
    RentalEngine::open(ReservationStore::new(LocalStorage::new(dir.path()))).await
}

#[tokio::test]
async fn test_reservations_survive_reopen() -> Result<()> {
    let dir = TempDir::new()?;

    let mut engine = open(&dir).await;
    let mut rossi = NewReservation::new("Rossi", day("2024-06-01"));
    rossi.ombrellone = 2;
    rossi.price = 20.0;
    engine.create(rossi, "mario", at("2024-05-30")).await?;
    let mut bianchi = NewReservation::new("Bianchi Niccolò", day("2024-06-02"));
    bianchi.lettino = 3;
    bianchi.price = 35.5;
    engine.create(bianchi, "anna", at("2024-05-31")).await?;
    engine.set_completed(1, true).await?;

    let reopened = open(&dir).await;
    assert_eq!(reopened.reservations(), engine.reservations());

    let first = reopened.get(1).unwrap();
    assert!(first.completed);
    assert!(first.deposit_paid);
    assert_eq!(first.created_by, "mario");

    let raw = std::fs::read_to_string(dir.path().join("reservations.json"))?;
    assert!(raw.contains("Niccolò"));
    assert!(raw.contains("\"deposit_paid\": true"));
    Ok(())
}

#[tokio::test]
async fn test_original_tool_document_loads() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(
        dir.path().join("reservations.json"),
        r#"[
  {
    "id": 1,
    "name": "Rossi",
    "phone": "",
    "email": "",
    "date": "2024-06-01",
    "return_date": "2024-06-01",
    "ombrellone": 2,
    "sdraio": 0,
    "lettino": 0,
    "regista": 0,
    "price": 20.0,
    "deposit_paid": false,
    "insurance": false,
    "notes": "",
    "completed": false,
    "created_at": "2024-05-28T17:42:03.512344",
    "created_by": "Mario Rossi"
  }
]"#,
    )?;

    let engine = open(&dir).await;
    let summary = engine.summary(day("2024-06-01"));

    assert_eq!(summary.counts.total, 1);
    assert_eq!(summary.counts.active, 1);
    assert_eq!(summary.counts.today, 1);
    assert_eq!(summary.equipment.get(EquipmentKind::Ombrellone), 2);
    assert_eq!(summary.financials.total_revenue, 20.0);
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_starts_empty() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("reservations.json"), "not json at all")?;

    let mut engine = open(&dir).await;
    assert!(engine.reservations().is_empty());

    let created = engine
        .create(
            NewReservation::new("Verdi", day("2024-07-01")),
            "mario",
            at("2024-06-30"),
        )
        .await?;
    assert_eq!(created.id, 1);
    Ok(())
}

#[tokio::test]
async fn test_export_then_import_into_fresh_store() -> Result<()> {
    let source_dir = TempDir::new()?;
    let mut source = open(&source_dir).await;
    for (name, date) in [("Rossi", "2024-06-01"), ("Verdi", "2024-06-03")] {
        let mut form = NewReservation::new(name, day(date));
        form.sdraio = 2;
        form.notes = Some("Prima fila, vicino al bagnino".to_string());
        source.create(form, "mario", at("2024-05-30")).await?;
    }
    let document = source.export()?;

    let target_dir = TempDir::new()?;
    let mut target = open(&target_dir).await;
    target
        .create(
            NewReservation::new("Da sostituire", day("2024-01-01")),
            "anna",
            at("2024-01-01"),
        )
        .await?;

    assert_eq!(target.import(&document).await?, 2);
    assert_eq!(target.reservations(), source.reservations());
    assert_eq!(open(&target_dir).await.reservations(), source.reservations());
    Ok(())
}

#[tokio::test]
async fn test_rejected_import_keeps_file() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = open(&dir).await;
    engine
        .create(
            NewReservation::new("Rossi", day("2024-06-01")),
            "mario",
            at("2024-05-30"),
        )
        .await?;
    let before = std::fs::read_to_string(dir.path().join("reservations.json"))?;

    let err = engine.import(r#"{"not": "a list"}"#).await.unwrap_err();

    assert!(matches!(err, RentalError::FormatError { .. }));
    assert_eq!(engine.reservations().len(), 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("reservations.json"))?,
        before
    );
    Ok(())
}

#[tokio::test]
async fn test_filtered_listing() -> Result<()> {
    let dir = TempDir::new()?;
    let mut engine = open(&dir).await;

    let mut a = NewReservation::new("Mario Rossi", day("2024-06-01"));
    a.ombrellone = 1;
    let mut b = NewReservation::new("Anna Rossa", day("2024-06-03"));
    b.regista = 2;
    let mut c = NewReservation::new("Luca Verdi", day("2024-06-02"));
    c.ombrellone = 3;
    for form in [a, b, c] {
        engine.create(form, "mario", at("2024-05-30")).await?;
    }
    engine.set_completed(3, true).await?;

    let ids = |criteria: FilterCriteria| -> Vec<u64> {
        engine.list(&criteria).iter().map(|r| r.id).collect()
    };

    assert_eq!(ids(FilterCriteria::default()), vec![2, 3, 1]);
    assert_eq!(
        ids(FilterCriteria {
            name_query: Some("ross".to_string()),
            ..FilterCriteria::default()
        }),
        vec![2, 1]
    );
    assert_eq!(
        ids(FilterCriteria {
            equipment: Some(EquipmentKind::Ombrellone),
            status: StatusFilter::Active,
            ..FilterCriteria::default()
        }),
        vec![1]
    );
    assert_eq!(
        ids(FilterCriteria {
            date: Some(day("2024-06-02")),
            ..FilterCriteria::default()
        }),
        vec![3]
    );
    Ok(())
}

#[test]
fn test_backup_file_name_uses_date() {
    assert_eq!(
        bridge::export_file_name(day("2024-08-15")),
        "noleggi_backup_2024-08-15.json"
    );
}
