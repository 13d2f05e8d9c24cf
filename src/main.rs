use beach_rentals::config::settings::Settings;
use beach_rentals::config::Command;
use beach_rentals::core::bridge;
use beach_rentals::core::{EquipmentKind, Reservation, Summary};
use beach_rentals::utils::error::{ErrorSeverity, RentalError, Result};
use beach_rentals::utils::{logger, validation::Validate};
use beach_rentals::{CliConfig, LocalStorage, RentalEngine, ReservationStore};
use chrono::Local;
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(config: CliConfig) -> Result<()> {
    config.validate()?;

    let settings = Settings::load_or_default(&config.config)?;
    settings.validate()?;

    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.storage.data_dir.clone());
    let store = ReservationStore::with_file_name(
        LocalStorage::new(data_dir),
        settings.storage.reservations_file.clone(),
    );
    let mut engine = RentalEngine::open(store).await.with_limits(settings.limits);
    let today = Local::now().date_naive();

    match config.command.clone() {
        Command::Add(args) => {
            let user = config.resolve_user(settings.operator.as_ref())?;
            let created = engine
                .create(args.into_form(today), &user, Local::now().naive_local())
                .await?;
            println!("✅ Reservation {} saved to {}", created.id, engine.location());
            print_reservation(&created);
        }
        Command::List(args) => {
            let reservations = engine.list(&args.criteria());
            if args.json {
                println!("{}", bridge::export_all(&reservations)?);
            } else if reservations.is_empty() {
                println!("🌊 No reservations match the given filters");
            } else {
                for reservation in &reservations {
                    print_reservation(reservation);
                }
            }
        }
        Command::Complete { id } => report_completion(engine.set_completed(id, true).await?, id),
        Command::Reopen { id } => report_completion(engine.set_completed(id, false).await?, id),
        Command::Delete { id } => {
            if engine.delete(id).await? {
                println!("🗑️ Reservation {} deleted", id);
            } else {
                println!("No reservation with id {}", id);
            }
        }
        Command::Dashboard => {
            let counts = engine.summary(today).counts;
            println!("📋 Total:     {}", counts.total);
            println!("✅ Completed: {}", counts.completed);
            println!("⏳ Active:    {}", counts.active);
            println!("📅 Today:     {}", counts.today);
            println!();
            println!("Last {} reservations", settings.recent_limit());

            let recent = engine.recent(settings.recent_limit());
            if recent.is_empty() {
                println!("🌊 No reservations yet");
            }
            for reservation in &recent {
                print_reservation(reservation);
            }
        }
        Command::Stats { json } => {
            let summary = engine.summary(today);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if summary.counts.total == 0 {
                println!("🌊 No data available for statistics");
            } else {
                print_summary(&summary);
            }
        }
        Command::Export { output } => {
            if engine.reservations().is_empty() {
                println!("Nothing to export");
                return Ok(());
            }
            let directory = output.unwrap_or_else(|| settings.export.directory.clone());
            let target = Path::new(&directory).join(bridge::export_file_name(today));
            tokio::fs::create_dir_all(&directory).await?;
            tokio::fs::write(&target, engine.export()?).await?;
            tracing::info!("Exported {} reservations", engine.reservations().len());
            println!("📥 Backup written to {}", target.display());
        }
        Command::Import { file } => {
            let document = tokio::fs::read_to_string(&file).await?;
            let count = engine.import(&document).await?;
            println!(
                "✅ Imported {} reservations from {} into {}",
                count,
                file,
                engine.location()
            );
        }
        Command::Clear { yes } => {
            if engine.reservations().is_empty() {
                println!("Nothing to delete");
            } else if !yes {
                return Err(RentalError::validation(
                    "yes",
                    "Deleting every reservation needs --yes to confirm",
                ));
            } else {
                let removed = engine.clear().await?;
                println!("🗑️ Deleted {} reservations", removed);
            }
        }
    }

    Ok(())
}

fn report_completion(updated: Option<Reservation>, id: u64) {
    match updated {
        Some(reservation) => print_reservation(&reservation),
        None => println!("No reservation with id {}", id),
    }
}

fn print_reservation(r: &Reservation) {
    let status = if r.completed { "✅ COMPLETED" } else { "⏳ ACTIVE" };
    let return_date = r
        .return_date
        .map(|d| d.to_string())
        .unwrap_or_else(|| "N/A".to_string());
    let equipment: Vec<String> = EquipmentKind::ALL
        .iter()
        .filter(|kind| r.equipment_count(**kind) > 0)
        .map(|kind| format!("{} {}", r.equipment_count(*kind), kind))
        .collect();
    let deposit = if r.deposit_paid {
        "deposit paid"
    } else {
        "deposit NOT paid"
    };

    println!("#{} 👤 {}  {}", r.id, r.name, status);
    println!("   📅 {} → {}", r.date, return_date);
    if r.phone.is_some() || r.email.is_some() {
        println!(
            "   📞 {}  📧 {}",
            r.phone.as_deref().unwrap_or("N/A"),
            r.email.as_deref().unwrap_or("N/A")
        );
    }
    if !equipment.is_empty() {
        println!("   🏖️ {}", equipment.join(", "));
    }
    println!(
        "   💰 €{:.2} - {}{}",
        r.price,
        deposit,
        if r.insurance { ", insured" } else { "" }
    );
    if let Some(notes) = &r.notes {
        println!("   📝 {}", notes);
    }
    println!("   created by {} at {}", r.created_by, r.created_at.format("%Y-%m-%d %H:%M"));
}

fn print_summary(summary: &Summary) {
    println!("🏖️ Equipment usage");
    for kind in EquipmentKind::ALL {
        println!("   {:<10} {}", kind.to_string(), summary.equipment.get(kind));
    }
    println!();
    println!("💰 Financials");
    println!("   Total revenue:      €{:.2}", summary.financials.total_revenue);
    println!("   Average per rental: €{:.2}", summary.financials.average_per_rental);
    println!("   Deposits paid:      {}", summary.financials.deposits_paid);
}
