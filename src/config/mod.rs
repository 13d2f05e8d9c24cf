pub mod cli;
pub mod settings;

#[cfg(feature = "cli")]
use crate::core::{EquipmentKind, FilterCriteria, NewReservation, StatusFilter};
#[cfg(feature = "cli")]
use crate::utils::error::{RentalError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, validate_required_field, Validate};
#[cfg(feature = "cli")]
use chrono::NaiveDate;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "beach-rentals")]
#[command(about = "Reservations for a beach-equipment rental desk")]
pub struct CliConfig {
    /// Path to the TOML settings file
    #[arg(long, global = true, default_value = settings::DEFAULT_SETTINGS_FILE)]
    pub config: String,

    /// Directory holding the reservations file (overrides settings)
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Authenticated operator recorded on new reservations
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Record a new reservation
    Add(AddArgs),
    /// List reservations, newest date first
    List(ListArgs),
    /// Mark a reservation as returned (also marks the deposit paid)
    Complete { id: u64 },
    /// Mark a completed reservation as active again
    Reopen { id: u64 },
    /// Delete a reservation
    Delete { id: u64 },
    /// Headline counts and the most recent reservations
    Dashboard,
    /// Equipment usage and financial statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Write a dated JSON backup of every reservation
    Export {
        /// Target directory (overrides settings)
        #[arg(long)]
        output: Option<String>,
    },
    /// Replace all reservations with the contents of a JSON backup
    Import { file: String },
    /// Delete every reservation
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,

    /// Rental date, defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Return date, defaults to today
    #[arg(long)]
    pub return_date: Option<NaiveDate>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long, default_value_t = 0)]
    pub ombrellone: u32,

    #[arg(long, default_value_t = 0)]
    pub sdraio: u32,

    #[arg(long, default_value_t = 0)]
    pub lettino: u32,

    #[arg(long, default_value_t = 0)]
    pub regista: u32,

    #[arg(long, default_value_t = 0.0)]
    pub price: f64,

    #[arg(long)]
    pub deposit_paid: bool,

    #[arg(long)]
    pub insurance: bool,
}

#[cfg(feature = "cli")]
impl AddArgs {
    pub fn into_form(self, today: NaiveDate) -> NewReservation {
        NewReservation {
            name: self.name,
            phone: self.phone,
            email: self.email,
            date: self.date.unwrap_or(today),
            return_date: Some(self.return_date.unwrap_or(today)),
            ombrellone: self.ombrellone,
            sdraio: self.sdraio,
            lettino: self.lettino,
            regista: self.regista,
            price: self.price,
            deposit_paid: self.deposit_paid,
            insurance: self.insurance,
            notes: self.notes,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Only reservations starting on this date
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// any, active or completed
    #[arg(long, default_value = "any")]
    pub status: StatusFilter,

    /// Case-insensitive client name search
    #[arg(long)]
    pub search: Option<String>,

    /// ombrellone, sdraio, lettino or regista
    #[arg(long)]
    pub equipment: Option<EquipmentKind>,

    #[arg(long)]
    pub json: bool,
}

#[cfg(feature = "cli")]
impl ListArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            date: self.date,
            status: self.status,
            name_query: self.search.clone(),
            equipment: self.equipment,
        }
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// The `--user` flag, falling back to the settings' operator.
    pub fn resolve_user(&self, fallback: Option<&String>) -> Result<String> {
        let user = self.user.as_ref().or(fallback).cloned();
        let user = validate_required_field("user", &user)?;
        Ok(user.trim().to_string())
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("config", &self.config)?;

        if let Some(data_dir) = &self.data_dir {
            validate_path("data_dir", data_dir)?;
        }

        if let Some(user) = &self.user {
            if user.trim().is_empty() {
                return Err(RentalError::ConfigError {
                    message: "--user cannot be blank".to_string(),
                });
            }
        }

        if let Command::Export {
            output: Some(output),
        } = &self.command
        {
            validate_path("output", output)?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_add_command() {
        let config = CliConfig::parse_from([
            "beach-rentals",
            "--user",
            "mario",
            "add",
            "--name",
            "Rossi",
            "--date",
            "2024-06-01",
            "--ombrellone",
            "2",
            "--price",
            "20",
            "--deposit-paid",
        ]);

        let Command::Add(args) = config.command.clone() else {
            panic!("expected add command");
        };
        let form = args.into_form(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());

        assert_eq!(form.name, "Rossi");
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(form.return_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(form.ombrellone, 2);
        assert_eq!(form.price, 20.0);
        assert!(form.deposit_paid);
        assert_eq!(config.resolve_user(None).unwrap(), "mario");
    }

    #[test]
    fn test_parse_list_filters() {
        let config = CliConfig::parse_from([
            "beach-rentals",
            "list",
            "--status",
            "completed",
            "--equipment",
            "lettino",
            "--search",
            "ross",
        ]);

        let Command::List(args) = &config.command else {
            panic!("expected list command");
        };
        let criteria = args.criteria();

        assert_eq!(criteria.status, StatusFilter::Completed);
        assert_eq!(criteria.equipment, Some(EquipmentKind::Lettino));
        assert_eq!(criteria.name_query.as_deref(), Some("ross"));
        assert!(criteria.date.is_none());
    }

    #[test]
    fn test_user_falls_back_to_operator() {
        let config = CliConfig::parse_from(["beach-rentals", "dashboard"]);
        let operator = "anna".to_string();

        assert_eq!(config.resolve_user(Some(&operator)).unwrap(), "anna");
        assert!(config.resolve_user(None).is_err());
    }

    #[test]
    fn test_blank_user_fails_validation() {
        let config = CliConfig::parse_from(["beach-rentals", "--user", "  ", "stats"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_unknown_equipment() {
        let result =
            CliConfig::try_parse_from(["beach-rentals", "list", "--equipment", "surfboard"]);
        assert!(result.is_err());
    }
}
