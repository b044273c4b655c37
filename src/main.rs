//! # aquaalert
//!
//! Command-line front end for the AquaAlert flood awareness service.

use chrono::Local;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use aquaalert_service::config::AppConfig;
use aquaalert_service::forms::{self, RegistrationInput, ReportInput};
use aquaalert_service::logging::{self, Subsystem};
use aquaalert_service::map;
use aquaalert_service::model::AlertSeverity;
use aquaalert_service::monitor::{CycleOutcome, Monitor};
use aquaalert_service::store::DataDir;
use aquaalert_service::{guide, stations};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "aquaalert")]
#[command(about = "Community flood awareness: risk scoring, alerts and resident reports", long_about = None)]
struct Cli {
    /// Configuration file (default: aquaalert.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create any missing data files, seeding sensors and shelters
    Init,

    /// Run one evaluation cycle
    Evaluate {
        /// Rainfall over the last 6 hours, mm (0-300)
        #[arg(long)]
        rain: Option<f64>,

        /// Alert threshold on the risk score (0.0-1.0)
        #[arg(long)]
        threshold: Option<f64>,

        /// Do not perturb sensor levels before scoring
        #[arg(long)]
        no_simulate: bool,
    },

    /// Run repeated cycles with one shared risk baseline
    Watch {
        /// Number of cycles to run
        #[arg(long, default_value_t = 10)]
        cycles: usize,

        /// Pause between cycles, in seconds
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,

        #[arg(long)]
        rain: Option<f64>,

        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long)]
        no_simulate: bool,
    },

    /// Submit a community water-level report
    Report {
        #[arg(long, default_value = "")]
        name: String,

        #[arg(long, default_value_t = stations::MAP_CENTER.0)]
        lat: f64,

        #[arg(long, default_value_t = stations::MAP_CENTER.1)]
        lon: f64,

        /// Observed water level (0-200)
        #[arg(long)]
        level: u32,

        #[arg(long, default_value = "")]
        notes: String,

        #[arg(long, default_value = "")]
        contact: String,
    },

    /// Register household information
    Register {
        #[arg(long)]
        name: String,

        #[arg(long, default_value = "")]
        address: String,

        #[arg(long, default_value = "")]
        contact: String,

        #[arg(long, default_value = "")]
        barangay: String,

        /// Number of family members (1-20)
        #[arg(long, default_value_t = 1)]
        family_members: u32,
    },

    /// Show the alert log, newest first
    Alerts {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// List community water-level reports
    Reports,

    /// List registered households
    Registrations,

    /// Show current sensor levels
    Sensors,

    /// List evacuation shelters
    Shelters,

    /// Export shelters and sensors as GeoJSON
    Map {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the flood preparedness guide
    Guide,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = config.log_level().unwrap_or(logging::LogLevel::Info);
    logging::init_logger(level, config.logging.file.as_deref(), config.logging.console_timestamps);
    log_config_notices(&mut config);

    match run(cli.command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(Subsystem::System, None, &e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands, mut config: AppConfig) -> CliResult<()> {
    let data = DataDir::new(config.data_dir());
    let created = data.ensure_files().map_err(|e| e.to_string())?;
    for file in &created {
        logging::info(Subsystem::System, None, &format!("Created {}", data.root().join(file).display()));
    }

    match command {
        Commands::Init => {
            if created.is_empty() {
                println!("✓ All data files already present in {}", data.root().display());
            }
            Ok(())
        }

        Commands::Evaluate { rain, threshold, no_simulate } => {
            config.apply_overrides(rain, threshold, no_simulate).map_err(|e| e.to_string())?;
            log_config_notices(&mut config);
            let mut monitor = Monitor::new(&data, config.dashboard.clone());
            let outcome = monitor.evaluate().map_err(|e| e.to_string())?;
            print_outcome(&outcome);
            Ok(())
        }

        Commands::Watch { cycles, interval_secs, rain, threshold, no_simulate } => {
            config.apply_overrides(rain, threshold, no_simulate).map_err(|e| e.to_string())?;
            log_config_notices(&mut config);
            let mut monitor = Monitor::new(&data, config.dashboard.clone());

            let mut alerts_raised = 0;
            let mut high_alerts = 0;
            for cycle in 1..=cycles {
                println!("\n🔍 Cycle {}/{}", cycle, cycles);
                let outcome = monitor.evaluate().map_err(|e| e.to_string())?;
                print_outcome(&outcome);

                if let Some(severity) = outcome.severity() {
                    alerts_raised += 1;
                    if severity == AlertSeverity::High {
                        high_alerts += 1;
                    }
                }
                if cycle < cycles {
                    thread::sleep(Duration::from_secs(interval_secs));
                }
            }
            logging::log_watch_summary(cycles, alerts_raised, high_alerts);
            Ok(())
        }

        Commands::Report { name, lat, lon, level, notes, contact } => {
            let input = ReportInput { name, lat, lon, level, notes, contact };
            let report = forms::build_report_at(input, Local::now()).map_err(|e| e.to_string())?;
            data.reports().append(&report).map_err(|e| e.to_string())?;
            println!("✅ Report {} submitted", report.report_id);

            let shelters = data.shelters().read().map_err(|e| e.to_string())?;
            if let Some((shelter, km)) = map::nearest_shelter(report.lat, report.lon, &shelters) {
                println!("   Nearest evacuation center: {} ({:.2} km)", shelter.name, km);
            }
            Ok(())
        }

        Commands::Register { name, address, contact, barangay, family_members } => {
            let input = RegistrationInput {
                name,
                address,
                contact_number: contact,
                barangay,
                family_members,
            };
            let registration =
                forms::build_registration_at(input, Local::now()).map_err(|e| e.to_string())?;
            data.registrations().append(&registration).map_err(|e| e.to_string())?;
            println!("✅ Information saved for {}", registration.name);
            Ok(())
        }

        Commands::Alerts { limit } => {
            let alerts = data.alerts().recent(limit).map_err(|e| e.to_string())?;
            if alerts.is_empty() {
                println!("No alerts logged.");
            }
            for alert in alerts {
                println!("{}  {:<6}  {}", alert.timestamp, alert.severity, alert.message);
            }
            Ok(())
        }

        Commands::Reports => {
            let reports = data.reports().read_all().map_err(|e| e.to_string())?;
            if reports.is_empty() {
                println!("No community reports yet.");
            }
            for r in reports {
                println!(
                    "{}  {}  {:<20}  ({:.4}, {:.4})  level {:>3}  {}",
                    r.report_id, r.timestamp, r.name, r.lat, r.lon, r.level, r.notes
                );
            }
            Ok(())
        }

        Commands::Registrations => {
            let registrations = data.registrations().read_all().map_err(|e| e.to_string())?;
            if registrations.is_empty() {
                println!("No households registered yet.");
            }
            for h in &registrations {
                println!(
                    "{:<24}  {:<16}  {:<24}  {:<14}  {:>2} members  {}",
                    h.name, h.barangay, h.address, h.contact_number, h.family_members, h.timestamp
                );
            }
            let people: u32 = registrations.iter().map(|h| h.family_members).sum();
            println!("{} households, {} people", registrations.len(), people);
            Ok(())
        }

        Commands::Sensors => {
            let sensors = data.sensors().read().map_err(|e| e.to_string())?;
            for s in sensors {
                println!(
                    "{}  ({:.4}, {:.4})  {:>6.1} cm  [{}]",
                    s.id,
                    s.lat,
                    s.lon,
                    s.water_level,
                    map::sensor_color(s.water_level)
                );
            }
            Ok(())
        }

        Commands::Shelters => {
            let shelters = data.shelters().read().map_err(|e| e.to_string())?;
            for s in &shelters {
                println!("{:<30}  ({:.4}, {:.4})  capacity {}", s.name, s.lat, s.lon, s.capacity);
            }
            let total: u32 = shelters.iter().map(|s| s.capacity).sum();
            println!("Total capacity: {}", total);
            Ok(())
        }

        Commands::Map { output } => {
            let shelters = data.shelters().read().map_err(|e| e.to_string())?;
            let sensors = data.sensors().read().map_err(|e| e.to_string())?;
            let geojson = map::feature_collection(&shelters, &sensors);
            let text = serde_json::to_string_pretty(&geojson).map_err(|e| e.to_string())?;

            match output {
                Some(path) => {
                    std::fs::write(&path, text).map_err(|e| format!("{}: {}", path.display(), e))?;
                    println!("✓ Map written to {}", path.display());
                }
                None => println!("{}", text),
            }
            Ok(())
        }

        Commands::Guide => {
            print!("{}", guide::render());
            Ok(())
        }
    }
}

fn log_config_notices(config: &mut AppConfig) {
    for notice in config.take_notices() {
        logging::warn(Subsystem::Config, None, &notice);
    }
}

fn print_outcome(outcome: &CycleOutcome) {
    match &outcome.alert {
        Some(alert) => match alert.severity {
            AlertSeverity::High => println!("🚨 HIGH RISK: {}", alert.message),
            AlertSeverity::Medium => println!("⚠️  MEDIUM RISK: {}", alert.message),
            AlertSeverity::Low => println!("ℹ️  LOW RISK: {}", alert.message),
        },
        None => println!("✅ No immediate flood alert (risk {:.2})", outcome.risk),
    }
}
