//! Weatherscope command-line tool
//!
//! Usage:
//! ```bash
//! # List the sport catalog
//! weatherscope sports
//!
//! # Check one day of a Weatherbit forecast for a sport
//! weatherscope check --sport Tennis --forecast forecast.json --date 2026-10-20
//!
//! # Find the best days for a sport
//! weatherscope best-days --sport Skiing --forecast forecast.json --json
//!
//! # Show one day's readings, from NASA POWER or the closest forecast day
//! weatherscope readings --date 2025-09-15 --nasa power.json --forecast forecast.json --csv
//!
//! # Ask the rule-based chat
//! weatherscope chat Weather in Paris tomorrow --forecast paris.json
//!
//! # Simulate hazard markers
//! weatherscope hazards --date 2026-10-25 --seed 7
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use weatherscope::chat::{self, WELCOME_MESSAGE};
use weatherscope::export::{best_days_csv, readings_csv};
use weatherscope::hazards::{self, HazardReport};
use weatherscope::{
    Forecast, ReadingsSource, SessionContext, SportCatalog, WeatherscopeConfig, WeatherscopeError,
    load_forecast, load_nasa_power, load_weatherbit, logging, resolve_readings,
};

#[derive(Parser)]
#[command(
    name = "weatherscope",
    version,
    about = "Weather exploration for outdoor sports",
    long_about = "Check whether the weather suits a sport, find the best days in a forecast, \
                  ask rule-based weather questions and simulate hazard markers."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the sports in the catalog with their limits
    Sports,

    /// Check whether one forecast day suits a sport
    Check {
        /// Sport name, as listed by `weatherscope sports`
        #[arg(long)]
        sport: String,

        /// Weatherbit daily forecast JSON file
        #[arg(long)]
        forecast: PathBuf,

        /// Day to check (YYYY-MM-DD), clamped to the forecast window; defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List the first suitable days of a forecast for a sport
    BestDays {
        /// Sport name, as listed by `weatherscope sports`
        #[arg(long)]
        sport: String,

        /// Weatherbit daily forecast JSON file
        #[arg(long)]
        forecast: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Print CSV instead of text
        #[arg(long, conflicts_with = "json")]
        csv: bool,
    },

    /// Show the readings for one date
    Readings {
        /// Date to show (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// NASA POWER daily point JSON file, used up to its last available date
        #[arg(long, required_unless_present = "forecast")]
        nasa: Option<PathBuf>,

        /// Weatherbit daily forecast JSON file; its closest day is used
        #[arg(long)]
        forecast: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Print CSV instead of text
        #[arg(long, conflicts_with = "json")]
        csv: bool,
    },

    /// Ask the rule-based weather chat
    Chat {
        /// Message, e.g. "Weather in Paris tomorrow"
        #[arg(required = true)]
        message: Vec<String>,

        /// Weatherbit daily forecast JSON file for the city asked about
        #[arg(long)]
        forecast: Option<PathBuf>,
    },

    /// Simulate hazard markers for a date
    Hazards {
        /// Date to simulate (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Seed for repeatable output
        #[arg(long)]
        seed: Option<u64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// Library errors carry messages meant for the user
fn user_error(err: WeatherscopeError) -> anyhow::Error {
    anyhow!(err.user_message())
}

fn load_catalog(config: &WeatherscopeConfig) -> Result<SportCatalog> {
    match &config.catalog.path {
        Some(path) => {
            debug!("Using sport catalog {}", path.display());
            SportCatalog::load(path)
                .with_context(|| format!("Failed to load sport catalog {}", path.display()))
        }
        None => SportCatalog::builtin().context("Built-in sport catalog is invalid"),
    }
}

fn read_forecast_file(path: &Path) -> Result<Forecast> {
    load_forecast(path).with_context(|| format!("Failed to read forecast {}", path.display()))
}

fn list_sports(catalog: &SportCatalog) {
    for sport in catalog.iter() {
        println!("{}", sport.name());
        for rule in sport.rules() {
            println!(
                "  {} {}{}: {}",
                rule.threshold,
                rule.limit,
                rule.threshold.unit(),
                rule.reason
            );
        }
    }
}

fn check_day(
    config: &WeatherscopeConfig,
    catalog: &SportCatalog,
    sport: String,
    forecast_path: &Path,
    date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<()> {
    let forecast = read_forecast_file(forecast_path)?;
    let mut session = SessionContext::new().with_sport(sport);
    if let Some(date) = date {
        session = session.with_date(date);
    }
    let window = config.search.forecast_days;

    let checked = session
        .check_selected_day(catalog, &forecast, today, window)
        .map_err(user_error)?;
    let Some((day, result)) = checked else {
        println!(
            "No forecast for {} at {}.",
            session.selected_date(today, window),
            forecast.location_name()
        );
        return Ok(());
    };

    println!("{} on {}", forecast.location_name(), day.date);
    for line in day.sample.summary_lines() {
        println!("  {line}");
    }
    println!("{}", result.message);
    Ok(())
}

fn best_days(
    config: &WeatherscopeConfig,
    catalog: &SportCatalog,
    sport: String,
    forecast_path: &Path,
    json: bool,
    csv: bool,
) -> Result<()> {
    let forecast = read_forecast_file(forecast_path)?;
    let session = SessionContext::new().with_sport(sport);
    let days = session
        .find_best_days(catalog, &forecast, config.search.max_best_days)
        .map_err(user_error)?;
    info!("{} suitable days at {}", days.len(), forecast.location_name());

    if json {
        println!("{}", serde_json::to_string_pretty(&days)?);
    } else if csv {
        print!("{}", best_days_csv(&days).map_err(user_error)?);
    } else if days.is_empty() {
        println!("No suitable days found for this sport in the next two weeks.");
    } else {
        for day in &days {
            println!("{}: {}", day.date, day.suitability.message);
        }
    }
    Ok(())
}

struct ReadingsArgs {
    date: NaiveDate,
    nasa: Option<PathBuf>,
    forecast: Option<PathBuf>,
    json: bool,
    csv: bool,
}

fn show_readings(config: &WeatherscopeConfig, args: &ReadingsArgs) -> Result<()> {
    let nasa = args
        .nasa
        .as_deref()
        .map(|path| {
            load_nasa_power(path)
                .with_context(|| format!("Failed to read NASA POWER data {}", path.display()))
        })
        .transpose()?;
    let forecast = args
        .forecast
        .as_deref()
        .map(|path| {
            load_weatherbit(path)
                .with_context(|| format!("Failed to read forecast {}", path.display()))
        })
        .transpose()?;

    let sourced = resolve_readings(
        args.date,
        config.sources.nasa_power_until,
        nasa.as_ref(),
        forecast.as_ref(),
    )
    .map_err(user_error)?;
    let location = match sourced.source {
        ReadingsSource::NasaPower => nasa.as_ref().and_then(|r| r.location()),
        ReadingsSource::Weatherbit => forecast.as_ref().and_then(|r| r.location()),
    };
    info!("Readings for {} from {}", args.date, sourced.source);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sourced)?);
    } else if args.csv {
        print!("{}", readings_csv(&sourced.readings).map_err(user_error)?);
    } else {
        match location {
            Some(location) => println!(
                "Readings for {} at {} from {}",
                args.date, location.name, sourced.source
            ),
            None => println!("Readings for {} from {}", args.date, sourced.source),
        }
        for line in sourced.readings.lines() {
            println!("  {line}");
        }
    }
    Ok(())
}

fn chat_reply(message: &[String], forecast_path: Option<&Path>, today: NaiveDate) -> Result<()> {
    let text = message.join(" ");
    let Some(intent) = chat::interpret(&text, today) else {
        println!("{WELCOME_MESSAGE}");
        return Ok(());
    };

    let forecast = forecast_path.map(read_forecast_file).transpose()?;
    for line in intent.reply(forecast.as_ref(), today) {
        println!("{line}");
    }
    Ok(())
}

fn print_hazards(report: &HazardReport) {
    let status = if report.predicted {
        "predicted"
    } else {
        "observed"
    };
    println!("Hazards for {} ({status})", report.date);
    for layer in &report.layers {
        if layer.needs_observed_feed {
            println!("  {}: observed feed required", layer.kind);
            continue;
        }
        println!(
            "  {} ({}): {} events",
            layer.kind,
            layer.kind.color(),
            layer.events.len()
        );
        for event in &layer.events {
            println!(
                "    {} at {:.2}, {:.2} severity {:.1}",
                event.place, event.latitude, event.longitude, event.severity
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = WeatherscopeConfig::load_from_path(cli.config.clone())
        .context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let today = Local::now().date_naive();
    debug!("Running with today = {}", today);

    match cli.command {
        Command::Sports => {
            let catalog = load_catalog(&config)?;
            list_sports(&catalog);
        }
        Command::Check {
            sport,
            forecast,
            date,
        } => {
            let catalog = load_catalog(&config)?;
            check_day(&config, &catalog, sport, &forecast, date, today)?;
        }
        Command::BestDays {
            sport,
            forecast,
            json,
            csv,
        } => {
            let catalog = load_catalog(&config)?;
            best_days(&config, &catalog, sport, &forecast, json, csv)?;
        }
        Command::Readings {
            date,
            nasa,
            forecast,
            json,
            csv,
        } => {
            let args = ReadingsArgs {
                date,
                nasa,
                forecast,
                json,
                csv,
            };
            show_readings(&config, &args)?;
        }
        Command::Chat { message, forecast } => {
            chat_reply(&message, forecast.as_deref(), today)?;
        }
        Command::Hazards { date, seed, json } => {
            let date = date.unwrap_or(today);
            let report = match seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed);
                    hazards::simulate(&mut rng, date, today, &config.hazards)
                }
                None => hazards::simulate(&mut rand::rng(), date, today, &config.hazards),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_hazards(&report);
            }
        }
    }

    Ok(())
}
