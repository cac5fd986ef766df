//! Integration tests for the Weatherscope library and CLI

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use chrono::NaiveDate;
use weatherscope::chat::{self, ChatIntent};
use weatherscope::weather::NASA_POWER_LAST_DATE;
use weatherscope::{
    ReadingsSource, SessionContext, SportCatalog, evaluate, find_best_days, load_forecast,
    load_nasa_power, load_weatherbit, resolve_readings,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Run the CLI with a config path that does not exist, so a user config
/// file cannot change the outcome
fn run(args: &[&str]) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("missing.toml");
    Command::new(env!("CARGO_BIN_EXE_weatherscope"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_forecast_fixture_loads() {
    let forecast = load_forecast(&fixture("innsbruck_forecast.json")).unwrap();
    assert_eq!(forecast.len(), 7);
    assert_eq!(forecast.location_name(), "Innsbruck, AT");

    // the sparse last day is filled with zeros
    let last = forecast.day(date("2026-10-24")).unwrap();
    assert_eq!(last.sample.precip, 0.0);
    assert_eq!(last.sample.snow, Some(0.0));
}

#[test]
fn test_best_days_over_fixture() {
    let catalog = SportCatalog::builtin().unwrap();
    let forecast = load_forecast(&fixture("innsbruck_forecast.json")).unwrap();

    let tennis = find_best_days(catalog.get("Tennis").unwrap(), &forecast.days);
    let dates: Vec<NaiveDate> = tennis.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![date("2026-10-18"), date("2026-10-21"), date("2026-10-24")]
    );
    assert!(
        tennis
            .iter()
            .all(|d| d.suitability.message == "Great weather for Tennis!")
    );

    let skiing = find_best_days(catalog.get("Skiing").unwrap(), &forecast.days);
    let dates: Vec<NaiveDate> = skiing.iter().map(|d| d.date).collect();
    assert_eq!(dates, vec![date("2026-10-22"), date("2026-10-23")]);
}

#[test]
fn test_all_reasons_reported_in_order() {
    let catalog = SportCatalog::builtin().unwrap();
    let forecast = load_forecast(&fixture("innsbruck_forecast.json")).unwrap();
    let wet_day = forecast.day(date("2026-10-20")).unwrap();

    let result = evaluate(catalog.get("Tennis").unwrap(), &wet_day.sample);
    assert!(!result.suitable);
    assert_eq!(
        result.message,
        "Tennis requires warmer temperatures. AND High humidity reduces performance. \
         AND Rain makes courts slippery and unplayable."
    );
}

#[test]
fn test_custom_catalog_file() {
    let catalog = SportCatalog::load(&fixture("custom_catalog.json")).unwrap();
    assert_eq!(catalog.names(), vec!["Sailing", "Stargazing"]);

    let forecast = load_forecast(&fixture("innsbruck_forecast.json")).unwrap();
    let session = SessionContext::new().with_sport("Stargazing");
    let days = session.find_best_days(&catalog, &forecast, 7).unwrap();
    let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![date("2026-10-18"), date("2026-10-21"), date("2026-10-24")]
    );
}

#[test]
fn test_session_check_on_fixture() {
    let catalog = SportCatalog::builtin().unwrap();
    let forecast = load_forecast(&fixture("innsbruck_forecast.json")).unwrap();
    let session = SessionContext::new()
        .with_sport("Tennis")
        .with_date(date("2026-10-19"));

    let (day, result) = session
        .check_selected_day(&catalog, &forecast, date("2026-10-18"), 16)
        .unwrap()
        .unwrap();
    assert_eq!(day.date, date("2026-10-19"));
    assert_eq!(result.message, "Wind affects ball trajectory.");
}

#[test]
fn test_chat_over_fixture() {
    let forecast = load_forecast(&fixture("innsbruck_forecast.json")).unwrap();
    let today = date("2026-10-18");

    let intent = chat::interpret("Weather in Innsbruck tomorrow", today).unwrap();
    assert_eq!(
        intent.reply(Some(&forecast), today),
        vec![
            "Weather in Innsbruck, AT on October 19th, 2026: Max Temp: 16.4°C, Min Temp: 8.2°C, Precipitation: 1.2mm"
                .to_string()
        ]
    );

    let week = chat::interpret("weather in innsbruck next week", today).unwrap();
    let lines = week.reply(Some(&forecast), today);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "2026-10-19: Max: 16.4°C, Min: 8.2°C, Precip: 1.2mm");

    assert_eq!(chat::interpret("hello", today), Some(ChatIntent::Greeting));
}

#[test]
fn test_readings_source_selection() {
    let nasa = load_nasa_power(&fixture("innsbruck_power.json")).unwrap();
    let forecast = load_weatherbit(&fixture("innsbruck_forecast.json")).unwrap();

    let past = resolve_readings(
        date("2025-09-14"),
        NASA_POWER_LAST_DATE,
        Some(&nasa),
        Some(&forecast),
    )
    .unwrap();
    assert_eq!(past.source, ReadingsSource::NasaPower);
    assert_eq!(past.readings.solar_radiation, Some(4.71));

    // after the archive ends NASA POWER is not consulted at all
    let future = resolve_readings(
        date("2026-10-21"),
        NASA_POWER_LAST_DATE,
        Some(&nasa),
        Some(&forecast),
    )
    .unwrap();
    assert_eq!(future.source, ReadingsSource::Weatherbit);
    assert_eq!(future.readings.date, Some(date("2026-10-21")));
    assert_eq!(future.readings.temp, Some(13.0));
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("weatherscope"));
    assert!(stdout.contains("best-days"));
    assert!(stdout.contains("hazards"));
}

#[test]
fn test_cli_lists_sports() {
    let output = run(&["sports"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Skiing"));
    assert!(stdout.contains("minSnow 10 mm: Not enough snow to ski safely."));
    assert!(stdout.contains("Basketball (Outdoor)"));
}

#[test]
fn test_cli_best_days_text() {
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "best-days",
        "--sport",
        "Skiing",
        "--forecast",
        forecast.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "2026-10-22: Great weather for Skiing!\n2026-10-23: Great weather for Skiing!\n"
    );
}

#[test]
fn test_cli_best_days_json() {
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "best-days",
        "--sport",
        "Tennis",
        "--forecast",
        forecast.to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    let days: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let days = days.as_array().unwrap();
    assert_eq!(days.len(), 3);
    assert_eq!(days[0]["date"], "2026-10-18");
    assert_eq!(days[0]["suitability"]["suitable"], true);
}

#[test]
fn test_cli_best_days_csv() {
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "best-days",
        "--sport",
        "Skiing",
        "--forecast",
        forecast.to_str().unwrap(),
        "--csv",
    ]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        rows,
        vec![
            "Date,Suitable,Message",
            "2026-10-22,true,Great weather for Skiing!",
            "2026-10-23,true,Great weather for Skiing!",
        ]
    );
}

#[test]
fn test_cli_readings_from_nasa_power() {
    let nasa = fixture("innsbruck_power.json");
    let output = run(&[
        "readings",
        "--date",
        "2025-09-15",
        "--nasa",
        nasa.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        "Readings for 2025-09-15 at 47.2600, 11.3900 from NASA POWER\n  \
         Temperature (°C): 15.02\n  \
         Max Temperature (°C): 21.75\n  \
         Min Temperature (°C): 9.84\n  \
         Wind Speed (m/s): 0.98\n  \
         Relative Humidity (%): 68.19\n"
    );
}

#[test]
fn test_cli_readings_csv_falls_back_to_forecast() {
    // the archive only holds fill values for this date
    let nasa = fixture("innsbruck_power.json");
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "readings",
        "--date",
        "2025-09-16",
        "--nasa",
        nasa.to_str().unwrap(),
        "--forecast",
        forecast.to_str().unwrap(),
        "--csv",
    ]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        rows,
        vec![
            "Temperature (°C),Max Temperature (°C),Min Temperature (°C),Wind Speed (m/s),\
             Relative Humidity (%),Solar Radiation (W/m²)",
            "14.2,18.1,9,3.4,62,160.2",
        ]
    );
}

#[test]
fn test_cli_readings_json_reports_source() {
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "readings",
        "--date",
        "2026-10-21",
        "--forecast",
        forecast.to_str().unwrap(),
        "--json",
    ]);
    assert!(output.status.success());

    let sourced: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(sourced["source"], "weatherbit");
    assert_eq!(sourced["readings"]["date"], "2026-10-21");
    assert_eq!(sourced["readings"]["humidity"], 55.0);
}

#[test]
fn test_cli_readings_needs_a_source() {
    let output = run(&["readings", "--date", "2026-10-21"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_no_suitable_days() {
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "best-days",
        "--sport",
        "Swimming (Outdoor)",
        "--forecast",
        forecast.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "No suitable days found for this sport in the next two weeks."
    );
}

#[test]
fn test_cli_unknown_sport_fails() {
    let forecast = fixture("innsbruck_forecast.json");
    let output = run(&[
        "best-days",
        "--sport",
        "Curling",
        "--forecast",
        forecast.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown sport 'Curling'"));
}

#[test]
fn test_cli_catalog_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let mut file = std::fs::File::create(&config_path).unwrap();
    writeln!(
        file,
        "[catalog]\npath = {:?}\n",
        fixture("custom_catalog.json").to_str().unwrap()
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_weatherscope"))
        .arg("--config")
        .arg(&config_path)
        .arg("sports")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Sailing"));
    assert!(stdout.contains("Stargazing"));
    assert!(!stdout.contains("Tennis"));
}

#[test]
fn test_cli_chat_greeting_and_help() {
    let output = run(&["chat", "hello"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), chat::GREETING_REPLY);

    let output = run(&["chat", "help", "me", "please"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("'Weather in City next week'"));
}

#[test]
fn test_cli_chat_without_forecast() {
    let output = run(&["chat", "Weather", "in", "Oslo", "tomorrow"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "No weather data available for oslo.");
}

#[test]
fn test_cli_hazards_seeded_json() {
    // far in the future, so every kind is simulated
    let args = ["hazards", "--date", "2099-01-01", "--seed", "11", "--json"];
    let first = run(&args);
    let second = run(&args);
    assert!(first.status.success());
    assert_eq!(stdout(&first), stdout(&second));

    let report: serde_json::Value = serde_json::from_str(&stdout(&first)).unwrap();
    assert_eq!(report["predicted"], true);
    let layers = report["layers"].as_array().unwrap();
    assert_eq!(layers.len(), 3);
    assert_eq!(layers[0]["kind"], "earthquake");
    for layer in layers {
        let count = layer["events"].as_array().unwrap().len();
        assert!((3..=7).contains(&count));
    }
}

#[test]
fn test_cli_hazards_past_date() {
    let output = run(&["hazards", "--date", "2000-01-01", "--seed", "1"]);
    assert!(output.status.success());
    let stdout = stdout(&output);
    assert!(stdout.contains("Hazards for 2000-01-01 (observed)"));
    assert!(stdout.contains("Earthquake: observed feed required"));
    assert!(stdout.contains("Storm Event"));
}
