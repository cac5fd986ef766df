//! CSV renderings of a day's readings and of best-day results

use csv::Writer;

use crate::models::DailyReadings;
use crate::sports::BestDay;
use crate::{Result, WeatherscopeError};

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| WeatherscopeError::from(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| WeatherscopeError::parse(e.to_string()))
}

/// A label row and a value row, one column per reported variable
pub fn readings_csv(readings: &DailyReadings) -> Result<String> {
    let present = readings.present();
    if present.is_empty() {
        return Err(WeatherscopeError::validation("No readings to export."));
    }

    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(present.iter().map(|(variable, _)| variable.label()))?;
    writer.write_record(present.iter().map(|(_, value)| value.to_string()))?;
    finish(writer)
}

/// One row per suitable day under a `Date,Suitable,Message` header
pub fn best_days_csv(days: &[BestDay]) -> Result<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Date", "Suitable", "Message"])?;
    for day in days {
        writer.write_record([
            day.date.to_string(),
            day.suitability.suitable.to_string(),
            day.suitability.message.clone(),
        ])?;
    }
    finish(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sports::SuitabilityResult;
    use chrono::NaiveDate;

    #[test]
    fn test_readings_csv_has_label_and_value_rows() {
        let readings = DailyReadings {
            temp: Some(14.2),
            wind_speed: Some(1.7),
            humidity: Some(71.0),
            ..Default::default()
        };

        let csv = readings_csv(&readings).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(
            rows,
            vec![
                "Temperature (°C),Wind Speed (m/s),Relative Humidity (%)",
                "14.2,1.7,71",
            ]
        );
    }

    #[test]
    fn test_empty_readings_cannot_be_exported() {
        let err = readings_csv(&DailyReadings::default()).unwrap_err();
        assert_eq!(err.user_message(), "No readings to export.");
    }

    #[test]
    fn test_best_days_csv_quotes_messages() {
        let days = vec![BestDay {
            date: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
            suitability: SuitabilityResult {
                suitable: true,
                message: "Great weather for Swimming, Outdoor!".into(),
                violations: vec![],
            },
        }];

        let csv = best_days_csv(&days).unwrap();
        let rows: Vec<&str> = csv.lines().collect();
        assert_eq!(rows[0], "Date,Suitable,Message");
        assert_eq!(
            rows[1],
            "2026-10-22,true,\"Great weather for Swimming, Outdoor!\""
        );
        assert_eq!(best_days_csv(&[]).unwrap().lines().count(), 1);
    }
}
