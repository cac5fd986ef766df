//! Weather documents and their normalization
//!
//! Retrieval happens outside this crate; what arrives here is the JSON body
//! of a Weatherbit `forecast/daily` response or a NASA POWER daily point
//! response. Every upstream field is optional. For evaluation this module is
//! the one place where missing readings are turned into zeros; for the
//! per-date data panel missing readings stay absent.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::models::{DailyReadings, Forecast};
use crate::{Result, WeatherscopeError};

/// Last day NASA POWER daily point data is available for
pub const NASA_POWER_LAST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 9, 27) {
    Some(date) => date,
    None => NaiveDate::MIN,
};

fn read_json<T: DeserializeOwned, R: Read>(reader: R) -> Result<T> {
    Ok(serde_json::from_reader(reader)?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    debug!("Loading weather document from {}", path.display());
    Ok(BufReader::new(File::open(path)?))
}

/// Parse a raw Weatherbit daily forecast document
pub fn read_weatherbit<R: Read>(reader: R) -> Result<weatherbit::ForecastResponse> {
    read_json(reader)
}

/// Load a raw Weatherbit daily forecast document from disk
pub fn load_weatherbit(path: &Path) -> Result<weatherbit::ForecastResponse> {
    read_weatherbit(open(path)?)
}

/// Parse a Weatherbit daily forecast document into a normalized forecast
pub fn read_forecast<R: Read>(reader: R) -> Result<Forecast> {
    let response = read_weatherbit(reader)?;
    let forecast = Forecast::from_weatherbit(&response);
    debug!(
        "Normalized {} of {} forecast records",
        forecast.len(),
        response.data.len()
    );
    Ok(forecast)
}

/// Load a Weatherbit daily forecast document from disk
pub fn load_forecast(path: &Path) -> Result<Forecast> {
    read_forecast(open(path)?)
}

/// Parse a NASA POWER daily point document
pub fn read_nasa_power<R: Read>(reader: R) -> Result<nasa_power::PowerResponse> {
    read_json(reader)
}

/// Load a NASA POWER daily point document from disk
pub fn load_nasa_power(path: &Path) -> Result<nasa_power::PowerResponse> {
    read_nasa_power(open(path)?)
}

/// Where a day's readings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingsSource {
    NasaPower,
    Weatherbit,
}

impl std::fmt::Display for ReadingsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadingsSource::NasaPower => f.write_str("NASA POWER"),
            ReadingsSource::Weatherbit => f.write_str("Weatherbit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourcedReadings {
    pub source: ReadingsSource,
    pub readings: DailyReadings,
}

/// Readings for `date` from whichever document covers it.
///
/// Dates up to `nasa_until` are read from NASA POWER first; when that has
/// nothing for the date, or for later dates, the Weatherbit day closest to
/// `date` is used.
pub fn resolve_readings(
    date: NaiveDate,
    nasa_until: NaiveDate,
    nasa: Option<&nasa_power::PowerResponse>,
    forecast: Option<&weatherbit::ForecastResponse>,
) -> Result<SourcedReadings> {
    if date <= nasa_until {
        match nasa.and_then(|response| response.readings(date)) {
            Some(readings) => {
                return Ok(SourcedReadings {
                    source: ReadingsSource::NasaPower,
                    readings,
                });
            }
            None => warn!("No NASA POWER data for {}, falling back to Weatherbit", date),
        }
    }

    forecast
        .and_then(|response| response.closest_to(date))
        .map(|record| SourcedReadings {
            source: ReadingsSource::Weatherbit,
            readings: record.readings(),
        })
        .ok_or_else(|| {
            WeatherscopeError::validation(format!("No weather data available for {date}."))
        })
}

/// Weatherbit API response structures and conversion utilities
pub mod weatherbit {
    use chrono::{NaiveDate, NaiveTime};
    use serde::{Deserialize, Deserializer};
    use tracing::warn;

    use crate::models::{DailyReadings, Forecast, ForecastDay, Location, WeatherSample};

    /// Daily forecast response from Weatherbit
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub city_name: Option<String>,
        pub country_code: Option<String>,
        #[serde(default, deserialize_with = "lenient_number")]
        pub lat: Option<f64>,
        #[serde(default, deserialize_with = "lenient_number")]
        pub lon: Option<f64>,
        #[serde(default)]
        pub data: Vec<DailyRecord>,
    }

    /// One day of Weatherbit data; any field may be missing or null
    #[derive(Debug, Default, Deserialize)]
    pub struct DailyRecord {
        pub valid_date: Option<String>,
        pub ts: Option<i64>,
        pub temp: Option<f64>,
        pub max_temp: Option<f64>,
        pub min_temp: Option<f64>,
        pub wind_spd: Option<f64>,
        pub rh: Option<f64>,
        pub precip: Option<f64>,
        pub uv: Option<f64>,
        pub clouds: Option<f64>,
        pub snow: Option<f64>,
        pub solar_rad: Option<f64>,
    }

    impl DailyRecord {
        /// Calendar date of this record, if `valid_date` parses
        #[must_use]
        pub fn date(&self) -> Option<NaiveDate> {
            self.valid_date
                .as_deref()
                .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        }

        /// Start of the record's period in Unix seconds; midnight UTC of
        /// `valid_date` when `ts` is missing
        #[must_use]
        pub fn timestamp(&self) -> Option<i64> {
            self.ts.or_else(|| self.date().map(midnight_utc))
        }

        /// Readings as reported, without zero-filling
        #[must_use]
        pub fn readings(&self) -> DailyReadings {
            DailyReadings {
                date: self.date(),
                temp: self.temp,
                temp_max: self.max_temp,
                temp_min: self.min_temp,
                wind_speed: self.wind_spd,
                humidity: self.rh,
                solar_radiation: self.solar_rad,
            }
        }
    }

    fn midnight_utc(date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp()
    }

    impl From<&DailyRecord> for WeatherSample {
        fn from(record: &DailyRecord) -> Self {
            WeatherSample {
                temp: record.temp.unwrap_or(0.0),
                wind_speed: record.wind_spd.unwrap_or(0.0),
                humidity: record.rh.unwrap_or(0.0),
                precip: record.precip.unwrap_or(0.0),
                uv: record.uv.unwrap_or(0.0),
                clouds: Some(record.clouds.unwrap_or(0.0)),
                snow: Some(record.snow.unwrap_or(0.0)),
                solar_radiation: Some(record.solar_rad.unwrap_or(0.0)),
            }
        }
    }

    impl ForecastResponse {
        /// Location described by the response header, if it has usable coordinates
        #[must_use]
        pub fn location(&self) -> Option<Location> {
            let (lat, lon) = (self.lat?, self.lon?);
            let mut location = match &self.city_name {
                Some(name) if !name.is_empty() => Location::new(lat, lon, name.clone()),
                _ => Location::from_coordinates(lat, lon),
            };
            if !location.is_valid() {
                warn!("Ignoring out-of-range forecast coordinates {lat}, {lon}");
                return None;
            }
            location.country = self.country_code.clone();
            Some(location)
        }

        /// Record whose timestamp is nearest to midnight UTC of `date`.
        ///
        /// The earlier record wins a tie; records without any timestamp are
        /// ignored.
        #[must_use]
        pub fn closest_to(&self, date: NaiveDate) -> Option<&DailyRecord> {
            let target = midnight_utc(date);
            self.data
                .iter()
                .filter_map(|record| record.timestamp().map(|ts| (record, ts)))
                .min_by_key(|(_, ts)| (ts - target).abs())
                .map(|(record, _)| record)
        }
    }

    // Convert Weatherbit responses to internal models
    impl Forecast {
        /// Create forecast from a Weatherbit daily response
        #[must_use]
        pub fn from_weatherbit(response: &ForecastResponse) -> Self {
            let days = response
                .data
                .iter()
                .filter_map(|record| match record.date() {
                    Some(date) => Some(ForecastDay {
                        date,
                        sample: WeatherSample::from(record),
                        max_temp: record.max_temp.unwrap_or(0.0),
                        min_temp: record.min_temp.unwrap_or(0.0),
                    }),
                    None => {
                        warn!(
                            "Skipping forecast record without a usable valid_date: {:?}",
                            record.valid_date
                        );
                        None
                    }
                })
                .collect();

            Forecast::new(response.location(), days)
        }
    }

    /// Weatherbit sends coordinates as strings on some endpoints
    fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum NumberOrText {
            Number(f64),
            Text(String),
        }

        Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
            Some(NumberOrText::Number(n)) => Some(n),
            Some(NumberOrText::Text(s)) => s.trim().parse().ok(),
            None => None,
        })
    }
}

/// NASA POWER daily point response structures
pub mod nasa_power {
    use std::collections::{BTreeMap, HashMap};

    use chrono::NaiveDate;
    use serde::Deserialize;

    use crate::models::{DailyReadings, Location, Variable};

    /// Value NASA POWER writes where it has no data
    pub const DEFAULT_FILL_VALUE: f64 = -999.0;

    /// GeoJSON feature returned by `temporal/daily/point`
    #[derive(Debug, Default, Deserialize)]
    pub struct PowerResponse {
        #[serde(default)]
        pub geometry: Option<Geometry>,
        #[serde(default)]
        pub header: Header,
        #[serde(default)]
        pub properties: Properties,
    }

    /// Point geometry; coordinates are `[longitude, latitude, elevation]`
    #[derive(Debug, Default, Deserialize)]
    pub struct Geometry {
        #[serde(default)]
        pub coordinates: Vec<f64>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Header {
        #[serde(default = "default_fill_value")]
        pub fill_value: f64,
    }

    impl Default for Header {
        fn default() -> Self {
            Self {
                fill_value: DEFAULT_FILL_VALUE,
            }
        }
    }

    fn default_fill_value() -> f64 {
        DEFAULT_FILL_VALUE
    }

    /// Parameter series keyed by `YYYYMMDD`
    #[derive(Debug, Default, Deserialize)]
    pub struct Properties {
        #[serde(default)]
        pub parameter: HashMap<String, BTreeMap<String, Option<f64>>>,
    }

    /// POWER parameter code a variable is read from
    #[must_use]
    pub fn parameter_code(variable: Variable) -> &'static str {
        match variable {
            Variable::Temp => "T2M",
            Variable::TempMax => "T2M_MAX",
            Variable::TempMin => "T2M_MIN",
            Variable::WindSpeed => "WS2M",
            Variable::Humidity => "RH2M",
            Variable::SolarRadiation => "ALLSKY_SFC_SW_DWN",
        }
    }

    impl PowerResponse {
        /// Point the data was requested for
        #[must_use]
        pub fn location(&self) -> Option<Location> {
            match self.geometry.as_ref()?.coordinates.as_slice() {
                [lon, lat, ..] => {
                    let location = Location::from_coordinates(*lat, *lon);
                    location.is_valid().then_some(location)
                }
                _ => None,
            }
        }

        /// Readings for `date`; `None` when the document has nothing for it.
        /// Fill values count as missing.
        #[must_use]
        pub fn readings(&self, date: NaiveDate) -> Option<DailyReadings> {
            let key = date.format("%Y%m%d").to_string();
            let fill = self.header.fill_value;

            let mut readings = DailyReadings {
                date: Some(date),
                ..Default::default()
            };
            for variable in Variable::ALL {
                let value = self
                    .properties
                    .parameter
                    .get(parameter_code(variable))
                    .and_then(|series| series.get(&key).copied().flatten())
                    .filter(|value| (value - fill).abs() > f64::EPSILON);
                readings.set(variable, value);
            }

            (!readings.is_empty()).then_some(readings)
        }
    }
}
