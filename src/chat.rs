//! Rule-based weather chat
//!
//! Understands a handful of fixed message shapes: greetings, a request for
//! help, and weather questions of the form "Weather in <city> <when>". The
//! date phrase and the city are pulled out of free text with plain keyword
//! rules; nothing here talks to a geocoder or a weather service.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::models::{Forecast, ForecastDay};

pub const WELCOME_MESSAGE: &str = "Hi! I'm a rule-based Weather AI. I only understand certain commands. \
You can ask me things like: 'Weather in Paris tomorrow', 'Weather in Tokyo last Monday', \
or 'Weather in New York next week'.";

pub const GREETING_REPLY: &str =
    "Hello! I'm a rule-based Weather AI. Ask me about the weather anywhere with a date.";

pub const HELP_REPLY: &str = "I'm a rule-based AI that only understands specific commands like:\n\
- 'Weather in City today'\n\
- 'Weather in City tomorrow'\n\
- 'Weather in City next Monday'\n\
- 'Weather in City next week'";

pub const MISSING_CITY_REPLY: &str = "Please specify a valid city or country. \
(Remember: I'm a rule-based AI and only understand weather queries in the format 'Weather in City [date]'.)";

const GREETINGS: [&str; 3] = ["hi", "hello", "hey"];

/// Weekdays in the order they are matched against a message
const WEEKDAYS: [(&str, Weekday); 7] = [
    ("sunday", Weekday::Sun),
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
];

/// Words removed from a message before what remains is taken as the city
const DATE_WORDS: [&str; 15] = [
    "today", "tomorrow", "tommorow", "tomorow", "yesterday", "monday", "tuesday", "wednesday",
    "thursday", "friday", "saturday", "sunday", "next", "last", "week",
];

/// When a weather question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "date", rename_all = "snake_case")]
pub enum DateQuery {
    Day(NaiveDate),
    NextWeek,
    LastWeek,
}

/// What a chat message asks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum ChatIntent {
    Greeting,
    Help,
    MissingCity,
    Weather { city: String, when: DateQuery },
}

/// First occurrence of `weekday` strictly after `from`
fn next_weekday(from: NaiveDate, weekday: Weekday) -> NaiveDate {
    let current = i64::from(from.weekday().num_days_from_sunday());
    let target = i64::from(weekday.num_days_from_sunday());
    let ahead = (target - current).rem_euclid(7);
    from + Duration::days(if ahead == 0 { 7 } else { ahead })
}

/// Work out which day (or week) a message refers to. Falls back to today.
#[must_use]
pub fn parse_date_phrase(text: &str, today: NaiveDate) -> DateQuery {
    let text = text.to_lowercase();

    if text.contains("today") {
        return DateQuery::Day(today);
    }
    if ["tomorrow", "tommorow", "tomorow"]
        .iter()
        .any(|w| text.contains(w))
    {
        return DateQuery::Day(today + Duration::days(1));
    }
    if text.contains("yesterday") {
        return DateQuery::Day(today - Duration::days(1));
    }

    for (name, weekday) in WEEKDAYS {
        if text.contains(&format!("next {name}")) {
            return DateQuery::Day(next_weekday(today + Duration::days(7), weekday));
        }
        if text.contains(&format!("last {name}")) {
            return DateQuery::Day(next_weekday(today - Duration::days(7), weekday));
        }
        if text.contains(name) {
            return DateQuery::Day(next_weekday(today, weekday));
        }
    }

    if text.contains("next week") {
        return DateQuery::NextWeek;
    }
    if text.contains("last week") {
        return DateQuery::LastWeek;
    }

    DateQuery::Day(today)
}

/// Strip date words and the "weather in" lead-in; what is left is the city
#[must_use]
pub fn extract_city(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept: Vec<&str> = lowered
        .split_whitespace()
        .filter(|word| {
            let bare = word.trim_matches(|c: char| !c.is_alphanumeric());
            !DATE_WORDS.contains(&bare)
        })
        .collect();

    kept.join(" ")
        .replace("historical weather in", "")
        .replace("weather in", "")
        .trim()
        .to_string()
}

/// Classify a chat message. Blank messages yield `None`.
#[must_use]
pub fn interpret(message: &str, today: NaiveDate) -> Option<ChatIntent> {
    let text = message.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if GREETINGS.contains(&text.as_str()) {
        return Some(ChatIntent::Greeting);
    }
    if text.contains("help") {
        return Some(ChatIntent::Help);
    }

    let when = parse_date_phrase(&text, today);
    let city = extract_city(&text);
    debug!("Chat query: city={:?} when={:?}", city, when);

    if city.is_empty() {
        Some(ChatIntent::MissingCity)
    } else {
        Some(ChatIntent::Weather { city, when })
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Date in long form, e.g. "October 21st, 2026"
#[must_use]
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}

/// One-day summary line
#[must_use]
pub fn day_message(location_name: &str, day: &ForecastDay) -> String {
    format!(
        "Weather in {location_name} on {}: Max Temp: {}°C, Min Temp: {}°C, Precipitation: {}mm",
        format_long_date(day.date),
        day.max_temp,
        day.min_temp,
        day.sample.precip
    )
}

/// Compact line used when listing a week
#[must_use]
pub fn week_line(day: &ForecastDay) -> String {
    format!(
        "{}: Max: {}°C, Min: {}°C, Precip: {}mm",
        day.date.format("%Y-%m-%d"),
        day.max_temp,
        day.min_temp,
        day.sample.precip
    )
}

fn no_data(location_name: &str) -> String {
    format!("No weather data available for {location_name}.")
}

impl ChatIntent {
    /// Bot replies for this intent, answered from an already-fetched forecast
    #[must_use]
    pub fn reply(&self, forecast: Option<&Forecast>, today: NaiveDate) -> Vec<String> {
        match self {
            ChatIntent::Greeting => vec![GREETING_REPLY.to_string()],
            ChatIntent::Help => vec![HELP_REPLY.to_string()],
            ChatIntent::MissingCity => vec![MISSING_CITY_REPLY.to_string()],
            ChatIntent::Weather { city, when } => {
                let Some(forecast) = forecast else {
                    return vec![no_data(city)];
                };
                let name = forecast
                    .location
                    .as_ref()
                    .map_or_else(|| city.clone(), |l| l.display_name());

                let lines: Vec<String> = match when {
                    DateQuery::Day(date) => forecast
                        .day_or_first(*date)
                        .map(|day| day_message(&name, day))
                        .into_iter()
                        .collect(),
                    // a daily forecast only looks ahead, so both week phrases
                    // list the coming seven days
                    DateQuery::NextWeek | DateQuery::LastWeek => forecast
                        .next_week(today)
                        .into_iter()
                        .map(week_line)
                        .collect(),
                };

                if lines.is_empty() {
                    vec![no_data(&name)]
                } else {
                    lines
                }
            }
        }
    }
}
