use std::fmt;

use chrono::{NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    pub const WORKWEEK: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        }
    }

    /// Case-insensitive lookup by full English name.
    pub fn from_name(name: &str) -> Option<Day> {
        Day::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(name))
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            Day::Monday => Weekday::Mon,
            Day::Tuesday => Weekday::Tue,
            Day::Wednesday => Weekday::Wed,
            Day::Thursday => Weekday::Thu,
            Day::Friday => Weekday::Fri,
            Day::Saturday => Weekday::Sat,
            Day::Sunday => Weekday::Sun,
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Palette a class block can be painted with.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum Color {
    #[default]
    Blue,
    Purple,
    Pink,
    Green,
    Orange,
    Red,
    Teal,
    Indigo,
}

impl Color {
    pub const PALETTE: [Color; 8] = [
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Green,
        Color::Orange,
        Color::Red,
        Color::Teal,
        Color::Indigo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Blue => "Blue",
            Color::Purple => "Purple",
            Color::Pink => "Pink",
            Color::Green => "Green",
            Color::Orange => "Orange",
            Color::Red => "Red",
            Color::Teal => "Teal",
            Color::Indigo => "Indigo",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            Color::Blue => "#3B82F6",
            Color::Purple => "#8B5CF6",
            Color::Pink => "#EC4899",
            Color::Green => "#10B981",
            Color::Orange => "#F59E0B",
            Color::Red => "#EF4444",
            Color::Teal => "#14B8A6",
            Color::Indigo => "#6366F1",
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Swatch {
    pub name: Color,
    #[schema(example = "#3B82F6")]
    pub value: String,
}

impl From<Color> for Swatch {
    fn from(color: Color) -> Self {
        Self {
            name: color,
            value: color.hex().to_string(),
        }
    }
}

/// A scheduled class as held by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassEntry {
    pub id: Uuid,
    pub subject: String,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub days: Vec<Day>,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub end_time: NaiveTime,
    pub color: Color,
}

impl ClassEntry {
    pub fn duration_minutes(&self) -> i64 {
        minutes_since_midnight(self.end_time) - minutes_since_midnight(self.start_time)
    }
}

/// Field values submitted for a create or an update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ClassDraft {
    #[schema(example = "Mathematics")]
    pub subject: String,
    #[serde(default)]
    #[schema(example = "Mr. Smith")]
    pub teacher: Option<String>,
    #[serde(default)]
    #[schema(example = "Room 101")]
    pub room: Option<String>,
    pub days: Vec<Day>,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "09:00")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "10:00")]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ScheduleSnapshot {
    pub revision: u64,
    pub classes: Vec<ClassEntry>,
}

pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

/// Parses `HH:MM` (or `HH:MM:SS`, seconds dropped).
pub fn parse_time(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
    let raw = raw.trim();
    let time = NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))?;
    Ok(truncate_to_minute(time))
}

pub fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_time(&raw).map_err(|err| D::Error::custom(format!("invalid time {raw:?}: {err}")))
    }
}
