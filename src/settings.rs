use config::{Config, ConfigError, Environment};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::layout::LayoutConfig;
use crate::models::{Day, parse_time};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub enable_swagger: bool,
    pub port: u16,
    #[serde(deserialize_with = "trimmed_days")]
    pub days: Vec<Day>,
    pub range_start: String,
    pub range_end: String,
    pub unit_minutes: u32,
    pub unit_pixels: f64,
    pub require_details: bool,
    #[serde(default)]
    pub max_sessions: Option<usize>,
}

pub const DEFAULT_MAX_SESSIONS: usize = 100;

/// Accepts `Monday, Tuesday` as well as `Monday,Tuesday`.
fn trimmed_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Day>, D::Error> {
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|name| {
            let name = name.trim();
            Day::from_name(name).ok_or_else(|| D::Error::custom(format!("unknown day: {name}")))
        })
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            enable_swagger: true,
            port: 8080,
            days: Day::WORKWEEK.to_vec(),
            range_start: "08:00".to_string(),
            range_end: "18:00".to_string(),
            unit_minutes: 30,
            unit_pixels: 48.0,
            require_details: true,
            max_sessions: Some(DEFAULT_MAX_SESSIONS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let config = Config::builder()
            // Load from environment variables with APP_ prefix, e.g. APP_RANGE_START=07:30
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("days"),
            )
            .set_default("debug", false)?
            .set_default("enable_swagger", true)?
            .set_default("port", 8080)?
            .set_default("days", Day::WORKWEEK.map(|d| d.as_str()).to_vec())?
            .set_default("range_start", "08:00")?
            .set_default("range_end", "18:00")?
            .set_default("unit_minutes", 30)?
            .set_default("unit_pixels", 48.0)?
            .set_default("require_details", true)?
            .set_default("max_sessions", DEFAULT_MAX_SESSIONS as i64)?
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.layout_config()?;
        Ok(settings)
    }

    pub fn layout_config(&self) -> Result<LayoutConfig, ConfigError> {
        let range_start = parse_time(&self.range_start)
            .map_err(|err| ConfigError::Message(format!("range_start: {err}")))?;
        let range_end = parse_time(&self.range_end)
            .map_err(|err| ConfigError::Message(format!("range_end: {err}")))?;
        LayoutConfig::new(
            self.days.clone(),
            range_start,
            range_end,
            self.unit_minutes,
            self.unit_pixels,
        )
        .map_err(|err| ConfigError::Message(err.to_string()))
    }
}
