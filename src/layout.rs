use chrono::NaiveTime;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{ClassEntry, Day, hhmm, minutes_since_midnight};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("class {entry_id} is scheduled on {day}, which is not a configured day")]
    UnknownDay { entry_id: Uuid, day: Day },
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LayoutConfig {
    days: Vec<Day>,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "08:00")]
    range_start: NaiveTime,
    #[serde(with = "hhmm")]
    #[schema(value_type = String, example = "18:00")]
    range_end: NaiveTime,
    #[schema(example = 30)]
    unit_minutes: u32,
    #[schema(example = 48.0)]
    unit_pixels: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            days: Day::WORKWEEK.to_vec(),
            range_start: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or(NaiveTime::MIN),
            range_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            unit_minutes: 30,
            unit_pixels: 48.0,
        }
    }
}

impl LayoutConfig {
    pub fn new(
        days: Vec<Day>,
        range_start: NaiveTime,
        range_end: NaiveTime,
        unit_minutes: u32,
        unit_pixels: f64,
    ) -> Result<Self, LayoutError> {
        if days.is_empty() {
            return Err(LayoutError::InvalidConfig("at least one day is required".into()));
        }
        if let Some(dup) = days
            .iter()
            .enumerate()
            .find_map(|(i, day)| days[..i].contains(day).then_some(day))
        {
            return Err(LayoutError::InvalidConfig(format!("{dup} is listed twice")));
        }
        if range_start >= range_end {
            return Err(LayoutError::InvalidConfig(
                "range start must be before range end".into(),
            ));
        }
        if unit_minutes == 0 {
            return Err(LayoutError::InvalidConfig("unit minutes must be positive".into()));
        }
        if !(unit_pixels.is_finite() && unit_pixels > 0.0) {
            return Err(LayoutError::InvalidConfig("unit pixels must be positive".into()));
        }
        Ok(Self {
            days,
            range_start,
            range_end,
            unit_minutes,
            unit_pixels,
        })
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn range_start(&self) -> NaiveTime {
        self.range_start
    }

    pub fn range_end(&self) -> NaiveTime {
        self.range_end
    }

    pub fn day_index(&self, day: Day) -> Option<usize> {
        self.days.iter().position(|d| *d == day)
    }

    fn pixels_per_minute(&self) -> f64 {
        self.unit_pixels / f64::from(self.unit_minutes)
    }

    pub fn grid_height(&self) -> f64 {
        let minutes = minutes_since_midnight(self.range_end) - minutes_since_midnight(self.range_start);
        minutes as f64 * self.pixels_per_minute()
    }

    /// Row labels of the grid, one per unit, starting at the range start.
    pub fn time_slots(&self) -> Vec<TimeSlot> {
        let start = minutes_since_midnight(self.range_start);
        let end = minutes_since_midnight(self.range_end);
        (start..end)
            .step_by(self.unit_minutes as usize)
            .map(|minute| TimeSlot {
                label: format!("{:02}:{:02}", minute / 60, minute % 60),
                offset: (minute - start) as f64 * self.pixels_per_minute(),
                on_the_hour: minute % 60 == 0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TimeSlot {
    #[schema(example = "08:30")]
    pub label: String,
    pub offset: f64,
    pub on_the_hour: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Placement {
    pub entry_id: Uuid,
    pub day: Day,
    pub day_index: usize,
    pub vertical_offset: f64,
    pub height: f64,
    /// Set when the class starts before or ends after the visible range.
    pub out_of_range: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Layout {
    pub days: Vec<Day>,
    pub slots: Vec<TimeSlot>,
    pub grid_height: f64,
    pub placements: Vec<Placement>,
}

/// One placement per (class, day), classes in store order and days in grid order.
/// Offset and height are linear in minutes from the range start. Classes overlapping on
/// the same day get overlapping bands; they are not split into sub-columns.
pub fn compute_placements(
    entries: &[ClassEntry],
    config: &LayoutConfig,
) -> Result<Vec<Placement>, LayoutError> {
    let range_start = minutes_since_midnight(config.range_start);
    let range_end = minutes_since_midnight(config.range_end);
    let scale = config.pixels_per_minute();

    let mut placements = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut columns = entry
            .days
            .iter()
            .map(|day| {
                config
                    .day_index(*day)
                    .map(|index| (index, *day))
                    .ok_or(LayoutError::UnknownDay {
                        entry_id: entry.id,
                        day: *day,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        columns.sort_by_key(|(index, _)| *index);

        let start = minutes_since_midnight(entry.start_time);
        let end = minutes_since_midnight(entry.end_time);
        let out_of_range = start < range_start || end > range_end;
        if out_of_range {
            debug!(id = %entry.id, "class lies outside the visible range");
        }

        for (day_index, day) in columns {
            placements.push(Placement {
                entry_id: entry.id,
                day,
                day_index,
                vertical_offset: (start - range_start) as f64 * scale,
                height: entry.duration_minutes() as f64 * scale,
                out_of_range,
            });
        }
    }
    Ok(placements)
}

pub fn build_layout(entries: &[ClassEntry], config: &LayoutConfig) -> Result<Layout, LayoutError> {
    Ok(Layout {
        days: config.days.clone(),
        slots: config.time_slots(),
        grid_height: config.grid_height(),
        placements: compute_placements(entries, config)?,
    })
}
