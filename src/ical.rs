use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::ClassEntry;

#[derive(Clone, Default)]
pub struct ICalExporter;

impl ICalExporter {
    pub fn new() -> Self {
        Self
    }

    /// Exports every (class, day) pair as a weekly recurring event, first occurrence in
    /// the week starting at `week_start`.
    pub fn generate(&self, classes: &[ClassEntry], week_start: NaiveDate) -> Vec<u8> {
        if classes.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name("Weekly Class Schedule");

        for item in classes {
            for day in &item.days {
                let offset = i64::from(day.weekday().num_days_from_monday());
                let date = week_start + Duration::days(offset);
                let start = NaiveDateTime::new(date, item.start_time);
                let end = NaiveDateTime::new(date, item.end_time);

                let mut event = Event::new();
                event.summary(&item.subject);
                event.starts(start);
                event.ends(end);
                event.add_property("RRULE", "FREQ=WEEKLY");
                if let Some(room) = &item.room {
                    event.location(room);
                }
                event.description(&format!(
                    "Teacher: {}\nRoom: {}\nColor: {}",
                    item.teacher.as_deref().unwrap_or("-"),
                    item.room.as_deref().unwrap_or("-"),
                    item.color.name()
                ));
                event.uid(&format!(
                    "{}-{}-class-scheduler",
                    item.id,
                    day.as_str().to_lowercase()
                ));
                calendar.push(event);
            }
        }

        calendar.to_string().into_bytes()
    }
}

/// Monday of the week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}
