use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::error::ApiError;
use crate::models::{ClassDraft, Color, Day, truncate_to_minute};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Subject,
    Teacher,
    Room,
    Days,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Subject => "subject",
            Field::Teacher => "teacher",
            Field::Room => "room",
            Field::Days => "days",
        })
    }
}

/// One failed constraint on a submitted class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{0} is required")]
    MissingField(Field),
    #[error("{0} is not one of the scheduled days")]
    DayNotAllowed(Day),
    #[error("start time {} must be before end time {}", .start.format("%H:%M"), .end.format("%H:%M"))]
    TimeOrder { start: NaiveTime, end: NaiveTime },
}

/// A draft that passed validation, with text trimmed and days deduplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidClass {
    pub subject: String,
    pub teacher: Option<String>,
    pub room: Option<String>,
    pub days: Vec<Day>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct DraftRules<'a> {
    pub allowed_days: &'a [Day],
    pub require_details: bool,
}

fn clean(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_draft(draft: &ClassDraft, rules: &DraftRules<'_>) -> Result<ValidClass, Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let subject = clean(Some(draft.subject.as_str()));
    if subject.is_none() {
        issues.push(ValidationIssue::MissingField(Field::Subject));
    }
    let teacher = clean(draft.teacher.as_deref());
    let room = clean(draft.room.as_deref());
    if rules.require_details {
        if teacher.is_none() {
            issues.push(ValidationIssue::MissingField(Field::Teacher));
        }
        if room.is_none() {
            issues.push(ValidationIssue::MissingField(Field::Room));
        }
    }

    let mut days: Vec<Day> = Vec::with_capacity(draft.days.len());
    for day in &draft.days {
        if days.contains(day) {
            continue;
        }
        if !rules.allowed_days.contains(day) {
            issues.push(ValidationIssue::DayNotAllowed(*day));
        }
        days.push(*day);
    }
    if days.is_empty() {
        issues.push(ValidationIssue::MissingField(Field::Days));
    }

    let start_time = truncate_to_minute(draft.start_time);
    let end_time = truncate_to_minute(draft.end_time);
    if start_time >= end_time {
        issues.push(ValidationIssue::TimeOrder {
            start: start_time,
            end: end_time,
        });
    }

    match subject {
        Some(subject) if issues.is_empty() => Ok(ValidClass {
            subject,
            teacher,
            room,
            days,
            start_time,
            end_time,
            color: draft.color.unwrap_or_default(),
        }),
        _ => Err(issues),
    }
}

pub fn validate_week_start(value: NaiveDate) -> Result<NaiveDate, ApiError> {
    if value.weekday() == Weekday::Mon {
        Ok(value)
    } else {
        Err(ApiError::BadRequest("week must start on a Monday".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ClassDraft {
        ClassDraft {
            subject: "Math".to_string(),
            teacher: Some("Mr. Smith".to_string()),
            room: Some("Room 101".to_string()),
            days: vec![Day::Monday],
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            color: None,
        }
    }

    fn strict() -> DraftRules<'static> {
        DraftRules {
            allowed_days: &Day::WORKWEEK,
            require_details: true,
        }
    }

    #[test]
    fn test_valid_draft_is_normalized() {
        let mut input = draft();
        input.subject = "  Math ".to_string();
        input.days = vec![Day::Monday, Day::Wednesday, Day::Monday];
        let valid = validate_draft(&input, &strict()).unwrap();
        assert_eq!(valid.subject, "Math");
        assert_eq!(valid.days, vec![Day::Monday, Day::Wednesday]);
        assert_eq!(valid.color, Color::Blue);
    }

    #[test]
    fn test_reports_every_issue() {
        let mut input = draft();
        input.subject = "   ".to_string();
        input.room = None;
        input.days = vec![Day::Sunday];
        input.end_time = input.start_time;
        let issues = validate_draft(&input, &strict()).unwrap_err();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingField(Field::Subject),
                ValidationIssue::MissingField(Field::Room),
                ValidationIssue::DayNotAllowed(Day::Sunday),
                ValidationIssue::TimeOrder {
                    start: input.start_time,
                    end: input.end_time,
                },
            ]
        );
    }

    #[test]
    fn test_empty_days_rejected() {
        let mut input = draft();
        input.days.clear();
        let issues = validate_draft(&input, &strict()).unwrap_err();
        assert_eq!(issues, vec![ValidationIssue::MissingField(Field::Days)]);
    }

    #[test]
    fn test_details_optional_when_relaxed() {
        let mut input = draft();
        input.teacher = Some(" ".to_string());
        input.room = None;
        let rules = DraftRules {
            allowed_days: &Day::WORKWEEK,
            require_details: false,
        };
        let valid = validate_draft(&input, &rules).unwrap();
        assert_eq!(valid.teacher, None);
        assert_eq!(valid.room, None);
    }

    #[test]
    fn test_seconds_are_dropped_before_ordering() {
        let mut input = draft();
        input.start_time = NaiveTime::from_hms_opt(9, 0, 10).unwrap();
        input.end_time = NaiveTime::from_hms_opt(9, 0, 50).unwrap();
        let issues = validate_draft(&input, &strict()).unwrap_err();
        assert!(matches!(issues.as_slice(), [ValidationIssue::TimeOrder { .. }]));

        input.end_time = NaiveTime::from_hms_opt(10, 15, 59).unwrap();
        let valid = validate_draft(&input, &strict()).unwrap();
        assert_eq!(valid.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(valid.end_time, NaiveTime::from_hms_opt(10, 15, 0).unwrap());
    }

    #[test]
    fn test_time_order_message() {
        let issue = ValidationIssue::TimeOrder {
            start: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            end: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        };
        assert_eq!(issue.to_string(), "start time 10:00 must be before end time 09:00");
    }

    #[test]
    fn test_validate_week_start() {
        let monday = NaiveDate::from_ymd_opt(2025, 11, 24).unwrap();
        assert!(validate_week_start(monday).is_ok());
        assert!(validate_week_start(monday.succ_opt().unwrap()).is_err());
    }
}
