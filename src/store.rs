use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::models::{ClassDraft, ClassEntry, Day, ScheduleSnapshot};
use crate::validation::{DraftRules, ValidClass, ValidationIssue, validate_draft};

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid class: {}", describe(.0))]
    Validation(Vec<ValidationIssue>),
    #[error("class {0} not found")]
    NotFound(Uuid),
}

fn describe(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// In-memory, insertion-ordered collection of classes for one editing session.
#[derive(Debug, Clone)]
pub struct ScheduleStore {
    entries: Vec<ClassEntry>,
    allowed_days: Vec<Day>,
    require_details: bool,
    revision: u64,
}

impl ScheduleStore {
    pub fn new(allowed_days: Vec<Day>, require_details: bool) -> Self {
        Self {
            entries: Vec::new(),
            allowed_days,
            require_details,
            revision: 0,
        }
    }

    fn validate(&self, draft: &ClassDraft) -> Result<ValidClass, ScheduleError> {
        let rules = DraftRules {
            allowed_days: &self.allowed_days,
            require_details: self.require_details,
        };
        validate_draft(draft, &rules).map_err(ScheduleError::Validation)
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }

    pub fn create(&mut self, draft: &ClassDraft) -> Result<Uuid, ScheduleError> {
        let valid = self.validate(draft)?;
        let id = self.fresh_id();
        self.entries.push(into_entry(id, valid));
        self.revision += 1;
        debug!(%id, revision = self.revision, "class created");
        Ok(id)
    }

    pub fn update(&mut self, id: Uuid, draft: &ClassDraft) -> Result<(), ScheduleError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(ScheduleError::NotFound(id))?;
        let valid = self.validate(draft)?;
        self.entries[index] = into_entry(id, valid);
        self.revision += 1;
        debug!(%id, revision = self.revision, "class updated");
        Ok(())
    }

    /// Returns whether an entry was removed. Unknown ids are ignored.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.revision += 1;
            debug!(%id, revision = self.revision, "class deleted");
        }
        removed
    }

    pub fn get(&self, id: Uuid) -> Option<&ClassEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn list(&self) -> &[ClassEntry] {
        &self.entries
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot {
            revision: self.revision,
            classes: self.entries.clone(),
        }
    }
}

fn into_entry(id: Uuid, valid: ValidClass) -> ClassEntry {
    ClassEntry {
        id,
        subject: valid.subject,
        teacher: valid.teacher,
        room: valid.room,
        days: valid.days,
        start_time: valid.start_time,
        end_time: valid.end_time,
        color: valid.color,
    }
}
