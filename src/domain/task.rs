use super::enums::TaskStatus;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Due dates are typed as YYYY-MM-DD
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// User-facing task errors, shown in the error modal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Invalid due date '{input}'. Use YYYY-MM-DD.")]
    InvalidDueDate { input: String },
    #[error("Please select a task to {action}.")]
    NoSelection { action: &'static str },
    #[error("Task {0} no longer exists.")]
    NotFound(Uuid),
}

/// Inclusive day count until a due date, frozen when the task is saved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaysLeft {
    Remaining(i64),
    Overdue(i64),
}

impl DaysLeft {
    /// Whole days from `now` until midnight starting `due_on`, floored, plus
    /// one for the current day.
    pub fn between(due_on: NaiveDate, now: NaiveDateTime) -> Self {
        let whole_days = due_on.signed_duration_since(now.date()).num_days();
        let into_today = i64::from(now.time().num_seconds_from_midnight());
        let seconds = whole_days * SECONDS_PER_DAY - into_today;
        let days = seconds.div_euclid(SECONDS_PER_DAY) + 1;

        if days < 0 {
            DaysLeft::Overdue(-days)
        } else {
            DaysLeft::Remaining(days)
        }
    }
}

impl fmt::Display for DaysLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysLeft::Remaining(days) => write!(f, "{} days", days),
            DaysLeft::Overdue(days) => write!(f, "overdue by {} days", days),
        }
    }
}

/// Raw form input for an add or edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub subject: String,
    pub assignment: String,
    pub status: TaskStatus,
    pub due_on: String,
}

impl TaskDraft {
    pub fn new(subject: &str, assignment: &str, status: TaskStatus, due_on: &str) -> Self {
        Self {
            subject: subject.to_string(),
            assignment: assignment.to_string(),
            status,
            due_on: due_on.to_string(),
        }
    }

    /// Parse the due date field
    pub fn parse_due_on(&self) -> Result<NaiveDate, TaskError> {
        let input = self.due_on.trim();
        NaiveDate::parse_from_str(input, DUE_DATE_FORMAT).map_err(|_| TaskError::InvalidDueDate {
            input: input.to_string(),
        })
    }
}

/// A single tracked assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Uuid,
    pub subject: String,
    pub assignment: String,
    pub status: TaskStatus,
    pub due_on: NaiveDate,
    pub days_left: DaysLeft,
}

impl Task {
    /// Build a new task from form input, deriving days-left from `now`
    pub fn from_draft(draft: &TaskDraft, now: NaiveDateTime) -> Result<Self, TaskError> {
        Self::with_id(Uuid::new_v4(), draft, now)
    }

    /// Same as `from_draft` but keeps an existing id (used by edit)
    pub fn with_id(id: Uuid, draft: &TaskDraft, now: NaiveDateTime) -> Result<Self, TaskError> {
        let due_on = draft.parse_due_on()?;
        Ok(Self {
            id,
            subject: draft.subject.clone(),
            assignment: draft.assignment.clone(),
            status: draft.status,
            due_on,
            days_left: DaysLeft::between(due_on, now),
        })
    }

    /// Form input that reproduces this task
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft {
            subject: self.subject.clone(),
            assignment: self.assignment.clone(),
            status: self.status,
            due_on: self.due_on.format(DUE_DATE_FORMAT).to_string(),
        }
    }

    /// Table cells: subject, assignment, status, due on, days left
    pub fn cells(&self) -> [String; 5] {
        [
            self.subject.clone(),
            self.assignment.clone(),
            self.status.label().to_string(),
            self.due_on.format(DUE_DATE_FORMAT).to_string(),
            self.days_left.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str, hour: u32) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, DUE_DATE_FORMAT)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DUE_DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_days_left_during_the_day() {
        let now = at("2026-10-19", 14);
        assert_eq!(DaysLeft::between(date("2026-10-18"), now), DaysLeft::Overdue(1));
        assert_eq!(DaysLeft::between(date("2026-10-19"), now), DaysLeft::Remaining(0));
        assert_eq!(DaysLeft::between(date("2026-10-20"), now), DaysLeft::Remaining(1));
        assert_eq!(DaysLeft::between(date("2026-10-29"), now), DaysLeft::Remaining(10));
        assert_eq!(DaysLeft::between(date("2026-10-09"), now), DaysLeft::Overdue(10));
    }

    #[test]
    fn test_days_left_at_midnight() {
        let now = at("2026-10-19", 0);
        assert_eq!(DaysLeft::between(date("2026-10-19"), now), DaysLeft::Remaining(1));
        assert_eq!(DaysLeft::between(date("2026-10-18"), now), DaysLeft::Remaining(0));
        assert_eq!(DaysLeft::between(date("2026-10-17"), now), DaysLeft::Overdue(1));
    }

    #[test]
    fn test_days_left_display() {
        assert_eq!(DaysLeft::Remaining(3).to_string(), "3 days");
        assert_eq!(DaysLeft::Remaining(0).to_string(), "0 days");
        assert_eq!(DaysLeft::Overdue(1).to_string(), "overdue by 1 days");
    }

    #[test]
    fn test_far_future_due_date() {
        let draft = TaskDraft::new("Math", "HW1", TaskStatus::NotStarted, "2099-01-01");
        let task = Task::from_draft(&draft, at("2026-10-19", 9)).unwrap();
        match task.days_left {
            DaysLeft::Remaining(days) => assert!(days > 26_000),
            other => panic!("expected remaining days, got {:?}", other),
        }
        assert!(task.days_left.to_string().ends_with(" days"));
        assert!(!task.days_left.to_string().starts_with("overdue"));
    }

    #[test]
    fn test_invalid_due_date() {
        let now = at("2026-10-19", 9);
        for input in ["", "tomorrow", "2026-13-01", "19/10/2026", "2026-02-30"] {
            let draft = TaskDraft::new("Math", "HW1", TaskStatus::NotStarted, input);
            assert_eq!(
                Task::from_draft(&draft, now),
                Err(TaskError::InvalidDueDate { input: input.to_string() })
            );
        }
    }

    #[test]
    fn test_due_date_is_trimmed() {
        let draft = TaskDraft::new("Math", "HW1", TaskStatus::Done, " 2026-10-25 ");
        assert_eq!(draft.parse_due_on(), Ok(date("2026-10-25")));
    }

    #[test]
    fn test_cells_and_draft() {
        let draft = TaskDraft::new("Physics", "Lab report", TaskStatus::QuizExam, "2026-10-21");
        let task = Task::from_draft(&draft, at("2026-10-19", 12)).unwrap();
        assert_eq!(
            task.cells(),
            [
                "Physics".to_string(),
                "Lab report".to_string(),
                "Quiz/Exam".to_string(),
                "2026-10-21".to_string(),
                "2 days".to_string(),
            ]
        );
        assert_eq!(task.to_draft(), draft);
    }

    #[test]
    fn test_error_messages() {
        let err = TaskError::NoSelection { action: "edit" };
        assert_eq!(err.to_string(), "Please select a task to edit.");
    }
}
