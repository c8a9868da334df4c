use super::subjects::SubjectSet;
use super::task::{Task, TaskDraft, TaskError};
use chrono::NaiveDateTime;
use log::debug;
use uuid::Uuid;

/// A rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: Uuid,
    pub cells: [String; 5],
    pub tag: String,
}

/// In-memory ordered task list plus the subject autocomplete set
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    subjects: SubjectSet,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Unknown subjects are inserted into the sorted subject set.
    pub fn add(&mut self, draft: &TaskDraft, now: NaiveDateTime) -> Result<Uuid, TaskError> {
        let task = Task::from_draft(draft, now)?;
        let id = task.id;
        if self.subjects.insert(&task.subject) {
            debug!("new subject: {}", task.subject);
        }
        self.tasks.push(task);
        Ok(id)
    }

    /// Replace a task in place, keeping its id and position
    pub fn edit(&mut self, id: Uuid, draft: &TaskDraft, now: NaiveDateTime) -> Result<(), TaskError> {
        let position = self.position(id).ok_or(TaskError::NotFound(id))?;
        self.tasks[position] = Task::with_id(id, draft, now)?;
        Ok(())
    }

    /// Remove a task; later positions shift up by one
    pub fn delete(&mut self, id: Uuid) -> Result<Task, TaskError> {
        let position = self.position(id).ok_or(TaskError::NotFound(id))?;
        Ok(self.tasks.remove(position))
    }

    /// Recompute the subject set from the current tasks
    pub fn refresh(&mut self) {
        self.subjects
            .rebuild(self.tasks.iter().map(|task| task.subject.as_str()));
    }

    /// Table rows in storage order
    pub fn rows(&self) -> Vec<TaskRow> {
        self.tasks()
            .iter()
            .map(|task| TaskRow {
                id: task.id,
                cells: task.cells(),
                tag: task.status.tag(),
            })
            .collect()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    pub fn id_at(&self, position: usize) -> Option<Uuid> {
        self.tasks.get(position).map(|task| task.id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn subjects(&self) -> &SubjectSet {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::DaysLeft;
    use crate::domain::TaskStatus;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    fn draft(subject: &str, assignment: &str, due_on: &str) -> TaskDraft {
        TaskDraft::new(subject, assignment, TaskStatus::NotStarted, due_on)
    }

    fn create_test_store() -> TaskStore {
        let mut store = TaskStore::new();
        store.add(&draft("Math", "HW1", "2026-10-25"), now()).unwrap();
        store.add(&draft("Physics", "Lab", "2026-10-20"), now()).unwrap();
        store.add(&draft("Art", "Sketch", "2026-10-18"), now()).unwrap();
        store
    }

    #[test]
    fn test_add_appends_in_order() {
        let store = create_test_store();
        let assignments: Vec<&str> = store.tasks().iter().map(|t| t.assignment.as_str()).collect();
        assert_eq!(assignments, vec!["HW1", "Lab", "Sketch"]);
        assert_eq!(store.tasks()[2].days_left, DaysLeft::Overdue(1));
    }

    #[test]
    fn test_refresh_keeps_days_left_frozen() {
        let mut store = create_test_store();
        let before_tasks = store.tasks().to_vec();
        let before_rows = store.rows();

        store.refresh();

        assert_eq!(store.tasks(), before_tasks.as_slice());
        let rows = store.rows();
        assert_eq!(rows, before_rows);
        assert_eq!(rows[0].cells[4], "6 days");
        assert_eq!(rows[2].cells[4], "overdue by 1 days");
    }

    #[test]
    fn test_add_rejects_bad_date() {
        let mut store = create_test_store();
        let before = store.tasks().to_vec();
        let err = store.add(&draft("Bio", "Essay", "next week"), now()).unwrap_err();
        assert_eq!(err, TaskError::InvalidDueDate { input: "next week".to_string() });
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.subjects().as_slice(), ["Art", "Math", "Physics"]);
    }

    #[test]
    fn test_add_then_delete_restores_list() {
        let mut store = create_test_store();
        let before = store.tasks().to_vec();

        let id = store.add(&draft("Bio", "Essay", "2026-11-01"), now()).unwrap();
        assert_eq!(store.position(id), Some(3));
        store.delete(id).unwrap();

        assert_eq!(store.tasks(), before.as_slice());
    }

    #[test]
    fn test_edit_replaces_only_target() {
        let mut store = create_test_store();
        let before = store.tasks().to_vec();
        let id = store.id_at(1).unwrap();

        let edited = TaskDraft::new("Physics", "Lab v2", TaskStatus::Done, "2026-10-30");
        store.edit(id, &edited, now()).unwrap();

        assert_eq!(store.len(), 3);
        assert_eq!(store.tasks()[0], before[0]);
        assert_eq!(store.tasks()[2], before[2]);

        let task = store.get(id).unwrap();
        assert_eq!(task.assignment, "Lab v2");
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.days_left, DaysLeft::Remaining(11));
        assert_eq!(store.position(id), Some(1));
    }

    #[test]
    fn test_edit_with_bad_date_keeps_task() {
        let mut store = create_test_store();
        let id = store.id_at(0).unwrap();
        let before = store.get(id).cloned();

        assert!(store.edit(id, &draft("Math", "HW1", "2026/10/30"), now()).is_err());
        assert_eq!(store.get(id).cloned(), before);
    }

    #[test]
    fn test_unknown_id() {
        let mut store = create_test_store();
        let missing = Uuid::new_v4();
        assert_eq!(store.delete(missing), Err(TaskError::NotFound(missing)));
        assert_eq!(
            store.edit(missing, &draft("Math", "HW1", "2026-10-30"), now()),
            Err(TaskError::NotFound(missing))
        );
    }

    #[test]
    fn test_delete_shifts_positions() {
        let mut store = create_test_store();
        let first = store.id_at(0).unwrap();
        let last = store.id_at(2).unwrap();

        store.delete(first).unwrap();
        assert_eq!(store.position(last), Some(1));
        assert_eq!(store.id_at(2), None);
    }

    #[test]
    fn test_subject_set_matches_tasks() {
        let mut store = TaskStore::new();
        for subject in ["Math", "Bio", "Math", "Art", "Bio"] {
            store.add(&draft(subject, "x", "2026-10-25"), now()).unwrap();
        }
        assert_eq!(store.subjects().as_slice(), ["Art", "Bio", "Math"]);

        // Edits don't touch the set until the next refresh
        let id = store.id_at(3).unwrap();
        store.edit(id, &draft("Chemistry", "x", "2026-10-25"), now()).unwrap();
        assert_eq!(store.subjects().as_slice(), ["Art", "Bio", "Math"]);

        store.refresh();
        assert_eq!(store.subjects().as_slice(), ["Bio", "Chemistry", "Math"]);
    }

    #[test]
    fn test_rows_carry_tags() {
        let mut store = TaskStore::new();
        for status in TaskStatus::all() {
            store
                .add(&TaskDraft::new("Math", status.label(), *status, "2026-10-25"), now())
                .unwrap();
        }
        let tags: Vec<String> = store.rows().into_iter().map(|row| row.tag).collect();
        assert_eq!(tags, vec!["not_started", "in_progress", "done", "quiz_exam"]);
        assert_eq!(store.rows()[0].cells[4], "6 days");
    }
}
