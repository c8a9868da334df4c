pub mod enums;
pub mod store;
pub mod subjects;
pub mod task;

pub use enums::{FormField, TaskStatus, TimerMode, UiMode};
pub use store::{TaskRow, TaskStore};
pub use task::{TaskDraft, TaskError};
