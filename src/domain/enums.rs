/// Progress status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    NotStarted,
    InProgress,
    Done,
    QuizExam,
}

impl TaskStatus {
    /// Display label shown in the table and the form
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
            Self::QuizExam => "Quiz/Exam",
        }
    }

    /// Row colour tag derived from the label
    pub fn tag(&self) -> String {
        status_tag(self.label())
    }

    /// Next status in picker order (wraps)
    pub fn next(&self) -> Self {
        match self {
            Self::NotStarted => Self::InProgress,
            Self::InProgress => Self::Done,
            Self::Done => Self::QuizExam,
            Self::QuizExam => Self::NotStarted,
        }
    }

    /// Previous status in picker order (wraps)
    pub fn prev(&self) -> Self {
        match self {
            Self::NotStarted => Self::QuizExam,
            Self::InProgress => Self::NotStarted,
            Self::Done => Self::InProgress,
            Self::QuizExam => Self::Done,
        }
    }

    /// Get all statuses in picker order
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::NotStarted,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::QuizExam,
        ]
    }
}

/// Lowercase a status label and turn separators into underscores.
/// "In Progress" -> "in_progress", "Quiz/Exam" -> "quiz_exam"
pub fn status_tag(label: &str) -> String {
    label.to_lowercase().replace([' ', '/'], "_")
}

/// Named countdown durations of the pomodoro timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    /// Machine name used in logs
    pub fn key(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "pomodoro",
            TimerMode::ShortBreak => "short_break",
            TimerMode::LongBreak => "long_break",
        }
    }

    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            TimerMode::Pomodoro => "Pomodoro",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    /// Built-in duration in seconds
    pub fn default_secs(&self) -> i64 {
        match self {
            TimerMode::Pomodoro => 25 * 60,
            TimerMode::ShortBreak => 5 * 60,
            TimerMode::LongBreak => 10 * 60,
        }
    }

    /// Get all modes in button order
    pub fn all() -> &'static [TimerMode] {
        &[TimerMode::Pomodoro, TimerMode::ShortBreak, TimerMode::LongBreak]
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    Error, // Blocking message, dismissed with Enter/Esc
}

/// Field focus inside the add/edit form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Subject,
    Assignment,
    Status,
    DueOn,
}

impl FormField {
    pub fn next(&self) -> Self {
        match self {
            Self::Subject => Self::Assignment,
            Self::Assignment => Self::Status,
            Self::Status => Self::DueOn,
            Self::DueOn => Self::Subject,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Subject => Self::DueOn,
            Self::Assignment => Self::Subject,
            Self::Status => Self::Assignment,
            Self::DueOn => Self::Status,
        }
    }
}
