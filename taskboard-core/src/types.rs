use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Titles of the three columns every new board starts with.
pub const DEFAULT_COLUMNS: [(&str, ColumnType); 3] = [
    ("To Do", ColumnType::Todo),
    ("In Progress", ColumnType::InProgress),
    ("Done", ColumnType::Done),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" | "l" => Some(Priority::Low),
            "medium" | "med" | "m" => Some(Priority::Medium),
            "high" | "h" => Some(Priority::High),
            _ => None,
        }
    }
}

/// Semantic tag of a column. Several columns may share a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnType {
    Todo,
    InProgress,
    Done,
}

impl ColumnType {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Todo => "todo",
            ColumnType::InProgress => "in-progress",
            ColumnType::Done => "done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "todo" | "to-do" => Some(ColumnType::Todo),
            "in-progress" | "inprogress" | "doing" => Some(ColumnType::InProgress),
            "done" => Some(ColumnType::Done),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_by: String,
    /// Empty means unassigned.
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn is_assigned(&self) -> bool {
        !self.assigned_to.trim().is_empty()
    }

    /// Due before `today`. Column membership is not considered here.
    pub fn is_past_due(&self, today: NaiveDate) -> bool {
        self.due_date.map(|d| d < today).unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_index(&self, task_id: &str) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn column(&self, column_id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    pub(crate) fn column_mut(&mut self, column_id: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.id == column_id)
    }

    /// Total number of tasks across all columns.
    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// Locate a task anywhere on the board.
    pub fn find_task(&self, task_id: &str) -> Option<TaskLocation<'_>> {
        self.columns.iter().find_map(|column| {
            column.task_index(task_id).map(|index| TaskLocation {
                column_id: &column.id,
                index,
                task: &column.tasks[index],
            })
        })
    }
}

/// Where a task currently sits on its board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskLocation<'a> {
    pub column_id: &'a str,
    pub index: usize,
    pub task: &'a Task,
}

/// Fields for a task about to be created. Identity and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub created_by: String,
    pub assigned_to: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a task. `None` leaves a field untouched;
/// `due_date: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<NaiveDate>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the patch into `task`. `id` and `created_at` are never touched.
    /// Returns true if any field changed.
    pub fn apply(&self, task: &mut Task) -> bool {
        let before = task.clone();
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(created_by) = &self.created_by {
            task.created_by = created_by.clone();
        }
        if let Some(assigned_to) = &self.assigned_to {
            task.assigned_to = assigned_to.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        *task != before
    }
}

/// Per-column line of a board listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSummary {
    pub id: String,
    pub title: String,
    pub column_type: ColumnType,
    pub task_count: usize,
}

/// Board listing entry (board overview page).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub columns: Vec<ColumnSummary>,
    pub total_tasks: usize,
}

impl From<&Board> for BoardSummary {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id.clone(),
            title: board.title.clone(),
            description: board.description.clone(),
            created_at: board.created_at,
            columns: board
                .columns
                .iter()
                .map(|c| ColumnSummary {
                    id: c.id.clone(),
                    title: c.title.clone(),
                    column_type: c.column_type,
                    task_count: c.tasks.len(),
                })
                .collect(),
            total_tasks: board.task_count(),
        }
    }
}

/// Due dates are stored as `YYYY-MM-DD`, with the empty string meaning none.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(value: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => s.serialize_str(&date.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(d)?.unwrap_or_default();
        Ok(parse(&raw))
    }

    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        // Full timestamps are accepted by their date prefix.
        let date_part = raw.get(..10).unwrap_or(raw);
        match NaiveDate::parse_from_str(date_part, FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                log::warn!("[taskboard.types] Ignoring unparseable due date {:?}: {}", raw, e);
                None
            }
        }
    }
}

pub use due_date::parse as parse_due_date;
