//! Subcommands mapping one-to-one onto board store operations.
use std::io::Write;

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use taskboard_core::dnd::resolve_drop;
use taskboard_core::search::{search_tasks, SearchOptions};
use taskboard_core::storage::SnapshotStorage;
use taskboard_core::types::{parse_due_date, Board, BoardSummary};
use taskboard_core::{BoardStore, ColumnType, NewTask, Priority, TaskPatch};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("No {what} matches {reference:?}")]
    NotFound { what: &'static str, reference: String },

    #[error("{reference:?} matches more than one {what}")]
    Ambiguous { what: &'static str, reference: String },

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List boards with per-column task counts
    Boards,
    /// Show one board with all its tasks
    Show { board: String },
    /// Create, edit or delete boards
    #[command(subcommand)]
    Board(BoardCommand),
    /// Create, edit or delete columns
    #[command(subcommand)]
    Column(ColumnCommand),
    /// Create, edit, delete, move or reorder tasks
    #[command(subcommand)]
    Task(TaskCommand),
    /// Search tasks across all boards (e.g. `p:high @sam due:overdue`)
    Search {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        query: Vec<String>,
        #[arg(long)]
        case_sensitive: bool,
        /// Treat the whole query as one regular expression
        #[arg(long)]
        regex: bool,
    },
    /// Drop a task onto a column or another task, as a board view would
    Drop {
        board: String,
        /// Task being dragged (id, title or id prefix)
        task: String,
        /// Column or task it was dropped on (id, title or id prefix)
        over: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum BoardCommand {
    Create {
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    Update {
        board: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a board with all its columns and tasks
    Delete { board: String },
}

#[derive(Debug, Subcommand)]
pub enum ColumnCommand {
    Create {
        board: String,
        title: String,
        #[arg(long = "type", value_parser = parse_column_type, default_value = "todo")]
        column_type: ColumnType,
    },
    Update {
        board: String,
        column: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long = "type", value_parser = parse_column_type)]
        column_type: Option<ColumnType>,
    },
    /// Delete a column with all its tasks
    Delete { board: String, column: String },
}

#[derive(Debug, Args)]
pub struct TaskFields {
    #[arg(long)]
    pub description: Option<String>,
    /// Creator
    #[arg(long = "by")]
    pub created_by: Option<String>,
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    /// Due date (YYYY-MM-DD); an empty value clears it
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    Create {
        board: String,
        column: String,
        title: String,
        #[command(flatten)]
        fields: TaskFields,
    },
    Update {
        board: String,
        column: String,
        task: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: TaskFields,
    },
    Delete {
        board: String,
        column: String,
        task: String,
    },
    /// Move a task to another column (appended unless --index is given)
    Move {
        board: String,
        from: String,
        to: String,
        task: String,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Reposition a task inside its column
    Reorder {
        board: String,
        column: String,
        from_index: usize,
        to_index: usize,
    },
}

fn parse_column_type(value: &str) -> Result<ColumnType, String> {
    ColumnType::parse(value).ok_or_else(|| format!("unknown column type {:?}", value))
}

fn parse_priority(value: &str) -> Result<Priority, String> {
    Priority::parse(value).ok_or_else(|| format!("unknown priority {:?}", value))
}

fn parse_due(value: &str) -> Result<Option<NaiveDate>, CliError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_due_date(value)
        .map(Some)
        .ok_or_else(|| CliError::InvalidValue(format!("due date {:?}", value)))
}

fn non_empty(value: &str, what: &str) -> Result<String, CliError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CliError::InvalidValue(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// Match a user reference against `(id, title)` pairs: exact id, then
/// case-insensitive title, then unique id prefix.
fn resolve_ref<'a>(
    items: impl Iterator<Item = (&'a str, &'a str)> + Clone,
    reference: &str,
    what: &'static str,
) -> Result<String, CliError> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(CliError::InvalidValue(format!("{} reference must not be empty", what)));
    }
    if let Some((id, _)) = items.clone().find(|(id, _)| *id == reference) {
        return Ok(id.to_string());
    }
    let lowered = reference.to_lowercase();
    let by_title: Vec<&str> = items
        .clone()
        .filter(|(_, title)| title.to_lowercase() == lowered)
        .map(|(id, _)| id)
        .collect();
    let candidates: Vec<&str> = if by_title.is_empty() {
        items
            .filter(|(id, _)| id.starts_with(reference))
            .map(|(id, _)| id)
            .collect()
    } else {
        by_title
    };
    match candidates.as_slice() {
        [id] => Ok(id.to_string()),
        [] => Err(CliError::NotFound {
            what,
            reference: reference.to_string(),
        }),
        _ => Err(CliError::Ambiguous {
            what,
            reference: reference.to_string(),
        }),
    }
}

fn resolve_board<'a>(boards: &'a [Board], reference: &str) -> Result<&'a Board, CliError> {
    let id = resolve_ref(
        boards.iter().map(|b| (b.id.as_str(), b.title.as_str())),
        reference,
        "board",
    )?;
    boards
        .iter()
        .find(|b| b.id == id)
        .ok_or_else(|| CliError::NotFound {
            what: "board",
            reference: reference.to_string(),
        })
}

fn resolve_column(board: &Board, reference: &str) -> Result<String, CliError> {
    resolve_ref(
        board.columns.iter().map(|c| (c.id.as_str(), c.title.as_str())),
        reference,
        "column",
    )
}

fn resolve_task(board: &Board, column_id: &str, reference: &str) -> Result<String, CliError> {
    let column = board.column(column_id).ok_or_else(|| CliError::NotFound {
        what: "column",
        reference: column_id.to_string(),
    })?;
    resolve_ref(
        column.tasks.iter().map(|t| (t.id.as_str(), t.title.as_str())),
        reference,
        "task",
    )
}

/// Resolve a task anywhere on the board.
fn resolve_board_task(board: &Board, reference: &str) -> Result<String, CliError> {
    resolve_ref(
        board
            .columns
            .iter()
            .flat_map(|c| c.tasks.iter())
            .map(|t| (t.id.as_str(), t.title.as_str())),
        reference,
        "task",
    )
}

/// A drop target is a column or a task; columns win when both match.
fn resolve_drop_target(board: &Board, reference: &str) -> Result<String, CliError> {
    match resolve_column(board, reference) {
        Err(CliError::NotFound { .. }) => resolve_board_task(board, reference),
        other => other,
    }
}

fn report(out: &mut dyn Write, applied: bool, done: &str) -> Result<(), CliError> {
    if applied {
        writeln!(out, "{}", done)?;
    } else {
        writeln!(out, "Nothing changed")?;
    }
    Ok(())
}

pub fn run<S: SnapshotStorage>(
    store: &mut BoardStore<S>,
    command: Command,
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let boards = store.boards();
    match command {
        Command::Boards => {
            let summaries = store.summaries();
            if json {
                serde_json::to_writer_pretty(&mut *out, &summaries)?;
                writeln!(out)?;
            } else {
                print_summaries(out, &summaries)?;
            }
        }
        Command::Show { board } => {
            let board = resolve_board(&boards, &board)?;
            if json {
                serde_json::to_writer_pretty(&mut *out, board)?;
                writeln!(out)?;
            } else {
                print_board(out, board, Local::now().date_naive())?;
            }
        }
        Command::Board(cmd) => run_board(store, &boards, cmd, out)?,
        Command::Column(cmd) => run_column(store, &boards, cmd, out)?,
        Command::Task(cmd) => run_task(store, &boards, cmd, out)?,
        Command::Search {
            query,
            case_sensitive,
            regex,
        } => {
            let options = SearchOptions {
                case_sensitive,
                use_regex: regex,
            };
            let hits = search_tasks(&boards, &query.join(" "), options);
            if json {
                serde_json::to_writer_pretty(&mut *out, &hits)?;
                writeln!(out)?;
            } else {
                for hit in &hits {
                    writeln!(
                        out,
                        "{} / {} / {}  [{}]  {}",
                        hit.board_title,
                        hit.column_title,
                        hit.task.title,
                        hit.task.priority.as_str(),
                        short_id(&hit.task.id)
                    )?;
                }
                writeln!(out, "{} match(es)", hits.len())?;
            }
        }
        Command::Drop { board, task, over } => {
            let board = resolve_board(&boards, &board)?;
            let task_id = resolve_board_task(board, &task)?;
            let over_id = resolve_drop_target(board, &over)?;
            match resolve_drop(board, &task_id, &over_id) {
                Some(action) => {
                    let applied = store.apply_drop(&board.id, &action);
                    report(out, applied, "Dropped")?;
                }
                None => report(out, false, "")?,
            }
        }
    }
    Ok(())
}

fn run_board<S: SnapshotStorage>(
    store: &mut BoardStore<S>,
    boards: &[Board],
    cmd: BoardCommand,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        BoardCommand::Create { title, description } => {
            let title = non_empty(&title, "board title")?;
            let id = store.create_board(&title, description.trim());
            writeln!(out, "Created board {}", id)?;
        }
        BoardCommand::Update {
            board,
            title,
            description,
        } => {
            let board = resolve_board(boards, &board)?;
            let title = match title {
                Some(title) => non_empty(&title, "board title")?,
                None => board.title.clone(),
            };
            let description = description
                .map(|d| d.trim().to_string())
                .unwrap_or_else(|| board.description.clone());
            let applied = store.update_board(&board.id, &title, &description);
            report(out, applied, "Updated board")?;
        }
        BoardCommand::Delete { board } => {
            let board = resolve_board(boards, &board)?;
            let applied = store.delete_board(&board.id);
            report(out, applied, "Deleted board")?;
        }
    }
    Ok(())
}

fn run_column<S: SnapshotStorage>(
    store: &mut BoardStore<S>,
    boards: &[Board],
    cmd: ColumnCommand,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        ColumnCommand::Create {
            board,
            title,
            column_type,
        } => {
            let board = resolve_board(boards, &board)?;
            let title = non_empty(&title, "column title")?;
            match store.create_column(&board.id, &title, column_type) {
                Some(id) => writeln!(out, "Created column {}", id)?,
                None => report(out, false, "")?,
            }
        }
        ColumnCommand::Update {
            board,
            column,
            title,
            column_type,
        } => {
            let board = resolve_board(boards, &board)?;
            let column_id = resolve_column(board, &column)?;
            let current = board.column(&column_id).ok_or_else(|| CliError::NotFound {
                what: "column",
                reference: column.clone(),
            })?;
            let title = match title {
                Some(title) => non_empty(&title, "column title")?,
                None => current.title.clone(),
            };
            let column_type = column_type.unwrap_or(current.column_type);
            let applied = store.update_column(&board.id, &column_id, &title, column_type);
            report(out, applied, "Updated column")?;
        }
        ColumnCommand::Delete { board, column } => {
            let board = resolve_board(boards, &board)?;
            let column_id = resolve_column(board, &column)?;
            let applied = store.delete_column(&board.id, &column_id);
            report(out, applied, "Deleted column")?;
        }
    }
    Ok(())
}

fn run_task<S: SnapshotStorage>(
    store: &mut BoardStore<S>,
    boards: &[Board],
    cmd: TaskCommand,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        TaskCommand::Create {
            board,
            column,
            title,
            fields,
        } => {
            let board = resolve_board(boards, &board)?;
            let column_id = resolve_column(board, &column)?;
            let task = NewTask {
                title: non_empty(&title, "task title")?,
                description: fields.description.unwrap_or_default().trim().to_string(),
                created_by: fields.created_by.unwrap_or_default().trim().to_string(),
                assigned_to: fields.assignee.unwrap_or_default().trim().to_string(),
                priority: fields.priority.unwrap_or_default(),
                due_date: match fields.due {
                    Some(due) => parse_due(&due)?,
                    None => None,
                },
            };
            match store.create_task(&board.id, &column_id, task) {
                Some(id) => writeln!(out, "Created task {}", id)?,
                None => report(out, false, "")?,
            }
        }
        TaskCommand::Update {
            board,
            column,
            task,
            title,
            fields,
        } => {
            let board = resolve_board(boards, &board)?;
            let column_id = resolve_column(board, &column)?;
            let task_id = resolve_task(board, &column_id, &task)?;
            let patch = TaskPatch {
                title: title.map(|t| non_empty(&t, "task title")).transpose()?,
                description: fields.description.map(|d| d.trim().to_string()),
                created_by: fields.created_by.map(|c| c.trim().to_string()),
                assigned_to: fields.assignee.map(|a| a.trim().to_string()),
                priority: fields.priority,
                due_date: fields.due.as_deref().map(parse_due).transpose()?,
            };
            let applied = store.update_task(&board.id, &column_id, &task_id, &patch);
            report(out, applied, "Updated task")?;
        }
        TaskCommand::Delete {
            board,
            column,
            task,
        } => {
            let board = resolve_board(boards, &board)?;
            let column_id = resolve_column(board, &column)?;
            let task_id = resolve_task(board, &column_id, &task)?;
            let applied = store.delete_task(&board.id, &column_id, &task_id);
            report(out, applied, "Deleted task")?;
        }
        TaskCommand::Move {
            board,
            from,
            to,
            task,
            index,
        } => {
            let board = resolve_board(boards, &board)?;
            let source = resolve_column(board, &from)?;
            let dest = resolve_column(board, &to)?;
            let task_id = resolve_task(board, &source, &task)?;
            let applied = match index {
                Some(index) => store.move_task_to(&board.id, &source, &dest, &task_id, index),
                None => store.move_task(&board.id, &source, &dest, &task_id),
            };
            report(out, applied, "Moved task")?;
        }
        TaskCommand::Reorder {
            board,
            column,
            from_index,
            to_index,
        } => {
            let board = resolve_board(boards, &board)?;
            let column_id = resolve_column(board, &column)?;
            let applied = store.reorder_tasks(&board.id, &column_id, from_index, to_index);
            report(out, applied, "Reordered tasks")?;
        }
    }
    Ok(())
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn print_summaries(out: &mut dyn Write, summaries: &[BoardSummary]) -> Result<(), CliError> {
    if summaries.is_empty() {
        writeln!(out, "No boards yet")?;
        return Ok(());
    }
    for summary in summaries {
        writeln!(
            out,
            "{}  {}  ({} tasks, created {})",
            short_id(&summary.id),
            summary.title,
            summary.total_tasks,
            summary.created_at.format("%Y-%m-%d")
        )?;
        if !summary.description.is_empty() {
            writeln!(out, "    {}", summary.description)?;
        }
        let columns: Vec<String> = summary
            .columns
            .iter()
            .map(|c| format!("{} {}", c.title, c.task_count))
            .collect();
        writeln!(out, "    {}", columns.join(" | "))?;
    }
    Ok(())
}

fn print_board(out: &mut dyn Write, board: &Board, today: NaiveDate) -> Result<(), CliError> {
    writeln!(out, "{}  [{}]", board.title, board.id)?;
    if !board.description.is_empty() {
        writeln!(out, "{}", board.description)?;
    }
    for column in &board.columns {
        writeln!(
            out,
            "\n== {} ({}, {})  {}",
            column.title,
            column.column_type.as_str(),
            column.tasks.len(),
            short_id(&column.id)
        )?;
        for task in &column.tasks {
            let mut line = format!(
                "  - {} [{}] {}",
                task.title,
                task.priority.as_str(),
                short_id(&task.id)
            );
            if task.is_assigned() {
                line.push_str(&format!(" @{}", task.assigned_to));
            }
            if let Some(due) = task.due_date {
                line.push_str(&format!(" due {}", due));
                if column.column_type != ColumnType::Done && task.is_past_due(today) {
                    line.push_str(" (overdue)");
                }
            }
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::storage::memory::MemoryStorage;

    fn exec(store: &mut BoardStore<MemoryStorage>, command: Command) -> String {
        let mut out = Vec::new();
        run(store, command, false, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn seeded() -> (BoardStore<MemoryStorage>, String) {
        let mut store = BoardStore::new(MemoryStorage::new());
        let id = store.create_board("Sprint 1", "first sprint");
        (store, id)
    }

    #[test]
    fn test_resolve_ref_prefers_exact_then_title_then_prefix() {
        let items = vec![("abc123", "Alpha"), ("abd456", "Beta"), ("f9e8", "abc")];
        assert_eq!(resolve_ref(items.iter().copied(), "abc123", "x").unwrap(), "abc123");
        assert_eq!(resolve_ref(items.iter().copied(), "abd", "x").unwrap(), "abd456");
        assert_eq!(resolve_ref(items.iter().copied(), "beta", "x").unwrap(), "abd456");
        assert_eq!(resolve_ref(items.iter().copied(), "ABC", "x").unwrap(), "f9e8");
        assert!(matches!(
            resolve_ref(items.iter().copied(), "  ", "x"),
            Err(CliError::InvalidValue(_))
        ));
        assert!(matches!(
            resolve_ref(items.iter().copied(), "ab", "x"),
            Err(CliError::Ambiguous { .. })
        ));
        assert!(matches!(
            resolve_ref(items.iter().copied(), "zz", "x"),
            Err(CliError::NotFound { .. })
        ));
    }

    #[test]
    fn test_task_lifecycle_by_titles() {
        let (mut store, board) = seeded();
        exec(
            &mut store,
            Command::Task(TaskCommand::Create {
                board: "sprint 1".into(),
                column: "to do".into(),
                title: "Write spec".into(),
                fields: TaskFields {
                    description: None,
                    created_by: Some("ana".into()),
                    assignee: None,
                    priority: Some(Priority::High),
                    due: Some("2030-01-15".into()),
                },
            }),
        );
        let output = exec(
            &mut store,
            Command::Task(TaskCommand::Move {
                board: board.clone(),
                from: "To Do".into(),
                to: "Done".into(),
                task: "write spec".into(),
                index: None,
            }),
        );
        assert_eq!(output.trim(), "Moved task");

        let done = &store.board(&board).unwrap().columns[2];
        assert_eq!(done.tasks.len(), 1);
        assert_eq!(done.tasks[0].priority, Priority::High);
        assert_eq!(done.tasks[0].due_date, NaiveDate::from_ymd_opt(2030, 1, 15));
    }

    #[test]
    fn test_update_clears_due_date() {
        let (mut store, board) = seeded();
        let column = store.board(&board).unwrap().columns[0].id.clone();
        let task = store
            .create_task(
                &board,
                &column,
                NewTask {
                    due_date: NaiveDate::from_ymd_opt(2030, 1, 1),
                    ..NewTask::titled("t")
                },
            )
            .unwrap();
        exec(
            &mut store,
            Command::Task(TaskCommand::Update {
                board: board.clone(),
                column: column.clone(),
                task: task.clone(),
                title: None,
                fields: TaskFields {
                    description: None,
                    created_by: None,
                    assignee: None,
                    priority: None,
                    due: Some(String::new()),
                },
            }),
        );
        assert_eq!(store.find_task(&board, &task).unwrap().task.due_date, None);
    }

    #[test]
    fn test_rejects_empty_title_and_bad_due() {
        let (mut store, board) = seeded();
        let mut out = Vec::new();
        let result = run(
            &mut store,
            Command::Board(BoardCommand::Update {
                board: board.clone(),
                title: Some("   ".into()),
                description: None,
            }),
            false,
            &mut out,
        );
        assert!(matches!(result, Err(CliError::InvalidValue(_))));

        let result = run(
            &mut store,
            Command::Task(TaskCommand::Create {
                board,
                column: "Done".into(),
                title: "x".into(),
                fields: TaskFields {
                    description: None,
                    created_by: None,
                    assignee: None,
                    priority: None,
                    due: Some("someday".into()),
                },
            }),
            false,
            &mut out,
        );
        assert!(matches!(result, Err(CliError::InvalidValue(_))));
    }

    #[test]
    fn test_column_update_keeps_unspecified_fields() {
        let (mut store, board) = seeded();
        let output = exec(
            &mut store,
            Command::Column(ColumnCommand::Update {
                board: board.clone(),
                column: "In Progress".into(),
                title: Some("Doing".into()),
                column_type: None,
            }),
        );
        assert_eq!(output.trim(), "Updated column");
        let column = &store.board(&board).unwrap().columns[1];
        assert_eq!(column.title, "Doing");
        assert_eq!(column.column_type, ColumnType::InProgress);
    }

    #[test]
    fn test_unchanged_update_reports_nothing() {
        let (mut store, board) = seeded();
        let output = exec(
            &mut store,
            Command::Board(BoardCommand::Update {
                board,
                title: None,
                description: None,
            }),
        );
        assert_eq!(output.trim(), "Nothing changed");
    }

    #[test]
    fn test_boards_listing_and_json() {
        let (mut store, _) = seeded();
        let text = exec(&mut store, Command::Boards);
        assert!(text.contains("Sprint 1"));
        assert!(text.contains("To Do 0 | In Progress 0 | Done 0"));

        let mut out = Vec::new();
        run(&mut store, Command::Boards, true, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json[0]["totalTasks"], 0);
    }

    #[test]
    fn test_search_output() {
        let (mut store, board) = seeded();
        let column = store.board(&board).unwrap().columns[0].id.clone();
        store
            .create_task(
                &board,
                &column,
                NewTask {
                    priority: Priority::High,
                    ..NewTask::titled("Fix login")
                },
            )
            .unwrap();
        let output = exec(
            &mut store,
            Command::Search {
                query: vec!["p:high".into(), "login".into()],
                case_sensitive: false,
                regex: false,
            },
        );
        assert!(output.contains("Sprint 1 / To Do / Fix login"));
        assert!(output.contains("1 match(es)"));
    }

    #[test]
    fn test_delete_by_hex_title_spares_id_prefix_match() {
        let mut store = BoardStore::new(MemoryStorage::new());
        let keep = store.create_board("Keep me", "");
        // A title that is a prefix of the other board's id.
        let short_title = keep[..1].to_string();
        store.create_board(&short_title, "");

        let output = exec(
            &mut store,
            Command::Board(BoardCommand::Delete {
                board: short_title.clone(),
            }),
        );
        assert_eq!(output.trim(), "Deleted board");
        let titles: Vec<String> = store.boards().iter().map(|b| b.title.clone()).collect();
        assert_eq!(titles, vec!["Keep me".to_string()]);
    }

    #[test]
    fn test_drop_by_titles_moves_across_columns() {
        let (mut store, board) = seeded();
        let column = store.board(&board).unwrap().columns[0].id.clone();
        store.create_task(&board, &column, NewTask::titled("Ship it")).unwrap();

        let output = exec(
            &mut store,
            Command::Drop {
                board: "Sprint 1".into(),
                task: "ship it".into(),
                over: "done".into(),
            },
        );
        assert_eq!(output.trim(), "Dropped");
        let done = &store.board(&board).unwrap().columns[2];
        assert_eq!(done.tasks[0].title, "Ship it");
    }

    #[test]
    fn test_drop_reorders_within_column() {
        let (mut store, board) = seeded();
        let column = store.board(&board).unwrap().columns[0].id.clone();
        let a = store.create_task(&board, &column, NewTask::titled("A")).unwrap();
        let b = store.create_task(&board, &column, NewTask::titled("B")).unwrap();

        let output = exec(
            &mut store,
            Command::Drop {
                board: board.clone(),
                task: b,
                over: a,
            },
        );
        assert_eq!(output.trim(), "Dropped");
        assert_eq!(store.board(&board).unwrap().columns[0].tasks[0].title, "B");
    }
}
