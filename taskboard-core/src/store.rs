/// Board store: the single owner of the board collection.
///
/// Every applied mutation builds a complete new collection, swaps it in as the
/// current snapshot, persists it and emits a `StoreEvent`. Unknown ids are
/// silent no-ops (the mutator returns `false` / `None` and nothing is written).
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::config::DEFAULT_STORAGE_KEY;
use crate::dnd::DropAction;
use crate::storage::{SnapshotStorage, StorageError};
use crate::types::*;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// What an applied mutation changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    BoardCreated { board_id: String },
    BoardUpdated { board_id: String },
    BoardDeleted { board_id: String },
    ColumnCreated { board_id: String, column_id: String },
    ColumnUpdated { board_id: String, column_id: String },
    ColumnDeleted { board_id: String, column_id: String },
    TaskCreated { board_id: String, column_id: String, task_id: String },
    TaskUpdated { board_id: String, column_id: String, task_id: String },
    TaskDeleted { board_id: String, column_id: String, task_id: String },
    TaskMoved {
        board_id: String,
        source_column_id: String,
        dest_column_id: String,
        task_id: String,
    },
    TasksReordered { board_id: String, column_id: String },
    Reloaded,
}

/// Persisted record layout: `{ "state": { "boards": [...] }, "version": 0 }`.
#[derive(Serialize)]
struct RecordOut<'a> {
    state: StateOut<'a>,
    version: u32,
}

#[derive(Serialize)]
struct StateOut<'a> {
    boards: &'a [Board],
}

#[derive(Deserialize)]
struct StateIn {
    #[serde(default)]
    boards: Vec<Board>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordIn {
    Envelope { state: StateIn },
    Bare(Vec<Board>),
}

/// Serialize a board collection into the persisted record format.
pub fn encode_snapshot(boards: &[Board]) -> Result<String, StorageError> {
    let record = RecordOut {
        state: StateOut { boards },
        version: 0,
    };
    Ok(serde_json::to_string(&record)?)
}

/// Parse a persisted record. Accepts the envelope format and a bare board array.
pub fn decode_snapshot(contents: &str) -> Result<Vec<Board>, StorageError> {
    let record: RecordIn = serde_json::from_str(contents)?;
    Ok(match record {
        RecordIn::Envelope { state } => state.boards,
        RecordIn::Bare(boards) => boards,
    })
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn find_board<'a>(boards: &'a mut [Board], board_id: &str) -> Option<&'a mut Board> {
    boards.iter_mut().find(|b| b.id == board_id)
}

pub struct BoardStore<S: SnapshotStorage> {
    storage: S,
    key: String,
    boards: Arc<Vec<Board>>,
    events: broadcast::Sender<StoreEvent>,
}

impl<S: SnapshotStorage> BoardStore<S> {
    /// Open the store under the default storage key.
    pub fn new(storage: S) -> Self {
        Self::open(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the store, loading whatever is persisted under `key`.
    /// A missing or malformed record yields an empty collection.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let boards = Self::load_best_effort(&storage, &key);
        log::info!(
            "[taskboard.store] Opened store {:?} with {} boards",
            key,
            boards.len()
        );
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            storage,
            key,
            boards: Arc::new(boards),
            events,
        }
    }

    fn load_best_effort(storage: &S, key: &str) -> Vec<Board> {
        match storage.load(key) {
            Ok(Some(contents)) => match decode_snapshot(&contents) {
                Ok(boards) => boards,
                Err(e) => {
                    log::warn!(
                        "[taskboard.store] Malformed record {:?}, starting empty: {}",
                        key,
                        e
                    );
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!(
                    "[taskboard.store] Failed to load {:?}, starting empty: {}",
                    key,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Re-read the persisted record, replacing the in-memory collection.
    pub fn reload(&mut self) {
        self.boards = Arc::new(Self::load_best_effort(&self.storage, &self.key));
        let _ = self.events.send(StoreEvent::Reloaded);
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Current snapshot. Holders keep seeing this exact value after later mutations.
    pub fn boards(&self) -> Arc<Vec<Board>> {
        Arc::clone(&self.boards)
    }

    pub fn board(&self, board_id: &str) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    pub fn find_task(&self, board_id: &str, task_id: &str) -> Option<TaskLocation<'_>> {
        self.board(board_id)?.find_task(task_id)
    }

    pub fn summaries(&self) -> Vec<BoardSummary> {
        self.boards.iter().map(BoardSummary::from).collect()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Run `f` against a copy of the collection. If it reports a change, the
    /// copy becomes the new snapshot, is persisted and the event is emitted.
    fn mutate<T>(
        &mut self,
        f: impl FnOnce(&mut Vec<Board>) -> Option<(T, StoreEvent)>,
    ) -> Option<T> {
        let mut next = self.boards.as_ref().clone();
        let (out, event) = f(&mut next)?;
        log::debug!("[taskboard.store] Applied {:?}", event);
        self.boards = Arc::new(next);
        self.persist();
        let _ = self.events.send(event);
        Some(out)
    }

    /// Persist the current snapshot. Failures are logged and dropped: the
    /// in-memory collection stays authoritative for the session.
    fn persist(&self) {
        let result = encode_snapshot(&self.boards)
            .and_then(|contents| self.storage.save(&self.key, &contents));
        if let Err(e) = result {
            log::warn!(
                "[taskboard.store] Failed to persist {:?}, change kept in memory only: {}",
                self.key,
                e
            );
        }
    }

    // ── Boards ──────────────────────────────────────────────────────────

    /// Append a new board seeded with the three default columns.
    pub fn create_board(&mut self, title: &str, description: &str) -> String {
        let board = Board {
            id: fresh_id(),
            title: title.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
            columns: DEFAULT_COLUMNS
                .iter()
                .map(|(title, column_type)| Column {
                    id: fresh_id(),
                    title: title.to_string(),
                    column_type: *column_type,
                    tasks: Vec::new(),
                })
                .collect(),
        };
        let board_id = board.id.clone();
        self.mutate(|boards| {
            boards.push(board);
            Some((
                (),
                StoreEvent::BoardCreated {
                    board_id: board_id.clone(),
                },
            ))
        });
        board_id
    }

    pub fn update_board(&mut self, board_id: &str, title: &str, description: &str) -> bool {
        self.mutate(|boards| {
            let board = find_board(boards, board_id)?;
            if board.title == title && board.description == description {
                return None;
            }
            board.title = title.to_string();
            board.description = description.to_string();
            Some((
                (),
                StoreEvent::BoardUpdated {
                    board_id: board_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    /// Remove a board with all its columns and tasks.
    pub fn delete_board(&mut self, board_id: &str) -> bool {
        self.mutate(|boards| {
            let index = boards.iter().position(|b| b.id == board_id)?;
            boards.remove(index);
            Some((
                (),
                StoreEvent::BoardDeleted {
                    board_id: board_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    // ── Columns ─────────────────────────────────────────────────────────

    /// Append an empty column. `None` if the board does not exist.
    pub fn create_column(
        &mut self,
        board_id: &str,
        title: &str,
        column_type: ColumnType,
    ) -> Option<String> {
        self.mutate(|boards| {
            let board = find_board(boards, board_id)?;
            let column_id = fresh_id();
            board.columns.push(Column {
                id: column_id.clone(),
                title: title.to_string(),
                column_type,
                tasks: Vec::new(),
            });
            Some((
                column_id.clone(),
                StoreEvent::ColumnCreated {
                    board_id: board_id.to_string(),
                    column_id,
                },
            ))
        })
    }

    /// Change title and type in place; the column keeps its position and tasks.
    pub fn update_column(
        &mut self,
        board_id: &str,
        column_id: &str,
        title: &str,
        column_type: ColumnType,
    ) -> bool {
        self.mutate(|boards| {
            let column = find_board(boards, board_id)?.column_mut(column_id)?;
            if column.title == title && column.column_type == column_type {
                return None;
            }
            column.title = title.to_string();
            column.column_type = column_type;
            Some((
                (),
                StoreEvent::ColumnUpdated {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    /// Remove a column together with its tasks.
    pub fn delete_column(&mut self, board_id: &str, column_id: &str) -> bool {
        self.mutate(|boards| {
            let board = find_board(boards, board_id)?;
            let index = board.columns.iter().position(|c| c.id == column_id)?;
            board.columns.remove(index);
            Some((
                (),
                StoreEvent::ColumnDeleted {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    // ── Tasks ───────────────────────────────────────────────────────────

    /// Append a task to the end of a column. `None` if board or column does not exist.
    pub fn create_task(
        &mut self,
        board_id: &str,
        column_id: &str,
        task: NewTask,
    ) -> Option<String> {
        self.mutate(|boards| {
            let column = find_board(boards, board_id)?.column_mut(column_id)?;
            let task_id = fresh_id();
            column.tasks.push(Task {
                id: task_id.clone(),
                title: task.title,
                description: task.description,
                created_by: task.created_by,
                assigned_to: task.assigned_to,
                priority: task.priority,
                due_date: task.due_date,
                created_at: Utc::now(),
            });
            Some((
                task_id.clone(),
                StoreEvent::TaskCreated {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                    task_id,
                },
            ))
        })
    }

    /// Merge `patch` into a task in place. `id` and `created_at` never change.
    pub fn update_task(
        &mut self,
        board_id: &str,
        column_id: &str,
        task_id: &str,
        patch: &TaskPatch,
    ) -> bool {
        self.mutate(|boards| {
            let column = find_board(boards, board_id)?.column_mut(column_id)?;
            let task = column.tasks.iter_mut().find(|t| t.id == task_id)?;
            if !patch.apply(task) {
                return None;
            }
            Some((
                (),
                StoreEvent::TaskUpdated {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                    task_id: task_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    pub fn delete_task(&mut self, board_id: &str, column_id: &str, task_id: &str) -> bool {
        self.mutate(|boards| {
            let column = find_board(boards, board_id)?.column_mut(column_id)?;
            let index = column.task_index(task_id)?;
            column.tasks.remove(index);
            Some((
                (),
                StoreEvent::TaskDeleted {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                    task_id: task_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    /// Move a task to the end of another column of the same board.
    ///
    /// All-or-nothing: if the task is not in the source column or the
    /// destination does not exist, nothing changes. Moving within one column
    /// is a no-op; use `reorder_tasks` for that.
    pub fn move_task(
        &mut self,
        board_id: &str,
        source_column_id: &str,
        dest_column_id: &str,
        task_id: &str,
    ) -> bool {
        self.relocate(board_id, source_column_id, dest_column_id, task_id, None)
    }

    /// Like `move_task`, but inserts at `index` in the destination
    /// (clamped to the destination length).
    pub fn move_task_to(
        &mut self,
        board_id: &str,
        source_column_id: &str,
        dest_column_id: &str,
        task_id: &str,
        index: usize,
    ) -> bool {
        self.relocate(board_id, source_column_id, dest_column_id, task_id, Some(index))
    }

    fn relocate(
        &mut self,
        board_id: &str,
        source_column_id: &str,
        dest_column_id: &str,
        task_id: &str,
        index: Option<usize>,
    ) -> bool {
        if source_column_id == dest_column_id {
            return false;
        }
        self.mutate(|boards| {
            let board = find_board(boards, board_id)?;
            let src = board.columns.iter().position(|c| c.id == source_column_id)?;
            let dst = board.columns.iter().position(|c| c.id == dest_column_id)?;
            let task_index = board.columns[src].task_index(task_id)?;

            let task = board.columns[src].tasks.remove(task_index);
            let dest = &mut board.columns[dst].tasks;
            let at = index.unwrap_or(dest.len()).min(dest.len());
            dest.insert(at, task);

            Some((
                (),
                StoreEvent::TaskMoved {
                    board_id: board_id.to_string(),
                    source_column_id: source_column_id.to_string(),
                    dest_column_id: dest_column_id.to_string(),
                    task_id: task_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    /// Move the task at `from_index` so it ends up at `to_index`.
    ///
    /// `from_index` out of range is a no-op; `to_index` past the end is
    /// clamped to the last position.
    pub fn reorder_tasks(
        &mut self,
        board_id: &str,
        column_id: &str,
        from_index: usize,
        to_index: usize,
    ) -> bool {
        self.mutate(|boards| {
            let column = find_board(boards, board_id)?.column_mut(column_id)?;
            let len = column.tasks.len();
            if from_index >= len {
                return None;
            }
            let to_index = to_index.min(len - 1);
            if from_index == to_index {
                return None;
            }
            let task = column.tasks.remove(from_index);
            column.tasks.insert(to_index, task);
            Some((
                (),
                StoreEvent::TasksReordered {
                    board_id: board_id.to_string(),
                    column_id: column_id.to_string(),
                },
            ))
        })
        .is_some()
    }

    /// Dispatch a resolved drag-and-drop gesture.
    pub fn apply_drop(&mut self, board_id: &str, action: &DropAction) -> bool {
        match action {
            DropAction::Move {
                source_column_id,
                dest_column_id,
                task_id,
            } => self.move_task(board_id, source_column_id, dest_column_id, task_id),
            DropAction::Reorder {
                column_id,
                from_index,
                to_index,
            } => self.reorder_tasks(board_id, column_id, *from_index, *to_index),
        }
    }
}
