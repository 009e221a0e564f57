//! Kanban board state: boards hold ordered columns, columns hold ordered tasks.
//!
//! [`store::BoardStore`] owns the collection and is the only way to change it;
//! every applied mutation produces a new snapshot and persists it through a
//! [`storage::SnapshotStorage`] backend.

pub mod config;
pub mod dnd;
pub mod search;
pub mod storage;
pub mod store;
pub mod types;

pub use store::{BoardStore, StoreEvent};
pub use types::{Board, Column, ColumnType, NewTask, Priority, Task, TaskPatch};
