/// Drag-and-drop resolution.
///
/// A drag ends with the id of the dragged task and the id of whatever it was
/// dropped on, which is either a column (its empty area) or another task.
/// `resolve_drop` turns that pair into the store call to make.
use serde::{Deserialize, Serialize};

use crate::types::Board;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DropAction {
    /// Cross-column move, appended to the destination.
    Move {
        source_column_id: String,
        dest_column_id: String,
        task_id: String,
    },
    /// Same-column repositioning.
    Reorder {
        column_id: String,
        from_index: usize,
        to_index: usize,
    },
}

/// Decide what a drop of `active_task_id` onto `over_id` means on `board`.
/// Returns `None` when the drop changes nothing or either id is unknown.
pub fn resolve_drop(board: &Board, active_task_id: &str, over_id: &str) -> Option<DropAction> {
    let active = board.find_task(active_task_id)?;

    if let Some(column) = board.column(over_id) {
        if column.id == active.column_id {
            return None;
        }
        return Some(DropAction::Move {
            source_column_id: active.column_id.to_string(),
            dest_column_id: column.id.clone(),
            task_id: active_task_id.to_string(),
        });
    }

    let over = board.find_task(over_id)?;
    if over.column_id != active.column_id {
        return Some(DropAction::Move {
            source_column_id: active.column_id.to_string(),
            dest_column_id: over.column_id.to_string(),
            task_id: active_task_id.to_string(),
        });
    }

    if active.index == over.index {
        return None;
    }
    Some(DropAction::Reorder {
        column_id: active.column_id.to_string(),
        from_index: active.index,
        to_index: over.index,
    })
}
