//! Property tests for the board store.
//!
//! 1. Ids handed out by create operations never collide.
//! 2. A cross-column move leaves the task in exactly one place and keeps the total.
//! 3. Reorder is a permutation that relocates a single element.
//! 4. Arbitrary stale-id calls never change the snapshot.

use std::collections::HashSet;

use proptest::prelude::*;
use taskboard_core::storage::memory::MemoryStorage;
use taskboard_core::{BoardStore, ColumnType, NewTask};

/// Store with one board whose first column holds `n` tasks titled "0".."n-1".
fn seeded(n: usize) -> (BoardStore<MemoryStorage>, String, Vec<String>) {
    let mut store = BoardStore::new(MemoryStorage::new());
    let b = store.create_board("Prop", "");
    let cols: Vec<String> = store
        .board(&b)
        .unwrap()
        .columns
        .iter()
        .map(|c| c.id.clone())
        .collect();
    for i in 0..n {
        store
            .create_task(&b, &cols[0], NewTask::titled(i.to_string()))
            .unwrap();
    }
    (store, b, cols)
}

fn column_titles(store: &BoardStore<MemoryStorage>, b: &str, c: &str) -> Vec<String> {
    store
        .board(b)
        .unwrap()
        .column(c)
        .unwrap()
        .tasks
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

#[derive(Debug, Clone)]
enum CreateOp {
    Board,
    Column(usize),
    Task(usize, usize),
}

fn arb_create_op() -> impl Strategy<Value = CreateOp> {
    prop_oneof![
        Just(CreateOp::Board),
        any::<usize>().prop_map(CreateOp::Column),
        (any::<usize>(), any::<usize>()).prop_map(|(b, c)| CreateOp::Task(b, c)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_created_ids_are_unique(ops in prop::collection::vec(arb_create_op(), 1..40)) {
        let mut store = BoardStore::new(MemoryStorage::new());
        store.create_board("root", "");

        for op in ops {
            let boards = store.boards();
            let id = match op {
                CreateOp::Board => Some(store.create_board("b", "")),
                CreateOp::Column(i) => {
                    let board = &boards[i % boards.len()];
                    store.create_column(&board.id, "c", ColumnType::Todo)
                }
                CreateOp::Task(i, j) => {
                    let board = &boards[i % boards.len()];
                    let column = &board.columns[j % board.columns.len()];
                    store.create_task(&board.id, &column.id, NewTask::titled("t"))
                }
            };
            prop_assert!(id.is_some());
        }

        let boards = store.boards();
        let mut all_ids = Vec::new();
        for board in boards.iter() {
            all_ids.push(board.id.clone());
            for column in &board.columns {
                all_ids.push(column.id.clone());
                all_ids.extend(column.tasks.iter().map(|t| t.id.clone()));
            }
        }
        let unique: HashSet<_> = all_ids.iter().collect();
        prop_assert_eq!(unique.len(), all_ids.len());
    }

    #[test]
    fn prop_move_is_atomic(n in 1usize..12, pick in any::<usize>(), dest in 1usize..3) {
        let (mut store, b, cols) = seeded(n);
        let task_id = store.board(&b).unwrap().columns[0].tasks[pick % n].id.clone();
        let total = store.board(&b).unwrap().task_count();

        prop_assert!(store.move_task(&b, &cols[0], &cols[dest], &task_id));

        let board = store.board(&b).unwrap();
        let occurrences: usize = board
            .columns
            .iter()
            .map(|c| c.tasks.iter().filter(|t| t.id == task_id).count())
            .sum();
        prop_assert_eq!(occurrences, 1);
        prop_assert!(board.columns[0].task(&task_id).is_none());
        let dest_tasks = &board.columns[dest].tasks;
        prop_assert_eq!(&dest_tasks[dest_tasks.len() - 1].id, &task_id);
        prop_assert_eq!(board.task_count(), total);
    }

    #[test]
    fn prop_reorder_is_permutation(n in 1usize..12, from in 0usize..16, to in 0usize..16) {
        let (mut store, b, cols) = seeded(n);
        let before = column_titles(&store, &b, &cols[0]);

        store.reorder_tasks(&b, &cols[0], from, to);
        let after = column_titles(&store, &b, &cols[0]);

        prop_assert_eq!(after.len(), before.len());
        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        prop_assert_eq!(&sorted_before, &sorted_after);

        // Removing the moved element from both sequences leaves them equal.
        if from < n {
            let moved = &before[from];
            let rest_before: Vec<_> = before.iter().filter(|t| *t != moved).collect();
            let rest_after: Vec<_> = after.iter().filter(|t| *t != moved).collect();
            prop_assert_eq!(rest_before, rest_after);
            prop_assert_eq!(&after[to.min(n - 1)], moved);
        } else {
            prop_assert_eq!(before, after);
        }
    }

    #[test]
    fn prop_stale_ids_are_noops(stale in "[a-z0-9-]{1,20}", from in 0usize..4, to in 0usize..4) {
        let (mut store, b, cols) = seeded(3);
        let task_id = store.board(&b).unwrap().columns[0].tasks[0].id.clone();
        let before = store.boards();

        store.update_board(&stale, "x", "y");
        store.delete_board(&stale);
        store.delete_column(&stale, &cols[0]);
        store.delete_column(&b, &stale);
        store.delete_task(&b, &cols[0], &stale);
        store.move_task(&b, &cols[0], &stale, &task_id);
        store.move_task(&b, &stale, &cols[1], &task_id);
        store.reorder_tasks(&stale, &cols[0], from, to);
        store.reorder_tasks(&b, &stale, from, to);

        prop_assert_eq!(&*before, &*store.boards());
    }
}
