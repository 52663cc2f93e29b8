//! Clipboard copy/paste through the session

mod common;

use common::{c, cell, rows, test_session};
use gridedit::commands::{CommandOutcome, GridCommand, TransactionKind};
use gridedit::selection::Region;
use gridedit::GridError;

fn paste(session: &mut gridedit::EditorSession, text: &str) -> CommandOutcome {
    session.clipboard_mut().set_text(text.to_string());
    session.dispatch(GridCommand::Paste).unwrap()
}

// ========================================================================
// Broadcast paste
// ========================================================================

#[test]
fn test_broadcast_skips_cells_already_equal() {
    let mut s = test_session("a;b;c\na;X;b\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    s.dispatch(GridCommand::ExtendSelection(c(0, 2))).unwrap();

    let CommandOutcome::Edited(event) = paste(&mut s, "X") else {
        panic!("expected an edit");
    };
    assert_eq!(event.kind, TransactionKind::Paste);
    assert_eq!(event.records.len(), 2);
    assert_eq!(rows(&s), vec![vec!["X", "X", "X"]]);
}

#[test]
fn test_broadcast_covers_every_region() {
    let mut s = test_session("a;b\n1;2\n3;4\n5;6\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    s.dispatch(GridCommand::AddRegion(Region::from_bounds(2, 1, 2, 1)))
        .unwrap();

    paste(&mut s, "z\r\n");
    assert_eq!(cell(&s, 0, 0), "z");
    assert_eq!(cell(&s, 2, 1), "z");
    assert_eq!(cell(&s, 1, 0), "3");
}

#[test]
fn test_broadcast_overlapping_regions_write_once() {
    let mut s = test_session("a;b\n1;2\n3;4\n");
    s.dispatch(GridCommand::SelectAll).unwrap();
    s.dispatch(GridCommand::AddRegion(Region::from_bounds(0, 0, 1, 0)))
        .unwrap();

    let CommandOutcome::Edited(event) = paste(&mut s, "0") else {
        panic!("expected an edit");
    };
    assert_eq!(event.records.len(), 4);
}

#[test]
fn test_noop_paste_leaves_history_untouched() {
    let mut s = test_session("a\nX\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();

    assert_eq!(paste(&mut s, "X"), CommandOutcome::Unchanged);
    assert!(!s.history().unwrap().can_undo());
}

#[test]
fn test_whitespace_clipboard_ignored() {
    let mut s = test_session("a\n1\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();

    assert_eq!(paste(&mut s, "  \n"), CommandOutcome::Unchanged);
    assert_eq!(cell(&s, 0, 0), "1");
}

#[test]
fn test_paste_with_empty_clipboard() {
    let mut s = test_session("a\n1\n");
    assert_eq!(
        s.dispatch(GridCommand::Paste).unwrap(),
        CommandOutcome::Unchanged
    );
}

// ========================================================================
// Block paste
// ========================================================================

#[test]
fn test_block_clipped_to_single_cell_table() {
    let mut s = test_session("only\nx\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();

    let CommandOutcome::Edited(event) = paste(&mut s, "1\t2\n3\t4") else {
        panic!("expected an edit");
    };
    assert_eq!(event.records.len(), 1);
    assert_eq!(rows(&s), vec![vec!["1"]]);
}

#[test]
fn test_block_anchored_at_active_cell() {
    let mut s = test_session("a;b;c\n;;\n;;\n;;\n");
    s.dispatch(GridCommand::SetActive(c(1, 1))).unwrap();

    paste(&mut s, "p\tq\r\nr\ts\r\n");
    assert_eq!(
        rows(&s),
        vec![
            vec!["", "", ""],
            vec!["", "p", "q"],
            vec!["", "r", "s"],
        ]
    );
}

#[test]
fn test_block_paste_is_one_undo_step() {
    let mut s = test_session("a;b\n1;2\n3;4\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    paste(&mut s, "w\tx\ny\tz");

    s.dispatch(GridCommand::Undo).unwrap();
    assert_eq!(rows(&s), vec![vec!["1", "2"], vec!["3", "4"]]);
}

// ========================================================================
// Copy
// ========================================================================

#[test]
fn test_copy_then_paste_back_reproduces_block() {
    let mut s = test_session("k1;k2;k3\na;b;x\nc;d;y\n;;\n;;\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    s.dispatch(GridCommand::ExtendSelection(c(1, 1))).unwrap();

    let outcome = s.dispatch(GridCommand::Copy).unwrap();
    assert_eq!(outcome, CommandOutcome::Copied("a\tb\nc\td".to_string()));

    // same anchor: nothing changes
    assert_eq!(
        s.dispatch(GridCommand::Paste).unwrap(),
        CommandOutcome::Unchanged
    );

    s.dispatch(GridCommand::SetActive(c(2, 0))).unwrap();
    s.dispatch(GridCommand::Paste).unwrap();
    assert_eq!(cell(&s, 2, 0), "a");
    assert_eq!(cell(&s, 2, 1), "b");
    assert_eq!(cell(&s, 3, 0), "c");
    assert_eq!(cell(&s, 3, 1), "d");
}

#[test]
fn test_copy_disjoint_regions_unsupported() {
    let mut s = test_session("a;b\n1;2\n3;4\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    s.dispatch(GridCommand::AddRegion(Region::from_bounds(1, 1, 1, 1)))
        .unwrap();

    assert!(matches!(
        s.dispatch(GridCommand::Copy),
        Err(GridError::UnsupportedSelection(_))
    ));
}

#[test]
fn test_copy_keeps_inner_whitespace() {
    let mut s = test_session("a;b\n x ;y\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    s.dispatch(GridCommand::ExtendSelection(c(0, 1))).unwrap();
    assert_eq!(
        s.dispatch(GridCommand::Copy).unwrap(),
        CommandOutcome::Copied(" x \ty".to_string())
    );
}
