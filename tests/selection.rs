//! Selection commands through the session

mod common;

use common::{c, test_session};
use gridedit::commands::{CommandOutcome, GridCommand};
use gridedit::selection::Region;

#[test]
fn test_set_active_then_extend() {
    let mut s = test_session("a;b;c\n1;2;3\n4;5;6\n");
    s.dispatch(GridCommand::SetActive(c(1, 1))).unwrap();
    let outcome = s.dispatch(GridCommand::ExtendSelection(c(0, 0))).unwrap();
    assert_eq!(outcome, CommandOutcome::SelectionChanged);

    let sel = s.selection().unwrap();
    assert_eq!(sel.active(), c(1, 1));
    assert_eq!(sel.regions(), &[Region::from_bounds(0, 0, 1, 1)]);
}

#[test]
fn test_set_active_clears_other_regions() {
    let mut s = test_session("a;b\n1;2\n3;4\n");
    s.dispatch(GridCommand::SelectAll).unwrap();
    s.dispatch(GridCommand::AddRegion(Region::from_bounds(0, 0, 0, 0)))
        .unwrap();
    s.dispatch(GridCommand::SetActive(c(1, 0))).unwrap();
    assert_eq!(s.selection().unwrap().regions().len(), 1);
}

#[test]
fn test_select_all_excludes_header() {
    let mut s = test_session("a;b;c\n1;2;3\n4;5;6\n");
    s.dispatch(GridCommand::SetActive(c(1, 2))).unwrap();
    s.dispatch(GridCommand::SelectAll).unwrap();

    let sel = s.selection().unwrap();
    assert_eq!(sel.active(), c(0, 0));
    assert_eq!(sel.regions(), &[Region::from_bounds(0, 0, 1, 2)]);
    assert_eq!(sel.cells().len(), 6);
}

#[test]
fn test_select_all_on_header_only_table() {
    let mut s = test_session("a;b\n");
    s.dispatch(GridCommand::SelectAll).unwrap();
    assert!(s.selection().unwrap().is_empty());
    assert_eq!(
        s.dispatch(GridCommand::Copy).unwrap(),
        CommandOutcome::Unchanged
    );
}

#[test]
fn test_selection_holds_no_values() {
    let mut s = test_session("a\n1\n");
    s.dispatch(GridCommand::SetActive(c(0, 0))).unwrap();
    s.dispatch(GridCommand::Edit {
        coord: c(0, 0),
        value: "2".into(),
    })
    .unwrap();
    assert_eq!(s.selection().unwrap().cells(), vec![c(0, 0)]);
}
