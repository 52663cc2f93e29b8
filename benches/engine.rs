//! Benchmarks for the grid engine hot paths
//!
//! Run with: cargo bench engine

use gridedit::clipboard;
use gridedit::csv::{parse_table, serialize_table};
use gridedit::history::{EditRecord, EditTransactionLog, Transaction};
use gridedit::selection::SelectionModel;
use gridedit::table::{CellCoord, Table};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn csv_source(rows: usize) -> String {
    let mut out = String::from("sku;description;qty;price\n");
    for i in 0..rows {
        out.push_str(&format!("SKU-{};\"item; {}\";{};{}.50\n", i, i, i % 17, i % 100));
    }
    out
}

fn table(rows: usize) -> Table {
    parse_table(&csv_source(rows)).unwrap()
}

fn select_all(table: &Table) -> SelectionModel {
    let mut selection = SelectionModel::new();
    selection.select_all(table.row_count(), table.column_count());
    selection
}

// ============================================================================
// Codec
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn parse(bencher: divan::Bencher, rows: usize) {
    let source = csv_source(rows);
    bencher.bench(|| parse_table(divan::black_box(&source)).unwrap());
}

#[divan::bench(args = [100, 1_000, 10_000])]
fn serialize(bencher: divan::Bencher, rows: usize) {
    let table = table(rows);
    bencher.bench(|| serialize_table(divan::black_box(&table)).unwrap());
}

// ============================================================================
// Clipboard
// ============================================================================

#[divan::bench(args = [100, 1_000, 10_000])]
fn broadcast_paste_records(bencher: divan::Bencher, rows: usize) {
    let table = table(rows);
    let selection = select_all(&table);
    bencher.bench(|| clipboard::paste_records(&table, &selection, divan::black_box("0")));
}

#[divan::bench(args = [10, 100, 500])]
fn block_paste_records(bencher: divan::Bencher, size: usize) {
    let table = table(1_000);
    let selection = SelectionModel::new();
    let line = vec!["x"; size].join("\t");
    let text = vec![line; size].join("\n");
    bencher.bench(|| clipboard::paste_records(&table, &selection, divan::black_box(&text)));
}

#[divan::bench(args = [100, 1_000])]
fn copy_selection(bencher: divan::Bencher, rows: usize) {
    let table = table(rows);
    let selection = select_all(&table);
    bencher.bench(|| clipboard::encode(&table, &selection).unwrap());
}

// ============================================================================
// History
// ============================================================================

#[divan::bench(args = [10, 100, 1_000])]
fn undo_redo_cycle(bencher: divan::Bencher, edits: usize) {
    bencher
        .with_inputs(|| {
            let mut table = table(1_000);
            let mut log = EditTransactionLog::new();
            for i in 0..edits {
                let coord = CellCoord::new(i % 1_000, 2);
                let old = table.get(coord).unwrap().to_string();
                let tx = Transaction::from_records(vec![EditRecord::new(coord, old, "edited")])
                    .unwrap();
                tx.apply(&mut table).unwrap();
                log.record(tx);
            }
            (table, log)
        })
        .bench_local_values(|(mut table, mut log)| {
            while log.undo(&mut table).unwrap() {}
            while log.redo(&mut table).unwrap() {}
            table
        });
}
