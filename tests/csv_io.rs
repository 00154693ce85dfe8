use std::fs;

use pretty_assertions::assert_eq;
use stock_ledger::csv::{self, LoadDiagnostic};
use stock_ledger::{Field, StockRecord, StockTree};

const SAMPLE: &str = "MotorPH Stock Card\nDate,Stock Label,Brand,Engine Number,Status\n\
    1/1/2024,New,Honda,EN001,On-hand\n1/2/2024,New,Yamaha,EN002,On-hand\n";

fn load_str(tree: &mut StockTree, content: &str) -> csv::LoadReport {
    csv::load_lines(tree, content.lines())
}

#[test]
fn load_skips_headers_and_builds_records() {
    // Scenario: two well-formed rows behind two header lines.
    let mut tree = StockTree::new();
    let report = load_str(&mut tree, SAMPLE);

    assert_eq!(report.inserted, 2);
    assert!(report.diagnostics.is_empty());
    assert_eq!(tree.len(), 2);

    let honda = tree.search_by(Field::ItemId, "EN001");
    assert_eq!(honda.len(), 1);
    assert_eq!(honda[0].brand(), "Honda");

    // A third record reusing EN001 is rejected as a duplicate.
    let err = tree.insert(StockRecord::new("1/3/2024", "New", "Suzuki", "EN001", "On-hand")).unwrap_err();
    assert_eq!(err.0, "EN001");
    assert_eq!(tree.len(), 2);
}

#[test]
fn malformed_rows_are_reported_and_skipped() {
    // Scenario: a three-field row must not abort the load.
    let content = "H1\nH2\n1/1/2024,New,Honda\n1/2/2024,New,Yamaha,EN002,On-hand\n";
    let mut tree = StockTree::new();
    let report = load_str(&mut tree, content);

    assert_eq!(report.inserted, 1);
    assert_eq!(
        report.diagnostics,
        vec![LoadDiagnostic::MalformedRow {
            line: "1/1/2024,New,Honda".to_owned()
        }]
    );
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.search_by(Field::ItemId, "EN002").len(), 1);
}

#[test]
fn duplicate_rows_are_reported_and_loading_continues() {
    let content = "H1\nH2\n\
        1/1/2024,New,Honda,EN001,On-hand\n\
        1/2/2024,Used,Honda,EN001,Sold\n\
        1/3/2024,New,Yamaha,EN002,On-hand\n";
    let mut tree = StockTree::new();
    let report = load_str(&mut tree, content);

    assert_eq!(report.inserted, 2);
    assert_eq!(
        report.diagnostics,
        vec![LoadDiagnostic::DuplicateId {
            item_id: "EN001".to_owned()
        }]
    );

    // The first EN001 row won.
    let found = tree.search_by(Field::ItemId, "EN001");
    assert_eq!(found[0].status(), "On-hand");
}

#[test]
fn export_follows_traversal_order() {
    let mut tree = StockTree::new();
    load_str(&mut tree, SAMPLE);
    tree.sort_by_brand();

    let lines = csv::export_lines(&tree);
    assert_eq!(
        lines,
        vec![
            "1/1/2024,New,Honda,EN001,On-hand".to_owned(),
            "1/2/2024,New,Yamaha,EN002,On-hand".to_owned(),
        ]
    );
}

#[test]
fn render_prepends_headers_verbatim() {
    let mut tree = StockTree::new();
    load_str(&mut tree, "H1\nH2\n1/1/2024,New,Honda,EN001,On-hand\n");

    let rendered = csv::render(&tree, ["H1", "H2"]);
    assert_eq!(rendered, "H1\nH2\n1/1/2024,New,Honda,EN001,On-hand\n");
}

#[test]
fn save_preserves_headers_and_round_trips_the_record_set() {
    let file = tempfile::NamedTempFile::new().unwrap();
    fs::write(file.path(), SAMPLE).unwrap();

    let mut tree = StockTree::new();
    let report = csv::load_path(&mut tree, file.path()).unwrap();
    assert_eq!(report.inserted, 2);

    // Mutate, then rewrite the same file.
    tree.add_item("Suzuki", "EN003").unwrap();
    csv::save_path(&tree, file.path()).unwrap();

    let written = fs::read_to_string(file.path()).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("MotorPH Stock Card"));
    assert_eq!(lines.next(), Some("Date,Stock Label,Brand,Engine Number,Status"));

    // Reloading yields the same record set, key column nowhere in sight.
    let mut reloaded = StockTree::new();
    csv::load_path(&mut reloaded, file.path()).unwrap();
    assert_eq!(reloaded.len(), 3);

    let mut expected: Vec<StockRecord> = tree.iter().cloned().collect();
    let mut actual: Vec<StockRecord> = reloaded.iter().cloned().collect();
    expected.sort_by_key(StockRecord::key);
    actual.sort_by_key(StockRecord::key);
    assert_eq!(actual, expected);
}

#[test]
fn load_path_propagates_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut tree = StockTree::new();

    let err = csv::load_path(&mut tree, dir.path().join("absent.csv")).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(tree.is_empty());
}

#[test]
fn save_path_requires_an_existing_target_for_its_headers() {
    let dir = tempfile::tempdir().unwrap();
    let tree = StockTree::new();

    assert!(csv::save_path(&tree, dir.path().join("absent.csv")).is_err());
}
