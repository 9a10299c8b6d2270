use histo_core::{
    draw_bars, export_json, label_bins, read_sources, resolve_bounds, resolve_inputs, Histogram,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_fixture(contents: &str) -> NamedTempFile {
    let mut tmp = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    tmp.write_all(contents.as_bytes()).unwrap();
    tmp.flush().unwrap();
    tmp
}

#[test]
fn file_to_chart() {
    let tmp = write_fixture("1 2 3 4 5\n6 7 8 9 10\n");
    let srcs = resolve_inputs(&[tmp.path().to_string_lossy().into_owned()]).unwrap();
    let values = read_sources(&srcs).unwrap();
    let bound = resolve_bounds(&values, None, None);
    let hist = Histogram::build(&values, 5, bound).unwrap();
    let bars = label_bins(&hist.bins);
    let mut out = Vec::new();
    draw_bars(&mut out, &bars, 10).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("1.00 -> 2.80 |"));
    assert!(lines[4].starts_with("10.00"));
    assert!(lines.iter().all(|l| l.ends_with("| 2")));
}

#[test]
fn explicit_bounds_exclude_tail() {
    let tmp = write_fixture("0.5 1.5 2.5 3.5 100\n");
    let srcs = resolve_inputs(&[tmp.path().to_string_lossy().into_owned()]).unwrap();
    let values = read_sources(&srcs).unwrap();
    let bound = resolve_bounds(&values, Some(0.0), Some(4.0));
    let hist = Histogram::build(&values, 4, bound).unwrap();
    assert_eq!(hist.bins.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 1, 1, 1]);
    assert_eq!(hist.excluded, 1);
    assert_eq!(hist.total, 5);
}

#[test]
fn export_json_writes_document() {
    let values = [1.0, 1.0, 2.0];
    let hist = Histogram::build(&values, 2, resolve_bounds(&values, None, None)).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("hist.json");
    export_json(&path, &hist).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["total"], 3);
    assert_eq!(doc["excluded"], 0);
    assert_eq!(doc["bins"][0]["count"], 2);
    assert_eq!(doc["bins"][1]["count"], 1);
    assert_eq!(doc["bars"][0]["label"], "1.00 -> 1.50");
    assert_eq!(doc["bound"]["right"], 2.0);
}

#[test]
fn bad_token_aborts_before_binning() {
    let tmp = write_fixture("1\n2\nx\n");
    let srcs = resolve_inputs(&[tmp.path().to_string_lossy().into_owned()]).unwrap();
    let err = read_sources(&srcs).unwrap_err();
    assert!(err.to_string().contains("not a number"));
    assert!(err.to_string().contains(":3:"));
}
