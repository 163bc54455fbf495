//! CSV export checked against an independent CSV reader

use contract_auditor::export::{escape, to_csv, unescape, CSV_HEADER};
use contract_auditor_sdk::{AnalysisResult, Vulnerability};
use proptest::prelude::*;

fn read_back(csv_text: &str) -> Vec<(String, String)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_text.as_bytes());

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>().join(","), CSV_HEADER);

    reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            (record[0].to_string(), record[1].to_string())
        })
        .collect()
}

#[test]
fn test_reader_sees_quoted_fields() {
    let result = AnalysisResult::new(vec![
        Vulnerability::new("A,B", "has \"quotes\""),
        Vulnerability::new("Multi", "line one\nline two"),
        Vulnerability::new("Plain", "nothing special"),
    ]);

    let rows = read_back(&to_csv(&result));
    assert_eq!(
        rows,
        vec![
            ("A,B".to_string(), "has \"quotes\"".to_string()),
            ("Multi".to_string(), "line one\nline two".to_string()),
            ("Plain".to_string(), "nothing special".to_string()),
        ]
    );
}

#[test]
fn test_empty_result_is_header_only() {
    let csv_text = to_csv(&AnalysisResult::new(vec![]));
    assert!(read_back(&csv_text).is_empty());
}

proptest! {
    #[test]
    fn prop_plain_fields_are_untouched(field in "[a-zA-Z0-9 ._()-]{0,40}") {
        let escaped = escape(&field);
        prop_assert_eq!(escaped.as_ref(), field.as_str());
    }

    #[test]
    fn prop_unescape_inverts_escape(field in "[a-zA-Z0-9 ,\"\n]{0,40}") {
        prop_assert_eq!(unescape(&escape(&field)), field);
    }

    #[test]
    fn prop_reader_recovers_every_field(
        rows in prop::collection::vec(("[a-zA-Z0-9 ,\"]{1,20}", "[a-zA-Z0-9 ,\"\n]{0,40}"), 1..8)
    ) {
        let result = AnalysisResult::new(
            rows.iter()
                .map(|(name, description)| Vulnerability::new(name.clone(), description.clone()))
                .collect(),
        );

        prop_assert_eq!(read_back(&to_csv(&result)), rows);
    }
}
