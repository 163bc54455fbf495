//! Vulnerability presence across several analysis results

use contract_auditor_sdk::AnalysisResult;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashSet;
use thiserror::Error;

/// Fewest results a comparison accepts by default
pub const MIN_COMPARE_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("Select at least {required} results to compare (got {selected})")]
    InsufficientSelection { required: usize, selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonRow {
    pub vulnerability: String,
    /// One entry per compared result, in input order
    pub presence: Vec<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonMatrix {
    /// Column label per compared result
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Build the presence matrix.
///
/// Rows are the distinct vulnerability names in order of first appearance.
/// Columns are labelled with the result id, or `#<position>` without one.
pub fn compare<R>(results: &[R], min_count: usize) -> Result<ComparisonMatrix, CompareError>
where
    R: Borrow<AnalysisResult>,
{
    if results.len() < min_count {
        return Err(CompareError::InsufficientSelection {
            required: min_count,
            selected: results.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut names: Vec<&str> = Vec::new();
    for result in results {
        for vulnerability in result.borrow().vulnerabilities() {
            if seen.insert(vulnerability.name.as_str()) {
                names.push(vulnerability.name.as_str());
            }
        }
    }

    let rows = names
        .into_iter()
        .map(|name| ComparisonRow {
            vulnerability: name.to_string(),
            presence: results.iter().map(|r| r.borrow().contains(name)).collect(),
        })
        .collect();

    let columns = results
        .iter()
        .enumerate()
        .map(|(position, r)| r.borrow().label(position))
        .collect();

    Ok(ComparisonMatrix { columns, rows })
}

impl ComparisonMatrix {
    /// Plain-text table with a check mark where a vulnerability is present
    pub fn render_table(&self) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|row| row.vulnerability.chars().count())
            .chain(std::iter::once("Vulnerability".len()))
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .map(|label| label.chars().count().max(1))
            .collect();

        let mut out = String::new();
        out.push_str(&pad("Vulnerability", name_width));
        for (label, width) in self.columns.iter().zip(&widths) {
            out.push_str(" | ");
            out.push_str(&pad(label, *width));
        }
        out.push('\n');

        out.push_str(&"-".repeat(name_width));
        for width in &widths {
            out.push_str("-+-");
            out.push_str(&"-".repeat(*width));
        }

        for row in &self.rows {
            out.push('\n');
            out.push_str(&pad(&row.vulnerability, name_width));
            for (present, width) in row.presence.iter().zip(&widths) {
                out.push_str(" | ");
                out.push_str(&pad(if *present { "✓" } else { "-" }, *width));
            }
        }

        out
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_auditor_sdk::{ResultId, Vulnerability};

    fn result(names: &[&str]) -> AnalysisResult {
        AnalysisResult::new(
            names
                .iter()
                .map(|name| Vulnerability::new(*name, format!("{} found", name)))
                .collect(),
        )
    }

    #[test]
    fn test_presence_matrix() {
        let matrix = compare(&[result(&["A", "B"]), result(&["A"])], MIN_COMPARE_COUNT).unwrap();

        assert_eq!(
            matrix.rows,
            vec![
                ComparisonRow {
                    vulnerability: "A".to_string(),
                    presence: vec![true, true]
                },
                ComparisonRow {
                    vulnerability: "B".to_string(),
                    presence: vec![true, false]
                },
            ]
        );
        assert_eq!(matrix.columns, vec!["#0", "#1"]);
    }

    #[test]
    fn test_order_of_first_appearance_and_duplicates() {
        let matrix = compare(
            &[result(&["C", "A", "C"]), result(&["B", "A"]), result(&[])],
            MIN_COMPARE_COUNT,
        )
        .unwrap();

        let names: Vec<&str> = matrix.rows.iter().map(|r| r.vulnerability.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(matrix.rows.iter().all(|r| r.presence.len() == 3));
        assert_eq!(matrix.rows[2].presence, vec![false, true, false]);
    }

    #[test]
    fn test_single_result_is_rejected() {
        assert_eq!(
            compare(&[result(&["A"])], MIN_COMPARE_COUNT),
            Err(CompareError::InsufficientSelection {
                required: 2,
                selected: 1
            })
        );
    }

    #[test]
    fn test_accepts_borrowed_results_and_uses_ids() {
        let first = result(&["A"]).with_id(ResultId::Number(12));
        let second = result(&[]).with_id(ResultId::Text("run-b".to_string()));

        let matrix = compare(&[&first, &second], MIN_COMPARE_COUNT).unwrap();
        assert_eq!(matrix.columns, vec!["12", "run-b"]);
        assert_eq!(matrix.rows[0].presence, vec![true, false]);
    }

    #[test]
    fn test_render_table() {
        let matrix = compare(&[result(&["A", "B"]), result(&["A"])], MIN_COMPARE_COUNT).unwrap();
        let table = matrix.render_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Vulnerability | #0 | #1");
        assert_eq!(lines[2], "A             | ✓  | ✓ ");
        assert_eq!(lines[3], "B             | ✓  | - ");
    }
}
