//! Fetched analysis history and the positions selected for comparison
//!
//! Results are addressed by their position in the fetched list since the
//! service does not guarantee stable ids. Replacing the list clears the
//! selection.

use contract_auditor_sdk::AnalysisResult;
use std::collections::BTreeSet;

use crate::compare::{compare, ComparisonMatrix, CompareError, MIN_COMPARE_COUNT};

#[derive(Debug, Default, Clone)]
pub struct HistorySelection {
    results: Vec<AnalysisResult>,
    selected: BTreeSet<usize>,
}

impl HistorySelection {
    pub fn new(results: Vec<AnalysisResult>) -> Self {
        Self {
            results,
            selected: BTreeSet::new(),
        }
    }

    pub fn replace(&mut self, results: Vec<AnalysisResult>) {
        self.results = results;
        self.selected.clear();
    }

    pub fn results(&self) -> &[AnalysisResult] {
        &self.results
    }

    pub fn get(&self, position: usize) -> Option<&AnalysisResult> {
        self.results.get(position)
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Select or deselect `position`. Returns the new state, or `None` if
    /// the position is out of range.
    pub fn toggle(&mut self, position: usize) -> Option<bool> {
        if position >= self.results.len() {
            return None;
        }
        if self.selected.remove(&position) {
            Some(false)
        } else {
            self.selected.insert(position);
            Some(true)
        }
    }

    pub fn is_selected(&self, position: usize) -> bool {
        self.selected.contains(&position)
    }

    /// Selected positions in list order
    pub fn selected_positions(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    /// Compare the selected results in list order.
    ///
    /// Columns are labelled by id, or by list position for results without one.
    pub fn compare_selected(&self) -> Result<ComparisonMatrix, CompareError> {
        let positions = self.selected_positions();
        let chosen: Vec<&AnalysisResult> = positions.iter().map(|&p| &self.results[p]).collect();

        let mut matrix = compare(&chosen, MIN_COMPARE_COUNT)?;
        matrix.columns = positions
            .iter()
            .map(|&p| self.results[p].label(p))
            .collect();
        Ok(matrix)
    }
}
