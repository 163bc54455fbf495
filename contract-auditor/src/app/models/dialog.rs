//! Dialog and analysis state machines

use contract_auditor_sdk::{lookup, VulnerabilityInfo};
use std::time::Instant;

/// Vulnerability guidance overlay
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InfoDialog {
    #[default]
    Closed,
    Open {
        name: String,
        /// `None` when the catalog has no entry for `name`
        info: Option<&'static VulnerabilityInfo>,
    },
}

impl InfoDialog {
    pub fn open(name: impl Into<String>) -> Self {
        let name = name.into();
        let info = lookup(&name);
        InfoDialog::Open { name, info }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, InfoDialog::Open { .. })
    }
}

/// Snippet name prompt
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveDialog {
    #[default]
    Closed,
    Editing {
        buffer: String,
    },
}

impl SaveDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, SaveDialog::Editing { .. })
    }

    pub fn push(&mut self, c: char) {
        if let SaveDialog::Editing { buffer } = self {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let SaveDialog::Editing { buffer } = self {
            buffer.pop();
        }
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            SaveDialog::Editing { buffer } => Some(buffer),
            SaveDialog::Closed => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Running {
        started: Instant,
    },
    Finished {
        vulnerabilities: usize,
    },
    Failed {
        message: String,
    },
}

impl AnalysisStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, AnalysisStatus::Running { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_dialog_lookup() {
        match InfoDialog::open("Use of tx.origin") {
            InfoDialog::Open { name, info } => {
                assert_eq!(name, "Use of tx.origin");
                assert!(info.is_some());
            }
            InfoDialog::Closed => panic!("dialog should be open"),
        }

        assert_eq!(
            InfoDialog::open("Made Up Finding"),
            InfoDialog::Open {
                name: "Made Up Finding".to_string(),
                info: None
            }
        );
    }

    #[test]
    fn test_save_dialog_editing() {
        let mut dialog = SaveDialog::Editing {
            buffer: String::new(),
        };
        dialog.push('a');
        dialog.push('b');
        dialog.backspace();
        assert_eq!(dialog.buffer(), Some("a"));

        let mut closed = SaveDialog::Closed;
        closed.push('x');
        assert_eq!(closed.buffer(), None);
    }
}
