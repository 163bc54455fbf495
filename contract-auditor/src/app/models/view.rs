//! Top-level views, shown as tabs

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Results,
    Snippets,
    History,
    Compare,
}

impl View {
    pub const ALL: [View; 4] = [View::Results, View::Snippets, View::History, View::Compare];

    pub fn title(&self) -> &'static str {
        match self {
            View::Results => "Results",
            View::Snippets => "Snippets",
            View::History => "History",
            View::Compare => "Compare",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            View::Results => 0,
            View::Snippets => 1,
            View::History => 2,
            View::Compare => 3,
        }
    }

    pub fn next(&self) -> View {
        View::ALL[(self.index() + 1) % View::ALL.len()]
    }

    pub fn previous(&self) -> View {
        View::ALL[(self.index() + View::ALL.len() - 1) % View::ALL.len()]
    }
}
