use crate::{aggregator::Aggregation, models::Project};

/// Lifecycle of one aggregation run as seen by a view.
///
/// `Loading -> Settled` happens once; settling again is ignored. There is no
/// separate error state: failures settle with the fallback list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Settled(Aggregation),
}

impl LoadState {
    pub fn settle(self, aggregation: Aggregation) -> Self {
        match self {
            LoadState::Loading => LoadState::Settled(aggregation),
            settled @ LoadState::Settled(_) => settled,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn aggregation(&self) -> Option<&Aggregation> {
        match self {
            LoadState::Settled(aggregation) => Some(aggregation),
            LoadState::Loading => None,
        }
    }

    /// Projects to render; empty while loading
    pub fn projects(&self) -> &[Project] {
        self.aggregation().map(Aggregation::projects).unwrap_or(&[])
    }
}
