use super::error::SetError;
use super::filter::FilterComparers;
use super::setter::Setter;
use super::track::{Collection, Track};

/// One compiled tagging rule: a filter selecting tracks plus the ordered
/// setters applied to each selected track.
///
/// Immutable after compilation; a [`Tagger`](super::Tagger) holds these in
/// declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSetter {
    filter: FilterComparers,
    setters: Vec<Setter>,
}

impl FilteredSetter {
    #[must_use]
    pub fn new(filter: FilterComparers, setters: Vec<Setter>) -> Self {
        FilteredSetter { filter, setters }
    }

    #[must_use]
    pub fn filter(&self) -> &FilterComparers {
        &self.filter
    }

    #[must_use]
    pub fn setters(&self) -> &[Setter] {
        &self.setters
    }

    /// Apply every setter, in declared order, to `tracks[idx]` with
    /// `collection` as sibling context. Later setters observe earlier
    /// setters' writes.
    ///
    /// # Errors
    ///
    /// Fail-fast: the first [`SetError`] aborts the remaining setters for
    /// this track and propagates.
    pub fn set_tags(
        &self,
        tracks: &mut [Track],
        idx: usize,
        collection: &Collection,
    ) -> Result<(), SetError> {
        for setter in &self.setters {
            setter.set(tracks, idx, collection)?;
        }
        Ok(())
    }
}
