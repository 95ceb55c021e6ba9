//! Catalog load lifecycle.

use exoscape_classify::PhysicalRecord;

use crate::error::CatalogError;

/// Where the catalog load stands.
///
/// `Idle -> Loading -> Succeeded | Failed`. Only an idle catalog starts a
/// load; [`CatalogState::reset`] returns a finished catalog to idle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogState {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The full list arrived.
    Succeeded(Vec<PhysicalRecord>),
    /// The load failed with this message.
    Failed(String),
}

impl CatalogState {
    /// Enter `Loading` if idle. Returns whether a load should start.
    pub fn begin(&mut self) -> bool {
        if matches!(self, CatalogState::Idle) {
            *self = CatalogState::Loading;
            true
        } else {
            false
        }
    }

    /// Record the outcome of the load started by [`CatalogState::begin`].
    /// Ignored unless a load is in flight.
    pub fn finish(&mut self, result: Result<Vec<PhysicalRecord>, CatalogError>) {
        if !matches!(self, CatalogState::Loading) {
            log::warn!("Catalog result arrived while not loading; dropped");
            return;
        }
        *self = match result {
            Ok(records) => CatalogState::Succeeded(records),
            Err(e) => {
                log::error!("{e}");
                CatalogState::Failed(e.to_string())
            }
        };
    }

    /// Run `load` if idle, recording its outcome.
    pub fn load_with<F>(&mut self, load: F)
    where
        F: FnOnce() -> Result<Vec<PhysicalRecord>, CatalogError>,
    {
        if self.begin() {
            self.finish(load());
        }
    }

    /// Return to idle, dropping records and any previous error.
    pub fn reset(&mut self) {
        *self = CatalogState::Idle;
    }

    /// Loaded records; empty unless the load succeeded.
    pub fn records(&self) -> &[PhysicalRecord] {
        match self {
            CatalogState::Succeeded(records) => records,
            _ => &[],
        }
    }

    /// The failure message, if the load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            CatalogState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Lowercase status name for logs and summaries.
    pub fn status(&self) -> &'static str {
        match self {
            CatalogState::Idle => "idle",
            CatalogState::Loading => "loading",
            CatalogState::Succeeded(_) => "succeeded",
            CatalogState::Failed(_) => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_load_succeeds() {
        let mut state = CatalogState::default();
        state.load_with(|| Ok(vec![PhysicalRecord::named("a")]));
        assert_eq!(state.status(), "succeeded");
        assert_eq!(state.records().len(), 1);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_only_idle_triggers_load() {
        let mut state = CatalogState::default();
        state.load_with(|| Ok(vec![]));
        let mut called = false;
        state.load_with(|| {
            called = true;
            Ok(vec![PhysicalRecord::named("b")])
        });
        assert!(!called, "a finished catalog must not reload");

        let mut loading = CatalogState::Loading;
        assert!(!loading.begin());
    }

    #[test]
    fn test_failure_keeps_message_and_no_records() {
        let mut state = CatalogState::default();
        state.load_with(|| {
            Err(CatalogError::Http {
                status: 404,
                status_text: "Not Found".to_string(),
            })
        });
        assert_eq!(state.error(), Some("failed to load exoplanets: 404 Not Found"));
        assert!(state.records().is_empty());
    }

    #[test]
    fn test_reset_clears_previous_error() {
        let mut state = CatalogState::Failed("old".to_string());
        state.reset();
        assert!(state.begin());
        assert!(state.error().is_none());
        assert_eq!(state, CatalogState::Loading);
    }

    #[test]
    fn test_finish_without_begin_is_ignored() {
        let mut state = CatalogState::default();
        state.finish(Ok(vec![PhysicalRecord::named("stray")]));
        assert_eq!(state, CatalogState::Idle);
    }
}
