//! Filter state management for TUI views.
//!
//! Provides generic filter cycling that can work with any enum-based filter.

use crate::model::FilterMode;

/// Trait for filter types that can cycle through options.
pub trait CycleFilter: Clone + Copy + Default {
    /// Get the next filter in the cycle.
    #[must_use]
    fn next(&self) -> Self;

    /// Get the previous filter in the cycle.
    #[must_use]
    fn prev(&self) -> Self;

    /// Get a display name for the filter.
    fn display_name(&self) -> &str;
}

impl CycleFilter for FilterMode {
    fn next(&self) -> Self {
        match self {
            Self::Suitable => Self::Contains,
            Self::Contains => Self::Suitable,
        }
    }

    fn prev(&self) -> Self {
        self.next()
    }

    fn display_name(&self) -> &str {
        self.label()
    }
}

/// Generic filter state that works with any `CycleFilter` enum.
#[derive(Debug, Clone)]
pub struct FilterState<F: CycleFilter> {
    /// Current filter value
    pub current: F,
}

impl<F: CycleFilter> Default for FilterState<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: CycleFilter> FilterState<F> {
    /// Create a new filter state with the default filter.
    pub fn new() -> Self {
        Self {
            current: F::default(),
        }
    }

    /// Create a filter state with a specific initial value.
    pub const fn with_filter(filter: F) -> Self {
        Self { current: filter }
    }

    /// Cycle to the next filter.
    pub fn next(&mut self) {
        self.current = self.current.next();
    }

    /// Cycle to the previous filter.
    pub fn prev(&mut self) {
        self.current = self.current.prev();
    }

    pub fn set(&mut self, filter: F) {
        self.current = filter;
    }

    pub fn reset(&mut self) {
        self.current = F::default();
    }

    /// Get the current filter's display name.
    pub fn display_name(&self) -> &str {
        self.current.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_mode_cycles() {
        let mut state = FilterState::<FilterMode>::new();
        assert_eq!(state.current, FilterMode::Suitable);
        assert_eq!(state.display_name(), "Zum Verzehr geeignet");

        state.next();
        assert_eq!(state.current, FilterMode::Contains);
        assert_eq!(state.display_name(), "Enthält Allergene");

        state.next();
        assert_eq!(state.current, FilterMode::Suitable);

        state.prev();
        assert_eq!(state.current, FilterMode::Contains);
    }

    #[test]
    fn test_filter_state_set_reset() {
        let mut state = FilterState::with_filter(FilterMode::Contains);
        state.reset();
        assert_eq!(state.current, FilterMode::Suitable);
        state.set(FilterMode::Contains);
        assert_eq!(state.current, FilterMode::Contains);
    }
}
