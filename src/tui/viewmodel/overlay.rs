//! Overlay state management for the viewer.

/// Available overlay types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// Help/shortcuts overlay
    Help,
    /// Product lookup input and result
    Lookup,
}

/// Manages overlay visibility with mutual exclusion.
///
/// Only one overlay can be visible at a time - showing a new overlay
/// automatically closes others.
#[derive(Debug, Clone, Default)]
pub struct OverlayState {
    current: Option<OverlayKind>,
}

impl OverlayState {
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    #[must_use]
    pub const fn has_overlay(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn is_showing(&self, kind: OverlayKind) -> bool {
        self.current == Some(kind)
    }

    #[must_use]
    pub const fn current(&self) -> Option<OverlayKind> {
        self.current
    }

    pub const fn show(&mut self, kind: OverlayKind) {
        self.current = Some(kind);
    }

    pub const fn close(&mut self) {
        self.current = None;
    }

    /// Show `kind`, or close it when it is already showing.
    pub fn toggle(&mut self, kind: OverlayKind) {
        if self.is_showing(kind) {
            self.close();
        } else {
            self.show(kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlays_are_exclusive() {
        let mut overlay = OverlayState::new();
        overlay.toggle(OverlayKind::Help);
        assert!(overlay.is_showing(OverlayKind::Help));

        overlay.show(OverlayKind::Lookup);
        assert!(overlay.is_showing(OverlayKind::Lookup));
        assert!(!overlay.is_showing(OverlayKind::Help));

        overlay.toggle(OverlayKind::Lookup);
        assert!(!overlay.has_overlay());
    }
}
