//=========================================================================
// Layer Table
//=========================================================================
//
// Explicit screen-state → layer-handle assignment.
//
// The mapping is a tagged table rather than enum-ordinal indexing into an
// ordered list, so reordering the state enum can never activate the wrong
// layer.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::state_machine::ScreenState;
use crate::core::host::{LayerHandle, LayerSurface};

//=== LayerTable ==========================================================

/// Maps each [`ScreenState`] to the host layer that should be visible in
/// that state.
///
/// A state may be left unassigned; applying such a state deactivates the
/// assigned layers and activates nothing (skipped, not fatal).
#[derive(Debug, Clone, Default)]
pub struct LayerTable {
    entries: Vec<(ScreenState, LayerHandle)>,
}

impl LayerTable {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Assignment -------------------------------------------------------

    /// Assigns `handle` to `state`, replacing any previous assignment.
    pub fn assign(&mut self, state: ScreenState, handle: LayerHandle) {
        if let Some(entry) = self.entries.iter_mut().find(|(s, _)| *s == state) {
            entry.1 = handle;
        } else {
            self.entries.push((state, handle));
        }
    }

    /// The handle assigned to `state`, if any.
    pub fn handle_for(&self, state: ScreenState) -> Option<LayerHandle> {
        self.entries
            .iter()
            .find(|(s, _)| *s == state)
            .map(|(_, h)| *h)
    }

    //--- Application ------------------------------------------------------

    /// Deactivates every assigned layer except the one for `active`, which
    /// is activated.
    pub fn apply(&self, active: ScreenState, surface: &mut dyn LayerSurface) {
        for (state, handle) in &self.entries {
            surface.set_active(*handle, *state == active);
        }

        if self.handle_for(active).is_none() {
            debug!("no layer assigned for screen state {:?}", active);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingSurface {
        calls: Vec<(LayerHandle, bool)>,
    }

    impl RecordingSurface {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl LayerSurface for RecordingSurface {
        fn set_active(&mut self, layer: LayerHandle, active: bool) {
            self.calls.push((layer, active));
        }
    }

    #[test]
    fn apply_activates_exactly_the_matching_layer() {
        let mut table = LayerTable::new();
        table.assign(ScreenState::Off, LayerHandle(0));
        table.assign(ScreenState::On, LayerHandle(1));
        table.assign(ScreenState::Passthrough, LayerHandle(2));

        let mut surface = RecordingSurface::new();
        table.apply(ScreenState::On, &mut surface);

        assert_eq!(
            surface.calls,
            vec![
                (LayerHandle(0), false),
                (LayerHandle(1), true),
                (LayerHandle(2), false),
            ]
        );
    }

    #[test]
    fn assign_replaces_existing_entry() {
        let mut table = LayerTable::new();
        table.assign(ScreenState::On, LayerHandle(1));
        table.assign(ScreenState::On, LayerHandle(5));

        assert_eq!(table.len(), 1);
        assert_eq!(table.handle_for(ScreenState::On), Some(LayerHandle(5)));
    }

    #[test]
    fn unassigned_state_is_skipped_not_fatal() {
        let mut table = LayerTable::new();
        table.assign(ScreenState::Off, LayerHandle(0));

        let mut surface = RecordingSurface::new();
        table.apply(ScreenState::Passthrough, &mut surface);

        // Off layer hidden, nothing activated
        assert_eq!(surface.calls, vec![(LayerHandle(0), false)]);
    }

    #[test]
    fn empty_table_applies_nothing() {
        let table = LayerTable::new();
        let mut surface = RecordingSurface::new();

        table.apply(ScreenState::On, &mut surface);
        assert!(surface.calls.is_empty());
    }
}
