//=========================================================================
// Screen State Machine
//=========================================================================
//
// Three-state display mode driven by classified taps.
//
// Architecture:
//   TapKind → transition table → ScreenState → LayerTable::apply
//                                     ↓
//                           Notifier<ScreenState> (synchronous)
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::layer::LayerTable;
use crate::core::contact::TapKind;
use crate::core::host::LayerSurface;
use crate::core::signal::Notifier;

//=== ScreenState =========================================================

/// Display mode of the installation screen.
///
/// `Passthrough` is a see-through/bypass mode distinct from On and Off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenState {
    Off,
    On,
    Passthrough,
}

impl ScreenState {
    /// The fixed transition table.
    ///
    /// | Current     | Single      | Double      |
    /// |-------------|-------------|-------------|
    /// | Off         | On          | Passthrough |
    /// | On          | Off         | Off         |
    /// | Passthrough | On          | Off         |
    pub fn after_tap(self, tap: TapKind) -> ScreenState {
        match (self, tap) {
            (ScreenState::Off, TapKind::Single) => ScreenState::On,
            (ScreenState::On, TapKind::Single) => ScreenState::Off,
            (ScreenState::Passthrough, TapKind::Single) => ScreenState::On,
            (ScreenState::Off, TapKind::Double) => ScreenState::Passthrough,
            (ScreenState::On, TapKind::Double) => ScreenState::Off,
            (ScreenState::Passthrough, TapKind::Double) => ScreenState::Off,
        }
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::Off
    }
}

//=== ScreenStateMachine ==================================================

/// Owns the current [`ScreenState`] and the layer assignment.
///
/// `handle_tap` is fully synchronous: the layer visibility change and the
/// subscriber notification are both applied before it returns.
pub struct ScreenStateMachine {
    state: ScreenState,
    layers: LayerTable,
}

impl ScreenStateMachine {
    /// Creates a machine in the initial `Off` state.
    pub fn new(layers: LayerTable) -> Self {
        Self {
            state: ScreenState::Off,
            layers,
        }
    }

    //--- Tap Handling -----------------------------------------------------

    /// Applies the transition table for `tap`, updates layer visibility on
    /// `surface` (when one is bound), and notifies `listeners`.
    ///
    /// Returns the new state.
    pub fn handle_tap(
        &mut self,
        tap: TapKind,
        surface: Option<&mut dyn LayerSurface>,
        listeners: &mut Notifier<ScreenState>,
    ) -> ScreenState {
        let next = self.state.after_tap(tap);
        debug!("screen {:?} + {:?} -> {:?}", self.state, tap, next);
        self.state = next;

        if let Some(surface) = surface {
            self.layers.apply(next, surface);
        }

        listeners.emit(&next);
        next
    }

    //--- Queries ----------------------------------------------------------

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn layers(&self) -> &LayerTable {
        &self.layers
    }

    /// Re-applies the current state's layer assignment (used at start to
    /// put the host scene in a known configuration).
    pub fn apply_layers(&self, surface: &mut dyn LayerSurface) {
        self.layers.apply(self.state, surface);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::host::LayerHandle;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct RecordingSurface {
        calls: Vec<(LayerHandle, bool)>,
    }

    impl LayerSurface for RecordingSurface {
        fn set_active(&mut self, layer: LayerHandle, active: bool) {
            self.calls.push((layer, active));
        }
    }

    fn machine() -> ScreenStateMachine {
        let mut layers = LayerTable::new();
        layers.assign(ScreenState::Off, LayerHandle(0));
        layers.assign(ScreenState::On, LayerHandle(1));
        layers.assign(ScreenState::Passthrough, LayerHandle(2));
        ScreenStateMachine::new(layers)
    }

    //=====================================================================
    // Transition Table
    //=====================================================================

    /// All 3 states × 2 tap kinds.
    #[test]
    fn transition_table_is_exact() {
        use ScreenState::*;
        use TapKind::*;

        let cases = [
            (Off, Single, On),
            (On, Single, Off),
            (Passthrough, Single, On),
            (Off, Double, Passthrough),
            (On, Double, Off),
            (Passthrough, Double, Off),
        ];

        for (from, tap, expected) in cases {
            assert_eq!(from.after_tap(tap), expected, "{:?} + {:?}", from, tap);
        }
    }

    #[test]
    fn initial_state_is_off() {
        assert_eq!(machine().state(), ScreenState::Off);
        assert_eq!(ScreenState::default(), ScreenState::Off);
    }

    #[test]
    fn single_taps_cycle_on_off() {
        let mut m = machine();
        let mut listeners = Notifier::new();
        let mut surface = RecordingSurface { calls: Vec::new() };

        assert_eq!(
            m.handle_tap(TapKind::Single, Some(&mut surface), &mut listeners),
            ScreenState::On
        );
        assert_eq!(
            m.handle_tap(TapKind::Single, Some(&mut surface), &mut listeners),
            ScreenState::Off
        );
    }

    //=====================================================================
    // Layer Application
    //=====================================================================

    #[test]
    fn handle_tap_activates_only_the_new_layer() {
        let mut m = machine();
        let mut listeners = Notifier::new();
        let mut surface = RecordingSurface { calls: Vec::new() };

        m.handle_tap(TapKind::Double, Some(&mut surface), &mut listeners);

        assert_eq!(
            surface.calls,
            vec![
                (LayerHandle(0), false),
                (LayerHandle(1), false),
                (LayerHandle(2), true),
            ]
        );
    }

    #[test]
    fn missing_surface_still_transitions_and_notifies() {
        let mut m = machine();
        let mut listeners = Notifier::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        listeners.subscribe(move |state: &ScreenState| s.borrow_mut().push(*state));

        m.handle_tap(TapKind::Single, None, &mut listeners);

        assert_eq!(m.state(), ScreenState::On);
        assert_eq!(*seen.borrow(), vec![ScreenState::On]);
    }

    //=====================================================================
    // Notification
    //=====================================================================

    #[test]
    fn notification_is_synchronous_and_carries_new_state() {
        let mut m = machine();
        let mut listeners = Notifier::new();
        let mut surface = RecordingSurface { calls: Vec::new() };
        let seen = Rc::new(RefCell::new(Vec::new()));

        let s = seen.clone();
        listeners.subscribe(move |state: &ScreenState| s.borrow_mut().push(*state));

        m.handle_tap(TapKind::Double, Some(&mut surface), &mut listeners);
        assert_eq!(*seen.borrow(), vec![ScreenState::Passthrough]);

        m.handle_tap(TapKind::Double, Some(&mut surface), &mut listeners);
        assert_eq!(
            *seen.borrow(),
            vec![ScreenState::Passthrough, ScreenState::Off]
        );
    }

    #[test]
    fn multiple_subscribers_all_hear_the_change() {
        let mut m = machine();
        let mut listeners = Notifier::new();
        let count = Rc::new(RefCell::new(0));

        for _ in 0..3 {
            let c = count.clone();
            listeners.subscribe(move |_: &ScreenState| *c.borrow_mut() += 1);
        }

        m.handle_tap(TapKind::Single, None, &mut listeners);
        assert_eq!(*count.borrow(), 3);
    }
}
