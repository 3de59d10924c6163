//=========================================================================
// Surface Toggler
//=========================================================================
//
// Debounced visibility toggle for a single layer handle.
//
// For trigger volumes that only ever flip one surface on and off (a table
// image, a hint panel). Hosts wire this to its own trigger's contact
// stream; it does not go through the tap classifier.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::contact::{ActorId, COARSE_CONTACT_DEBOUNCE};
use crate::core::host::{LayerHandle, LayerSurface};

//=== SurfaceToggler ======================================================

/// Flips a layer's visibility on every debounced contact begin.
pub struct SurfaceToggler {
    handle: LayerHandle,
    filter: Box<dyn Fn(ActorId) -> bool>,
    debounce: f64,
    last_tap: f64,
    active: bool,
}

impl SurfaceToggler {
    /// Creates a toggler with the coarse default debounce, accepting any
    /// actor. The surface starts hidden.
    pub fn new(handle: LayerHandle) -> Self {
        Self::with_filter(handle, COARSE_CONTACT_DEBOUNCE, |_| true)
    }

    /// Creates a toggler with an explicit debounce and actor predicate.
    pub fn with_filter<F>(handle: LayerHandle, debounce: f64, filter: F) -> Self
    where
        F: Fn(ActorId) -> bool + 'static,
    {
        Self {
            handle,
            filter: Box::new(filter),
            debounce,
            last_tap: f64::NEG_INFINITY,
            active: false,
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Registers a contact begin. Returns the new visibility when the tap
    /// was accepted, `None` when filtered or debounced.
    pub fn on_contact_begin(
        &mut self,
        actor: ActorId,
        t: f64,
        surface: &mut dyn LayerSurface,
    ) -> Option<bool> {
        if !(self.filter)(actor) {
            return None;
        }

        if t - self.last_tap < self.debounce {
            return None;
        }
        self.last_tap = t;

        self.active = !self.active;
        surface.set_active(self.handle, self.active);
        Some(self.active)
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_active(&self) -> bool {
        self.active
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
