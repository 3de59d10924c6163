//=========================================================================
// Contact System
//=========================================================================
//
// Raw contact events and the tap classification state machine.
//
// Architecture:
//   host collision system → ContactEvent → TapClassifier → TapKind
//
// Flow:
//   on_contact_begin/end() → debounce + count → tick() timeout → TapKind
//
//=========================================================================

//=== Module Declarations =================================================

mod classifier;
mod event;

//=== Public API ==========================================================

pub use classifier::{
    ClassifyPolicy, TapClassifier, TapConfig, TapKind, COARSE_CONTACT_DEBOUNCE,
    DEFAULT_CONTACT_DEBOUNCE, DEFAULT_DOUBLE_TAP_WINDOW,
};
pub use event::{ActorId, ContactEvent, ContactKind};
