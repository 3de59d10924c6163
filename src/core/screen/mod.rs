//=========================================================================
// Screen System
//=========================================================================
//
// Screen display-mode state machine and layer visibility control.
//
// Architecture:
//   ScreenStateMachine
//     ├─ state: ScreenState (Off / On / Passthrough)
//     └─ layers: LayerTable (state → LayerHandle)
//
// Flow:
//   handle_tap() → transition table → LayerTable::apply() → notify
//
//=========================================================================

//=== Module Declarations =================================================

mod layer;
mod state_machine;
mod toggler;

//=== Public API ==========================================================

pub use layer::LayerTable;
pub use state_machine::{ScreenState, ScreenStateMachine};
pub use toggler::SurfaceToggler;
