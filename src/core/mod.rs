//=========================================================================
// Installation Core Systems
//=========================================================================
//
// Engine-agnostic subsystems composed by the Installation facade.
//
// Architecture:
//   host contacts → contact (TapClassifier) ──TapKind──┐
//                                                      ├─► screen (state machine)
//   host tick ────► timer (Scheduler) ─────────────────┼─► playlist (MediaCycler)
//                                                      └─► lighting (ColorCycler)
//
//   signal (Notifier) fans classified taps, state changes, and cycle
//   requests out to host subscribers; the host reaches back in only
//   through the narrow traits in `host`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod contact;
pub mod host;
pub mod lighting;
pub mod playlist;
pub mod screen;
pub mod signal;
pub mod timer;
