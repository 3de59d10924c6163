//=========================================================================
// Timer System
//=========================================================================
//
// Explicit scheduled-callback abstraction for host-clock deadlines.
//
// Pattern: schedule → fire_due at tick boundary → cancel/clear on stop
//
//=========================================================================

//=== Module Declarations =================================================

mod scheduler;

//=== Public API ==========================================================

pub use scheduler::{Scheduler, TimerHandle};
