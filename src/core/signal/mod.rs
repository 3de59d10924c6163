//=========================================================================
// Signal System
//=========================================================================
//
// Explicit publish-subscribe registry for core-emitted events.
//
// Pattern: subscribe → emit (N subscribers, synchronous) → unsubscribe
//
//=========================================================================

//=== Module Declarations =================================================

mod notifier;

//=== Public API ==========================================================

pub use notifier::{Notifier, SubscriberId};
