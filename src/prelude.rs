//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use vitrine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Composition root
pub use crate::installation::{Installation, InstallationBuilder};

// Contact classification
pub use crate::core::contact::{
    ActorId, ClassifyPolicy, ContactEvent, ContactKind, TapClassifier, TapConfig, TapKind,
};

// Screen state
pub use crate::core::screen::{LayerTable, ScreenState, ScreenStateMachine, SurfaceToggler};

// Playlist cycling
pub use crate::core::playlist::{
    AdvanceOutcome, CycleOutcome, CyclePreset, CyclerConfig, MediaCycler, PlaylistCursor,
};

// Lighting
pub use crate::core::lighting::{
    BrightnessConfig, BrightnessControl, ColorCycler, CycleRequested,
};

// Signals and timers
pub use crate::core::signal::{Notifier, SubscriberId};
pub use crate::core::timer::{Scheduler, TimerHandle};

// Host bridge
pub use crate::core::host::{
    contact_channel, ContactFeed, ContactSender, LayerHandle, LayerSurface, LightRig,
    MediaBackend, Rgb,
};
