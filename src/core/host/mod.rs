//=========================================================================
// Host Bridge
//=========================================================================
//
// Everything the core needs from the host engine, and nothing more.
//
// Architecture:
//   core ──LayerSurface/MediaBackend/LightRig──► host scene objects
//   host collision thread ──ContactSender──► ContactFeed ──► tick
//
//=========================================================================

//=== Module Declarations =================================================

mod contact_feed;
mod interface;

//=== Public API ==========================================================

pub use contact_feed::{contact_channel, ContactFeed, ContactSender};
pub use interface::{LayerHandle, LayerSurface, LightRig, MediaBackend, Rgb};
