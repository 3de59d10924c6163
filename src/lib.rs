//=========================================================================
// Vitrine — Library Root
//
// This crate defines the public API surface of the Vitrine installation
// core.
//
// Responsibilities:
// - Expose the host-facing facade (`Installation`) and its builder
// - Expose the core subsystems (contact classification, screen state,
//   playlist cycling, lighting) for hosts that compose them directly
// - Keep the host engine behind narrow collaborator traits
//
// Typical usage:
// ```no_run
// use vitrine::prelude::*;
//
// fn main() {
//     let mut installation = InstallationBuilder::new()
//         .with_tracked_actor(ActorId(1))
//         .build();
//     installation.start();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains all installation subsystems (tap classification, screen
// state, playlist, lighting, signals, timers, host bridge). It is exposed
// publicly so hosts can compose individual pieces, but application code
// will mostly use the top-level `Installation` facade.
//
pub mod core;

//--- Internal Modules ----------------------------------------------------
//
// `installation` defines the composition root: the builder, the facade,
// and the event routing between subsystems.
//
mod installation;

//--- Public Exports ------------------------------------------------------
//
// Re-exports the facade as the main entry point, so hosts can simply
// `use vitrine::{Installation, InstallationBuilder};`.
//
pub mod prelude;
pub use installation::{Installation, InstallationBuilder};
