//=========================================================================
// Media Cycler
//=========================================================================
//
// Tap-driven playlist advancement over a host media backend.
//
// Architecture:
//   register_tap() → preset policy → PlaylistCursor::advance()
//                                         ↓
//                            MediaBackend::stop() + prepare(index)
//                                         ↓ (host loads asynchronously)
//   media_prepared() → PlayDirective (play now / play after delay)
//
// Prepare is generation-counted: a newer prepare invalidates the pending
// play action of an older one, so at most one play can ever be in flight.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::cursor::{AdvanceOutcome, PlaylistCursor};
use crate::core::host::{LayerHandle, LayerSurface, MediaBackend};

//=== CyclePreset =========================================================

/// Named tap-response policies for the cycler.
///
/// Two behaviors exist in the field; neither is canonical, so both are
/// exposed and the host picks one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePreset {
    /// Every registered tap advances the playlist modulo and prepares the
    /// new item.
    CycleOnly,

    /// The first tap only reveals the display surface. Later taps advance;
    /// the tap after the final item conceals the surface and stops
    /// playback; the next tap reveals again and restarts from item 0.
    RevealThenCycle,
}

//=== CyclerConfig ========================================================

/// Cycler tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclerConfig {
    pub preset: CyclePreset,

    /// Whether the backend loops the current item.
    pub loop_each: bool,

    /// Seconds between prepare completion and playback start.
    pub start_delay: f64,

    /// Prepare item 0 during start().
    pub play_first_on_start: bool,
}

impl Default for CyclerConfig {
    fn default() -> Self {
        Self {
            preset: CyclePreset::CycleOnly,
            loop_each: true,
            start_delay: 0.0,
            play_first_on_start: true,
        }
    }
}

//=== Outcomes ============================================================

/// What a registered tap did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The reveal surface was shown; index unchanged, nothing prepared.
    Revealed { index: usize },

    /// Advanced to `index` and issued a prepare for it.
    Advanced { index: usize },

    /// The list was exhausted: surface concealed, playback stopped.
    Concealed,

    /// The playlist is empty; nothing changed.
    NoItems,
}

/// What to do with playback after a prepare completes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayDirective {
    /// Start playback immediately.
    Now,

    /// Schedule playback `delay` seconds out; the generation must still be
    /// current when the timer fires.
    After { delay: f64, generation: u64 },

    /// Stale or unexpected signal; do nothing.
    Ignore,
}

//=== MediaCycler =========================================================

/// Playlist advance policy plus the asynchronous prepare→play handshake.
pub struct MediaCycler {
    cursor: PlaylistCursor,
    config: CyclerConfig,
    reveal_surface: Option<LayerHandle>,

    //--- Reveal Choreography ----------------------------------------------
    revealed: bool,
    first_tap_seen: bool,
    in_gap: bool,

    //--- Prepare Handshake ------------------------------------------------
    prepare_generation: u64,
    awaiting_prepare: bool,
}

impl MediaCycler {
    //--- Construction -----------------------------------------------------

    pub fn new(config: CyclerConfig, item_count: usize) -> Self {
        Self {
            cursor: PlaylistCursor::new(item_count),
            config,
            reveal_surface: None,
            revealed: false,
            first_tap_seen: false,
            in_gap: false,
            prepare_generation: 0,
            awaiting_prepare: false,
        }
    }

    /// Binds the surface shown/hidden by the reveal choreography.
    pub fn with_reveal_surface(mut self, handle: LayerHandle) -> Self {
        self.reveal_surface = Some(handle);
        self
    }

    //--- Lifecycle --------------------------------------------------------

    /// Pushes looping config to the backend and optionally prepares the
    /// first item.
    pub fn start(&mut self, media: &mut dyn MediaBackend) {
        media.set_looping(self.config.loop_each);

        if self.config.play_first_on_start && self.cursor.item_count() > 0 {
            self.issue_prepare(media);
        }
    }

    //--- Tap Handling -----------------------------------------------------

    /// Registers one classified tap against the playlist.
    pub fn register_tap(
        &mut self,
        media: &mut dyn MediaBackend,
        surface: Option<&mut dyn LayerSurface>,
    ) -> CycleOutcome {
        match self.config.preset {
            CyclePreset::CycleOnly => self.advance_and_prepare(media),

            CyclePreset::RevealThenCycle => {
                if !self.first_tap_seen {
                    self.first_tap_seen = true;
                    self.set_revealed(true, surface);
                    return CycleOutcome::Revealed { index: self.cursor.index() };
                }

                if self.in_gap {
                    // Wrap back to the start and reshow
                    self.in_gap = false;
                    let outcome = self.advance_and_prepare(media);
                    self.set_revealed(true, surface);
                    return outcome;
                }

                if self.cursor.is_last() {
                    // List exhausted: conceal without advancing
                    debug!("playlist exhausted, concealing reveal surface");
                    self.in_gap = true;
                    self.set_revealed(false, surface);
                    media.stop();
                    self.invalidate_pending();
                    return CycleOutcome::Concealed;
                }

                self.advance_and_prepare(media)
            }
        }
    }

    //--- Prepare Handshake ------------------------------------------------

    /// Host callback: the most recently prepared item finished loading.
    ///
    /// Returns what to do with playback. Signals with no outstanding
    /// prepare (or one already superseded) are ignored.
    pub fn media_prepared(&mut self) -> PlayDirective {
        if !self.awaiting_prepare {
            debug!("ignoring media-prepared signal with no prepare outstanding");
            return PlayDirective::Ignore;
        }
        self.awaiting_prepare = false;

        if self.config.start_delay > 0.0 {
            PlayDirective::After {
                delay: self.config.start_delay,
                generation: self.prepare_generation,
            }
        } else {
            PlayDirective::Now
        }
    }

    /// Current prepare generation; a scheduled play is only valid while
    /// its generation matches.
    pub fn prepare_generation(&self) -> u64 {
        self.prepare_generation
    }

    //--- Queries ----------------------------------------------------------

    pub fn index(&self) -> usize {
        self.cursor.index()
    }

    pub fn item_count(&self) -> usize {
        self.cursor.item_count()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn config(&self) -> &CyclerConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    fn advance_and_prepare(&mut self, media: &mut dyn MediaBackend) -> CycleOutcome {
        match self.cursor.advance() {
            AdvanceOutcome::Advanced { index, .. } => {
                media.stop();
                self.issue_prepare(media);
                CycleOutcome::Advanced { index }
            }
            AdvanceOutcome::NoItems => CycleOutcome::NoItems,
        }
    }

    fn issue_prepare(&mut self, media: &mut dyn MediaBackend) {
        self.prepare_generation += 1;
        self.awaiting_prepare = true;
        debug!(
            "preparing playlist item {} (generation {})",
            self.cursor.index(),
            self.prepare_generation
        );
        media.prepare(self.cursor.index());
    }

    fn invalidate_pending(&mut self) {
        self.prepare_generation += 1;
        self.awaiting_prepare = false;
    }

    fn set_revealed(&mut self, on: bool, surface: Option<&mut dyn LayerSurface>) {
        self.revealed = on;
        if let (Some(surface), Some(handle)) = (surface, self.reveal_surface) {
            surface.set_active(handle, on);
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
