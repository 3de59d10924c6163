//=========================================================================
// Tap Classifier
//=========================================================================
//
// Turns a stream of raw contact begin/end events for one tracked actor
// into exactly one classified tap per encounter.
//
// Architecture:
//   ContactEvent → debounce → contact count → wait window → TapKind
//
// A second debounced contact inside the window resolves immediately as
// Double; window expiry (checked from the per-frame tick) resolves as
// Single. The wait window opens either at the first contact begin or at
// the first contact end, selected by ClassifyPolicy.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::event::ActorId;

//=== Defaults ============================================================

/// Maximum spacing between two contacts that still reads as a double tap.
pub const DEFAULT_DOUBLE_TAP_WINDOW: f64 = 0.8;

/// Minimum spacing between two raw contact begins before the second is
/// accepted as meaningful.
pub const DEFAULT_CONTACT_DEBOUNCE: f64 = 0.15;

/// Coarser debounce used by surfaces that only ever count single taps.
pub const COARSE_CONTACT_DEBOUNCE: f64 = 0.25;

//=== TapKind =============================================================

/// The resolved output of the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapKind {
    Single,
    Double,
}

//=== ClassifyPolicy ======================================================

/// Selects when the double-tap wait window opens.
///
/// Two strategies exist in the field and differ only in the window's
/// anchor point; both resolve a second debounced contact as Double
/// immediately.
///
/// - `OnEnter`: the window opens at the first contact begin.
/// - `OnExit`: the window opens when the first contact ends, so a slow
///   press does not eat into the wait time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyPolicy {
    OnEnter,
    OnExit,
}

//=== TapConfig ===========================================================

/// Classifier tuning parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapConfig {
    /// Seconds after the window opens before the encounter resolves Single.
    pub double_tap_window: f64,

    /// Seconds after an accepted begin during which further begins are
    /// ignored as switch bounce.
    pub contact_debounce: f64,

    /// Window anchor strategy.
    pub policy: ClassifyPolicy,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self {
            double_tap_window: DEFAULT_DOUBLE_TAP_WINDOW,
            contact_debounce: DEFAULT_CONTACT_DEBOUNCE,
            policy: ClassifyPolicy::OnEnter,
        }
    }
}

//=== TapClassifier =======================================================

/// Single/double tap disambiguation state machine.
///
/// Feed it `on_contact_begin` / `on_contact_end` as the host reports
/// trigger-volume overlaps, and `tick` once per frame. Each encounter
/// yields at most one [`TapKind`]: a second debounced contact inside the
/// wait window returns `Double` from `on_contact_begin` itself; otherwise
/// `tick` returns `Single` once the window lapses.
///
/// Contacts from actors rejected by the filter are ignored entirely.
///
/// # Example
///
/// ```
/// use vitrine::core::contact::{ActorId, TapClassifier, TapConfig, TapKind};
///
/// let hand = ActorId(1);
/// let mut classifier = TapClassifier::tracking(TapConfig::default(), hand);
///
/// assert_eq!(classifier.on_contact_begin(hand, 0.0), None);
/// assert_eq!(classifier.on_contact_begin(hand, 0.3), Some(TapKind::Double));
/// ```
pub struct TapClassifier {
    config: TapConfig,
    filter: Box<dyn Fn(ActorId) -> bool>,

    //--- Window State (reset after every classification) -----------------
    contact_count: u8,
    window_start: Option<f64>,
    last_begin: f64,
    debounce_until: f64,
}

impl TapClassifier {
    //--- Construction -----------------------------------------------------

    /// Creates a classifier that accepts contacts from any actor.
    pub fn new(config: TapConfig) -> Self {
        Self::with_filter(config, |_| true)
    }

    /// Creates a classifier that only reacts to the given actor.
    pub fn tracking(config: TapConfig, actor: ActorId) -> Self {
        Self::with_filter(config, move |a| a == actor)
    }

    /// Creates a classifier with a caller-supplied actor predicate.
    pub fn with_filter<F>(config: TapConfig, filter: F) -> Self
    where
        F: Fn(ActorId) -> bool + 'static,
    {
        Self {
            config,
            filter: Box::new(filter),
            contact_count: 0,
            window_start: None,
            last_begin: f64::NEG_INFINITY,
            debounce_until: f64::NEG_INFINITY,
        }
    }

    //--- Event Intake -----------------------------------------------------

    /// Registers a contact-begin at host time `t`.
    ///
    /// Returns `Some(TapKind::Double)` when this contact resolves the open
    /// encounter; `None` otherwise. A begin inside the debounce interval is
    /// dropped and the earlier contact still counts as the first.
    pub fn on_contact_begin(&mut self, actor: ActorId, t: f64) -> Option<TapKind> {
        if !(self.filter)(actor) {
            return None;
        }

        if t < self.debounce_until {
            return None;
        }

        // A window that lapsed without its timeout running yet is superseded:
        // the stale encounter is abandoned without emission and this contact
        // starts a fresh one (last contact sequence wins).
        if self.window_lapsed(t) {
            debug!("stale tap window superseded at t={:.3}", t);
            self.reset_window();
        }

        self.debounce_until = t + self.config.contact_debounce;
        self.last_begin = t;
        self.contact_count = self.contact_count.saturating_add(1);

        if self.contact_count >= 2 {
            self.reset_window();
            debug!("classified double tap at t={:.3}", t);
            return Some(TapKind::Double);
        }

        if self.config.policy == ClassifyPolicy::OnEnter {
            self.window_start = Some(t);
        }

        None
    }

    /// Registers a contact-end at host time `t`.
    ///
    /// Under [`ClassifyPolicy::OnExit`] the end of the first contact opens
    /// the wait window; otherwise this is a no-op.
    pub fn on_contact_end(&mut self, actor: ActorId, t: f64) {
        if !(self.filter)(actor) {
            return;
        }

        if self.config.policy == ClassifyPolicy::OnExit
            && self.contact_count == 1
            && self.window_start.is_none()
        {
            self.window_start = Some(t);
        }
    }

    /// Per-frame timeout check.
    ///
    /// Returns `Some(TapKind::Single)` once the open window lapses with no
    /// second contact. Authoritative only when no classifying event arrived
    /// first this frame, so callers run event intake before `tick`.
    pub fn tick(&mut self, now: f64) -> Option<TapKind> {
        let start = self.window_start?;

        if now - start > self.config.double_tap_window {
            self.reset_window();
            debug!("classified single tap at t={:.3}", now);
            return Some(TapKind::Single);
        }

        None
    }

    //--- Lifecycle --------------------------------------------------------

    /// Abandons any open window and clears the debounce history.
    ///
    /// Called on `stop()`; no timeout can resolve after this.
    pub fn reset(&mut self) {
        self.reset_window();
        self.last_begin = f64::NEG_INFINITY;
        self.debounce_until = f64::NEG_INFINITY;
    }

    //--- Queries ----------------------------------------------------------

    /// Returns true while a wait window is open.
    pub fn is_window_open(&self) -> bool {
        self.window_start.is_some()
    }

    pub fn config(&self) -> &TapConfig {
        &self.config
    }

    //--- Internal Helpers -------------------------------------------------

    fn window_lapsed(&self, now: f64) -> bool {
        if self.contact_count == 0 {
            return false;
        }

        // Under OnExit a first contact with no exit yet has no window; age
        // it from the accepted begin so it cannot pair across a long gap.
        let anchor = self.window_start.unwrap_or(self.last_begin);
        now - anchor > self.config.double_tap_window
    }

    fn reset_window(&mut self) {
        self.contact_count = 0;
        self.window_start = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const HAND: ActorId = ActorId(1);
    const PROP: ActorId = ActorId(9);

    fn classifier(policy: ClassifyPolicy) -> TapClassifier {
        TapClassifier::tracking(
            TapConfig { policy, ..TapConfig::default() },
            HAND,
        )
    }

    /// Drives tick in small steps and collects everything emitted.
    fn run_ticks(c: &mut TapClassifier, from: f64, to: f64) -> Vec<TapKind> {
        let mut taps = Vec::new();
        let mut now = from;
        while now <= to {
            if let Some(tap) = c.tick(now) {
                taps.push(tap);
            }
            now += 0.05;
        }
        taps
    }

    //=====================================================================
    // Double Tap Detection
    //=====================================================================

    #[test]
    fn two_begins_inside_window_classify_double() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        assert_eq!(c.on_contact_begin(HAND, 0.0), None);
        assert_eq!(c.on_contact_begin(HAND, 0.3), Some(TapKind::Double));

        // No trailing single after the encounter resolved
        assert!(run_ticks(&mut c, 0.35, 2.0).is_empty());
    }

    #[test]
    fn double_resolves_immediately_without_tick() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        let tap = c.on_contact_begin(HAND, 0.79);
        assert_eq!(tap, Some(TapKind::Double));
        assert!(!c.is_window_open());
    }

    /// begin(0) → end(0.05) → begin(0.3) → end(0.35) with window 0.8 and
    /// debounce 0.15 reads as exactly one double tap.
    #[test]
    fn enter_exit_pair_sequence_is_one_double() {
        for policy in [ClassifyPolicy::OnEnter, ClassifyPolicy::OnExit] {
            let mut c = classifier(policy);
            let mut taps = Vec::new();

            if let Some(t) = c.on_contact_begin(HAND, 0.0) {
                taps.push(t);
            }
            c.on_contact_end(HAND, 0.05);
            if let Some(t) = c.on_contact_begin(HAND, 0.3) {
                taps.push(t);
            }
            c.on_contact_end(HAND, 0.35);
            taps.extend(run_ticks(&mut c, 0.4, 2.0));

            assert_eq!(taps, vec![TapKind::Double], "policy {:?}", policy);
        }
    }

    //=====================================================================
    // Single Tap Detection
    //=====================================================================

    #[test]
    fn lone_begin_times_out_as_single() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        assert_eq!(c.tick(0.5), None, "window still open");
        assert_eq!(c.tick(0.81), Some(TapKind::Single));

        // Resolved exactly once
        assert!(run_ticks(&mut c, 0.85, 2.0).is_empty());
    }

    #[test]
    fn on_exit_window_anchors_at_contact_end() {
        let mut c = classifier(ClassifyPolicy::OnExit);

        c.on_contact_begin(HAND, 0.0);
        assert_eq!(c.tick(1.0), None, "no window until the contact ends");
        assert!(!c.is_window_open());

        c.on_contact_end(HAND, 1.2);
        assert!(c.is_window_open());
        assert_eq!(c.tick(1.9), None);
        assert_eq!(c.tick(2.01), Some(TapKind::Single));
    }

    #[test]
    fn single_then_fresh_window_starts_clean() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        assert_eq!(c.tick(0.9), Some(TapKind::Single));

        // Third contact opens a brand-new window, not stale state
        assert_eq!(c.on_contact_begin(HAND, 1.0), None);
        assert_eq!(c.on_contact_begin(HAND, 1.3), Some(TapKind::Double));
    }

    //=====================================================================
    // Debounce
    //=====================================================================

    #[test]
    fn begin_inside_debounce_is_ignored() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        // Bounce at 0.1 < 0.15: dropped, still counts as the first contact
        assert_eq!(c.on_contact_begin(HAND, 0.1), None);

        // A real second contact later still reads as double
        assert_eq!(c.on_contact_begin(HAND, 0.4), Some(TapKind::Double));
    }

    #[test]
    fn debounced_begin_does_not_move_the_window() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        c.on_contact_begin(HAND, 0.1); // bounce

        // Window still anchored at 0.0, lapses just past 0.8
        assert_eq!(c.tick(0.81), Some(TapKind::Single));
    }

    //=====================================================================
    // Actor Filtering
    //=====================================================================

    #[test]
    fn untracked_actors_are_ignored_entirely() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        assert_eq!(c.on_contact_begin(PROP, 0.0), None);
        assert!(!c.is_window_open());

        c.on_contact_begin(HAND, 0.1);
        // Prop contact is not the second tap
        assert_eq!(c.on_contact_begin(PROP, 0.4), None);
        c.on_contact_end(PROP, 0.5);
        assert!(c.is_window_open());

        assert_eq!(c.tick(0.95), Some(TapKind::Single));
    }

    #[test]
    fn custom_predicate_filters() {
        let mut c = TapClassifier::with_filter(TapConfig::default(), |a| a.0 < 10);

        assert_eq!(c.on_contact_begin(ActorId(42), 0.0), None);
        c.on_contact_begin(ActorId(3), 0.0);
        assert_eq!(c.on_contact_begin(ActorId(4), 0.3), Some(TapKind::Double));
    }

    //=====================================================================
    // Window Supersession
    //=====================================================================

    #[test]
    fn lapsed_window_is_superseded_without_emission() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        // Window A opens at 0.0 and lapses at 0.8, but no tick runs
        c.on_contact_begin(HAND, 0.0);

        // Fresh begin at 0.9 supersedes A and opens window B
        assert_eq!(c.on_contact_begin(HAND, 0.9), None);
        assert!(c.is_window_open());

        // Exactly one tap total, attributable to B
        let taps = run_ticks(&mut c, 0.95, 3.0);
        assert_eq!(taps, vec![TapKind::Single]);
    }

    #[test]
    fn superseded_window_pairs_with_next_contact() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        c.on_contact_begin(HAND, 1.0); // supersedes, opens B
        assert_eq!(c.on_contact_begin(HAND, 1.3), Some(TapKind::Double));
    }

    #[test]
    fn on_exit_unpaired_begin_ages_out() {
        let mut c = classifier(ClassifyPolicy::OnExit);

        // Contact begins but the exit report is lost
        c.on_contact_begin(HAND, 0.0);

        // Far outside the window: treated as a fresh first contact,
        // not the second half of a minutes-old encounter
        assert_eq!(c.on_contact_begin(HAND, 60.0), None);
        c.on_contact_end(HAND, 60.1);
        assert_eq!(c.tick(61.0), Some(TapKind::Single));
    }

    //=====================================================================
    // Lifecycle
    //=====================================================================

    #[test]
    fn reset_abandons_open_window() {
        let mut c = classifier(ClassifyPolicy::OnEnter);

        c.on_contact_begin(HAND, 0.0);
        c.reset();

        assert!(!c.is_window_open());
        assert!(run_ticks(&mut c, 0.0, 2.0).is_empty());

        // Debounce history cleared as well
        assert_eq!(c.on_contact_begin(HAND, 0.01), None);
        assert!(c.is_window_open());
    }

    #[test]
    fn config_defaults() {
        let config = TapConfig::default();
        assert_eq!(config.double_tap_window, DEFAULT_DOUBLE_TAP_WINDOW);
        assert_eq!(config.contact_debounce, DEFAULT_CONTACT_DEBOUNCE);
        assert_eq!(config.policy, ClassifyPolicy::OnEnter);
    }
}
