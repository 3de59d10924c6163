//=========================================================================
// Installation
//
// Composition root and host-facing facade.
//
// Architecture:
// ```text
//     InstallationBuilder  ──build()──>  Installation
//         │                                 │
//         ├─ with_double_tap_window()       ├─ start() / stop()
//         ├─ with_screen_layer()            ├─ on_contact_begin/end()
//         ├─ with_media()                   ├─ tick(now)
//         └─ with_light()                   └─ media_prepared(now)
// ```
//
// The host engine drives the facade from its main update path: contact
// events as its collision system reports them (directly or through a
// ContactFeed), one tick per frame, and a media_prepared call when an
// item finishes loading. Everything downstream is synchronous.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use crate::core::contact::{
    ActorId, ClassifyPolicy, ContactEvent, ContactKind, TapClassifier, TapConfig, TapKind,
};
use crate::core::host::{ContactFeed, LayerHandle, LayerSurface, LightRig, MediaBackend, Rgb};
use crate::core::lighting::{
    default_palette, BrightnessConfig, BrightnessControl, ColorCycler, CycleRequested,
};
use crate::core::playlist::{CycleOutcome, CyclePreset, CyclerConfig, MediaCycler, PlayDirective};
use crate::core::screen::{LayerTable, ScreenState, ScreenStateMachine};
use crate::core::signal::{Notifier, SubscriberId};
use crate::core::timer::{Scheduler, TimerHandle};

//=== TimerToken ==========================================================

/// Deferred actions owned by the installation's scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerToken {
    /// Start playback of a prepared item, if its generation is still
    /// current when the timer fires.
    PlayMedia { generation: u64 },
}

//=== InstallationBuilder =================================================

/// Builder for configuring and constructing an [`Installation`].
///
/// Host collaborators (surface, media backend, light rig) are optional:
/// a missing binding is warn-logged at build time and the corresponding
/// feature becomes a no-op rather than failing the installation.
///
/// # Default Values
///
/// - **Double tap window**: 0.8 s
/// - **Contact debounce**: 0.15 s
/// - **Classify policy**: `OnEnter`
/// - **Cycle preset**: `CycleOnly`, looping items, no start delay
/// - **Palette**: white / sea blue / natural yellow
///
/// # Examples
///
/// ```
/// use vitrine::prelude::*;
///
/// struct Surface;
/// impl LayerSurface for Surface {
///     fn set_active(&mut self, _layer: LayerHandle, _active: bool) {}
/// }
///
/// let mut installation = InstallationBuilder::new()
///     .with_tracked_actor(ActorId(1))
///     .with_screen_layer(ScreenState::On, LayerHandle(1))
///     .with_screen_layer(ScreenState::Passthrough, LayerHandle(2))
///     .with_surface(Box::new(Surface))
///     .build();
///
/// installation.start();
/// installation.on_contact_begin(ActorId(1), 0.0);
/// installation.tick(1.0);
/// assert_eq!(installation.screen_state(), ScreenState::On);
/// ```
pub struct InstallationBuilder {
    tap: TapConfig,
    cycler: CyclerConfig,
    filter: Option<Box<dyn Fn(ActorId) -> bool>>,
    layers: LayerTable,
    reveal_surface: Option<LayerHandle>,
    palette: Vec<Rgb>,
    brightness: BrightnessConfig,
    initial_intensity: f32,
    surface: Option<Box<dyn LayerSurface>>,
    media: Option<Box<dyn MediaBackend>>,
    item_count: usize,
    light: Option<Box<dyn LightRig>>,
    feed: Option<ContactFeed>,
}

impl InstallationBuilder {
    /// Creates a builder with default settings and no host bindings.
    pub fn new() -> Self {
        Self {
            tap: TapConfig::default(),
            cycler: CyclerConfig::default(),
            filter: None,
            layers: LayerTable::new(),
            reveal_surface: None,
            palette: default_palette(),
            brightness: BrightnessConfig::default(),
            initial_intensity: 1.0,
            surface: None,
            media: None,
            item_count: 0,
            light: None,
            feed: None,
        }
    }

    //--- Tap Classification -----------------------------------------------

    /// Sets the double-tap wait window in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `window <= 0.0`.
    pub fn with_double_tap_window(mut self, window: f64) -> Self {
        assert!(window > 0.0, "Double tap window must be positive, got {}", window);
        self.tap.double_tap_window = window;
        self
    }

    /// Sets the contact debounce in seconds.
    ///
    /// # Panics
    ///
    /// Panics if `debounce < 0.0`.
    pub fn with_contact_debounce(mut self, debounce: f64) -> Self {
        assert!(debounce >= 0.0, "Contact debounce must not be negative, got {}", debounce);
        self.tap.contact_debounce = debounce;
        self
    }

    /// Selects where the classification window anchors.
    pub fn with_classify_policy(mut self, policy: ClassifyPolicy) -> Self {
        self.tap.policy = policy;
        self
    }

    /// Reacts only to contacts from `actor`.
    pub fn with_tracked_actor(mut self, actor: ActorId) -> Self {
        self.filter = Some(Box::new(move |a| a == actor));
        self
    }

    /// Reacts only to contacts passing `filter`.
    pub fn with_actor_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(ActorId) -> bool + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    //--- Screen -----------------------------------------------------------

    /// Assigns the layer shown while the screen is in `state`.
    pub fn with_screen_layer(mut self, state: ScreenState, handle: LayerHandle) -> Self {
        self.layers.assign(state, handle);
        self
    }

    /// Binds the host surface that shows and hides layers.
    pub fn with_surface(mut self, surface: Box<dyn LayerSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    //--- Playlist ---------------------------------------------------------

    /// Binds the host media backend and the fixed playlist length.
    pub fn with_media(mut self, media: Box<dyn MediaBackend>, item_count: usize) -> Self {
        self.media = Some(media);
        self.item_count = item_count;
        self
    }

    /// Selects the tap-response preset for the playlist.
    pub fn with_cycle_preset(mut self, preset: CyclePreset) -> Self {
        self.cycler.preset = preset;
        self
    }

    /// Sets whether the backend loops each item.
    pub fn with_loop_playback(mut self, loop_each: bool) -> Self {
        self.cycler.loop_each = loop_each;
        self
    }

    /// Seconds between prepare completion and playback start.
    ///
    /// # Panics
    ///
    /// Panics if `delay < 0.0`.
    pub fn with_start_delay(mut self, delay: f64) -> Self {
        assert!(delay >= 0.0, "Start delay must not be negative, got {}", delay);
        self.cycler.start_delay = delay;
        self
    }

    /// Prepares the first item during start().
    pub fn with_play_first_on_start(mut self, play: bool) -> Self {
        self.cycler.play_first_on_start = play;
        self
    }

    /// Binds the surface revealed/concealed by the reveal preset.
    pub fn with_reveal_surface(mut self, handle: LayerHandle) -> Self {
        self.reveal_surface = Some(handle);
        self
    }

    //--- Lighting ---------------------------------------------------------

    /// Binds the host light rig.
    pub fn with_light(mut self, light: Box<dyn LightRig>) -> Self {
        self.light = Some(light);
        self
    }

    /// Replaces the color palette cycled on taps.
    pub fn with_palette(mut self, palette: Vec<Rgb>) -> Self {
        self.palette = palette;
        self
    }

    /// Configures brightness stepping and the starting intensity.
    pub fn with_brightness(mut self, config: BrightnessConfig, initial: f32) -> Self {
        self.brightness = config;
        self.initial_intensity = initial;
        self
    }

    //--- Contacts ---------------------------------------------------------

    /// Attaches a cross-thread contact feed drained every tick.
    pub fn with_contact_feed(mut self, feed: ContactFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    //--- Build ------------------------------------------------------------

    /// Builds the installation.
    ///
    /// Missing host bindings are reported here, once, and leave the
    /// affected feature disabled.
    pub fn build(self) -> Installation {
        if self.surface.is_none() {
            warn!("no layer surface bound; layer activation is disabled");
        }
        if self.media.is_none() {
            warn!("no media backend bound; playlist cycling is disabled");
        }
        if self.light.is_none() {
            warn!("no light rig bound; lighting control is disabled");
        }
        if self.cycler.preset == CyclePreset::RevealThenCycle && self.reveal_surface.is_none() {
            warn!("reveal preset selected without a reveal surface");
        }

        let classifier = match self.filter {
            Some(filter) => TapClassifier::with_filter(self.tap, filter),
            None => TapClassifier::new(self.tap),
        };

        let mut cycler = MediaCycler::new(self.cycler, self.item_count);
        if let Some(handle) = self.reveal_surface {
            cycler = cycler.with_reveal_surface(handle);
        }

        info!(
            "installation built (window: {}s, debounce: {}s, {} playlist items)",
            self.tap.double_tap_window, self.tap.contact_debounce, self.item_count
        );

        Installation {
            started: false,
            classifier,
            screen: ScreenStateMachine::new(self.layers),
            cycler,
            color: ColorCycler::new(self.palette),
            brightness: BrightnessControl::new(self.brightness, self.initial_intensity),
            scheduler: Scheduler::new(),
            pending_play: None,
            taps: Notifier::new(),
            state_changes: Notifier::new(),
            cycle_requests: Notifier::new(),
            surface: self.surface,
            media: self.media,
            light: self.light,
            feed: self.feed,
            drain_buf: Vec::new(),
        }
    }
}

impl Default for InstallationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Installation ========================================================

/// Runtime facade owning every core subsystem and the host bindings.
///
/// All entry points are driven from the host's main update path; nothing
/// here is thread-safe or needs to be. The only deferred work is the
/// play-after-prepare action, held in the installation's own scheduler
/// and cancelled on [`stop`](Installation::stop).
pub struct Installation {
    started: bool,

    //--- Core Systems -----------------------------------------------------
    classifier: TapClassifier,
    screen: ScreenStateMachine,
    cycler: MediaCycler,
    color: ColorCycler,
    brightness: BrightnessControl,
    scheduler: Scheduler<TimerToken>,
    pending_play: Option<TimerHandle>,

    //--- Subscriber Registries --------------------------------------------
    taps: Notifier<TapKind>,
    state_changes: Notifier<ScreenState>,
    cycle_requests: Notifier<CycleRequested>,

    //--- Host Bindings ----------------------------------------------------
    surface: Option<Box<dyn LayerSurface>>,
    media: Option<Box<dyn MediaBackend>>,
    light: Option<Box<dyn LightRig>>,
    feed: Option<ContactFeed>,
    drain_buf: Vec<ContactEvent>,
}

impl Installation {
    /// Shorthand for [`InstallationBuilder::new`].
    pub fn builder() -> InstallationBuilder {
        InstallationBuilder::new()
    }

    //--- Lifecycle --------------------------------------------------------

    /// Begins reacting to host events.
    ///
    /// Pushes looping config to the media backend, optionally prepares the
    /// first playlist item, and puts the layer assignment for the initial
    /// screen state into effect.
    pub fn start(&mut self) {
        if self.started {
            warn!("start() called while already running");
            return;
        }
        self.started = true;

        if let Some(media) = self.media.as_deref_mut() {
            self.cycler.start(media);
        }
        if let Some(surface) = self.surface.as_deref_mut() {
            self.screen.apply_layers(surface);
        }

        info!("installation started");
    }

    /// Stops reacting to host events.
    ///
    /// Clears the scheduler and abandons any open tap window; no timer or
    /// timeout resolved before the next start() can fire afterwards.
    pub fn stop(&mut self) {
        if !self.started {
            return;
        }
        self.started = false;

        self.scheduler.clear();
        self.pending_play = None;
        self.classifier.reset();

        info!("installation stopped");
    }

    //--- Host Input Surface -----------------------------------------------

    /// Host report: the tracked actor began overlapping the tap trigger.
    pub fn on_contact_begin(&mut self, actor: ActorId, t: f64) {
        if !self.started {
            return;
        }
        if let Some(tap) = self.classifier.on_contact_begin(actor, t) {
            self.dispatch_tap(tap, t);
        }
    }

    /// Host report: the tracked actor stopped overlapping the tap trigger.
    pub fn on_contact_end(&mut self, actor: ActorId, t: f64) {
        if !self.started {
            return;
        }
        self.classifier.on_contact_end(actor, t);
    }

    /// Per-frame update at host time `now`.
    ///
    /// Drains the contact feed in arrival order, then runs the classifier
    /// timeout check (classifying events beat same-frame timeouts), then
    /// fires due scheduler entries.
    pub fn tick(&mut self, now: f64) {
        if !self.started {
            return;
        }

        if let Some(mut feed) = self.feed.take() {
            let mut buf = std::mem::take(&mut self.drain_buf);
            feed.drain_frame(&mut buf);
            self.feed = Some(feed);

            for event in buf.drain(..) {
                self.route_contact(event);
            }
            self.drain_buf = buf;
        }

        if let Some(tap) = self.classifier.tick(now) {
            self.dispatch_tap(tap, now);
        }

        for token in self.scheduler.fire_due(now) {
            self.handle_timer(token);
        }
    }

    /// Host report: the most recently prepared media item is playable.
    pub fn media_prepared(&mut self, now: f64) {
        if !self.started {
            return;
        }

        match self.cycler.media_prepared() {
            PlayDirective::Now => {
                if let Some(media) = self.media.as_deref_mut() {
                    media.play();
                }
            }
            PlayDirective::After { delay, generation } => {
                self.cancel_pending_play();
                let handle = self
                    .scheduler
                    .schedule(now + delay, TimerToken::PlayMedia { generation });
                self.pending_play = Some(handle);
            }
            PlayDirective::Ignore => {}
        }
    }

    /// Host request for a color cycle outside the tap path (a physical
    /// button, an operator key).
    pub fn request_color_cycle(&mut self, now: f64) {
        if !self.started {
            return;
        }
        self.cycle_requests.emit(&CycleRequested);
        if let Some(light) = self.light.as_deref_mut() {
            self.color.cycle(now, light);
        }
    }

    /// Raises light intensity for `dt` seconds of held input.
    pub fn brightness_up(&mut self, dt: f64) {
        if !self.started {
            return;
        }
        if let Some(light) = self.light.as_deref_mut() {
            self.brightness.raise(dt, light);
        }
    }

    /// Lowers light intensity for `dt` seconds of held input.
    pub fn brightness_down(&mut self, dt: f64) {
        if !self.started {
            return;
        }
        if let Some(light) = self.light.as_deref_mut() {
            self.brightness.lower(dt, light);
        }
    }

    //--- Subscriptions ----------------------------------------------------

    /// Subscribes to classified taps.
    pub fn on_tap<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&TapKind) + 'static,
    {
        self.taps.subscribe(callback)
    }

    pub fn off_tap(&mut self, id: SubscriberId) -> bool {
        self.taps.unsubscribe(id)
    }

    /// Subscribes to screen state changes.
    pub fn on_state_changed<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&ScreenState) + 'static,
    {
        self.state_changes.subscribe(callback)
    }

    pub fn off_state_changed(&mut self, id: SubscriberId) -> bool {
        self.state_changes.unsubscribe(id)
    }

    /// Subscribes to color-cycle requests.
    pub fn on_cycle_requested<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&CycleRequested) + 'static,
    {
        self.cycle_requests.subscribe(callback)
    }

    pub fn off_cycle_requested(&mut self, id: SubscriberId) -> bool {
        self.cycle_requests.unsubscribe(id)
    }

    //--- Queries ----------------------------------------------------------

    pub fn is_running(&self) -> bool {
        self.started
    }

    pub fn screen_state(&self) -> ScreenState {
        self.screen.state()
    }

    pub fn playlist_index(&self) -> usize {
        self.cycler.index()
    }

    pub fn light_intensity(&self) -> f32 {
        self.brightness.intensity()
    }

    //--- Internal Routing -------------------------------------------------

    fn route_contact(&mut self, event: ContactEvent) {
        match event.kind {
            ContactKind::Enter => {
                if let Some(tap) = self.classifier.on_contact_begin(event.actor, event.at) {
                    self.dispatch_tap(tap, event.at);
                }
            }
            ContactKind::Exit => self.classifier.on_contact_end(event.actor, event.at),
        }
    }

    fn dispatch_tap(&mut self, tap: TapKind, now: f64) {
        debug!("dispatching {:?} at t={:.3}", tap, now);
        self.taps.emit(&tap);

        // Screen layers and state notification, synchronous
        let surface: Option<&mut dyn LayerSurface> = match self.surface {
            Some(ref mut surface) => Some(surface.as_mut()),
            None => None,
        };
        self.screen.handle_tap(tap, surface, &mut self.state_changes);

        // The light palette follows every registered tap
        self.cycle_requests.emit(&CycleRequested);
        if let Some(light) = self.light.as_deref_mut() {
            self.color.cycle(now, light);
        }

        // Playlist advance, decoupled from the screen state
        let outcome = match self.media.as_deref_mut() {
            Some(media) => {
                let surface: Option<&mut dyn LayerSurface> = match self.surface {
                    Some(ref mut surface) => Some(surface.as_mut()),
                    None => None,
                };
                Some(self.cycler.register_tap(media, surface))
            }
            None => None,
        };
        if matches!(
            outcome,
            Some(CycleOutcome::Advanced { .. } | CycleOutcome::Concealed)
        ) {
            self.cancel_pending_play();
        }
    }

    fn handle_timer(&mut self, token: TimerToken) {
        match token {
            TimerToken::PlayMedia { generation } => {
                self.pending_play = None;
                if generation == self.cycler.prepare_generation() {
                    if let Some(media) = self.media.as_deref_mut() {
                        media.play();
                    }
                } else {
                    debug!("discarding superseded play action");
                }
            }
        }
    }

    fn cancel_pending_play(&mut self) {
        if let Some(handle) = self.pending_play.take() {
            self.scheduler.cancel(handle);
        }
    }
}

//=========================================================================
// Integration Tests
//=========================================================================
