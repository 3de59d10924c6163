//=========================================================================
// Contact Events
//=========================================================================
//
// Raw trigger-volume contact events delivered by the host engine.
//
// The host's collision system reports when a tracked actor starts or stops
// overlapping a trigger volume. Events carry the host clock timestamp at
// which the contact occurred; the core never reads wall-clock time itself.
//
//=========================================================================

//=== ActorId =============================================================

/// Host-assigned identity of a colliding actor (a hand, a controller, a
/// player capsule).
///
/// The classifier filters on this via a caller-supplied predicate, so only
/// the designated interacting actor registers taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(pub u32);

//=== ContactKind =========================================================

/// Whether the actor started or stopped overlapping the trigger volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Enter,
    Exit,
}

//=== ContactEvent ========================================================

/// One contact begin/end report from the host.
///
/// Consumed immediately by the classifier; never stored beyond the current
/// classification window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub actor: ActorId,
    pub kind: ContactKind,
    /// Host clock seconds at which the contact occurred.
    pub at: f64,
}

impl ContactEvent {
    /// Shorthand for a contact-begin event.
    pub fn enter(actor: ActorId, at: f64) -> Self {
        Self { actor, kind: ContactKind::Enter, at }
    }

    /// Shorthand for a contact-end event.
    pub fn exit(actor: ActorId, at: f64) -> Self {
        Self { actor, kind: ContactKind::Exit, at }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
