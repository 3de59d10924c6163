//=========================================================================
// Contact Feed
//=========================================================================
//
// Bounded channel carrying contact events from a host thread into the
// logic tick.
//
// Architecture:
//   host collision callback → ContactSender → channel → ContactFeed
//                                                          ↓
//   Installation::tick() ← drain_frame() (bounded per frame)
//
// Hosts that deliver contacts on the logic thread can skip the feed and
// call the installation's contact methods directly.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::contact::{ActorId, ContactEvent};

//=== Constants ===========================================================

/// Per-frame drain cap; prevents a backlogged host from starving the tick.
const MAX_CONTACTS_PER_FRAME: usize = 64;

//=== Channel Construction ================================================

/// Creates a bounded sender/feed pair with the given channel capacity.
///
/// # Panics
///
/// Panics if `capacity == 0`.
pub fn contact_channel(capacity: usize) -> (ContactSender, ContactFeed) {
    assert!(capacity > 0, "Contact channel capacity must be positive");

    let (tx, rx) = bounded(capacity);
    (ContactSender { tx }, ContactFeed { rx })
}

//=== ContactSender =======================================================

/// Host-side handle for publishing contact events.
///
/// Cloneable; safe to hand to the host's collision callback thread.
#[derive(Clone)]
pub struct ContactSender {
    tx: Sender<ContactEvent>,
}

impl ContactSender {
    /// Reports a contact begin. Returns false if the event was dropped
    /// (channel full or the core side is gone).
    pub fn contact_begin(&self, actor: ActorId, at: f64) -> bool {
        self.send(ContactEvent::enter(actor, at))
    }

    /// Reports a contact end. Returns false if the event was dropped.
    pub fn contact_end(&self, actor: ActorId, at: f64) -> bool {
        self.send(ContactEvent::exit(actor, at))
    }

    fn send(&self, event: ContactEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!("contact feed full, dropping {:?}", event.kind);
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

//=== ContactFeed =========================================================

/// Core-side receiver drained once per tick.
pub struct ContactFeed {
    rx: Receiver<ContactEvent>,
}

impl ContactFeed {
    /// Drains pending contacts into `sink` in arrival order, bounded to
    /// [`MAX_CONTACTS_PER_FRAME`]. Returns the number drained.
    pub fn drain_frame(&mut self, sink: &mut Vec<ContactEvent>) -> usize {
        let mut drained = 0;

        while drained < MAX_CONTACTS_PER_FRAME {
            match self.rx.try_recv() {
                Ok(event) => {
                    sink.push(event);
                    drained += 1;
                }
                Err(_) => break,
            }
        }

        if drained >= MAX_CONTACTS_PER_FRAME {
            warn!("contact backlog: drained {} events this frame", drained);
        }

        drained
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
