//=========================================================================
// Notifier
//=========================================================================
//
// Synchronous multi-subscriber notification registry.
//
// Architecture:
//   subscribe() → Vec<(SubscriberId, callback)> ← unsubscribe(id)
//                          ↓
//   emit(&event) → every live callback, in subscription order
//
// Replaces process-wide static event hookups: the registry is owned by a
// composition root, and subscribers hold ids they drop on teardown, so no
// listener can dangle past its owner.
//
//=========================================================================

//=== SubscriberId ========================================================

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

//=== Notifier ============================================================

/// Ordered registry of callbacks for one event type.
///
/// Dispatch is synchronous: `emit` invokes every subscriber before it
/// returns, in subscription order. Multiple independent subscribers may
/// listen to the same event stream (a screen toggler and a video advancer
/// both watching taps, for example).
pub struct Notifier<E> {
    subscribers: Vec<(SubscriberId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Notifier<E> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Registers a callback and returns its id.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriberId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a subscriber. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Drops every subscriber.
    pub fn clear(&mut self) {
        self.subscribers.clear();
    }

    //--- Dispatch ---------------------------------------------------------

    /// Invokes every subscriber with `event`, synchronously.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in self.subscribers.iter_mut() {
            callback(event);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn new_notifier_is_empty() {
        let notifier: Notifier<u32> = Notifier::new();
        assert!(notifier.is_empty());
        assert_eq!(notifier.len(), 0);
    }

    #[test]
    fn emit_reaches_all_subscribers() {
        let mut notifier: Notifier<u32> = Notifier::new();
        let seen_a = Rc::new(RefCell::new(Vec::new()));
        let seen_b = Rc::new(RefCell::new(Vec::new()));

        let a = seen_a.clone();
        notifier.subscribe(move |v| a.borrow_mut().push(*v));
        let b = seen_b.clone();
        notifier.subscribe(move |v| b.borrow_mut().push(*v));

        notifier.emit(&7);
        notifier.emit(&8);

        assert_eq!(*seen_a.borrow(), vec![7, 8]);
        assert_eq!(*seen_b.borrow(), vec![7, 8]);
    }

    #[test]
    fn dispatch_is_synchronous() {
        let mut notifier: Notifier<u32> = Notifier::new();
        let seen = Rc::new(RefCell::new(0u32));

        let s = seen.clone();
        notifier.subscribe(move |v| *s.borrow_mut() = *v);

        notifier.emit(&42);
        // Visible immediately after emit returns
        assert_eq!(*seen.borrow(), 42);
    }

    #[test]
    fn subscribers_run_in_subscription_order() {
        let mut notifier: Notifier<()> = Notifier::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let o = order.clone();
            notifier.subscribe(move |_| o.borrow_mut().push(tag));
        }

        notifier.emit(&());
        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn unsubscribe_removes_only_that_subscriber() {
        let mut notifier: Notifier<u32> = Notifier::new();
        let seen_a = Rc::new(RefCell::new(0));
        let seen_b = Rc::new(RefCell::new(0));

        let a = seen_a.clone();
        let id_a = notifier.subscribe(move |_| *a.borrow_mut() += 1);
        let b = seen_b.clone();
        notifier.subscribe(move |_| *b.borrow_mut() += 1);

        assert!(notifier.unsubscribe(id_a));
        notifier.emit(&0);

        assert_eq!(*seen_a.borrow(), 0);
        assert_eq!(*seen_b.borrow(), 1);
    }

    #[test]
    fn unsubscribe_twice_reports_gone() {
        let mut notifier: Notifier<u32> = Notifier::new();
        let id = notifier.subscribe(|_| {});

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut notifier: Notifier<u32> = Notifier::new();

        let first = notifier.subscribe(|_| {});
        notifier.unsubscribe(first);
        let second = notifier.subscribe(|_| {});

        assert_ne!(first, second);
    }

    #[test]
    fn clear_drops_everyone() {
        let mut notifier: Notifier<u32> = Notifier::new();
        notifier.subscribe(|_| {});
        notifier.subscribe(|_| {});

        notifier.clear();
        assert!(notifier.is_empty());
    }

    #[test]
    fn emit_with_no_subscribers_is_harmless() {
        let mut notifier: Notifier<u32> = Notifier::new();
        notifier.emit(&1);
    }
}
