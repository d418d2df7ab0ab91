/*!
# Events

Ordered listener lists used by algorithms (and [`TaggedEdge`](crate::edge::TaggedEdge)) to
publish what they are doing without knowing who is listening.

- [`Event::subscribe`] appends a listener and returns a [`Subscription`]
- listeners are invoked in subscription order by [`Event::fire`]
- dropping the [`Subscription`] removes the listener again, also during unwinding

Listener lists are single threaded (`Rc<RefCell<_>>`). A listener may subscribe or detach
listeners of the event that is currently firing; new listeners only see later firings and
detached ones are not invoked for the remainder of the current firing.
*/

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

type Listener<A> = Box<dyn FnMut(&A)>;

struct Listeners<A> {
    next_id: u64,
    entries: Vec<(u64, Listener<A>)>,
    firing: usize,
    detached_while_firing: Vec<u64>,
}

impl<A> Listeners<A> {
    fn detach(&mut self, id: u64) {
        self.entries.retain(|(x, _)| *x != id);
        if self.firing > 0 {
            self.detached_while_firing.push(id);
        }
    }
}

/// An ordered list of listeners receiving `&A` whenever the event fires.
pub struct Event<A> {
    inner: Rc<RefCell<Listeners<A>>>,
}

impl<A> Event<A> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Listeners {
                next_id: 0,
                entries: Vec::new(),
                firing: 0,
                detached_while_firing: Vec::new(),
            })),
        }
    }

    /// Invokes every attached listener with `arg`, in subscription order.
    pub fn fire(&self, arg: &A) {
        let mut active = {
            let mut inner = self.inner.borrow_mut();
            if inner.entries.is_empty() {
                return;
            }
            inner.firing += 1;
            std::mem::take(&mut inner.entries)
        };

        for (id, listener) in active.iter_mut() {
            let detached = self.inner.borrow().detached_while_firing.contains(id);
            if !detached {
                listener(arg);
            }
        }

        let mut inner = self.inner.borrow_mut();
        inner.firing -= 1;
        let added = std::mem::replace(&mut inner.entries, active);
        inner.entries.extend(added);
        if inner.firing == 0 {
            let detached = std::mem::take(&mut inner.detached_while_firing);
            inner.entries.retain(|(id, _)| !detached.contains(id));
        }
    }

    /// Number of attached listeners
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    /// Returns *true* if at least one listener is attached
    pub fn has_listeners(&self) -> bool {
        self.listener_count() > 0
    }
}

impl<A: 'static> Event<A> {
    /// Appends `listener` to the end of the list.
    /// The listener stays attached as long as the returned [`Subscription`] is alive.
    #[must_use = "dropping the subscription detaches the listener immediately"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&A) + 'static,
    {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.entries.push((id, Box::new(listener)));
            id
        };

        let weak: Weak<RefCell<Listeners<A>>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().detach(id);
            }
        })
    }
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("listeners", &self.inner.borrow().entries.len())
            .finish()
    }
}

/// Scoped attachment of one or more listeners.
///
/// Dropping the subscription detaches everything it holds. Subscriptions of observers that
/// listen to several events are combined with [`Subscription::join`].
#[must_use = "dropping the subscription detaches the listener immediately"]
pub struct Subscription {
    detachers: Vec<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new<F: FnOnce() + 'static>(detach: F) -> Self {
        Self {
            detachers: vec![Box::new(detach)],
        }
    }

    /// A subscription holding nothing
    pub fn empty() -> Self {
        Self {
            detachers: Vec::new(),
        }
    }

    /// Combines two subscriptions into one that detaches both
    pub fn join(mut self, mut other: Subscription) -> Self {
        self.detachers.append(&mut other.detachers);
        self
    }

    /// Detaches now. Equivalent to dropping.
    pub fn detach(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for detach in self.detachers.drain(..) {
            detach();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("listeners", &self.detachers.len())
            .finish()
    }
}
