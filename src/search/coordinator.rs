//! Broadcast of the current search mode.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::domain::UserId;

/// What the user list is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchModeState {
    /// Paginated listing.
    #[default]
    Browsing,
    /// A single user whose existence has been confirmed.
    Searching(UserId),
}

impl SearchModeState {
    #[must_use]
    pub const fn searched_id(self) -> Option<UserId> {
        match self {
            Self::Browsing => None,
            Self::Searching(id) => Some(id),
        }
    }
}

type Observer = Box<dyn FnMut(SearchModeState)>;

#[derive(Default)]
struct Registry {
    state: SearchModeState,
    observers: Vec<(u64, Observer)>,
    next_id: u64,
    notifying: bool,
    dirty: bool,
    removed: Vec<u64>,
}

/// Holds the [`SearchModeState`] and notifies subscribers of every change.
///
/// Clones share one registry, so the header and the list view can each hold
/// a handle to the same coordinator. Separate `new()` calls are fully
/// isolated from each other.
///
/// Notification is synchronous and runs in subscription order. A transition
/// published from inside an observer updates the state at once; subscribers
/// then get one more round with the latest state after the current round
/// finishes.
///
/// # Examples
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use userdeck::search::{SearchModeCoordinator, SearchModeState};
/// use userdeck::UserId;
///
/// let coordinator = SearchModeCoordinator::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// let _subscription = coordinator.subscribe(move |state| sink.borrow_mut().push(state));
///
/// let id = UserId::new(5).unwrap();
/// coordinator.set_search_mode(id);
/// coordinator.clear_search_mode();
///
/// assert_eq!(
///     *seen.borrow(),
///     vec![
///         SearchModeState::Browsing,
///         SearchModeState::Searching(id),
///         SearchModeState::Browsing,
///     ]
/// );
/// ```
#[derive(Clone, Default)]
pub struct SearchModeCoordinator {
    registry: Rc<RefCell<Registry>>,
}

impl SearchModeCoordinator {
    /// Creates a coordinator in [`SearchModeState::Browsing`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> SearchModeState {
        self.registry.borrow().state
    }

    /// Switches to `Searching(id)`, even if that is already the state.
    pub fn set_search_mode(&self, id: UserId) {
        self.publish(SearchModeState::Searching(id));
    }

    /// Switches back to `Browsing`.
    pub fn clear_search_mode(&self) {
        self.publish(SearchModeState::Browsing);
    }

    /// Registers `observer`, calling it once right away with the current
    /// state.
    ///
    /// Notifications stop when the returned [`Subscription`] is dropped.
    pub fn subscribe<F>(&self, mut observer: F) -> Subscription
    where
        F: FnMut(SearchModeState) + 'static,
    {
        observer(self.current());

        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Box::new(observer)));
        tracing::debug!(subscriber = id, total = registry.observers.len(), "search mode subscriber added");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().observers.len()
    }

    fn publish(&self, next: SearchModeState) {
        {
            let mut registry = self.registry.borrow_mut();
            tracing::debug!(from = ?registry.state, to = ?next, "search mode transition");
            registry.state = next;
            if registry.notifying {
                registry.dirty = true;
                return;
            }
            registry.notifying = true;
        }

        loop {
            let (mut observers, state) = {
                let mut registry = self.registry.borrow_mut();
                (std::mem::take(&mut registry.observers), registry.state)
            };

            for (id, observer) in &mut observers {
                let cancelled = self.registry.borrow().removed.contains(id);
                if !cancelled {
                    observer(state);
                }
            }

            let mut registry = self.registry.borrow_mut();
            observers.append(&mut registry.observers);
            let removed = std::mem::take(&mut registry.removed);
            observers.retain(|(id, _)| !removed.contains(id));
            registry.observers = observers;

            if registry.dirty {
                registry.dirty = false;
            } else {
                registry.notifying = false;
                break;
            }
        }
    }
}

impl fmt::Debug for SearchModeCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.registry.borrow();
        f.debug_struct("SearchModeCoordinator")
            .field("state", &registry.state)
            .field("subscribers", &registry.observers.len())
            .finish()
    }
}

/// Keeps an observer registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut registry = registry.borrow_mut();
        registry.observers.retain(|(id, _)| *id != self.id);
        if registry.notifying {
            registry.removed.push(self.id);
        }
        tracing::debug!(subscriber = self.id, "search mode subscriber removed");
    }
}
