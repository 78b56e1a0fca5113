//! Host environment: the document plus user preference media queries.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use once_cell::unsync::OnceCell;

use crate::dom::Document;

/// Media query reporting the reduced-motion accessibility preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

type Listener = Rc<dyn Fn(bool)>;

struct MediaQueryState {
    query: String,
    matches: Cell<bool>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

/// A live media query whose match state can change over time.
#[derive(Clone)]
pub struct MediaQuery {
    state: Rc<MediaQueryState>,
}

impl MediaQuery {
    pub fn new(query: impl Into<String>, matches: bool) -> Self {
        Self {
            state: Rc::new(MediaQueryState {
                query: query.into(),
                matches: Cell::new(matches),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    pub fn query(&self) -> &str {
        &self.state.query
    }

    pub fn matches(&self) -> bool {
        self.state.matches.get()
    }

    /// Update the match state, notifying listeners if it changed.
    pub fn set_matches(&self, matches: bool) {
        if self.state.matches.replace(matches) == matches {
            return;
        }

        // Snapshot so listeners may add or drop subscriptions while running
        let listeners: Vec<Listener> =
            self.state.listeners.borrow().iter().map(|(_, l)| Rc::clone(l)).collect();
        for listener in listeners {
            listener(matches);
        }
    }

    /// Register a change listener. It stays registered until the returned
    /// guard is dropped.
    pub fn add_listener(&self, listener: impl Fn(bool) + 'static) -> MediaListener {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        self.state.listeners.borrow_mut().push((id, Rc::new(listener)));
        MediaListener { state: Rc::downgrade(&self.state), id }
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }
}

impl std::fmt::Debug for MediaQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaQuery")
            .field("query", &self.state.query)
            .field("matches", &self.matches())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Guard for a media query listener; removes the listener on drop.
pub struct MediaListener {
    state: Weak<MediaQueryState>,
    id: u64,
}

impl Drop for MediaListener {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            state.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

/// Document and preferences an element is mounted into.
#[derive(Debug, Clone)]
pub struct Host {
    document: Document,
    reduced_motion: MediaQuery,
}

thread_local! {
    static CURRENT_HOST: OnceCell<Host> = const { OnceCell::new() };
}

impl Host {
    /// A fresh host with an empty document and no reduced-motion preference.
    pub fn new() -> Self {
        Self::with_reduced_motion(false)
    }

    pub fn with_reduced_motion(reduced: bool) -> Self {
        Self {
            document: Document::new(),
            reduced_motion: MediaQuery::new(REDUCED_MOTION_QUERY, reduced),
        }
    }

    /// The host for the current thread, created on first use.
    pub fn current() -> Host {
        CURRENT_HOST.with(|cell| cell.get_or_init(Host::new).clone())
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn reduced_motion(&self) -> &MediaQuery {
        &self.reduced_motion
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listener_notified_on_change_only() {
        let query = MediaQuery::new(REDUCED_MOTION_QUERY, false);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _guard = query.add_listener(move |m| sink.borrow_mut().push(m));

        query.set_matches(false);
        query.set_matches(true);
        query.set_matches(true);
        query.set_matches(false);

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_guard_drop_releases_listener() {
        let query = MediaQuery::new(REDUCED_MOTION_QUERY, false);
        let guard = query.add_listener(|_| {});
        let other = query.add_listener(|_| {});
        assert_eq!(query.listener_count(), 2);

        drop(guard);
        assert_eq!(query.listener_count(), 1);
        drop(other);
        assert_eq!(query.listener_count(), 0);
    }

    #[test]
    fn test_guard_outliving_query_is_harmless() {
        let query = MediaQuery::new("(min-width: 10px)", true);
        let guard = query.add_listener(|_| {});
        drop(query);
        drop(guard);
    }

    #[test]
    fn test_current_host_is_shared_per_thread() {
        let a = Host::current();
        let b = Host::current();
        assert!(Rc::ptr_eq(&a.document().body(), &b.document().body()));
        assert_eq!(a.reduced_motion().query(), REDUCED_MOTION_QUERY);
    }
}
