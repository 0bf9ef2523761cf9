// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Source and derived atoms
//!
//! A [`Source`] is a single mutable cell that knows when it has changed, and who
//! wants to hear about it. A [`Derived`] is a pure computation over a [`Source`],
//! cached until the source moves on to a new [`Version`].
//!
//! There is no ambient registry here: derived atoms are always read by handing them
//! the source they are computed from, so the whole graph is owned by whoever owns
//! the atoms.
//!
//! ```
//! use textlens::atom::{Derived, Source};
//!
//! let text = Source::new(String::from("hello"));
//! let shout = Derived::new(|text: &String| text.to_uppercase());
//!
//! assert_eq!(*shout.read(&text), "HELLO");
//!
//! text.set(String::from("bye"));
//!
//! assert_eq!(*shout.read(&text), "BYE");
//! ```
use std::cell::{Cell, Ref, RefCell};
use std::fmt::{self, Debug};
use std::rc::Rc;

/// Change counter of a [`Source`]. Every change advances it by one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Version(u64);

impl Version {
    const fn initial() -> Self {
        Version(0)
    }

    fn bump(&mut self) {
        self.0 += 1;
    }
}

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SubscriptionId(u32);

/// Anything that can notify subscribers about its changes.
pub trait Observable {
    /// Register a callback invoked synchronously after every change.
    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static;

    /// Remove a previously registered callback. Returns `false` if `id` was
    /// not subscribed.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

type Subscriber = Rc<dyn Fn()>;

/// The single authoritative mutable cell.
pub struct Source<T> {
    value: RefCell<T>,
    version: Cell<Version>,
    next_id: Cell<u32>,
    subscribers: RefCell<Vec<(SubscriptionId, Subscriber)>>,
}

impl<T> Source<T> {
    pub fn new(value: T) -> Self {
        Source {
            value: RefCell::new(value),
            version: Cell::new(Version::initial()),
            next_id: Cell::new(0),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Borrow the current value.
    ///
    /// The borrow must be released before the source is written to again.
    pub fn read(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Get the value of the source if it implements `Copy`.
    pub fn get(&self) -> T
    where
        T: Copy,
    {
        *self.value.borrow()
    }

    pub fn version(&self) -> Version {
        self.version.get()
    }

    /// Replace the value. Writing a value equal to the current one is not a change:
    /// the version stays put and no subscriber is notified.
    ///
    /// ```
    /// # use textlens::atom::Source;
    /// let count = Source::new(1_u32);
    /// let v1 = count.version();
    ///
    /// count.set(1);
    /// assert_eq!(count.version(), v1);
    ///
    /// count.set(2);
    /// assert_ne!(count.version(), v1);
    /// assert_eq!(count.get(), 2);
    /// ```
    pub fn set(&self, value: T)
    where
        T: PartialEq,
    {
        {
            let mut current = self.value.borrow_mut();

            if *current == value {
                return;
            }
            *current = value;
        }

        self.changed();
    }

    /// Mutate the value in place. This is always considered a change.
    pub fn update<F, R>(&self, mutator: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let ret = mutator(&mut self.value.borrow_mut());

        self.changed();

        ret
    }

    fn changed(&self) {
        let mut version = self.version.get();
        version.bump();
        self.version.set(version);

        // Subscribers are free to (un)subscribe or write to the source,
        // so we never hold the list borrowed while calling them.
        let snapshot: Vec<Subscriber> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, sub)| sub.clone())
            .collect();

        for sub in snapshot {
            sub();
        }
    }
}

impl<T> Observable for Source<T> {
    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0.wrapping_add(1));

        self.subscribers.borrow_mut().push((id, Rc::new(callback)));

        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let len = subscribers.len();

        subscribers.retain(|(sid, _)| *sid != id);

        subscribers.len() != len
    }
}

impl<T> Default for Source<T>
where
    T: Default,
{
    fn default() -> Self {
        Source::new(T::default())
    }
}

impl<T> Debug for Source<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Source")
            .field("value", &*self.value.borrow())
            .field("version", &self.version.get())
            .finish()
    }
}

/// A value computed purely from a [`Source`], cached until the source changes.
///
/// Reads hand out shared handles to the cached value, so a value read before a
/// change stays valid (and unchanged) after it.
pub struct Derived<S, T> {
    compute: Box<dyn Fn(&S) -> T>,
    memo: RefCell<Option<(Version, Rc<T>)>>,
    computations: Cell<usize>,
}

impl<S, T> Derived<S, T> {
    pub fn new<F>(compute: F) -> Self
    where
        F: Fn(&S) -> T + 'static,
    {
        Derived {
            compute: Box::new(compute),
            memo: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    /// Get the derived value, recomputing it first if `source` has changed
    /// since the last read.
    pub fn read(&self, source: &Source<S>) -> Rc<T> {
        if let Some((version, value)) = &*self.memo.borrow() {
            if *version == source.version() {
                return value.clone();
            }
        }

        let value = Rc::new((self.compute)(&*source.read()));

        self.computations.set(self.computations.get() + 1);
        *self.memo.borrow_mut() = Some((source.version(), value.clone()));

        value
    }

    /// Get the derived value if it implements `Copy`.
    pub fn get(&self, source: &Source<S>) -> T
    where
        T: Copy,
    {
        *self.read(source)
    }

    /// `true` if the next read will have to recompute.
    pub fn is_stale(&self, source: &Source<S>) -> bool {
        match &*self.memo.borrow() {
            Some((version, _)) => *version != source.version(),
            None => true,
        }
    }

    /// Number of times this atom has run its computation.
    pub fn computations(&self) -> usize {
        self.computations.get()
    }
}

impl<S, T> Debug for Derived<S, T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Derived")
            .field("memo", &*self.memo.borrow())
            .field("computations", &self.computations.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
        let count = Rc::new(Cell::new(0));
        let handle = count.clone();

        (count, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn set_replaces_value() {
        let source = Source::new(String::from("first"));

        source.set(String::from("second"));
        source.set(String::from("third"));

        assert_eq!(*source.read(), "third");
    }

    #[test]
    fn equal_write_is_not_a_change() {
        let source = Source::new(String::from("same"));
        let (count, notify) = counter();
        source.subscribe(notify);

        let before = source.version();
        source.set(String::from("same"));

        assert_eq!(source.version(), before);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn update_always_notifies() {
        let source = Source::new(Vec::<u8>::new());
        let (count, notify) = counter();
        source.subscribe(notify);

        let len = source.update(|v| {
            v.push(1);
            v.len()
        });
        source.update(|_| ());

        assert_eq!(len, 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn subscribers_run_in_order() {
        let source = Source::new(0_i32);
        let log = Rc::new(RefCell::new(Vec::new()));

        for n in 0..3 {
            let log = log.clone();
            source.subscribe(move || log.borrow_mut().push(n));
        }

        source.set(1);

        assert_eq!(*log.borrow(), [0, 1, 2]);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let source = Source::new(0_i32);
        let (count, notify) = counter();
        let id = source.subscribe(notify);

        source.set(1);
        assert!(source.unsubscribe(id));
        assert!(!source.unsubscribe(id));
        source.set(2);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn subscriber_can_read_and_unsubscribe() {
        let source = Rc::new(Source::new(0_i32));
        let seen = Rc::new(Cell::new(0));

        let id = Rc::new(Cell::new(None));
        let sub = {
            let source = source.clone();
            let seen = seen.clone();
            let id = id.clone();

            source.clone().subscribe(move || {
                seen.set(source.get());

                if let Some(id) = id.take() {
                    source.unsubscribe(id);
                }
            })
        };
        id.set(Some(sub));

        source.set(7);
        source.set(8);

        assert_eq!(seen.get(), 7);
    }

    #[test]
    fn derived_is_memoized() {
        let source = Source::new(String::from("abc"));
        let upper = Derived::new(|s: &String| s.to_uppercase());

        assert!(upper.is_stale(&source));
        assert_eq!(*upper.read(&source), "ABC");
        assert_eq!(*upper.read(&source), "ABC");
        assert_eq!(upper.computations(), 1);

        source.set(String::from("abc"));
        assert!(!upper.is_stale(&source));

        source.set(String::from("xyz"));
        assert!(upper.is_stale(&source));
        assert_eq!(*upper.read(&source), "XYZ");
        assert_eq!(upper.computations(), 2);
    }

    #[test]
    fn derived_value_outlives_change() {
        let source = Source::new(String::from("hello"));
        let upper = Derived::new(|s: &String| s.to_uppercase());

        let old = upper.read(&source);
        source.set(String::from("bye"));

        assert_eq!(*upper.read(&source), "BYE");
        assert_eq!(*old, "HELLO");
    }

    #[test]
    fn version_advances_per_change() {
        let source = Source::new(0_u32);
        let start = source.version();

        for n in 1..=3 {
            source.set(n);
        }

        assert!(source.version() > start);
        assert_eq!(source.version(), Version(3));
    }

    #[test]
    fn derived_copy_values() {
        let source = Source::new(String::from("four"));
        let len = Derived::new(|s: &String| s.chars().count());

        assert_eq!(len.get(&source), 4);

        source.update(|s| s.clear());

        assert_eq!(len.get(&source), 0);
    }
}
