// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # The text state container
//!
//! [`TextState`] owns the one piece of authoritative state, the text, together with
//! the two atoms derived from it. It's meant to be owned by the root of the UI and
//! handed down to views by reference.
//!
//! ```
//! use textlens::state::TextState;
//!
//! let state = TextState::new();
//!
//! assert_eq!(*state.uppercase(), "HELLO");
//! assert_eq!(state.length(), 5);
//!
//! state.set_text("Test 123");
//!
//! assert_eq!(*state.uppercase(), "TEST 123");
//! assert_eq!(state.length(), 8);
//! ```
use std::cell::Ref;
use std::rc::Rc;

use crate::atom::{Derived, Observable, Source, SubscriptionId};

/// Text the state starts out with.
pub const DEFAULT_TEXT: &str = "hello";

pub struct TextState {
    text: Source<String>,
    uppercase: Derived<String, String>,
    length: Derived<String, usize>,
}

impl TextState {
    pub fn new() -> Self {
        TextState::with_text(DEFAULT_TEXT)
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        TextState {
            text: Source::new(text.into()),
            uppercase: Derived::new(|text: &String| text.to_uppercase()),
            length: Derived::new(|text: &String| text.encode_utf16().count()),
        }
    }

    /// Current text.
    ///
    /// The borrow must be released before [`set_text`](TextState::set_text) is called.
    pub fn text(&self) -> Ref<'_, String> {
        self.text.read()
    }

    /// Replace the text with a new value.
    pub fn set_text(&self, text: impl Into<String>) {
        self.text.set(text.into());
    }

    /// Text with every character mapped to its uppercase equivalent.
    ///
    /// The mapping is locale-independent, and a single character can expand to
    /// many, eg. `ß` turns into `SS`.
    ///
    /// The returned handle can be held across edits, it keeps the value it was read with.
    pub fn uppercase(&self) -> Rc<String> {
        self.uppercase.read(&self.text)
    }

    /// Length of the text in UTF-16 code units, the same number a browser reports
    /// for the value of a text field. Characters outside the Basic Multilingual
    /// Plane, like emoji, count as two.
    pub fn length(&self) -> usize {
        self.length.get(&self.text)
    }

    /// Owned copy of the text and everything derived from it.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text().clone(),
            uppercase: String::clone(&self.uppercase()),
            length: self.length(),
        }
    }

    #[cfg(test)]
    fn computations(&self) -> (usize, usize) {
        (self.uppercase.computations(), self.length.computations())
    }
}

impl Default for TextState {
    fn default() -> Self {
        TextState::new()
    }
}

impl Observable for TextState {
    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + 'static,
    {
        self.text.subscribe(callback)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.text.unsubscribe(id)
    }
}

/// Consistent, owned view of a [`TextState`] at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub text: String,
    pub uppercase: String,
    pub length: usize,
}
