// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Textlens
//!
//! _Reactive text binding for the web._
//!
//! One text field, and everything that can be derived from it. **Textlens** is split
//! into two layers:
//!
//! * A state layer: a [`Source`](atom::Source) atom holding the text, [`Derived`](atom::Derived)
//!   atoms computed from it, and the [`TextState`](state::TextState) container tying
//!   them together. It's plain Rust and runs anywhere.
//! * A view layer: transient [`View`] types that build DOM nodes once, and then diff
//!   against what they have rendered before to surgically update the page.
//!
//! ### State
//!
//! ```
//! use textlens::state::TextState;
//!
//! let state = TextState::new();
//!
//! assert_eq!(*state.text(), "hello");
//! assert_eq!(*state.uppercase(), "HELLO");
//! assert_eq!(state.length(), 5);
//!
//! state.set_text("");
//!
//! assert_eq!(*state.uppercase(), "");
//! assert_eq!(state.length(), 0);
//! ```
//!
//! Derived values are memoized, reading them again without the text having changed
//! doesn't run the computation again.
//!
//! ### Views
//!
//! The state is owned by the runtime for the lifetime of the page, so render functions
//! get a `&'static` reference to it and can move it into event listeners.
//!
//! ```no_run
//! use textlens::prelude::*;
//!
//! fn app(state: &'static TextState) -> impl View {
//!     div((
//!         p(state.length()).class("length"),
//!         input(state.text(), move |e: &OnInput| {
//!             state.set_text(e.current_target().value());
//!         })
//!         .class("input"),
//!         p(state.uppercase()),
//!     ))
//! }
//!
//! textlens::start!(TextState::new(), app);
//! # fn main() {}
//! ```
//!
//! Any change to the state, from an event listener or otherwise, results in a single
//! re-render of the whole view. Text nodes are only touched if the value rendered into
//! them has changed.

#[cfg(all(
    target_arch = "wasm32",
    feature = "rlsf",
    not(target_feature = "atomics")
))]
#[global_allocator]
static A: rlsf::SmallGlobalTlsf = rlsf::SmallGlobalTlsf::new();

pub mod atom;
pub mod diff;
pub mod dom;
pub mod event;
pub mod html;
mod internal;
pub mod runtime;
pub mod state;

/// The prelude module with most commonly used types.
///
/// Intended use is:
/// ```
/// use textlens::prelude::*;
/// ```
pub mod prelude {
    pub use crate::atom::{Derived, Observable, Source};
    pub use crate::event::InputEvent;
    pub use crate::html::{div, input, p, OnInput};
    pub use crate::state::TextState;
    pub use crate::View;
}

use dom::Mountable;

/// Crate re-exports for the [`start!`] macro
pub mod reexport {
    pub use wasm_bindgen;
    pub use web_sys;
}

/// Trait that describes types that can be rendered in the DOM.
pub trait View {
    /// The product should contain a DOM reference to this View and
    /// any data it needs to update itself.
    type Product: Mountable;

    /// Build a product that can be mounted in the DOM from this type.
    fn build(self) -> Self::Product;

    /// Update the product and apply changes to the DOM if necessary.
    fn update(self, p: &mut Self::Product);
}

/// Mount the app once the Wasm module is loaded. Takes the initial state and the
/// render function, see [`runtime::start`].
#[macro_export]
macro_rules! start {
    ($state:expr, $render:expr) => {
        use $crate::reexport::wasm_bindgen;

        #[wasm_bindgen::prelude::wasm_bindgen(start)]
        fn textlens_main() {
            $crate::runtime::start($state, $render);
        }
    };
}
