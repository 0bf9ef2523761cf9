// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The runtime owns the mounted app: its state, the rendered product, and the
//! render function. DOM events are routed back to their listeners through here,
//! and state notifications schedule a re-render.

use std::cell::Cell;

use wasm_bindgen::closure::Closure;
use web_sys::Event;

use crate::atom::Observable;
use crate::dom::Mountable;
use crate::event::{EventCast, EventId, Trigger};
use crate::{internal, View};

/// Event being dispatched to listeners.
pub struct Context {
    eid: EventId,
    event: Event,
}

impl Context {
    pub(crate) fn eid(&self) -> EventId {
        self.eid
    }

    pub(crate) fn event<E>(&self) -> &E
    where
        E: EventCast,
    {
        E::cast_from(&self.event)
    }
}

struct RuntimeData<S: 'static, P, F> {
    state: &'static S,
    product: P,
    render: F,
}

trait Runtime {
    fn trigger(&self, ctx: &Context) -> bool;

    fn update(&mut self);
}

impl<S, P, F, V> Runtime for RuntimeData<S, P, F>
where
    S: 'static,
    F: Fn(&'static S) -> V,
    V: View<Product = P>,
    P: Mountable,
{
    fn trigger(&self, ctx: &Context) -> bool {
        self.product.trigger(ctx)
    }

    fn update(&mut self) {
        (self.render)(self.state).update(&mut self.product);
    }
}

thread_local! {
    static INIT: Cell<bool> = const { Cell::new(false) };

    static DIRTY: Cell<bool> = const { Cell::new(false) };

    static RUNTIME: Cell<Option<&'static mut dyn Runtime>> = const { Cell::new(None) };
}

/// Start the app by mounting the view returned from `render` in the document `body`.
///
/// The `state` is owned by the runtime for the rest of the page's life, which lets
/// views and listeners borrow from it freely. Every change the state notifies about
/// results in a single re-render.
pub fn start<S, F, V>(state: S, render: F)
where
    S: Observable + 'static,
    F: Fn(&'static S) -> V + 'static,
    V: View,
{
    if INIT.get() {
        return;
    }
    INIT.set(true);

    init_panic_hook();

    let state: &'static S = Box::leak(Box::new(state));

    state.subscribe(schedule);

    let runtime = Box::leak(Box::new(RuntimeData {
        state,
        product: render(state).build(),
        render,
    }));

    internal::append_body(runtime.product.js());

    let handler =
        Closure::<dyn Fn(Event, u32)>::new(|event: Event, eid: u32| trigger(event, EventId(eid)));

    internal::set_trigger(&handler.into_js_value());

    RUNTIME.set(Some(runtime));

    #[cfg(debug_assertions)]
    gloo_console::debug!("textlens: app mounted");
}

fn trigger(event: Event, eid: EventId) {
    // Taking the runtime out locks it, any state changes made by listeners
    // are only flagged until we are done dispatching.
    let Some(runtime) = RUNTIME.take() else {
        return;
    };

    let ctx = Context { eid, event };

    if !runtime.trigger(&ctx) {
        #[cfg(debug_assertions)]
        gloo_console::warn!("textlens: no listener for event", eid.0);
    }

    if DIRTY.replace(false) {
        runtime.update();
    }

    RUNTIME.set(Some(runtime));
}

fn schedule() {
    match RUNTIME.take() {
        Some(runtime) => {
            // Change made outside of an event handler, render right away.
            DIRTY.set(false);
            runtime.update();

            RUNTIME.set(Some(runtime));
        }
        None => DIRTY.set(true),
    }
}

fn init_panic_hook() {
    // Only enable console hook on debug builds
    #[cfg(debug_assertions)]
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}
