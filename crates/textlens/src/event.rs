// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Utilities for handling DOM events

use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::atomic::{AtomicU32, Ordering};

use wasm_bindgen::prelude::wasm_bindgen;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlInputElement, Node};

use crate::internal;
use crate::runtime::Context;

#[wasm_bindgen]
extern "C" {
    type EventWithTarget;

    #[wasm_bindgen(method, getter)]
    fn target(this: &EventWithTarget) -> HtmlElement;

    #[wasm_bindgen(method, getter, js_name = "currentTarget")]
    fn current_target(this: &EventWithTarget) -> HtmlElement;
}

macro_rules! event {
    ($(#[doc = $doc:literal] $event:ident,)*) => {
        $(
            #[doc = concat!("Smart wrapper around a ", $doc, " which includes the type information of the event target")]
            #[repr(transparent)]
            pub struct $event<T> {
                event: web_sys::$event,
                _target: PhantomData<T>,
            }

            impl<T> EventCast for $event<T> {
                fn cast_from(e: &web_sys::Event) -> &Self {
                    unsafe { &*(e as *const _ as *const Self) }
                }
            }

            impl<T> Deref for $event<T> {
                type Target = web_sys::$event;

                fn deref(&self) -> &Self::Target {
                    self.event.unchecked_ref()
                }
            }

            impl<T> $event<T> {
                /// Return a reference to the target element.
                ///
                /// This method shadows over the [`Event::target`](web_sys::Event::target)
                /// method provided by `web-sys` and makes it infallible.
                pub fn target(&self) -> HtmlElement {
                    self.event.unchecked_ref::<EventWithTarget>().target().unchecked_into()
                }

                /// Return a reference to the element the listener was attached to.
                pub fn current_target(&self) -> EventTarget<T>
                where
                    T: JsCast,
                {
                    EventTarget(self.event.unchecked_ref::<EventWithTarget>().current_target().unchecked_into())
                }
            }
        )*
    };
}

mod sealed {
    pub trait EventCast {
        fn cast_from(e: &web_sys::Event) -> &Self;
    }
}

pub(crate) use sealed::EventCast;

event! {
    /// [`web_sys::InputEvent`](web_sys::InputEvent)
    InputEvent,
}

#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct EventId(pub(crate) u32);

impl EventId {
    pub(crate) fn next() -> Self {
        static ID: AtomicU32 = AtomicU32::new(0);

        EventId(ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Products that might own the listener an event was dispatched to.
pub trait Trigger {
    /// Returns `true` if the event was handled by this product or any of its children.
    fn trigger(&self, _: &Context) -> bool {
        false
    }
}

pub trait Listener<E>
where
    E: EventCast,
    Self: Sized + 'static,
{
    type Product: ListenerHandle;

    /// Attach a new listener for the DOM event `kind` to `node`.
    fn build(self, node: &Node, kind: &str) -> Self::Product;

    fn update(self, p: &mut Self::Product);
}

impl<E, F> Listener<E> for F
where
    F: Fn(&E) + 'static,
    E: EventCast + 'static,
{
    type Product = ListenerProduct<Self, E>;

    fn build(self, node: &Node, kind: &str) -> Self::Product {
        let eid = EventId::next();

        internal::listen(node, kind, &internal::make_event_handler(eid.0));

        ListenerProduct {
            closure: self,
            eid,
            _event: PhantomData,
        }
    }

    fn update(self, p: &mut ListenerProduct<Self, E>) {
        p.closure = self;
    }
}

pub struct ListenerProduct<F, E> {
    closure: F,
    eid: EventId,
    _event: PhantomData<E>,
}

pub trait ListenerHandle: Trigger + 'static {}

impl<F, E> ListenerHandle for ListenerProduct<F, E>
where
    F: Fn(&E) + 'static,
    E: EventCast + 'static,
{
}

impl<F, E> Trigger for ListenerProduct<F, E>
where
    F: Fn(&E) + 'static,
    E: EventCast,
{
    fn trigger(&self, ctx: &Context) -> bool {
        if ctx.eid() == self.eid {
            (self.closure)(ctx.event());

            true
        } else {
            false
        }
    }
}

/// A wrapper over some event target type from web-sys.
#[repr(transparent)]
pub struct EventTarget<T>(T);

impl<T> Deref for EventTarget<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl EventTarget<HtmlInputElement> {
    /// Current content of the input field.
    pub fn value(&self) -> String {
        self.0.value()
    }
}
