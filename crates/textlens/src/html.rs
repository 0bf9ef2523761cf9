// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # HTML element views
//!
//! Elements are built once and keep their DOM node around in the product. Classes are
//! static and only applied on the first render, children and input values are diffed
//! on every update.
//!
//! ```no_run
//! use textlens::html::{div, p};
//!
//! let view = div((p("Hello"), p(42_usize).class("count"))).class("greeting");
//! # let _ = view;
//! ```
use std::ops::Deref;

use web_sys::{HtmlInputElement, Node};

use crate::diff::Diff;
use crate::dom::Mountable;
use crate::event::{InputEvent, Listener, Trigger};
use crate::runtime::Context;
use crate::{internal, View};

/// Content of an element: any single [`View`], or a tuple of them.
pub trait Children {
    type Product: Trigger + 'static;

    fn append_to(self, parent: &Node) -> Self::Product;

    fn update(self, p: &mut Self::Product);
}

impl<V> Children for V
where
    V: View,
{
    type Product = V::Product;

    fn append_to(self, parent: &Node) -> Self::Product {
        let product = self.build();

        internal::append_child(parent, product.js());

        product
    }

    fn update(self, p: &mut Self::Product) {
        View::update(self, p)
    }
}

macro_rules! impl_children {
    ($($v:ident $p:ident),*) => {
        impl<$($v),*> Children for ($($v,)*)
        where
            $($v: View,)*
        {
            type Product = ($(<$v as View>::Product,)*);

            fn append_to(self, parent: &Node) -> Self::Product {
                let ($($p,)*) = self;

                ($(Children::append_to($p, parent),)*)
            }

            fn update(self, p: &mut Self::Product) {
                let ($($p,)*) = self;
                let ($(ref mut $v,)*) = *p;

                $(Children::update($p, $v);)*
            }
        }

        impl<$($v),*> Trigger for ($($v,)*)
        where
            $($v: Trigger,)*
        {
            fn trigger(&self, ctx: &Context) -> bool {
                let ($($p,)*) = self;

                $($p.trigger(ctx))||*
            }
        }
    };
}

#[allow(non_snake_case)]
mod tuples {
    use super::*;

    impl_children!(A a, B b);
    impl_children!(A a, B b, C c);
    impl_children!(A a, B b, C c, D d);
}

/// A generic HTML element with a static class.
pub struct Element<C> {
    tag: &'static str,
    class: Option<&'static str>,
    children: C,
}

impl<C> Element<C> {
    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }
}

pub struct ElementProduct<P> {
    node: Node,
    children: P,
}

/// `<div>` element.
pub fn div<C: Children>(children: C) -> Element<C> {
    Element {
        tag: "div",
        class: None,
        children,
    }
}

/// `<p>` element.
pub fn p<C: Children>(children: C) -> Element<C> {
    Element {
        tag: "p",
        class: None,
        children,
    }
}

fn make_element(tag: &str, class: Option<&str>) -> Node {
    let node = internal::element(tag);

    if let Some(class) = class {
        internal::set_class(&node, class);
    }

    node
}

impl<C> View for Element<C>
where
    C: Children,
{
    type Product = ElementProduct<C::Product>;

    fn build(self) -> Self::Product {
        let node = make_element(self.tag, self.class);
        let children = self.children.append_to(&node);

        ElementProduct { node, children }
    }

    fn update(self, p: &mut Self::Product) {
        self.children.update(&mut p.children);
    }
}

impl<P> Trigger for ElementProduct<P>
where
    P: Trigger,
{
    fn trigger(&self, ctx: &Context) -> bool {
        self.children.trigger(ctx)
    }
}

impl<P> Mountable for ElementProduct<P>
where
    P: Trigger + 'static,
{
    fn js(&self) -> &wasm_bindgen::JsValue {
        &self.node
    }
}

/// The event type `<input>` listeners receive.
pub type OnInput = InputEvent<HtmlInputElement>;

/// `<input>` element whose value is kept in sync with `value`, and which
/// calls `oninput` on every edit.
///
/// ```no_run
/// use textlens::html::{input, OnInput};
/// use textlens::state::TextState;
///
/// fn field(state: &'static TextState) -> impl textlens::View {
///     input(state.text(), move |e: &OnInput| {
///         state.set_text(e.current_target().value());
///     })
///     .class("input")
/// }
/// # let _ = field;
/// ```
pub fn input<T, L>(value: T, oninput: L) -> Input<T, L>
where
    T: Deref,
    T::Target: AsRef<str>,
    L: Listener<OnInput>,
{
    Input {
        value,
        class: None,
        oninput,
    }
}

pub struct Input<T, L> {
    value: T,
    class: Option<&'static str>,
    oninput: L,
}

impl<T, L> Input<T, L> {
    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }
}

pub struct InputProduct<L> {
    node: Node,
    memo: String,
    listener: L,
}

impl<T, L> View for Input<T, L>
where
    T: Deref,
    T::Target: AsRef<str>,
    L: Listener<OnInput>,
{
    type Product = InputProduct<L::Product>;

    fn build(self) -> Self::Product {
        let value = (*self.value).as_ref();
        let node = make_element("input", self.class);

        internal::set_value(&node, value);

        InputProduct {
            listener: self.oninput.build(&node, "input"),
            memo: value.into_memo(),
            node,
        }
    }

    fn update(self, p: &mut Self::Product) {
        let value = (*self.value).as_ref();

        if value.diff(&mut p.memo) {
            internal::set_value(&p.node, value);
        }
        self.oninput.update(&mut p.listener);
    }
}

impl<L> Trigger for InputProduct<L>
where
    L: Trigger,
{
    fn trigger(&self, ctx: &Context) -> bool {
        self.listener.trigger(ctx)
    }
}

impl<L> Mountable for InputProduct<L>
where
    L: Trigger + 'static,
{
    fn js(&self) -> &wasm_bindgen::JsValue {
        &self.node
    }
}
