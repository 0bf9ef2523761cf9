// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! DOM products and text views

use std::cell::Ref;
use std::rc::Rc;

use wasm_bindgen::JsValue;
use web_sys::Node;

use crate::diff::Diff;
use crate::event::Trigger;
use crate::{internal, View};

/// A type that can be mounted in the DOM
pub trait Mountable: Trigger + 'static {
    fn js(&self) -> &JsValue;
}

/// A DOM `Text` node along with the value last rendered into it.
pub struct TextProduct<M> {
    memo: M,
    node: Node,
}

impl<M> Trigger for TextProduct<M> {}

impl<M> Mountable for TextProduct<M>
where
    M: 'static,
{
    fn js(&self) -> &JsValue {
        &self.node
    }
}

impl View for &str {
    type Product = TextProduct<String>;

    fn build(self) -> Self::Product {
        TextProduct {
            memo: self.into_memo(),
            node: internal::text_node(self),
        }
    }

    fn update(self, p: &mut Self::Product) {
        if self.diff(&mut p.memo) {
            internal::set_text(&p.node, self);
        }
    }
}

impl View for String {
    type Product = TextProduct<String>;

    fn build(self) -> Self::Product {
        self.as_str().build()
    }

    fn update(self, p: &mut Self::Product) {
        self.as_str().update(p)
    }
}

impl View for Ref<'_, String> {
    type Product = TextProduct<String>;

    fn build(self) -> Self::Product {
        self.as_str().build()
    }

    fn update(self, p: &mut Self::Product) {
        self.as_str().update(p)
    }
}

impl View for Rc<String> {
    type Product = TextProduct<String>;

    fn build(self) -> Self::Product {
        self.as_str().build()
    }

    fn update(self, p: &mut Self::Product) {
        self.as_str().update(p)
    }
}

impl View for usize {
    type Product = TextProduct<usize>;

    fn build(self) -> Self::Product {
        let mut buf = itoa::Buffer::new();

        TextProduct {
            memo: self.into_memo(),
            node: internal::text_node(buf.format(self)),
        }
    }

    fn update(self, p: &mut Self::Product) {
        if self.diff(&mut p.memo) {
            let mut buf = itoa::Buffer::new();

            internal::set_text(&p.node, buf.format(self));
        }
    }
}
