// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JavaScript glue used by the DOM views.

use wasm_bindgen::prelude::*;
use web_sys::Node;

#[wasm_bindgen(module = "/js/util.js")]
extern "C" {
    #[wasm_bindgen(js_name = "setTrigger")]
    pub(crate) fn set_trigger(f: &JsValue);
    #[wasm_bindgen(js_name = "makeEventHandler")]
    pub(crate) fn make_event_handler(eid: u32) -> JsValue;

    #[wasm_bindgen(js_name = "appendBody")]
    pub(crate) fn append_body(node: &JsValue);
    #[wasm_bindgen(js_name = "createTextNode")]
    pub(crate) fn text_node(t: &str) -> Node;
    #[wasm_bindgen(js_name = "createElement")]
    pub(crate) fn element(tag: &str) -> Node;
    #[wasm_bindgen(js_name = "setClass")]
    pub(crate) fn set_class(node: &Node, class: &str);
    #[wasm_bindgen(js_name = "appendChild")]
    pub(crate) fn append_child(parent: &Node, child: &JsValue);

    #[wasm_bindgen(js_name = "setText")]
    pub(crate) fn set_text(node: &Node, t: &str);
    #[wasm_bindgen(js_name = "setValue")]
    pub(crate) fn set_value(node: &Node, value: &str);
    #[wasm_bindgen(js_name = "listen")]
    pub(crate) fn listen(node: &Node, event: &str, handler: &JsValue);
}
