//! WASM bindings for the Runic renderer.
//!
//! Exposes HTML rendering, editor highlighting and the parsed document tree
//! to JavaScript via wasm-bindgen.

use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Render Runic source to HTML.
#[wasm_bindgen]
pub fn to_html(source: &str) -> String {
    runic_codegen::to_html(source)
}

/// Render Runic source to highlight spans for the editor overlay.
#[wasm_bindgen]
pub fn highlight_text(source: &str) -> String {
    runic_codegen::highlight_text(source)
}

/// Render both outputs at once.
///
/// Returns a JS object `{ html: string, highlightText: string }`.
#[wasm_bindgen]
pub fn editor_data(source: &str) -> Result<JsValue, JsError> {
    let data = runic_codegen::editor_data(source);

    let js_obj = js_sys::Object::new();
    js_sys::Reflect::set(&js_obj, &"html".into(), &data.html.into())
        .map_err(|_| JsError::new("Failed to set html property"))?;
    js_sys::Reflect::set(&js_obj, &"highlightText".into(), &data.highlight_text.into())
        .map_err(|_| JsError::new("Failed to set highlightText property"))?;

    Ok(js_obj.into())
}

/// Parse Runic source and return the document tree as a plain JS object
/// (`{ type, value?, error?, children? }`).
#[wasm_bindgen]
pub fn parse_tree(source: &str) -> Result<JsValue, JsError> {
    let tree = runic_parser::Parser::parse(source);
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    tree.serialize(&serializer)
        .map_err(|e| JsError::new(&e.to_string()))
}

/// Get the renderer version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
