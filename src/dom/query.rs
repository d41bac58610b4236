//! Typed element lookup.
//!
//! Lookups never fail hard: a missing or mistyped element is `None` (or
//! absent from the list) and an invalid selector is logged.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

/// Element with `id`, cast to `T`.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// First match of `selector` in the document, cast to `T`.
pub fn first<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    match document.query_selector(selector) {
        Ok(found) => found?.dyn_into::<T>().ok(),
        Err(err) => {
            log::warn!("bad selector {selector:?}: {err:?}");
            None
        }
    }
}

/// Every match of `selector` in the document that casts to `T`.
pub fn all<T: JsCast>(document: &Document, selector: &str) -> Vec<T> {
    match document.query_selector_all(selector) {
        Ok(list) => cast_nodes(&list),
        Err(err) => {
            log::warn!("bad selector {selector:?}: {err:?}");
            Vec::new()
        }
    }
}

/// Every match of `selector` below `root` that casts to `T`.
pub fn all_within<T: JsCast>(root: &Element, selector: &str) -> Vec<T> {
    match root.query_selector_all(selector) {
        Ok(list) => cast_nodes(&list),
        Err(err) => {
            log::warn!("bad selector {selector:?}: {err:?}");
            Vec::new()
        }
    }
}

fn cast_nodes<T: JsCast>(list: &NodeList) -> Vec<T> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}
