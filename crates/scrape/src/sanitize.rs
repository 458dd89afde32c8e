// ABOUTME: Content sanitizer for extracted HTML fragments.
// ABOUTME: Removes script elements, inline-hidden elements, and boilerplate-class blocks, then re-serializes.

//! Fragment sanitization.
//!
//! The raw fragment is parsed into a synthetic container, the subtrees to
//! drop are collected by node id, and the container's children are then
//! re-serialized skipping those ids. Applied once per fragment; sanitizing an
//! already-clean or empty fragment is a no-op.

use std::collections::HashSet;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node};

use crate::select::cached_selector;

/// Class markers that identify boilerplate blocks. Matched as whole class
/// tokens, case-insensitively; empirically tuned for this source family.
pub const BOILERPLATE_CLASS_MARKERS: &[&str] = &["advertisement", "ad", "share", "copyright"];

/// Returns true if an inline style attribute hides the element.
///
/// Substring match after stripping whitespace; the portal's markup never
/// needs CSS-grade parsing here.
pub fn is_hidden_style(style: &str) -> bool {
    let compact: String = style
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    compact.contains("display:none") || compact.contains("visibility:hidden")
}

/// Sanitizes a raw HTML fragment.
///
/// Removes, at any nesting depth: script elements, elements whose inline
/// style declares `display:none`/`visibility:hidden`, and elements carrying a
/// boilerplate class marker. Everything else is preserved in document order.
pub fn sanitize_fragment(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut skip_ids: HashSet<NodeId> = HashSet::new();

    if let Some(selector) = cached_selector("script") {
        for el in fragment.select(&selector) {
            collect_node_ids(el, &mut skip_ids);
        }
    }

    if let Some(selector) = cached_selector("[style]") {
        for el in fragment.select(&selector) {
            if let Some(style) = el.value().attr("style") {
                if is_hidden_style(style) {
                    collect_node_ids(el, &mut skip_ids);
                }
            }
        }
    }

    if let Some(selector) = cached_selector("[class]") {
        for el in fragment.select(&selector) {
            let is_boilerplate = el.value().classes().any(|class| {
                BOILERPLATE_CLASS_MARKERS
                    .iter()
                    .any(|marker| class.eq_ignore_ascii_case(marker))
            });
            if is_boilerplate {
                collect_node_ids(el, &mut skip_ids);
            }
        }
    }

    serialize_filtered(&fragment, &skip_ids)
}

/// Collects all node ids in a subtree (to skip when serializing).
fn collect_node_ids(element: ElementRef, ids: &mut HashSet<NodeId>) {
    ids.insert(element.id());
    for child in element.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            collect_node_ids(child_el, ids);
        } else {
            ids.insert(child.id());
        }
    }
}

/// Serializes the fragment's children, skipping nodes in `skip_ids`.
fn serialize_filtered(fragment: &Html, skip_ids: &HashSet<NodeId>) -> String {
    let mut output = String::new();
    for child in fragment.root_element().children() {
        serialize_node(child, skip_ids, &mut output);
    }
    output
}

/// Recursively serializes a node unless it is marked for removal.
fn serialize_node(node: ego_tree::NodeRef<Node>, skip_ids: &HashSet<NodeId>, output: &mut String) {
    if skip_ids.contains(&node.id()) {
        return;
    }

    match node.value() {
        Node::Text(text) => {
            output.push_str(&**text);
        }
        Node::Element(el) => {
            let tag_name = el.name();

            output.push('<');
            output.push_str(tag_name);
            for (name, value) in el.attrs() {
                output.push(' ');
                output.push_str(name);
                output.push_str("=\"");
                output.push_str(&escape_attr(value));
                output.push('"');
            }

            if is_void_element(tag_name) {
                output.push_str(" />");
            } else {
                output.push('>');
                for child in node.children() {
                    serialize_node(child, skip_ids, output);
                }
                output.push_str("</");
                output.push_str(tag_name);
                output.push('>');
            }
        }
        Node::Comment(comment) => {
            output.push_str("<!--");
            output.push_str(&**comment);
            output.push_str("-->");
        }
        _ => {}
    }
}

/// Escapes special characters in attribute values.
fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Checks if a tag is a void element (self-closing in HTML5).
fn is_void_element(tag: &str) -> bool {
    matches!(
        tag.to_lowercase().as_str(),
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
