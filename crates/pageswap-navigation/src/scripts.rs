//! Script re-execution
//!
//! Markup assigned through the container's inner HTML leaves its `<script>`
//! elements inert. Replacing each one with a freshly created element makes the
//! browser run it.

use pageswap_dom::{Document, ScriptElement};

/// Replace every script in the container with a fresh copy so it executes.
/// External scripts keep their `src` and run in order (`async = false`);
/// inline scripts keep their text verbatim. Returns how many were replaced.
pub fn reexecute_scripts<D: Document + ?Sized>(doc: &mut D) -> usize {
    let scripts = doc.container_scripts();

    for (index, original) in scripts.iter().enumerate() {
        let fresh = match &original.src {
            Some(src) => ScriptElement::external(src.clone()),
            None => ScriptElement::inline(original.text.clone()),
        };
        doc.replace_container_script(index, fresh);
    }

    if !scripts.is_empty() {
        tracing::debug!(count = scripts.len(), "Re-executed container scripts");
    }

    scripts.len()
}
