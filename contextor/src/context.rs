//! Context assembly: caller-selected text first, then retrieved passages.

/// Substituted when neither selected text nor retrieval produced anything,
/// so the prompt template is never given an empty context block.
pub const NO_CONTEXT_PLACEHOLDER: &str = "No relevant context found.";

/// Joins the optional selected text and the extracted hit texts, in rank
/// order, with a blank-line separator.
///
/// An empty result is replaced by [`NO_CONTEXT_PLACEHOLDER`].
pub fn assemble_context(selected_text: &str, hit_texts: &[String]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(hit_texts.len() + 1);
    if !selected_text.is_empty() {
        parts.push(selected_text);
    }
    parts.extend(hit_texts.iter().map(String::as_str));

    if parts.is_empty() {
        NO_CONTEXT_PLACEHOLDER.to_string()
    } else {
        parts.join("\n\n")
    }
}
