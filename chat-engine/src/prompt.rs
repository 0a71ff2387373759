//! Prompt builder: chat history rendering and the two prompt templates.

use chat_history::{Role, Turn};

/// Renders prior turns as alternating `User:` / `AI:` lines in original
/// order, followed by the current message as a final `User:` line.
pub(crate) fn format_history(prior: &[Turn], current_message: &str) -> String {
    let mut out = String::new();
    for turn in prior {
        let label = match turn.role {
            Role::User => "User",
            Role::Assistant => "AI",
        };
        out.push_str(label);
        out.push_str(": ");
        out.push_str(&turn.text);
        out.push('\n');
    }
    out.push_str("User: ");
    out.push_str(current_message);
    out.push('\n');
    out
}

/// Assembles the final prompt.
///
/// With one or more retrieved chunks, the model is told to answer from the
/// context block and the chat history, and to proactively offer suggestions
/// for location questions. With none, the context block is omitted entirely
/// and the model answers from chat history alone.
pub(crate) fn build_prompt(context_chunks: &[String], history: &str) -> String {
    if context_chunks.is_empty() {
        format!(
            "Based on the following chat history, answer the question:\n\n\
             Chat History:\n{history}AI:"
        )
    } else {
        let context = context_chunks.join(" ");
        format!(
            "Based on the following context and chat history, answer the question:\n\n\
             Context: {context}\n\n\
             Chat History:\n{history}AI:\n\
             If the user asks about a certain location or place, do your best \
             to answer or offer suggestions."
        )
    }
}
