//! Typed outcome of the chat pipeline.
//!
//! No failure crosses the pipeline boundary as an error: every external-call
//! failure is converted into a [`ChatReply`] variant carrying its kind and a
//! human-readable message. Callers other than the HTTP shell can branch on
//! the variant instead of parsing text; the shell renders the fixed
//! user-facing strings via [`ChatReply::reply_text`].

/// Stage of the pipeline whose external call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    /// Embedding the question failed.
    Embedding,
    /// The vector store query failed.
    ///
    /// [`ChatPipeline::answer`](crate::ChatPipeline::answer) degrades a
    /// failed search into generation over the empty-context placeholder
    /// instead of producing this variant; it stays so the reply surface
    /// covers every external call a caller may make on its own.
    Retrieval,
    /// The generation call failed outright (transport/auth/quota).
    Generation,
}

/// Terminal outcome of [`ChatPipeline::answer`](crate::ChatPipeline::answer).
#[derive(Clone, Debug, PartialEq)]
pub enum ChatReply {
    /// The question was empty or whitespace-only; nothing was contacted.
    EmptyQuestion,
    /// The model produced an answer.
    Answer(String),
    /// The model declined to answer for safety reasons. Not a failure.
    Blocked { reason: String },
    /// An external call failed; `kind` says which stage.
    Failed { kind: FailureKind, message: String },
}

impl ChatReply {
    /// Renders the user-facing reply string.
    ///
    /// Failures read as plain-English sentences in the normal reply field;
    /// the serving endpoint never turns them into error status codes.
    pub fn reply_text(&self) -> String {
        match self {
            ChatReply::EmptyQuestion => "Message is empty.".to_string(),
            ChatReply::Answer(text) => text.clone(),
            ChatReply::Blocked { reason } => {
                format!("The response was blocked by the safety filter (Reason: {reason}).")
            }
            ChatReply::Failed { kind, .. } => match kind {
                FailureKind::Embedding => "Embedding failed.".to_string(),
                FailureKind::Retrieval => "Qdrant search failed.".to_string(),
                FailureKind::Generation => "Failed to generate answer.".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocked_reply_names_the_reason() {
        let reply = ChatReply::Blocked {
            reason: "SAFETY".into(),
        };
        assert!(reply.reply_text().contains("SAFETY"));
    }

    #[test]
    fn failures_render_fixed_sentences() {
        let failed = ChatReply::Failed {
            kind: FailureKind::Generation,
            message: "http 500".into(),
        };
        assert_eq!(failed.reply_text(), "Failed to generate answer.");
        let failed = ChatReply::Failed {
            kind: FailureKind::Retrieval,
            message: "connect refused".into(),
        };
        assert_eq!(failed.reply_text(), "Qdrant search failed.");
        assert_eq!(ChatReply::EmptyQuestion.reply_text(), "Message is empty.");
    }
}
