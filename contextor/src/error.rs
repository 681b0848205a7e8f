//! Typed error for the contextor crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// Errors from the underlying rag-store crate (embedding, search).
    #[error(transparent)]
    Rag(#[from] rag_store::RagError),

    /// Generation errors from the LLM service.
    #[error(transparent)]
    Llm(#[from] ai_llm_service::AiLlmError),

    /// Prompt template without a required slot.
    #[error("prompt template is missing the {{{0}}} placeholder")]
    Template(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_error_names_the_slot() {
        let e = ContextorError::Template("context");
        assert_eq!(e.to_string(), "prompt template is missing the {context} placeholder");
    }

    #[test]
    fn rag_errors_keep_their_message() {
        let e: ContextorError = rag_store::RagError::Search {
            collection: "borges_stories".into(),
            reason: "timeout".into(),
        }
        .into();
        assert_eq!(e.to_string(), "Failed to search collection 'borges_stories': timeout");
    }
}
