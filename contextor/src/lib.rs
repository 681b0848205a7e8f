//! RAG + LLM gateway for The Librarian.
//!
//! Public API: [`RagChain::query`]. It retrieves passages through
//! [`PassageSearch`], renders them with [`format_context`], fills the
//! persona [`PromptTemplate`], calls the chat model once and returns a
//! [`QueryResult`] with the answer and its sources.

mod api_types;
mod chain;
mod error;
mod format;
mod prompt;

pub use api_types::{QueryResult, SOURCE_PREVIEW_CHARS, SourceInfo};
pub use chain::{ChatModel, EMPTY_QUESTION_ANSWER, NO_RESULTS_ANSWER, PassageSearch, RagChain};
pub use error::ContextorError;
pub use format::{NO_PASSAGES, clean_query, format_context, format_metadata, truncate_text};
pub use prompt::{
    BORGES_EXPERT_TEMPLATE, CONVERSATION_STARTERS, PromptTemplate, validate_prompt_template,
};
