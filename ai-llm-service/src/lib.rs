//! LLM backends used by the Librarian.
//!
//! Two logical profiles are exposed through [`service_profiles::LlmServiceProfiles`]:
//! - **chat**      → answer generation from a filled prompt
//! - **embedding** → query vectors for similarity search
//!
//! Both profiles are backed by either OpenAI or Ollama, selected per profile
//! via [`config::llm_provider::LlmProvider`].

pub mod completion;
pub mod config;
pub mod error_handler;
pub mod service_profiles;
pub mod services;
pub mod telemetry;

pub use completion::Completion;
pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
