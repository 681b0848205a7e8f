pub mod default_config;
pub(crate) mod env;
pub mod llm_model_config;
pub mod llm_provider;
