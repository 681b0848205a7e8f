//! Query embedding.

use std::{future::Future, pin::Pin};

use crate::errors::RagError;

/// Boxed, `Send` future used by the object-safe traits of this crate.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Turns a question into the vector used for similarity search.
pub trait EmbeddingsProvider: Send + Sync {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>>;
}

pub mod service;
