//! Seam between retrieval logic and the vector database.

use crate::embed::BoxFuture;
use crate::errors::RagError;
use crate::record::RawMatch;

/// A handle to one vector collection.
///
/// [`crate::qdrant_facade::QdrantCollection`] is the production implementation.
pub trait VectorCollection: Send + Sync {
    /// Collection name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Nearest-neighbor query returning document text, metadata and distance
    /// for the top `n_results` matches, best first.
    fn query<'a>(
        &'a self,
        embedding: Vec<f32>,
        n_results: u64,
    ) -> BoxFuture<'a, Result<Vec<RawMatch>, RagError>>;

    /// Number of stored points.
    fn count<'a>(&'a self) -> BoxFuture<'a, Result<u64, RagError>>;

    /// Names of every collection on the same server.
    fn list_collections<'a>(&'a self) -> BoxFuture<'a, Result<Vec<String>, RagError>>;
}
