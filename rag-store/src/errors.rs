use thiserror::Error;

#[derive(Debug, Error)]
pub enum RagError {
    #[error("config error: {0}")]
    Config(String),

    /// Startup check against Qdrant failed.
    #[error(
        "Could not connect to Qdrant at {url} or access collection '{collection}'. Error: {reason}."
    )]
    Connection {
        url: String,
        collection: String,
        reason: String,
    },

    #[error("Failed to search collection '{collection}': {reason}")]
    Search { collection: String, reason: String },

    #[error("embedding error: {0}")]
    Embedding(String),

    /// Query vector length differs from `EMBEDDING_DIM`.
    #[error("embedding has {got} dimensions, collection expects {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    #[error("qdrant error: {0}")]
    Qdrant(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_message_names_url_and_collection() {
        let e = RagError::Connection {
            url: "http://localhost:6334".into(),
            collection: "borges".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(
            e.to_string(),
            "Could not connect to Qdrant at http://localhost:6334 or access collection 'borges'. \
             Error: connection refused."
        );
    }
}
