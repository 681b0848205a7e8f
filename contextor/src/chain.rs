//! Answer orchestration: retrieve, format, prompt, generate.

use std::sync::Arc;

use ai_llm_service::{AiLlmError, Completion, LlmServiceProfiles};
use rag_store::{BoxFuture, RagError, RagStore, RetrievedPassage};
use tracing::{error, info};

use crate::api_types::QueryResult;
use crate::error::ContextorError;
use crate::format::{format_context, truncate_text};
use crate::prompt::PromptTemplate;

/// Answer for a blank question.
pub const EMPTY_QUESTION_ANSWER: &str = "Please ask me something about Jorge Luis Borges' works.";

/// Answer when retrieval found nothing.
pub const NO_RESULTS_ANSWER: &str = "I couldn't find relevant passages in the Borges collection to answer your question. Could you try rephrasing or asking about a different aspect of his work?";

/// Passage retrieval seam. [`RagStore`] is the production implementation.
pub trait PassageSearch: Send + Sync {
    fn search<'a>(
        &'a self,
        query: &'a str,
        k: Option<u64>,
        score_threshold: Option<f64>,
    ) -> BoxFuture<'a, Result<Vec<RetrievedPassage>, RagError>>;
}

impl PassageSearch for RagStore {
    fn search<'a>(
        &'a self,
        query: &'a str,
        k: Option<u64>,
        score_threshold: Option<f64>,
    ) -> BoxFuture<'a, Result<Vec<RetrievedPassage>, RagError>> {
        Box::pin(RagStore::search(self, query, k, score_threshold))
    }
}

/// Single-shot text generation seam.
pub trait ChatModel: Send + Sync {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<Completion, AiLlmError>>;
}

impl ChatModel for LlmServiceProfiles {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<Completion, AiLlmError>> {
        Box::pin(self.generate(prompt))
    }
}

/// Stateless question → [`QueryResult`] pipeline.
#[derive(Clone)]
pub struct RagChain {
    search: Arc<dyn PassageSearch>,
    llm: Arc<dyn ChatModel>,
    template: PromptTemplate,
}

impl RagChain {
    /// Chain using The Librarian persona prompt.
    pub fn new(search: Arc<dyn PassageSearch>, llm: Arc<dyn ChatModel>) -> Self {
        Self::with_template(search, llm, PromptTemplate::borges_expert())
    }

    pub fn with_template(
        search: Arc<dyn PassageSearch>,
        llm: Arc<dyn ChatModel>,
        template: PromptTemplate,
    ) -> Self {
        Self {
            search,
            llm,
            template,
        }
    }

    /// Answers `question`. Never fails: errors become an apology result with
    /// `error` set.
    pub async fn query(&self, question: &str) -> QueryResult {
        if question.trim().is_empty() {
            return QueryResult::message(EMPTY_QUESTION_ANSWER);
        }

        info!(question = %truncate_text(question, 100, "..."), "processing query");

        match self.answer(question).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "query processing failed");
                QueryResult::failed(e.to_string())
            }
        }
    }

    async fn answer(&self, question: &str) -> Result<QueryResult, ContextorError> {
        let passages = self.search.search(question, None, None).await?;
        if passages.is_empty() {
            info!("no passages retrieved");
            return Ok(QueryResult::message(NO_RESULTS_ANSWER));
        }

        let context = format_context(&passages);
        let prompt = self.template.fill(&context, question);
        let completion = self.llm.complete(&prompt).await?;

        info!(sources = passages.len(), "generated response");
        Ok(QueryResult::answered(completion.text(), &passages, context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::LlmProvider;
    use ai_llm_service::error_handler::{ProviderError, ProviderErrorKind};
    use rag_store::Metadata;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct StubSearch {
        passages: Vec<RetrievedPassage>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl PassageSearch for StubSearch {
        fn search<'a>(
            &'a self,
            _query: &'a str,
            _k: Option<u64>,
            _score_threshold: Option<f64>,
        ) -> BoxFuture<'a, Result<Vec<RetrievedPassage>, RagError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    return Err(RagError::Search {
                        collection: "borges_stories".into(),
                        reason: "connection refused".into(),
                    });
                }
                Ok(self.passages.clone())
            })
        }
    }

    #[derive(Default)]
    struct StubChat {
        reply: Option<Completion>,
        calls: AtomicUsize,
        last_prompt: Mutex<String>,
    }

    impl StubChat {
        fn replying(text: &str) -> Self {
            Self {
                reply: Some(Completion::from_text(text)),
                ..Default::default()
            }
        }
    }

    impl ChatModel for StubChat {
        fn complete<'a>(
            &'a self,
            prompt: &'a str,
        ) -> BoxFuture<'a, Result<Completion, AiLlmError>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                *self.last_prompt.lock().unwrap() = prompt.to_string();
                self.reply.clone().ok_or_else(|| {
                    AiLlmError::Provider(ProviderError::new(
                        LlmProvider::OpenAI,
                        ProviderErrorKind::Decode("no body".into()),
                    ))
                })
            })
        }
    }

    fn emma(score: f64, content: &str) -> RetrievedPassage {
        let mut metadata = Metadata::new();
        metadata.insert("story_title".into(), json!("Emma Zunz"));
        RetrievedPassage {
            content: content.to_string(),
            metadata,
            score,
            distance: Some(1.0 - score),
        }
    }

    fn chain(search: Arc<StubSearch>, chat: Arc<StubChat>) -> RagChain {
        RagChain::new(search, chat)
    }

    #[tokio::test]
    async fn emma_zunz_query_uses_three_sources() {
        let search = Arc::new(StubSearch {
            passages: vec![emma(0.9, "first"), emma(0.7, "second"), emma(0.5, "third")],
            ..Default::default()
        });
        let chat = Arc::new(StubChat::replying("Emma avenges her father."));

        let r = chain(search, chat.clone()).query("Who is Emma Zunz?").await;

        assert_eq!(r.answer, "Emma avenges her father.");
        assert_eq!(r.num_sources, 3);
        assert_eq!(r.num_sources, r.sources.len());
        assert!(r.error.is_none());
        let scores: Vec<f64> = r.sources.iter().map(|s| s.score).collect();
        assert_eq!(scores, [0.9, 0.7, 0.5]);

        let p1 = r.context_used.find("Passage 1").unwrap();
        let p2 = r.context_used.find("Passage 2").unwrap();
        let p3 = r.context_used.find("Passage 3").unwrap();
        assert!(p1 < p2 && p2 < p3);

        let prompt = chat.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains(&r.context_used));
        assert!(prompt.contains("Question: Who is Emma Zunz?"));
        assert_eq!(chat.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_passages_skips_the_llm() {
        let search = Arc::new(StubSearch::default());
        let chat = Arc::new(StubChat::replying("unused"));

        let r = chain(search.clone(), chat.clone()).query("Tlön?").await;

        assert_eq!(r.answer, NO_RESULTS_ANSWER);
        assert_eq!(r.context_used, "");
        assert!(r.sources.is_empty());
        assert_eq!(r.num_sources, 0);
        assert_eq!(search.calls.load(Ordering::SeqCst), 1);
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn blank_question_short_circuits() {
        let search = Arc::new(StubSearch::default());
        let chat = Arc::new(StubChat::replying("unused"));

        let r = chain(search.clone(), chat.clone()).query("   \n").await;

        assert_eq!(r.answer, EMPTY_QUESTION_ANSWER);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_error_becomes_apology() {
        let search = Arc::new(StubSearch {
            fail: true,
            ..Default::default()
        });
        let chat = Arc::new(StubChat::replying("unused"));

        let r = chain(search, chat.clone()).query("What is the Aleph?").await;

        let err = r.error.clone().unwrap();
        assert!(err.contains("connection refused"));
        assert!(r.answer.contains(&err));
        assert!(r.answer.starts_with("I encountered an error while processing your question: "));
        assert!(r.sources.is_empty());
        assert_eq!(chat.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn llm_error_becomes_apology() {
        let search = Arc::new(StubSearch {
            passages: vec![emma(0.9, "first")],
            ..Default::default()
        });
        let chat = Arc::new(StubChat::default());

        let r = chain(search, chat).query("What is the Aleph?").await;

        assert!(r.error.is_some());
        assert_eq!(r.num_sources, 0);
        assert_eq!(r.context_used, "");
    }

    #[tokio::test]
    async fn missing_text_falls_back_to_raw_body() {
        let search = Arc::new(StubSearch {
            passages: vec![emma(0.9, "first")],
            ..Default::default()
        });
        let chat = Arc::new(StubChat {
            reply: Some(Completion {
                content: None,
                raw: json!({ "choices": [] }),
            }),
            ..Default::default()
        });

        let r = chain(search, chat).query("q").await;

        assert_eq!(r.answer, r#"{"choices":[]}"#);
        assert_eq!(r.num_sources, 1);
    }
}
