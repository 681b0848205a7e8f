//! Human-readable status lines for the diagnostics panel.

use rag_store::{CollectionInfo, CollectionStatus, RetrievedPassage};
use serde::Serialize;

pub const NOT_INITIALIZED: &str = "❌ Vector store not initialized";
pub const SEARCH_TEST_QUERY: &str = "Emma Zunz";
pub const SEARCH_TEST_K: u64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub message: String,
    pub status_type: StatusType,
}

impl StatusReport {
    pub fn new(message: impl Into<String>, status_type: StatusType) -> Self {
        Self {
            message: message.into(),
            status_type,
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(NOT_INITIALIZED, StatusType::Error)
    }
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn collection_status(info: &CollectionInfo, storage: &str) -> StatusReport {
    if info.status == CollectionStatus::Error {
        let error = info.error.as_deref().unwrap_or("unknown error");
        return StatusReport::new(format!("❌ Collection Error: {error}"), StatusType::Error);
    }

    let mut message = format!(
        "✅ Connected to '{}' collection\n📊 Documents: {}\n💾 Storage: {}\n📄 Status: connected",
        info.name,
        group_thousands(info.count.unwrap_or(0)),
        storage
    );
    if let Some(sample) = &info.sample_data {
        if !sample.metadata_keys.is_empty() {
            message.push_str(&format!("\n🏷️ Metadata: {}", sample.metadata_keys.join(", ")));
        }
    }
    StatusReport::new(message, StatusType::Success)
}

pub fn search_test(passages: &[RetrievedPassage]) -> StatusReport {
    let Some(top) = passages.first() else {
        return StatusReport::new(
            format!("⚠️ Search returned no results for '{SEARCH_TEST_QUERY}'"),
            StatusType::Warning,
        );
    };

    let preview: String = top.content.chars().take(100).collect();
    StatusReport::new(
        format!(
            "✅ Search Test Successful\n🔍 Query: '{SEARCH_TEST_QUERY}'\n📊 Results: {} documents found\n🎯 Top score: {:.3}\n📝 Preview: {preview}...",
            passages.len(),
            top.score
        ),
        StatusType::Success,
    )
}

pub fn search_test_failed(error: &str) -> StatusReport {
    StatusReport::new(
        format!("❌ Search Test Failed: {error}"),
        StatusType::Error,
    )
}
