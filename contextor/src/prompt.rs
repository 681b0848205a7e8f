//! Prompt template for The Librarian persona.

use crate::error::ContextorError;

/// Persona prompt with `{context}` and `{question}` slots.
pub const BORGES_EXPERT_TEMPLATE: &str = r#"You are The Librarian, an expert on the works of Jorge Luis Borges. You have access to a vast collection of his stories and possess deep knowledge of his themes, symbolism, and literary techniques.

Your personality and approach:
- Speak with the erudite yet accessible voice befitting a scholar of Borges
- Draw connections between stories, themes, and philosophical concepts
- Reference specific passages when relevant to illuminate your points
- Embrace the labyrinthine nature of knowledge that Borges so loved
- Be precise in your literary analysis while remaining engaging

When answering questions:
1. Ground your responses in the retrieved text passages
2. Provide specific examples and quotations when possible
3. Explain the broader significance within Borges' literary universe
4. Make connections to recurring Borgesian themes (infinity, mirrors, labyrinths, time, identity)

Context from Borges' stories:
{context}

Question: {question}

Your response as The Librarian:"#;

/// Example questions offered by the chat widget.
pub const CONVERSATION_STARTERS: [&str; 5] = [
    "What themes unite Borges' labyrinths and libraries?",
    "Explain the concept of infinite regress in 'The Aleph'",
    "How does Borges explore the nature of identity?",
    "What role do mirrors play in Borges' fiction?",
    "Discuss the relationship between time and memory in Borges' work",
];

const CONTEXT_SLOT: &str = "{context}";
const QUESTION_SLOT: &str = "{question}";

/// Static prompt text with two named slots, validated on construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// # Errors
    /// `ContextorError::Template` when a slot is missing.
    pub fn new(template: impl Into<String>) -> Result<Self, ContextorError> {
        let template = template.into();
        if !validate_prompt_template(&template) {
            let missing = if template.contains(CONTEXT_SLOT) {
                "question"
            } else {
                "context"
            };
            return Err(ContextorError::Template(missing));
        }
        Ok(Self { template })
    }

    /// The Librarian persona template.
    pub fn borges_expert() -> Self {
        Self {
            template: BORGES_EXPERT_TEMPLATE.to_string(),
        }
    }

    /// Substitutes every occurrence of both slots. Only template text is
    /// scanned, so braces inside the context or question stay literal.
    pub fn fill(&self, context: &str, question: &str) -> String {
        self.template
            .split(CONTEXT_SLOT)
            .map(|piece| piece.replace(QUESTION_SLOT, question))
            .collect::<Vec<_>>()
            .join(context)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::borges_expert()
    }
}

/// True when `template` carries both the `{context}` and `{question}` slots.
pub fn validate_prompt_template(template: &str) -> bool {
    template.contains(CONTEXT_SLOT) && template.contains(QUESTION_SLOT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_template_is_valid() {
        assert!(validate_prompt_template(BORGES_EXPERT_TEMPLATE));
        assert!(PromptTemplate::new(BORGES_EXPERT_TEMPLATE).is_ok());
        assert!(!validate_prompt_template("Question: {question}"));
    }

    #[test]
    fn new_rejects_missing_slots() {
        assert!(matches!(
            PromptTemplate::new("only {question}"),
            Err(ContextorError::Template("context"))
        ));
        assert!(matches!(
            PromptTemplate::new("only {context}"),
            Err(ContextorError::Template("question"))
        ));
    }

    #[test]
    fn fill_substitutes_both_slots() {
        let t = PromptTemplate::new("C:{context}|Q:{question}").unwrap();
        assert_eq!(t.fill("passages", "who?"), "C:passages|Q:who?");
    }

    #[test]
    fn braces_in_context_are_left_alone() {
        let t = PromptTemplate::new("{context}\n{question}").unwrap();
        let out = t.fill("a {question} in the text", "real");
        assert_eq!(out, "a {question} in the text\nreal");
    }

    #[test]
    fn repeated_slots_are_all_filled() {
        let t = PromptTemplate::new("{context} / {context} / {question} {question}").unwrap();
        assert_eq!(t.fill("CTX", "Q"), "CTX / CTX / Q Q");
    }

    #[test]
    fn borges_prompt_ends_with_persona_cue() {
        let out = PromptTemplate::borges_expert().fill("CTX", "What is the Aleph?");
        assert!(out.starts_with("You are The Librarian"));
        assert!(out.contains("Context from Borges' stories:\nCTX\n\nQuestion: What is the Aleph?"));
        assert!(out.ends_with("Your response as The Librarian:"));
    }

    #[test]
    fn five_starters() {
        assert_eq!(CONVERSATION_STARTERS.len(), 5);
        assert!(CONVERSATION_STARTERS.iter().all(|q| !q.is_empty()));
    }
}
