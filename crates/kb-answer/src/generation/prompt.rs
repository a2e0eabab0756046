//! Prompt templates for grounded answer synthesis

/// Prompt builder for context-constrained generation
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the constrained Q&A prompt embedding only the retrieved passage
    /// and the question. The model is told to emit the literal refusal phrase
    /// when the passage is insufficient; synthesis normalizes that phrase
    /// afterwards.
    pub fn build_answer_prompt(question: &str, context: &str) -> String {
        format!(
            r#"You are an AI assistant that ONLY answers based on the provided context from a specific knowledge base.

STRICT INSTRUCTIONS:
1. Answer ONLY using information from the context below
2. If the context doesn't contain enough information, say "The knowledge base doesn't contain enough information to answer this question"
3. Do NOT add general knowledge or assumptions
4. Keep answers concise and directly related to the context

Context from Knowledge Base:
{context}

Question: {question}

Answer based STRICTLY on the context above:"#,
            context = context,
            question = question
        )
    }

    /// Conversational variant of the constrained prompt
    pub fn build_chat_prompt(message: &str, context: &str) -> String {
        format!(
            r#"You are a helpful AI assistant that answers ONLY based on a specific knowledge base.

STRICT INSTRUCTIONS:
1. Answer ONLY using information from the context below
2. If the context doesn't fully answer the question, say "I can only provide information based on the knowledge base. Here's what I found:" and then provide what's available
3. Do NOT add general knowledge or make assumptions beyond the context
4. Be helpful but stay within the boundaries of the provided context

Context from Knowledge Base:
{context}

User Message: {message}

Response based STRICTLY on the context above:"#,
            context = context,
            message = message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_prompt_embeds_only_passage_and_question() {
        let prompt =
            PromptBuilder::build_answer_prompt("What is the grace period?", "30 days");
        assert!(prompt.contains("Context from Knowledge Base:\n30 days"));
        assert!(prompt.contains("Question: What is the grace period?"));
        assert!(prompt.contains("STRICT INSTRUCTIONS"));
    }

    #[test]
    fn test_chat_prompt_embeds_message() {
        let prompt = PromptBuilder::build_chat_prompt("Tell me about renewals", "Renews yearly.");
        assert!(prompt.contains("User Message: Tell me about renewals"));
        assert!(prompt.contains("Renews yearly."));
    }
}
