//! Question-answering pipeline
//!
//! Sequences credential acquisition, knowledge-base search, passage
//! extraction, and answer synthesis for a batch of questions. Questions are
//! processed strictly one at a time with a fixed pacing delay between them
//! to stay under the search service's rate limit; answers preserve input
//! order.

use std::sync::Arc;
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::generation::synthesizer::{AnswerSynthesizer, AUTH_UNAVAILABLE_ANSWER};
use crate::providers::credentials::{Credential, CredentialProvider};
use crate::providers::search::SearchProvider;
use crate::retrieval;
use crate::types::answer::{Answer, ExtractedPassage};
use crate::types::query::SearchQuery;

/// Question-scoped reply when the search call itself fails
const SEARCH_UNAVAILABLE_ANSWER: &str =
    "The knowledge base could not be searched for this question. Please try again later.";

/// The grounded retrieval-and-answer pipeline
pub struct Pipeline {
    credentials: Arc<dyn CredentialProvider>,
    search: Arc<dyn SearchProvider>,
    synthesizer: AnswerSynthesizer,
    page_size: u32,
    locale: String,
    pacing: Duration,
}

impl Pipeline {
    /// Assemble the pipeline from its collaborators
    pub fn new(
        credentials: Arc<dyn CredentialProvider>,
        search: Arc<dyn SearchProvider>,
        synthesizer: AnswerSynthesizer,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            credentials,
            search,
            synthesizer,
            page_size: config.page_size,
            locale: config.language_code.clone(),
            pacing: Duration::from_millis(config.pacing_delay_ms),
        }
    }

    /// Answer a batch of questions in order, one answer per question.
    ///
    /// The credential is acquired once for the whole batch; failing to
    /// acquire it is the only batch-fatal condition and yields one identical
    /// "authentication unavailable" answer per pending question. Every other
    /// failure stays scoped to its question.
    pub async fn run(&self, questions: &[String]) -> Vec<Answer> {
        let credential = match self.credentials.acquire().await {
            Ok(credential) => credential,
            Err(err) => {
                tracing::error!("Batch aborted before search: {}", err);
                return questions
                    .iter()
                    .map(|_| Answer::refusal(AUTH_UNAVAILABLE_ANSWER))
                    .collect();
            }
        };

        let mut answers = Vec::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            tracing::info!("Processing question {}/{}", index + 1, questions.len());
            answers.push(self.answer_one(&credential, question).await);
        }

        answers
    }

    /// Single-turn chat over the same retrieve-then-synthesize path
    pub async fn chat(&self, message: &str) -> Answer {
        let credential = match self.credentials.acquire().await {
            Ok(credential) => credential,
            Err(err) => {
                tracing::error!("Chat aborted before search: {}", err);
                return Answer::refusal(AUTH_UNAVAILABLE_ANSWER);
            }
        };

        let passage = match self.retrieve(&credential, message).await {
            Ok(passage) => passage,
            Err(err) => {
                tracing::warn!("Search failed for chat message: {}", err);
                return Answer::refusal(SEARCH_UNAVAILABLE_ANSWER);
            }
        };
        self.synthesizer.chat_reply(message, &passage).await
    }

    /// Answer one question with its failures kept question-scoped: a search
    /// error becomes a diagnostic refusal, an exhausted extraction becomes
    /// the canonical refusal via the synthesizer short-circuit, and a model
    /// error is absorbed inside the synthesizer.
    async fn answer_one(&self, credential: &Credential, question: &str) -> Answer {
        let passage = match self.retrieve(credential, question).await {
            Ok(passage) => passage,
            Err(err) => {
                tracing::warn!("Search failed for question \"{}\": {}", question, err);
                return Answer::refusal(SEARCH_UNAVAILABLE_ANSWER);
            }
        };
        self.synthesizer.synthesize(question, &passage).await
    }

    /// Search the knowledge base and extract the best passage
    async fn retrieve(
        &self,
        credential: &Credential,
        question: &str,
    ) -> crate::error::Result<ExtractedPassage> {
        let query = SearchQuery::new(question)
            .with_page_size(self.page_size)
            .with_locale(self.locale.clone());

        let response = self.search.search(credential, &query).await?;
        Ok(retrieval::extract(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    use crate::error::{Error, Result};
    use crate::generation::synthesizer::REFUSAL_ANSWER;
    use crate::providers::credentials::CredentialSource;
    use crate::providers::llm::GenerativeModel;
    use crate::types::search::SearchResponse;

    struct StaticCredentials {
        fail: bool,
    }

    #[async_trait]
    impl CredentialProvider for StaticCredentials {
        async fn acquire(&self) -> Result<Credential> {
            if self.fail {
                return Err(Error::Auth("no usable credential source".to_string()));
            }
            Ok(Credential::new(
                "token".to_string(),
                "project".to_string(),
                Instant::now() + Duration::from_secs(3300),
                CredentialSource::AmbientDefault,
            ))
        }
    }

    /// Search fake that replays a canned JSON response, or fails
    struct CannedSearch {
        raw: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl CannedSearch {
        fn returning(raw: &'static str) -> Self {
            Self {
                raw: Some(raw),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                raw: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl SearchProvider for CannedSearch {
        async fn search(
            &self,
            _credential: &Credential,
            _query: &SearchQuery,
        ) -> Result<SearchResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.raw {
                Some(raw) => Ok(serde_json::from_str(raw).unwrap()),
                None => Err(Error::SearchStatus { status: 500 }),
            }
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    /// Model fake that answers from whatever passage the prompt embeds
    struct EchoModel;

    #[async_trait]
    impl GenerativeModel for EchoModel {
        async fn generate(&self, prompt: &str) -> Result<String> {
            let context = prompt
                .split("Context from Knowledge Base:\n")
                .nth(1)
                .and_then(|rest| rest.split("\n\nQuestion:").next())
                .unwrap_or("");
            Ok(format!("Based on the policy, the answer is: {}", context))
        }

        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    fn pipeline(credentials_fail: bool, search: Arc<CannedSearch>) -> Pipeline {
        let config = PipelineConfig {
            pacing_delay_ms: 0,
            ..Default::default()
        };
        Pipeline::new(
            Arc::new(StaticCredentials {
                fail: credentials_fail,
            }),
            search,
            AnswerSynthesizer::new(Arc::new(EchoModel)),
            &config,
        )
    }

    #[tokio::test]
    async fn test_run_preserves_count_and_order() {
        let search = Arc::new(CannedSearch::returning(
            r#"{"summary": {"summaryText": "Premiums are due monthly."}, "results": []}"#,
        ));
        let questions: Vec<String> = vec![
            "When are premiums due?".to_string(),
            "How often are premiums due?".to_string(),
            "Premium schedule?".to_string(),
        ];

        let answers = pipeline(false, Arc::clone(&search)).run(&questions).await;

        assert_eq!(answers.len(), 3);
        assert_eq!(search.calls.load(Ordering::SeqCst), 3);
        for answer in &answers {
            assert!(answer.grounded);
            assert!(answer.text.contains("Premiums are due monthly."));
        }
    }

    /// Search fake that reflects the query text back as the summary
    struct ReflectingSearch;

    #[async_trait]
    impl SearchProvider for ReflectingSearch {
        async fn search(
            &self,
            _credential: &Credential,
            query: &SearchQuery,
        ) -> Result<SearchResponse> {
            let raw = serde_json::json!({
                "summary": {"summaryText": format!("passage for {}", query.text)}
            });
            Ok(serde_json::from_value(raw).unwrap())
        }

        fn name(&self) -> &str {
            "reflecting"
        }
    }

    #[tokio::test]
    async fn test_answers_line_up_with_their_questions() {
        let config = PipelineConfig {
            pacing_delay_ms: 0,
            ..Default::default()
        };
        let pipeline = Pipeline::new(
            Arc::new(StaticCredentials { fail: false }),
            Arc::new(ReflectingSearch),
            AnswerSynthesizer::new(Arc::new(EchoModel)),
            &config,
        );

        let questions: Vec<String> = (1..=4).map(|i| format!("question {}", i)).collect();
        let answers = pipeline.run(&questions).await;

        assert_eq!(answers.len(), 4);
        for (question, answer) in questions.iter().zip(&answers) {
            assert!(answer.text.contains(&format!("passage for {}", question)));
        }
    }

    #[tokio::test]
    async fn test_credential_failure_yields_identical_refusals() {
        let search = Arc::new(CannedSearch::returning("{}"));
        let questions: Vec<String> = vec!["q1".to_string(), "q2".to_string()];

        let answers = pipeline(true, Arc::clone(&search)).run(&questions).await;

        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0], answers[1]);
        assert!(!answers[0].grounded);
        assert_eq!(answers[0].text, AUTH_UNAVAILABLE_ANSWER);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_search_response_becomes_refusal() {
        let search = Arc::new(CannedSearch::returning(r#"{"results": []}"#));
        let answers = pipeline(false, search)
            .run(&["Anything relevant?".to_string()])
            .await;

        assert_eq!(answers.len(), 1);
        assert!(!answers[0].grounded);
        assert_eq!(answers[0].text, REFUSAL_ANSWER);
    }

    #[tokio::test]
    async fn test_search_error_is_question_scoped() {
        let search = Arc::new(CannedSearch::failing());
        let answers = pipeline(false, search)
            .run(&["q1".to_string(), "q2".to_string()])
            .await;

        assert_eq!(answers.len(), 2);
        for answer in &answers {
            assert!(!answer.grounded);
            assert_eq!(answer.text, SEARCH_UNAVAILABLE_ANSWER);
        }
    }

    #[tokio::test]
    async fn test_struct_data_scenario_end_to_end() {
        let search = Arc::new(CannedSearch::returning(
            r#"{"results": [{"document": {"structData": {"description": "30 days"}}}]}"#,
        ));
        let answers = pipeline(false, search)
            .run(&["What is the grace period?".to_string()])
            .await;

        assert_eq!(answers.len(), 1);
        assert!(answers[0].grounded);
        assert!(answers[0].text.contains("30 days"));
    }

    #[tokio::test]
    async fn test_chat_uses_chat_refusal_on_empty_kb() {
        let search = Arc::new(CannedSearch::returning("{}"));
        let answer = pipeline(false, search).chat("hello there").await;

        assert!(!answer.grounded);
        assert!(answer.text.contains("I can only provide information"));
    }
}
