//! Answer Question use case.
//!
//! Retrieval-augmented answering within one department:
//! 1. Check the category index exists (sentinel answer if not)
//! 2. Retrieve passages for the retrieval query
//! 3. Ask the completion service with the grounded answer prompt

use crate::config::PipelineParams;
use crate::ports::completion::CompletionService;
use crate::ports::error::ServiceError;
use crate::ports::retrieval::RetrievalService;
use docqa_domain::util::preview;
use docqa_domain::{PromptTemplate, QueryMode, QueryRequest, QueryResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while answering
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(#[from] ServiceError),
}

/// Use case for answering a question from a category's documents.
#[derive(Clone)]
pub struct AnswerQuestionUseCase {
    retrieval: Arc<dyn RetrievalService>,
    completion: Arc<dyn CompletionService>,
    query_mode: QueryMode,
}

impl AnswerQuestionUseCase {
    pub fn new(retrieval: Arc<dyn RetrievalService>, completion: Arc<dyn CompletionService>) -> Self {
        Self {
            retrieval,
            completion,
            query_mode: PipelineParams::default().query_mode,
        }
    }

    pub fn with_query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = mode;
        self
    }

    /// Answer `request` from its category's index.
    pub async fn execute(&self, request: &QueryRequest) -> Result<QueryResult, AnswerError> {
        self.execute_detailed(request).await.map(|(result, _)| result)
    }

    /// Like [`Self::execute`], also reporting whether the category index
    /// was missing.
    pub async fn execute_detailed(
        &self,
        request: &QueryRequest,
    ) -> Result<(QueryResult, bool), AnswerError> {
        let category = request.category;

        if !self.retrieval.index_exists(category).await {
            info!("No index built for {}; returning notice", category);
            return Ok((
                QueryResult::new(PromptTemplate::index_missing(category), category),
                true,
            ));
        }

        let query = PromptTemplate::retrieval_query(
            self.query_mode,
            &request.context_window,
            &request.question,
        );
        let passages = self.retrieval.retrieve(category, &query).await?;
        debug!(
            "Retrieved {} passages from {} for '{}'",
            passages.len(),
            category,
            preview(&request.question, 40)
        );

        let prompt = PromptTemplate::answer(&passages, &request.context_window, &request.question);
        let answer = self.completion.invoke(&prompt).await?;

        Ok((QueryResult::new(answer.trim(), category), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeRetrieval, ScriptedCompletion};
    use docqa_domain::{Category, ConversationTurn, Passage};

    fn passages() -> Vec<Passage> {
        vec![Passage::new("平日加班前兩小時按 1.34 倍計算。", "加班辦法.txt", 0.91)]
    }

    #[tokio::test]
    async fn test_missing_index_returns_notice_without_calls() {
        let retrieval = Arc::new(FakeRetrieval::empty());
        let completion = Arc::new(ScriptedCompletion::replying(&["unused"]));
        let use_case = AnswerQuestionUseCase::new(retrieval.clone(), completion.clone());

        let request = QueryRequest::new("加班費怎麼算？", Category::HrFinance);
        let (result, missing) = use_case.execute_detailed(&request).await.unwrap();

        assert!(missing);
        assert_eq!(result.answer, "⚠️ 尚未建立 hr_finance 向量庫");
        assert_eq!(result.category, Category::HrFinance);
        assert_eq!(retrieval.calls(), 0);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_answers_from_retrieved_context() {
        let retrieval = Arc::new(FakeRetrieval::with_index(&[Category::HrFinance], passages()));
        let completion = Arc::new(ScriptedCompletion::replying(&["  按 1.34 倍計算。\n"]));
        let use_case = AnswerQuestionUseCase::new(retrieval.clone(), completion.clone());

        let request = QueryRequest::new("加班費怎麼算？", Category::HrFinance);
        let result = use_case.execute(&request).await.unwrap();

        assert_eq!(result, QueryResult::new("按 1.34 倍計算。", Category::HrFinance));
        assert_eq!(retrieval.calls(), 1);
        assert_eq!(completion.calls(), 1);

        let prompt = &completion.prompts()[0];
        assert!(prompt.contains("平日加班前兩小時按 1.34 倍計算。"));
        assert!(prompt.contains("【目前問題】\n加班費怎麼算？"));
    }

    #[tokio::test]
    async fn test_merged_mode_puts_history_in_retrieval_query() {
        let retrieval = Arc::new(FakeRetrieval::with_index(&[Category::HrFinance], passages()));
        let completion = Arc::new(ScriptedCompletion::replying(&["三天。"]));
        let use_case = AnswerQuestionUseCase::new(retrieval.clone(), completion.clone());

        let history = [ConversationTurn::new("特休幾天？", "七天。")];
        let request =
            QueryRequest::new("那婚假呢？", Category::HrFinance).with_context(&history);
        use_case.execute(&request).await.unwrap();

        let (category, query) = &retrieval.queries()[0];
        assert_eq!(*category, Category::HrFinance);
        assert!(query.contains("User: 特休幾天？\nAI: 七天。"));
        assert!(query.ends_with("【目前問題】\n那婚假呢？"));
    }

    #[tokio::test]
    async fn test_question_only_mode_searches_bare_question() {
        let retrieval = Arc::new(FakeRetrieval::with_index(&[Category::It], passages()));
        let completion = Arc::new(ScriptedCompletion::replying(&["重新安裝。"]));
        let use_case = AnswerQuestionUseCase::new(retrieval.clone(), completion.clone())
            .with_query_mode(QueryMode::QuestionOnly);

        let history = [ConversationTurn::new("VPN 斷線", "請重新登入。")];
        let request = QueryRequest::new("還是不行", Category::It).with_context(&history);
        use_case.execute(&request).await.unwrap();

        assert_eq!(retrieval.queries()[0].1, "還是不行");
        // history still reaches the model
        assert!(completion.prompts()[0].contains("User: VPN 斷線"));
    }

    #[tokio::test]
    async fn test_identical_requests_yield_identical_results() {
        let retrieval = Arc::new(FakeRetrieval::with_index(&[Category::HrFinance], passages()));
        let completion = Arc::new(ScriptedCompletion::replying(&["答案", "答案"]));
        let use_case = AnswerQuestionUseCase::new(retrieval.clone(), completion.clone());

        let request = QueryRequest::new("加班費怎麼算？", Category::HrFinance);
        let first = use_case.execute(&request).await.unwrap();
        let second = use_case.execute(&request).await.unwrap();

        assert_eq!(first, second);
        let prompts = completion.prompts();
        assert_eq!(prompts[0], prompts[1]);
    }

    #[tokio::test]
    async fn test_retrieval_failure_is_service_unavailable() {
        let retrieval = Arc::new(FakeRetrieval::failing(
            &[Category::It],
            ServiceError::ConnectionError("connection refused".to_string()),
        ));
        let completion = Arc::new(ScriptedCompletion::replying(&["unused"]));
        let use_case = AnswerQuestionUseCase::new(retrieval, completion.clone());

        let err = use_case
            .execute(&QueryRequest::new("印表機卡紙", Category::It))
            .await
            .unwrap_err();

        assert!(matches!(err, AnswerError::ServiceUnavailable(_)));
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_completion_failure_is_service_unavailable() {
        let retrieval = Arc::new(FakeRetrieval::with_index(&[Category::It], passages()));
        let completion = Arc::new(ScriptedCompletion::new(vec![Err(ServiceError::Timeout)]));
        let use_case = AnswerQuestionUseCase::new(retrieval, completion);

        let err = use_case
            .execute(&QueryRequest::new("印表機卡紙", Category::It))
            .await
            .unwrap_err();

        assert_eq!(err, AnswerError::ServiceUnavailable(ServiceError::Timeout));
    }
}
