//! Run Conversation use case
//!
//! One conversation turn: `Start -> Classify -> Answer -> Done`.
//!
//! The caller owns [`ConversationState`]; this use case borrows it and returns
//! an extended copy. A turn that fails before `Done` hands nothing back, so
//! the caller's history is unchanged.

use crate::config::PipelineParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger, RoutingMethod,
};
use crate::ports::error::ServiceError;
use crate::ports::progress::{NoProgress, PipelineProgress};
use crate::use_cases::answer_question::{AnswerError, AnswerQuestionUseCase};
use crate::use_cases::classify_department::ClassifyDepartmentUseCase;
use docqa_domain::util::preview;
use docqa_domain::{
    Category, ConversationState, ConversationTurn, DomainError, PipelineStage, QueryRequest,
    Question,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that interrupt a conversation turn
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] DomainError),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(ServiceError),
}

impl From<AnswerError> for ConversationError {
    fn from(err: AnswerError) -> Self {
        match err {
            AnswerError::ServiceUnavailable(e) => ConversationError::ServiceUnavailable(e),
        }
    }
}

/// Result of a completed turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationOutput {
    pub answer: String,
    pub category: Category,
    pub routing: RoutingMethod,
    /// The caller's history plus this turn
    pub state: ConversationState,
}

/// Use case wiring department routing into grounded answering
#[derive(Clone)]
pub struct RunConversationUseCase {
    classifier: ClassifyDepartmentUseCase,
    answerer: AnswerQuestionUseCase,
    params: PipelineParams,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl RunConversationUseCase {
    pub fn new(classifier: ClassifyDepartmentUseCase, answerer: AnswerQuestionUseCase) -> Self {
        Self {
            classifier,
            answerer,
            params: PipelineParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Set pipeline parameters. The query mode is forwarded to the answerer.
    pub fn with_params(mut self, params: PipelineParams) -> Self {
        self.answerer = self.answerer.with_query_mode(params.query_mode);
        self.params = params;
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Execute one turn with default (no-op) progress
    pub async fn execute(
        &self,
        question: &str,
        state: &ConversationState,
    ) -> Result<ConversationOutput, ConversationError> {
        self.execute_with_progress(question, state, &NoProgress).await
    }

    /// Execute one turn with progress callbacks
    pub async fn execute_with_progress(
        &self,
        question: &str,
        state: &ConversationState,
        progress: &dyn PipelineProgress,
    ) -> Result<ConversationOutput, ConversationError> {
        let question = Question::parse(question)?;
        info!(
            "Turn {} started: {}",
            state.len() + 1,
            preview(question.content(), 60)
        );

        // Classify
        progress.on_stage_start(PipelineStage::Classify);
        let classification = self.classifier.execute(question.content()).await;
        progress.on_category_resolved(classification.category);
        progress.on_stage_complete(PipelineStage::Classify);

        self.conversation_logger.log(&ConversationEvent::Classification {
            question: question.content(),
            category: classification.category,
            method: classification.method,
        });

        // Answer
        progress.on_stage_start(PipelineStage::Answer);
        let request = QueryRequest::new(question.content(), classification.category)
            .with_context(state.recent(self.params.history_window));
        let (result, index_missing) = self.answerer.execute_detailed(&request).await?;
        progress.on_stage_complete(PipelineStage::Answer);

        self.conversation_logger.log(&ConversationEvent::Answer {
            question: question.content(),
            category: result.category,
            answer: &result.answer,
            index_missing,
        });

        // Done
        let state = state.with_turn(ConversationTurn::new(
            question.into_content(),
            result.answer.clone(),
        ));
        progress.on_stage_start(PipelineStage::Done);
        info!(
            "Turn {} answered by {} ({:?} routing)",
            state.len(),
            result.category,
            classification.method
        );

        Ok(ConversationOutput {
            answer: result.answer,
            category: result.category,
            routing: classification.method,
            state,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{FakeRetrieval, ScriptedCompletion};
    use docqa_domain::Passage;
    use std::sync::Mutex;

    fn pipeline(
        retrieval: &Arc<FakeRetrieval>,
        completion: &Arc<ScriptedCompletion>,
    ) -> RunConversationUseCase {
        RunConversationUseCase::new(
            ClassifyDepartmentUseCase::new(completion.clone()),
            AnswerQuestionUseCase::new(retrieval.clone(), completion.clone()),
        )
    }

    fn hr_index() -> Arc<FakeRetrieval> {
        Arc::new(FakeRetrieval::with_index(
            &[Category::HrFinance, Category::It],
            vec![Passage::new("加班費依勞基法計算。", "規章.txt", 0.88)],
        ))
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl PipelineProgress for RecordingProgress {
        fn on_stage_start(&self, stage: PipelineStage) {
            self.events.lock().unwrap().push(format!("start:{}", stage.as_str()));
        }

        fn on_stage_complete(&self, stage: PipelineStage) {
            self.events.lock().unwrap().push(format!("done:{}", stage.as_str()));
        }

        fn on_category_resolved(&self, category: Category) {
            self.events.lock().unwrap().push(format!("category:{category}"));
        }
    }

    #[tokio::test]
    async fn test_overtime_question_end_to_end() {
        let retrieval = hr_index();
        let completion = Arc::new(ScriptedCompletion::replying(&["依勞基法計算。"]));
        let use_case = pipeline(&retrieval, &completion);

        let output = use_case
            .execute("請問加班費怎麼算？", &ConversationState::new())
            .await
            .unwrap();

        assert_eq!(output.category, Category::HrFinance);
        assert_eq!(output.routing, RoutingMethod::Keyword);
        assert_eq!(output.answer, "依勞基法計算。");

        // keyword routing: the only completion call is the answer
        assert_eq!(completion.calls(), 1);
        let queries = retrieval.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].1,
            "【過去對話】\n（無）\n\n【目前問題】\n請問加班費怎麼算？"
        );

        assert_eq!(output.state.len(), 1);
        let turn = &output.state.history()[0];
        assert_eq!(turn.question(), "請問加班費怎麼算？");
        assert_eq!(turn.answer(), "依勞基法計算。");
    }

    #[tokio::test]
    async fn test_history_grows_one_turn_per_call_in_order() {
        let retrieval = hr_index();
        let completion = Arc::new(ScriptedCompletion::replying(&["a1", "a2", "a3"]));
        let use_case = pipeline(&retrieval, &completion);

        let mut state = ConversationState::new();
        for question in ["特休幾天？", "VPN 怎麼裝？", "報帳期限？"] {
            state = use_case.execute(question, &state).await.unwrap().state;
        }

        let questions: Vec<_> = state.history().iter().map(|t| t.question()).collect();
        assert_eq!(questions, ["特休幾天？", "VPN 怎麼裝？", "報帳期限？"]);
        let answers: Vec<_> = state.history().iter().map(|t| t.answer()).collect();
        assert_eq!(answers, ["a1", "a2", "a3"]);
    }

    #[tokio::test]
    async fn test_service_failure_leaves_history_unchanged() {
        let retrieval = hr_index();
        let completion = Arc::new(ScriptedCompletion::new(vec![
            Ok("a1".to_string()),
            Err(ServiceError::ConnectionError("ollama down".to_string())),
        ]));
        let use_case = pipeline(&retrieval, &completion);

        let state = use_case
            .execute("特休幾天？", &ConversationState::new())
            .await
            .unwrap()
            .state;
        let err = use_case.execute("薪資何時入帳？", &state).await.unwrap_err();

        assert!(matches!(err, ConversationError::ServiceUnavailable(_)));
        assert_eq!(state.len(), 1);
    }

    #[tokio::test]
    async fn test_blank_question_is_invalid_argument() {
        let retrieval = hr_index();
        let completion = Arc::new(ScriptedCompletion::replying(&[]));
        let use_case = pipeline(&retrieval, &completion);

        let err = use_case
            .execute("   ", &ConversationState::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ConversationError::InvalidArgument(_)));
        assert_eq!(completion.calls(), 0);
        assert_eq!(retrieval.calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_index_notice_is_recorded_as_turn() {
        let retrieval = Arc::new(FakeRetrieval::empty());
        let completion = Arc::new(ScriptedCompletion::replying(&[]));
        let use_case = pipeline(&retrieval, &completion);

        let output = use_case
            .execute("薪資單在哪裡看？", &ConversationState::new())
            .await
            .unwrap();

        assert_eq!(output.answer, "⚠️ 尚未建立 hr_finance 向量庫");
        assert_eq!(output.state.len(), 1);
        assert_eq!(completion.calls(), 0);
        assert_eq!(retrieval.calls(), 0);
    }

    #[tokio::test]
    async fn test_history_window_limits_context() {
        let retrieval = hr_index();
        let completion = Arc::new(ScriptedCompletion::replying(&["ok"]));
        let use_case = pipeline(&retrieval, &completion)
            .with_params(PipelineParams::default().with_history_window(1));

        let state = ConversationState::from_turns(vec![
            ConversationTurn::new("舊問題", "舊答案"),
            ConversationTurn::new("特休幾天？", "七天。"),
        ]);
        use_case.execute("婚假呢？", &state).await.unwrap();

        let query = &retrieval.queries()[0].1;
        assert!(query.contains("User: 特休幾天？"));
        assert!(!query.contains("舊問題"));
    }

    #[tokio::test]
    async fn test_progress_follows_stage_order() {
        let retrieval = hr_index();
        let completion = Arc::new(ScriptedCompletion::replying(&["ok"]));
        let use_case = pipeline(&retrieval, &completion);
        let progress = RecordingProgress::default();

        use_case
            .execute_with_progress("VPN 連不上", &ConversationState::new(), &progress)
            .await
            .unwrap();

        assert_eq!(
            *progress.events.lock().unwrap(),
            [
                "start:classify",
                "category:it",
                "done:classify",
                "start:answer",
                "done:answer",
                "start:done",
            ]
        );
    }
}
