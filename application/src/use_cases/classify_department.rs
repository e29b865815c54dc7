//! Classify Department use case.
//!
//! Routes a question to a [`Category`]: deterministic keyword match first,
//! then one closed-choice call to the completion service. Never fails.

use crate::ports::completion::CompletionService;
use crate::ports::conversation_logger::RoutingMethod;
use docqa_domain::util::preview;
use docqa_domain::{Category, KeywordRouter, PromptTemplate, parse_classification_response};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Department chosen for a question, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub method: RoutingMethod,
}

/// Department used when the completion service cannot be reached.
const FALLBACK_CATEGORY: Category = Category::It;

/// Use case for routing a question to a department.
///
/// The question is assumed non-empty; validation belongs to the caller.
#[derive(Clone)]
pub struct ClassifyDepartmentUseCase {
    completion: Arc<dyn CompletionService>,
    router: KeywordRouter,
}

impl ClassifyDepartmentUseCase {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            router: KeywordRouter::default(),
        }
    }

    /// Replace the built-in keyword sets.
    pub fn with_router(mut self, router: KeywordRouter) -> Self {
        self.router = router;
        self
    }

    /// Resolve the department of `question`.
    pub async fn execute(&self, question: &str) -> Classification {
        if let Some(hit) = self.router.route(question) {
            debug!(
                "Keyword '{}' routed question to {}",
                hit.keyword, hit.category
            );
            return Classification {
                category: hit.category,
                method: RoutingMethod::Keyword,
            };
        }

        info!(
            "No department keyword in '{}'; asking the model",
            preview(question, 40)
        );

        let prompt = PromptTemplate::classification(question);
        match self.completion.invoke(&prompt).await {
            Ok(reply) => {
                let category = parse_classification_response(&reply);
                debug!("Model replied '{}' -> {}", preview(reply.trim(), 40), category);
                Classification {
                    category,
                    method: RoutingMethod::Model,
                }
            }
            Err(e) => {
                warn!(
                    "Department classification failed ({}); defaulting to {}",
                    e, FALLBACK_CATEGORY
                );
                Classification {
                    category: FALLBACK_CATEGORY,
                    method: RoutingMethod::Fallback,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::error::ServiceError;
    use crate::use_cases::test_support::ScriptedCompletion;

    fn classifier(completion: &Arc<ScriptedCompletion>) -> ClassifyDepartmentUseCase {
        ClassifyDepartmentUseCase::new(completion.clone())
    }

    #[tokio::test]
    async fn test_hr_keyword_skips_model() {
        let completion = Arc::new(ScriptedCompletion::replying(&[]));
        let result = classifier(&completion).execute("婚假可以請幾天？").await;

        assert_eq!(result.category, Category::HrFinance);
        assert_eq!(result.method, RoutingMethod::Keyword);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_it_keyword_skips_model() {
        let completion = Arc::new(ScriptedCompletion::replying(&[]));
        let result = classifier(&completion).execute("How do I reset my VPN token?").await;

        assert_eq!(result.category, Category::It);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_keywords_from_both_sets_resolve_to_hr_finance() {
        let completion = Arc::new(ScriptedCompletion::replying(&[]));
        let result = classifier(&completion)
            .execute("報帳系統的伺服器掛了，費用要怎麼送？")
            .await;

        assert_eq!(result.category, Category::HrFinance);
        assert_eq!(completion.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_keyword_asks_model_once() {
        let completion = Arc::new(ScriptedCompletion::replying(&["hr_finance"]));
        let result = classifier(&completion).execute("年終獎金什麼時候發？").await;

        assert_eq!(result.category, Category::HrFinance);
        assert_eq!(result.method, RoutingMethod::Model);
        assert_eq!(completion.calls(), 1);
        assert!(completion.prompts()[0].ends_with("問題：年終獎金什麼時候發？"));
    }

    #[tokio::test]
    async fn test_unparseable_model_reply_resolves_to_it() {
        let completion = Arc::new(ScriptedCompletion::replying(&["不好意思，我無法判斷。"]));
        let result = classifier(&completion).execute("尾牙在哪裡？").await;

        assert_eq!(result.category, Category::It);
        assert_eq!(result.method, RoutingMethod::Model);
        assert_eq!(completion.calls(), 1);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back_to_it() {
        let completion = Arc::new(ScriptedCompletion::new(vec![Err(ServiceError::Timeout)]));
        let result = classifier(&completion).execute("尾牙在哪裡？").await;

        assert_eq!(result.category, Category::It);
        assert_eq!(result.method, RoutingMethod::Fallback);
        assert_eq!(completion.calls(), 1);
    }
}
