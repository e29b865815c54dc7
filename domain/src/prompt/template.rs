//! Prompt templates for the routing and answering stages

use crate::category::Category;
use crate::conversation::entities::ConversationTurn;
use crate::retrieval::{Passage, QueryMode};

/// Header above serialized prior turns
const PAST_HEADER: &str = "【過去對話】";
/// Header above the question being answered
const CURRENT_HEADER: &str = "【目前問題】";
/// Header above retrieved passages
const CONTEXT_HEADER: &str = "【參考資料】";
/// Written under the past-conversation header when there are no prior turns
pub const EMPTY_HISTORY_MARKER: &str = "（無）";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Closed-choice routing prompt. The model must answer with one of the
    /// category tokens; the raw question is appended last.
    pub fn classification(question: &str) -> String {
        format!(
            "你是公司助理，請判斷下列問題屬於哪個部門：『人事財務』或『資訊』，只回答 {} 或 {}。\n\n問題：{}",
            Category::HrFinance.as_str(),
            Category::It.as_str(),
            question
        )
    }

    /// Serialize turns as alternating `User:` / `AI:` lines.
    ///
    /// Returns [`EMPTY_HISTORY_MARKER`] for an empty window so the section
    /// is never blank.
    pub fn history_block(turns: &[ConversationTurn]) -> String {
        if turns.is_empty() {
            return EMPTY_HISTORY_MARKER.to_string();
        }
        turns
            .iter()
            .map(|t| format!("User: {}\nAI: {}", t.question(), t.answer()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// History and question combined under their section headers.
    pub fn merged_query(turns: &[ConversationTurn], question: &str) -> String {
        format!(
            "{PAST_HEADER}\n{}\n\n{CURRENT_HEADER}\n{}",
            Self::history_block(turns),
            question
        )
    }

    /// Text sent to similarity search for the given mode.
    pub fn retrieval_query(mode: QueryMode, turns: &[ConversationTurn], question: &str) -> String {
        match mode {
            QueryMode::Merged => Self::merged_query(turns, question),
            QueryMode::QuestionOnly => question.to_string(),
        }
    }

    /// Grounded answer prompt.
    ///
    /// `question` is always the user's own question, never the merged
    /// retrieval query.
    pub fn answer(passages: &[Passage], turns: &[ConversationTurn], question: &str) -> String {
        let context = passages
            .iter()
            .map(|p| p.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"你是一個公司內部的智慧助理，根據參考資料與對話歷史回答問題。
請用台灣繁體中文、自然語氣回答。若參考資料中沒有答案，請直接說明不知道。

{CONTEXT_HEADER}
{context}

{PAST_HEADER}
{history}

{CURRENT_HEADER}
{question}

請給出完整回答："#,
            history = Self::history_block(turns),
        )
    }

    /// Answer returned when a category has no retrieval index yet.
    pub fn index_missing(category: Category) -> String {
        format!("⚠️ 尚未建立 {} 向量庫", category.as_str())
    }
}
