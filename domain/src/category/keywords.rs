//! Keyword fast path for department routing.
//!
//! Matching is a case-folded substring test, so multi-word keywords such as
//! `"paid leave"` and CJK keywords such as `"加班"` work without tokenization.

use super::Category;

/// Keywords that identify one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    category: Category,
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Create a keyword set. Keywords are stored case-folded.
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// First keyword contained in an already case-folded question.
    fn first_match(&self, folded_question: &str) -> Option<&str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .find(|k| folded_question.contains(k))
    }

    /// Built-in HR/Finance keywords.
    pub fn default_hr_finance() -> Self {
        Self::new(
            Category::HrFinance,
            [
                "請假",
                "報帳",
                "薪資",
                "特休",
                "加班",
                "婚假",
                "保險",
                "費用",
                "leave request",
                "reimbursement",
                "salary",
                "paid leave",
                "overtime",
                "marriage leave",
                "insurance",
                "expense",
            ],
        )
    }

    /// Built-in IT keywords.
    pub fn default_it() -> Self {
        Self::new(
            Category::It,
            [
                "vpn",
                "電腦",
                "teams",
                "登入",
                "伺服器",
                "網路",
                "印表機",
                "computer",
                "collaboration-tool",
                "login",
                "server",
                "network",
                "printer",
            ],
        )
    }
}

/// Result of a successful keyword match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    pub category: Category,
    pub keyword: String,
}

/// Ordered keyword sets; the first set with a hit wins.
///
/// The default order puts HR/Finance before IT, so a question such as
/// "VPN 報帳系統登入失敗" that hits both sets routes to HR/Finance.
#[derive(Debug, Clone)]
pub struct KeywordRouter {
    sets: Vec<KeywordSet>,
}

impl KeywordRouter {
    pub fn new(sets: Vec<KeywordSet>) -> Self {
        Self { sets }
    }

    pub fn sets(&self) -> &[KeywordSet] {
        &self.sets
    }

    /// Route a question, or `None` when no set matches.
    pub fn route(&self, question: &str) -> Option<KeywordMatch> {
        let folded = question.to_lowercase();
        self.sets.iter().find_map(|set| {
            set.first_match(&folded).map(|keyword| KeywordMatch {
                category: set.category(),
                keyword: keyword.to_string(),
            })
        })
    }
}

impl Default for KeywordRouter {
    fn default() -> Self {
        Self::new(vec![KeywordSet::default_hr_finance(), KeywordSet::default_it()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn routed(question: &str) -> Option<Category> {
        KeywordRouter::default().route(question).map(|m| m.category)
    }

    #[test]
    fn test_hr_keyword_routes_to_hr() {
        assert_eq!(routed("請問加班費怎麼算？"), Some(Category::HrFinance));
        assert_eq!(routed("How do I file a reimbursement?"), Some(Category::HrFinance));
    }

    #[test]
    fn test_it_keyword_routes_to_it() {
        assert_eq!(routed("VPN 連不上"), Some(Category::It));
        assert_eq!(routed("The office PRINTER is jammed"), Some(Category::It));
    }

    #[test]
    fn test_both_sets_resolve_to_hr_finance() {
        assert_eq!(routed("報帳系統登入失敗"), Some(Category::HrFinance));
        assert_eq!(routed("salary portal login broken"), Some(Category::HrFinance));
    }

    #[test]
    fn test_no_keyword_returns_none() {
        assert_eq!(routed("公司尾牙在哪裡舉辦？"), None);
    }

    #[test]
    fn test_match_reports_keyword() {
        let hit = KeywordRouter::default().route("Paid Leave policy").unwrap();
        assert_eq!(hit.keyword, "paid leave");
    }

    #[test]
    fn test_default_sets_are_disjoint() {
        let hr = KeywordSet::default_hr_finance();
        let it = KeywordSet::default_it();
        for keyword in hr.keywords() {
            assert!(!it.keywords().contains(keyword), "{keyword} in both sets");
        }
    }

    #[test]
    fn test_empty_keywords_are_dropped() {
        let set = KeywordSet::new(Category::It, ["", "vpn"]);
        assert_eq!(set.keywords(), ["vpn".to_string()]);
    }
}
