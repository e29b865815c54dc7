//! Classification reply parsing.
//!
//! Pure text matching on the completion service's answer to the
//! closed-choice routing prompt. Never fails: anything that does not name
//! HR/Finance resolves to [`Category::It`].

use super::Category;

/// Interpret a model's answer to the classification prompt.
///
/// Case-insensitive. HR/Finance is chosen when the reply contains the
/// `hr_finance` token, or `hr` as a standalone word (models often shorten
/// the token). Every other reply, including empty or off-topic text,
/// resolves to IT.
pub fn parse_classification_response(response: &str) -> Category {
    let folded = response.to_lowercase();

    if folded.contains(Category::HrFinance.as_str()) {
        return Category::HrFinance;
    }

    let names_hr = folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .any(|word| word == "hr");

    if names_hr {
        Category::HrFinance
    } else {
        Category::It
    }
}
