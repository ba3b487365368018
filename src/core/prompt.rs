//! Prompt construction.
//!
//! The instruction template lives in `templates/swot_prompt.txt` and is the
//! contract the model is steered with: persona rules, the five-step task,
//! SWOT classification rules, TOWS strategy rules and the Brazilian
//! tax-regime research step with its MEI / non-MEI branches.

use crate::domain::model::{InputField, UserInput};
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const PROMPT_TEMPLATE: &str = include_str!("../../templates/swot_prompt.txt");

/// Fixed `estimatedTaxPercentage` sentence the MEI branch asks for.
pub const MEI_TAX_SUMMARY: &str =
    "Taxa fixa mensal (DAS), não é um percentual sobre o faturamento.";

/// Example percentage range the standard-regime branch asks for.
pub const STANDARD_TAX_SUMMARY_EXAMPLE: &str = "A carga tributária total estimada no Simples Nacional pode variar de 6% a 15%, dependendo do faturamento anual.";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"));

/// Renders the template for one submission. Pure: same input, same bytes.
///
/// Substitution is a single pass, so user text containing `{{...}}` is
/// copied as-is instead of being expanded again.
pub fn build_prompt(input: &UserInput) -> String {
    PLACEHOLDER
        .replace_all(PROMPT_TEMPLATE, |caps: &Captures| {
            match InputField::from_key(&caps[1]) {
                Some(field) => input.get(field).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
