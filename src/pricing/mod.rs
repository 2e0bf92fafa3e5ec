//! Tiered profit rules and localized price calculation.

pub mod calculator;
pub mod rules;

pub use calculator::{round2, PriceContext};
pub use rules::{resolve_markup, ProfitRule, RuleBook, RuleDraft, RuleError};
