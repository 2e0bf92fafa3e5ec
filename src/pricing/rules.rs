//! Tiered profit rules and their resolver.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

/// A profit margin scoped to a USD price range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitRule {
    /// Rule identity, assigned by the book
    pub id: u64,
    /// Inclusive lower bound in USD; None means unbounded below
    pub min_usd: Option<f64>,
    /// Inclusive upper bound in USD; None means unbounded above
    pub max_usd: Option<f64>,
    /// Profit margin to apply, in percent (15 = 15%)
    pub profit_percent: f64,
    /// Free-text label (e.g. "under 500 USD")
    #[serde(default)]
    pub description: String,
}

impl ProfitRule {
    /// Returns true if the price falls inside this rule's range.
    pub fn applies_to(&self, price_usd: f64) -> bool {
        let above_min = self.min_usd.is_none_or(|min| price_usd >= min);
        let below_max = self.max_usd.is_none_or(|max| price_usd <= max);
        above_min && below_max
    }
}

/// The four caller-settable fields of a rule, as they travel on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDraft {
    pub min_usd: Option<f64>,
    pub max_usd: Option<f64>,
    pub profit_percent: f64,
    #[serde(default)]
    pub description: String,
}

/// Resolves the profit percentage for a price against an ordered rule table.
///
/// Rules are tried in the given order (ascending by lower bound, unbounded
/// first) and the first qualifying rule wins; ranges may overlap, order is
/// the precedence. Returns None when the table is empty or nothing
/// qualifies, distinct from a valid 0% margin, so the caller can fall back
/// to the global markup.
pub fn resolve_markup(price_usd: f64, rules: &[ProfitRule]) -> Option<f64> {
    rules.iter().find(|rule| rule.applies_to(price_usd)).map(|rule| rule.profit_percent)
}

/// Errors from rule book operations.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("no profit rule with id {0}")]
    NotFound(u64),
}

/// The rule table with CRUD operations.
///
/// Kept sorted ascending by `min_usd` (unbounded rules first) after every
/// mutation, so iteration order is resolution precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBook {
    rules: Vec<ProfitRule>,
    next_id: u64,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self { rules: Vec::new(), next_id: 1 }
    }
}

impl RuleBook {
    /// Creates an empty rule book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all rules, sorted ascending by lower bound.
    pub fn rules(&self) -> &[ProfitRule] {
        &self.rules
    }

    /// Creates a rule from a draft and returns it.
    pub fn create(&mut self, draft: RuleDraft) -> ProfitRule {
        let rule = ProfitRule {
            id: self.next_id,
            min_usd: draft.min_usd,
            max_usd: draft.max_usd,
            profit_percent: draft.profit_percent,
            description: draft.description,
        };
        self.next_id += 1;

        debug!("Created rule {} ({:?}..{:?} -> {}%)", rule.id, rule.min_usd, rule.max_usd, rule.profit_percent);

        self.rules.push(rule.clone());
        self.resort();
        rule
    }

    /// Replaces all four mutable fields of an existing rule.
    pub fn update(&mut self, id: u64, draft: RuleDraft) -> Result<ProfitRule, RuleError> {
        let rule = self
            .rules
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(RuleError::NotFound(id))?;

        rule.min_usd = draft.min_usd;
        rule.max_usd = draft.max_usd;
        rule.profit_percent = draft.profit_percent;
        rule.description = draft.description;
        let updated = rule.clone();

        self.resort();
        Ok(updated)
    }

    /// Deletes a rule by id. Deleting an absent id is not an error.
    pub fn delete(&mut self, id: u64) {
        self.rules.retain(|r| r.id != id);
    }

    /// Returns the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the book has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    // Stable sort: rules sharing a lower bound keep their authoring order.
    fn resort(&mut self) {
        self.rules.sort_by(|a, b| match (a.min_usd, b.min_usd) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        });
    }
}
