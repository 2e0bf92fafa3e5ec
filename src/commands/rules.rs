//! Profit rule admin command implementations.

use crate::config::OutputFormat;
use crate::pricing::{ProfitRule, RuleBook, RuleDraft};
use anyhow::Result;
use tracing::info;

/// Renders the rule table.
pub fn list_rules(book: &RuleBook, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(book.rules())?,
        _ => format_rules_table(book.rules()),
    })
}

/// Creates a rule and returns a confirmation line.
pub fn add_rule(book: &mut RuleBook, draft: RuleDraft) -> String {
    let rule = book.create(draft);
    info!("Created rule {}", rule.id);
    format!("Created rule {}", describe_rule(&rule))
}

/// Updates a rule by id; unknown ids are an error.
pub fn update_rule(book: &mut RuleBook, id: u64, draft: RuleDraft) -> Result<String> {
    let rule = book.update(id, draft)?;
    info!("Updated rule {}", rule.id);
    Ok(format!("Updated rule {}", describe_rule(&rule)))
}

/// Deletes a rule by id; deleting an absent id succeeds quietly.
pub fn remove_rule(book: &mut RuleBook, id: u64) -> String {
    book.delete(id);
    info!("Removed rule {}", id);
    format!("Removed rule {} (if it existed)", id)
}

fn format_rules_table(rules: &[ProfitRule]) -> String {
    if rules.is_empty() {
        return "No profit rules configured; the global markup applies to everything.".to_string();
    }

    let mut lines = Vec::new();

    lines.push(format!(
        "{:<6} {:>10} {:>10} {:>9}  {}",
        "Id", "Min USD", "Max USD", "Profit %", "Description"
    ));
    lines.push(format!("{:-<6} {:-<10} {:-<10} {:-<9}  {:-<30}", "", "", "", "", ""));

    for rule in rules {
        lines.push(format!(
            "{:<6} {:>10} {:>10} {:>9}  {}",
            rule.id,
            bound(rule.min_usd),
            bound(rule.max_usd),
            format!("{:.1}", rule.profit_percent),
            rule.description
        ));
    }

    lines.join("\n")
}

fn bound(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

fn describe_rule(rule: &ProfitRule) -> String {
    format!(
        "{}: {}..{} -> {}%",
        rule.id,
        bound(rule.min_usd),
        bound(rule.max_usd),
        rule.profit_percent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(min: Option<f64>, max: Option<f64>, pct: f64) -> RuleDraft {
        RuleDraft { min_usd: min, max_usd: max, profit_percent: pct, description: String::new() }
    }

    #[test]
    fn test_add_and_list() {
        let mut book = RuleBook::new();
        let msg = add_rule(&mut book, draft(Some(0.0), Some(500.0), 15.0));
        assert!(msg.contains("Created rule 1"));

        let table = list_rules(&book, OutputFormat::Table).unwrap();
        assert!(table.contains("0.00"));
        assert!(table.contains("500.00"));
        assert!(table.contains("15.0"));
    }

    #[test]
    fn test_list_empty() {
        let book = RuleBook::new();
        let table = list_rules(&book, OutputFormat::Table).unwrap();
        assert!(table.contains("No profit rules"));
    }

    #[test]
    fn test_list_json() {
        let mut book = RuleBook::new();
        add_rule(&mut book, draft(None, Some(50.0), 20.0));

        let json = list_rules(&book, OutputFormat::Json).unwrap();
        let parsed: Vec<ProfitRule> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].max_usd, Some(50.0));
    }

    #[test]
    fn test_update_unknown_id_fails() {
        let mut book = RuleBook::new();
        let result = update_rule(&mut book, 7, draft(None, None, 5.0));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("7"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut book = RuleBook::new();
        add_rule(&mut book, draft(None, None, 5.0));

        remove_rule(&mut book, 1);
        assert!(book.is_empty());

        // Second removal of the same id must not fail
        let msg = remove_rule(&mut book, 1);
        assert!(msg.contains("Removed rule 1"));
    }

    #[test]
    fn test_unbounded_rule_renders_dashes() {
        let mut book = RuleBook::new();
        add_rule(&mut book, draft(None, None, 7.5));

        let table = list_rules(&book, OutputFormat::Table).unwrap();
        assert!(table.contains("-"));
        assert!(table.contains("7.5"));
    }
}
