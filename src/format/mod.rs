//! Output formatting for catalog entries (table, JSON, markdown, CSV).

use crate::catalog::CatalogEntry;
use crate::config::OutputFormat;

/// Formats catalog entries for output.
pub struct Formatter {
    format: OutputFormat,
    currency: String,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat, currency: impl Into<String>) -> Self {
        Self { format, currency: currency.into() }
    }

    /// Formats a single entry.
    pub fn format_entry(&self, entry: &CatalogEntry) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(entry),
            OutputFormat::Table => self.table_single(entry),
            OutputFormat::Markdown => self.markdown_entries(std::slice::from_ref(entry)),
            OutputFormat::Csv => self.csv_entries(std::slice::from_ref(entry)),
        }
    }

    /// Formats multiple entries.
    pub fn format_entries(&self, entries: &[CatalogEntry]) -> String {
        if entries.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No catalog entries.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_entries(entries),
            OutputFormat::Table => self.table_entries(entries),
            OutputFormat::Markdown => self.markdown_entries(entries),
            OutputFormat::Csv => self.csv_entries(entries),
        }
    }

    // JSON formatting

    fn json_single(&self, entry: &CatalogEntry) -> String {
        serde_json::to_string_pretty(entry).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_entries(&self, entries: &[CatalogEntry]) -> String {
        serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, entry: &CatalogEntry) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Name:      {}", entry.name));
        lines.push(format!("Category:  {}", self.category_or_dash(entry)));

        match entry.price_usd {
            Some(usd) => lines.push(format!("USD:       {:.2}", usd)),
            None => lines.push("USD:       N/A".to_string()),
        }

        match entry.final_price_local {
            Some(local) => lines.push(format!("Final:     {} {:.2}", self.currency, local)),
            None => lines.push("Final:     N/A".to_string()),
        }

        lines.join("\n")
    }

    fn table_entries(&self, entries: &[CatalogEntry]) -> String {
        let name_width = 40;
        let category_width = 18;
        let usd_width = 10;
        let final_width = 16;

        let mut lines = Vec::new();

        let final_header = format!("Final ({})", self.currency);
        lines.push(format!(
            "{:<name_width$}  {:<category_width$}  {:>usd_width$}  {:>final_width$}",
            "Name", "Category", "USD", final_header
        ));
        lines.push(format!(
            "{:-<name_width$}  {:-<category_width$}  {:-<usd_width$}  {:-<final_width$}",
            "", "", "", ""
        ));

        for entry in entries {
            let usd_str = match entry.price_usd {
                Some(usd) => format!("{:.2}", usd),
                None => "N/A".to_string(),
            };

            let final_str = match entry.final_price_local {
                Some(local) => format!("{:.2}", local),
                None => "N/A".to_string(),
            };

            lines.push(format!(
                "{:<name_width$}  {:<category_width$}  {:>usd_width$}  {:>final_width$}",
                truncate(&entry.name, name_width),
                truncate(&entry.category, category_width),
                usd_str,
                final_str
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} entries", entries.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_entries(&self, entries: &[CatalogEntry]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("| Name | Category | USD | Final ({}) |", self.currency));
        lines.push("|------|----------|-----|-----------|".to_string());

        for entry in entries {
            let usd_str = match entry.price_usd {
                Some(usd) => format!("{:.2}", usd),
                None => "N/A".to_string(),
            };

            let final_str = match entry.final_price_local {
                Some(local) => format!("{:.2}", local),
                None => "N/A".to_string(),
            };

            lines.push(format!(
                "| {} | {} | {} | {} |",
                truncate(&entry.name, 40),
                entry.category,
                usd_str,
                final_str
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} entries*", entries.len()));

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "name,category,price_usd,final_price_local,currency".to_string()
    }

    fn csv_entries(&self, entries: &[CatalogEntry]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for entry in entries {
            let usd = entry.price_usd.map(|p| p.to_string()).unwrap_or_default();
            let local = entry.final_price_local.map(|p| p.to_string()).unwrap_or_default();

            lines.push(format!(
                "{},{},{},{},{}",
                csv_escape(&entry.name),
                csv_escape(&entry.category),
                usd,
                local,
                self.currency
            ));
        }

        lines.join("\n")
    }

    fn category_or_dash(&self, entry: &CatalogEntry) -> String {
        if entry.category.is_empty() {
            "-".to_string()
        } else {
            entry.category.clone()
        }
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}
