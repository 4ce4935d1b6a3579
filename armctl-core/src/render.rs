//! Field narrowing and fixed-width table rendering for provider payloads.
//!
//! Payloads stay opaque `serde_json::Value`s end to end; these helpers
//! extract the display subset with an explicit `"N/A"` fallback. Output here
//! is presentation only — callers needing the full record use the raw
//! payload.

use serde_json::Value;

/// Literal shown when a display field is absent from the payload.
pub const MISSING: &str = "N/A";

/// String field by key, `"N/A"` when absent or not a string.
pub fn field<'a>(item: &'a Value, key: &str) -> &'a str {
    item.get(key).and_then(Value::as_str).unwrap_or(MISSING)
}

/// String field nested one mapping deep (e.g. `sku.name`).
pub fn nested_field<'a>(item: &'a Value, outer: &str, key: &str) -> &'a str {
    item.get(outer)
        .and_then(|inner| inner.get(key))
        .and_then(Value::as_str)
        .unwrap_or(MISSING)
}

/// Left-aligned fixed-width table: header row, dash rule, data rows.
pub struct Table {
    widths: Vec<usize>,
    header: String,
    rows: Vec<String>,
}

impl Table {
    pub fn new(columns: &[(&str, usize)]) -> Self {
        let widths: Vec<usize> = columns.iter().map(|&(_, width)| width).collect();
        let cells: Vec<String> = columns.iter().map(|&(name, _)| name.to_string()).collect();
        let header = format_row(&cells, &widths);
        Self {
            widths,
            header,
            rows: Vec::new(),
        }
    }

    pub fn row<S: Into<String>>(&mut self, cells: Vec<S>) {
        let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
        self.rows.push(format_row(&cells, &self.widths));
    }

    pub fn render(&self) -> String {
        let rule_len = self.widths.iter().sum::<usize>() + self.widths.len().saturating_sub(1);
        let mut out = String::new();
        out.push_str(&self.header);
        out.push('\n');
        out.push_str(&"-".repeat(rule_len));
        for row in &self.rows {
            out.push('\n');
            out.push_str(row);
        }
        out
    }
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_falls_back_on_missing_or_non_string() {
        let item = json!({"name": "rg-a", "count": 3});
        assert_eq!(field(&item, "name"), "rg-a");
        assert_eq!(field(&item, "location"), MISSING);
        assert_eq!(field(&item, "count"), MISSING);
    }

    #[test]
    fn nested_field_tolerates_missing_levels() {
        let item = json!({"sku": {"name": "Standard_LRS"}});
        assert_eq!(nested_field(&item, "sku", "name"), "Standard_LRS");
        assert_eq!(nested_field(&item, "sku", "tier"), MISSING);
        assert_eq!(nested_field(&item, "properties", "state"), MISSING);
    }

    #[test]
    fn table_renders_header_rule_and_rows() {
        let mut table = Table::new(&[("Name", 10), ("Location", 10)]);
        table.row(vec!["rg-a", "eastus"]);
        table.row(vec!["rg-b", "westeurope"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Name       Location");
        assert_eq!(lines[1], "-".repeat(21));
        assert_eq!(lines[2], "rg-a       eastus");
        assert_eq!(lines[3], "rg-b       westeurope");
    }
}
