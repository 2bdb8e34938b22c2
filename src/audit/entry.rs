//! Audit log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::diff::changed_fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    /// Instances of a recurring definition were (re)materialized
    Generate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Generate => "GENERATE",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityType {
    Expense,
    RecurringExpense,
    Income,
    RecurringIncome,
    Bill,
    Paycheck,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Expense => "Expense",
            EntityType::RecurringExpense => "RecurringExpense",
            EntityType::Income => "Income",
            EntityType::RecurringIncome => "RecurringIncome",
            EntityType::Bill => "Bill",
            EntityType::Paycheck => "Paycheck",
        };
        f.write_str(label)
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,
    /// Top-level fields that differ between `before` and `after`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
    /// Number of records touched, for `Generate` and cascading deletes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl AuditEntry {
    fn blank(operation: Operation, entity_type: EntityType, entity_id: String) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            entity_name: None,
            before: None,
            after: None,
            changes: Vec::new(),
            count: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl fmt::Display,
        entity: &T,
    ) -> Self {
        let mut entry = Self::blank(Operation::Create, entity_type, entity_id.to_string());
        entry.after = serde_json::to_value(entity).ok();
        entry
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl fmt::Display,
        before: &T,
        after: &T,
    ) -> Self {
        let mut entry = Self::blank(Operation::Update, entity_type, entity_id.to_string());
        entry.before = serde_json::to_value(before).ok();
        entry.after = serde_json::to_value(after).ok();
        if let (Some(before), Some(after)) = (&entry.before, &entry.after) {
            entry.changes = changed_fields(before, after);
        }
        entry
    }

    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl fmt::Display,
        entity: &T,
    ) -> Self {
        let mut entry = Self::blank(Operation::Delete, entity_type, entity_id.to_string());
        entry.before = serde_json::to_value(entity).ok();
        entry
    }

    /// Summary of a batch of instances generated for `parent_id`
    pub fn generate(entity_type: EntityType, parent_id: impl fmt::Display, count: usize) -> Self {
        let mut entry = Self::blank(Operation::Generate, entity_type, parent_id.to_string());
        entry.count = Some(count);
        entry
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.entity_name = Some(name.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id
        );
        if let Some(name) = &self.entity_name {
            output.push_str(&format!(" ({})", name));
        }
        if let Some(count) = self.count {
            output.push_str(&format!(" x{}", count));
        }
        if !self.changes.is_empty() {
            output.push_str(&format!("\n  Changes: {}", self.changes.join(", ")));
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_records_changed_fields() {
        let before = json!({"name": "Rent", "amount": 150000});
        let after = json!({"name": "Rent", "amount": 160000});
        let entry = AuditEntry::update(EntityType::RecurringExpense, "rex-1234abcd", &before, &after)
            .named("Rent");

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.changes, vec!["amount: 150000 -> 160000".to_string()]);
        assert!(entry.format_human_readable().contains("Changes: amount"));
    }

    #[test]
    fn test_generate_entry() {
        let entry = AuditEntry::generate(EntityType::Expense, "rex-1234abcd", 12);
        assert_eq!(entry.count, Some(12));
        assert!(entry.before.is_none());

        let line = entry.format_human_readable();
        assert!(line.contains("GENERATE Expense rex-1234abcd x12"));
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::delete(EntityType::Bill, "bil-00000000", &json!({"name": "Gas"}));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["entity_type"], "bill");
        assert!(value.get("after").is_none());
        assert!(value.get("changes").is_none());

        let back: AuditEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back.operation, Operation::Delete);
    }
}
