//! Terminal formatting
//!
//! Plain-text renderings of grouped listings, reconciled periods and
//! recurring definitions. Amounts and dates follow the user's settings.

pub mod groups;
pub mod periods;
pub mod recurring;

pub use groups::{format_entry_list, format_year_groups};
pub use periods::format_periods;
pub use recurring::{format_recurring_expenses, format_recurring_incomes};

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{Bill, DatedAmount, EntryKind, Expense, Income, Money, Paycheck};

/// Currency and date presentation
#[derive(Debug, Clone)]
pub struct DisplayStyle {
    pub currency_symbol: String,
    pub date_format: String,
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl DisplayStyle {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            currency_symbol: settings.currency_symbol.clone(),
            date_format: settings.date_format.clone(),
        }
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    pub fn date(&self, date: NaiveDate) -> String {
        date.format(&self.date_format).to_string()
    }
}

/// One printable line item
pub trait DisplayRow: DatedAmount {
    fn short_id(&self) -> String;
    fn label(&self) -> &str;

    /// Settled marker, e.g. `[x]` for a paid bill
    fn status(&self) -> &'static str {
        ""
    }

    fn tag(&self) -> &'static str {
        ""
    }
}

fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn kind_tag(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::OneTime => "",
        EntryKind::Recurring => "recurring",
    }
}

impl DisplayRow for Expense {
    fn short_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &'static str {
        checkbox(self.paid)
    }

    fn tag(&self) -> &'static str {
        kind_tag(self.kind)
    }
}

impl DisplayRow for Income {
    fn short_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.source
    }

    fn status(&self) -> &'static str {
        checkbox(self.received)
    }

    fn tag(&self) -> &'static str {
        kind_tag(self.kind)
    }
}

impl DisplayRow for Bill {
    fn short_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn status(&self) -> &'static str {
        checkbox(self.paid)
    }
}

impl DisplayRow for Paycheck {
    fn short_id(&self) -> String {
        self.id.to_string()
    }

    fn label(&self) -> &str {
        &self.payer
    }
}

pub(crate) fn format_row<T: DisplayRow>(row: &T, style: &DisplayStyle, indent: usize) -> String {
    let line = format!(
        "{:indent$}{:3} {:10}  {:12}  {:24} {:>12}  {}",
        "",
        row.status(),
        style.date(row.date()),
        row.short_id(),
        truncate(row.label(), 24),
        style.money(row.amount()),
        row.tag(),
        indent = indent,
    );
    line.trim_end().to_string()
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
