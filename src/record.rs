use chrono::{Local, NaiveDate};
use inquire::{required, Confirm, CustomType, DateSelect, Select, Text};
use ratatui::style::Color;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::KharchaError;
use crate::KharchaConfig;

/// Shown wherever a record has no note.
pub const NOTE_PLACEHOLDER: &str = "N/A";

/// One expense entry. The order of records in the store is their entry
/// order; a record has no identity beyond its position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseRecord {
    pub name: String,
    #[serde(with = "amount_string")]
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: Category,
    pub note: Option<String>,
}

impl ExpenseRecord {
    /// Checks the record invariants against the given current date.
    pub fn validate(&self, today: NaiveDate) -> Result<(), KharchaError> {
        if self.name.trim().is_empty() {
            return Err(KharchaError::MissingField("name"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(KharchaError::NonPositiveAmount);
        }
        if self.date > today {
            return Err(KharchaError::FutureDate(self.date));
        }
        Ok(())
    }

    pub fn configured_line(&self, config: &KharchaConfig) -> String {
        format!(
            "{} {:>8.2}{} {} [{}] {}",
            self.date,
            self.amount,
            config.currency,
            self.name,
            self.category,
            self.note.as_deref().unwrap_or(NOTE_PLACEHOLDER)
        )
    }

    /// Interactive entry form. The date prompt defaults to today and caps
    /// at today, so future-dated entries cannot be typed in.
    pub fn prompt(config: &KharchaConfig) -> Result<Self, KharchaError> {
        let name = Text::new("Name:")
            .with_validator(required!("Require non-empty name"))
            .prompt()?;
        let amount = money_amount(config)?;
        let date = DateSelect::new("Date:")
            .with_max_date(Local::now().date_naive())
            .prompt()?;
        let category = Select::new("Category:", Category::options()).prompt()?;
        let note = Text::new("Note:").prompt()?;
        let note = (!note.is_empty()).then_some(note);

        let new_instance = Self {
            name,
            amount,
            date,
            category,
            note,
        };
        println!("{}", new_instance.configured_line(config));

        if Confirm::new("Save this expense?").prompt()? {
            Ok(new_instance)
        } else {
            Err(KharchaError::Aborted)
        }
    }
}

fn money_amount(config: &KharchaConfig) -> Result<Decimal, KharchaError> {
    let amount = CustomType::new(&format!("Amount {}:", config.user_name))
        .with_formatter(&|decimal: Decimal| format!("{:.2}{}", decimal, config.currency))
        .with_error_message("Please type a valid number")
        .with_help_message(&format!(
            "Type the amount in {} using a decimal point as a separator",
            config.currency
        ))
        .prompt()?;
    Ok(amount)
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub enum Category {
    Food,
    Travel,
    Other,
}

impl Category {
    pub fn options() -> Vec<Category> {
        vec![Category::Food, Category::Travel, Category::Other]
    }

    /// Accent color used for list rows and chart bars.
    pub fn color(self) -> Color {
        match self {
            Category::Food => Color::LightRed,
            Category::Travel => Color::LightBlue,
            Category::Other => Color::LightMagenta,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// Amounts are stored as strings fixed to two decimal places, so `12`
/// persists as `"12.00"`.
mod amount_string {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{:.2}", amount))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        let s = String::deserialize(deserializer)?;
        Decimal::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(amount: Decimal, date: NaiveDate) -> ExpenseRecord {
        ExpenseRecord {
            name: "Lunch".to_string(),
            amount,
            date,
            category: Category::Food,
            note: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_valid_record_passes() {
        let valid = record(Decimal::new(1250, 2), today());
        assert!(valid.validate(today()).is_ok());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut invalid = record(Decimal::new(1250, 2), today());
        invalid.name = "   ".to_string();
        assert!(matches!(
            invalid.validate(today()),
            Err(KharchaError::MissingField("name"))
        ));
    }

    #[test]
    fn test_zero_amount_is_rejected() {
        let invalid = record(Decimal::ZERO, today());
        assert!(matches!(
            invalid.validate(today()),
            Err(KharchaError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let invalid = record(Decimal::new(-100, 2), today());
        assert!(matches!(
            invalid.validate(today()),
            Err(KharchaError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_future_date_is_rejected() {
        let tomorrow = today().succ_opt().unwrap();
        let invalid = record(Decimal::new(1250, 2), tomorrow);
        assert!(matches!(
            invalid.validate(today()),
            Err(KharchaError::FutureDate(_))
        ));
    }

    #[test]
    fn test_amount_serializes_with_two_decimals() {
        let rec = record(Decimal::from_str_exact("12").unwrap(), today());
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"12.00\""));

        let rec = record(Decimal::from_str_exact("3.5").unwrap(), today());
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"3.50\""));
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let rec = ExpenseRecord {
            name: "Train ticket".to_string(),
            amount: Decimal::new(799, 2),
            date: today(),
            category: Category::Travel,
            note: Some("to work".to_string()),
        };
        let json = serde_json::to_string(&rec).unwrap();
        let back: ExpenseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rec);
    }

    #[test]
    fn test_note_falls_back_to_placeholder() {
        let rec = record(Decimal::new(500, 2), today());
        let line = rec.configured_line(&KharchaConfig::default());
        assert!(line.ends_with(NOTE_PLACEHOLDER));
    }
}
