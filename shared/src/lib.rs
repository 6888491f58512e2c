use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Treat an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of a continent, country or city list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationOption {
    pub name: String,
    /// ISO 4217 code, only present on country entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl LocationOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            currency: None,
        }
    }

    pub fn with_currency(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            currency: Some(currency.into()),
        }
    }

    /// Case-insensitive comparison against a selected value
    pub fn matches(&self, value: &str) -> bool {
        self.name.to_lowercase() == value.to_lowercase()
    }
}

/// The five needs-hierarchy expense buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Physiological,
    Safety,
    Social,
    Esteem,
    SelfActualization,
}

impl ExpenseCategory {
    /// Display order used by forms and charts
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Physiological,
        ExpenseCategory::Safety,
        ExpenseCategory::Social,
        ExpenseCategory::Esteem,
        ExpenseCategory::SelfActualization,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Physiological => "Physiological",
            ExpenseCategory::Safety => "Safety",
            ExpenseCategory::Social => "Social",
            ExpenseCategory::Esteem => "Esteem",
            ExpenseCategory::SelfActualization => "Self-Actualization",
        }
    }

    /// Short examples shown next to the input
    pub fn hint(&self) -> &'static str {
        match self {
            ExpenseCategory::Physiological => "e.g., food, rent, utilities",
            ExpenseCategory::Safety => "e.g., insurance, emergency savings",
            ExpenseCategory::Social => "e.g., outings, gifts",
            ExpenseCategory::Esteem => "e.g., education, personal achievements",
            ExpenseCategory::SelfActualization => "e.g., hobbies, personal growth",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Per-category amounts sent with a budget submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseCategories {
    pub physiological: f64,
    pub safety: f64,
    pub social: f64,
    pub esteem: f64,
    pub self_actualization: f64,
}

impl ExpenseCategories {
    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Physiological => self.physiological,
            ExpenseCategory::Safety => self.safety,
            ExpenseCategory::Social => self.social,
            ExpenseCategory::Esteem => self.esteem,
            ExpenseCategory::SelfActualization => self.self_actualization,
        }
    }

    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        match category {
            ExpenseCategory::Physiological => self.physiological = amount,
            ExpenseCategory::Safety => self.safety = amount,
            ExpenseCategory::Social => self.social = amount,
            ExpenseCategory::Esteem => self.esteem = amount,
            ExpenseCategory::SelfActualization => self.self_actualization = amount,
        }
    }
}

/// Category breakdown echoed back by the service; any bucket may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryBreakdown {
    pub physiological: Option<f64>,
    pub safety: Option<f64>,
    pub social: Option<f64>,
    pub esteem: Option<f64>,
    pub self_actualization: Option<f64>,
}

impl CategoryBreakdown {
    pub fn get(&self, category: ExpenseCategory) -> Option<f64> {
        match category {
            ExpenseCategory::Physiological => self.physiological,
            ExpenseCategory::Safety => self.safety,
            ExpenseCategory::Social => self.social,
            ExpenseCategory::Esteem => self.esteem,
            ExpenseCategory::SelfActualization => self.self_actualization,
        }
    }
}

/// Payload for `POST /api/budget`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRequest {
    /// User email, the key for submissions and history
    pub email: String,
    pub income: f64,
    /// Sum of all expense categories, rounded to cents
    pub expenses: f64,
    pub savings_goal: f64,
    pub continent: String,
    pub country: String,
    /// Optional, empty when no city was picked
    pub city: String,
    pub currency: String,
    pub expense_categories: ExpenseCategories,
}

/// Analysis computed by the budgeting service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetResult {
    #[serde(deserialize_with = "null_as_default")]
    pub savings: f64,
    /// Savings after cost-of-living adjustment
    #[serde(deserialize_with = "null_as_default")]
    pub adjusted_savings: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub recommended_savings: f64,
    /// Annual inflation rate for the location, in percent
    #[serde(deserialize_with = "null_as_default")]
    pub inflation: f64,
    /// Baseline is 50, higher means more expensive
    #[serde(deserialize_with = "null_as_default")]
    pub cost_of_living_index: f64,
    /// Overrides the locally resolved symbol when present
    pub currency_symbol: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub expense_categories: CategoryBreakdown,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

/// Payload for `POST /api/budget/history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRequest {
    pub email: String,
}

/// One past submission as stored by the service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    /// ISO 8601 timestamp, with or without offset
    #[serde(deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(deserialize_with = "null_as_default")]
    pub income: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub expenses: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub savings: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub recommended_savings: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub currency: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
}
