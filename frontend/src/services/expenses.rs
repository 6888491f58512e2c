use shared::{ExpenseCategories, ExpenseCategory};

/// Raw text of the five expense inputs, kept exactly as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseInputs {
    pub physiological: String,
    pub safety: String,
    pub social: String,
    pub esteem: String,
    pub self_actualization: String,
}

impl ExpenseInputs {
    pub fn get(&self, category: ExpenseCategory) -> &str {
        match category {
            ExpenseCategory::Physiological => &self.physiological,
            ExpenseCategory::Safety => &self.safety,
            ExpenseCategory::Social => &self.social,
            ExpenseCategory::Esteem => &self.esteem,
            ExpenseCategory::SelfActualization => &self.self_actualization,
        }
    }

    pub fn set(&mut self, category: ExpenseCategory, value: String) {
        let slot = match category {
            ExpenseCategory::Physiological => &mut self.physiological,
            ExpenseCategory::Safety => &mut self.safety,
            ExpenseCategory::Social => &mut self.social,
            ExpenseCategory::Esteem => &mut self.esteem,
            ExpenseCategory::SelfActualization => &mut self.self_actualization,
        };
        *slot = value;
    }

    /// Numeric breakdown with unusable inputs counted as zero
    pub fn categories(&self) -> ExpenseCategories {
        let mut categories = ExpenseCategories::default();
        for category in ExpenseCategory::ALL {
            categories.set(category, parse_amount(self.get(category)));
        }
        categories
    }

    pub fn total(&self) -> f64 {
        total_of(ExpenseCategory::ALL.iter().map(|c| Some(self.get(*c))))
    }
}

/// Lenient numeric coercion: blank, malformed or non-finite input is zero
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

pub fn total_of<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> f64 {
    let sum: f64 = values
        .into_iter()
        .map(|value| value.map(parse_amount).unwrap_or(0.0))
        .sum();
    round_cents(sum)
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}
