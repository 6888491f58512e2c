use shared::{BudgetResult, ExpenseCategory};

/// One slice of the budget breakdown pie
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlice {
    pub label: &'static str,
    pub value: f64,
    pub color: (u8, u8, u8),
}

/// Seven series: the five categories, then savings and recommended savings
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetChartData {
    pub slices: Vec<ChartSlice>,
}

const SAVINGS_LABEL: &str = "Savings";
const RECOMMENDED_LABEL: &str = "Recommended Savings";

const SERIES_COLORS: [(u8, u8, u8); 7] = [
    (255, 99, 132),
    (54, 162, 235),
    (255, 206, 86),
    (75, 192, 192),
    (153, 102, 255),
    (255, 159, 64),
    (199, 199, 199),
];

impl BudgetChartData {
    pub fn from_result(result: &BudgetResult) -> Self {
        let categories = ExpenseCategory::ALL
            .iter()
            .map(|c| (c.label(), result.expense_categories.get(*c).unwrap_or(0.0)));
        let savings = [
            (SAVINGS_LABEL, result.savings),
            (RECOMMENDED_LABEL, result.recommended_savings),
        ];

        let slices = categories
            .chain(savings)
            .zip(SERIES_COLORS)
            .map(|((label, value), color)| ChartSlice { label, value, color })
            .collect();

        Self { slices }
    }

    /// Pie sizes: negative or non-finite series are drawn as empty slices
    pub fn drawable_values(&self) -> Vec<f64> {
        self.slices
            .iter()
            .map(|s| if s.value.is_finite() && s.value > 0.0 { s.value } else { 0.0 })
            .collect()
    }

    pub fn is_drawable(&self) -> bool {
        self.drawable_values().iter().sum::<f64>() > 0.0
    }
}
