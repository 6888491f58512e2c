//! # Budget Session
//!
//! The single owned aggregate behind the planner form: raw inputs, the
//! location cascade, the latest result, the history list and the notices
//! shown to the user. Derived values (expense total, currency symbol, chart
//! data) are computed on read and never stored.

use crate::errors::BudgetError;
use crate::services::chart_data::BudgetChartData;
use crate::services::currency::resolve_symbol;
use crate::services::expenses::{parse_amount, ExpenseInputs};
use crate::state::cascade::LocationCascade;
use shared::{BudgetRequest, BudgetResult, HistoryEntry, HistoryRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
}

/// A user-visible message, shown until dismissed
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetSession {
    pub email: String,
    pub income: String,
    pub savings_goal: String,
    pub expenses: ExpenseInputs,
    pub cascade: LocationCascade,
    result: Option<BudgetResult>,
    history: Vec<HistoryEntry>,
    submitting: bool,
    history_loading: bool,
    history_loaded: bool,
    notices: Vec<Notice>,
}

impl BudgetSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(&self) -> Option<&BudgetResult> {
        self.result.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_history_loading(&self) -> bool {
        self.history_loading
    }

    /// True once any history response has been stored
    pub fn has_loaded_history(&self) -> bool {
        self.history_loaded
    }

    /// Any request the user is waiting on
    pub fn is_busy(&self) -> bool {
        self.submitting || self.history_loading
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.total()
    }

    pub fn currency_symbol(&self) -> String {
        resolve_symbol(self.result.as_ref(), self.cascade.currency())
    }

    pub fn chart_data(&self) -> Option<BudgetChartData> {
        self.result.as_ref().map(BudgetChartData::from_result)
    }

    pub fn can_view_history(&self) -> bool {
        !self.email.trim().is_empty()
    }

    /// Build the submission payload from the current inputs
    pub fn build_request(&self) -> Result<BudgetRequest, BudgetError> {
        if self.cascade.continent().is_empty() || self.cascade.country().is_empty() {
            return Err(BudgetError::Validation(
                "Please select a continent and country.".to_string(),
            ));
        }

        Ok(BudgetRequest {
            email: self.email.trim().to_string(),
            income: parse_amount(&self.income),
            expenses: self.total_expenses(),
            savings_goal: parse_amount(&self.savings_goal),
            continent: self.cascade.continent().to_string(),
            country: self.cascade.country().to_string(),
            city: self.cascade.city().to_string(),
            currency: self.cascade.currency().to_string(),
            expense_categories: self.expenses.categories(),
        })
    }

    pub fn history_request(&self) -> Result<HistoryRequest, BudgetError> {
        if !self.can_view_history() {
            return Err(BudgetError::Validation(
                "Please enter your email to view history.".to_string(),
            ));
        }
        Ok(HistoryRequest {
            email: self.email.trim().to_string(),
        })
    }

    pub fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    pub fn set_history_loading(&mut self, loading: bool) {
        self.history_loading = loading;
    }

    /// Replace the previous result wholesale
    pub fn set_result(&mut self, result: BudgetResult) {
        self.result = Some(result);
    }

    /// Replace the previous history wholesale
    pub fn set_history(&mut self, history: Vec<HistoryEntry>) {
        self.history = history;
        self.history_loaded = true;
    }

    pub fn report(&mut self, error: &BudgetError) {
        let level = match error {
            BudgetError::PartialRefresh(_) => NoticeLevel::Warning,
            _ => NoticeLevel::Error,
        };
        self.notices.push(Notice {
            level,
            message: error.user_message(),
        });
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        if index < self.notices.len() {
            self.notices.remove(index);
        }
    }
}
