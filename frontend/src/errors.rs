use crate::services::api::ApiError;
use thiserror::Error;

/// Operation a network failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LoadContinents,
    LoadCountries,
    LoadCities,
    SubmitBudget,
    LoadHistory,
}

impl Operation {
    fn user_message(&self) -> &'static str {
        match self {
            Operation::LoadContinents => "Error fetching continents. Please try refreshing the page.",
            Operation::LoadCountries => "Error fetching countries. Please try again.",
            Operation::LoadCities => "Error fetching cities. Please try again.",
            Operation::SubmitBudget => {
                "Error calculating budget. The backend might be waking up, please try again in a few seconds."
            }
            Operation::LoadHistory => {
                "Error fetching budget history. The backend might be waking up, please try again in a few seconds."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BudgetError {
    /// Rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Retry budget spent; carries the last attempt's failure
    #[error("{operation:?} failed: {source}")]
    TransientNetwork {
        operation: Operation,
        #[source]
        source: ApiError,
    },

    /// History refresh failed after the submission itself succeeded
    #[error("Budget saved, but refreshing history failed: {0}")]
    PartialRefresh(#[source] ApiError),
}

impl BudgetError {
    pub fn network(operation: Operation, source: ApiError) -> Self {
        BudgetError::TransientNetwork { operation, source }
    }

    /// Text shown to the user in the notice banner
    pub fn user_message(&self) -> String {
        match self {
            BudgetError::Validation(message) => message.clone(),
            BudgetError::TransientNetwork { operation, .. } => operation.user_message().to_string(),
            BudgetError::PartialRefresh(_) => Operation::LoadHistory.user_message().to_string(),
        }
    }
}
