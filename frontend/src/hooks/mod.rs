pub mod use_budget_session;
