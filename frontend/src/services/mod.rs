pub mod api;
pub mod budget_flow;
pub mod chart_data;
pub mod config;
pub mod currency;
pub mod date_utils;
pub mod expenses;
pub mod logging;
pub mod retry;
