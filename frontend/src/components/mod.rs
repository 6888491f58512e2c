pub mod budget_chart;
pub mod budget_form;
pub mod history_table;
pub mod location_picker;
pub mod notice_banner;
pub mod result_panel;
