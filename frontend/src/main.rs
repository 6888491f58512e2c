use yew::prelude::*;

mod components;
mod errors;
mod hooks;
mod services;
mod state;

use components::budget_form::BudgetForm;
use components::history_table::HistoryTable;
use components::location_picker::LocationPicker;
use components::notice_banner::NoticeBanner;
use components::result_panel::ResultPanel;
use hooks::use_budget_session::use_budget_session;
use services::config::ClientConfig;
use services::logging::ConsoleLogger;

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::default());
    let session = use_budget_session(&config);
    let state = &session.state;
    let actions = &session.actions;
    let cascade = &state.cascade;
    let symbol = state.currency_symbol();

    html! {
        <div class="app">
            <header class="header">
                <h1>{"Budget Planner"}</h1>
            </header>

            <NoticeBanner
                notices={state.notices().to_vec()}
                on_dismiss={actions.dismiss_notice.clone()}
            />

            <main class="main">
                <BudgetForm
                    email={state.email.clone()}
                    income={state.income.clone()}
                    savings_goal={state.savings_goal.clone()}
                    expenses={state.expenses.clone()}
                    total_expenses={state.total_expenses()}
                    currency_symbol={symbol.clone()}
                    submitting={state.is_submitting()}
                    on_email_change={actions.on_email_change.clone()}
                    on_income_change={actions.on_income_change.clone()}
                    on_savings_goal_change={actions.on_savings_goal_change.clone()}
                    on_expense_change={actions.on_expense_change.clone()}
                    on_submit={actions.submit.clone()}
                >
                    <LocationPicker
                        continents={cascade.continents().to_vec()}
                        countries={cascade.countries().to_vec()}
                        cities={cascade.cities().to_vec()}
                        continent={cascade.continent().to_string()}
                        country={cascade.country().to_string()}
                        city={cascade.city().to_string()}
                        level={cascade.level()}
                        currency={cascade.currency().to_string()}
                        currency_symbol={symbol.clone()}
                        on_continent_change={actions.on_continent_change.clone()}
                        on_country_change={actions.on_country_change.clone()}
                        on_city_change={actions.on_city_change.clone()}
                    />
                </BudgetForm>

                {if let Some(result) = state.result() {
                    html! {
                        <ResultPanel result={result.clone()} currency_symbol={symbol.clone()} />
                    }
                } else {
                    html! {}
                }}

                <HistoryTable
                    entries={state.history().to_vec()}
                    can_view={state.can_view_history()}
                    loading={state.is_history_loading()}
                    loaded={state.has_loaded_history()}
                    on_view_history={actions.view_history.clone()}
                />
            </main>
        </div>
    }
}

fn main() {
    ConsoleLogger::init(ClientConfig::default().log_level);
    yew::Renderer::<App>::new().render();
}
