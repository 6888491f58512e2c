use crate::components::budget_chart::BudgetChart;
use crate::services::chart_data::BudgetChartData;
use crate::services::expenses::format_amount;
use shared::BudgetResult;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub result: BudgetResult,
    pub currency_symbol: String,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let result = &props.result;
    let symbol = &props.currency_symbol;
    let chart_data = BudgetChartData::from_result(result);

    html! {
        <section class="result-container">
            <h2>{"Your Budget Plan"}</h2>
            <p>{format!("Savings: {}{}", symbol, format_amount(result.savings))}</p>
            <p>{format!("Adjusted Savings: {}{}", symbol, format_amount(result.adjusted_savings))}</p>
            <p>{format!("Recommended Savings: {}{}", symbol, format_amount(result.recommended_savings))}</p>
            <p>{format!("Inflation Rate: {}%", result.inflation)}</p>
            <p>{format!("Cost of Living Index: {}", result.cost_of_living_index)}</p>

            if !result.message.is_empty() {
                <p class="result-message">{&result.message}</p>
            }

            if !result.recommendations.is_empty() {
                <h3>{"Recommendations"}</h3>
                <ul class="recommendations">
                    {for result.recommendations.iter().map(|tip| html! { <li>{tip}</li> })}
                </ul>
            }

            <BudgetChart data={chart_data} />
        </section>
    }
}
