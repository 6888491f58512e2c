use crate::services::currency::symbol_or_fallback;
use crate::services::date_utils::format_timestamp;
use crate::services::expenses::format_amount;
use shared::HistoryEntry;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HistoryTableProps {
    pub entries: Vec<HistoryEntry>,
    pub can_view: bool,
    pub loading: bool,
    /// Set once a history request has completed for this session
    pub loaded: bool,
    pub on_view_history: Callback<()>,
}

fn render_row(entry: &HistoryEntry) -> Html {
    let symbol = symbol_or_fallback(&entry.currency);
    html! {
        <tr>
            <td class="date">{format_timestamp(&entry.timestamp)}</td>
            <td>{format!("{}{}", symbol, format_amount(entry.income))}</td>
            <td>{format!("{}{}", symbol, format_amount(entry.expenses))}</td>
            <td>{format!("{}{}", symbol, format_amount(entry.savings))}</td>
            <td>{format!("{}{}", symbol, format_amount(entry.recommended_savings))}</td>
            <td class="description">{&entry.message}</td>
        </tr>
    }
}

#[function_component(HistoryTable)]
pub fn history_table(props: &HistoryTableProps) -> Html {
    let onclick = {
        let on_view_history = props.on_view_history.clone();
        Callback::from(move |_: MouseEvent| on_view_history.emit(()))
    };

    html! {
        <section class="history-container">
            <h2>{"Budget History"}</h2>

            {if props.can_view {
                html! {
                    <button onclick={onclick} disabled={props.loading}>
                        {if props.loading { "Loading..." } else { "View Budget History" }}
                    </button>
                }
            } else {
                html! { <p>{"Please enter your email to view history."}</p> }
            }}

            {if !props.entries.is_empty() {
                html! {
                    <div class="table-container">
                        <table class="history-table">
                            <thead>
                                <tr>
                                    <th>{"Date"}</th>
                                    <th>{"Income"}</th>
                                    <th>{"Expenses"}</th>
                                    <th>{"Savings"}</th>
                                    <th>{"Recommended"}</th>
                                    <th>{"Message"}</th>
                                </tr>
                            </thead>
                            <tbody>
                                {for props.entries.iter().map(render_row)}
                            </tbody>
                        </table>
                    </div>
                }
            } else if props.loaded && !props.loading {
                html! { <p class="empty-history">{"No budget history found for this email."}</p> }
            } else {
                html! {}
            }}
        </section>
    }
}
