use crate::services::expenses::{format_amount, ExpenseInputs};
use shared::ExpenseCategory;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BudgetFormProps {
    // Form state
    pub email: String,
    pub income: String,
    pub savings_goal: String,
    pub expenses: ExpenseInputs,
    pub total_expenses: f64,
    pub currency_symbol: String,
    pub submitting: bool,

    // Event handlers
    pub on_email_change: Callback<String>,
    pub on_income_change: Callback<String>,
    pub on_savings_goal_change: Callback<String>,
    pub on_expense_change: Callback<(ExpenseCategory, String)>,
    pub on_submit: Callback<()>,

    /// Location picker, rendered between the email and income inputs
    #[prop_or_default]
    pub children: Children,
}

fn input_value(callback: &Callback<String>) -> Callback<InputEvent> {
    let callback = callback.clone();
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        callback.emit(input.value());
    })
}

#[function_component(BudgetForm)]
pub fn budget_form(props: &BudgetFormProps) -> Html {
    let symbol = &props.currency_symbol;

    html! {
        <form class="form-container" onsubmit={
            let on_submit = props.on_submit.clone();
            Callback::from(move |e: SubmitEvent| {
                e.prevent_default();
                on_submit.emit(());
            })
        }>
            <input
                type="email"
                placeholder="Your Email"
                value={props.email.clone()}
                oninput={input_value(&props.on_email_change)}
            />

            { for props.children.iter() }

            <input
                type="number"
                placeholder={format!("Monthly Income ({})", symbol)}
                value={props.income.clone()}
                oninput={input_value(&props.on_income_change)}
            />

            <h3>{"Break Down Your Expenses"}</h3>
            {for ExpenseCategory::ALL.iter().map(|category| {
                let category = *category;
                let on_expense_change = props.on_expense_change.clone();
                html! {
                    <div class="input-with-tooltip">
                        <input
                            type="number"
                            placeholder={format!("{} Expenses ({})", category.label(), symbol)}
                            value={props.expenses.get(category).to_string()}
                            oninput={Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                on_expense_change.emit((category, input.value()));
                            })}
                        />
                        <span class="tooltip">{category.hint()}</span>
                    </div>
                }
            })}

            <p>{format!("Total Expenses: {}{}", symbol, format_amount(props.total_expenses))}</p>

            <input
                type="number"
                placeholder={format!("Savings Goal ({})", symbol)}
                value={props.savings_goal.clone()}
                oninput={input_value(&props.on_savings_goal_change)}
            />

            <button type="submit" disabled={props.submitting}>
                {if props.submitting { "Loading..." } else { "Plan My Budget" }}
            </button>
        </form>
    }
}
