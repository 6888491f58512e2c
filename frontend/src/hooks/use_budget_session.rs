use crate::services::api::ApiClient;
use crate::services::budget_flow::BudgetFlow;
use crate::services::config::ClientConfig;
use crate::services::retry::TimerSleeper;
use crate::state::session::BudgetSession;
use shared::ExpenseCategory;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub struct UseBudgetSessionResult {
    /// Snapshot of the session taken for this render
    pub state: BudgetSession,
    pub actions: UseBudgetSessionActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBudgetSessionActions {
    pub on_email_change: Callback<String>,
    pub on_income_change: Callback<String>,
    pub on_savings_goal_change: Callback<String>,
    pub on_expense_change: Callback<(ExpenseCategory, String)>,
    pub on_continent_change: Callback<String>,
    pub on_country_change: Callback<String>,
    pub on_city_change: Callback<String>,
    pub submit: Callback<()>,
    pub view_history: Callback<()>,
    pub dismiss_notice: Callback<usize>,
}

type Flow = BudgetFlow<ApiClient, TimerSleeper>;

/// Plain field edit: mutate the session and re-render
fn edit_callback<T: 'static>(
    session: &Rc<RefCell<BudgetSession>>,
    force_update: &UseForceUpdateHandle,
    apply: fn(&mut BudgetSession, T),
) -> Callback<T> {
    let session = session.clone();
    let force_update = force_update.clone();
    Callback::from(move |value: T| {
        apply(&mut session.borrow_mut(), value);
        force_update.force_update();
    })
}

/// Hook owning the planner session and every action on it
#[hook]
pub fn use_budget_session(config: &ClientConfig) -> UseBudgetSessionResult {
    let session = use_mut_ref(BudgetSession::new);
    let force_update = use_force_update();

    let flow: Flow = {
        let force_update = force_update.clone();
        BudgetFlow::new(
            ApiClient::from_config(config),
            TimerSleeper,
            config.retry,
            session.clone(),
            Callback::from(move |_| force_update.force_update()),
        )
    };

    // Load the continent list on mount
    {
        let flow = flow.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let _ = flow.load_continents().await;
            });
            || ()
        });
    }

    let on_email_change = edit_callback(&session, &force_update, |s, v: String| s.email = v);
    let on_income_change = edit_callback(&session, &force_update, |s, v: String| s.income = v);
    let on_savings_goal_change =
        edit_callback(&session, &force_update, |s, v: String| s.savings_goal = v);
    let on_expense_change = edit_callback(
        &session,
        &force_update,
        |s, (category, v): (ExpenseCategory, String)| s.expenses.set(category, v),
    );

    let on_continent_change = {
        let flow = flow.clone();
        Callback::from(move |continent: String| {
            if let Some(ticket) = flow.select_continent(&continent) {
                let flow = flow.clone();
                spawn_local(async move {
                    let _ = flow.fetch_countries(ticket).await;
                });
            }
        })
    };

    let on_country_change = {
        let flow = flow.clone();
        Callback::from(move |country: String| {
            if let Some(ticket) = flow.select_country(&country) {
                let flow = flow.clone();
                spawn_local(async move {
                    let _ = flow.fetch_cities(ticket).await;
                });
            }
        })
    };

    let on_city_change = {
        let flow = flow.clone();
        Callback::from(move |city: String| flow.change_city(&city))
    };

    let submit = {
        let flow = flow.clone();
        Callback::from(move |_| {
            if flow.session().borrow().is_submitting() {
                return;
            }
            let flow = flow.clone();
            spawn_local(async move {
                let _ = flow.submit().await;
            });
        })
    };

    let view_history = {
        let flow = flow.clone();
        Callback::from(move |_| {
            if flow.session().borrow().is_busy() {
                return;
            }
            let flow = flow.clone();
            spawn_local(async move {
                let _ = flow.refresh_history().await;
            });
        })
    };

    let dismiss_notice = edit_callback(&session, &force_update, |s, index: usize| s.dismiss_notice(index));

    let state = (*session.borrow()).clone();

    let actions = UseBudgetSessionActions {
        on_email_change,
        on_income_change,
        on_savings_goal_change,
        on_expense_change,
        on_continent_change,
        on_country_change,
        on_city_change,
        submit,
        view_history,
        dismiss_notice,
    };

    UseBudgetSessionResult { state, actions }
}
