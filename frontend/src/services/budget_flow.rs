use crate::errors::{BudgetError, Operation};
use crate::services::api::BudgetApi;
use crate::services::retry::{RetryPolicy, Sleeper};
use crate::state::cascade::{CitiesTicket, CountriesTicket};
use crate::state::session::BudgetSession;
use shared::{BudgetResult, HistoryRequest};
use std::cell::RefCell;
use std::rc::Rc;
use yew::Callback;

pub type SessionCell = Rc<RefCell<BudgetSession>>;

/// Drives every network interaction of the planner.
///
/// The session is only borrowed between awaits, never across one, and
/// `on_change` fires after each mutation so the view can re-render.
#[derive(Clone)]
pub struct BudgetFlow<A, S> {
    api: A,
    sleeper: S,
    policy: RetryPolicy,
    session: SessionCell,
    on_change: Callback<()>,
}

impl<A, S> BudgetFlow<A, S>
where
    A: BudgetApi,
    S: Sleeper,
{
    pub fn new(api: A, sleeper: S, policy: RetryPolicy, session: SessionCell, on_change: Callback<()>) -> Self {
        Self {
            api,
            sleeper,
            policy,
            session,
            on_change,
        }
    }

    pub fn session(&self) -> &SessionCell {
        &self.session
    }

    fn update<R>(&self, f: impl FnOnce(&mut BudgetSession) -> R) -> R {
        let result = f(&mut self.session.borrow_mut());
        self.on_change.emit(());
        result
    }

    fn fail(&self, error: BudgetError) -> BudgetError {
        log::error!(target: "budget-flow", "{}", error);
        self.update(|session| session.report(&error));
        error
    }

    pub async fn load_continents(&self) -> Result<(), BudgetError> {
        let outcome = self
            .policy
            .execute(&self.sleeper, || self.api.continents())
            .await;

        match outcome {
            Ok(continents) => {
                log::info!(target: "budget-flow", "Loaded {} continents", continents.len());
                self.update(|session| session.cascade.set_continents(continents));
                Ok(())
            }
            Err(e) => Err(self.fail(BudgetError::network(Operation::LoadContinents, e))),
        }
    }

    /// Synchronous half of a continent change; returns the fetch to run
    pub fn select_continent(&self, continent: &str) -> Option<CountriesTicket> {
        self.update(|session| session.cascade.select_continent(continent))
    }

    pub async fn fetch_countries(&self, ticket: CountriesTicket) -> Result<(), BudgetError> {
        let outcome = self
            .policy
            .execute(&self.sleeper, || self.api.countries(&ticket.continent))
            .await;

        match outcome {
            Ok(countries) => {
                self.update(|session| session.cascade.apply_countries(&ticket, countries));
                Ok(())
            }
            Err(e) if !self.session.borrow().cascade.is_current_countries(&ticket) => {
                log::debug!(target: "budget-flow", "Ignoring failure of superseded country fetch: {}", e);
                Ok(())
            }
            Err(e) => Err(self.fail(BudgetError::network(Operation::LoadCountries, e))),
        }
    }

    #[cfg(test)]
    pub async fn change_continent(&self, continent: &str) -> Result<(), BudgetError> {
        match self.select_continent(continent) {
            Some(ticket) => self.fetch_countries(ticket).await,
            None => Ok(()),
        }
    }

    /// Synchronous half of a country change; returns the fetch to run
    pub fn select_country(&self, country: &str) -> Option<CitiesTicket> {
        self.update(|session| session.cascade.select_country(country))
    }

    pub async fn fetch_cities(&self, ticket: CitiesTicket) -> Result<(), BudgetError> {
        let outcome = self
            .policy
            .execute(&self.sleeper, || self.api.cities(&ticket.continent, &ticket.country))
            .await;

        match outcome {
            Ok(cities) => {
                self.update(|session| session.cascade.apply_cities(&ticket, cities));
                Ok(())
            }
            Err(e) if !self.session.borrow().cascade.is_current_cities(&ticket) => {
                log::debug!(target: "budget-flow", "Ignoring failure of superseded city fetch: {}", e);
                Ok(())
            }
            Err(e) => Err(self.fail(BudgetError::network(Operation::LoadCities, e))),
        }
    }

    #[cfg(test)]
    pub async fn change_country(&self, country: &str) -> Result<(), BudgetError> {
        match self.select_country(country) {
            Some(ticket) => self.fetch_cities(ticket).await,
            None => Ok(()),
        }
    }

    pub fn change_city(&self, city: &str) {
        self.update(|session| session.cascade.select_city(city));
    }

    /// Submit the current form and refresh history on success.
    ///
    /// A failed history refresh is reported on its own and leaves the new
    /// result in place; a failed submission leaves the previous result.
    pub async fn submit(&self) -> Result<BudgetResult, BudgetError> {
        let built = self.session.borrow().build_request();
        let request = match built {
            Ok(request) => request,
            Err(e) => return Err(self.fail(e)),
        };

        self.update(|session| session.set_submitting(true));
        let outcome = self
            .policy
            .execute(&self.sleeper, || self.api.submit_budget(&request))
            .await;
        self.update(|session| session.set_submitting(false));

        let result = match outcome {
            Ok(result) => result,
            Err(e) => return Err(self.fail(BudgetError::network(Operation::SubmitBudget, e))),
        };

        log::info!(target: "budget-flow", "Budget computed for {}/{}", request.continent, request.country);
        self.update(|session| session.set_result(result.clone()));

        // History follows the submitted email, not whatever the form holds now
        if request.email.is_empty() {
            log::debug!(target: "budget-flow", "No email entered, skipping history refresh");
        } else if let Err(e) = self
            .load_history(HistoryRequest {
                email: request.email.clone(),
            })
            .await
        {
            let partial = match e {
                BudgetError::TransientNetwork { source, .. } => BudgetError::PartialRefresh(source),
                other => other,
            };
            self.fail(partial);
        }

        Ok(result)
    }

    /// Reload the history list for the entered email
    pub async fn refresh_history(&self) -> Result<(), BudgetError> {
        let built = self.session.borrow().history_request();
        let request = built.map_err(|e| self.fail(e))?;
        self.load_history(request).await.map_err(|e| self.fail(e))
    }

    /// Fetch and store history without reporting failures
    async fn load_history(&self, request: HistoryRequest) -> Result<(), BudgetError> {

        self.update(|session| session.set_history_loading(true));
        let outcome = self
            .policy
            .execute(&self.sleeper, || self.api.budget_history(&request))
            .await;
        self.update(|session| session.set_history_loading(false));

        let history = outcome.map_err(|e| BudgetError::network(Operation::LoadHistory, e))?;
        log::info!(target: "budget-flow", "Loaded {} history entries", history.len());
        self.update(|session| session.set_history(history));
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::services::api::ApiError;
    use crate::state::session::NoticeLevel;
    use async_trait::async_trait;
    use shared::{BudgetRequest, HistoryEntry, HistoryRequest, LocationOption};
    use std::cell::Cell;
    use std::collections::VecDeque;

    type Scripted<T> = RefCell<VecDeque<Result<T, ApiError>>>;

    /// Replays scripted responses and records every call
    #[derive(Default)]
    struct FakeApiInner {
        continents: Scripted<Vec<LocationOption>>,
        countries: Scripted<Vec<LocationOption>>,
        cities: Scripted<Vec<LocationOption>>,
        budgets: Scripted<BudgetResult>,
        histories: Scripted<Vec<HistoryEntry>>,
        calls: RefCell<Vec<String>>,
        submitted: RefCell<Vec<BudgetRequest>>,
        before_cities: RefCell<Option<Box<dyn FnOnce()>>>,
        before_submit: RefCell<Option<Box<dyn FnOnce()>>>,
    }

    #[derive(Clone, Default)]
    struct FakeApi(Rc<FakeApiInner>);

    fn next<T>(queue: &Scripted<T>) -> Result<T, ApiError> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }

    impl FakeApi {
        fn calls(&self) -> Vec<String> {
            self.0.calls.borrow().clone()
        }
    }

    #[async_trait(?Send)]
    impl BudgetApi for FakeApi {
        async fn continents(&self) -> Result<Vec<LocationOption>, ApiError> {
            self.0.calls.borrow_mut().push("continents".to_string());
            next(&self.0.continents)
        }

        async fn countries(&self, continent: &str) -> Result<Vec<LocationOption>, ApiError> {
            self.0.calls.borrow_mut().push(format!("countries/{}", continent));
            next(&self.0.countries)
        }

        async fn cities(&self, continent: &str, country: &str) -> Result<Vec<LocationOption>, ApiError> {
            self.0.calls.borrow_mut().push(format!("cities/{}/{}", continent, country));
            if let Some(hook) = self.0.before_cities.borrow_mut().take() {
                hook();
            }
            next(&self.0.cities)
        }

        async fn submit_budget(&self, request: &BudgetRequest) -> Result<BudgetResult, ApiError> {
            self.0.calls.borrow_mut().push("budget".to_string());
            self.0.submitted.borrow_mut().push(request.clone());
            if let Some(hook) = self.0.before_submit.borrow_mut().take() {
                hook();
            }
            next(&self.0.budgets)
        }

        async fn budget_history(&self, request: &HistoryRequest) -> Result<Vec<HistoryEntry>, ApiError> {
            self.0.calls.borrow_mut().push(format!("history/{}", request.email));
            next(&self.0.histories)
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSleeper(Rc<RefCell<Vec<u32>>>);

    #[async_trait(?Send)]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, ms: u32) {
            self.0.borrow_mut().push(ms);
        }
    }

    struct Harness {
        api: FakeApi,
        sleeper: RecordingSleeper,
        renders: Rc<Cell<u32>>,
        flow: BudgetFlow<FakeApi, RecordingSleeper>,
    }

    fn harness(policy: RetryPolicy) -> Harness {
        let api = FakeApi::default();
        let sleeper = RecordingSleeper::default();
        let renders = Rc::new(Cell::new(0));
        let on_change = {
            let renders = renders.clone();
            Callback::from(move |_| renders.set(renders.get() + 1))
        };
        let flow = BudgetFlow::new(
            api.clone(),
            sleeper.clone(),
            policy,
            Rc::new(RefCell::new(BudgetSession::new())),
            on_change,
        );
        Harness {
            api,
            sleeper,
            renders,
            flow,
        }
    }

    fn network_error() -> ApiError {
        ApiError::Status {
            status: 502,
            body: "Bad Gateway".to_string(),
        }
    }

    fn sample_result(savings: f64) -> BudgetResult {
        BudgetResult {
            savings,
            recommended_savings: 500.0,
            currency_symbol: Some("₹".to_string()),
            message: "Keep going".to_string(),
            ..BudgetResult::default()
        }
    }

    async fn select_india(h: &Harness) {
        h.api
            .0
            .countries
            .borrow_mut()
            .push_back(Ok(vec![LocationOption::with_currency("India", "INR")]));
        h.api.0.cities.borrow_mut().push_back(Ok(vec![LocationOption::new("Delhi")]));
        h.flow.change_continent("asia").await.unwrap();
        h.flow.change_country("india").await.unwrap();
    }

    #[tokio::test]
    async fn test_load_continents_retries_then_succeeds() {
        let h = harness(RetryPolicy::new(3, 100));
        h.api.0.continents.borrow_mut().extend([
            Err(network_error()),
            Err(ApiError::Timeout(30_000)),
            Ok(vec![LocationOption::new("Asia"), LocationOption::new("Europe")]),
        ]);

        h.flow.load_continents().await.unwrap();

        assert_eq!(h.api.calls().len(), 3);
        assert_eq!(*h.sleeper.0.borrow(), vec![100, 100]);
        assert_eq!(h.flow.session().borrow().cascade.continents().len(), 2);
        assert!(h.flow.session().borrow().notices().is_empty());
    }

    #[tokio::test]
    async fn test_load_continents_failure_is_reported() {
        let h = harness(RetryPolicy::new(2, 0));

        let err = h.flow.load_continents().await.unwrap_err();

        assert!(matches!(
            err,
            BudgetError::TransientNetwork {
                operation: Operation::LoadContinents,
                ..
            }
        ));
        assert_eq!(h.api.calls().len(), 2);
        let session = h.flow.session().borrow();
        assert_eq!(session.notices().len(), 1);
        assert!(session.notices()[0].message.contains("continents"));
    }

    #[tokio::test]
    async fn test_cascade_resolves_currency_and_cities() {
        let h = harness(RetryPolicy::new(1, 0));
        select_india(&h).await;

        assert_eq!(h.api.calls(), vec!["countries/asia", "cities/asia/india"]);
        let session = h.flow.session().borrow();
        assert_eq!(session.cascade.currency(), "INR");
        assert_eq!(session.cascade.cities(), &[LocationOption::new("Delhi")]);
        assert_eq!(session.currency_symbol(), "₹");
        assert!(h.renders.get() > 0);
    }

    #[tokio::test]
    async fn test_country_fetch_failure_keeps_selection() {
        let h = harness(RetryPolicy::new(2, 0));

        let err = h.flow.change_continent("asia").await.unwrap_err();

        assert!(matches!(
            err,
            BudgetError::TransientNetwork {
                operation: Operation::LoadCountries,
                ..
            }
        ));
        let session = h.flow.session().borrow();
        assert_eq!(session.cascade.continent(), "asia");
        assert!(session.cascade.countries().is_empty());
        assert_eq!(session.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_stale_city_response_is_discarded() {
        let h = harness(RetryPolicy::new(1, 0));
        h.api.0.countries.borrow_mut().push_back(Ok(vec![
            LocationOption::with_currency("France", "EUR"),
            LocationOption::with_currency("Switzerland", "CHF"),
        ]));
        h.flow.change_continent("europe").await.unwrap();

        // The user switches country while the French city list is in flight
        let session = h.flow.session().clone();
        *h.api.0.before_cities.borrow_mut() = Some(Box::new(move || {
            session.borrow_mut().cascade.select_country("switzerland");
        }));
        h.api.0.cities.borrow_mut().push_back(Ok(vec![LocationOption::new("Paris")]));

        h.flow.change_country("france").await.unwrap();

        let session = h.flow.session().borrow();
        assert_eq!(session.cascade.country(), "switzerland");
        assert_eq!(session.cascade.currency(), "CHF");
        assert!(session.cascade.cities().is_empty());
        assert!(session.notices().is_empty());
    }

    #[tokio::test]
    async fn test_stale_city_failure_is_not_reported() {
        let h = harness(RetryPolicy::new(1, 0));
        h.api
            .0
            .countries
            .borrow_mut()
            .push_back(Ok(vec![LocationOption::with_currency("France", "EUR")]));
        h.flow.change_continent("europe").await.unwrap();

        let session = h.flow.session().clone();
        *h.api.0.before_cities.borrow_mut() = Some(Box::new(move || {
            session.borrow_mut().cascade.select_continent("");
        }));

        assert!(h.flow.change_country("france").await.is_ok());
        assert!(h.flow.session().borrow().notices().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_continent_makes_no_call() {
        let h = harness(RetryPolicy::new(5, 0));

        let err = h.flow.submit().await.unwrap_err();

        assert!(matches!(err, BudgetError::Validation(_)));
        assert!(h.api.calls().is_empty());
        let session = h.flow.session().borrow();
        assert_eq!(session.notices()[0].message, "Please select a continent and country.");
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_submit_stores_result_and_refreshes_history() {
        let h = harness(RetryPolicy::new(1, 0));
        select_india(&h).await;
        {
            let mut session = h.flow.session().borrow_mut();
            session.email = "user@example.com".to_string();
            session.income = "5000".to_string();
            session.expenses.physiological = "1000".to_string();
        }
        h.api.0.budgets.borrow_mut().push_back(Ok(sample_result(4000.0)));
        h.api.0.histories.borrow_mut().push_back(Ok(vec![HistoryEntry {
            email: "user@example.com".to_string(),
            savings: 4000.0,
            currency: "INR".to_string(),
            ..HistoryEntry::default()
        }]));

        let result = h.flow.submit().await.unwrap();

        assert_eq!(result.savings, 4000.0);
        assert_eq!(
            h.api.calls()[2..],
            ["budget".to_string(), "history/user@example.com".to_string()]
        );
        let submitted = h.api.0.submitted.borrow();
        assert_eq!(submitted[0].expenses, 1000.0);
        assert_eq!(submitted[0].currency, "INR");

        let session = h.flow.session().borrow();
        assert_eq!(session.result(), Some(&result));
        assert_eq!(session.history().len(), 1);
        assert!(!session.is_busy());
        assert_eq!(session.chart_data().unwrap().slices[5].value, 4000.0);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_previous_result() {
        let h = harness(RetryPolicy::new(2, 0));
        select_india(&h).await;
        h.flow.session().borrow_mut().set_result(sample_result(10.0));

        let err = h.flow.submit().await.unwrap_err();

        assert!(matches!(
            err,
            BudgetError::TransientNetwork {
                operation: Operation::SubmitBudget,
                ..
            }
        ));
        assert_eq!(h.api.0.submitted.borrow().len(), 2);
        let session = h.flow.session().borrow();
        assert_eq!(session.result().unwrap().savings, 10.0);
        assert!(session.notices()[0].message.contains("waking up"));
        assert!(!session.is_submitting());
    }

    #[tokio::test]
    async fn test_history_failure_after_submit_keeps_result() {
        let h = harness(RetryPolicy::new(1, 0));
        select_india(&h).await;
        h.flow.session().borrow_mut().email = "user@example.com".to_string();
        h.flow
            .session()
            .borrow_mut()
            .set_history(vec![HistoryEntry::default()]);
        h.api.0.budgets.borrow_mut().push_back(Ok(sample_result(250.0)));
        h.api.0.histories.borrow_mut().push_back(Err(network_error()));

        let result = h.flow.submit().await.unwrap();

        let session = h.flow.session().borrow();
        assert_eq!(session.result(), Some(&result));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.notices().len(), 1);
        assert_eq!(session.notices()[0].level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_history_after_submit_uses_submitted_email() {
        let h = harness(RetryPolicy::new(1, 0));
        select_india(&h).await;
        h.flow.session().borrow_mut().email = "a@example.com".to_string();

        // The user edits the email while the submission is in flight
        let session = h.flow.session().clone();
        *h.api.0.before_submit.borrow_mut() = Some(Box::new(move || {
            session.borrow_mut().email = "b@example.com".to_string();
        }));
        h.api.0.budgets.borrow_mut().push_back(Ok(sample_result(100.0)));
        h.api.0.histories.borrow_mut().push_back(Ok(vec![HistoryEntry {
            email: "a@example.com".to_string(),
            ..HistoryEntry::default()
        }]));

        h.flow.submit().await.unwrap();

        assert_eq!(
            h.api.calls().last().map(String::as_str),
            Some("history/a@example.com")
        );
        let session = h.flow.session().borrow();
        assert_eq!(session.history()[0].email, "a@example.com");
        assert!(session.notices().is_empty());
    }

    #[tokio::test]
    async fn test_history_after_submit_survives_cleared_email() {
        let h = harness(RetryPolicy::new(1, 0));
        select_india(&h).await;
        h.flow.session().borrow_mut().email = "a@example.com".to_string();

        let session = h.flow.session().clone();
        *h.api.0.before_submit.borrow_mut() = Some(Box::new(move || {
            session.borrow_mut().email.clear();
        }));
        h.api.0.budgets.borrow_mut().push_back(Ok(sample_result(100.0)));
        h.api.0.histories.borrow_mut().push_back(Ok(Vec::new()));

        h.flow.submit().await.unwrap();

        assert_eq!(
            h.api.calls().last().map(String::as_str),
            Some("history/a@example.com")
        );
        let session = h.flow.session().borrow();
        assert!(session.has_loaded_history());
        assert!(session.notices().is_empty());
    }

    #[tokio::test]
    async fn test_submit_without_email_skips_history() {
        let h = harness(RetryPolicy::new(1, 0));
        select_india(&h).await;
        h.api.0.budgets.borrow_mut().push_back(Ok(sample_result(1.0)));

        h.flow.submit().await.unwrap();

        assert_eq!(h.api.calls().last().map(String::as_str), Some("budget"));
        assert!(h.flow.session().borrow().notices().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_history_replaces_list() {
        let h = harness(RetryPolicy::new(1, 0));
        h.flow.session().borrow_mut().email = "user@example.com".to_string();
        h.flow
            .session()
            .borrow_mut()
            .set_history(vec![HistoryEntry::default(), HistoryEntry::default()]);
        h.api.0.histories.borrow_mut().push_back(Ok(vec![HistoryEntry {
            message: "fresh".to_string(),
            ..HistoryEntry::default()
        }]));

        h.flow.refresh_history().await.unwrap();

        let session = h.flow.session().borrow();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].message, "fresh");
    }

    #[tokio::test]
    async fn test_refresh_history_failure_keeps_list() {
        let h = harness(RetryPolicy::new(1, 0));
        h.flow.session().borrow_mut().email = "user@example.com".to_string();
        h.flow
            .session()
            .borrow_mut()
            .set_history(vec![HistoryEntry::default()]);

        let err = h.flow.refresh_history().await.unwrap_err();

        assert!(matches!(
            err,
            BudgetError::TransientNetwork {
                operation: Operation::LoadHistory,
                ..
            }
        ));
        let session = h.flow.session().borrow();
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.notices()[0].level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_refresh_history_without_email_makes_no_call() {
        let h = harness(RetryPolicy::new(1, 0));

        let err = h.flow.refresh_history().await.unwrap_err();

        assert!(matches!(err, BudgetError::Validation(_)));
        assert!(h.api.calls().is_empty());
    }
}
