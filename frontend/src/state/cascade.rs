//! # Location Cascade
//!
//! Continent → country → city selection with currency resolution.
//!
//! Selections are applied synchronously and invalidate every level below
//! them before the matching fetch is issued. Each fetch is described by a
//! ticket holding the selection it was issued for; a response is applied
//! only while that selection is still current and no newer fetch for the
//! same level has been issued.

use crate::services::currency::DEFAULT_CURRENCY;
use shared::LocationOption;

/// How far down the cascade the user has selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CascadeLevel {
    Empty,
    ContinentSelected,
    CountrySelected,
    CitySelected,
}

/// Issued when a continent is picked; redeemed with the country list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountriesTicket {
    pub continent: String,
    generation: u64,
}

/// Issued when a country is picked; redeemed with the city list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitiesTicket {
    pub continent: String,
    pub country: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationCascade {
    continent: String,
    country: String,
    city: String,
    currency: String,
    continents: Vec<LocationOption>,
    countries: Vec<LocationOption>,
    cities: Vec<LocationOption>,
    countries_generation: u64,
    cities_generation: u64,
}

impl Default for LocationCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationCascade {
    pub fn new() -> Self {
        Self {
            continent: String::new(),
            country: String::new(),
            city: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            continents: Vec::new(),
            countries: Vec::new(),
            cities: Vec::new(),
            countries_generation: 0,
            cities_generation: 0,
        }
    }

    pub fn continent(&self) -> &str {
        &self.continent
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn continents(&self) -> &[LocationOption] {
        &self.continents
    }

    pub fn countries(&self) -> &[LocationOption] {
        &self.countries
    }

    pub fn cities(&self) -> &[LocationOption] {
        &self.cities
    }

    pub fn level(&self) -> CascadeLevel {
        if self.continent.is_empty() {
            CascadeLevel::Empty
        } else if self.country.is_empty() {
            CascadeLevel::ContinentSelected
        } else if self.city.is_empty() {
            CascadeLevel::CountrySelected
        } else {
            CascadeLevel::CitySelected
        }
    }

    /// Continent list is loaded once and has no upstream selection
    pub fn set_continents(&mut self, continents: Vec<LocationOption>) {
        self.continents = continents;
    }

    /// Pick a continent. Returns the fetch to issue, if any.
    pub fn select_continent(&mut self, continent: &str) -> Option<CountriesTicket> {
        self.continent = continent.to_string();
        self.clear_below_continent();
        self.countries_generation += 1;
        self.cities_generation += 1;

        if self.continent.is_empty() {
            return None;
        }

        Some(CountriesTicket {
            continent: self.continent.clone(),
            generation: self.countries_generation,
        })
    }

    /// Pick a country. Returns the fetch to issue, if any.
    pub fn select_country(&mut self, country: &str) -> Option<CitiesTicket> {
        self.city.clear();
        self.cities.clear();
        self.cities_generation += 1;

        if self.continent.is_empty() {
            self.country.clear();
            return None;
        }

        self.country = country.to_string();
        if self.country.is_empty() {
            return None;
        }

        self.resolve_currency();

        Some(CitiesTicket {
            continent: self.continent.clone(),
            country: self.country.clone(),
            generation: self.cities_generation,
        })
    }

    /// Leaf selection; nothing downstream to invalidate
    pub fn select_city(&mut self, city: &str) {
        if self.country.is_empty() {
            return;
        }
        self.city = city.to_string();
    }

    pub fn is_current_countries(&self, ticket: &CountriesTicket) -> bool {
        ticket.generation == self.countries_generation && ticket.continent == self.continent
    }

    pub fn is_current_cities(&self, ticket: &CitiesTicket) -> bool {
        ticket.generation == self.cities_generation
            && ticket.continent == self.continent
            && ticket.country == self.country
    }

    /// Apply a fetched country list. Returns false when the ticket is stale.
    pub fn apply_countries(&mut self, ticket: &CountriesTicket, countries: Vec<LocationOption>) -> bool {
        if !self.is_current_countries(ticket) {
            log::debug!(
                target: "cascade",
                "Dropping stale country list for '{}' (current continent '{}')",
                ticket.continent, self.continent
            );
            return false;
        }
        self.clear_below_continent();
        self.countries = countries;
        true
    }

    /// Apply a fetched city list. Returns false when the ticket is stale.
    pub fn apply_cities(&mut self, ticket: &CitiesTicket, cities: Vec<LocationOption>) -> bool {
        if !self.is_current_cities(ticket) {
            log::debug!(
                target: "cascade",
                "Dropping stale city list for '{}/{}' (current '{}/{}')",
                ticket.continent, ticket.country, self.continent, self.country
            );
            return false;
        }
        self.city.clear();
        self.cities = cities;
        true
    }

    fn clear_below_continent(&mut self) {
        self.country.clear();
        self.city.clear();
        self.countries.clear();
        self.cities.clear();
        self.currency = DEFAULT_CURRENCY.to_string();
    }

    fn resolve_currency(&mut self) {
        let resolved = self
            .countries
            .iter()
            .find(|option| option.matches(&self.country))
            .and_then(|option| option.currency.clone());

        if let Some(currency) = resolved {
            self.currency = currency;
        }
    }
}
