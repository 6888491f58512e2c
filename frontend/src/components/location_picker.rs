use crate::state::cascade::CascadeLevel;
use shared::LocationOption;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LocationPickerProps {
    pub continents: Vec<LocationOption>,
    pub countries: Vec<LocationOption>,
    pub cities: Vec<LocationOption>,
    pub continent: String,
    pub country: String,
    pub city: String,
    pub level: CascadeLevel,
    pub currency: String,
    pub currency_symbol: String,

    pub on_continent_change: Callback<String>,
    pub on_country_change: Callback<String>,
    pub on_city_change: Callback<String>,
}

fn select_value(callback: &Callback<String>) -> Callback<Event> {
    let callback = callback.clone();
    Callback::from(move |e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        callback.emit(select.value());
    })
}

/// Options use the lowercased name as their value
fn render_options(placeholder: &str, options: &[LocationOption], selected: &str) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_empty()}>{placeholder}</option>
            {for options.iter().map(|option| {
                let value = option.name.to_lowercase();
                let is_selected = value == selected.to_lowercase();
                html! {
                    <option key={value.clone()} value={value} selected={is_selected}>
                        {&option.name}
                    </option>
                }
            })}
        </>
    }
}

#[function_component(LocationPicker)]
pub fn location_picker(props: &LocationPickerProps) -> Html {
    html! {
        <div class="location-picker">
            <select onchange={select_value(&props.on_continent_change)}>
                {render_options("Select Your Continent", &props.continents, &props.continent)}
            </select>

            <select
                onchange={select_value(&props.on_country_change)}
                disabled={props.level == CascadeLevel::Empty}
            >
                {render_options("Select Your Country", &props.countries, &props.country)}
            </select>

            <select
                onchange={select_value(&props.on_city_change)}
                disabled={props.level < CascadeLevel::CountrySelected}
            >
                {render_options("Select Your City (Optional)", &props.cities, &props.city)}
            </select>

            <p class="currency-info">
                {format!("Selected Currency: {} ({})", props.currency, props.currency_symbol)}
            </p>
        </div>
    }
}
