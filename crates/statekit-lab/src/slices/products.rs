//! Products slice: a fixed catalogue and the filters applied to it

use serde::{Deserialize, Serialize};
use statekit::{Action, ActionError, Slice, SliceMap};

pub const NAME: &str = "products";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub color: String,
}

/// Price bounds; a `max` of zero leaves the range open above
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    fn contains(&self, price: f64) -> bool {
        price >= self.min && (self.max <= 0.0 || price <= self.max)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filters {
    pub colors: Vec<String>,
    pub prices: PriceRange,
}

/// Payload of `products/changeFilters`: `{"name": <filter>, "value": <new value>}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", content = "value", rename_all = "lowercase")]
pub enum FilterChange {
    Colors(Vec<String>),
    Prices(PriceRange),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Products {
    pub data: Vec<Product>,
    pub filters: Filters,
}

impl Default for Products {
    fn default() -> Self {
        let product = |id, name: &str, price, color: &str| Product {
            id,
            name: name.to_string(),
            price,
            color: color.to_string(),
        };
        Self {
            data: vec![
                product(1, "Notebook", 2500.0, "black"),
                product(2, "Headset", 150.0, "blue"),
                product(3, "Keyboard", 220.0, "black"),
                product(4, "Mouse", 80.0, "white"),
                product(5, "Monitor", 1200.0, "blue"),
            ],
            filters: Filters::default(),
        }
    }
}

pub fn slice() -> Slice<Products> {
    Slice::new(NAME, Products::default()).case("changeFilters", |products, action| {
        match action.payload_as::<FilterChange>() {
            Ok(FilterChange::Colors(colors)) => products.filters.colors = colors,
            Ok(FilterChange::Prices(prices)) => products.filters.prices = prices,
            Err(err) => log::warn!("{}", err),
        }
    })
}

/// `products/changeFilters` replacing one filter
pub fn change_filters(change: &FilterChange) -> Result<Action, ActionError> {
    Action::new(format!("{}/changeFilters", NAME)).with_serialized(change)
}

/// Catalogue colors without duplicates, in first-seen order
pub fn select_unique_colors(state: &SliceMap) -> Vec<String> {
    let Some(products) = state.get::<Products>(NAME) else {
        return Vec::new();
    };
    let mut colors: Vec<String> = Vec::new();
    for product in &products.data {
        if !colors.contains(&product.color) {
            colors.push(product.color.clone());
        }
    }
    colors
}

/// Products matching the current filters
///
/// An empty color list accepts every color.
pub fn select_filtered_products(state: &SliceMap) -> Vec<Product> {
    let Some(products) = state.get::<Products>(NAME) else {
        return Vec::new();
    };
    let filters = &products.filters;
    products
        .data
        .iter()
        .filter(|product| filters.colors.is_empty() || filters.colors.contains(&product.color))
        .filter(|product| filters.prices.contains(product.price))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use statekit::{CombineReducers, Store};

    fn store() -> Store<SliceMap, Action> {
        let reducer = CombineReducers::new().slice(&slice()).build().unwrap();
        Store::new(reducer.initial_state(), reducer)
    }

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|product| product.id).collect()
    }

    #[test]
    fn test_unique_colors_keep_catalogue_order() {
        let store = store();
        assert_eq!(
            select_unique_colors(&store.get_state()),
            vec!["black", "blue", "white"]
        );
    }

    #[test]
    fn test_unique_colors_without_slice() {
        assert_eq!(select_unique_colors(&SliceMap::default()), Vec::<String>::new());
    }

    #[test]
    fn test_change_filters_payload_shape() {
        let action = change_filters(&FilterChange::Colors(vec!["blue".to_string()])).unwrap();
        assert_eq!(action.kind, "products/changeFilters");
        assert_eq!(
            action.payload,
            Some(serde_json::json!({"name": "colors", "value": ["blue"]}))
        );
    }

    #[test]
    fn test_change_one_filter_keeps_the_other() {
        let store = store();
        let _ = store.dispatch(change_filters(&FilterChange::Colors(vec!["black".to_string()])).unwrap());
        let _ = store.dispatch(
            change_filters(&FilterChange::Prices(PriceRange { min: 100.0, max: 0.0 })).unwrap(),
        );

        let state = store.get_state();
        let filters = &state.get::<Products>(NAME).unwrap().filters;
        assert_eq!(filters.colors, vec!["black"]);
        assert_eq!(filters.prices, PriceRange { min: 100.0, max: 0.0 });
        assert_eq!(ids(&select_filtered_products(&state)), vec![1, 3]);
    }

    #[test]
    fn test_filtered_products() {
        let store = store();
        assert_eq!(ids(&select_filtered_products(&store.get_state())), vec![1, 2, 3, 4, 5]);

        let _ = store.dispatch(
            change_filters(&FilterChange::Prices(PriceRange { min: 100.0, max: 1500.0 })).unwrap(),
        );
        assert_eq!(ids(&select_filtered_products(&store.get_state())), vec![2, 3, 5]);

        let _ = store.dispatch(
            change_filters(&FilterChange::Colors(vec!["blue".to_string(), "white".to_string()]))
                .unwrap(),
        );
        assert_eq!(ids(&select_filtered_products(&store.get_state())), vec![2, 5]);
    }

    #[test]
    fn test_unknown_filter_is_ignored() {
        let store = store();
        let action = Action::new("products/changeFilters")
            .with_payload(serde_json::json!({"name": "sizes", "value": ["M"]}));
        let _ = store.dispatch(action);

        let state = store.get_state();
        assert_eq!(state.get::<Products>(NAME).unwrap().filters, Filters::default());
    }
}
