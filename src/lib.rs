//! mealcart - food-delivery REST backend over a document store
//!
//! Restaurant discovery (location, meal type, cuisine, cost), menus,
//! and the order lifecycle, served over a pluggable document store.

pub mod cli;
pub mod config;
pub mod query;
pub mod rest_api;
pub mod store;
