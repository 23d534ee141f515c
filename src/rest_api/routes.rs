//! # Request Handlers
//!
//! One handler per endpoint: validate input shape, build the filter,
//! run the store operation, pass the result through. Matched documents
//! are returned whole; there is no pagination or projection.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::query;
use crate::store::{collections, DocumentStore, Filter, InsertAck};

use super::errors::{ApiError, ApiResult};
use super::response::{DeleteOrderResponse, UpdateOrderResponse};

/// Shared application state: the store injected at startup.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
}

pub type SharedState = Arc<AppState>;

// ==================
// Request Types
// ==================

/// Query parameters for `GET /restaurants`.
///
/// Numeric params arrive as raw strings and are parsed leniently:
/// garbled input degrades to "no filter" rather than rejecting.
#[derive(Debug, Deserialize)]
pub struct RestaurantSearchParams {
    #[serde(rename = "stateId")]
    pub state_id: Option<String>,
    #[serde(rename = "mealId")]
    pub meal_id: Option<String>,
}

/// Query parameters for `GET /filter/:mealId`
#[derive(Debug, Deserialize)]
pub struct RestaurantFilterParams {
    #[serde(rename = "cuisineId")]
    pub cuisine_id: Option<String>,
    pub lcost: Option<String>,
    pub hcost: Option<String>,
    pub sort: Option<String>,
}

/// Query parameters for `GET /orders`
#[derive(Debug, Deserialize)]
pub struct OrdersParams {
    pub email: Option<String>,
}

/// Body for `PUT /updateOrder/:id`; only these three fields are set.
#[derive(Debug, Deserialize)]
pub struct UpdateOrderBody {
    pub status: Option<Value>,
    pub bank_name: Option<Value>,
    pub date: Option<Value>,
}

fn parse_path_id(raw: &str) -> ApiResult<i64> {
    query::parse_id(Some(raw)).ok_or_else(|| ApiError::InvalidId(raw.to_string()))
}

// ==================
// Handlers
// ==================

/// `GET /` - static greeting
pub async fn greeting() -> &'static str {
    "Hello, welcome to mealcart"
}

/// `GET /locations` - all delivery locations
pub async fn locations(State(state): State<SharedState>) -> ApiResult<Json<Vec<Value>>> {
    let docs = state.store.find(collections::LOCATIONS, &Filter::empty())?;
    Ok(Json(docs))
}

/// `GET /restaurants?stateId=&mealId=` - restaurant search
pub async fn restaurants(
    State(state): State<SharedState>,
    Query(params): Query<RestaurantSearchParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let filter = query::restaurant_search(
        query::parse_id(params.state_id.as_deref()),
        query::parse_id(params.meal_id.as_deref()),
    );
    let docs = state.store.find(collections::RESTAURANTS, &filter)?;
    Ok(Json(docs))
}

/// `GET /quickSearch` - all meal types
pub async fn quick_search(State(state): State<SharedState>) -> ApiResult<Json<Vec<Value>>> {
    let docs = state.store.find(collections::MEAL_TYPES, &Filter::empty())?;
    Ok(Json(docs))
}

/// `GET /filter/:mealId?cuisineId=&lcost=&hcost=&sort=` - filter and sort
pub async fn filter_restaurants(
    State(state): State<SharedState>,
    Path(meal_id): Path<String>,
    Query(params): Query<RestaurantFilterParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let meal_id = parse_path_id(&meal_id)?;

    let (filter, sort) = query::filter_and_sort(
        meal_id,
        query::parse_id(params.cuisine_id.as_deref()),
        query::parse_id(params.lcost.as_deref()),
        query::parse_id(params.hcost.as_deref()),
        params.sort.as_deref(),
    );

    let docs = state
        .store
        .find_sorted(collections::RESTAURANTS, &filter, &sort)?;
    Ok(Json(docs))
}

/// `GET /details/:id` - restaurant details
pub async fn restaurant_details(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let restaurant_id = parse_path_id(&id)?;
    let docs = state
        .store
        .find(collections::RESTAURANTS, &query::by_restaurant(restaurant_id))?;
    Ok(Json(docs))
}

/// `GET /menu/:id` - menu of one restaurant
pub async fn restaurant_menu(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Value>>> {
    let restaurant_id = parse_path_id(&id)?;
    let docs = state
        .store
        .find(collections::MENUS, &query::by_restaurant(restaurant_id))?;
    Ok(Json(docs))
}

/// `POST /menuItems` - menu items for a list of identifiers
///
/// The body must be a JSON array; anything else is `Invalid input`.
pub async fn menu_items(
    State(state): State<SharedState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Vec<Value>>> {
    let ids = match body {
        Value::Array(ids) => ids,
        _ => return Err(ApiError::InvalidInput),
    };
    let docs = state.store.find(collections::MENUS, &query::menu_items(ids))?;
    Ok(Json(docs))
}

/// `POST /placeOrder` - insert the order document as-is
///
/// No schema validation beyond "it must be an object".
pub async fn place_order(
    State(state): State<SharedState>,
    Json(order): Json<Value>,
) -> ApiResult<Json<InsertAck>> {
    let ack = state.store.insert(collections::ORDERS, order)?;
    Ok(Json(ack))
}

/// `GET /orders?email=` - all orders, or one customer's
pub async fn orders(
    State(state): State<SharedState>,
    Query(params): Query<OrdersParams>,
) -> ApiResult<Json<Vec<Value>>> {
    let filter = query::orders(params.email.as_deref());
    let docs = state.store.find(collections::ORDERS, &filter)?;
    Ok(Json(docs))
}

/// `PUT /updateOrder/:id` - set status/bank_name/date by numeric order id
///
/// The path id is the `orderId` business key, not the store id. A
/// non-existent id is a no-op reported as `matched: 0`.
pub async fn update_order(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrderBody>,
) -> ApiResult<Json<UpdateOrderResponse>> {
    let order_id = parse_path_id(&id)?;

    let mut changes = serde_json::Map::new();
    if let Some(status) = body.status {
        changes.insert("status".to_string(), status);
    }
    if let Some(bank_name) = body.bank_name {
        changes.insert("bank_name".to_string(), bank_name);
    }
    if let Some(date) = body.date {
        changes.insert("date".to_string(), date);
    }

    let matched =
        state
            .store
            .update_one(collections::ORDERS, &query::order_by_id(order_id), &changes)?;
    Ok(Json(UpdateOrderResponse::new(matched)))
}

/// `DELETE /deleteOrder/:id` - delete by store-generated identifier
///
/// Unlike update, the path id here is the store id. A malformed
/// identifier fails before the store is touched.
pub async fn delete_order(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteOrderResponse>> {
    let store_id = Uuid::parse_str(&id).map_err(|_| ApiError::InvalidId(id.clone()))?;

    let deleted = state.store.delete_one(
        collections::ORDERS,
        &query::order_by_store_id(&store_id.to_string()),
    )?;
    Ok(Json(DeleteOrderResponse::new(deleted)))
}
