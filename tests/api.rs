//! End-to-end tests driving the router with in-process requests.
//!
//! Each test builds a freshly seeded store, so ordering between tests
//! does not matter.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mealcart::config::ServerConfig;
use mealcart::rest_api::ApiServer;
use mealcart::store::{collections, MemoryStore};

fn seeded_router() -> Router {
    let store = MemoryStore::new();

    store
        .load_collection(
            collections::LOCATIONS,
            vec![
                json!({"location_id": 1, "name": "Downtown", "state_id": 10}),
                json!({"location_id": 2, "name": "Riverside", "state_id": 11}),
            ],
        )
        .unwrap();

    store
        .load_collection(
            collections::MEAL_TYPES,
            vec![
                json!({"mealtype_id": 1, "mealtype": "Breakfast"}),
                json!({"mealtype_id": 2, "mealtype": "Dinner"}),
            ],
        )
        .unwrap();

    store
        .load_collection(
            collections::RESTAURANTS,
            vec![
                json!({
                    "restaurant_id": 1,
                    "restaurant_name": "Spice Garden",
                    "state_id": 10,
                    "cost": 450,
                    "mealTypes": [{"mealtype_id": 1}, {"mealtype_id": 2}],
                    "cuisines": [{"cuisine_id": 3}]
                }),
                json!({
                    "restaurant_id": 2,
                    "restaurant_name": "Noodle House",
                    "state_id": 10,
                    "cost": 200,
                    "mealTypes": [{"mealtype_id": 2}],
                    "cuisines": [{"cuisine_id": 5}]
                }),
                json!({
                    "restaurant_id": 3,
                    "restaurant_name": "Bay Grill",
                    "state_id": 11,
                    "cost": 700,
                    "mealTypes": [{"mealtype_id": 2}],
                    "cuisines": [{"cuisine_id": 3}]
                }),
            ],
        )
        .unwrap();

    store
        .load_collection(
            collections::MENUS,
            vec![
                json!({"menu_id": 1, "restaurant_id": 1, "item": "Paneer Tikka"}),
                json!({"menu_id": 2, "restaurant_id": 1, "item": "Dal Makhani"}),
                json!({"menu_id": 3, "restaurant_id": 2, "item": "Ramen"}),
            ],
        )
        .unwrap();

    ApiServer::new(ServerConfig::default(), Arc::new(store)).router()
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn send_json(
    router: &Router,
    method: &str,
    uri: &str,
    body: &Value,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn restaurant_ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["restaurant_id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn greeting_is_plain_text() {
    let router = seeded_router();
    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(
        std::str::from_utf8(&bytes).unwrap(),
        "Hello, welcome to mealcart"
    );
}

#[tokio::test]
async fn locations_returns_all() {
    let router = seeded_router();
    let (status, body) = get(&router, "/locations").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn quick_search_returns_meal_types() {
    let router = seeded_router();
    let (status, body) = get(&router, "/quickSearch").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn restaurants_without_params_is_an_unfiltered_scan() {
    let router = seeded_router();
    let (status, body) = get(&router, "/restaurants").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn restaurants_filters_by_state_only() {
    let router = seeded_router();
    let (_, body) = get(&router, "/restaurants?stateId=10").await;
    assert_eq!(restaurant_ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn restaurants_filters_by_meal_only() {
    let router = seeded_router();
    let (_, body) = get(&router, "/restaurants?mealId=1").await;
    assert_eq!(restaurant_ids(&body), vec![1]);
}

#[tokio::test]
async fn restaurants_filters_by_state_and_meal() {
    let router = seeded_router();
    let (_, body) = get(&router, "/restaurants?stateId=10&mealId=2").await;
    assert_eq!(restaurant_ids(&body), vec![1, 2]);

    let (_, body) = get(&router, "/restaurants?stateId=11&mealId=1").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn restaurants_garbled_param_degrades_to_unfiltered() {
    let router = seeded_router();
    let (status, body) = get(&router, "/restaurants?stateId=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn filter_sorts_by_cost_ascending_by_default() {
    let router = seeded_router();
    let (status, body) = get(&router, "/filter/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(restaurant_ids(&body), vec![2, 1, 3]);
}

#[tokio::test]
async fn filter_sort_token_reverses_order() {
    let router = seeded_router();
    let (_, body) = get(&router, "/filter/2?sort=-1").await;
    assert_eq!(restaurant_ids(&body), vec![3, 1, 2]);
}

#[tokio::test]
async fn filter_cost_range_is_inclusive_on_both_bounds() {
    let router = seeded_router();
    // Costs for meal type 2: 200, 450, 700.
    let (_, body) = get(&router, "/filter/2?lcost=200&hcost=450").await;
    assert_eq!(restaurant_ids(&body), vec![2, 1]);
}

#[tokio::test]
async fn filter_combines_range_and_cuisine() {
    let router = seeded_router();
    let (_, body) = get(&router, "/filter/2?cuisineId=3&lcost=200&hcost=700").await;
    assert_eq!(restaurant_ids(&body), vec![1, 3]);
}

#[tokio::test]
async fn filter_cuisine_only() {
    let router = seeded_router();
    let (_, body) = get(&router, "/filter/2?cuisineId=5").await;
    assert_eq!(restaurant_ids(&body), vec![2]);
}

#[tokio::test]
async fn filter_rejects_garbled_meal_id() {
    let router = seeded_router();
    let (status, body) = get(&router, "/filter/brunch").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn details_and_menu_by_restaurant_id() {
    let router = seeded_router();

    let (status, body) = get(&router, "/details/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["restaurant_name"], "Spice Garden");

    let (_, body) = get(&router, "/menu/1").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = get(&router, "/details/99").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn menu_items_filters_by_membership() {
    let router = seeded_router();
    let (status, body) = send_json(&router, "POST", "/menuItems", &json!([1, 3])).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|doc| doc["menu_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn menu_items_rejects_non_array_body() {
    let router = seeded_router();

    let (status, body) = send_json(&router, "POST", "/menuItems", &json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input");

    let (status, _) = send_json(&router, "POST", "/menuItems", &json!("x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn place_order_then_list_by_email_round_trips() {
    let router = seeded_router();

    let order = json!({"orderId": 1, "email": "a@b.com", "status": "pending"});
    let (status, ack) = send_json(&router, "POST", "/placeOrder", &order).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ack["inserted_id"].is_string());

    let (_, body) = get(&router, "/orders?email=a@b.com").await;
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["orderId"], 1);
    assert_eq!(orders[0]["status"], "pending");

    let (_, body) = get(&router, "/orders?email=nobody@b.com").await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn place_order_rejects_non_object_body() {
    let router = seeded_router();
    let (status, _) = send_json(&router, "POST", "/placeOrder", &json!([1, 2])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_order_reports_matched_count() {
    let router = seeded_router();

    let order = json!({"orderId": 7, "email": "a@b.com", "status": "pending"});
    send_json(&router, "POST", "/placeOrder", &order).await;

    let changes = json!({"status": "delivered", "bank_name": "ACME", "date": "2024-05-01"});
    let (status, body) = send_json(&router, "PUT", "/updateOrder/7", &changes).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order Updated");
    assert_eq!(body["matched"], 1);

    let (_, orders) = get(&router, "/orders").await;
    assert_eq!(orders[0]["status"], "delivered");
    assert_eq!(orders[0]["bank_name"], "ACME");
}

#[tokio::test]
async fn update_order_on_missing_id_is_a_no_op() {
    let router = seeded_router();
    let (status, body) =
        send_json(&router, "PUT", "/updateOrder/999", &json!({"status": "x"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Order Updated");
    assert_eq!(body["matched"], 0);
}

#[tokio::test]
async fn delete_order_uses_the_store_identifier() {
    let router = seeded_router();

    let order = json!({"orderId": 1, "email": "a@b.com"});
    let (_, ack) = send_json(&router, "POST", "/placeOrder", &order).await;
    let store_id = ack["inserted_id"].as_str().unwrap().to_string();

    let uri = format!("/deleteOrder/{}", store_id);
    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .body(Body::empty())
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Order Deleted");
    assert_eq!(body["deleted"], 1);

    let (_, orders) = get(&router, "/orders").await;
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_order_rejects_malformed_identifier_before_the_store() {
    let router = seeded_router();
    let request = Request::builder()
        .method("DELETE")
        .uri("/deleteOrder/not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
