//! # Query Builder
//!
//! Translates request parameters into store filter and sort expressions.
//! All builders are pure; the precedence rules for restaurant discovery
//! live here and nowhere else.

use serde_json::Value;

use crate::store::{Condition, Filter, Sort, SortDirection};

/// Document fields the builders filter on.
pub const FIELD_STATE: &str = "state_id";
pub const FIELD_MEAL_TYPE: &str = "mealTypes.mealtype_id";
pub const FIELD_CUISINE: &str = "cuisines.cuisine_id";
pub const FIELD_COST: &str = "cost";
pub const FIELD_RESTAURANT_ID: &str = "restaurant_id";
pub const FIELD_MENU_ID: &str = "menu_id";
pub const FIELD_ORDER_ID: &str = "orderId";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_STORE_ID: &str = "_id";

/// Lenient numeric parse: absent or non-numeric input degrades to `None`
/// (unfiltered) instead of rejecting the request. `"0"` parses to
/// `Some(0)` and filters on zero; it is not a sentinel.
pub fn parse_id(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

/// Restaurant search by optional state and meal type.
///
/// Both present filters on both, one present filters on that one, neither
/// yields an empty filter (match all).
pub fn restaurant_search(state_id: Option<i64>, meal_id: Option<i64>) -> Filter {
    let mut filter = Filter::empty();
    if let Some(id) = state_id {
        filter = filter.and(Condition::eq(FIELD_STATE, Value::from(id)));
    }
    if let Some(id) = meal_id {
        filter = filter.and(Condition::eq(FIELD_MEAL_TYPE, Value::from(id)));
    }
    filter
}

/// Filter restaurants of a meal type by optional cuisine and cost range,
/// sorted on cost.
///
/// Precedence: all of cuisine/lcost/hcost present filters on the
/// inclusive cost range and the cuisine; only the bounds filters on the
/// range; only the cuisine filters on the cuisine; otherwise the meal
/// type filter stands alone. Default sort is ascending.
pub fn filter_and_sort(
    meal_id: i64,
    cuisine_id: Option<i64>,
    lcost: Option<i64>,
    hcost: Option<i64>,
    sort: Option<&str>,
) -> (Filter, Sort) {
    let mut filter = Filter::empty().and(Condition::eq(FIELD_MEAL_TYPE, Value::from(meal_id)));

    match (cuisine_id, lcost, hcost) {
        (Some(cuisine), Some(low), Some(high)) => {
            filter = filter
                .and(Condition::between(FIELD_COST, low, high))
                .and(Condition::eq(FIELD_CUISINE, Value::from(cuisine)));
        }
        (None, Some(low), Some(high)) => {
            filter = filter.and(Condition::between(FIELD_COST, low, high));
        }
        (Some(cuisine), _, _) => {
            filter = filter.and(Condition::eq(FIELD_CUISINE, Value::from(cuisine)));
        }
        _ => {}
    }

    let direction = sort
        .map(SortDirection::from_token)
        .unwrap_or(SortDirection::Ascending);

    (filter, Sort::by(FIELD_COST, direction))
}

/// Lookup by restaurant id, used for both details and menus.
pub fn by_restaurant(restaurant_id: i64) -> Filter {
    Filter::empty().and(Condition::eq(FIELD_RESTAURANT_ID, Value::from(restaurant_id)))
}

/// Menu items whose `menu_id` is a member of the given set.
pub fn menu_items(ids: Vec<Value>) -> Filter {
    Filter::empty().and(Condition::is_in(FIELD_MENU_ID, ids))
}

/// Orders, optionally narrowed to one customer email.
pub fn orders(email: Option<&str>) -> Filter {
    match email {
        Some(email) => Filter::empty().and(Condition::eq(FIELD_EMAIL, Value::from(email))),
        None => Filter::empty(),
    }
}

/// Order lookup by the numeric business key. Update targets this.
pub fn order_by_id(order_id: i64) -> Filter {
    Filter::empty().and(Condition::eq(FIELD_ORDER_ID, Value::from(order_id)))
}

/// Order lookup by the store-generated identifier. Delete targets this.
pub fn order_by_store_id(id: &str) -> Filter {
    Filter::empty().and(Condition::eq(FIELD_STORE_ID, Value::from(id)))
}
