//! Cross-field business rules for orders and customers.
//!
//! Rules append into a shared [`ValidationFailures`] map instead of
//! short-circuiting, so one round trip reports every violation.

use crate::entities::order::{OrderType, SubOrderType};
use crate::entities::user::Department;
use crate::errors::ValidationFailures;

pub const PARENT_REQUIRED: &str = "A sub-order requires a parent order.";
pub const WEEK_BOUND: &str = "Production week cannot be greater than 5.";
pub const ORDER_TYPE_REQUIRED: &str = "An order type is required for primary orders.";
pub const MANAGER_NOT_COMMERCIAL: &str = "The manager must belong to the commercial department.";
pub const TECHNOLOGIST_NOT_DESIGN: &str = "The technologist must belong to the design department.";
pub const CUSTOMER_CODE_REQUIRED: &str =
    "The customer needs a short code before orders can be numbered.";

/// The order fields the cross-field rules look at. `effective_order_type` is
/// the requested type or, for sub-orders, the type inherited from the parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderDraft {
    pub effective_order_type: Option<OrderType>,
    pub sub_order_type: Option<SubOrderType>,
    pub has_parent: bool,
    pub has_part: bool,
    pub week: Option<i32>,
}

pub fn check_order_draft(draft: &OrderDraft, failures: &mut ValidationFailures) {
    if draft.sub_order_type.is_some() && !draft.has_parent {
        failures.add("parent_order_id", PARENT_REQUIRED);
    }
    if let Some(week) = draft.week {
        if week > 5 {
            failures.add("week", WEEK_BOUND);
        }
    }
    // A parent or part context substitutes for an explicit type.
    if draft.effective_order_type.is_none() && !draft.has_parent && !draft.has_part {
        failures.add("order_type", ORDER_TYPE_REQUIRED);
    }
}

/// The manager of a customer or order must sit in the commercial department.
pub fn check_manager(department: Option<Department>, failures: &mut ValidationFailures) {
    if department != Some(Department::Commercial) {
        failures.add("manager_id", MANAGER_NOT_COMMERCIAL);
    }
}

/// A technologist, when assigned, must sit in the design department.
pub fn check_technologist(department: Option<Department>, failures: &mut ValidationFailures) {
    if department != Some(Department::Design) {
        failures.add("technologist_id", TECHNOLOGIST_NOT_DESIGN);
    }
}
