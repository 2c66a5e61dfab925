// Core services
pub mod customers;
pub mod dashboard;
pub mod orders;
pub mod users;

// Order-number allocation and the cross-field rule set
pub mod order_numbers;
pub mod order_rules;
