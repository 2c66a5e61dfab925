pub mod customer;
pub mod order;
pub mod order_comment;
pub mod order_file;
pub mod order_sequence;
pub mod user;
