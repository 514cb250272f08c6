pub mod order_details;
pub mod orders;
pub mod products;
pub mod users;
