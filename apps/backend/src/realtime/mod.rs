pub mod hub;

pub use hub::{TableEvent, TableEventHub};
