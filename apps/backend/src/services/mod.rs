pub mod players;
pub mod scheduler;
pub mod seat_control;
pub mod table_flow;
pub mod tables;
