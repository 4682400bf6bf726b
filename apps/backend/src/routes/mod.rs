pub mod auth;
pub mod cards;
pub mod scheduler;
pub mod study;
pub mod users;
