pub mod aggregator;
pub mod clock;
pub mod config;
pub mod engine;
pub mod log;
pub mod query;
pub mod rates;
pub mod roster;
pub mod salary;
pub mod store;
pub mod tracker;
