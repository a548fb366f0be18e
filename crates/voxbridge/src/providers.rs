pub mod base;
pub mod configs;
pub mod factory;
pub mod retell;
pub mod types;
pub mod utils;
pub mod vapi;
