pub mod app_config;
pub mod hold_store;

pub use hold_store::HoldStore;
