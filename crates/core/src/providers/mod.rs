pub mod registry;
pub mod traits;

// History provider implementations
pub mod dashboard_api;
pub mod yahoo_finance;
