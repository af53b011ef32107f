pub mod asset_selector;
pub mod date_aligner;
pub mod history_fetcher;
pub mod history_service;
pub mod label_sampler;
pub mod weighted_aggregator;
