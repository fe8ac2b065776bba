//! Router metrics.
//!
//! # Metrics
//! - `router_matches_total` (counter): path matches by `outcome`
//! - `router_urls_built_total` (counter): URL builds by `mode` and `outcome`
//! - `router_model_lookups_total` (counter): model lookups by `outcome`
//! - `router_index_rebuilds_total` (counter): route index rebuilds
//! - `router_routes` (gauge): routes in the most recently built index

use metrics::{counter, gauge};

pub fn record_match(outcome: &'static str) {
    counter!("router_matches_total", "outcome" => outcome).increment(1);
}

pub fn record_url_built(mode: &'static str, outcome: &'static str) {
    counter!("router_urls_built_total", "mode" => mode, "outcome" => outcome).increment(1);
}

pub fn record_model_lookup(outcome: &'static str) {
    counter!("router_model_lookups_total", "outcome" => outcome).increment(1);
}

pub fn record_index_rebuild(routes: usize) {
    counter!("router_index_rebuilds_total").increment(1);
    gauge!("router_routes").set(routes as f64);
}
