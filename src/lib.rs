// Ground: bias-aware news aggregation
//
// This is the library root. Each module corresponds to a major subsystem:
// scoring (bias, categorize), storage (db), ingestion (feeds, pipeline),
// serving (web, auth) and reading (client, output).

pub mod auth;
pub mod bias;
pub mod categorize;
pub mod client;
pub mod config;
pub mod db;
pub mod feeds;
pub mod output;
pub mod pipeline;
pub mod sports;
pub mod status;

#[cfg(feature = "web")]
pub mod web;
