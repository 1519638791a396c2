//! KVB disorder map server.
//!
//! Fetches the station registry, station locations, and the stairs and
//! elevator disorder feeds of the Cologne transit operator, reconciles
//! them, and serves a map of rail stations with broken facilities.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feeds;
pub mod presentation;
pub mod reconcile;
pub mod refresh;
pub mod web;
