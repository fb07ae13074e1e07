//! Coverage Service - healthcare coverage rates by ZIP code.
//!
//! Sibling variant of locations-service. It reads the demographics table
//! only and serves raw coverage rates and licensee counts; no ratio is
//! derived. The two services share a route contract but not an output
//! shape, and are deliberately kept separate.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
