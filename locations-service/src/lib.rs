//! Locations Service - healthcare-access data by ZIP code.
//!
//! Joins per-ZIP demographics with per-ZIP population figures and serves the
//! derived children-to-doctor ratio as JSON, alongside the map pages that
//! consume it.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
