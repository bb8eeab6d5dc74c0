//! Asset register and weekly preventive-maintenance (PM) attendance.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod exchange;
pub mod model;
pub mod models;
pub mod rotation;
pub mod routes;
pub mod store;
pub mod utils;
