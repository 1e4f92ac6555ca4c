//! EcoBurn Server
//!
//! HTTP service owning the burn job store, the progress views and the bulk
//! status transition engine.

pub mod api;
pub mod config;
pub mod db;
pub mod repository;
pub mod service;
