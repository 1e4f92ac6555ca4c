//! Data Transfer Objects
//!
//! Request and response shapes exchanged between the EcoBurn server and its
//! clients. DTOs wrap or summarise domain entities for network transfer.

pub mod bulk;
pub mod burn_job;
pub mod summary;
