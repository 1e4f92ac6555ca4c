//! EcoBurn Core
//!
//! Core types and abstractions for the EcoBurn burn job service.
//!
//! This crate contains:
//! - Domain types: burn jobs, their status model and derived progress stages
//! - DTOs: request/response shapes shared by the server, client and CLI

pub mod domain;
pub mod dto;
