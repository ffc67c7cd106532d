//! Weighted risk scoring for chit fund organizers and groups.
//!
//! The [`scoring`] module is a pure, stateless core; [`server`] exposes it over
//! HTTP through a strict validating API and a permissive demo service.

pub mod config;
pub mod fixtures;
pub mod output;
pub mod scoring;
pub mod server;
