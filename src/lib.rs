//! LiberaSphere Membership Core
//!
//! This crate implements the bookkeeping heart of the LiberaSphere
//! membership application: the award ("premi") ledger and the
//! subscription-status reconciler used by the admin console.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
