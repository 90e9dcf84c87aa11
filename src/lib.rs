//! Tourbook - Tour marketplace backend
//!
//! Operators publish tours, travellers request quotes, and both sides follow
//! a quote from request to payment. Access to every operation goes through
//! a single role/access gate.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
