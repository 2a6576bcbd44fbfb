//! Event types and observers.
//!
//! Events provide a decoupled way for systems to communicate without direct
//! dependencies.
//!
//! Submodules:
//! - [`contact`] – character/obstacle contact gained and lost notifications

pub mod contact;
