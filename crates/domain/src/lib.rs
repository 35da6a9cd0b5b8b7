//! # appliances-domain
//!
//! Pure domain model for the appliances catalogue.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the **Appliance** record and its create/update requests
//! - Validate untyped JSON input into those requests, field by field
//! - Define **listing queries**: filters, sort orders, bounded pagination
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod appliance;
pub mod listing;
