//! # Markwave Graph
//!
//! Neo4j persistence gateway for the referral backend.
//!
//! Owns the bolt connection, schema constraints, and the Cypher behind the
//! `ReferralStore` trait. No business logic lives here.

pub mod client;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig};
pub use schema::initialize_schema;
pub use store::GraphStore;
