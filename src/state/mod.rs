/// Application state module
///
/// This module holds the plain (widget-free) state and logic:
/// - Wire data model shared across layers (data.rs)
/// - Persistent session token storage (session.rs)
/// - List view predicates and ownership filtering (filter.rs)
/// - Photo staging for the submission form (staging.rs)

pub mod data;
pub mod filter;
pub mod session;
pub mod staging;
