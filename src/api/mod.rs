/// Remote KittyFind API module
///
/// This module is the only place the client talks to the network:
/// - The HTTP gateway: token attach, body encoding, errors (client.rs)
/// - Account operations: register, login, current user (auth.rs)
/// - The cat sighting collection: CRUD and photo bytes (cats.rs)

pub mod auth;
pub mod cats;
pub mod client;

pub use client::{ApiClient, ApiError};
