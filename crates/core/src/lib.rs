//! Core business logic for the One Big Future site.
//!
//! The centrepiece is the homepage settings document: a singleton guarded by
//! [`SingletonGuard`], with rich text normalized on every write and read, and
//! a public view that falls back to built-in content whenever the stored
//! document is missing or unreadable.

pub mod services;

pub use services::*;
