//! Error handling for the URL shortener.

pub mod domain;

pub use domain::DomainError;
