//! Credential pairs, their fingerprints, and bearer tokens.

pub mod credentials;
pub mod token;

pub use credentials::*;
pub use token::*;
