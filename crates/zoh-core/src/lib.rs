//! Core types and errors for the zoh API client.
//!
//! This crate provides the foundational types used across the zoh workspace:
//!
//! - **Types**: Strongly-typed representations of Zoho Mail and organization API records,
//!   plus the `{status, data}` envelope every endpoint wraps them in
//! - **Errors**: Error handling with [`ZohError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use zoh_core::{Result, User};
//!
//! fn show(user: &User) -> Result<()> {
//!     println!("{} <{}>", user.display_name, user.email_address);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/zoh-core/0.3.0")]

mod error;
pub mod types;

pub use error::{Result, ZohError};
pub use types::*;
