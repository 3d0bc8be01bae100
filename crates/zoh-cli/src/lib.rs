//! # zoh-cli
//!
//! Command-line interface for Zoho Mail and organization administration.
//!
//! ## Features
//!
//! - **Admin**: list and look up organization users
//! - **Mail**: accounts, folders, labels and messages of the token owner
//! - **Mail admin**: spam allow/block lists, retention policy, delivery logs
//! - **Multiple output formats**: Pretty tables, JSON, CSV, YAML
//!
//! Every request goes through the client's shared rate limiter, and Ctrl-C
//! abandons whatever is in flight.

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
