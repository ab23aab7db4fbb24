//! Command implementations, as methods on [`App`](crate::App).
//!
//! [`submit`] is the entry point; it dispatches to [`create`] or [`update`]
//! depending on whether HEAD already links a pull request. [`auth`] sets up
//! GitHub credentials beforehand.

pub mod auth;
pub mod create;
pub mod submit;
pub mod update;
