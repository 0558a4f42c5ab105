//! InfraSee: dashboard companion library
//!
//! The core is the wizard state controller in [`wizard`]. The password-reset
//! flow in [`flows`] hosts it, talking to the identity provider through
//! [`services`]. Route guards, the SMS gateway and table filter options are
//! thin collaborators around it.

pub mod auth;
pub mod cli;
pub mod config;
pub mod flows;
pub mod logging;
pub mod services;
pub mod utils;
pub mod wizard;
