//! # dropout-dashboard
//!
//! Client for a student dropout-risk service. Two independent workflows:
//! a statistics overview fetched once per mount, and a single-student
//! prediction form.
//!
//! `net` talks to the service, `state` models each workflow's lifecycle and
//! the values derived for display, `views` drive requests against that state,
//! and `render` turns it into terminal text.

pub mod config;
pub mod net;
pub mod render;
pub mod state;
pub mod util;
pub mod views;
