//! pressroom: a small company site with a GitHub-backed insights blog
//!
//! The interesting part lives in [`cache`]: an in-memory post cache that
//! refreshes itself from a remote repository of Markdown files on a
//! bounded schedule, re-downloading only files whose content fingerprint
//! changed. The rest of the crate is the thin site around it.

pub mod cache;
pub mod config;
pub mod content;
pub mod server;
pub mod source;
pub mod templates;
