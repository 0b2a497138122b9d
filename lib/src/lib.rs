//! Library for pagegate, the persistence layer behind per-page access control
//! and site-wide configuration variables.

pub mod config;
pub mod configrefs;
pub mod db;
pub mod model;
