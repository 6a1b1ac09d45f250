//! Command implementations.

pub mod check;
pub mod query;
pub mod serve;
pub mod sitemap;
