//! Queries against the chain's REST (LCD) endpoint.

pub mod account;
