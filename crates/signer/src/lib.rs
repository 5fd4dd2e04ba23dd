#![forbid(unsafe_code)]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]

//! Transaction construction and signing for Cosmos SDK chains whose
//! accounts use the ethsecp256k1 public-key algorithm.
//!
//! Generic signing clients infer the public-key type to embed in
//! `SignerInfo` and infer wrong for these chains, producing signatures the
//! chain rejects. This crate resolves account state through the chain's
//! REST endpoint (which works regardless of the key type embedded in the
//! account record), builds the canonical signing payload with the public
//! key explicitly re-tagged under the chain's type URL, and assembles the
//! broadcastable transaction from the detached signature an external
//! wallet produces.
//!
//! The wallet and the broadcast transport are consumed through the
//! [`signer::OfflineDirectSigner`] and [`tx::broadcast::TxBroadcaster`]
//! traits and are never implemented here.

pub mod account;
pub mod config;
pub mod error;
pub mod query;
pub mod signer;
pub mod tx;
