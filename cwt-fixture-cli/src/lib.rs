//! # cwt-fixture-cli
//!
//! Command-line front end for `cwt-fixture` and `cwt-fixture-keys`.
//!
//! ## Subcommands
//!
//! - `token`: build the sample COSE_Sign1/CWT and print its encodings
//! - `keygen es256`: generate a P-256 key pair
//! - `keygen hmac`: generate a random symmetric key
//!
//! Argument parsing lives in the subcommand modules; encoding and key
//! generation live in the library crates. Handlers write to any
//! `io::Write` so they can be tested without a process.

pub mod keygen;
pub mod report;
pub mod token;
