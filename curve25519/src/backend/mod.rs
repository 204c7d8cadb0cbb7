//! Interoperable backends for GF(2^255 - 19) field arithmetic.
//!
//! Every backend implements [`crate::field::Field25519`] and must agree with
//! every other backend on the canonical byte encoding of any value reachable
//! through the public API (spec invariant: cross-representation equality is
//! defined solely by `to_bytes`).

mod radix;

pub mod u32e_25_5;
pub mod u64_43;
pub mod u64_51;
