//! Proof vectors for benchmarking and cross-crate testing.
//!
//! Earlier iterations of this crate shipped pre-generated byte constants;
//! now that bundle layouts are whatever size the `sigma-proofs` and
//! `bulletproofs` crates produce, hand-maintained constants would drift out
//! of sync with the prover on every change. Instead this crate just
//! re-exports `zkhe_prover::bench_vectors`'s runtime generator, so callers
//! get a fresh, internally-consistent set of vectors on every run.

pub use zkhe_prover::bench_vectors::{sample_vectors, SampleVectors};
