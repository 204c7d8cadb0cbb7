//! Shared context, transcript-binding and wire-format types for the
//! confidential-transfer prover (`zkhe-prover`) and verifier
//! (`zkhe-verifier`) crates.
//!
//! The ciphertext here is the standard twisted-ElGamal layout: a
//! [`Ciphertext`]'s commitment half `c = v*G + r*H` doubles as the value's
//! Pedersen commitment, and its handle half `d = r*P` lets whoever holds the
//! matching secret key recover `r*H` and then `v*G` — the same `P = sk^-1 *
//! H` relationship `signatures::schnorr_ristretto` keypairs already have, so
//! one keypair serves as both a signing key and an ElGamal decryption key.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use bulletproofs::PedersenGens;
use curve25519::RistrettoPoint;
use transcript::{labels as t_labels, ProofTranscript};

/// Current wire-format version folded into every transcript, so a future
/// incompatible change to the proof layouts can never be replayed against
/// an older verifier.
pub const SDK_VERSION: u16 = 1;

const PROTOCOL_LABEL: &[u8] = b"zkhe-confidential-transfer-ctx";

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("point did not decode to a valid Ristretto255 element")]
    InvalidPoint,
    #[error("byte slice has the wrong length for this type")]
    WrongLength,
}

/// Twisted-ElGamal ciphertext: `c = v*G + r*H` (also the value's Pedersen
/// commitment), `d = r*P` (decrypt handle for public key `P`).
#[derive(Clone, Copy, Debug)]
pub struct Ciphertext {
    pub c: RistrettoPoint,
    pub d: RistrettoPoint,
}

impl Ciphertext {
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[0..32].copy_from_slice(&self.c.compress());
        out[32..64].copy_from_slice(&self.d.compress());
        out
    }

    pub fn from_bytes(bytes: &[u8; 64]) -> Result<Self, PrimitivesError> {
        let mut c_bytes = [0u8; 32];
        let mut d_bytes = [0u8; 32];
        c_bytes.copy_from_slice(&bytes[0..32]);
        d_bytes.copy_from_slice(&bytes[32..64]);
        Ok(Ciphertext {
            c: point_from_bytes(&c_bytes)?,
            d: point_from_bytes(&d_bytes)?,
        })
    }
}

pub fn point_to_bytes(p: &RistrettoPoint) -> [u8; 32] {
    p.compress()
}

pub fn point_from_bytes(bytes: &[u8; 32]) -> Result<RistrettoPoint, PrimitivesError> {
    RistrettoPoint::from_bytes(bytes).ok_or(PrimitivesError::InvalidPoint)
}

/// Decode a commitment that is allowed to be "absent" (an empty slice maps
/// to the group identity — an account with no prior balance on this asset).
pub fn commitment_or_identity(bytes: &[u8]) -> Result<RistrettoPoint, PrimitivesError> {
    if bytes.is_empty() {
        return Ok(RistrettoPoint::identity());
    }
    if bytes.len() != 32 {
        return Err(PrimitivesError::WrongLength);
    }
    let mut b = [0u8; 32];
    b.copy_from_slice(bytes);
    point_from_bytes(&b)
}

/// The Pedersen blinding generator `H`, shared with
/// `signatures::schnorr_ristretto::pedersen_h` and `bulletproofs::PedersenGens`
/// so every commitment in this workspace is built from the same generator.
pub fn pedersen_h_generator() -> RistrettoPoint {
    PedersenGens::default().b_blinding
}

pub fn pedersen_gens() -> PedersenGens {
    PedersenGens::default()
}

/// The public data every confidential-transfer operation binds its
/// Fiat-Shamir transcript to, so a proof generated for one network, asset,
/// or pair of counterparties can never be replayed against another.
pub struct PublicContext {
    pub network_id: [u8; 32],
    pub sdk_version: u16,
    pub asset_id: [u8; 32],
    pub sender_pk: RistrettoPoint,
    pub receiver_pk: RistrettoPoint,
    pub auditor_pk: Option<RistrettoPoint>,
    pub fee_commitment: RistrettoPoint,
    pub ciphertext_out: Ciphertext,
    pub ciphertext_in: Option<Ciphertext>,
}

pub fn new_transcript(ctx: &PublicContext) -> ProofTranscript {
    let mut t = ProofTranscript::new(PROTOCOL_LABEL);
    t.append_message(b"network-id", &ctx.network_id);
    t.append_message(b"sdk-version", &ctx.sdk_version.to_le_bytes());
    t.append_message(b"asset-id", &ctx.asset_id);
    t.append_point(t_labels::APPEND_SENDER_PK, &ctx.sender_pk);
    t.append_point(t_labels::APPEND_RECEIVER_PK, &ctx.receiver_pk);
    if let Some(auditor_pk) = ctx.auditor_pk {
        t.append_point(b"auditor-pk", &auditor_pk);
    }
    t.append_point(b"fee-commitment", &ctx.fee_commitment);
    t.append_point(t_labels::APPEND_CIPHERTEXT_C, &ctx.ciphertext_out.c);
    t.append_point(t_labels::APPEND_CIPHERTEXT_D, &ctx.ciphertext_out.d);
    if let Some(ciphertext_in) = &ctx.ciphertext_in {
        t.append_point(b"ciphertext-in-c", &ciphertext_in.c);
        t.append_point(b"ciphertext-in-d", &ciphertext_in.d);
    }
    t
}

/// Pad (zero-fill on the right) or truncate a caller-supplied asset
/// identifier to the fixed 32-byte width every transcript binds to.
pub fn pad_or_trim_asset_id(asset_id: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let n = asset_id.len().min(32);
    out[..n].copy_from_slice(&asset_id[..n]);
    out
}

/// A validated 32-byte Ristretto255 public key, as exchanged across the
/// verifier's trait boundary.
#[derive(Clone, Copy, Debug)]
pub struct PublicKeyBytes([u8; 32]);

impl PublicKeyBytes {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn point(&self) -> Result<RistrettoPoint, PrimitivesError> {
        point_from_bytes(&self.0)
    }
}

impl TryFrom<Vec<u8>> for PublicKeyBytes {
    type Error = PrimitivesError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.len() != 32 {
            return Err(PrimitivesError::WrongLength);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(&bytes);
        Ok(PublicKeyBytes(out))
    }
}

/// A validated 64-byte twisted-ElGamal ciphertext, as exchanged across the
/// verifier's trait boundary.
#[derive(Clone, Copy, Debug)]
pub struct EncryptedAmount([u8; 64]);

impl EncryptedAmount {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn ciphertext(&self) -> Result<Ciphertext, PrimitivesError> {
        Ciphertext::from_bytes(&self.0)
    }
}

impl TryFrom<Vec<u8>> for EncryptedAmount {
    type Error = PrimitivesError;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        if bytes.len() != 64 {
            return Err(PrimitivesError::WrongLength);
        }
        let mut out = [0u8; 64];
        out.copy_from_slice(&bytes);
        Ok(EncryptedAmount(out))
    }
}

/// Supplies the network identifier a verifier binds every transcript to.
/// Implemented on a unit struct per deployment network, so the verifier's
/// own type parameter fixes the network rather than a runtime argument that
/// could be forgotten or swapped.
pub trait NetworkIdProvider {
    fn network_id() -> [u8; 32];
}

/// A range-proof backend the verifier crate delegates Bulletproof
/// verification to, so `ZkVerifier` implementations stay agnostic of which
/// range-proof scheme backs them.
pub trait RangeProofVerifier {
    fn verify_range_proof(
        label: &[u8],
        ctx_bytes: &[u8],
        commitment: &[u8; 32],
        proof_bytes: &[u8],
    ) -> Result<(), ()>;
}

/// The confidential-transfer verification surface: one method per operation
/// the prover crate can produce a proof for.
pub trait ZkVerifier {
    type Error;

    /// Verify the sender side of a transfer (phase 1). Returns the
    /// recomputed `(from_new, to_new_pending)` commitments.
    #[allow(clippy::too_many_arguments)]
    fn verify_transfer_sent(
        asset_id: &[u8],
        sender_pk: &[u8; 32],
        receiver_pk: &[u8; 32],
        from_old_c: &[u8],
        to_old_c: &[u8],
        delta_ct_bytes: &[u8; 64],
        bundle: &[u8],
    ) -> Result<([u8; 32], [u8; 32]), Self::Error>;

    /// Verify the receiver side of a transfer (phase 2). Returns the
    /// recomputed `(avail_new, pending_new)` commitments.
    fn verify_transfer_received(
        asset_id: &[u8],
        receiver_pk: &[u8; 32],
        avail_old_c: &[u8],
        pending_old_c: &[u8],
        pending_commits: &[[u8; 32]],
        envelope: &[u8],
    ) -> Result<([u8; 32], [u8; 32]), Self::Error>;

    /// Verify a mint (public-to-confidential) proof. Returns the recomputed
    /// `(to_pending_new, total_new, minted_ciphertext)`.
    fn verify_mint(
        asset_id: &[u8],
        to_pk: &PublicKeyBytes,
        to_pending_old_c: &[u8],
        total_old_c: &[u8],
        proof: &[u8],
    ) -> Result<([u8; 32], [u8; 32], [u8; 64]), Self::Error>;

    /// Verify a burn (confidential-to-public) proof. Returns the recomputed
    /// `(from_new, total_new)` and the disclosed amount.
    fn verify_burn(
        asset_id: &[u8],
        from_pk: &PublicKeyBytes,
        from_avail_old_c: &[u8],
        total_old_c: &[u8],
        amount_ct: &EncryptedAmount,
        proof: &[u8],
    ) -> Result<([u8; 32], [u8; 32], u64), Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ciphertext_round_trips_through_bytes() {
        let g = RistrettoPoint::basepoint();
        let ct = Ciphertext { c: g, d: g.double() };
        let bytes = ct.to_bytes();
        let parsed = Ciphertext::from_bytes(&bytes).unwrap();
        assert!(bool::from(parsed.c.eq(&ct.c)));
        assert!(bool::from(parsed.d.eq(&ct.d)));
    }

    #[test]
    fn commitment_or_identity_accepts_empty_slice() {
        let p = commitment_or_identity(&[]).unwrap();
        assert!(bool::from(p.eq(&RistrettoPoint::identity())));
    }

    #[test]
    fn pad_or_trim_asset_id_is_zero_padded() {
        let padded = pad_or_trim_asset_id(&[1, 2, 3]);
        assert_eq!(&padded[0..3], &[1, 2, 3]);
        assert!(padded[3..].iter().all(|b| *b == 0));
    }
}
