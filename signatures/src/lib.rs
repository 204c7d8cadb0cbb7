//! Signature schemes built on the curve25519 family (spec.md §4.G):
//! standard Ed25519 (RFC 8032) and a non-standard Ristretto255+SHA3-512
//! Schnorr variant whose public key is `s^-1 * H` rather than `s * H`.

use curve25519::{constants, edwards::EdwardsPoint, montgomery::clamp_integer, RistrettoPoint, Scalar};
use subtle::Choice;
use zeroize::Zeroize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("public key bytes did not decode to a curve point")]
    InvalidPublicKey,
    #[error("signature's R component did not decode to a curve point")]
    InvalidSignatureR,
    #[error("signature verification equation did not hold")]
    VerificationFailed,
    #[error("secret key must be nonzero")]
    ZeroSecretKey,
}

/// Standard Ed25519 (RFC 8032). Deliberately permissive where the RFC
/// itself is silent or where widely-deployed implementations diverge from
/// a strict reading: `from_bytes` decoding of `R` and the public key
/// accepts non-canonical field element encodings rather than rejecting
/// them (spec.md §9 "mirror the accepting behavior" design note).
/// Verification rejects low-order public keys via the affine
/// `is_small_order` check and then compares `s*B` against `R + k*A`
/// directly, with no cofactor multiplication on either side.
pub mod ed25519 {
    use super::*;

    pub struct SigningKey {
        seed: [u8; 32],
    }

    pub struct ExpandedSigningKey {
        scalar: Scalar,
        prefix: [u8; 32],
        pub verifying_key: VerifyingKey,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct VerifyingKey {
        bytes: [u8; 32],
        point: EdwardsPoint,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Signature {
        pub r_bytes: [u8; 32],
        pub s_bytes: [u8; 32],
    }

    impl Signature {
        pub fn to_bytes(&self) -> [u8; 64] {
            let mut out = [0u8; 64];
            out[..32].copy_from_slice(&self.r_bytes);
            out[32..].copy_from_slice(&self.s_bytes);
            out
        }

        pub fn from_bytes(bytes: &[u8; 64]) -> Signature {
            let mut r = [0u8; 32];
            let mut s = [0u8; 32];
            r.copy_from_slice(&bytes[..32]);
            s.copy_from_slice(&bytes[32..]);
            Signature { r_bytes: r, s_bytes: s }
        }
    }

    impl SigningKey {
        pub fn from_seed(seed: [u8; 32]) -> Self {
            SigningKey { seed }
        }

        pub fn expand(&self) -> ExpandedSigningKey {
            let digest = hashing::sha512::hash(&self.seed);
            let mut scalar_bytes = [0u8; 32];
            scalar_bytes.copy_from_slice(&digest[..32]);
            let scalar_bytes = clamp_integer(scalar_bytes);
            let scalar = Scalar::from_bytes_mod_order(&scalar_bytes);

            let mut prefix = [0u8; 32];
            prefix.copy_from_slice(&digest[32..]);

            let point = constants::ed25519_basepoint().vartime_mul(&scalar);
            let verifying_key = VerifyingKey { bytes: point.compress(), point };

            ExpandedSigningKey { scalar, prefix, verifying_key }
        }

        pub fn verifying_key(&self) -> VerifyingKey {
            self.expand().verifying_key
        }
    }

    impl Drop for SigningKey {
        fn drop(&mut self) {
            self.seed.zeroize();
        }
    }

    impl ExpandedSigningKey {
        pub fn sign(&self, message: &[u8]) -> Signature {
            let mut r_hash_input = std::vec::Vec::with_capacity(32 + message.len());
            r_hash_input.extend_from_slice(&self.prefix);
            r_hash_input.extend_from_slice(message);
            let r_digest = hashing::sha512::hash(&r_hash_input);
            r_hash_input.zeroize();
            let r_scalar = Scalar::from_bytes_mod_order_wide(&r_digest);

            let r_point = constants::ed25519_basepoint().vartime_mul(&r_scalar);
            let r_bytes = r_point.compress();

            let k_digest = hashing::sha512::hash(&concat3(&r_bytes, &self.verifying_key.bytes, message));
            let k_scalar = Scalar::from_bytes_mod_order_wide(&k_digest);

            let s_scalar = k_scalar.muladd(&self.scalar, &r_scalar);

            Signature { r_bytes, s_bytes: s_scalar.to_bytes() }
        }
    }

    impl VerifyingKey {
        pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, SignatureError> {
            let point = EdwardsPoint::from_bytes(bytes).ok_or(SignatureError::InvalidPublicKey)?;
            Ok(VerifyingKey { bytes: *bytes, point })
        }

        pub fn to_bytes(&self) -> [u8; 32] {
            self.bytes
        }

        pub fn is_weak(&self) -> Choice {
            self.point.is_small_order()
        }

        pub fn verify(&self, message: &[u8], sig: &Signature) -> Result<(), SignatureError> {
            let r_point =
                EdwardsPoint::from_bytes(&sig.r_bytes).ok_or(SignatureError::InvalidSignatureR)?;
            let s_scalar = Scalar::from_bytes_mod_order(&sig.s_bytes);

            let k_digest = hashing::sha512::hash(&concat3(&sig.r_bytes, &self.bytes, message));
            let k_scalar = Scalar::from_bytes_mod_order_wide(&k_digest);

            if bool::from(self.point.is_small_order()) {
                return Err(SignatureError::VerificationFailed);
            }

            let lhs = constants::ed25519_basepoint().vartime_mul(&s_scalar);
            let rhs = r_point.add(&self.point.vartime_mul(&k_scalar));

            if bool::from(lhs.eq(&rhs)) {
                Ok(())
            } else {
                Err(SignatureError::VerificationFailed)
            }
        }
    }

    fn concat3(a: &[u8; 32], b: &[u8; 32], c: &[u8]) -> std::vec::Vec<u8> {
        let mut v = std::vec::Vec::with_capacity(64 + c.len());
        v.extend_from_slice(a);
        v.extend_from_slice(b);
        v.extend_from_slice(c);
        v
    }
}

/// A Schnorr signature over Ristretto255 with SHA3-512 challenges, where
/// the public key is `PK = priv^-1 * H` rather than the usual `priv * H`
/// (spec.md §4.G), `H` being the Pedersen blinding generator used
/// throughout the proof layer ([`pedersen_h`]).
///
/// Sign: random `k`; `r = k*H`; `e = SHA3-512(PK || message || r) mod L`;
/// `s = priv^-1*e + k`. The signature is the pair `(s, e)`, not `(r, s)`.
/// Verify recomputes `r = s*H - e*PK` (a 2-point MSM) and accepts iff a
/// freshly computed `e' = SHA3-512(PK || message || r)` equals `e`, in
/// constant time. This holds because
/// `s*H = (priv^-1*e + k)*H = e*(priv^-1*H) + k*H = e*PK + r`.
pub mod schnorr_ristretto {
    use super::*;
    use subtle::ConstantTimeEq;

    /// The Pedersen blinding generator `H`, derived the same way the rest
    /// of the proof layer derives it: hash-to-curve on a fixed domain
    /// string (spec.md §4 "Pedersen H generator" note).
    pub fn pedersen_h() -> RistrettoPoint {
        RistrettoPoint::hash_to_curve(b"Zether/PedersenH")
    }

    pub struct SigningKey {
        priv_scalar: Scalar,
        priv_inv: Scalar,
        pub public_key: RistrettoPoint,
    }

    #[derive(Clone, Copy)]
    pub struct Signature {
        pub s: [u8; 32],
        pub e: [u8; 32],
    }

    impl Signature {
        pub fn to_bytes(&self) -> [u8; 64] {
            let mut out = [0u8; 64];
            out[..32].copy_from_slice(&self.s);
            out[32..].copy_from_slice(&self.e);
            out
        }

        pub fn from_bytes(bytes: &[u8; 64]) -> Signature {
            let mut s = [0u8; 32];
            let mut e = [0u8; 32];
            s.copy_from_slice(&bytes[..32]);
            e.copy_from_slice(&bytes[32..]);
            Signature { s, e }
        }
    }

    impl SigningKey {
        pub fn new<R: rand_core::RngCore + rand_core::CryptoRng>(rng: &mut R) -> Result<Self, SignatureError> {
            let priv_scalar = Scalar::random(rng);
            if bool::from(priv_scalar.is_zero()) {
                return Err(SignatureError::ZeroSecretKey);
            }
            let priv_inv = priv_scalar.invert();
            let public_key = pedersen_h().vartime_mul(&priv_inv);
            Ok(SigningKey { priv_scalar, priv_inv, public_key })
        }

        pub fn sign<R: rand_core::RngCore + rand_core::CryptoRng>(
            &self,
            rng: &mut R,
            message: &[u8],
        ) -> Signature {
            let k = Scalar::random(rng);
            let r_point = pedersen_h().vartime_mul(&k);
            let r_bytes = r_point.compress();

            let e = challenge(&self.public_key.compress(), message, &r_bytes);
            let s = self.priv_inv.muladd(&e, &k);

            Signature { s: s.to_bytes(), e: e.to_bytes() }
        }
    }

    fn challenge(pk_bytes: &[u8; 32], message: &[u8], r_bytes: &[u8; 32]) -> Scalar {
        let mut input = std::vec::Vec::with_capacity(64 + message.len());
        input.extend_from_slice(pk_bytes);
        input.extend_from_slice(message);
        input.extend_from_slice(r_bytes);
        let digest = hashing::sha3_512::hash(&input);
        Scalar::from_bytes_mod_order_wide(&digest)
    }

    pub fn verify(public_key: &RistrettoPoint, message: &[u8], sig: &Signature) -> Result<(), SignatureError> {
        let s = curve25519::Scalar::from_bytes_mod_order(&sig.s);
        let e = curve25519::Scalar::from_bytes_mod_order(&sig.e);

        let r_point = pedersen_h().vartime_mul(&s).sub(&public_key.vartime_mul(&e));
        let r_bytes = r_point.compress();

        let e_prime = challenge(&public_key.compress(), message, &r_bytes);

        if bool::from(e.ct_eq(&e_prime)) {
            Ok(())
        } else {
            Err(SignatureError::VerificationFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn ed25519_sign_verify_round_trips() {
        let signing_key = ed25519::SigningKey::from_seed([7u8; 32]);
        let expanded = signing_key.expand();
        let verifying_key = expanded.verifying_key;

        let sig = expanded.sign(b"hello world");
        assert!(verifying_key.verify(b"hello world", &sig).is_ok());
        assert!(verifying_key.verify(b"tampered", &sig).is_err());
    }

    #[test]
    fn ed25519_known_answer_vector() {
        let seed = hex_literal::hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f6");
        let signing_key = ed25519::SigningKey::from_seed(seed);
        let verifying_key = signing_key.verifying_key();
        assert_eq!(
            verifying_key.to_bytes(),
            hex_literal::hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511")
        );
    }

    #[test]
    fn ed25519_known_answer_signature_bytes() {
        // RFC 8032 §7.1 test 1.
        let seed = hex_literal::hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f6");
        let signing_key = ed25519::SigningKey::from_seed(seed);
        let sig = signing_key.expand().sign(b"");

        let expected = hex_literal::hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
        assert_eq!(sig.r_bytes, expected[..32]);
        assert_eq!(sig.s_bytes, expected[32..]);
    }

    #[test]
    fn schnorr_ristretto_sign_verify_round_trips() {
        let mut rng = OsRng;
        let signing_key = schnorr_ristretto::SigningKey::new(&mut rng).unwrap();
        let sig = signing_key.sign(&mut rng, b"transfer 10 units");

        assert!(schnorr_ristretto::verify(&signing_key.public_key, b"transfer 10 units", &sig).is_ok());
        assert!(schnorr_ristretto::verify(&signing_key.public_key, b"transfer 11 units", &sig).is_err());
    }

    #[test]
    fn schnorr_ristretto_signature_bytes_round_trip() {
        let mut rng = OsRng;
        let signing_key = schnorr_ristretto::SigningKey::new(&mut rng).unwrap();
        let sig = signing_key.sign(&mut rng, b"msg");
        let decoded = schnorr_ristretto::Signature::from_bytes(&sig.to_bytes());
        assert_eq!(decoded.s, sig.s);
        assert_eq!(decoded.e, sig.e);
    }
}
