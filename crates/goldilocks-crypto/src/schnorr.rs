//! Schnorr signatures over ECgFp5 with a Poseidon2 challenge.
//!
//! For a private scalar `sk`, the public key is `encode(G * sk)`. A message
//! is a single `Fp5` (usually a transaction hash). Signing draws a nonce
//! `k`, commits to `r = encode(G * k)`, derives the challenge
//! `e = Scalar::from_fp5(hash_to_fp5(r || m))` and answers `s = k - e * sk`.
//!
//! A nonce must never be reused across two messages: the private key falls
//! out of the two responses. [`sign_hashed_message`] always draws a fresh one.

use std::fmt;

use rand::{CryptoRng, RngCore};

use crate::curve::ECPoint;
use crate::error::{expect_len, Error, Result};
use crate::field::{Fp, Fp5};
use crate::poseidon2::hash_to_fp5;
use crate::scalar::Scalar;

/// Signature as the pair (s, e).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    pub s: Scalar,
    pub e: Scalar,
}

impl Signature {
    /// Wire size: s then e, 40 little-endian bytes each.
    pub const BYTES: usize = 80;

    pub fn to_bytes(&self) -> [u8; 80] {
        let mut out = [0u8; 80];
        out[..40].copy_from_slice(&self.s.to_bytes_le());
        out[40..].copy_from_slice(&self.e.to_bytes_le());
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        expect_len(bytes, Self::BYTES)?;
        Ok(Self {
            s: Scalar::from_bytes_le(&bytes[..40])?,
            e: Scalar::from_bytes_le(&bytes[40..])?,
        })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

fn challenge(r: &Fp5, message: &Fp5) -> Scalar {
    let mut input = [Fp::ZERO; 10];
    input[..5].copy_from_slice(r.coeffs());
    input[5..].copy_from_slice(message.coeffs());
    Scalar::from_fp5(&hash_to_fp5(&input))
}

/// Public key for a private scalar.
pub fn public_key(private_key: &Scalar) -> Fp5 {
    ECPoint::mul_generator(private_key).encode()
}

/// Sign with a caller-supplied nonce. Reusing `nonce` leaks the key.
pub fn sign_with_nonce(private_key: &Scalar, message: &Fp5, nonce: &Scalar) -> Signature {
    let r = ECPoint::mul_generator(nonce).encode();
    let e = challenge(&r, message);
    let s = *nonce - e * *private_key;
    Signature { s, e }
}

/// Sign a hashed message with a fresh nonce from `rng`.
pub fn sign_hashed_message<R: RngCore + CryptoRng>(
    private_key: &Scalar,
    message: &Fp5,
    rng: &mut R,
) -> Signature {
    let nonce = Scalar::random(rng);
    sign_with_nonce(private_key, message, &nonce)
}

/// Sign a 40-byte little-endian `Fp5` message blob.
pub fn sign_message<R: RngCore + CryptoRng>(
    private_key: &Scalar,
    message: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    let message = Fp5::from_bytes_le(message)?;
    Ok(sign_hashed_message(private_key, &message, rng))
}

/// Check a signature. Returns false for public keys that do not decode.
pub fn verify(public_key: &Fp5, message: &Fp5, signature: &Signature) -> bool {
    let Ok(pk) = ECPoint::decode(public_key) else {
        return false;
    };
    let r = ECPoint::mul_generator(&signature.s).add(&pk.mul(&signature.e));
    challenge(&r.encode(), message) == signature.e
}

/// [`verify`] as a `Result`, for use with `?`.
pub fn verify_strict(public_key: &Fp5, message: &Fp5, signature: &Signature) -> Result<()> {
    if verify(public_key, message, signature) {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// A private scalar together with its public key.
#[derive(Clone)]
pub struct SigningKey {
    secret: Scalar,
    public: Fp5,
}

impl SigningKey {
    pub fn new(secret: Scalar) -> Self {
        let public = public_key(&secret);
        Self { secret, public }
    }

    /// Parse a 40-byte little-endian hex key, optionally prefixed with `0x`.
    pub fn from_hex(key: &str) -> Result<Self> {
        Ok(Self::new(Scalar::from_hex(key)?))
    }

    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self::new(Scalar::random(rng))
    }

    pub fn public_key(&self) -> Fp5 {
        self.public
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.to_bytes_le())
    }

    pub fn sign<R: RngCore + CryptoRng>(&self, message: &Fp5, rng: &mut R) -> Signature {
        sign_hashed_message(&self.secret, message, rng)
    }

    /// Sign with the thread-local CSPRNG.
    pub fn sign_random(&self, message: &Fp5) -> Signature {
        self.sign(message, &mut rand::thread_rng())
    }

    pub fn verify(&self, message: &Fp5, signature: &Signature) -> bool {
        verify(&self.public, message, signature)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never expose the private scalar
        f.debug_struct("SigningKey")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Well-known test key, never use with real funds
    const TEST_PRIVATE_KEY: &str =
        "ed636277f3753b6c0275f7a28c2678a7f3a95655e09deaebec15179b50c5da7f903152e50f594f7b";
    const TEST_PUBLIC_KEY: &str =
        "4906f4118ebe51b5ecdfcbd4a1ec7a4120e9c9590fe27b70f63ce627a975ed970a5d6dbbe5f32cd9";

    fn message() -> Fp5 {
        Fp5::from_u64_array([1, 2, 3, 4, 5])
    }

    #[test]
    fn test_public_key_known_answer() {
        let key = SigningKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        assert_eq!(key.public_key_hex(), TEST_PUBLIC_KEY);
    }

    #[test]
    fn test_sign_and_verify() {
        let mut rng = StdRng::seed_from_u64(21);
        let key = SigningKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        let sig = key.sign(&message(), &mut rng);

        assert!(key.verify(&message(), &sig));
        assert!(verify_strict(&key.public_key(), &message(), &sig).is_ok());
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let mut rng = StdRng::seed_from_u64(22);
        let key = SigningKey::random(&mut rng);
        let sig = key.sign(&message(), &mut rng);

        let other_message = Fp5::from_u64_array([1, 2, 3, 4, 6]);
        assert!(!key.verify(&other_message, &sig));

        let bumped_s = Signature {
            s: sig.s + Scalar::ONE,
            e: sig.e,
        };
        assert!(!key.verify(&message(), &bumped_s));

        let bumped_e = Signature {
            s: sig.s,
            e: sig.e + Scalar::ONE,
        };
        assert_eq!(
            verify_strict(&key.public_key(), &message(), &bumped_e),
            Err(Error::InvalidSignature)
        );

        let other_key = SigningKey::random(&mut rng);
        assert!(!other_key.verify(&message(), &sig));
    }

    #[test]
    fn test_undecodable_public_key_rejected() {
        let mut rng = StdRng::seed_from_u64(23);
        let key = SigningKey::random(&mut rng);
        let sig = key.sign(&message(), &mut rng);
        // w = 1 encodes no group element
        assert!(!verify(&Fp5::ONE, &message(), &sig));
    }

    #[test]
    fn test_signing_is_randomized() {
        let mut rng = StdRng::seed_from_u64(24);
        let key = SigningKey::random(&mut rng);
        let a = key.sign(&message(), &mut rng);
        let b = key.sign(&message(), &mut rng);
        assert_ne!(a, b);
        assert!(key.verify(&message(), &a));
        assert!(key.verify(&message(), &b));
    }

    #[test]
    fn test_fixed_nonce_is_deterministic() {
        let sk = Scalar::from_hex(TEST_PRIVATE_KEY).unwrap();
        let nonce = Scalar::from_u64(987654321);
        let a = sign_with_nonce(&sk, &message(), &nonce);
        let b = sign_with_nonce(&sk, &message(), &nonce);
        assert_eq!(a, b);

        let r = ECPoint::mul_generator(&nonce).encode();
        assert_eq!(a.e, challenge(&r, &message()));
        assert_eq!(a.s + a.e * sk, nonce);
    }

    #[test]
    fn test_signature_bytes() {
        let mut rng = StdRng::seed_from_u64(25);
        let key = SigningKey::random(&mut rng);
        let sig = key.sign(&message(), &mut rng);

        let bytes = sig.to_bytes();
        assert_eq!(&bytes[..40], &sig.s.to_bytes_le());
        assert_eq!(&bytes[40..], &sig.e.to_bytes_le());
        assert_eq!(Signature::from_bytes(&bytes).unwrap(), sig);
        assert_eq!(sig.to_hex().len(), 160);

        assert!(matches!(
            Signature::from_bytes(&bytes[..79]),
            Err(Error::Length {
                expected: 80,
                actual: 79
            })
        ));
    }

    #[test]
    fn test_sign_message_bytes() {
        let mut rng = StdRng::seed_from_u64(26);
        let sk = Scalar::random(&mut rng);
        let blob = message().to_bytes_le();
        let sig = sign_message(&sk, &blob, &mut rng).unwrap();
        assert!(verify(&public_key(&sk), &message(), &sig));

        assert!(sign_message(&sk, &blob[..39], &mut rng).is_err());
    }

    #[test]
    fn test_debug_does_not_expose_key() {
        let key = SigningKey::from_hex(TEST_PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", key);

        assert!(debug_str.contains("SigningKey"));
        assert!(debug_str.contains(TEST_PUBLIC_KEY));
        assert!(!debug_str.contains("ed636277f3753b6c"));
    }
}
