//! AES-256-CBC encryption for records at rest.
//!
//! Each call to [`Cipher::encrypt`] draws a fresh random IV, so encrypting
//! the same plaintext twice yields different sealed strings. The sealed
//! format is `hex(iv) + ":" + hex(ciphertext)`.
//!
//! The key is re-read from its source on every operation and is validated
//! lazily: a missing or wrong-length key fails the call that needed it,
//! never process startup.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use rand::rngs::OsRng;
use std::fmt;

use crate::error::{IntakeError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Required key length in bytes (32 ASCII characters).
pub const KEY_LENGTH: usize = 32;

/// CBC initialization vector length in bytes.
pub const IV_LENGTH: usize = 16;

/// Where the encryption secret comes from.
///
/// `Env` re-reads the variable on every operation; the secret is never
/// cached. `Fixed` carries an explicit secret, used by tests and embedders.
#[derive(Clone)]
pub enum KeySource {
    Env(String),
    Fixed(String),
}

impl KeySource {
    fn resolve(&self) -> Result<[u8; KEY_LENGTH]> {
        let key = match self {
            Self::Env(var) => std::env::var(var).map_err(|_| {
                IntakeError::Configuration(format!(
                    "{var} is not set; it must be a 32-character string"
                ))
            })?,
            Self::Fixed(key) => key.clone(),
        };

        key.into_bytes().try_into().map_err(|_| {
            IntakeError::Configuration("encryption key must be exactly 32 bytes long".to_string())
        })
    }
}

// Never print the secret itself.
impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(var) => f.debug_tuple("Env").field(var).finish(),
            Self::Fixed(_) => f.debug_tuple("Fixed").field(&"<redacted>").finish(),
        }
    }
}

/// Symmetric cipher protecting stored records.
#[derive(Debug, Clone)]
pub struct Cipher {
    key: KeySource,
}

impl Cipher {
    pub fn new(key: KeySource) -> Self {
        Self { key }
    }

    /// Encrypts `plaintext` under a fresh random IV.
    ///
    /// Returns `hex(iv):hex(ciphertext)`. Two calls on identical plaintext
    /// produce different outputs.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let key = self.key.resolve()?;

        let mut iv = [0u8; IV_LENGTH];
        OsRng.fill_bytes(&mut iv);

        let ciphertext = Aes256CbcEnc::new(&key.into(), &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        Ok(format!("{}:{}", hex::encode(iv), hex::encode(ciphertext)))
    }

    /// Reverses [`Cipher::encrypt`].
    ///
    /// Fails with a decryption error when the sealed format is malformed
    /// or the key/ciphertext pairing is invalid (padding check fails).
    pub fn decrypt(&self, sealed: &str) -> Result<String> {
        let key = self.key.resolve()?;

        let parts: Vec<&str> = sealed.split(':').collect();
        let [iv_hex, ciphertext_hex] = parts.as_slice() else {
            return Err(IntakeError::Decryption("malformed sealed payload"));
        };

        let iv: [u8; IV_LENGTH] = hex::decode(iv_hex)
            .map_err(|_| IntakeError::Decryption("invalid IV encoding"))?
            .try_into()
            .map_err(|_| IntakeError::Decryption("invalid IV length"))?;

        let ciphertext = hex::decode(ciphertext_hex)
            .map_err(|_| IntakeError::Decryption("invalid ciphertext encoding"))?;
        if ciphertext.is_empty() || ciphertext.len() % IV_LENGTH != 0 {
            return Err(IntakeError::Decryption("invalid ciphertext length"));
        }

        let plaintext = Aes256CbcDec::new(&key.into(), &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)
            .map_err(|_| IntakeError::Decryption("wrong key or corrupted ciphertext"))?;

        String::from_utf8(plaintext).map_err(|_| IntakeError::Decryption("plaintext is not UTF-8"))
    }
}

/// Truncated form of a sealed payload, safe for diagnostics.
pub fn preview(sealed: &str) -> &str {
    sealed.get(..24).unwrap_or(sealed)
}
