// [libs/shared/vault/src/lib.rs]
/*!
 * =================================================================
 * APARATO: CREDENTIAL VAULT (V1.0 - GROUND ZERO)
 * CLASIFICACION: SHARED UTILITY (ESTRATO L4)
 * RESPONSABILIDAD: ENCRIPTACION Y DESENCRIPTACION DE CREDENCIALES DE VENDOR
 *
 * Implementa el contrato opaco `decrypt(blob) -> credentials` /
 * `encrypt(plaintext) -> blob` que la especificacion trata como caja
 * negra (§1, Out of Scope). El resto del sistema solo conoce el trait
 * `CredentialVault`; esta es una implementacion concreta de referencia
 * con AES-256-GCM y soporte de rotacion de llave (current + previous).
 * =================================================================
 */

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::RngCore;
use thiserror::Error;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VaultError {
    #[error("[VAULT_CONFIG_FAULT]: master key must be {KEY_LEN} bytes (64 hex chars), got {0}")]
    InvalidKeyLength(usize),
    #[error("[VAULT_CONFIG_FAULT]: master key is not valid hex")]
    InvalidKeyEncoding,
    #[error("[VAULT_DECRYPT_FAULT]: ciphertext is truncated or malformed")]
    MalformedCiphertext,
    #[error("[VAULT_DECRYPT_FAULT]: decryption failed under all configured keys")]
    DecryptionFailed,
    #[error("[VAULT_ENCRYPT_FAULT]: encryption failed")]
    EncryptionFailed,
    #[error("[VAULT_SELFTEST_FAULT]: round-trip self-test did not reproduce the plaintext")]
    SelfTestFailed,
}

/// Opaque contract the monitoring core depends on. Never logged,
/// never matched on by callers — they only ever see `Ok`/`Err`.
pub trait CredentialVault: Send + Sync {
    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, VaultError>;
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError>;
}

fn key_from_hex(hex_str: &str) -> Result<[u8; KEY_LEN], VaultError> {
    let bytes = hex::decode(hex_str).map_err(|_| VaultError::InvalidKeyEncoding)?;
    if bytes.len() != KEY_LEN {
        return Err(VaultError::InvalidKeyLength(bytes.len()));
    }
    let mut key = [0u8; KEY_LEN];
    key.copy_from_slice(&bytes);
    Ok(key)
}

/// AES-256-GCM backed vault keyed by `MASTER_KEY_CURRENT` and, during a
/// rotation window, `MASTER_KEY_PREVIOUS` (spec.md §6.1). Encryption
/// always uses the current key; decryption tries current first and
/// only falls back to previous on failure — never the other way round.
pub struct AesGcmVault {
    current_key: [u8; KEY_LEN],
    previous_key: Option<[u8; KEY_LEN]>,
}

impl AesGcmVault {
    pub fn new(current_hex: &str, previous_hex: Option<&str>) -> Result<Self, VaultError> {
        let current_key = key_from_hex(current_hex)?;
        let previous_key = previous_hex.map(key_from_hex).transpose()?;
        Ok(Self {
            current_key,
            previous_key,
        })
    }

    fn cipher_for(key_bytes: &[u8; KEY_LEN]) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key_bytes))
    }

    fn seal_with(&self, key_bytes: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = Self::cipher_for(key_bytes)
            .encrypt(nonce, plaintext)
            .map_err(|_| VaultError::EncryptionFailed)?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    fn open_with(key_bytes: &[u8; KEY_LEN], blob: &[u8]) -> Result<Vec<u8>, VaultError> {
        if blob.len() < NONCE_LEN {
            return Err(VaultError::MalformedCiphertext);
        }
        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        Self::cipher_for(key_bytes)
            .decrypt(nonce, ciphertext)
            .map_err(|_| VaultError::DecryptionFailed)
    }

    /// Startup self-test (spec.md §6.1): encrypt a canary plaintext
    /// with the current key and confirm it round-trips. Run once
    /// before the process accepts any poll work.
    pub fn self_test(&self) -> Result<(), VaultError> {
        const CANARY: &[u8] = b"solara-vault-self-test";
        let blob = self.seal_with(&self.current_key, CANARY)?;
        let recovered = Self::open_with(&self.current_key, &blob)?;
        if recovered != CANARY {
            return Err(VaultError::SelfTestFailed);
        }
        Ok(())
    }
}

impl CredentialVault for AesGcmVault {
    fn decrypt(&self, blob: &[u8]) -> Result<Vec<u8>, VaultError> {
        match Self::open_with(&self.current_key, blob) {
            Ok(plaintext) => Ok(plaintext),
            Err(_) => match &self.previous_key {
                Some(previous) => Self::open_with(previous, blob),
                None => Err(VaultError::DecryptionFailed),
            },
        }
    }

    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
        self.seal_with(&self.current_key, plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_key(fill: u8) -> String {
        hex::encode([fill; KEY_LEN])
    }

    #[test]
    fn round_trips_under_current_key() {
        let vault = AesGcmVault::new(&hex_key(0x11), None).unwrap();
        let blob = vault.encrypt(b"vendor-secret").unwrap();
        assert_eq!(vault.decrypt(&blob).unwrap(), b"vendor-secret");
    }

    #[test]
    fn falls_back_to_previous_key_only_after_current_fails() {
        let old_key = hex_key(0x22);
        let new_key = hex_key(0x33);

        let old_vault = AesGcmVault::new(&old_key, None).unwrap();
        let blob = old_vault.encrypt(b"rotated-secret").unwrap();

        let rotated_vault = AesGcmVault::new(&new_key, Some(&old_key)).unwrap();
        assert_eq!(rotated_vault.decrypt(&blob).unwrap(), b"rotated-secret");
    }

    #[test]
    fn rejects_wrong_key_length() {
        let short_hex = hex::encode([0u8; 16]);
        assert_eq!(
            AesGcmVault::new(&short_hex, None).unwrap_err(),
            VaultError::InvalidKeyLength(16)
        );
    }

    #[test]
    fn self_test_passes_for_a_well_formed_key() {
        let vault = AesGcmVault::new(&hex_key(0x44), None).unwrap();
        assert!(vault.self_test().is_ok());
    }
}
