// [libs/domain/models/src/credential.rs]
use crate::Brand;
use serde::{Deserialize, Serialize};

/// Encrypted vendor credential, unique per `(plant_id, brand)`. The
/// `encrypted_blob` is opaque to everything except `CredentialVault`
/// (spec.md §1 — vault is out of core scope, treated as a black box).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub plant_id: String,
    pub brand: Brand,
    pub encrypted_blob: Vec<u8>,
    pub key_version: u32,
}
