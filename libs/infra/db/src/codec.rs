// [libs/infra/db/src/codec.rs]
/*!
 * SCREAMING_SNAKE_CASE/UPPERCASE text columns for the small closed
 * enums (`Brand`, `Status`, `AlertType`, ...) are encoded/decoded
 * through their existing `serde` impls rather than hand-written
 * `FromStr`/`Display` pairs, so the wire format in the database always
 * matches whatever the domain crate's `#[serde(rename_all = ...)]`
 * says — one source of truth, not two.
 */

use crate::errors::DbError;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn to_text<T: Serialize>(value: &T) -> Result<String, DbError> {
    match serde_json::to_value(value).map_err(|e| DbError::MappingError(e.to_string()))? {
        serde_json::Value::String(s) => Ok(s),
        other => Err(DbError::MappingError(format!(
            "expected a string-encodable enum, got {other}"
        ))),
    }
}

pub fn from_text<T: DeserializeOwned>(text: &str) -> Result<T, DbError> {
    serde_json::from_value(serde_json::Value::String(text.to_string()))
        .map_err(|e| DbError::MappingError(format!("{text}: {e}")))
}
