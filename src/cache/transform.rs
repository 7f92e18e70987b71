//! Transform Module
//!
//! Serialization round trip applied to values before storage, plus size
//! accounting. This normalizes values; it does not shrink them.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

// == Encoded Size ==
/// Returns the size in bytes of the value's JSON serialization.
pub fn encoded_size<T: Serialize>(value: &T) -> Result<usize> {
    Ok(serde_json::to_vec(value)?.len())
}

// == Normalize ==
/// Round-trips a value through its JSON text form.
///
/// Returns the rebuilt value and the size of the intermediate text when
/// itself encoded as a JSON string, which is never smaller than
/// [`encoded_size`] of the original.
pub fn normalize<T>(value: &T) -> Result<(T, usize)>
where
    T: Serialize + DeserializeOwned,
{
    let text = serde_json::to_string(value)?;
    let size = encoded_size(&text)?;
    let rebuilt = serde_json::from_str(&text)?;
    Ok((rebuilt, size))
}
