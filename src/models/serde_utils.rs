//! Serde helpers shared by the patch payloads.

use serde::{Deserialize, Deserializer};

/// Deserialize `Option<Option<T>>` so a patch can tell a missing field from an explicit `null`.
///
/// - Missing field → `None` (requires `#[serde(default)]` on the field)
/// - Field is `null` → `Some(None)`
/// - Field has value → `Some(Some(value))`
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
