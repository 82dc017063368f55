//! Person record type shared between the repository and the HTTP layer

use serde::{Deserialize, Serialize};

/// A single person record.
///
/// File-backed records take their 1-based CSV line number as `id`;
/// records added at runtime get their id assigned by the HTTP layer.
/// String fields default to empty so partial JSON bodies deserialize
/// without nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier within one snapshot of the combined record set
    #[serde(default)]
    pub id: i64,

    /// First name
    #[serde(default)]
    pub name: String,

    /// Last name
    #[serde(default)]
    pub lastname: String,

    /// Postal code
    #[serde(default)]
    pub zipcode: String,

    /// City of residence
    #[serde(default)]
    pub city: String,

    /// Color name resolved from the numeric code in the CSV source
    #[serde(default)]
    pub color: String,
}
