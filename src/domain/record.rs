use serde::{Deserialize, Serialize};

/// An accepted submission at rest: the business id plus the encrypted
/// canonical serialization (`hex(iv):hex(ciphertext)`).
///
/// Records are append-only and immutable once written. The set of stored
/// ids doubles as the dedup index.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct StoredRecord {
    pub id: String,
    pub ciphertext: String,
}
