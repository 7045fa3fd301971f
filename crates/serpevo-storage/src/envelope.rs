use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// What a checkpoint file contains.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Individual,
    Population,
}

/// A record could not be written.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SaveError {
    #[display("failed to serialize record")]
    Serialize(serde_json::Error),
    #[display("failed to write record")]
    Io(io::Error),
}

/// A record could not be read back.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LoadError {
    /// The file does not exist.
    #[display("no record found")]
    NotFound,
    /// The file exists but is not a valid envelope, fails its checksum, or
    /// carries a payload that no longer matches the record schema.
    #[display("record is corrupt")]
    Corrupt,
    /// The envelope is intact but holds a different kind of record.
    #[display("expected a {expected} record, found {found}")]
    WrongKind {
        expected: RecordKind,
        found: RecordKind,
    },
    /// The file could not be read at all.
    #[display("failed to read record")]
    Io(io::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    kind: RecordKind,
    checksum: String,
    payload: serde_json::Value,
}

/// FNV-1a 64-bit hash, hex encoded. `DefaultHasher` is not stable across
/// releases, so checkpoints hash with a fixed algorithm instead.
fn checksum(payload: &str) -> String {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for byte in payload.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    format!("{hash:016x}")
}

/// Serializes `record` into an envelope of the given kind at `path`.
pub(crate) fn save<T>(path: &Path, kind: RecordKind, record: &T) -> Result<(), SaveError>
where
    T: Serialize,
{
    let payload = serde_json::to_value(record)?;
    let canonical = serde_json::to_string(&payload)?;
    let envelope = Envelope {
        kind,
        checksum: checksum(&canonical),
        payload,
    };
    fs::write(path, serde_json::to_string_pretty(&envelope)?)?;
    Ok(())
}

/// Reads an envelope of the expected kind back from `path`.
pub(crate) fn load<T>(path: &Path, expected: RecordKind) -> Result<T, LoadError>
where
    T: DeserializeOwned,
{
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(e),
    })?;
    let envelope: Envelope = serde_json::from_str(&text).map_err(|_| LoadError::Corrupt)?;
    if envelope.kind != expected {
        return Err(LoadError::WrongKind {
            expected,
            found: envelope.kind,
        });
    }
    let canonical = serde_json::to_string(&envelope.payload).map_err(|_| LoadError::Corrupt)?;
    if checksum(&canonical) != envelope.checksum {
        return Err(LoadError::Corrupt);
    }
    serde_json::from_value(envelope.payload).map_err(|_| LoadError::Corrupt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_stable() {
        // FNV-1a 64 reference value
        assert_eq!(checksum(""), "cbf29ce484222325");
        assert_eq!(checksum("a"), "af63dc4c8601ec8c");
    }

    #[test]
    fn test_kind_parses_from_str() {
        assert_eq!(
            "population".parse::<RecordKind>().unwrap(),
            RecordKind::Population
        );
        assert!("model".parse::<RecordKind>().is_err());
    }
}
