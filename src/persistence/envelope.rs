//! Versioned JSON envelope: `{"version": N, "payload": {...}}`

use anyhow::{Context, Result, bail};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Version written by this build
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    payload: &'a T,
}

/// Wrap `payload` in the current envelope
pub fn encode<T: Serialize>(payload: &T) -> Result<String> {
    serde_json::to_string(&EnvelopeRef {
        version: FORMAT_VERSION,
        payload,
    })
    .context("Failed to serialize profile")
}

/// Unwrap a blob written by this or an older build.
///
/// Blobs without an envelope predate versioning and are read as a bare payload.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T> {
    let mut value: serde_json::Value =
        serde_json::from_str(json).context("Profile blob is not valid JSON")?;

    if value.get("version").is_none() {
        return serde_json::from_value(value).context("Failed to read legacy profile");
    }
    let version = value["version"]
        .as_u64()
        .context("Profile version is not a number")?;
    if version > u64::from(FORMAT_VERSION) {
        bail!(
            "Profile version {} is newer than supported version {}",
            version,
            FORMAT_VERSION
        );
    }

    let payload = value
        .get_mut("payload")
        .map(serde_json::Value::take)
        .context("Profile envelope has no payload")?;
    serde_json::from_value(payload)
        .with_context(|| format!("Failed to read version {} profile", version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Blob {
        n: u32,
    }

    #[test]
    fn test_encode_writes_version() {
        let json = encode(&Blob { n: 3 }).unwrap();
        assert_eq!(json, r#"{"version":1,"payload":{"n":3}}"#);
        assert_eq!(decode::<Blob>(&json).unwrap(), Blob { n: 3 });
    }

    #[test]
    fn test_legacy_bare_payload() {
        assert_eq!(decode::<Blob>(r#"{"n":7}"#).unwrap(), Blob { n: 7 });
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = decode::<Blob>(r#"{"version":99,"payload":{"n":1}}"#).unwrap_err();
        assert!(err.to_string().contains("newer"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(decode::<Blob>("not json {").is_err());
        assert!(decode::<Blob>(r#"{"version":"one","payload":{}}"#).is_err());
        assert!(decode::<Blob>(r#"{"version":1}"#).is_err());
    }
}
