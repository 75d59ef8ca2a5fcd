//! Stable configuration fingerprints.
//!
//! Export runs log the fingerprint of the configuration snapshot they work
//! from. The serialization sorts object keys so two equal configurations
//! always produce the same text, however they were built.

use serde_json::Value;

use crate::posting::PostingConfig;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(FNV_PRIME)
    })
}

/// Compact JSON with object keys in lexicographic order.
pub fn stable_json(config: &PostingConfig) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(config)?;
    let mut out = String::new();
    write_sorted(&value, &mut out)?;
    Ok(out)
}

fn write_sorted(value: &Value, out: &mut String) -> Result<(), serde_json::Error> {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::to_string(key)?);
                out.push(':');
                if let Some(v) = map.get(key.as_str()) {
                    write_sorted(v, out)?;
                }
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_sorted(item, out)?;
            }
            out.push(']');
        }
        scalar => out.push_str(&serde_json::to_string(scalar)?),
    }
    Ok(())
}

/// Hex fingerprint of a configuration, e.g. `"9f3c0a51d2e4b788"`.
pub fn config_fingerprint(config: &PostingConfig) -> Result<String, serde_json::Error> {
    Ok(format!("{:016x}", fnv1a(stable_json(config)?.as_bytes())))
}
