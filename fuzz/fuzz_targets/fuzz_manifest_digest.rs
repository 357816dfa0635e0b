//! Fuzz target: manifest digesting and `ManifestDigest` round-trips.
//!
//! Verifies that arbitrary byte inputs always digest to valid hex
//! strings and that JSON serialization never panics.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trimgate_core::ManifestDigest;
use trimgate_runner::digest::digest_bytes;

fuzz_target!(|data: &[u8]| {
    let digest = digest_bytes(data);

    // Display must not panic and must produce 64 hex chars.
    let hex = digest.to_string();
    assert_eq!(hex.len(), 64, "ManifestDigest Display must produce 64 hex chars");

    // JSON round-trip must not panic.
    let json = serde_json::to_string(&digest).expect("ManifestDigest serialization must not fail");
    let back: ManifestDigest =
        serde_json::from_str(&json).expect("ManifestDigest deserialization must not fail");
    assert_eq!(back, digest);
});
