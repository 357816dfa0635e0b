//! Fuzz target: captured-output serialization.
//!
//! The tool's streams are arbitrary bytes; the base64 JSON form must
//! round-trip any of them without panicking or losing data.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trimgate_core::CapturedOutput;

fuzz_target!(|data: &[u8]| {
    let split = data.len() / 2;
    let output = CapturedOutput::new(data[..split].to_vec(), data[split..].to_vec());

    let json = serde_json::to_string(&output).expect("CapturedOutput serialization must not fail");
    let back: CapturedOutput =
        serde_json::from_str(&json).expect("CapturedOutput deserialization must not fail");
    assert_eq!(back, output, "base64 round trip must preserve stream bytes");
});
