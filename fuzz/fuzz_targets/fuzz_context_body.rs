//! Fuzz target: JSON deserialization of `BuildContext`.
//!
//! Verifies that arbitrary byte sequences fed to the context-file
//! parser never cause panics, UB, or unbounded resource consumption.

#![no_main]

use libfuzzer_sys::fuzz_target;
use trimgate_core::BuildContext;

fuzz_target!(|data: &[u8]| {
    // Treat arbitrary bytes as a serialized context file.
    // We only care that this never panics; errors are expected and fine.
    if let Ok(context) = serde_json::from_slice::<BuildContext>(data) {
        // A parsed context must validate without panicking either way.
        let _ = context.validate();
    }
});
