//! Fuzz target: per-mode command derivation.
//!
//! Feeds arbitrary build flags through job derivation and checks the
//! mode invariant: the dry-run flag appears exactly when the mode is
//! DryRun, regardless of what the flags contain.

#![no_main]

use std::path::PathBuf;
use std::sync::Arc;

use libfuzzer_sys::fuzz_target;
use trimgate_core::{ArtifactStash, BuildContext, CheckerJob, Mode, ToolSpec};

fuzz_target!(|data: &[u8]| {
    let flags: Vec<String> = String::from_utf8_lossy(data)
        .lines()
        .map(str::to_owned)
        .collect();

    let context = Arc::new(
        BuildContext::new(PathBuf::from("/tmp/fuzz-project"))
            .with_artifacts(ArtifactStash::new("/tmp/fuzz-artifacts"))
            .with_build_flags(flags.clone()),
    );

    for mode in [Mode::DryRun, Mode::Apply] {
        let job = CheckerJob::derive(Arc::clone(&context), mode, ToolSpec::cargo_diet());

        // Derivation must preserve the base args at the front.
        assert_eq!(job.command.args.first().map(String::as_str), Some("diet"));

        // The dry-run flag sits directly after the base args in DryRun
        // mode and is never inserted in Apply mode, even when the
        // context flags themselves contain "--dry-run".
        match mode {
            Mode::DryRun => {
                assert_eq!(job.command.args.get(1).map(String::as_str), Some("--dry-run"));
                assert_eq!(job.command.args.len(), 2 + flags.len());
            }
            Mode::Apply => {
                assert_eq!(job.command.args.len(), 1 + flags.len());
            }
        }

        // Context flags ride at the tail, verbatim and in order.
        let tail_start = job.command.args.len() - flags.len();
        assert_eq!(&job.command.args[tail_start..], flags.as_slice());

        // Display must never panic.
        let _ = job.command.to_string();
    }
});
