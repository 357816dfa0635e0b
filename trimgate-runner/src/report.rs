//! Diagnostic rendering for completed jobs.
//!
//! The tool's output is treated as an opaque blob and passed through
//! verbatim; the report only frames it. For an apply that rewrote the
//! manifest, [`manifest_diff`] renders what changed.

use std::fmt::Write as _;

use trimgate_core::JobRecord;

/// Render a human-readable report for a completed job.
///
/// Intended for the pipeline log: status line first, then the captured
/// streams, each framed so tool output is clearly attributed.
#[must_use]
pub fn render(record: &JobRecord) -> String {
    let mut out = String::new();

    let verdict = if record.is_clean() { "clean" } else { "failed" };
    let _ = writeln!(
        out,
        "{} job {}: {} (exit {})",
        record.mode,
        record.job_id,
        verdict,
        record.exit_code()
    );
    let _ = writeln!(
        out,
        "manifest: {}",
        if record.manifest_mutated() {
            "rewritten"
        } else {
            "unchanged"
        }
    );
    let _ = writeln!(out, "elapsed: {}ms", record.duration.as_millis());

    if !record.output.stdout.is_empty() {
        let _ = writeln!(out, "---- tool stdout ----");
        let _ = writeln!(out, "{}", record.output.stdout_lossy().trim_end());
    }
    if !record.output.stderr.is_empty() {
        let _ = writeln!(out, "---- tool stderr ----");
        let _ = writeln!(out, "{}", record.output.stderr_lossy().trim_end());
    }

    out
}

/// Render a line diff of the manifest around a mutating job.
///
/// Returns `None` when the contents are identical. Removed lines carry
/// a `-` separator, added lines `+`, unchanged lines `|`.
#[must_use]
pub fn manifest_diff(before: &str, after: &str) -> Option<String> {
    let lines = diff::lines(before, after);
    let same = lines
        .iter()
        .all(|line| matches!(line, diff::Result::Both(_, _)));
    if same {
        return None;
    }

    let mut out = String::new();
    let mut line_num_before = 0usize;
    let mut line_num_after = 0usize;

    for line in lines {
        let (sep, content, num_before, num_after) = match line {
            diff::Result::Left(l) => {
                line_num_before += 1;
                ('-', l, Some(line_num_before), None)
            }
            diff::Result::Both(l, _) => {
                line_num_before += 1;
                line_num_after += 1;
                ('|', l, Some(line_num_before), Some(line_num_after))
            }
            diff::Result::Right(r) => {
                line_num_after += 1;
                ('+', r, None, Some(line_num_after))
            }
        };

        let _ = writeln!(
            out,
            "  {}  {} {sep} {content}",
            display_num(num_before),
            display_num(num_after)
        );
    }

    Some(out)
}

fn display_num(num: Option<usize>) -> String {
    match num {
        Some(num) => format!("{num:>4}"),
        None => " ".repeat(4),
    }
}
