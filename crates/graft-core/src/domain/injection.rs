//! Anchor-based text splicing.
//!
//! Pure string logic behind `InjectText`: no I/O, no knowledge of paths.
//! The applier reads the file, calls [`splice`] and writes the result back
//! only for [`SpliceOutcome::Spliced`].

use crate::domain::value_objects::{DuplicateGuard, InjectPosition};

/// Result of attempting to splice text next to an anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceOutcome {
    /// New file content. Every byte outside the inserted text is unchanged.
    Spliced(String),
    /// The guard found the text already applied; nothing to write.
    AlreadyPresent,
    /// The anchor does not occur in the content.
    AnchorMissing,
}

/// Insert `text` immediately before or after the first occurrence of `anchor`.
///
/// The anchor is checked first, so a file without the anchor (or an empty
/// anchor) is reported as [`SpliceOutcome::AnchorMissing`] regardless of the
/// guard. With [`DuplicateGuard::SkipIfPresent`] the text counts as applied
/// when [`already_applied`] finds it.
pub fn splice(
    content: &str,
    anchor: &str,
    position: InjectPosition,
    text: &str,
    guard: DuplicateGuard,
) -> SpliceOutcome {
    if anchor.is_empty() {
        return SpliceOutcome::AnchorMissing;
    }
    let Some(start) = content.find(anchor) else {
        return SpliceOutcome::AnchorMissing;
    };

    if guard == DuplicateGuard::SkipIfPresent && already_applied(content, text) {
        return SpliceOutcome::AlreadyPresent;
    }

    let at = match position {
        InjectPosition::Before => start,
        InjectPosition::After => start + anchor.len(),
    };

    let mut out = String::with_capacity(content.len() + text.len());
    out.push_str(&content[..at]);
    out.push_str(text);
    out.push_str(&content[at..]);
    SpliceOutcome::Spliced(out)
}

/// Whether `text` is already in `content`: verbatim, or as whole lines in
/// the same order with other lines in between.
///
/// The second form catches a block that a later injection has split, e.g. a
/// `before_action` line spliced in right below another one.
pub fn already_applied(content: &str, text: &str) -> bool {
    if content.contains(text) {
        return true;
    }

    let mut wanted = text.lines().map(str::trim).filter(|l| !l.is_empty()).peekable();
    if wanted.peek().is_none() {
        return false;
    }
    let mut lines = content.lines().map(str::trim);
    wanted.all(|line| lines.any(|have| have == line))
}
