//! Diff reporting.
//!
//! Either echoes a single plaintext or renders a unified line diff between
//! a comparison plaintext (the "from" side) and a primary plaintext (the
//! "to" side). Rendering is deterministic: no timestamps, hunks in file
//! order.

use std::fmt;

use serde::Deserialize;
use similar::{ChangeTag, TextDiff};
use tracing::debug;

use crate::core::constants;
use crate::core::vault::Plaintext;

/// Line matching strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Minimal edit script (default).
    #[default]
    Myers,
    /// Anchors on unique lines; not always minimal.
    Patience,
    /// Classic longest common subsequence.
    Lcs,
}

impl From<DiffAlgorithm> for similar::Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => similar::Algorithm::Myers,
            DiffAlgorithm::Patience => similar::Algorithm::Patience,
            DiffAlgorithm::Lcs => similar::Algorithm::Lcs,
        }
    }
}

/// Role of a line inside a hunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTag {
    Context,
    Removed,
    Added,
}

impl LineTag {
    fn sign(self) -> char {
        match self {
            Self::Context => ' ',
            Self::Removed => '-',
            Self::Added => '+',
        }
    }
}

/// One line of a hunk, without its line terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffLine {
    pub tag: LineTag,
    pub text: String,
    /// The source line had no trailing newline (last line of the file).
    pub missing_newline: bool,
}

/// A line range: zero-based start and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkRange {
    pub start: usize,
    pub len: usize,
}

impl fmt::Display for HunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len {
            1 => write!(f, "{}", self.start + 1),
            // an empty range names the line before it
            0 => write!(f, "{},0", self.start),
            len => write!(f, "{},{}", self.start + 1, len),
        }
    }
}

/// A group of changes with surrounding context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    pub old: HunkRange,
    pub new: HunkRange,
    pub lines: Vec<DiffLine>,
}

impl fmt::Display for Hunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@@ -{} +{} @@", self.old, self.new)?;
        for line in &self.lines {
            writeln!(f, "{}{}", line.tag.sign(), line.text)?;
            if line.missing_newline {
                writeln!(f, "\\ No newline at end of file")?;
            }
        }
        Ok(())
    }
}

/// A unified diff with `from`/`to` file labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnifiedDiff {
    pub from: String,
    pub to: String,
    pub hunks: Vec<Hunk>,
}

impl UnifiedDiff {
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

impl fmt::Display for UnifiedDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }
        writeln!(f, "--- {}", self.from)?;
        writeln!(f, "+++ {}", self.to)?;
        for hunk in &self.hunks {
            write!(f, "{}", hunk)?;
        }
        Ok(())
    }
}

/// What the secrets command prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffResult {
    /// A single plaintext, verbatim.
    Plaintext(String),
    /// A comparison between two plaintexts.
    Unified(UnifiedDiff),
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plaintext(text) => f.write_str(text),
            Self::Unified(diff) => write!(f, "{}", diff),
        }
    }
}

/// Builds [`DiffResult`]s.
#[derive(Debug, Clone, Copy)]
pub struct DiffReporter {
    context: usize,
    algorithm: DiffAlgorithm,
}

impl Default for DiffReporter {
    fn default() -> Self {
        Self::new(constants::DIFF_CONTEXT, DiffAlgorithm::default())
    }
}

impl DiffReporter {
    pub fn new(context: usize, algorithm: DiffAlgorithm) -> Self {
        Self { context, algorithm }
    }

    /// Echo `primary`, or diff it against `comparison`.
    ///
    /// The comparison is the "from" side and the primary the "to" side;
    /// each header reads `<reference>:<path>`.
    pub fn report(&self, primary: Plaintext, comparison: Option<Plaintext>) -> DiffResult {
        match comparison {
            None => DiffResult::Plaintext(primary.text),
            Some(comparison) => DiffResult::Unified(self.unified(&comparison, &primary)),
        }
    }

    fn unified(&self, from: &Plaintext, to: &Plaintext) -> UnifiedDiff {
        let diff = TextDiff::configure()
            .algorithm(self.algorithm.into())
            .diff_lines(from.text.as_str(), to.text.as_str());

        let hunks: Vec<Hunk> = diff
            .grouped_ops(self.context)
            .iter()
            .map(|group| {
                let (first, last) = (&group[0], &group[group.len() - 1]);
                let old = first.old_range().start..last.old_range().end;
                let new = first.new_range().start..last.new_range().end;

                let lines = group
                    .iter()
                    .flat_map(|op| diff.iter_changes(op))
                    .map(|change| {
                        let value = change.value();
                        let tag = match change.tag() {
                            ChangeTag::Equal => LineTag::Context,
                            ChangeTag::Delete => LineTag::Removed,
                            ChangeTag::Insert => LineTag::Added,
                        };
                        DiffLine {
                            tag,
                            text: value.strip_suffix('\n').unwrap_or(value).to_string(),
                            missing_newline: !value.ends_with('\n'),
                        }
                    })
                    .collect();

                Hunk {
                    old: HunkRange {
                        start: old.start,
                        len: old.len(),
                    },
                    new: HunkRange {
                        start: new.start,
                        len: new.len(),
                    },
                    lines,
                }
            })
            .collect();

        debug!(
            from = %from.origin,
            to = %to.origin,
            hunks = hunks.len(),
            "computed diff"
        );

        UnifiedDiff {
            from: from.origin.to_string(),
            to: to.origin.to_string(),
            hunks,
        }
    }
}
