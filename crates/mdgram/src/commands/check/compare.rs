//! Expected/actual HTML comparison.

/// Outcome of one comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Passed,
    Failed,
}

impl Status {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        }
    }

    pub(crate) fn is_passed(self) -> bool {
        self == Self::Passed
    }
}

/// One line of a line-by-line diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DiffLine {
    Unchanged(String),
    Removed(String),
    Added(String),
}

/// Comparison result with the diff of a failed comparison.
#[derive(Debug)]
pub(crate) struct Comparison {
    pub(crate) status: Status,
    /// Empty when the comparison passed.
    pub(crate) diff: Vec<DiffLine>,
}

/// Collapse every whitespace run to one space and trim the ends.
///
/// Whitespace between two tags is dropped entirely, so block elements
/// separated by newlines compare equal to the same elements written back to
/// back.
pub(crate) fn normalize_whitespace(html: &str) -> String {
    let mut normalized = String::with_capacity(html.len());
    for word in html.split_whitespace() {
        if !normalized.is_empty() && !(normalized.ends_with('>') && word.starts_with('<')) {
            normalized.push(' ');
        }
        normalized.push_str(word);
    }
    normalized
}

/// Compare HTML ignoring whitespace differences.
///
/// On mismatch, lines are paired by position: equal pairs are kept as
/// context, differing pairs become a removal followed by an addition.
pub(crate) fn compare(expected: &str, actual: &str) -> Comparison {
    if normalize_whitespace(expected) == normalize_whitespace(actual) {
        return Comparison {
            status: Status::Passed,
            diff: Vec::new(),
        };
    }

    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let len = expected_lines.len().max(actual_lines.len());

    let mut diff = Vec::with_capacity(len);
    for i in 0..len {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(exp), Some(act)) if exp == act => diff.push(DiffLine::Unchanged((*exp).to_owned())),
            (exp, act) => {
                if let Some(exp) = exp {
                    diff.push(DiffLine::Removed((*exp).to_owned()));
                }
                if let Some(act) = act {
                    diff.push(DiffLine::Added((*act).to_owned()));
                }
            }
        }
    }

    Comparison {
        status: Status::Failed,
        diff,
    }
}
