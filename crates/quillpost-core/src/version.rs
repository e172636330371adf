use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version {input:?}: {reason}")]
pub struct InvalidVersionError {
    pub input: String,
    pub reason: &'static str,
}

impl InvalidVersionError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A dotted numeric version such as `1.4.0` or `v2.1`.
///
/// Comparison treats missing trailing segments as zero, so `2.1` and `2.1.0`
/// are equal.
#[derive(Debug, Clone)]
pub struct DottedVersion {
    segments: Vec<u64>,
}

impl DottedVersion {
    /// Parse a version, tolerating a single leading non-digit marker (`v1.2`).
    ///
    /// # Errors
    /// Returns an error when the remainder is empty or any dot-separated
    /// segment is not made entirely of ASCII digits.
    pub fn parse(input: &str) -> Result<Self, InvalidVersionError> {
        let trimmed = input.trim();
        let mut chars = trimmed.chars();
        let core = match chars.next() {
            Some(first) if !first.is_ascii_digit() => chars.as_str(),
            Some(_) => trimmed,
            None => return Err(InvalidVersionError::new(input, "version is empty")),
        };

        let segments = core
            .split('.')
            .map(|segment| {
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(InvalidVersionError::new(
                        input,
                        "segments must be non-negative integers",
                    ));
                }
                segment
                    .parse::<u64>()
                    .map_err(|_| InvalidVersionError::new(input, "segment is too large"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    #[must_use]
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for DottedVersion {
    type Err = InvalidVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DottedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl Ord for DottedVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|index| self.segment(index).cmp(&other.segment(index)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for DottedVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DottedVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DottedVersion {}

/// Whether `candidate` is strictly newer than `current`.
///
/// Unparseable input on either side never counts as an update.
#[must_use]
pub fn is_newer(current: &str, candidate: &str) -> bool {
    compare_strict(current, candidate).unwrap_or(false)
}

/// Like [`is_newer`], but reports which side failed to parse.
///
/// # Errors
/// Returns the parse error of `current` first, then of `candidate`.
pub fn compare_strict(current: &str, candidate: &str) -> Result<bool, InvalidVersionError> {
    let current = DottedVersion::parse(current)?;
    let candidate = DottedVersion::parse(candidate)?;
    Ok(candidate > current)
}
