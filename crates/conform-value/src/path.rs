use core::fmt::{self, Display};
use core::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::prelude_internal::*;

/// An address inside a nested [`Value`]. The empty path is the root.
///
/// Paths are values: `extend_key`, `extend_index` and `concat` return a new
/// path and never touch the receiver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Plural)]
pub struct Path(pub Vec<PathSegment>);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Map key
    Key(String),
    /// Array element index
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("invalid path string: {0:?}")]
    InvalidPath(String),
}

impl Path {
    /// Create an empty path representing the root
    pub fn root() -> Self {
        Path(Vec::new())
    }

    /// Check if this is the root path
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn extend_key(&self, key: impl Into<String>) -> Self {
        self.extend(PathSegment::Key(key.into()))
    }

    pub fn extend_index(&self, index: usize) -> Self {
        self.extend(PathSegment::Index(index))
    }

    pub fn concat(&self, other: &Path) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + other.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&other.0);
        Path(segments)
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    /// Component-wise prefix test; `a.b` does not start with `a.bc`.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Every proper prefix of this path, root first.
    pub fn ancestors(&self) -> impl Iterator<Item = Path> + '_ {
        (0..self.0.len()).map(|n| Path(self.0[..n].to_vec()))
    }

    /// Resolve this path against `value`.
    ///
    /// Returns `None` when a key or index along the way is absent, or when a
    /// segment is applied to a value of the wrong shape.
    pub fn get_from<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(value, |current, segment| match (segment, current) {
                (PathSegment::Key(key), Value::Map(map)) => map.get(key),
                (PathSegment::Index(index), Value::Array(array)) => array.0.get(*index),
                _ => None,
            })
    }

    pub fn parse(s: &str) -> Result<Self, PathError> {
        s.parse()
    }

    /// Parse a path known to be valid, panicking otherwise.
    pub fn must_parse(s: &str) -> Self {
        match s.parse() {
            Ok(path) => path,
            Err(err) => panic!("{err}"),
        }
    }

    fn extend(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.0.len() + 1);
        segments.extend_from_slice(&self.0);
        segments.push(segment);
        Path(segments)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => {
                for (i, c) in key.chars().enumerate() {
                    match c {
                        '\\' | '.' => write!(f, "\\{c}")?,
                        '[' if i == 0 => write!(f, "\\[")?,
                        c => write!(f, "{c}")?,
                    }
                }
                Ok(())
            }
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Path::root());
        }
        let invalid = || PathError::InvalidPath(s.to_string());

        let mut segments = Vec::new();
        let mut raw = RawSegment::default();
        let mut chars = s.chars();
        loop {
            match chars.next() {
                Some('\\') => {
                    let escaped = chars.next().ok_or_else(invalid)?;
                    raw.push(escaped);
                }
                Some('.') => {
                    segments.push(raw.finish().ok_or_else(invalid)?);
                    raw = RawSegment::default();
                }
                Some('[') if raw.len == 0 => {
                    raw.bracketed = true;
                    raw.push('[');
                }
                Some(c) => raw.push(c),
                None => {
                    segments.push(raw.finish().ok_or_else(invalid)?);
                    break;
                }
            }
        }
        Ok(Path(segments))
    }
}

/// Segment text collected between two unescaped dots.
#[derive(Default)]
struct RawSegment {
    text: String,
    len: usize,
    bracketed: bool,
}

impl RawSegment {
    fn push(&mut self, c: char) {
        self.text.push(c);
        self.len += 1;
    }

    fn finish(self) -> Option<PathSegment> {
        if self.len == 0 {
            return None;
        }
        if !self.bracketed {
            return Some(PathSegment::Key(self.text));
        }
        let digits = self.text.strip_prefix('[')?.strip_suffix(']')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(PathSegment::Index)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
