use std::fmt::{Display, Error, Formatter};

/// Separator between namespace segments of a class name.
pub const NAMESPACE_SEPARATOR: char = '\\';

/// Strips namespace separators from both ends of a prefix or class name.
pub fn trim_separators(name: &str) -> &str {
    name.trim_matches(NAMESPACE_SEPARATOR)
}

/// A fully-qualified class name such as `App\Models\User`.
///
/// Leading and trailing separators are dropped on construction, so `\App\Models\User` and
/// `App\Models\User` are the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(name: &str) -> Self {
        Self(trim_separators(name).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Candidate `(prefix, relative_class)` splits, most specific first.
    ///
    /// Example:
    ///   "A\B\C" -> [("A\B", "C"), ("A", "B\C"), ("", "A\B\C")]
    ///
    /// The final pair is the global prefix and is always yielded for a non-empty name.
    pub fn candidates(&self) -> Candidates<'_> {
        Candidates {
            name: &self.0,
            cursor: if self.0.is_empty() { None } else { Some(self.0.len()) },
        }
    }
}

impl Display for ClassName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClassName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

pub struct Candidates<'a> {
    name: &'a str,
    // Exclusive end of the region still searched for a separator; `None` once exhausted.
    cursor: Option<usize>,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let end = self.cursor?;
        match self.name[..end].rfind(NAMESPACE_SEPARATOR) {
            Some(pos) => {
                self.cursor = Some(pos);
                Some((&self.name[..pos], &self.name[pos + 1..]))
            }
            None => {
                self.cursor = None;
                Some(("", self.name))
            }
        }
    }
}
