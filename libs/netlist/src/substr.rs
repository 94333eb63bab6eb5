//! Shared-ownership substrings of the file being parsed.
//!
//! Every token value and logical line body is a slice of the original file
//! text; cloning is a refcount bump, and slicing never copies.

use std::borrow::Borrow;
use std::fmt::Display;
use std::iter::FusedIterator;
use std::ops::{Deref, DerefMut, RangeBounds};

use arcstr::ArcStr;
use nom::Input;

/// A substring of a file being parsed.
#[derive(Clone, Default, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Substr(pub(crate) arcstr::Substr);

impl Substr {
    /// Creates a substring spanning the full contents of `s`.
    pub fn full(s: impl Into<ArcStr>) -> Self {
        Self(arcstr::Substr::full(s.into()))
    }

    /// Slices this substring; the result shares the same backing buffer.
    pub fn substr(&self, range: impl RangeBounds<usize>) -> Self {
        Self(self.0.substr(range))
    }

    /// Narrows this substring to the given slice of itself.
    pub fn substr_from(&self, s: &str) -> Self {
        Self(self.0.substr_from(s))
    }
}

impl Deref for Substr {
    type Target = arcstr::Substr;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Substr {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Borrow<str> for Substr {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Substr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Substr> for arcstr::Substr {
    fn from(value: Substr) -> Self {
        value.0
    }
}

impl From<arcstr::Substr> for Substr {
    fn from(value: arcstr::Substr) -> Self {
        Self(value)
    }
}

impl From<ArcStr> for Substr {
    fn from(value: ArcStr) -> Self {
        Self(arcstr::Substr::full(value))
    }
}

impl From<&str> for Substr {
    fn from(value: &str) -> Self {
        Self(arcstr::Substr::from(value))
    }
}

impl From<String> for Substr {
    fn from(value: String) -> Self {
        Self(arcstr::Substr::full(ArcStr::from(value)))
    }
}

impl From<char> for Substr {
    fn from(value: char) -> Self {
        Self(arcstr::Substr::from(value.to_string()))
    }
}

impl PartialEq<str> for Substr {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Substr {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// `nom` drives the low-level scanning, so [`Substr`] implements its input
/// trait by delegating to `&str` and re-anchoring the results in the shared
/// buffer.
impl Input for Substr {
    type Item = char;
    type Iter = SubstrChars;
    type IterIndices = SubstrCharIndices;

    fn input_len(&self) -> usize {
        <&str as Input>::input_len(&&***self)
    }

    fn take(&self, index: usize) -> Self {
        Self(self.0.substr_from(<&str as Input>::take(&&***self, index)))
    }

    fn take_from(&self, index: usize) -> Self {
        Self(
            self.0
                .substr_from(<&str as Input>::take_from(&&***self, index)),
        )
    }

    fn take_split(&self, index: usize) -> (Self, Self) {
        let (a, b) = <&str as Input>::take_split(&&***self, index);
        (Self(self.0.substr_from(a)), Self(self.0.substr_from(b)))
    }

    fn position<P>(&self, predicate: P) -> Option<usize>
    where
        P: Fn(Self::Item) -> bool,
    {
        <&str as Input>::position(&&***self, predicate)
    }

    fn iter_elements(&self) -> Self::Iter {
        SubstrChars {
            substr: self.clone(),
        }
    }

    fn iter_indices(&self) -> Self::IterIndices {
        SubstrCharIndices {
            substr: self.clone(),
            offset: 0,
        }
    }

    fn slice_index(&self, count: usize) -> Result<usize, nom::Needed> {
        <&str as Input>::slice_index(&&***self, count)
    }
}

/// An iterator over the chars of a [`Substr`].
pub struct SubstrChars {
    substr: Substr,
}

impl Iterator for SubstrChars {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.substr.chars();
        let c = chars.next();
        self.substr = Substr(self.substr.0.substr_from(chars.as_str()));
        c
    }
}

impl FusedIterator for SubstrChars {}

/// An iterator over the chars of a [`Substr`], and their byte offsets.
pub struct SubstrCharIndices {
    substr: Substr,
    offset: usize,
}

impl Iterator for SubstrCharIndices {
    type Item = (usize, char);
    fn next(&mut self) -> Option<Self::Item> {
        let mut chars = self.substr.chars();
        let c = chars.next()?;
        let offset = self.offset;
        self.offset += c.len_utf8();
        self.substr = Substr(self.substr.0.substr_from(chars.as_str()));
        Some((offset, c))
    }
}

impl FusedIterator for SubstrCharIndices {}
