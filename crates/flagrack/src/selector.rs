use std::borrow::Cow;

// --- Names ---

/// One flag name or an ordered sequence of names.
///
/// Registration, [`set`](crate::FlagSet::set), [`clear`](crate::FlagSet::clear), and
/// mask construction accept anything convertible into this type, so call sites can
/// pass string literals, arrays, slices, or owned vectors without ceremony.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Names<'a> {
    /// A single flag name.
    One(Cow<'a, str>),
    /// An ordered sequence of flag names.
    Many(Vec<Cow<'a, str>>),
}

impl<'a> Names<'a> {
    /// Returns the carried names as a slice, regardless of shape.
    #[must_use]
    pub fn as_slice(&self) -> &[Cow<'a, str>] {
        match self {
            Self::One(name) => std::slice::from_ref(name),
            Self::Many(names) => names,
        }
    }

    /// Returns the number of carried names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if no names are carried.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<'a> From<&'a str> for Names<'a> {
    fn from(name: &'a str) -> Self {
        Self::One(Cow::Borrowed(name))
    }
}

impl<'a> From<String> for Names<'a> {
    fn from(name: String) -> Self {
        Self::One(Cow::Owned(name))
    }
}

impl<'a> From<&'a String> for Names<'a> {
    fn from(name: &'a String) -> Self {
        Self::One(Cow::Borrowed(name.as_str()))
    }
}

impl<'a> From<Vec<&'a str>> for Names<'a> {
    fn from(names: Vec<&'a str>) -> Self {
        Self::Many(names.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<Vec<String>> for Names<'a> {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names.into_iter().map(Cow::Owned).collect())
    }
}

impl<'a> From<&'a [&'a str]> for Names<'a> {
    fn from(names: &'a [&'a str]) -> Self {
        Self::Many(names.iter().copied().map(Cow::Borrowed).collect())
    }
}

impl<'a> From<&'a [String]> for Names<'a> {
    fn from(names: &'a [String]) -> Self {
        Self::Many(names.iter().map(|name| Cow::Borrowed(name.as_str())).collect())
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Names<'a> {
    fn from(names: [&'a str; N]) -> Self {
        Self::Many(names.into_iter().map(Cow::Borrowed).collect())
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Names<'a> {
    fn from(names: &'a [&'a str; N]) -> Self {
        Self::Many(names.iter().copied().map(Cow::Borrowed).collect())
    }
}

// --- Selector ---

/// The argument accepted by query operations and [`reset`](crate::FlagSet::reset).
///
/// A selector is one of three equivalent spellings of "this subset of flags":
/// a single name, a sequence of names, or a raw bitmask over the registered bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<'a> {
    /// A single flag name.
    Name(Cow<'a, str>),
    /// An ordered sequence of flag names.
    Names(Vec<Cow<'a, str>>),
    /// A raw bitmask.
    Mask(u32),
}

impl<'a> From<Names<'a>> for Selector<'a> {
    fn from(names: Names<'a>) -> Self {
        match names {
            Names::One(name) => Self::Name(name),
            Names::Many(names) => Self::Names(names),
        }
    }
}

impl<'a> From<u32> for Selector<'a> {
    fn from(mask: u32) -> Self {
        Self::Mask(mask)
    }
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(name: &'a str) -> Self {
        Names::from(name).into()
    }
}

impl<'a> From<String> for Selector<'a> {
    fn from(name: String) -> Self {
        Names::from(name).into()
    }
}

impl<'a> From<&'a String> for Selector<'a> {
    fn from(name: &'a String) -> Self {
        Names::from(name).into()
    }
}

impl<'a> From<Vec<&'a str>> for Selector<'a> {
    fn from(names: Vec<&'a str>) -> Self {
        Names::from(names).into()
    }
}

impl<'a> From<Vec<String>> for Selector<'a> {
    fn from(names: Vec<String>) -> Self {
        Names::from(names).into()
    }
}

impl<'a> From<&'a [&'a str]> for Selector<'a> {
    fn from(names: &'a [&'a str]) -> Self {
        Names::from(names).into()
    }
}

impl<'a> From<&'a [String]> for Selector<'a> {
    fn from(names: &'a [String]) -> Self {
        Names::from(names).into()
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Selector<'a> {
    fn from(names: [&'a str; N]) -> Self {
        Names::from(names).into()
    }
}

impl<'a, const N: usize> From<&'a [&'a str; N]> for Selector<'a> {
    fn from(names: &'a [&'a str; N]) -> Self {
        Names::from(names).into()
    }
}
