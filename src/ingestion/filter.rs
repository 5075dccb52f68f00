//! Inclusion filters applied while ingesting.
//!
//! Empty filters match everything, so [`Filters::default`] imports all areas, measures and
//! years.

use std::collections::HashSet;

/// A case-insensitive set of codes. An empty set matches every code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFilter {
    codes: HashSet<String>,
}

impl StringFilter {
    /// A filter that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().collect()
    }

    /// `true` if the filter is empty or contains `code` (case-insensitive).
    pub fn matches(&self, code: &str) -> bool {
        self.codes.is_empty() || self.codes.contains(&code.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Lowercased codes, sorted.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl<S: AsRef<str>> FromIterator<S> for StringFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().map(|s| s.as_ref().to_lowercase()).collect(),
        }
    }
}

/// An inclusive year range. A zero endpoint means "all years".
///
/// Endpoints may be given in either order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearFilter {
    start: u32,
    end: u32,
}

impl YearFilter {
    /// A filter that matches every year.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// The effective `(low, high)` bounds, or `None` when every year matches.
    pub fn bounds(&self) -> Option<(u32, u32)> {
        if self.start == 0 || self.end == 0 {
            None
        } else {
            Some((self.start.min(self.end), self.start.max(self.end)))
        }
    }

    pub fn matches(&self, year: u32) -> bool {
        match self.bounds() {
            Some((low, high)) => (low..=high).contains(&year),
            None => true,
        }
    }

    pub fn is_all(&self) -> bool {
        self.bounds().is_none()
    }
}

/// The three filters supplied to each ingestion call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub areas: StringFilter,
    pub measures: StringFilter,
    pub years: YearFilter,
}

impl Filters {
    /// Filters that import everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Keep only the area filter (used for the authority-code catalog).
    pub fn areas_only(&self) -> Self {
        Self {
            areas: self.areas.clone(),
            ..Self::default()
        }
    }
}
