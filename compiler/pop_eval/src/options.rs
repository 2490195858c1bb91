//! Resolved tag attributes.

use std::fmt;

use smallvec::SmallVec;

/// A tag's attributes after dynamic values have been rendered.
///
/// Handed to callables, `html` producers and filters as their `options`.
/// Order is source order.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Options(SmallVec<[(String, String); 4]>);

impl Options {
    pub fn new() -> Self {
        Options(SmallVec::new())
    }

    /// Set `name`, replacing an earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    /// Boolean attribute: `"false"`, `"no"` and `"0"` are false, anything
    /// else present is true.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.get(name).map(|v| {
            !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "no" | "0")
        })
    }

    /// Non-negative integer attribute; unparsable values count as absent.
    pub fn count(&self, name: &str) -> Option<usize> {
        self.get(name).and_then(|v| v.trim().parse().ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut options = Options::new();
        for (k, v) in iter {
            options.insert(k, v);
        }
        options
    }
}
