//! Title normalization and the merged cross-provider title index.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::types::MovieRecord;
use crate::{Provider, ReelError};

/// A title reduced to its lookup key: lower-cased with leading and trailing
/// whitespace removed.
///
/// Internal whitespace is kept as-is, so `"Star Wars:   Episode VI"` and
/// `"Star Wars: Episode VI"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedTitle(String);

impl NormalizedTitle {
    /// Normalize a raw title.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase().trim().to_string())
    }

    /// The normalized key.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedTitle {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mapping from normalized title to every provider record sharing it.
///
/// Keys iterate in sorted order. Within a bucket, records appear in provider
/// precedence order and, per provider, in catalog order. Serializes as a plain
/// JSON object keyed by normalized title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TitleIndex {
    buckets: BTreeMap<NormalizedTitle, Vec<MovieRecord>>,
}

impl TitleIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge per-provider catalogs into a fresh index.
    ///
    /// Catalogs are merged in provider precedence order no matter the order
    /// they are passed in, so the result does not depend on which fetch
    /// finished first.
    #[must_use]
    pub fn merge(mut catalogs: Vec<(Provider, Vec<MovieRecord>)>) -> Self {
        catalogs.sort_by_key(|(provider, _)| *provider);
        let mut index = Self::new();
        for (provider, records) in catalogs {
            for mut record in records {
                record.provider = provider;
                index.insert(record);
            }
        }
        index
    }

    /// Append a record to the bucket of its normalized title.
    pub fn insert(&mut self, record: MovieRecord) {
        self.buckets
            .entry(NormalizedTitle::new(&record.title))
            .or_default()
            .push(record);
    }

    /// Records for a raw (not yet normalized) title.
    #[must_use]
    pub fn get(&self, raw_title: &str) -> Option<&[MovieRecord]> {
        let key = NormalizedTitle::new(raw_title);
        self.buckets
            .get(key.as_str())
            .map(Vec::as_slice)
            .filter(|records| !records.is_empty())
    }

    /// Resolve a 1-based menu selection such as `"3"` to its title and records.
    ///
    /// # Errors
    /// Returns `InvalidArg` for non-numeric input, zero, or an index past the end.
    pub fn select(&self, selection: &str) -> Result<(&NormalizedTitle, &[MovieRecord]), ReelError> {
        let pick: usize = selection
            .trim()
            .parse()
            .map_err(|_| ReelError::InvalidArg(format!("'{selection}' is not a valid index")))?;
        pick.checked_sub(1)
            .and_then(|i| self.buckets.iter().nth(i))
            .map(|(title, records)| (title, records.as_slice()))
            .ok_or_else(|| {
                ReelError::InvalidArg(format!(
                    "index {pick} is out of range 1..={}",
                    self.buckets.len()
                ))
            })
    }

    /// Iterate `(title, records)` pairs in sorted title order.
    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedTitle, &[MovieRecord])> {
        self.buckets.iter().map(|(t, r)| (t, r.as_slice()))
    }

    /// Sorted normalized titles.
    pub fn titles(&self) -> impl Iterator<Item = &NormalizedTitle> {
        self.buckets.keys()
    }

    /// Number of distinct titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no provider contributed any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
