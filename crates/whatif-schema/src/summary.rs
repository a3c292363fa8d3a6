//! Change counts per change type

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use crate::change_type::ChangeType;
use crate::model::ResourceChange;

/// Number of resource changes per [`ChangeType`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    counts: BTreeMap<ChangeType, usize>,
    total: usize,
}

impl ChangeSummary {
    /// Record one change
    pub fn record(&mut self, change_type: &ChangeType) {
        *self.counts.entry(change_type.clone()).or_default() += 1;
        self.total += 1;
    }

    /// Count for a change type
    #[inline]
    #[must_use]
    pub fn count(&self, change_type: &ChangeType) -> usize {
        self.counts.get(change_type).copied().unwrap_or(0)
    }

    /// Total number of resource changes
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Check if any resource would actually be altered
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.counts.keys().any(ChangeType::is_change)
    }

    /// Non-zero counts, ordered by change type
    pub fn iter(&self) -> impl Iterator<Item = (&ChangeType, usize)> {
        self.counts.iter().map(|(t, n)| (t, *n))
    }
}

impl<'a> FromIterator<&'a ResourceChange> for ChangeSummary {
    fn from_iter<I: IntoIterator<Item = &'a ResourceChange>>(iter: I) -> Self {
        let mut summary = Self::default();
        for change in iter {
            summary.record(change.change_type());
        }
        summary
    }
}

impl Display for ChangeSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return f.write_str("no changes");
        }
        let parts: Vec<_> = self.iter().map(|(t, n)| format!("{t}: {n}")).collect();
        f.write_str(&parts.join(", "))
    }
}
