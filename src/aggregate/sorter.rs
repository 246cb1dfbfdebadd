//! Facet result ordering
//!
//! All sorts are stable: groups with equal sort keys keep first-seen order.

use std::cmp::Ordering;

use super::errors::{AggregateError, AggregateResult};
use super::group::GroupDescriptor;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

/// What a facet result is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// The grouping key, compared as text
    Key,
    /// The display label, compared as text
    Label,
    /// The display label with surrounding whitespace removed
    TrimmedLabel,
}

/// Sort specification for a facet result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Ascending on `field`
    pub fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    /// Descending on `field`
    pub fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Sorts facet results
pub struct GroupSorter;

impl GroupSorter {
    /// Sorts groups by a text field.
    pub fn sort(groups: &mut [GroupDescriptor<'_>], spec: SortSpec) {
        groups.sort_by(|a, b| {
            let ordering = Self::text_of(a, spec.field).cmp(Self::text_of(b, spec.field));

            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Sorts groups by the integer value of their keys.
    ///
    /// Keys are compared as integers of any width. Every key is parsed before
    /// anything moves: one malformed key fails the call and the caller never
    /// sees a partially ordered result.
    pub fn sort_numeric<'a>(
        groups: Vec<GroupDescriptor<'a>>,
        direction: SortDirection,
        facet: &str,
    ) -> AggregateResult<Vec<GroupDescriptor<'a>>> {
        let mut keyed = groups
            .into_iter()
            .map(|group| {
                let parsed = IntegerKey::parse(&group.key);
                match parsed {
                    Some(n) => Ok((n, group)),
                    None => Err(AggregateError::malformed_key(facet, group.key)),
                }
            })
            .collect::<AggregateResult<Vec<_>>>()?;

        keyed.sort_by(|(a, _), (b, _)| match direction {
            SortDirection::Asc => a.cmp(b),
            SortDirection::Desc => b.cmp(a),
        });

        Ok(keyed.into_iter().map(|(_, group)| group).collect())
    }

    fn text_of<'g>(group: &'g GroupDescriptor<'_>, field: SortField) -> &'g str {
        match field {
            SortField::Key => &group.key,
            SortField::Label => &group.label,
            SortField::TrimmedLabel => group.label.trim(),
        }
    }
}

/// A decimal integer key of unbounded width.
///
/// Holds the sign and the digits with leading zeros removed, so ordering is
/// sign, then digit count, then digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IntegerKey {
    negative: bool,
    digits: String,
}

impl IntegerKey {
    /// Parses an optionally signed run of ASCII digits, ignoring surrounding
    /// whitespace.
    fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let (negative, body) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let digits = body.trim_start_matches('0');
        if digits.is_empty() {
            return Some(Self {
                negative: false,
                digits: String::new(),
            });
        }

        Some(Self {
            negative,
            digits: digits.to_string(),
        })
    }

    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl Ord for IntegerKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialOrd for IntegerKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
