use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};

/// Field a listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Byte-wise lexicographic order of the name.
    #[default]
    Name,
    /// Chronological order of the creation timestamp.
    Created,
}

impl FromStr for SortField {
    type Err = UnknownSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "--sort-name" => Ok(Self::Name),
            "--sort-created" => Ok(Self::Created),
            _ => Err(UnknownSortError(s.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "--sort-name",
            Self::Created => "--sort-created",
        })
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl FromStr for SortOrder {
    type Err = UnknownSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(UnknownSortError(s.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Error returned for a sort flag or direction that is not recognised.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error(
    "Unknown flag '{0}'. Valid flags are '--sort-name asc', '--sort-name desc', '--sort-created \
     asc', '--sort-created desc'."
)]
pub struct UnknownSortError(String);

impl UnknownSortError {
    /// The token that failed to parse.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }
}

/// Something that can appear in a sorted listing.
pub trait Sortable {
    /// The name compared by [`SortField::Name`].
    fn name(&self) -> &str;

    /// The timestamp compared by [`SortField::Created`].
    fn created(&self) -> DateTime<Utc>;
}

/// A resolved sort: which field, which direction.
///
/// The default sorts ascending by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    /// Field to compare.
    pub field: SortField,
    /// Direction to apply.
    pub order: SortOrder,
}

impl Sort {
    /// Creates a sort from its parts.
    #[must_use]
    pub const fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Parses the optional flag and direction tokens given on a command line.
    ///
    /// A missing flag means the default sort, a missing direction means
    /// ascending.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSortError`] naming the first token that is neither a
    /// known flag nor a known direction.
    pub fn parse(field: Option<&str>, order: Option<&str>) -> Result<Self, UnknownSortError> {
        let field = field.map(str::parse::<SortField>).transpose()?.unwrap_or_default();
        let order = order.map(str::parse::<SortOrder>).transpose()?.unwrap_or_default();
        Ok(Self { field, order })
    }

    /// Compares two items by the chosen field, flipped for descending order.
    ///
    /// Equal items compare equal regardless of direction, so a stable sort
    /// keeps their original relative order.
    #[must_use]
    pub fn compare<T: Sortable>(self, a: &T, b: &T) -> Ordering {
        let ordering = match self.field {
            SortField::Name => a.name().cmp(b.name()),
            SortField::Created => a.created().cmp(&b.created()),
        };

        match self.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }

    /// Stable-sorts `items` in place.
    pub fn apply<T: Sortable>(self, items: &mut [&T]) {
        items.sort_by(|a, b| self.compare(*a, *b));
    }
}
