use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    entity::{Folder, User},
    sort::Sort,
};

/// Format used for creation timestamps in listings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Time zone used when rendering timestamps.
///
/// Timestamps are always stored in UTC; this only affects display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    /// The machine's local time zone.
    #[default]
    Local,
    /// Coordinated Universal Time.
    Utc,
}

impl Zone {
    /// Formats `instant` as `YYYY-MM-DD HH:MM:SS` in this zone.
    #[must_use]
    pub fn format(self, instant: DateTime<Utc>) -> String {
        match self {
            Self::Local => instant
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
            Self::Utc => instant.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Where a listed entity lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location<'a> {
    /// A folder, owned by the named user.
    User(&'a str),
    /// A file, in the named folder of the named user.
    Folder {
        /// Name of the containing folder.
        folder: &'a str,
        /// Display name of the owning user.
        user: &'a str,
    },
}

/// One line of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    /// Name of the folder or file.
    pub name: &'a str,
    /// Its description.
    pub description: &'a str,
    /// Its creation timestamp.
    pub created: DateTime<Utc>,
    /// Its owners.
    pub location: Location<'a>,
}

/// A sorted listing of a user's folders or of a folder's files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing<'a> {
    rows: Vec<Row<'a>>,
}

impl<'a> Listing<'a> {
    pub(crate) fn folders(user: &'a User, sort: Sort) -> Self {
        let mut folders: Vec<&Folder> = user.folders().collect();
        sort.apply(&mut folders);

        let rows = folders
            .into_iter()
            .map(|folder| Row {
                name: folder.name(),
                description: folder.description(),
                created: folder.created(),
                location: Location::User(user.name()),
            })
            .collect();

        Self { rows }
    }

    pub(crate) fn files(user: &'a User, folder: &'a Folder, sort: Sort) -> Self {
        let mut files: Vec<_> = folder.files().collect();
        sort.apply(&mut files);

        let rows = files
            .into_iter()
            .map(|file| Row {
                name: file.name(),
                description: file.description(),
                created: file.created(),
                location: Location::Folder {
                    folder: folder.name(),
                    user: user.name(),
                },
            })
            .collect();

        Self { rows }
    }

    /// The rows, in sorted order.
    #[must_use]
    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }

    /// Names of the listed entities, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> {
        self.rows.iter().map(|row| row.name)
    }

    /// Returns a displayable form with timestamps rendered in `zone`.
    ///
    /// Each row reads `name description timestamp [folder] user`, rows are
    /// separated by newlines.
    #[must_use]
    pub const fn display(&self, zone: Zone) -> FormattedListing<'_, 'a> {
        FormattedListing {
            listing: self,
            zone,
        }
    }
}

/// A listing paired with the zone its timestamps render in.
///
/// Returned by [`Listing::display`].
#[derive(Debug, Clone, Copy)]
pub struct FormattedListing<'l, 'a> {
    listing: &'l Listing<'a>,
    zone: Zone,
}

impl fmt::Display for FormattedListing<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, row) in self.listing.rows.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{} {} {}",
                row.name,
                row.description,
                self.zone.format(row.created)
            )?;
            match row.location {
                Location::User(user) => write!(f, " {user}")?,
                Location::Folder { folder, user } => write!(f, " {folder} {user}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::domain::{
        clock::ManualClock,
        sort::{SortField, SortOrder},
        store::Store,
    };

    fn store() -> Store<ManualClock> {
        let start = Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap();
        let mut store = Store::with_clock(ManualClock::new(start));
        store.register("Alice").unwrap();
        store
    }

    #[test]
    fn utc_zone_uses_fixed_format() {
        let instant = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 7).unwrap();
        assert_eq!(Zone::Utc.format(instant), "2023-12-31 23:59:07");
    }

    #[test]
    fn folder_rows_name_the_registered_user() {
        let mut store = store();
        store.create_folder("alice", "Docs", "notes").unwrap();
        store.clock().advance(TimeDelta::seconds(1));
        store.create_folder("ALICE", "Archive", "").unwrap();

        let listing = store.list_folders("alice", Sort::default()).unwrap();
        assert_eq!(
            listing.display(Zone::Utc).to_string(),
            "Archive  2024-05-17 09:30:01 Alice\nDocs notes 2024-05-17 09:30:00 Alice"
        );
    }

    #[test]
    fn file_rows_include_folder_and_user() {
        let mut store = store();
        store.create_folder("alice", "Docs", "").unwrap();
        store
            .create_file("alice", "Docs", "report.txt", "quarterly")
            .unwrap();

        let listing = store
            .list_files("alice", "Docs", Sort::default())
            .unwrap();
        assert_eq!(listing.rows().len(), 1);
        assert_eq!(
            listing.display(Zone::Utc).to_string(),
            "report.txt quarterly 2024-05-17 09:30:00 Docs Alice"
        );
    }

    #[test]
    fn rows_follow_requested_sort() {
        let mut store = store();
        for name in ["b", "a", "c"] {
            store.create_folder("alice", name, "").unwrap();
            store.clock().advance(TimeDelta::minutes(1));
        }

        let by_created = store
            .list_folders("alice", Sort::new(SortField::Created, SortOrder::Desc))
            .unwrap();
        assert_eq!(by_created.names().collect::<Vec<_>>(), ["c", "a", "b"]);
    }
}
