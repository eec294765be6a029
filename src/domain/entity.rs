use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::domain::{name::Name, sort::Sortable};

/// A registered user and the folders they own.
///
/// The user keeps the name exactly as it was registered, even though the
/// [`Store`](crate::Store) looks users up case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: Name,
    /// Folders keyed by their exact name.
    pub(crate) folders: BTreeMap<String, Folder>,
}

impl User {
    pub(crate) const fn new(name: Name) -> Self {
        Self {
            name,
            folders: BTreeMap::new(),
        }
    }

    /// The name as originally registered.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Looks up a folder by its exact name.
    #[must_use]
    pub fn folder(&self, name: &str) -> Option<&Folder> {
        self.folders.get(name)
    }

    /// Iterates over the user's folders in ascending name order.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }
}

/// A folder: a named, described collection of files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    name: Name,
    description: String,
    created: DateTime<Utc>,
    /// Files keyed by their exact name.
    pub(crate) files: BTreeMap<String, File>,
}

impl Folder {
    pub(crate) const fn new(name: Name, description: String, created: DateTime<Utc>) -> Self {
        Self {
            name,
            description,
            created,
            files: BTreeMap::new(),
        }
    }

    /// The folder's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text description given at creation.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the folder was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Looks up a file by its exact name.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.get(name)
    }

    /// Iterates over the folder's files in ascending name order.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.values()
    }

    /// Changes the name, leaving description, timestamp and files alone.
    pub(crate) fn rename(&mut self, name: Name) {
        self.name = name;
    }
}

impl Sortable for Folder {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

/// A file. Files have no content, only metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: Name,
    description: String,
    created: DateTime<Utc>,
}

impl File {
    pub(crate) const fn new(name: Name, description: String, created: DateTime<Utc>) -> Self {
        Self {
            name,
            description,
            created,
        }
    }

    /// The file's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text description given at creation.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// When the file was created.
    #[must_use]
    pub const fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl Sortable for File {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
