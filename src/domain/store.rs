//! The in-memory ownership tree of users, folders and files.
//!
//! The [`Store`] knows nothing about commands or terminals. Each operation
//! checks everything it needs before it touches the tree, so a failed
//! operation leaves the store unchanged.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::instrument;

use crate::domain::{
    clock::{Clock, SystemClock},
    entity::{File, Folder, User},
    listing::Listing,
    name::{InvalidNameError, Kind, Name},
    sort::{Sort, UnknownSortError},
};

/// Errors returned by [`Store`] operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// A name failed the character or length rules.
    #[error(transparent)]
    InvalidName(#[from] InvalidNameError),

    /// A sibling with the same identity already exists.
    #[error("The {name} has already existed.")]
    AlreadyExists {
        /// Kind of the conflicting entity.
        kind: Kind,
        /// The name that was requested.
        name: String,
    },

    /// A referenced user, folder or file does not exist.
    #[error("The {name} doesn't exist.")]
    NotFound {
        /// Kind of the missing entity.
        kind: Kind,
        /// The name that was looked up.
        name: String,
    },

    /// A sort flag or direction was not recognised.
    #[error(transparent)]
    BadSort(#[from] UnknownSortError),

    /// A listing was requested on something with no children.
    #[error("The {owner} doesn't have any {kind}s.")]
    Empty {
        /// Kind of the children that were requested.
        kind: Kind,
        /// Name of the user or folder that was listed.
        owner: String,
    },
}

impl Error {
    fn already_exists(kind: Kind, name: &str) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.to_string(),
        }
    }

    fn not_found(kind: Kind, name: &str) -> Self {
        Self::NotFound {
            kind,
            name: name.to_string(),
        }
    }

    fn empty(kind: Kind, owner: &str) -> Self {
        Self::Empty {
            kind,
            owner: owner.to_string(),
        }
    }
}

/// Users are keyed case-insensitively.
fn user_key(username: &str) -> String {
    username.to_lowercase()
}

/// Root of the ownership tree.
///
/// - users: `BTreeMap<String, User>` keyed by the lower-cased username
/// - folders: keyed by exact name within each [`User`]
/// - files: keyed by exact name within each [`Folder`]
///
/// Creation timestamps come from the store's [`Clock`].
#[derive(Debug, Default)]
pub struct Store<C = SystemClock> {
    users: BTreeMap<String, User>,
    clock: C,
}

impl Store {
    /// Creates an empty store backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Store<C> {
    /// Creates an empty store that timestamps entities with `clock`.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            users: BTreeMap::new(),
            clock,
        }
    }

    /// The clock used for creation timestamps.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether no users are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Looks up a user, ignoring case.
    #[must_use]
    pub fn user(&self, username: &str) -> Option<&User> {
        self.users.get(&user_key(username))
    }

    fn existing_user(&self, username: &str) -> Result<&User, Error> {
        self.user(username)
            .ok_or_else(|| Error::not_found(Kind::User, username))
    }

    fn existing_user_mut(&mut self, username: &str) -> Result<&mut User, Error> {
        self.users
            .get_mut(&user_key(username))
            .ok_or_else(|| Error::not_found(Kind::User, username))
    }

    /// Registers a new user.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] if the name is not a legal username
    /// - [`Error::AlreadyExists`] if a user with the same name, ignoring case,
    ///   is already registered
    #[instrument(level = "debug", skip(self))]
    pub fn register(&mut self, username: &str) -> Result<(), Error> {
        let name = Name::new(Kind::User, username)?;

        let key = user_key(username);
        if self.users.contains_key(&key) {
            return Err(Error::already_exists(Kind::User, username));
        }

        self.users.insert(key, User::new(name));
        tracing::info!("Registered user: {username}");
        Ok(())
    }

    /// Creates a folder owned by `username`.
    ///
    /// The description is stored as given.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the user does not exist
    /// - [`Error::InvalidName`] if the folder name is not legal
    /// - [`Error::AlreadyExists`] if the user already has a folder of that name
    #[instrument(level = "debug", skip(self, description))]
    pub fn create_folder(
        &mut self,
        username: &str,
        foldername: &str,
        description: &str,
    ) -> Result<(), Error> {
        let created = self.clock.now();
        let user = self.existing_user_mut(username)?;
        let name = Name::new(Kind::Folder, foldername)?;

        if user.folders.contains_key(foldername) {
            return Err(Error::already_exists(Kind::Folder, foldername));
        }

        user.folders.insert(
            foldername.to_string(),
            Folder::new(name, description.to_string(), created),
        );
        tracing::info!("Created folder: {foldername}");
        Ok(())
    }

    /// Deletes a folder and every file in it.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the user or the folder does not exist.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_folder(&mut self, username: &str, foldername: &str) -> Result<(), Error> {
        let user = self.existing_user_mut(username)?;

        let folder = user
            .folders
            .remove(foldername)
            .ok_or_else(|| Error::not_found(Kind::Folder, foldername))?;

        tracing::info!(
            "Deleted folder: {foldername} ({} files removed)",
            folder.files.len()
        );
        Ok(())
    }

    /// Renames a folder, keeping its description, timestamp and files.
    ///
    /// Renaming a folder to its current name succeeds without further checks.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the user or the folder does not exist
    /// - [`Error::InvalidName`] if the new name is not legal
    /// - [`Error::AlreadyExists`] if another folder already has the new name
    #[instrument(level = "debug", skip(self))]
    pub fn rename_folder(&mut self, username: &str, old: &str, new: &str) -> Result<(), Error> {
        let user = self.existing_user_mut(username)?;

        if !user.folders.contains_key(old) {
            return Err(Error::not_found(Kind::Folder, old));
        }

        if old == new {
            tracing::debug!("Rename of {old} to itself is a no-op");
            return Ok(());
        }

        let name = Name::new(Kind::Folder, new)?;

        if user.folders.contains_key(new) {
            return Err(Error::already_exists(Kind::Folder, new));
        }

        let mut folder = user
            .folders
            .remove(old)
            .ok_or_else(|| Error::not_found(Kind::Folder, old))?;
        folder.rename(name);
        user.folders.insert(new.to_string(), folder);

        tracing::info!("Renamed folder: {old} -> {new}");
        Ok(())
    }

    /// Lists a user's folders in the given order.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the user does not exist
    /// - [`Error::Empty`] if the user has no folders
    #[instrument(level = "debug", skip(self))]
    pub fn list_folders(&self, username: &str, sort: Sort) -> Result<Listing<'_>, Error> {
        let user = self.existing_user(username)?;

        if user.folders.is_empty() {
            return Err(Error::empty(Kind::Folder, user.name()));
        }

        Ok(Listing::folders(user, sort))
    }

    /// Creates a file in one of a user's folders.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the user or the folder does not exist
    /// - [`Error::InvalidName`] if the file name is not legal
    /// - [`Error::AlreadyExists`] if the folder already has a file of that
    ///   name
    #[instrument(level = "debug", skip(self, description))]
    pub fn create_file(
        &mut self,
        username: &str,
        foldername: &str,
        filename: &str,
        description: &str,
    ) -> Result<(), Error> {
        let created = self.clock.now();
        let user = self.existing_user_mut(username)?;
        let folder = user
            .folders
            .get_mut(foldername)
            .ok_or_else(|| Error::not_found(Kind::Folder, foldername))?;
        let name = Name::new(Kind::File, filename)?;

        if folder.files.contains_key(filename) {
            return Err(Error::already_exists(Kind::File, filename));
        }

        folder.files.insert(
            filename.to_string(),
            File::new(name, description.to_string(), created),
        );
        tracing::info!("Created file: {foldername}/{filename}");
        Ok(())
    }

    /// Deletes a file from one of a user's folders.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] if the user, the folder or the file does not exist.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_file(
        &mut self,
        username: &str,
        foldername: &str,
        filename: &str,
    ) -> Result<(), Error> {
        let user = self.existing_user_mut(username)?;
        let folder = user
            .folders
            .get_mut(foldername)
            .ok_or_else(|| Error::not_found(Kind::Folder, foldername))?;

        folder
            .files
            .remove(filename)
            .ok_or_else(|| Error::not_found(Kind::File, filename))?;

        tracing::info!("Deleted file: {foldername}/{filename}");
        Ok(())
    }

    /// Lists the files in one of a user's folders in the given order.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the user or the folder does not exist
    /// - [`Error::Empty`] if the folder has no files
    #[instrument(level = "debug", skip(self))]
    pub fn list_files(
        &self,
        username: &str,
        foldername: &str,
        sort: Sort,
    ) -> Result<Listing<'_>, Error> {
        let user = self.existing_user(username)?;
        let folder = user
            .folder(foldername)
            .ok_or_else(|| Error::not_found(Kind::Folder, foldername))?;

        if folder.files.is_empty() {
            return Err(Error::empty(Kind::File, folder.name()));
        }

        Ok(Listing::files(user, folder, sort))
    }
}
