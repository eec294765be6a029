//! Domain models for the virtual file system.
//!
//! This module contains the ownership tree (users, folders and files), the
//! naming rules every entity obeys, and the listing and sorting types used to
//! report on the tree.

mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod config;
pub use config::Config;

/// User, folder and file records.
pub mod entity;
pub use entity::{File, Folder, User};

/// Formatted folder and file listings.
pub mod listing;
pub use listing::{Listing, Zone};

/// Name validation shared by every entity kind.
pub mod name;
pub use name::{InvalidNameError, Kind, Name};

/// Sort field and direction for listings.
pub mod sort;
pub use sort::{Sort, SortField, SortOrder};

mod store;
pub use store::{Error, Store};
