//! In-memory Virtual File System
//!
//! Users own folders, folders own files. Everything lives in a [`Store`] for
//! the lifetime of the process.

pub mod domain;
pub use domain::{
    Clock, Config, Error, File, Folder, InvalidNameError, Kind, Listing, ManualClock, Name, Sort,
    SortField, SortOrder, Store, SystemClock, User, Zone,
};
