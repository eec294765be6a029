use std::{fmt, ops::Deref, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

/// Maximum length of a username, in characters.
pub const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum length of a folder name, in characters.
pub const MAX_FOLDER_NAME_LENGTH: usize = 100;

/// Maximum length of a file name, in characters.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Any of `\ / : * ? " < > |` or whitespace.
static ILLEGAL_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\s]"#).expect("illegal character pattern is a valid regex")
});

/// The kind of entity a name belongs to.
///
/// Each kind shares the same character rules but has its own length ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// A registered user.
    User,
    /// A folder owned by a user.
    Folder,
    /// A file inside a folder.
    File,
}

impl Kind {
    /// Returns the maximum number of characters a name of this kind may have.
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            Self::User => MAX_USERNAME_LENGTH,
            Self::Folder => MAX_FOLDER_NAME_LENGTH,
            Self::File => MAX_FILE_NAME_LENGTH,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::Folder => "folder",
            Self::File => "file",
        })
    }
}

/// A validated entity name.
///
/// A name is non-empty, contains none of `\ / : * ? " < > |` and no
/// whitespace, and is no longer than the ceiling of its [`Kind`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Name(NonEmptyString);

impl Name {
    /// Validates `s` as a name of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidNameError`] if the string is empty, contains an
    /// illegal character, or exceeds the length ceiling for `kind`.
    pub fn new(kind: Kind, s: impl Into<String>) -> Result<Self, InvalidNameError> {
        let non_empty = NonEmptyString::new(s.into()).map_err(|_| InvalidNameError::Empty(kind))?;

        if ILLEGAL_CHARS.is_match(non_empty.as_str()) {
            return Err(InvalidNameError::IllegalChars {
                kind,
                name: non_empty.as_str().to_owned(),
            });
        }

        let max = kind.max_len();
        if non_empty.as_str().chars().count() > max {
            return Err(InvalidNameError::TooLong { kind, max });
        }

        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for Name {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a legal name.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InvalidNameError {
    /// The name is empty.
    #[error("The {0} name must not be empty.")]
    Empty(Kind),

    /// The name contains a reserved character or whitespace.
    #[error("The {name} contains invalid chars.")]
    IllegalChars {
        /// Kind of entity being named.
        kind: Kind,
        /// The rejected name.
        name: String,
    },

    /// The name is longer than the ceiling for its kind.
    #[error("The {kind} name must be at most {max} characters.")]
    TooLong {
        /// Kind of entity being named.
        kind: Kind,
        /// The ceiling that was exceeded.
        max: usize,
    },
}
