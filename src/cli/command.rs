//! Parsing a tokenised input line into a [`Command`].

use vfs::{Sort, domain::sort::UnknownSortError};

const REGISTER: &str = "register [username]";
const CREATE_FOLDER: &str = "create-folder [username] [foldername] [description]?";
const DELETE_FOLDER: &str = "delete-folder [username] [foldername]";
const RENAME_FOLDER: &str = "rename-folder [username] [foldername] [new-folder-name]";
const LIST_FOLDERS: &str = "list-folders [username] [--sort-name|--sort-created] [asc|desc]";
const CREATE_FILE: &str = "create-file [username] [foldername] [filename] [description]?";
const DELETE_FILE: &str = "delete-file [username] [foldername] [filename]";
const LIST_FILES: &str =
    "list-files [username] [foldername] [--sort-name|--sort-created] [asc|desc]";

/// Usage line of every command, in the order `help` prints them.
pub const USAGE: &[&str] = &[
    REGISTER,
    CREATE_FOLDER,
    DELETE_FOLDER,
    RENAME_FOLDER,
    LIST_FOLDERS,
    CREATE_FILE,
    DELETE_FILE,
    LIST_FILES,
    "help",
    "exit",
];

/// The raw sort tokens of a listing command.
///
/// These are only checked when the command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortArgs {
    pub field: Option<String>,
    pub order: Option<String>,
}

impl SortArgs {
    fn from_tokens(field: Option<&str>, order: Option<&str>) -> Self {
        Self {
            field: field.map(str::to_string),
            order: order.map(str::to_string),
        }
    }

    pub fn resolve(&self) -> Result<Sort, UnknownSortError> {
        Sort::parse(self.field.as_deref(), self.order.as_deref())
    }
}

/// A single shell command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register {
        username: String,
    },
    CreateFolder {
        username: String,
        folder: String,
        description: String,
    },
    DeleteFolder {
        username: String,
        folder: String,
    },
    RenameFolder {
        username: String,
        from: String,
        to: String,
    },
    ListFolders {
        username: String,
        sort: SortArgs,
    },
    CreateFile {
        username: String,
        folder: String,
        file: String,
        description: String,
    },
    DeleteFile {
        username: String,
        folder: String,
        file: String,
    },
    ListFiles {
        username: String,
        folder: String,
        sort: SortArgs,
    },
    Help,
    Exit,
}

/// Errors in the shape of a command line, before anything runs.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("Unknown command '{0}'. Type 'help' to list the commands.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parses whitespace-split tokens. Returns `Ok(None)` for a blank line.
    ///
    /// Trailing tokens of a description are re-joined with single spaces, as
    /// are the tokens of a username, so that `register a b` reaches the
    /// store as `a b` and is rejected there.
    pub fn parse(args: &[&str]) -> Result<Option<Self>, UsageError> {
        let Some((&name, rest)) = args.split_first() else {
            return Ok(None);
        };

        let command = match name {
            "register" => match rest {
                [] => return Err(UsageError::Usage(REGISTER)),
                names => Self::Register {
                    username: names.join(" "),
                },
            },
            "create-folder" => match rest {
                [username, folder, description @ ..] => Self::CreateFolder {
                    username: (*username).to_string(),
                    folder: (*folder).to_string(),
                    description: description.join(" "),
                },
                _ => return Err(UsageError::Usage(CREATE_FOLDER)),
            },
            "delete-folder" => match rest {
                [username, folder] => Self::DeleteFolder {
                    username: (*username).to_string(),
                    folder: (*folder).to_string(),
                },
                _ => return Err(UsageError::Usage(DELETE_FOLDER)),
            },
            "rename-folder" => match rest {
                [username, from, to] => Self::RenameFolder {
                    username: (*username).to_string(),
                    from: (*from).to_string(),
                    to: (*to).to_string(),
                },
                _ => return Err(UsageError::Usage(RENAME_FOLDER)),
            },
            "list-folders" => match rest {
                [username, sort @ ..] if sort.len() <= 2 => Self::ListFolders {
                    username: (*username).to_string(),
                    sort: SortArgs::from_tokens(sort.first().copied(), sort.get(1).copied()),
                },
                _ => return Err(UsageError::Usage(LIST_FOLDERS)),
            },
            "create-file" => match rest {
                [username, folder, file, description @ ..] => Self::CreateFile {
                    username: (*username).to_string(),
                    folder: (*folder).to_string(),
                    file: (*file).to_string(),
                    description: description.join(" "),
                },
                _ => return Err(UsageError::Usage(CREATE_FILE)),
            },
            "delete-file" => match rest {
                [username, folder, file] => Self::DeleteFile {
                    username: (*username).to_string(),
                    folder: (*folder).to_string(),
                    file: (*file).to_string(),
                },
                _ => return Err(UsageError::Usage(DELETE_FILE)),
            },
            "list-files" => match rest {
                [username, folder, sort @ ..] if sort.len() <= 2 => Self::ListFiles {
                    username: (*username).to_string(),
                    folder: (*folder).to_string(),
                    sort: SortArgs::from_tokens(sort.first().copied(), sort.get(1).copied()),
                },
                _ => return Err(UsageError::Usage(LIST_FILES)),
            },
            "help" => Self::Help,
            "exit" => Self::Exit,
            other => return Err(UsageError::UnknownCommand(other.to_string())),
        };

        Ok(Some(command))
    }
}
