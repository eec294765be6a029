use vfs::{Clock, Error, Store, SystemClock, Zone};

use crate::cli::command::{Command, USAGE};

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A one-line confirmation.
    Message(String),
    /// A block of text printed as-is.
    Listing(String),
    /// The shell should stop.
    Exit,
}

/// Runs parsed commands against a [`Store`] and words the results.
#[derive(Debug)]
pub struct Dispatcher<C = SystemClock> {
    store: Store<C>,
    zone: Zone,
}

impl<C: Clock> Dispatcher<C> {
    pub const fn new(store: Store<C>, zone: Zone) -> Self {
        Self { store, zone }
    }

    #[cfg(test)]
    pub const fn store(&self) -> &Store<C> {
        &self.store
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, Error> {
        let message = match command {
            Command::Register { username } => {
                self.store.register(&username)?;
                format!("Add {username} successfully.")
            }
            Command::CreateFolder {
                username,
                folder,
                description,
            } => {
                self.store.create_folder(&username, &folder, &description)?;
                format!("Create {folder} successfully.")
            }
            Command::DeleteFolder { username, folder } => {
                self.store.delete_folder(&username, &folder)?;
                format!("Delete {folder} successfully.")
            }
            Command::RenameFolder { username, from, to } => {
                self.store.rename_folder(&username, &from, &to)?;
                format!("Rename {from} to {to} successfully.")
            }
            Command::ListFolders { username, sort } => {
                let sort = sort.resolve()?;
                let listing = self.store.list_folders(&username, sort)?;
                return Ok(Outcome::Listing(listing.display(self.zone).to_string()));
            }
            Command::CreateFile {
                username,
                folder,
                file,
                description,
            } => {
                self.store
                    .create_file(&username, &folder, &file, &description)?;
                format!("Create {file} successfully.")
            }
            Command::DeleteFile {
                username,
                folder,
                file,
            } => {
                self.store.delete_file(&username, &folder, &file)?;
                format!("Delete {file} successfully.")
            }
            Command::ListFiles {
                username,
                folder,
                sort,
            } => {
                let sort = sort.resolve()?;
                let listing = self.store.list_files(&username, &folder, sort)?;
                return Ok(Outcome::Listing(listing.display(self.zone).to_string()));
            }
            Command::Help => {
                let lines: Vec<String> = USAGE.iter().map(|usage| format!("  {usage}")).collect();
                return Ok(Outcome::Listing(format!("Commands:\n{}", lines.join("\n"))));
            }
            Command::Exit => return Ok(Outcome::Exit),
        };

        Ok(Outcome::Message(message))
    }
}
