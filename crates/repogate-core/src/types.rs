use serde::{Deserialize, Serialize};
use std::fmt;

/// A file inside the checkout, addressed by its forward-slash relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
}

/// A function or class definition discovered in a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub name: String,
    /// 1-based line of the definition's first token.
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub path: String,
    pub line: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Overwrite a file that must already exist.
    Update,
    /// Write a file, creating parent directories as needed.
    Create,
}

/// Steps of the commit-and-push sequence run after every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishStep {
    ConfigureIdentity,
    SetRemote,
    RebasePull,
    Stage,
    Commit,
    Push,
}

impl fmt::Display for PublishStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PublishStep::ConfigureIdentity => "configure identity",
            PublishStep::SetRemote => "set remote",
            PublishStep::RebasePull => "rebase pull",
            PublishStep::Stage => "stage",
            PublishStep::Commit => "commit",
            PublishStep::Push => "push",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishReport {
    pub path: String,
    pub mode: WriteMode,
    /// False when the write left the tree unchanged and no commit was made.
    pub committed: bool,
    pub commit: Option<String>,
}

/// A file left out of a scan, with the reason it was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome<T> {
    Parsed(T),
    Skipped(Skipped),
}

impl<T> FileOutcome<T> {
    pub fn skipped(path: impl Into<String>, reason: impl fmt::Display) -> Self {
        FileOutcome::Skipped(Skipped {
            path: path.into(),
            reason: reason.to_string(),
        })
    }

    pub fn parsed(self) -> Option<T> {
        match self {
            FileOutcome::Parsed(value) => Some(value),
            FileOutcome::Skipped(_) => None,
        }
    }
}
