use thiserror::Error;

use crate::archive::Category;

#[derive(Error, Debug)]
pub enum ViewerError {
    /// Any fetch outcome other than success or not-found. Aborts the whole blog load.
    #[error("Error getting blog file {path}: {reason}")]
    Transport {
        path: String,
        reason: String,
    },

    /// A single candidate entry could not be turned into a post.
    #[error("Malformed entry {entry}: {reason}")]
    MalformedEntry {
        entry: String,
        reason: String,
    },

    #[error("Unknown post type {0}")]
    UnknownVariant(String),

    #[error("Invalid blog or file name: {0}")]
    InvalidBlog(String),
}

impl ViewerError {
    pub(crate) fn malformed(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        ViewerError::MalformedEntry {
            entry: entry.into(),
            reason: reason.into(),
        }
    }
}

/// Diagnostic for a candidate entry that was dropped during a parse pass.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryFault {
    pub category: Category,
    /// 1-based position of the entry in its file, `None` when the whole file was unreadable.
    pub entry: Option<usize>,
    pub post_id: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for EntryFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.entry {
            Some(entry) => write!(f, "{} entry {}", self.category.file_name(), entry)?,
            None => write!(f, "{}", self.category.file_name())?,
        }
        if let Some(ref id) = self.post_id {
            write!(f, " (post {})", id)?;
        }
        write!(f, ": {}", self.reason)
    }
}
