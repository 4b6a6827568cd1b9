use std::path::PathBuf;
use thiserror::Error;

/// Fatal filesystem failures. Any of these aborts the run before the
/// output file is touched, except `Write` which is the output itself.
#[derive(Debug, Error)]
pub enum FilesystemError {
    #[error("Project directory {0} does not exist or is not a directory")]
    RootNotDirectory(PathBuf),
    #[error("File system walk error: {0}")]
    Walk(#[from] ignore::Error),
    #[error("File name is not valid UTF-8: {}", .0.display())]
    InvalidName(PathBuf),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
