use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainsetError {
    #[error("Failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Contour has no points")]
    InvalidContour,

    #[error("Failed to create directory {path}: {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write artifact {path}: {source}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unknown action '{0}' (expected 'split' or 'mark')")]
    UnknownMode(String),
}

pub type Result<T> = std::result::Result<T, TrainsetError>;
