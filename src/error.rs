use std::{path::PathBuf, time::Duration};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("User id must not be empty")]
    EmptyId,
}

#[derive(Debug, Error)]
pub enum FollowListError {
    #[error("Student id must not be empty")]
    EmptyStudentId,

    #[error("Student id {0:?} contains characters the directory does not allow")]
    InvalidStudentId(String),

    #[error("Student {0} does not exist")]
    NotFound(String),

    #[error("Permission denied while reading follow list of {0}")]
    PermissionDenied(String),

    #[error("Follow directory unreachable: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Follow directory error: {0}")]
    Backend(String),

    #[error("Follow list lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("Follow list lookup was cancelled")]
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("Slot {0} does not exist")]
    NotFound(Uuid),

    #[error("Slot {0} was already booked")]
    AlreadyBooked(Uuid),
}

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("Download request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Download of {1} answered with status {0}")]
    Status(u16, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Download exceeds the limit of {0} bytes")]
    TooLarge(u64),

    #[error("{0:?} already exists")]
    AlreadyExists(PathBuf),

    #[error("Invalid file name: {0:?}")]
    InvalidFileName(String),

    #[error("Path {0:?} can't be expressed as a file url")]
    InvalidPath(PathBuf),
}
