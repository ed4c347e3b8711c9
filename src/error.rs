// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::results::Slot;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read results: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {slot} line needs a field at index {index} but has {found} field(s)")]
    MissingField {
        line: usize,
        slot: Slot,
        index: usize,
        found: usize,
    },
    #[error("line {line}: invalid {slot} value: {token:?}")]
    InvalidNumber {
        line: usize,
        slot: Slot,
        token: String,
    },
    #[error("results are truncated: {lines} line(s) is not a whole number of records")]
    Truncated { lines: usize },
    #[error("failed to render {}: {reason}", .path.display())]
    Render { path: PathBuf, reason: String },
    #[error("bad config {file}: {reason}")]
    Config { file: String, reason: String },
}
