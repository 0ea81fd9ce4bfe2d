// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use edge_stack::SynthError;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum AppError {
    #[error(transparent)]
    Synth(#[from] SynthError),
    #[error("lookup failed: {0}")]
    LookupError(String),
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("unable to access {0}: {1}")]
    IoError(String, String),
    #[error("invalid JSON: {0}")]
    JsonError(String),
}

impl From<serde_json::Error> for AppError {
    fn from(source: serde_json::Error) -> Self {
        tracing::error!("{:?}", source);
        AppError::JsonError(source.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(source: std::io::Error) -> Self {
        tracing::error!("{:?}", source);
        AppError::IoError(source.kind().to_string(), source.to_string())
    }
}

impl AppError {
    /// Attaches the path that failed to an I/O error.
    pub fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        tracing::error!("[controller] {}: {:?}", path.display(), source);
        AppError::IoError(path.display().to_string(), source.to_string())
    }
}
