// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

/// Errors raised while validating configuration, building the resource graph,
/// or synthesizing a template.
///
/// Configuration errors are raised before any resource is declared. Lookup
/// failures carry the key or identifier that could not be resolved and are
/// never recovered from.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthError {
    #[error("invalid domain name {0:?}: {1}")]
    InvalidDomain(String, String),
    #[error("invalid environment label: {0:?} (expected one of dev, prod, test)")]
    InvalidEnvironment(String),
    #[error("configuration error: {0}")]
    InvalidConfiguration(String),
    #[error("missing context value for {0}")]
    MissingContext(String),
    #[error("malformed context value for {0}: {1}")]
    MalformedContext(String, String),
    #[error("hosted zone not found for domain {0}")]
    ZoneNotFound(String),
    #[error("http api not found: {0}")]
    ApiNotFound(String),
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(String),
    #[error("cyclic dependency detected in resource graph")]
    CyclicDependency,
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for SynthError {
    fn from(source: serde_json::Error) -> Self {
        tracing::error!("{:?}", source);
        SynthError::Serialization(source.to_string())
    }
}
