// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Domain name and environment label value types.
//!
//! [`DomainName`] enforces the DNS shape required before any resource is
//! declared: at least two labels, each 1–63 characters of ASCII alphanumerics
//! or hyphens, not starting or ending with a hyphen, 253 characters overall.
//!
//! # Parent zone derivation
//!
//! [`DomainName::parent_zone_name`] returns the last two dot-separated labels.
//! No public suffix list is consulted, so names under multi-label public
//! suffixes resolve to the suffix itself:
//!
//! ```text
//! dev.api.example.com -> example.com
//! shop.example.co.uk  -> co.uk        (known limitation)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_DOMAIN_LENGTH, MAX_LABEL_LENGTH};
use crate::errors::SynthError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Parses and validates a fully qualified domain name. A single trailing
    /// dot is accepted and dropped; letters are lowercased.
    pub fn parse(input: &str) -> Result<Self, SynthError> {
        let invalid = |reason: &str| SynthError::InvalidDomain(input.to_string(), reason.into());

        let name = input.trim().strip_suffix('.').unwrap_or(input.trim());
        if name.is_empty() {
            return Err(invalid("domain name is empty"));
        }
        if name.len() > MAX_DOMAIN_LENGTH {
            return Err(invalid("domain name exceeds 253 characters"));
        }

        let labels: Vec<&str> = name.split('.').collect();
        if labels.len() < 2 {
            return Err(invalid("domain name needs at least two labels"));
        }

        for label in &labels {
            if label.is_empty() {
                return Err(invalid("empty label"));
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(invalid("label exceeds 63 characters"));
            }
            if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
                return Err(invalid("labels may only contain letters, digits and hyphens"));
            }
            if label.starts_with('-') || label.ends_with('-') {
                return Err(invalid("labels cannot start or end with a hyphen"));
            }
        }

        Ok(Self(name.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Last two labels of the name, used as the hosted zone lookup key.
    pub fn parent_zone_name(&self) -> String {
        let labels: Vec<&str> = self.labels().collect();
        labels[labels.len().saturating_sub(2)..].join(".")
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for DomainName {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DomainName {
    type Error = SynthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DomainName> for String {
    fn from(value: DomainName) -> Self {
        value.0
    }
}

/// Deployment environment, used in resource names and the `Environment` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentLabel {
    Dev,
    Prod,
    Test,
}

impl EnvironmentLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
            Self::Test => "test",
        }
    }

    /// Capitalized form used in stack names, e.g. `CdkInfraControllerStack-Prod`.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dev => "Dev",
            Self::Prod => "Prod",
            Self::Test => "Test",
        }
    }
}

impl fmt::Display for EnvironmentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentLabel {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            "test" => Ok(Self::Test),
            _ => Err(SynthError::InvalidEnvironment(s.to_string())),
        }
    }
}
