// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{CERTIFICATE_REGION, DEFAULT_PROJECT};
use crate::domain::{DomainName, EnvironmentLabel};
use crate::errors::SynthError;
use crate::resources::Token;

/// Account and region a stack is synthesized for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTarget {
    pub account: String,
    pub region: String,
}

impl DeploymentTarget {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for DeploymentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aws://{}/{}", self.account, self.region)
    }
}

/// Everything the composer needs, resolved once at the program boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Public hostname served by the distribution.
    pub domain_name: DomainName,
    /// Custom domain bound to the backend API.
    pub api_domain_name: DomainName,
    pub environment: EnvironmentLabel,
    /// Identifier of an existing HTTP API in the target account/region.
    pub api_id: String,
    /// Value of the `Project` tag.
    pub project: String,
    pub target: DeploymentTarget,
}

impl StackConfig {
    pub fn new(
        domain_name: DomainName,
        api_domain_name: DomainName,
        environment: EnvironmentLabel,
        api_id: impl Into<String>,
        target: DeploymentTarget,
    ) -> Self {
        Self {
            domain_name,
            api_domain_name,
            environment,
            api_id: api_id.into(),
            project: DEFAULT_PROJECT.to_string(),
            target,
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Checks the values the type system cannot.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.api_id.trim().is_empty() {
            return Err(SynthError::InvalidConfiguration("api id is empty".into()));
        }
        if self.project.trim().is_empty() {
            return Err(SynthError::InvalidConfiguration("project is empty".into()));
        }
        let account = &self.target.account;
        if account.is_empty() || !account.chars().all(|c| c.is_ascii_digit()) {
            return Err(SynthError::InvalidConfiguration(format!(
                "account {account:?} must be a numeric account id"
            )));
        }
        if self.target.region != CERTIFICATE_REGION {
            return Err(SynthError::InvalidConfiguration(format!(
                "distribution certificates must be issued in {CERTIFICATE_REGION}, not {}",
                self.target.region
            )));
        }
        Ok(())
    }
}

/// An existing Route53 hosted zone, as returned by a context lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZoneAttributes {
    pub hosted_zone_id: String,
    /// Zone name without the trailing dot.
    pub zone_name: String,
}

/// An existing API Gateway HTTP API, as returned by a context lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpApiAttributes {
    pub api_id: String,
    /// Endpoint as reported by API Gateway, e.g.
    /// `https://abc123.execute-api.us-east-1.amazonaws.com`.
    pub api_endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl HttpApiAttributes {
    /// Endpoint host usable as a distribution origin domain.
    pub fn origin_domain(&self) -> &str {
        let endpoint = self.api_endpoint.as_str();
        let host = endpoint
            .strip_prefix("https://")
            .or_else(|| endpoint.strip_prefix("http://"))
            .unwrap_or(endpoint);
        host.trim_end_matches('/')
    }
}

/// Regional endpoint an `api` alias record points at.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendEndpoint {
    pub dns_name: Token,
    pub hosted_zone_id: Token,
}

impl BackendEndpoint {
    pub fn new(dns_name: impl Into<Token>, hosted_zone_id: impl Into<Token>) -> Self {
        Self {
            dns_name: dns_name.into(),
            hosted_zone_id: hosted_zone_id.into(),
        }
    }
}
