// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Lookup context.
//!
//! Existing resources the stack depends on (the hosted zone and the HTTP API)
//! are not declared, they are looked up. Lookups happen outside the core: the
//! composer only reads their results from a [`Context`], a string-keyed map
//! that can be persisted between runs so synthesis stays a pure function of
//! configuration plus context.
//!
//! # Key format
//!
//! ```text
//! hosted-zone:account=123456789012:domainName=example.com:region=us-east-1
//! http-api:account=123456789012:apiId=abc123:region=us-east-1
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::SynthError;
use crate::models::{DeploymentTarget, HostedZoneAttributes, HttpApiAttributes};

/// Identifies one lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContextKey {
    HostedZone {
        account: String,
        domain_name: String,
        region: String,
    },
    HttpApi {
        account: String,
        api_id: String,
        region: String,
    },
}

impl ContextKey {
    pub fn hosted_zone(target: &DeploymentTarget, domain_name: &str) -> Self {
        Self::HostedZone {
            account: target.account.clone(),
            domain_name: domain_name.to_string(),
            region: target.region.clone(),
        }
    }

    pub fn http_api(target: &DeploymentTarget, api_id: &str) -> Self {
        Self::HttpApi {
            account: target.account.clone(),
            api_id: api_id.to_string(),
            region: target.region.clone(),
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostedZone {
                account,
                domain_name,
                region,
            } => write!(
                f,
                "hosted-zone:account={account}:domainName={domain_name}:region={region}"
            ),
            Self::HttpApi {
                account,
                api_id,
                region,
            } => write!(f, "http-api:account={account}:apiId={api_id}:region={region}"),
        }
    }
}

/// Cached lookup results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ContextKey) -> bool {
        self.values.contains_key(&key.to_string())
    }

    /// Keys from `keys` that have no value yet, in the given order.
    pub fn missing<'a>(&self, keys: &'a [ContextKey]) -> Vec<&'a ContextKey> {
        keys.iter().filter(|key| !self.contains(key)).collect()
    }

    pub fn insert<T: Serialize>(&mut self, key: &ContextKey, value: &T) -> Result<(), SynthError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn hosted_zone(&self, key: &ContextKey) -> Result<HostedZoneAttributes, SynthError> {
        self.read(key)
    }

    pub fn http_api(&self, key: &ContextKey) -> Result<HttpApiAttributes, SynthError> {
        self.read(key)
    }

    fn read<T: DeserializeOwned>(&self, key: &ContextKey) -> Result<T, SynthError> {
        let key = key.to_string();
        let value = self
            .values
            .get(&key)
            .ok_or_else(|| SynthError::MissingContext(key.clone()))?;
        serde_json::from_value(value.clone())
            .map_err(|err| SynthError::MalformedContext(key, err.to_string()))
    }

    /// Removes a single entry by its string key.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
