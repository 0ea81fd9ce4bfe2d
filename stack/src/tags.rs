// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::constants::{MANAGED_BY, TAG_DOMAIN, TAG_ENVIRONMENT, TAG_MANAGED_BY, TAG_PROJECT};
use crate::domain::{DomainName, EnvironmentLabel};

/// How a resource type accepts tags in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tagging {
    /// `[{"Key": .., "Value": ..}]`
    List,
    /// `{"key": "value"}`
    Map,
    /// The type has no `Tags` property.
    Unsupported,
}

/// Key/value tags, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four tags every resource in a stack carries.
    pub fn standard(environment: EnvironmentLabel, project: &str, domain: &DomainName) -> Self {
        let mut tags = Self::new();
        tags.insert(TAG_ENVIRONMENT, environment.as_str());
        tags.insert(TAG_PROJECT, project);
        tags.insert(TAG_DOMAIN, domain.as_str());
        tags.insert(TAG_MANAGED_BY, MANAGED_BY);
        tags
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Adds every tag from `other`, overwriting values for existing keys.
    pub fn merge(&mut self, other: &Tags) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the tags in the shape `tagging` requires, `None` when the
    /// resource type cannot be tagged or there is nothing to render.
    pub fn render(&self, tagging: Tagging) -> Option<Value> {
        if self.is_empty() {
            return None;
        }
        match tagging {
            Tagging::List => Some(Value::Array(
                self.iter()
                    .map(|(key, value)| json!({"Key": key, "Value": value}))
                    .collect(),
            )),
            Tagging::Map => Some(json!(self.0)),
            Tagging::Unsupported => None,
        }
    }
}
