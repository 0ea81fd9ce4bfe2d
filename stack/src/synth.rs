// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Template synthesis.
//!
//! Walks a [`ResourceGraph`] in dependency order and renders a CloudFormation
//! template. Resource tags are rendered in the shape the resource type
//! accepts; types without a `Tags` property keep their tags in the graph only.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::constants::TEMPLATE_FORMAT_VERSION;
use crate::errors::SynthError;
use crate::graph::ResourceGraph;
use crate::resources::{LogicalId, Token};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub description: String,
    pub value: Token,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TemplateResource {
    #[serde(rename = "Type")]
    pub type_name: String,
    pub properties: Value,
}

/// Resources keyed by logical id, serialized in dependency order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resources(Vec<(LogicalId, TemplateResource)>);

impl Serialize for Resources {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, resource)| (id, resource)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    #[serde(rename = "Resources")]
    pub resources: Resources,
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn resource(&self, logical_id: &str) -> Option<&TemplateResource> {
        self.resources
            .0
            .iter()
            .find(|(id, _)| id.as_str() == logical_id)
            .map(|(_, resource)| resource)
    }

    pub fn resources_of_type(&self, type_name: &str) -> Vec<&TemplateResource> {
        self.resources
            .0
            .iter()
            .map(|(_, resource)| resource)
            .filter(|resource| resource.type_name == type_name)
            .collect()
    }

    /// Logical ids in the order they are written.
    pub fn logical_ids(&self) -> Vec<&str> {
        self.resources.0.iter().map(|(id, _)| id.as_str()).collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Renders `graph` and `outputs` into a template.
///
/// # Errors
///
/// - [`SynthError::CyclicDependency`] if the graph is not a DAG
/// - [`SynthError::InvalidConfiguration`] if an output references a resource
///   that is not in the graph
#[tracing::instrument(skip_all, fields(resources = graph.len()))]
pub fn synthesize(
    graph: &ResourceGraph,
    outputs: BTreeMap<String, Output>,
) -> Result<Template, SynthError> {
    for (name, output) in &outputs {
        if let Some(target) = output.value.referenced()
            && graph.get(target).is_none()
        {
            return Err(SynthError::InvalidConfiguration(format!(
                "output {name} references undeclared resource {target}"
            )));
        }
    }

    let mut resources = Vec::with_capacity(graph.len());
    for resource in graph.topological_order()? {
        let mut properties = serde_json::to_value(&resource.properties)?;
        if let (Some(tags), Value::Object(map)) = (
            resource.tags.render(resource.properties.tagging()),
            &mut properties,
        ) {
            map.insert("Tags".into(), tags);
        }
        resources.push((
            resource.logical_id.clone(),
            TemplateResource {
                type_name: resource.type_name().to_string(),
                properties,
            },
        ));
    }

    tracing::debug!("[stack] synthesized {} resources", resources.len());

    Ok(Template {
        format_version: TEMPLATE_FORMAT_VERSION.to_string(),
        resources: Resources(resources),
        outputs,
    })
}
