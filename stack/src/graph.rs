// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Resource dependency graph.
//!
//! Every declared resource is a node. Edges point from a dependency to the
//! resource that references it, and are derived from the [`Token`]s in the
//! resource's properties rather than from declaration order. Synthesis walks
//! the graph in topological order so dependencies always precede dependents.
//!
//! Resources are declared under a [`Scope`], the construct path they belong
//! to. Scopes give each resource its logical id and are the unit tags are
//! applied to.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use petgraph::Direction;
use petgraph::graph::{Graph, NodeIndex};

use crate::errors::SynthError;
use crate::resources::{
    ApiDomainName, Certificate, Distribution, LogicalId, ResourceProperties, ResourceType, Token,
};
use crate::tags::Tags;

/// Construct path resources are declared under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    path: Vec<String>,
}

impl Scope {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn child(&self, id: &str) -> Self {
        let mut path = self.path.clone();
        path.push(id.to_string());
        Self { path }
    }

    /// Slash-joined path, empty for the root.
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    pub fn logical_id(&self, id: &str) -> LogicalId {
        LogicalId::from_path(self.path.iter().map(String::as_str).chain([id]))
    }

    /// True when `other` is this scope or nested under it.
    pub fn contains(&self, other: &Scope) -> bool {
        other.path.starts_with(&self.path)
    }
}

/// A declared resource.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub logical_id: LogicalId,
    /// Scope the resource was declared in.
    pub scope: Scope,
    pub properties: ResourceProperties,
    pub tags: Tags,
}

impl Resource {
    pub fn type_name(&self) -> &'static str {
        self.properties.type_name()
    }
}

/// Typed reference to a resource in a [`ResourceGraph`].
#[derive(Debug)]
pub struct Handle<P> {
    logical_id: LogicalId,
    node: NodeIndex,
    kind: PhantomData<fn() -> P>,
}

impl<P> Clone for Handle<P> {
    fn clone(&self) -> Self {
        Self {
            logical_id: self.logical_id.clone(),
            node: self.node,
            kind: PhantomData,
        }
    }
}

impl<P> Handle<P> {
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// `Ref` to the resource.
    pub fn reference(&self) -> Token {
        Token::reference(&self.logical_id)
    }

    /// `Fn::GetAtt` of one of the resource's attributes.
    pub fn attribute(&self, name: &str) -> Token {
        Token::attribute(&self.logical_id, name)
    }
}

impl Handle<Certificate> {
    pub fn arn(&self) -> Token {
        self.reference()
    }
}

impl Handle<ApiDomainName> {
    pub fn regional_domain_name(&self) -> Token {
        self.attribute("RegionalDomainName")
    }

    pub fn regional_hosted_zone_id(&self) -> Token {
        self.attribute("RegionalHostedZoneId")
    }
}

impl Handle<Distribution> {
    /// Generated `*.cloudfront.net` hostname.
    pub fn domain_name(&self) -> Token {
        self.attribute("DomainName")
    }
}

#[derive(Debug, Default)]
pub struct ResourceGraph {
    graph: Graph<Resource, ()>,
    index: BTreeMap<LogicalId, NodeIndex>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a resource under `scope` and wires an edge from every resource
    /// its properties reference.
    ///
    /// # Errors
    ///
    /// - [`SynthError::DuplicateLogicalId`] if the id is already taken
    /// - [`SynthError::InvalidConfiguration`] if a referenced resource was
    ///   never declared in this graph
    pub fn add<P: ResourceType>(
        &mut self,
        scope: &Scope,
        id: &str,
        properties: P,
    ) -> Result<Handle<P>, SynthError> {
        let logical_id = scope.logical_id(id);
        if self.index.contains_key(&logical_id) {
            return Err(SynthError::DuplicateLogicalId(logical_id.to_string()));
        }

        let dependencies = properties
            .references()
            .into_iter()
            .map(|target| {
                self.index.get(target).copied().ok_or_else(|| {
                    SynthError::InvalidConfiguration(format!(
                        "{logical_id} references undeclared resource {target}"
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let node = self.graph.add_node(Resource {
            logical_id: logical_id.clone(),
            scope: scope.clone(),
            properties: properties.into(),
            tags: Tags::new(),
        });
        for dependency in dependencies {
            self.graph.update_edge(dependency, node, ());
        }
        self.index.insert(logical_id.clone(), node);

        tracing::trace!("[stack] declared {} ({})", logical_id, P::TYPE_NAME);

        Ok(Handle {
            logical_id,
            node,
            kind: PhantomData,
        })
    }

    /// Applies `tags` to every resource declared in `scope` or below it.
    pub fn tag_scope(&mut self, scope: &Scope, tags: &Tags) {
        for resource in self.graph.node_weights_mut() {
            if scope.contains(&resource.scope) {
                resource.tags.merge(tags);
            }
        }
    }

    pub fn get(&self, logical_id: &LogicalId) -> Option<&Resource> {
        self.index
            .get(logical_id)
            .and_then(|node| self.graph.node_weight(*node))
    }

    pub fn resource<P>(&self, handle: &Handle<P>) -> Option<&Resource> {
        self.graph.node_weight(handle.node)
    }

    /// Resources in declaration order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.graph.node_weights()
    }

    pub fn resources_of_type(&self, type_name: &str) -> Vec<&Resource> {
        self.resources()
            .filter(|r| r.type_name() == type_name)
            .collect()
    }

    /// Logical ids the given resource depends on, sorted.
    pub fn dependencies(&self, logical_id: &LogicalId) -> Vec<&LogicalId> {
        let Some(node) = self.index.get(logical_id) else {
            return Vec::new();
        };
        let mut dependencies: Vec<&LogicalId> = self
            .graph
            .neighbors_directed(*node, Direction::Incoming)
            .filter_map(|n| self.graph.node_weight(n))
            .map(|r| &r.logical_id)
            .collect();
        dependencies.sort();
        dependencies
    }

    /// Resources ordered so that every dependency precedes its dependents.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::CyclicDependency`] if the graph has a cycle.
    pub fn topological_order(&self) -> Result<Vec<&Resource>, SynthError> {
        let order = petgraph::algo::toposort(&self.graph, None)
            .map_err(|_cycle| SynthError::CyclicDependency)?;
        Ok(order
            .into_iter()
            .filter_map(|node| self.graph.node_weight(node))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}
