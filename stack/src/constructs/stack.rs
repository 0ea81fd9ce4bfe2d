// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Stack composer: wires the zone resolver and the edge distribution together
//! for one environment, tags everything, and exposes the distribution's
//! hostname as the stack's only output.

use std::collections::BTreeMap;

use crate::constants::{ENDPOINT_OUTPUT_DESCRIPTION, ENDPOINT_OUTPUT_ID};
use crate::constructs::distribution::{EdgeDistribution, EdgeDistributionProps};
use crate::constructs::zone::{ZoneResolver, ZoneResolverProps};
use crate::context::{Context, ContextKey};
use crate::domain::{DomainName, EnvironmentLabel};
use crate::errors::SynthError;
use crate::graph::{ResourceGraph, Scope};
use crate::models::{DeploymentTarget, HostedZoneAttributes, HttpApiAttributes, StackConfig};
use crate::resources::Token;
use crate::synth::{Output, Template, synthesize};
use crate::tags::Tags;

/// Public hostname of the stack, surfaced as a template output.
#[derive(Debug, Clone, PartialEq)]
pub struct PublicEndpoint {
    pub output_id: String,
    pub description: String,
    pub value: Token,
}

#[derive(Debug)]
pub struct EdgeStack {
    name: String,
    config: StackConfig,
    graph: ResourceGraph,
    hosted_zone: HostedZoneAttributes,
    api: HttpApiAttributes,
    edge: EdgeDistribution,
    endpoint: PublicEndpoint,
}

impl EdgeStack {
    /// Every context entry [`EdgeStack::compose`] reads for `config`.
    pub fn required_context(config: &StackConfig) -> Vec<ContextKey> {
        let mut keys = ZoneResolver::context_keys(&config.domain_name, &config.target);
        keys.push(ContextKey::http_api(&config.target, &config.api_id));
        keys
    }

    /// Builds the resource graph for `config`.
    ///
    /// The configuration is validated first, then the zone and the API are
    /// resolved from `context`. Any failure aborts composition unchanged.
    #[tracing::instrument(skip(config, context), fields(environment = %config.environment))]
    pub fn compose(
        name: &str,
        config: StackConfig,
        context: &Context,
    ) -> Result<Self, SynthError> {
        config.validate()?;

        let mut graph = ResourceGraph::new();
        let root = Scope::root();
        let tags = Tags::standard(config.environment, &config.project, &config.domain_name);

        let zone = ZoneResolver::new(
            &mut graph,
            &root.child("Route53Construct"),
            ZoneResolverProps {
                domain_name: &config.domain_name,
                backend: None,
                environment: config.environment,
                target: &config.target,
                tags: &tags,
            },
            context,
        )?;

        let api = import_http_api(&config, context)?;

        let edge = EdgeDistribution::new(
            &mut graph,
            &root.child("CloudFrontConstruct"),
            EdgeDistributionProps {
                domain_name: &config.domain_name,
                api_domain_name: &config.api_domain_name,
                api: &api,
                hosted_zone: zone.hosted_zone(),
                environment: config.environment,
                tags: &tags,
            },
        )?;

        graph.tag_scope(&root, &tags);

        let endpoint = PublicEndpoint {
            output_id: ENDPOINT_OUTPUT_ID.to_string(),
            description: ENDPOINT_OUTPUT_DESCRIPTION.to_string(),
            value: edge.distribution().domain_name(),
        };

        tracing::info!(
            "[stack] composed {} with {} resources for {}",
            name,
            graph.len(),
            config.target
        );

        Ok(Self {
            name: name.to_string(),
            hosted_zone: zone.hosted_zone().clone(),
            config,
            graph,
            api,
            edge,
            endpoint,
        })
    }

    pub fn synthesize(&self) -> Result<Template, SynthError> {
        let mut outputs = BTreeMap::new();
        outputs.insert(
            self.endpoint.output_id.clone(),
            Output {
                description: self.endpoint.description.clone(),
                value: self.endpoint.value.clone(),
            },
        );
        synthesize(&self.graph, outputs)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    pub fn domain_name(&self) -> &DomainName {
        &self.config.domain_name
    }

    pub fn api_domain_name(&self) -> &DomainName {
        &self.config.api_domain_name
    }

    pub fn environment(&self) -> EnvironmentLabel {
        self.config.environment
    }

    pub fn api_id(&self) -> &str {
        &self.config.api_id
    }

    pub fn target(&self) -> &DeploymentTarget {
        &self.config.target
    }

    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    pub fn hosted_zone(&self) -> &HostedZoneAttributes {
        &self.hosted_zone
    }

    pub fn api(&self) -> &HttpApiAttributes {
        &self.api
    }

    pub fn edge(&self) -> &EdgeDistribution {
        &self.edge
    }

    pub fn public_endpoint(&self) -> &PublicEndpoint {
        &self.endpoint
    }
}

/// Reads the existing HTTP API for `config.api_id` from context.
fn import_http_api(config: &StackConfig, context: &Context) -> Result<HttpApiAttributes, SynthError> {
    let api = context.http_api(&ContextKey::http_api(&config.target, &config.api_id))?;
    if api.api_id != config.api_id {
        return Err(SynthError::ApiNotFound(config.api_id.clone()));
    }
    Ok(api)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StackConfig {
        StackConfig::new(
            DomainName::parse("api.example.com").unwrap(),
            DomainName::parse("api.example.com").unwrap(),
            EnvironmentLabel::Prod,
            "abc123",
            DeploymentTarget::new("123456789012", "us-east-1"),
        )
    }

    fn context() -> Context {
        let config = config();
        let mut context = Context::new();
        let keys = EdgeStack::required_context(&config);
        context
            .insert(
                &keys[0],
                &HostedZoneAttributes {
                    hosted_zone_id: "Z0123456789".into(),
                    zone_name: "example.com".into(),
                },
            )
            .unwrap();
        context
            .insert(
                &keys[1],
                &HttpApiAttributes {
                    api_id: "abc123".into(),
                    api_endpoint: "https://abc123.execute-api.us-east-1.amazonaws.com".into(),
                    name: Some("backend".into()),
                },
            )
            .unwrap();
        context
    }

    #[test]
    fn test_required_context_keys() {
        let keys: Vec<String> = EdgeStack::required_context(&config())
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            keys,
            vec![
                "hosted-zone:account=123456789012:domainName=example.com:region=us-east-1",
                "http-api:account=123456789012:apiId=abc123:region=us-east-1",
            ]
        );
    }

    #[test]
    fn test_compose_exposes_distribution_hostname() {
        let stack = EdgeStack::compose("TestStack", config(), &context()).unwrap();
        let endpoint = stack.public_endpoint();
        assert_eq!(endpoint.output_id, "CloudFrontDomainName");
        assert_eq!(endpoint.value, stack.edge().distribution().domain_name());
    }

    #[test]
    fn test_compose_without_api_context_fails() {
        let config = config();
        let mut context = context();
        context.remove(&ContextKey::http_api(&config.target, "abc123").to_string());
        let err = EdgeStack::compose("TestStack", config, &context).unwrap_err();
        assert!(matches!(err, SynthError::MissingContext(key) if key.starts_with("http-api:")));
    }

    #[test]
    fn test_compose_rejects_mismatched_api() {
        let config = config();
        let mut context = context();
        context
            .insert(
                &ContextKey::http_api(&config.target, "abc123"),
                &HttpApiAttributes {
                    api_id: "other".into(),
                    api_endpoint: "https://other.execute-api.us-east-1.amazonaws.com".into(),
                    name: None,
                },
            )
            .unwrap();
        assert_eq!(
            EdgeStack::compose("TestStack", config, &context).unwrap_err(),
            SynthError::ApiNotFound("abc123".into())
        );
    }

    #[test]
    fn test_compose_validates_before_declaring() {
        let mut config = config();
        config.target.region = "eu-west-1".into();
        // an empty context would otherwise surface as a missing zone
        let err = EdgeStack::compose("TestStack", config, &Context::new()).unwrap_err();
        assert!(matches!(err, SynthError::InvalidConfiguration(_)));
    }
}
