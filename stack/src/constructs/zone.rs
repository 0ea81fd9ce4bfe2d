// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Zone resolver: finds the existing hosted zone for a domain and optionally
//! points an `api` alias record in it at a backend endpoint.

use crate::constants::API_RECORD_NAME;
use crate::context::{Context, ContextKey};
use crate::domain::{DomainName, EnvironmentLabel};
use crate::errors::SynthError;
use crate::graph::{Handle, ResourceGraph, Scope};
use crate::models::{BackendEndpoint, DeploymentTarget, HostedZoneAttributes};
use crate::resources::{AliasTarget, RecordSet, record_fqdn};
use crate::tags::Tags;

pub struct ZoneResolverProps<'a> {
    pub domain_name: &'a DomainName,
    /// When set, an `api` alias record is declared under the zone.
    pub backend: Option<BackendEndpoint>,
    pub environment: EnvironmentLabel,
    pub target: &'a DeploymentTarget,
    pub tags: &'a Tags,
}

#[derive(Debug)]
pub struct ZoneResolver {
    hosted_zone: HostedZoneAttributes,
    api_record: Option<Handle<RecordSet>>,
}

impl ZoneResolver {
    /// Context keys [`ZoneResolver::new`] will read.
    pub fn context_keys(domain_name: &DomainName, target: &DeploymentTarget) -> Vec<ContextKey> {
        vec![ContextKey::hosted_zone(target, &domain_name.parent_zone_name())]
    }

    #[tracing::instrument(skip_all, fields(domain = %props.domain_name))]
    pub fn new(
        graph: &mut ResourceGraph,
        scope: &Scope,
        props: ZoneResolverProps<'_>,
        context: &Context,
    ) -> Result<Self, SynthError> {
        let hosted_zone = resolve_zone(props.domain_name, props.target, context)?;

        tracing::debug!(
            "[stack] resolved zone {} ({}) for {}",
            hosted_zone.zone_name,
            hosted_zone.hosted_zone_id,
            props.domain_name
        );

        let api_record = match props.backend {
            Some(backend) => Some(graph.add(
                scope,
                "ApiAliasRecord",
                RecordSet {
                    alias_target: AliasTarget {
                        dns_name: backend.dns_name,
                        hosted_zone_id: backend.hosted_zone_id,
                    },
                    comment: format!(
                        "DNS record for API Gateway in {} environment",
                        props.environment
                    ),
                    hosted_zone_id: hosted_zone.hosted_zone_id.clone(),
                    name: record_fqdn(API_RECORD_NAME, &hosted_zone.zone_name),
                    record_type: "A".into(),
                },
            )?),
            None => None,
        };

        graph.tag_scope(scope, props.tags);

        Ok(Self {
            hosted_zone,
            api_record,
        })
    }

    pub fn hosted_zone(&self) -> &HostedZoneAttributes {
        &self.hosted_zone
    }

    pub fn api_record(&self) -> Option<&Handle<RecordSet>> {
        self.api_record.as_ref()
    }
}

/// Looks up the hosted zone named after the last two labels of `domain_name`.
///
/// The zone is never created. A missing context entry, or an entry for a
/// differently named zone, aborts synthesis.
pub fn resolve_zone(
    domain_name: &DomainName,
    target: &DeploymentTarget,
    context: &Context,
) -> Result<HostedZoneAttributes, SynthError> {
    let parent = domain_name.parent_zone_name();
    let zone = context.hosted_zone(&ContextKey::hosted_zone(target, &parent))?;
    if zone.zone_name.trim_end_matches('.') != parent {
        return Err(SynthError::ZoneNotFound(parent));
    }
    Ok(zone)
}
