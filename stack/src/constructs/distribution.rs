// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Edge distribution: certificate, API custom domain and mapping, CORS
//! response headers policy, the CloudFront distribution itself and its alias
//! record.
//!
//! # Declaration order
//!
//! 1. Certificate for the public domain, DNS-validated in the hosted zone
//! 2. API custom domain bound to the certificate
//! 3. Mapping of the `$default` stage onto the custom domain
//! 4. `{environment}-cors-policy` response headers policy
//! 5. Distribution forwarding everything to the API over HTTPS, uncached
//! 6. A alias record for the public domain pointing at the distribution
//!
//! Each later resource holds tokens referencing the earlier ones, so the
//! graph edges carry the same order independently of call sequence.

use crate::constants::{
    ALL_METHODS, CACHED_METHODS, CACHING_DISABLED_POLICY_ID, CLOUDFRONT_HOSTED_ZONE_ID,
    CORS_ALLOWED_METHODS, CORS_CUSTOM_ORIGIN_POLICY_ID, CORS_MAX_AGE_SECONDS, CORS_POLICY_SUFFIX,
    CORS_WILDCARD, DEFAULT_STAGE_NAME, ERROR_PAGE_PATH, ERROR_STATUS_CODES,
};
use crate::domain::{DomainName, EnvironmentLabel};
use crate::errors::SynthError;
use crate::graph::{Handle, ResourceGraph, Scope};
use crate::models::{HostedZoneAttributes, HttpApiAttributes};
use crate::resources::{
    AliasTarget, ApiDomainName, ApiMapping, Certificate, CorsConfig, CustomErrorResponse,
    CustomOriginConfig, DefaultCacheBehavior, Distribution, DistributionConfig,
    DomainNameConfiguration, DomainValidationOption, Origin, RecordSet, ResponseHeadersPolicy,
    ResponseHeadersPolicyConfig, Token, ViewerCertificate, record_fqdn,
};
use crate::tags::Tags;

pub struct EdgeDistributionProps<'a> {
    /// Public hostname, the distribution's only alias.
    pub domain_name: &'a DomainName,
    /// Custom domain created on the API.
    pub api_domain_name: &'a DomainName,
    pub api: &'a HttpApiAttributes,
    pub hosted_zone: &'a HostedZoneAttributes,
    pub environment: EnvironmentLabel,
    pub tags: &'a Tags,
}

/// Handles to everything the edge distribution declares.
#[derive(Debug)]
pub struct EdgeDistribution {
    certificate: Handle<Certificate>,
    api_domain: Handle<ApiDomainName>,
    api_mapping: Handle<ApiMapping>,
    cors_policy: Handle<ResponseHeadersPolicy>,
    distribution: Handle<Distribution>,
    alias_record: Handle<RecordSet>,
}

impl EdgeDistribution {
    #[tracing::instrument(skip_all, fields(domain = %props.domain_name, environment = %props.environment))]
    pub fn new(
        graph: &mut ResourceGraph,
        scope: &Scope,
        props: EdgeDistributionProps<'_>,
    ) -> Result<Self, SynthError> {
        if props.api_domain_name != props.domain_name {
            tracing::warn!(
                "[stack] certificate for {} is reused for api domain {}",
                props.domain_name,
                props.api_domain_name
            );
        }

        let certificate = graph.add(
            scope,
            "Certificate",
            certificate(props.domain_name, props.hosted_zone),
        )?;

        let api_domain = graph.add(
            scope,
            "ApiDomain",
            ApiDomainName {
                domain_name: props.api_domain_name.to_string(),
                domain_name_configurations: vec![DomainNameConfiguration {
                    certificate_arn: certificate.arn(),
                    endpoint_type: "REGIONAL".into(),
                    security_policy: "TLS_1_2".into(),
                }],
            },
        )?;

        let api_mapping = graph.add(
            scope,
            "ApiMapping",
            ApiMapping {
                api_id: props.api.api_id.clone(),
                domain_name: api_domain.reference(),
                stage: DEFAULT_STAGE_NAME.into(),
            },
        )?;

        let cors_policy = graph.add(
            scope,
            "CorsResponseHeadersPolicy",
            cors_policy(props.environment),
        )?;

        let origin_id = format!("{}Origin1", scope.logical_id("Distribution"));
        let distribution = graph.add(
            scope,
            "Distribution",
            distribution(
                props.domain_name,
                props.api.origin_domain(),
                &origin_id,
                certificate.arn(),
                cors_policy.reference(),
            ),
        )?;

        let alias_record = graph.add(
            scope,
            "CloudFrontAliasRecord",
            RecordSet {
                alias_target: AliasTarget {
                    dns_name: distribution.domain_name(),
                    hosted_zone_id: CLOUDFRONT_HOSTED_ZONE_ID.into(),
                },
                comment: format!(
                    "DNS record for CloudFront distribution in {} environment",
                    props.environment
                ),
                hosted_zone_id: props.hosted_zone.hosted_zone_id.clone(),
                name: record_fqdn(props.domain_name.as_str(), &props.hosted_zone.zone_name),
                record_type: "A".into(),
            },
        )?;

        graph.tag_scope(scope, props.tags);

        Ok(Self {
            certificate,
            api_domain,
            api_mapping,
            cors_policy,
            distribution,
            alias_record,
        })
    }

    pub fn certificate(&self) -> &Handle<Certificate> {
        &self.certificate
    }

    pub fn api_domain(&self) -> &Handle<ApiDomainName> {
        &self.api_domain
    }

    pub fn api_mapping(&self) -> &Handle<ApiMapping> {
        &self.api_mapping
    }

    pub fn cors_policy(&self) -> &Handle<ResponseHeadersPolicy> {
        &self.cors_policy
    }

    pub fn distribution(&self) -> &Handle<Distribution> {
        &self.distribution
    }

    pub fn alias_record(&self) -> &Handle<RecordSet> {
        &self.alias_record
    }
}

pub fn cors_policy_name(environment: EnvironmentLabel) -> String {
    format!("{environment}-{CORS_POLICY_SUFFIX}")
}

fn certificate(domain_name: &DomainName, zone: &HostedZoneAttributes) -> Certificate {
    Certificate {
        domain_name: domain_name.to_string(),
        domain_validation_options: vec![DomainValidationOption {
            domain_name: domain_name.to_string(),
            hosted_zone_id: zone.hosted_zone_id.clone(),
        }],
        validation_method: "DNS".into(),
    }
}

fn cors_policy(environment: EnvironmentLabel) -> ResponseHeadersPolicy {
    ResponseHeadersPolicy {
        response_headers_policy_config: ResponseHeadersPolicyConfig {
            name: cors_policy_name(environment),
            cors_config: CorsConfig {
                access_control_allow_credentials: false,
                access_control_allow_headers: [CORS_WILDCARD].into(),
                access_control_allow_methods: CORS_ALLOWED_METHODS.into(),
                access_control_allow_origins: [CORS_WILDCARD].into(),
                access_control_expose_headers: [CORS_WILDCARD].into(),
                access_control_max_age_sec: CORS_MAX_AGE_SECONDS,
                origin_override: true,
            },
        },
    }
}

fn distribution(
    domain_name: &DomainName,
    origin_domain: &str,
    origin_id: &str,
    certificate_arn: Token,
    cors_policy_id: Token,
) -> Distribution {
    let to_strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();

    Distribution {
        distribution_config: DistributionConfig {
            aliases: vec![domain_name.to_string()],
            custom_error_responses: ERROR_STATUS_CODES
                .iter()
                .map(|&code| CustomErrorResponse {
                    error_code: code,
                    response_code: code,
                    response_page_path: ERROR_PAGE_PATH.into(),
                })
                .collect(),
            default_cache_behavior: DefaultCacheBehavior {
                allowed_methods: to_strings(&ALL_METHODS),
                cache_policy_id: CACHING_DISABLED_POLICY_ID.into(),
                cached_methods: to_strings(&CACHED_METHODS),
                compress: true,
                origin_request_policy_id: CORS_CUSTOM_ORIGIN_POLICY_ID.into(),
                response_headers_policy_id: cors_policy_id,
                target_origin_id: origin_id.into(),
                viewer_protocol_policy: "redirect-to-https".into(),
            },
            enabled: true,
            http_version: "http2".into(),
            ipv6_enabled: true,
            origins: vec![Origin {
                custom_origin_config: CustomOriginConfig {
                    origin_protocol_policy: "https-only".into(),
                    origin_ssl_protocols: vec!["TLSv1.2".into()],
                },
                domain_name: origin_domain.into(),
                id: origin_id.into(),
            }],
            viewer_certificate: ViewerCertificate {
                acm_certificate_arn: certificate_arn,
                minimum_protocol_version: "TLSv1.2_2021".into(),
                ssl_support_method: "sni-only".into(),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{LogicalId, ResourceProperties, ResourceType};

    struct Fixture {
        domain: DomainName,
        api_domain: DomainName,
        api: HttpApiAttributes,
        zone: HostedZoneAttributes,
        tags: Tags,
    }

    impl Fixture {
        fn new() -> Self {
            let domain = DomainName::parse("test.example.com").unwrap();
            Self {
                api_domain: DomainName::parse("api.test.example.com").unwrap(),
                api: HttpApiAttributes {
                    api_id: "test-api-id".into(),
                    api_endpoint: "https://test-api.execute-api.us-east-1.amazonaws.com".into(),
                    name: None,
                },
                zone: HostedZoneAttributes {
                    hosted_zone_id: "Z0123456789".into(),
                    zone_name: "example.com".into(),
                },
                tags: Tags::standard(EnvironmentLabel::Test, "Thwaite Howe", &domain),
                domain,
            }
        }

        fn build(&self, graph: &mut ResourceGraph) -> EdgeDistribution {
            EdgeDistribution::new(
                graph,
                &Scope::root().child("TestCloudFront"),
                EdgeDistributionProps {
                    domain_name: &self.domain,
                    api_domain_name: &self.api_domain,
                    api: &self.api,
                    hosted_zone: &self.zone,
                    environment: EnvironmentLabel::Test,
                    tags: &self.tags,
                },
            )
            .unwrap()
        }
    }

    fn distribution_of(graph: &ResourceGraph, handle: &Handle<Distribution>) -> Distribution {
        match &graph.resource(handle).unwrap().properties {
            ResourceProperties::Distribution(d) => d.clone(),
            other => panic!("unexpected properties {other:?}"),
        }
    }

    #[test]
    fn test_declares_six_resources() {
        let fixture = Fixture::new();
        let mut graph = ResourceGraph::new();
        fixture.build(&mut graph);

        let types: Vec<&str> = graph.resources().map(|r| r.type_name()).collect();
        assert_eq!(
            types,
            vec![
                Certificate::TYPE_NAME,
                ApiDomainName::TYPE_NAME,
                ApiMapping::TYPE_NAME,
                ResponseHeadersPolicy::TYPE_NAME,
                Distribution::TYPE_NAME,
                RecordSet::TYPE_NAME,
            ]
        );
    }

    #[test]
    fn test_cors_policy_name() {
        assert_eq!(cors_policy_name(EnvironmentLabel::Test), "test-cors-policy");
        assert_eq!(cors_policy_name(EnvironmentLabel::Prod), "prod-cors-policy");
        assert_eq!(cors_policy_name(EnvironmentLabel::Dev), "dev-cors-policy");
    }

    #[test]
    fn test_cors_policy_settings() {
        let policy = cors_policy(EnvironmentLabel::Test);
        let cors = &policy.response_headers_policy_config.cors_config;
        assert!(!cors.access_control_allow_credentials);
        assert!(cors.origin_override);
        assert_eq!(cors.access_control_max_age_sec, 600);
        assert_eq!(cors.access_control_allow_origins.items, vec!["*"]);
        assert_eq!(cors.access_control_allow_headers.items, vec!["*"]);
        assert_eq!(cors.access_control_allow_methods.items.len(), 5);
    }

    #[test]
    fn test_distribution_aliases_exactly_public_domain() {
        let fixture = Fixture::new();
        let mut graph = ResourceGraph::new();
        let edge = fixture.build(&mut graph);

        let config = distribution_of(&graph, edge.distribution()).distribution_config;
        assert_eq!(config.aliases, vec!["test.example.com"]);
    }

    #[test]
    fn test_distribution_behavior() {
        let fixture = Fixture::new();
        let mut graph = ResourceGraph::new();
        let edge = fixture.build(&mut graph);
        let config = distribution_of(&graph, edge.distribution()).distribution_config;

        assert_eq!(config.origins.len(), 1);
        let origin = &config.origins[0];
        assert_eq!(origin.domain_name, "test-api.execute-api.us-east-1.amazonaws.com");
        assert_eq!(origin.custom_origin_config.origin_protocol_policy, "https-only");
        assert_eq!(origin.id, config.default_cache_behavior.target_origin_id);

        let behavior = &config.default_cache_behavior;
        assert_eq!(behavior.viewer_protocol_policy, "redirect-to-https");
        assert_eq!(behavior.cache_policy_id, CACHING_DISABLED_POLICY_ID);
        assert_eq!(behavior.allowed_methods.len(), 7);
        assert_eq!(behavior.response_headers_policy_id, edge.cors_policy().reference());

        assert_eq!(config.viewer_certificate.acm_certificate_arn, edge.certificate().arn());

        let errors: Vec<(u16, u16, &str)> = config
            .custom_error_responses
            .iter()
            .map(|e| (e.error_code, e.response_code, e.response_page_path.as_str()))
            .collect();
        assert_eq!(errors, vec![(403, 403, "/error.html"), (404, 404, "/error.html")]);
    }

    #[test]
    fn test_dependencies_are_explicit() {
        let fixture = Fixture::new();
        let mut graph = ResourceGraph::new();
        let edge = fixture.build(&mut graph);

        let ids = |handles: Vec<&LogicalId>| -> Vec<String> {
            handles.into_iter().map(|id| id.to_string()).collect()
        };

        assert_eq!(
            ids(graph.dependencies(edge.distribution().logical_id())),
            vec![
                "TestCloudFrontCertificate".to_string(),
                "TestCloudFrontCorsResponseHeadersPolicy".to_string()
            ]
        );
        assert_eq!(
            ids(graph.dependencies(edge.alias_record().logical_id())),
            vec!["TestCloudFrontDistribution".to_string()]
        );
        assert_eq!(
            ids(graph.dependencies(edge.api_mapping().logical_id())),
            vec!["TestCloudFrontApiDomain".to_string()]
        );
        assert_eq!(
            ids(graph.dependencies(edge.api_domain().logical_id())),
            vec!["TestCloudFrontCertificate".to_string()]
        );
    }

    #[test]
    fn test_alias_record_targets_distribution() {
        let fixture = Fixture::new();
        let mut graph = ResourceGraph::new();
        let edge = fixture.build(&mut graph);

        let ResourceProperties::RecordSet(record) =
            &graph.resource(edge.alias_record()).unwrap().properties
        else {
            panic!("expected a record set");
        };
        assert_eq!(record.name, "test.example.com.");
        assert_eq!(record.hosted_zone_id, "Z0123456789");
        assert_eq!(record.alias_target.dns_name, edge.distribution().domain_name());
        assert_eq!(record.alias_target.hosted_zone_id, Token::from(CLOUDFRONT_HOSTED_ZONE_ID));
    }

    #[test]
    fn test_every_resource_is_tagged() {
        let fixture = Fixture::new();
        let mut graph = ResourceGraph::new();
        fixture.build(&mut graph);
        assert!(graph.resources().all(|r| r.tags == fixture.tags));
    }
}
