// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Typed CloudFormation resource properties.
//!
//! Each resource type is a plain data struct serializing to the property
//! shape CloudFormation expects. Cross-resource values are [`Token`]s: a
//! literal, a `Ref`, or an `Fn::GetAtt`. Tokens are the only way one resource
//! can point at another, so the dependency edges of the resource graph are
//! exactly the tokens returned by [`ResourceType::references`].
//!
//! | Struct | CloudFormation type | Tags |
//! |--------|---------------------|------|
//! | [`Certificate`] | `AWS::CertificateManager::Certificate` | list |
//! | [`ApiDomainName`] | `AWS::ApiGatewayV2::DomainName` | map |
//! | [`ApiMapping`] | `AWS::ApiGatewayV2::ApiMapping` | none |
//! | [`ResponseHeadersPolicy`] | `AWS::CloudFront::ResponseHeadersPolicy` | none |
//! | [`Distribution`] | `AWS::CloudFront::Distribution` | list |
//! | [`RecordSet`] | `AWS::Route53::RecordSet` | none |

use std::fmt;

use serde::Serialize;

use crate::tags::Tagging;

/// Unique key of a resource within a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    /// Builds an id from construct path components, keeping only ASCII
    /// alphanumerics as CloudFormation requires.
    pub fn from_path<'a>(components: impl IntoIterator<Item = &'a str>) -> Self {
        Self(
            components
                .into_iter()
                .flat_map(str::chars)
                .filter(char::is_ascii_alphanumeric)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A property value that may refer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Token {
    Literal(String),
    Ref {
        #[serde(rename = "Ref")]
        logical_id: LogicalId,
    },
    GetAtt {
        #[serde(rename = "Fn::GetAtt")]
        target: (LogicalId, String),
    },
}

impl Token {
    pub fn reference(logical_id: &LogicalId) -> Self {
        Self::Ref {
            logical_id: logical_id.clone(),
        }
    }

    pub fn attribute(logical_id: &LogicalId, attribute: &str) -> Self {
        Self::GetAtt {
            target: (logical_id.clone(), attribute.to_string()),
        }
    }

    /// The resource this token points at, if any.
    pub fn referenced(&self) -> Option<&LogicalId> {
        match self {
            Self::Literal(_) => None,
            Self::Ref { logical_id } => Some(logical_id),
            Self::GetAtt { target } => Some(&target.0),
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

/// Implemented by every resource property struct.
pub trait ResourceType: Into<ResourceProperties> {
    const TYPE_NAME: &'static str;
    const TAGGING: Tagging;

    /// Resources this one depends on.
    fn references(&self) -> Vec<&LogicalId>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainValidationOption {
    pub domain_name: String,
    pub hosted_zone_id: String,
}

/// ACM certificate validated through DNS records in an existing zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Certificate {
    pub domain_name: String,
    pub domain_validation_options: Vec<DomainValidationOption>,
    pub validation_method: String,
}

impl ResourceType for Certificate {
    const TYPE_NAME: &'static str = "AWS::CertificateManager::Certificate";
    const TAGGING: Tagging = Tagging::List;

    fn references(&self) -> Vec<&LogicalId> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomainNameConfiguration {
    pub certificate_arn: Token,
    pub endpoint_type: String,
    pub security_policy: String,
}

/// API Gateway custom domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiDomainName {
    pub domain_name: String,
    pub domain_name_configurations: Vec<DomainNameConfiguration>,
}

impl ResourceType for ApiDomainName {
    const TYPE_NAME: &'static str = "AWS::ApiGatewayV2::DomainName";
    const TAGGING: Tagging = Tagging::Map;

    fn references(&self) -> Vec<&LogicalId> {
        self.domain_name_configurations
            .iter()
            .filter_map(|c| c.certificate_arn.referenced())
            .collect()
    }
}

/// Maps an API stage onto a custom domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiMapping {
    pub api_id: String,
    pub domain_name: Token,
    pub stage: String,
}

impl ResourceType for ApiMapping {
    const TYPE_NAME: &'static str = "AWS::ApiGatewayV2::ApiMapping";
    const TAGGING: Tagging = Tagging::Unsupported;

    fn references(&self) -> Vec<&LogicalId> {
        self.domain_name.referenced().into_iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Items {
    pub items: Vec<String>,
}

impl<const N: usize> From<[&str; N]> for Items {
    fn from(values: [&str; N]) -> Self {
        Self {
            items: values.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CorsConfig {
    pub access_control_allow_credentials: bool,
    pub access_control_allow_headers: Items,
    pub access_control_allow_methods: Items,
    pub access_control_allow_origins: Items,
    pub access_control_expose_headers: Items,
    pub access_control_max_age_sec: u32,
    /// When true the policy's CORS headers replace any the origin sends.
    pub origin_override: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseHeadersPolicyConfig {
    pub name: String,
    pub cors_config: CorsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseHeadersPolicy {
    pub response_headers_policy_config: ResponseHeadersPolicyConfig,
}

impl ResourceType for ResponseHeadersPolicy {
    const TYPE_NAME: &'static str = "AWS::CloudFront::ResponseHeadersPolicy";
    const TAGGING: Tagging = Tagging::Unsupported;

    fn references(&self) -> Vec<&LogicalId> {
        Vec::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomOriginConfig {
    pub origin_protocol_policy: String,
    #[serde(rename = "OriginSSLProtocols")]
    pub origin_ssl_protocols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Origin {
    pub custom_origin_config: CustomOriginConfig,
    pub domain_name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DefaultCacheBehavior {
    pub allowed_methods: Vec<String>,
    pub cache_policy_id: String,
    pub cached_methods: Vec<String>,
    pub compress: bool,
    pub origin_request_policy_id: String,
    pub response_headers_policy_id: Token,
    pub target_origin_id: String,
    pub viewer_protocol_policy: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomErrorResponse {
    pub error_code: u16,
    pub response_code: u16,
    pub response_page_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewerCertificate {
    pub acm_certificate_arn: Token,
    pub minimum_protocol_version: String,
    pub ssl_support_method: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionConfig {
    pub aliases: Vec<String>,
    pub custom_error_responses: Vec<CustomErrorResponse>,
    pub default_cache_behavior: DefaultCacheBehavior,
    pub enabled: bool,
    pub http_version: String,
    #[serde(rename = "IPV6Enabled")]
    pub ipv6_enabled: bool,
    pub origins: Vec<Origin>,
    pub viewer_certificate: ViewerCertificate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Distribution {
    pub distribution_config: DistributionConfig,
}

impl ResourceType for Distribution {
    const TYPE_NAME: &'static str = "AWS::CloudFront::Distribution";
    const TAGGING: Tagging = Tagging::List;

    fn references(&self) -> Vec<&LogicalId> {
        let config = &self.distribution_config;
        [
            &config.default_cache_behavior.response_headers_policy_id,
            &config.viewer_certificate.acm_certificate_arn,
        ]
        .into_iter()
        .filter_map(Token::referenced)
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasTarget {
    #[serde(rename = "DNSName")]
    pub dns_name: Token,
    pub hosted_zone_id: Token,
}

/// Route53 alias record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSet {
    pub alias_target: AliasTarget,
    pub comment: String,
    pub hosted_zone_id: String,
    /// Fully qualified, with a trailing dot.
    pub name: String,
    #[serde(rename = "Type")]
    pub record_type: String,
}

impl ResourceType for RecordSet {
    const TYPE_NAME: &'static str = "AWS::Route53::RecordSet";
    const TAGGING: Tagging = Tagging::Unsupported;

    fn references(&self) -> Vec<&LogicalId> {
        [&self.alias_target.dns_name, &self.alias_target.hosted_zone_id]
            .into_iter()
            .filter_map(Token::referenced)
            .collect()
    }
}

/// Fully qualifies `record_name` under `zone_name`.
///
/// Names already ending in a dot are taken as-is, names equal to or below the
/// zone only gain the trailing dot, anything else is treated as relative:
///
/// ```text
/// ("api", "example.com")             -> "api.example.com."
/// ("api.example.com", "example.com") -> "api.example.com."
/// ```
pub fn record_fqdn(record_name: &str, zone_name: &str) -> String {
    let zone_name = zone_name.trim_end_matches('.');
    if record_name.ends_with('.') {
        record_name.to_string()
    } else if record_name == zone_name || record_name.ends_with(&format!(".{zone_name}")) {
        format!("{record_name}.")
    } else {
        format!("{record_name}.{zone_name}.")
    }
}

/// Any declared resource's properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ResourceProperties {
    Certificate(Certificate),
    ApiDomainName(ApiDomainName),
    ApiMapping(ApiMapping),
    ResponseHeadersPolicy(ResponseHeadersPolicy),
    Distribution(Distribution),
    RecordSet(RecordSet),
}

macro_rules! resource_properties {
    ($($variant:ident),+) => {
        impl ResourceProperties {
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => <$variant as ResourceType>::TYPE_NAME,)+
                }
            }

            pub fn tagging(&self) -> Tagging {
                match self {
                    $(Self::$variant(_) => <$variant as ResourceType>::TAGGING,)+
                }
            }

            pub fn references(&self) -> Vec<&LogicalId> {
                match self {
                    $(Self::$variant(p) => p.references(),)+
                }
            }
        }

        $(
            impl From<$variant> for ResourceProperties {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

resource_properties!(
    Certificate,
    ApiDomainName,
    ApiMapping,
    ResponseHeadersPolicy,
    Distribution,
    RecordSet
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_logical_id_from_path() {
        let id = LogicalId::from_path(["CloudFrontConstruct", "Cors-Policy_1"]);
        assert_eq!(id.as_str(), "CloudFrontConstructCorsPolicy1");
    }

    #[test]
    fn test_token_serialization() {
        let id = LogicalId::from_path(["Cert"]);
        assert_eq!(json!(Token::from("x")), json!("x"));
        assert_eq!(json!(Token::reference(&id)), json!({"Ref": "Cert"}));
        assert_eq!(
            json!(Token::attribute(&id, "Arn")),
            json!({"Fn::GetAtt": ["Cert", "Arn"]})
        );
    }

    #[test]
    fn test_record_fqdn() {
        assert_eq!(record_fqdn("api", "example.com"), "api.example.com.");
        assert_eq!(record_fqdn("api.example.com", "example.com"), "api.example.com.");
        assert_eq!(record_fqdn("example.com", "example.com."), "example.com.");
        assert_eq!(record_fqdn("www.other.org.", "example.com"), "www.other.org.");
        assert_eq!(record_fqdn("badexample.com", "example.com"), "badexample.com.example.com.");
    }

    #[test]
    fn test_record_set_references() {
        let dist = LogicalId::from_path(["Distribution"]);
        let record = RecordSet {
            alias_target: AliasTarget {
                dns_name: Token::attribute(&dist, "DomainName"),
                hosted_zone_id: Token::from("Z2FDTNDATAQYW2"),
            },
            comment: String::new(),
            hosted_zone_id: "Z1".into(),
            name: "a.example.com.".into(),
            record_type: "A".into(),
        };
        assert_eq!(record.references(), vec![&dist]);

        let value = json!(record);
        assert_eq!(value["AliasTarget"]["DNSName"], json!({"Fn::GetAtt": ["Distribution", "DomainName"]}));
        assert_eq!(value["Type"], "A");
    }

    #[test]
    fn test_properties_type_names() {
        let policy: ResourceProperties = ResponseHeadersPolicy {
            response_headers_policy_config: ResponseHeadersPolicyConfig {
                name: "test-cors-policy".into(),
                cors_config: CorsConfig {
                    access_control_allow_credentials: false,
                    access_control_allow_headers: ["*"].into(),
                    access_control_allow_methods: ["GET"].into(),
                    access_control_allow_origins: ["*"].into(),
                    access_control_expose_headers: ["*"].into(),
                    access_control_max_age_sec: 600,
                    origin_override: true,
                },
            },
        }
        .into();
        assert_eq!(policy.type_name(), "AWS::CloudFront::ResponseHeadersPolicy");
        assert_eq!(policy.tagging(), Tagging::Unsupported);
        let value = json!(policy);
        assert_eq!(
            value["ResponseHeadersPolicyConfig"]["CorsConfig"]["AccessControlMaxAgeSec"],
            600
        );
        assert_eq!(
            value["ResponseHeadersPolicyConfig"]["CorsConfig"]["AccessControlAllowHeaders"]["Items"],
            json!(["*"])
        );
    }
}
