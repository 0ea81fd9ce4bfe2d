// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

// Tag keys and fixed values applied to every declared resource
pub const TAG_ENVIRONMENT: &str = "Environment";
pub const TAG_PROJECT: &str = "Project";
pub const TAG_DOMAIN: &str = "Domain";
pub const TAG_MANAGED_BY: &str = "ManagedBy";
/// Matches the tag already on deployed resources.
pub const MANAGED_BY: &str = "CDK";
pub const DEFAULT_PROJECT: &str = "Thwaite Howe";

/// CloudFront only accepts viewer certificates issued in this region.
pub const CERTIFICATE_REGION: &str = "us-east-1";

/// https://docs.aws.amazon.com/AWSCloudFormation/latest/UserGuide/aws-properties-route53-aliastarget.html#cfn-route53-aliastarget-hostedzoneid
/// static for every alias that targets a CloudFront distribution
pub const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

// Managed CloudFront policies
pub const CACHING_DISABLED_POLICY_ID: &str = "4135ea2d-6df8-44a3-9df3-4b5a84be39ad";
pub const CORS_CUSTOM_ORIGIN_POLICY_ID: &str = "59781a5b-3903-41f3-afcb-af62929ccde1";

pub const CORS_POLICY_SUFFIX: &str = "cors-policy";
pub const CORS_MAX_AGE_SECONDS: u32 = 600;
pub const CORS_ALLOWED_METHODS: [&str; 5] = ["GET", "POST", "PUT", "DELETE", "OPTIONS"];
pub const CORS_WILDCARD: &str = "*";

pub const ALL_METHODS: [&str; 7] = ["GET", "HEAD", "OPTIONS", "PUT", "PATCH", "POST", "DELETE"];
pub const CACHED_METHODS: [&str; 2] = ["GET", "HEAD"];

pub const ERROR_PAGE_PATH: &str = "/error.html";
pub const ERROR_STATUS_CODES: [u16; 2] = [403, 404];

pub const DEFAULT_STAGE_NAME: &str = "$default";
/// Record created under the resolved zone when a backend endpoint is supplied
pub const API_RECORD_NAME: &str = "api";

pub const ENDPOINT_OUTPUT_ID: &str = "CloudFrontDomainName";
pub const ENDPOINT_OUTPUT_DESCRIPTION: &str = "CloudFront Distribution Domain Name";
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

// DNS limits (RFC 1035)
pub const MAX_DOMAIN_LENGTH: usize = 253;
pub const MAX_LABEL_LENGTH: usize = 63;
