// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_OUTPUT_DIR: &str = "synth.out";
pub const DEFAULT_CONTEXT_FILE: &str = "context.json";
pub const STACK_NAME_PREFIX: &str = "CdkInfraControllerStack";

pub const DEV_DOMAIN_NAME: &str = "dev.api.thwaitehowe.com";
pub const DEV_API_ID: &str = "kztm729nk5";
pub const PROD_DOMAIN_NAME: &str = "api.thwaitehowe.com";
// Placeholder until the prod API is deployed
pub const PROD_API_ID: &str = "your-prod-api-gateway-id";

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_VERSION: &str = "1.0.0";
pub const TEMPLATE_SUFFIX: &str = ".template.json";
pub const STACK_ARTIFACT_TYPE: &str = "aws:cloudformation:stack";

// Route53 returns zone names fully qualified and ids prefixed with this path
pub const HOSTED_ZONE_ID_PREFIX: &str = "/hostedzone/";
