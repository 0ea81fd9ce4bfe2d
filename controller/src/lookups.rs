// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Lookups of existing AWS resources.
//!
//! Results are written into the [`Context`] so a stack only needs AWS access
//! the first time it is synthesized for a given account and region.

use std::future::Future;

use aws_config::{BehaviorVersion, Region};
use aws_sdk_apigatewayv2::error::DisplayErrorContext;
use edge_stack::{Context, ContextKey, HostedZoneAttributes, HttpApiAttributes, SynthError};

use crate::constants::HOSTED_ZONE_ID_PREFIX;
use crate::errors::AppError;

/// Finds existing resources by name or id. `Ok(None)` means the resource
/// does not exist.
pub trait LookupClient {
    fn find_hosted_zone(
        &self,
        zone_name: &str,
    ) -> impl Future<Output = Result<Option<HostedZoneAttributes>, AppError>> + Send;

    fn find_http_api(
        &self,
        api_id: &str,
    ) -> impl Future<Output = Result<Option<HttpApiAttributes>, AppError>> + Send;
}

pub struct AwsLookupClient {
    route53: aws_sdk_route53::Client,
    apigateway: aws_sdk_apigatewayv2::Client,
}

impl AwsLookupClient {
    pub async fn new(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        tracing::debug!("[controller] loaded AWS configuration for {}", region);

        Self {
            route53: aws_sdk_route53::Client::new(&config),
            apigateway: aws_sdk_apigatewayv2::Client::new(&config),
        }
    }
}

impl LookupClient for AwsLookupClient {
    #[tracing::instrument(skip(self))]
    async fn find_hosted_zone(
        &self,
        zone_name: &str,
    ) -> Result<Option<HostedZoneAttributes>, AppError> {
        let fqdn = format!("{zone_name}.");
        let output = self
            .route53
            .list_hosted_zones_by_name()
            .dns_name(&fqdn)
            .send()
            .await
            .map_err(|e| AppError::LookupError(DisplayErrorContext(&e).to_string()))?;

        // results start at the requested name and continue alphabetically
        let zones: Vec<_> = output
            .hosted_zones()
            .iter()
            .filter(|zone| zone.name() == fqdn)
            .filter(|zone| !zone.config().is_some_and(|config| config.private_zone()))
            .collect();

        match zones.as_slice() {
            [] => Ok(None),
            [zone] => Ok(Some(HostedZoneAttributes {
                hosted_zone_id: zone.id().trim_start_matches(HOSTED_ZONE_ID_PREFIX).to_string(),
                zone_name: zone_name.to_string(),
            })),
            _ => Err(AppError::LookupError(format!(
                "found {} public hosted zones named {zone_name}, expected one",
                zones.len()
            ))),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn find_http_api(&self, api_id: &str) -> Result<Option<HttpApiAttributes>, AppError> {
        let output = match self.apigateway.get_api().api_id(api_id).send().await {
            Ok(output) => output,
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_not_found_exception()) =>
            {
                return Ok(None);
            }
            Err(err) => return Err(AppError::LookupError(DisplayErrorContext(&err).to_string())),
        };

        let api_endpoint = output
            .api_endpoint()
            .ok_or_else(|| AppError::LookupError(format!("api {api_id} has no endpoint")))?;

        Ok(Some(HttpApiAttributes {
            api_id: output.api_id().unwrap_or(api_id).to_string(),
            api_endpoint: api_endpoint.to_string(),
            name: output.name().map(str::to_string),
        }))
    }
}

/// Looks up every key in `keys` that `context` does not hold yet and stores
/// the results. Returns the number of entries added.
///
/// A resource that does not exist fails the lookup; nothing is cached for it.
#[tracing::instrument(skip_all, fields(keys = keys.len()))]
pub async fn resolve_missing<C: LookupClient>(
    context: &mut Context,
    keys: &[ContextKey],
    client: &C,
) -> Result<usize, AppError> {
    let missing: Vec<ContextKey> = context.missing(keys).into_iter().cloned().collect();

    for key in &missing {
        match key {
            ContextKey::HostedZone { domain_name, .. } => {
                let zone = client
                    .find_hosted_zone(domain_name)
                    .await?
                    .ok_or_else(|| SynthError::ZoneNotFound(domain_name.clone()))?;
                context.insert(key, &zone)?;
            }
            ContextKey::HttpApi { api_id, .. } => {
                let api = client
                    .find_http_api(api_id)
                    .await?
                    .ok_or_else(|| SynthError::ApiNotFound(api_id.clone()))?;
                context.insert(key, &api)?;
            }
        }
        tracing::info!("[controller] resolved {}", key);
    }

    Ok(missing.len())
}
