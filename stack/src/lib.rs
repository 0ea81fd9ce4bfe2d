// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # Edge Stack
//!
//! Declares the edge of a backend HTTP API: an ACM certificate, an API Gateway
//! custom domain and stage mapping, a CloudFront distribution with a CORS
//! response headers policy, and Route53 alias records, then synthesizes them
//! into a CloudFormation template.
//!
//! ## Architecture
//!
//! ```text
//! StackConfig + Context
//!        |
//!        v
//!   EdgeStack::compose
//!        |-- ZoneResolver      (existing hosted zone, optional `api` record)
//!        +-- EdgeDistribution  (certificate -> api domain -> mapping,
//!        |                      cors policy -> distribution -> alias record)
//!        v
//!   ResourceGraph (petgraph DAG, edges from typed references)
//!        |
//!        v
//!   synthesize -> Template (JSON)
//! ```
//!
//! Nothing in this crate performs I/O. Existing resources are read from a
//! [`context::Context`] filled in by the caller, so composing the same
//! configuration against the same context always yields the same template.
//!
//! ## Modules
//!
//! - [`constants`]: fixed names, policy ids and limits
//! - [`constructs`]: the zone resolver, edge distribution and stack composer
//! - [`context`]: lookup keys and cached lookup results
//! - [`domain`]: validated domain names and environment labels
//! - [`errors`]: the [`errors::SynthError`] type
//! - [`graph`]: the resource dependency graph and typed handles
//! - [`models`]: configuration and looked-up attribute types
//! - [`resources`]: CloudFormation resource property types
//! - [`synth`]: template rendering
//! - [`tags`]: tag sets and their per-type rendering

pub mod constants;
pub mod constructs;
pub mod context;
pub mod domain;
pub mod errors;
pub mod graph;
pub mod models;
pub mod resources;
pub mod synth;
pub mod tags;

pub use constructs::stack::{EdgeStack, PublicEndpoint};
pub use context::{Context, ContextKey};
pub use domain::{DomainName, EnvironmentLabel};
pub use errors::SynthError;
pub use models::{DeploymentTarget, HostedZoneAttributes, HttpApiAttributes, StackConfig};
pub use synth::Template;
