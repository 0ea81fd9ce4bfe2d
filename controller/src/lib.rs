// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! # Edge Controller
//!
//! Command line front end for [`edge_stack`]. It reads the deployment
//! configuration from flags and environment variables, resolves existing AWS
//! resources into a cached context, and writes the synthesized CloudFormation
//! template together with a manifest.
//!
//! ## Architecture
//!
//! ```text
//! flags / env -> ControllerOptions -> StackConfig
//!                                         |
//! context.json <-> ContextStore <-> resolve_missing -> Route53 / API Gateway v2
//!                                         |
//!                                 EdgeStack::compose -> synth.out/
//! ```
//!
//! ## Modules
//!
//! - [`application`]: runs the `synth` and `context` commands
//! - [`assembly`]: template and manifest output
//! - [`configuration`]: CLI argument parsing with clap
//! - [`constants`]: defaults and file names
//! - [`context_store`]: the on-disk lookup cache
//! - [`errors`]: application error type
//! - [`lookups`]: hosted zone and HTTP API lookups
//!
//! ## Usage
//!
//! ```bash
//! edge-controller synth --domain-name api.example.com --environment prod \
//!     --api-id abc123 --account 123456789012
//! edge-controller context --reset hosted-zone:account=123456789012:domainName=example.com:region=us-east-1
//! ```

pub mod application;
pub mod assembly;
pub mod configuration;
pub mod constants;
pub mod context_store;
pub mod errors;
pub mod lookups;
