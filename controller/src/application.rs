// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;
use std::path::PathBuf;

use edge_stack::{Context, EdgeStack, PublicEndpoint};

use crate::assembly::write_assembly;
use crate::configuration::{Command, ControllerOptions};
use crate::context_store::ContextStore;
use crate::errors::AppError;
use crate::lookups::{AwsLookupClient, LookupClient, resolve_missing};

/// Result of one `synth` run.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthSummary {
    pub stack_name: String,
    pub resources: usize,
    pub template_path: PathBuf,
    pub manifest_path: PathBuf,
    pub endpoint: PublicEndpoint,
}

impl fmt::Display for SynthSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = serde_json::to_string(&self.endpoint.value).map_err(|_| fmt::Error)?;
        writeln!(
            f,
            "{} ({} resources) -> {}",
            self.stack_name,
            self.resources,
            self.template_path.display()
        )?;
        writeln!(f)?;
        writeln!(f, "Outputs:")?;
        write!(f, "{}.{} = {}", self.stack_name, self.endpoint.output_id, value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Synthesized(SynthSummary),
    Context(Context),
}

pub struct Application<C> {
    options: ControllerOptions,
    store: ContextStore,
    client: Option<C>,
}

impl Application<AwsLookupClient> {
    pub async fn build(options: ControllerOptions) -> Result<Self, AppError> {
        let client = match options.command() {
            Command::Synth if !options.no_lookups => {
                Some(AwsLookupClient::new(&options.region).await)
            }
            Command::Synth => {
                tracing::warn!("[controller] lookups disabled, using cached context only");
                None
            }
            Command::Context { .. } => None,
        };
        Ok(Self::with_client(options, client))
    }
}

impl<C: LookupClient> Application<C> {
    /// `client` of `None` disables lookups: missing context fails synthesis.
    pub fn with_client(options: ControllerOptions, client: Option<C>) -> Self {
        let store = ContextStore::new(options.context_file.clone());
        Self {
            options,
            store,
            client,
        }
    }

    pub async fn run(&self) -> Result<Outcome, AppError> {
        match self.options.command() {
            Command::Synth => self.synth().await.map(Outcome::Synthesized),
            Command::Context { reset, clear } => {
                self.context(reset.as_deref(), clear).map(Outcome::Context)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn synth(&self) -> Result<SynthSummary, AppError> {
        let config = self.options.stack_config()?;
        let stack_name = self.options.stack_name()?;

        let mut context = self.store.load()?;
        let keys = EdgeStack::required_context(&config);
        if let Some(client) = &self.client {
            if resolve_missing(&mut context, &keys, client).await? > 0 {
                self.store.save(&context)?;
            }
        } else {
            for key in context.missing(&keys) {
                tracing::warn!("[controller] no cached context for {}", key);
            }
        }

        let stack = EdgeStack::compose(&stack_name, config, &context)?;
        let template = stack.synthesize()?;
        let written = write_assembly(&self.options.output, &stack, &template)?;

        Ok(SynthSummary {
            stack_name,
            resources: stack.graph().len(),
            template_path: written.template_path,
            manifest_path: written.manifest_path,
            endpoint: stack.public_endpoint().clone(),
        })
    }

    fn context(&self, reset: Option<&str>, clear: bool) -> Result<Context, AppError> {
        let mut context = self.store.load()?;

        if clear {
            tracing::info!("[controller] clearing {} context entries", context.len());
            context.clear();
            self.store.save(&context)?;
        } else if let Some(key) = reset {
            if context.remove(key).is_none() {
                return Err(AppError::ConfigError(format!("no context entry named {key}")));
            }
            tracing::info!("[controller] removed context entry {}", key);
            self.store.save(&context)?;
        }

        Ok(context)
    }
}
