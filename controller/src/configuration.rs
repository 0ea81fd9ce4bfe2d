// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::{ArgAction, Parser, Subcommand};
use edge_stack::constants::DEFAULT_PROJECT;
use edge_stack::{DeploymentTarget, DomainName, EnvironmentLabel, StackConfig};

use crate::constants::{
    DEFAULT_CONTEXT_FILE, DEFAULT_OUTPUT_DIR, DEFAULT_REGION, DEV_API_ID, DEV_DOMAIN_NAME,
    PROD_API_ID, PROD_DOMAIN_NAME, STACK_NAME_PREFIX,
};
use crate::errors::AppError;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct ControllerOptions {
    #[command(subcommand)]
    pub command: Option<Command>,
    /// Named dev or prod inputs; explicit flags take precedence
    #[arg(long, global = true, env("STACK_PRESET"))]
    pub preset: Option<Preset>,
    #[arg(long, global = true, env("DOMAIN_NAME"))]
    pub domain_name: Option<String>,
    /// Defaults to the domain name
    #[arg(long, global = true, env("API_DOMAIN_NAME"))]
    pub api_domain_name: Option<String>,
    #[arg(long, global = true, env("ENVIRONMENT"))]
    pub environment: Option<EnvironmentLabel>,
    #[arg(long, global = true, env("API_ID"))]
    pub api_id: Option<String>,
    #[arg(long, global = true, env("CDK_DEFAULT_ACCOUNT"))]
    pub account: Option<String>,
    #[arg(long, global = true, default_value = DEFAULT_REGION, env("CDK_DEFAULT_REGION"))]
    pub region: String,
    #[arg(long, global = true, default_value = DEFAULT_PROJECT, env("PROJECT_NAME"))]
    pub project: String,
    /// Defaults to CdkInfraControllerStack-{Environment}
    #[arg(long, global = true, env("STACK_NAME"))]
    pub stack_name: Option<String>,
    #[arg(long, global = true, default_value = DEFAULT_OUTPUT_DIR, env("SYNTH_OUTPUT_DIR"))]
    pub output: PathBuf,
    #[arg(long, global = true, default_value = DEFAULT_CONTEXT_FILE, env("SYNTH_CONTEXT_FILE"))]
    pub context_file: PathBuf,
    #[arg(long, global = true, default_value = "false", env("SYNTH_NO_LOOKUPS"), action = ArgAction::SetTrue)]
    pub no_lookups: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve missing context, synthesize the template and write the assembly
    Synth,
    /// Print the cached lookup results
    Context {
        /// Remove a single entry by key
        #[arg(long, conflicts_with = "clear")]
        reset: Option<String>,
        /// Remove every entry
        #[arg(long, default_value = "false", action = ArgAction::SetTrue)]
        clear: bool,
    },
}

/// Deployment inputs of the two long-lived environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Dev,
    Prod,
}

impl Preset {
    pub fn domain_name(&self) -> &'static str {
        match self {
            Self::Dev => DEV_DOMAIN_NAME,
            Self::Prod => PROD_DOMAIN_NAME,
        }
    }

    pub fn api_domain_name(&self) -> &'static str {
        self.domain_name()
    }

    pub fn environment(&self) -> EnvironmentLabel {
        match self {
            Self::Dev => EnvironmentLabel::Dev,
            Self::Prod => EnvironmentLabel::Prod,
        }
    }

    pub fn api_id(&self) -> &'static str {
        match self {
            Self::Dev => DEV_API_ID,
            Self::Prod => PROD_API_ID,
        }
    }

    pub fn stack_name(&self) -> String {
        format!("{STACK_NAME_PREFIX}-{}", self.environment().title())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.environment().as_str())
    }
}

impl FromStr for Preset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(AppError::ConfigError(format!(
                "unknown preset {s:?}, expected dev or prod"
            ))),
        }
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        ControllerOptions {
            command: None,
            preset: None,
            domain_name: None,
            api_domain_name: None,
            environment: None,
            api_id: None,
            account: None,
            region: DEFAULT_REGION.to_string(),
            project: DEFAULT_PROJECT.to_string(),
            stack_name: None,
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            context_file: PathBuf::from(DEFAULT_CONTEXT_FILE),
            no_lookups: true,
        }
    }
}

impl ControllerOptions {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Synth)
    }

    /// Builds and validates the stack configuration.
    ///
    /// Fails before any resource is declared when an input is missing or
    /// malformed.
    pub fn stack_config(&self) -> Result<StackConfig, AppError> {
        let domain_name = DomainName::parse(self.required_or_preset(
            &self.domain_name,
            Preset::domain_name,
            "--domain-name",
            "DOMAIN_NAME",
        )?)?;
        let api_domain_name = match (&self.api_domain_name, self.preset) {
            (Some(name), _) => DomainName::parse(name)?,
            (None, Some(preset)) if self.domain_name.is_none() => {
                DomainName::parse(preset.api_domain_name())?
            }
            _ => domain_name.clone(),
        };
        let environment = self.environment()?;
        let api_id = self.required_or_preset(&self.api_id, Preset::api_id, "--api-id", "API_ID")?;
        let account = required(&self.account, "--account", "CDK_DEFAULT_ACCOUNT")?;

        let config = StackConfig::new(
            domain_name,
            api_domain_name,
            environment,
            api_id,
            DeploymentTarget::new(account, self.region.as_str()),
        )
        .with_project(self.project.as_str());
        config.validate()?;

        Ok(config)
    }

    pub fn stack_name(&self) -> Result<String, AppError> {
        match (&self.stack_name, self.preset) {
            (Some(name), _) if !name.trim().is_empty() => Ok(name.trim().to_string()),
            (_, Some(preset)) if self.environment.is_none() => Ok(preset.stack_name()),
            _ => Ok(format!("{STACK_NAME_PREFIX}-{}", self.environment()?.title())),
        }
    }

    fn environment(&self) -> Result<EnvironmentLabel, AppError> {
        self.environment
            .or_else(|| self.preset.map(|preset| preset.environment()))
            .ok_or_else(|| missing("--environment", "ENVIRONMENT"))
    }

    fn required_or_preset<'a>(
        &'a self,
        value: &'a Option<String>,
        from_preset: fn(&Preset) -> &'static str,
        flag: &str,
        env: &str,
    ) -> Result<&'a str, AppError> {
        match (required(value, flag, env), self.preset) {
            (Ok(value), _) => Ok(value),
            (Err(_), Some(preset)) => Ok(from_preset(&preset)),
            (Err(err), None) => Err(err),
        }
    }
}

fn required<'a>(value: &'a Option<String>, flag: &str, env: &str) -> Result<&'a str, AppError> {
    match value.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing(flag, env)),
    }
}

fn missing(flag: &str, env: &str) -> AppError {
    AppError::ConfigError(format!("{flag} (or {env}) is required"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_stack::SynthError;

    fn options() -> ControllerOptions {
        ControllerOptions {
            domain_name: Some("dev.api.thwaitehowe.com".into()),
            environment: Some(EnvironmentLabel::Dev),
            api_id: Some("kztm729nk5".into()),
            account: Some("123456789012".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_flags() {
        let options = ControllerOptions::try_parse_from([
            "edge-controller",
            "synth",
            "--domain-name",
            "api.example.com",
            "--environment",
            "Prod",
            "--api-id",
            "abc123",
            "--account",
            "123456789012",
        ])
        .unwrap();
        assert_eq!(options.command(), Command::Synth);
        assert_eq!(options.environment, Some(EnvironmentLabel::Prod));
        assert_eq!(options.region, "us-east-1");
        assert_eq!(options.project, "Thwaite Howe");
        assert_eq!(options.output, PathBuf::from("synth.out"));
        assert!(!options.no_lookups);
    }

    #[test]
    fn test_parse_rejects_unknown_environment() {
        let result = ControllerOptions::try_parse_from([
            "edge-controller",
            "--environment",
            "staging",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_context_reset() {
        let options = ControllerOptions::try_parse_from([
            "edge-controller",
            "context",
            "--reset",
            "http-api:account=1:apiId=a:region=us-east-1",
        ])
        .unwrap();
        assert_eq!(
            options.command(),
            Command::Context {
                reset: Some("http-api:account=1:apiId=a:region=us-east-1".into()),
                clear: false,
            }
        );
    }

    #[test]
    fn test_command_defaults_to_synth() {
        assert_eq!(ControllerOptions::default().command(), Command::Synth);
    }

    #[test]
    fn test_stack_config_defaults_api_domain() {
        let config = options().stack_config().unwrap();
        assert_eq!(config.api_domain_name, config.domain_name);
        assert_eq!(config.target.to_string(), "aws://123456789012/us-east-1");
        assert_eq!(config.project, "Thwaite Howe");
    }

    #[test]
    fn test_stack_config_requires_account() {
        let options = ControllerOptions {
            account: None,
            ..options()
        };
        assert_eq!(
            options.stack_config().unwrap_err(),
            AppError::ConfigError("--account (or CDK_DEFAULT_ACCOUNT) is required".into())
        );
    }

    #[test]
    fn test_stack_config_rejects_invalid_domain() {
        let options = ControllerOptions {
            domain_name: Some("localhost".into()),
            ..options()
        };
        assert!(matches!(
            options.stack_config(),
            Err(AppError::Synth(SynthError::InvalidDomain(_, _)))
        ));
    }

    #[test]
    fn test_stack_config_rejects_other_regions() {
        let options = ControllerOptions {
            region: "eu-west-1".into(),
            ..options()
        };
        assert!(matches!(
            options.stack_config(),
            Err(AppError::Synth(SynthError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn test_stack_name() {
        assert_eq!(options().stack_name().unwrap(), "CdkInfraControllerStack-Dev");
        let named = ControllerOptions {
            stack_name: Some("Custom".into()),
            ..options()
        };
        assert_eq!(named.stack_name().unwrap(), "Custom");
    }

    #[test]
    fn test_dev_preset_fills_inputs() {
        let options = ControllerOptions {
            preset: Some(Preset::Dev),
            account: Some("123456789012".into()),
            ..Default::default()
        };
        let config = options.stack_config().unwrap();
        assert_eq!(config.domain_name.as_str(), "dev.api.thwaitehowe.com");
        assert_eq!(config.api_domain_name.as_str(), "dev.api.thwaitehowe.com");
        assert_eq!(config.environment, EnvironmentLabel::Dev);
        assert_eq!(config.api_id, "kztm729nk5");
        assert_eq!(config.target.to_string(), "aws://123456789012/us-east-1");
        assert_eq!(options.stack_name().unwrap(), "CdkInfraControllerStack-Dev");
    }

    #[test]
    fn test_prod_preset_fills_inputs() {
        let options = ControllerOptions {
            preset: Some(Preset::Prod),
            account: Some("123456789012".into()),
            ..Default::default()
        };
        let config = options.stack_config().unwrap();
        assert_eq!(config.domain_name.as_str(), "api.thwaitehowe.com");
        assert_eq!(config.environment, EnvironmentLabel::Prod);
        assert_eq!(config.api_id, "your-prod-api-gateway-id");
        assert_eq!(options.stack_name().unwrap(), "CdkInfraControllerStack-Prod");
    }

    #[test]
    fn test_flags_override_preset() {
        let options = ControllerOptions {
            preset: Some(Preset::Dev),
            domain_name: Some("staging.example.com".into()),
            environment: Some(EnvironmentLabel::Test),
            api_id: Some("abc123".into()),
            account: Some("123456789012".into()),
            ..Default::default()
        };
        let config = options.stack_config().unwrap();
        assert_eq!(config.domain_name.as_str(), "staging.example.com");
        assert_eq!(config.api_domain_name.as_str(), "staging.example.com");
        assert_eq!(config.environment, EnvironmentLabel::Test);
        assert_eq!(config.api_id, "abc123");
        assert_eq!(options.stack_name().unwrap(), "CdkInfraControllerStack-Test");
    }

    #[test]
    fn test_parse_preset() {
        let options = ControllerOptions::try_parse_from([
            "edge-controller",
            "synth",
            "--preset",
            "prod",
        ])
        .unwrap();
        assert_eq!(options.preset, Some(Preset::Prod));
        assert!(ControllerOptions::try_parse_from(["edge-controller", "--preset", "qa"]).is_err());
    }
}
