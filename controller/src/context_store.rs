// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use edge_stack::Context;

use crate::errors::AppError;

/// The on-disk lookup cache. A missing file is an empty context.
#[derive(Debug, Clone)]
pub struct ContextStore {
    path: PathBuf,
}

impl ContextStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Context, AppError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let context: Context = serde_json::from_str(&text)?;
                tracing::debug!(
                    "[controller] loaded {} context entries from {}",
                    context.len(),
                    self.path.display()
                );
                Ok(context)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("[controller] no context file at {}", self.path.display());
                Ok(Context::new())
            }
            Err(e) => Err(AppError::io(&self.path, e)),
        }
    }

    pub fn save(&self, context: &Context) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let mut text = serde_json::to_string_pretty(context)?;
        text.push('\n');
        std::fs::write(&self.path, text).map_err(|e| AppError::io(&self.path, e))?;

        tracing::info!(
            "[controller] saved {} context entries to {}",
            context.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_stack::{ContextKey, DeploymentTarget, HostedZoneAttributes};

    #[test]
    fn test_missing_file_is_empty_context() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContextStore::new(dir.path().join("context.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ContextStore::new(dir.path().join("nested").join("context.json"));
        let key = ContextKey::hosted_zone(
            &DeploymentTarget::new("123456789012", "us-east-1"),
            "example.com",
        );
        let mut context = Context::new();
        context
            .insert(
                &key,
                &HostedZoneAttributes {
                    hosted_zone_id: "Z1".into(),
                    zone_name: "example.com".into(),
                },
            )
            .unwrap();

        store.save(&context).unwrap();
        assert_eq!(store.load().unwrap(), context);

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"hosted-zone:account=123456789012:domainName=example.com:region=us-east-1\""));
        assert!(text.contains("\"hostedZoneId\": \"Z1\""));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            ContextStore::new(path).load(),
            Err(AppError::JsonError(_))
        ));
    }
}
