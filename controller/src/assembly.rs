// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: MIT-0

//! Writes a synthesized stack to the output directory: the template as
//! `<stack>.template.json` and a `manifest.json` naming it.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use edge_stack::{EdgeStack, Template};
use serde::{Deserialize, Serialize};

use crate::constants::{MANIFEST_FILE, MANIFEST_VERSION, STACK_ARTIFACT_TYPE, TEMPLATE_SUFFIX};
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: String,
    pub artifacts: BTreeMap<String, Artifact>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "type")]
    pub artifact_type: String,
    pub environment: String,
    pub properties: ArtifactProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactProperties {
    pub template_file: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WrittenAssembly {
    pub template_path: PathBuf,
    pub manifest_path: PathBuf,
}

impl Manifest {
    pub fn for_stack(stack: &EdgeStack) -> Self {
        let mut artifacts = BTreeMap::new();
        artifacts.insert(
            stack.name().to_string(),
            Artifact {
                artifact_type: STACK_ARTIFACT_TYPE.to_string(),
                environment: stack.target().to_string(),
                properties: ArtifactProperties {
                    template_file: template_file_name(stack.name()),
                },
            },
        );
        Self {
            version: MANIFEST_VERSION.to_string(),
            artifacts,
        }
    }
}

pub fn template_file_name(stack_name: &str) -> String {
    format!("{stack_name}{TEMPLATE_SUFFIX}")
}

/// Writes `template` and its manifest under `directory`, creating it if needed.
#[tracing::instrument(skip(stack, template), fields(stack = stack.name()))]
pub fn write_assembly(
    directory: &Path,
    stack: &EdgeStack,
    template: &Template,
) -> Result<WrittenAssembly, AppError> {
    std::fs::create_dir_all(directory).map_err(|e| AppError::io(directory, e))?;

    let template_path = directory.join(template_file_name(stack.name()));
    write_json(&template_path, template)?;

    let manifest_path = directory.join(MANIFEST_FILE);
    write_json(&manifest_path, &Manifest::for_stack(stack))?;

    tracing::info!(
        "[controller] wrote {} and {}",
        template_path.display(),
        manifest_path.display()
    );

    Ok(WrittenAssembly {
        template_path,
        manifest_path,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), AppError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|e| AppError::io(path, e))
}
