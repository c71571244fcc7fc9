//! Project documents.
//!
//! A project is a TOML file carrying the title, media settings and ordered
//! scenes. The CLI loads it, drives the pipeline, and writes the document
//! back with generated asset references attached so a later run (or a
//! single-scene regeneration) can pick up where it left off.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyforge_core::{ProjectMediaSettings, Scene};
use storyforge_error::{ConfigError, StoryforgeResult};

/// One story project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct Project {
    /// Display title
    title: String,
    /// Media settings shared by every scene
    settings: ProjectMediaSettings,
    /// Ordered scenes
    scenes: Vec<Scene>,
}

impl Project {
    /// Load a project document from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> StoryforgeResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::new(format!("Failed to read project {}: {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ConfigError::new(format!(
                "Failed to parse project {}: {}",
                path.display(),
                e
            ))
            .into()
        })
    }

    /// Write the project document back to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> StoryforgeResult<()> {
        let path = path.as_ref();
        let raw = toml::to_string_pretty(self).map_err(|e| {
            ConfigError::new(format!("Failed to serialize project: {}", e))
        })?;
        std::fs::write(path, raw).map_err(|e| {
            ConfigError::new(format!(
                "Failed to write project {}: {}",
                path.display(),
                e
            ))
            .into()
        })
    }

    /// Mutable access to the scenes for the pipeline stages.
    pub fn scenes_mut(&mut self) -> &mut [Scene] {
        &mut self.scenes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storyforge_core::AspectRatio;

    const SAMPLE: &str = r#"
title = "The Lighthouse"

[settings]
aspect_ratio = "9:16"
image_style = "watercolor"

[[scenes]]
id = "6c1f3c44-6a4e-4f6e-9d21-0f1df1a3a111"
order = 1
narration_text = "The sea was calm that morning."
visual_prompt = "a lighthouse at dawn, calm sea"

[[scenes]]
id = "6c1f3c44-6a4e-4f6e-9d21-0f1df1a3a222"
order = 2
narration_text = "By noon the storm had turned."
visual_prompt = "storm clouds over a rocky coast"
duration_secs = 7.5
"#;

    #[test]
    fn sample_project_parses() {
        let project: Project = toml::from_str(SAMPLE).unwrap();
        assert_eq!(project.title(), "The Lighthouse");
        assert_eq!(*project.settings().aspect_ratio(), AspectRatio::Portrait);
        assert_eq!(project.scenes().len(), 2);
        assert_eq!(project.scenes()[1].effective_duration_secs(), 7.5);
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("project.toml");

        let project: Project = toml::from_str(SAMPLE).unwrap();
        project.save(&path).unwrap();
        let reloaded = Project::load(&path).unwrap();

        assert_eq!(project, reloaded);
    }
}
