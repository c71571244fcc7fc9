//! Pipeline configuration.
//!
//! TOML-based configuration with precedence:
//! - Bundled defaults (include_str! from storyforge.toml)
//! - User overrides (./storyforge.toml or ~/.config/storyforge/storyforge.toml)

use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use storyforge_error::{ConfigError, StoryforgeResult};
use tracing::{debug, instrument};

/// Inter-item delays per stage, in seconds.
///
/// The image and voice backends are free services that throttle by IP; the
/// video delay paces local ffmpeg work so a long project does not peg the
/// machine.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StageDelays {
    /// Delay between image generations
    #[serde(default = "default_image_delay")]
    pub image_secs: f64,
    /// Delay between voice generations
    #[serde(default = "default_voice_delay")]
    pub voice_secs: f64,
    /// Delay between clip renders
    #[serde(default = "default_video_delay")]
    pub video_secs: f64,
}

fn default_image_delay() -> f64 {
    2.0
}

fn default_voice_delay() -> f64 {
    1.0
}

fn default_video_delay() -> f64 {
    3.0
}

impl Default for StageDelays {
    fn default() -> Self {
        Self {
            image_secs: default_image_delay(),
            voice_secs: default_voice_delay(),
            video_secs: default_video_delay(),
        }
    }
}

impl StageDelays {
    /// Image-stage inter-item delay.
    pub fn image(&self) -> Duration {
        Duration::from_secs_f64(self.image_secs)
    }

    /// Voice-stage inter-item delay.
    pub fn voice(&self) -> Duration {
        Duration::from_secs_f64(self.voice_secs)
    }

    /// Video-stage inter-item delay.
    pub fn video(&self) -> Duration {
        Duration::from_secs_f64(self.video_secs)
    }
}

/// Hard wall-clock limits for ffmpeg invocations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RenderTimeouts {
    /// Limit for a single clip encode
    #[serde(default = "default_render_timeout")]
    pub render_secs: u64,
    /// Limit for the concat pass
    #[serde(default = "default_concat_timeout")]
    pub concat_secs: u64,
}

fn default_render_timeout() -> u64 {
    120
}

fn default_concat_timeout() -> u64 {
    60
}

impl Default for RenderTimeouts {
    fn default() -> Self {
        Self {
            render_secs: default_render_timeout(),
            concat_secs: default_concat_timeout(),
        }
    }
}

impl RenderTimeouts {
    /// Single-clip encode limit.
    pub fn render(&self) -> Duration {
        Duration::from_secs(self.render_secs)
    }

    /// Concat pass limit.
    pub fn concat(&self) -> Duration {
        Duration::from_secs(self.concat_secs)
    }
}

/// Top-level pipeline configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct PipelineConfig {
    /// Stage pacing
    #[serde(default)]
    pub delays: StageDelays,
    /// ffmpeg limits
    #[serde(default)]
    pub timeouts: RenderTimeouts,
}

impl PipelineConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> StoryforgeResult<Self> {
        debug!("Loading pipeline configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Sources in order of precedence (later overrides earlier):
    /// 1. Bundled defaults (storyforge.toml shipped with the crate)
    /// 2. `~/.config/storyforge/storyforge.toml`
    /// 3. `./storyforge.toml`
    ///
    /// User files are optional and silently skipped when absent.
    #[instrument]
    pub fn load() -> StoryforgeResult<Self> {
        debug!("Loading pipeline configuration with precedence");

        const DEFAULT_CONFIG: &str = include_str!("../storyforge.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyforge/storyforge.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyforge").required(false));

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        let config: PipelineConfig =
            toml_from_str(include_str!("../storyforge.toml"));
        assert_eq!(config.delays.image(), Duration::from_secs(2));
        assert_eq!(config.delays.voice(), Duration::from_secs(1));
        assert_eq!(config.delays.video(), Duration::from_secs(3));
        assert_eq!(config.timeouts.render(), Duration::from_secs(120));
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: PipelineConfig = toml_from_str("");
        assert_eq!(config, PipelineConfig::default());
    }

    fn toml_from_str(raw: &str) -> PipelineConfig {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }
}
