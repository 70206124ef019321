//! Configuration types for layout-tagger.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Tagger configuration loaded from YAML file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TaggerConfig {
    /// Page rendering settings
    pub rendering: RenderingSettings,
    /// Detection settings
    pub detection: DetectionSettings,
    /// Overlap resolution settings
    pub resolution: ResolutionSettings,
    /// Template output settings
    pub template: TemplateSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

impl TaggerConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> crate::Result<Self> {
        let config: TaggerConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as YAML.
    pub fn to_yaml(&self) -> crate::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> crate::Result<()> {
        self.rendering.validate()?;
        self.detection.validate()?;

        if self.template.bbox_offset < 0 {
            return Err(Error::Config(format!(
                "template.bbox_offset must be >= 0, got {}",
                self.template.bbox_offset
            )));
        }

        if !self.template.reading_order_bias.is_finite() {
            return Err(Error::Config(
                "template.reading_order_bias must be a finite number".to_string(),
            ));
        }

        if self.logging.level.trim().is_empty() {
            return Err(Error::Config("logging.level cannot be empty".to_string()));
        }

        Ok(())
    }
}

/// Page rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderingSettings {
    /// Zoom the pages were rendered with (1.0 to 10.0)
    pub zoom: f64,
}

impl RenderingSettings {
    /// Smallest supported zoom.
    pub const MIN_ZOOM: f64 = 1.0;
    /// Largest supported zoom.
    pub const MAX_ZOOM: f64 = 10.0;

    /// Check the zoom range.
    pub fn validate(&self) -> crate::Result<()> {
        if (Self::MIN_ZOOM..=Self::MAX_ZOOM).contains(&self.zoom) {
            Ok(())
        } else {
            Err(Error::InvalidZoom(self.zoom))
        }
    }
}

impl Default for RenderingSettings {
    fn default() -> Self {
        Self { zoom: 2.0 }
    }
}

/// Detection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectionSettings {
    /// Regions scoring below this are ignored
    pub threshold: f64,
}

impl DetectionSettings {
    /// Check the threshold range.
    pub fn validate(&self) -> crate::Result<()> {
        if (0.0..=1.0).contains(&self.threshold) {
            Ok(())
        } else {
            Err(Error::InvalidThreshold(self.threshold))
        }
    }
}

impl Default for DetectionSettings {
    fn default() -> Self {
        Self { threshold: 0.3 }
    }
}

/// How overlapping regions are clustered into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingStrategy {
    /// Merge per-region neighbour sets until no two sets intersect
    #[default]
    NeighborMerge,
    /// Disjoint-set forest with path compression
    UnionFind,
}

/// Overlap resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ResolutionSettings {
    /// Grouping algorithm
    pub grouping: GroupingStrategy,
}

/// Template output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateSettings {
    /// Pixels added on each side of a region before mapping it to the page
    pub bbox_offset: i32,
    /// Constant the left edge is subtracted from in the reading-order key
    pub reading_order_bias: f64,
    /// Metadata author
    pub author: String,
    /// Version of the tagging engine the template targets
    pub sdk_version: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            bbox_offset: 2,
            reading_order_bias: 1000.0,
            author: "Generated using Docling layout".to_string(),
            sdk_version: "unknown".to_string(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error); `RUST_LOG` wins when set
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
