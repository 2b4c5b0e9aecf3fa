//! Packing configuration.
//!
//! The directory footprint override and the file member padding are
//! visual heuristics inherited from previously stored layouts. They are
//! kept as named, overridable settings so stored cities can be reproduced.

use crate::utils::config::{DEFAULT_DIRECTORY_FOOTPRINT, DEFAULT_MARGIN, MIN_FOOTPRINT};

/// Layout configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Gap between siblings and around each parent's bounding box
    pub margin: f64,

    /// Fixed side a parent reserves for each directory child (`None` = use the child's real size)
    pub directory_footprint: Option<f64>,

    /// Grow files by their accumulated attribute count after packing members
    pub file_member_padding: bool,

    /// Floor applied to every side before packing
    pub min_footprint: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            directory_footprint: Some(DEFAULT_DIRECTORY_FOOTPRINT),
            file_member_padding: true,
            min_footprint: MIN_FOOTPRINT,
        }
    }
}

impl LayoutConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_directory_footprint(mut self, side: Option<f64>) -> Self {
        self.directory_footprint = side;
        self
    }

    pub fn with_file_member_padding(mut self, enabled: bool) -> Self {
        self.file_member_padding = enabled;
        self
    }

    /// Check that every setting is a usable number
    pub fn validate(&self) -> Result<(), String> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(format!("margin must be a non-negative number, got {}", self.margin));
        }
        if !self.min_footprint.is_finite() || self.min_footprint <= 0.0 {
            return Err(format!(
                "minimum footprint must be positive, got {}",
                self.min_footprint
            ));
        }
        if let Some(side) = self.directory_footprint {
            if !side.is_finite() || side <= 0.0 {
                return Err(format!("directory footprint must be positive, got {}", side));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_stored_layouts() {
        let config = LayoutConfig::default();
        assert_eq!(config.margin, 1.0);
        assert_eq!(config.directory_footprint, Some(5.0));
        assert!(config.file_member_padding);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(LayoutConfig::new().with_margin(-1.0).validate().is_err());
        assert!(LayoutConfig::new().with_margin(f64::NAN).validate().is_err());
        assert!(LayoutConfig::new()
            .with_directory_footprint(Some(0.0))
            .validate()
            .is_err());
        assert!(LayoutConfig::new()
            .with_directory_footprint(None)
            .validate()
            .is_ok());
    }
}
