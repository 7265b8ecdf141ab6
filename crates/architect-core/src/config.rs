use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Implementer-configurable constants for the Treemap Layouter: padding,
/// header font size, and the minimum content size below which children
/// collapse instead of recursing.
///
/// Loadable from a TOML file via the `config` crate (`LayoutConstants::
/// load_from`), fixed for the lifetime of one analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LayoutConstants {
    /// Inner padding subtracted from a scope's rectangle before laying out
    /// its content.
    pub padding: f64,
    /// Height contribution of an artifact's header/title band: the content
    /// rectangle is inset by `font_size + 2 * padding` from the top.
    pub font_size: f64,
    /// Minimum content width below which children are collapsed instead of
    /// recursed into.
    pub min_width: f64,
    /// Minimum content height, see `min_width`.
    pub min_height: f64,
}

impl Default for LayoutConstants {
    fn default() -> Self {
        Self {
            padding: 4.0,
            font_size: 12.0,
            min_width: 24.0,
            min_height: 24.0,
        }
    }
}

impl LayoutConstants {
    /// Header band height: `font_size + 2 * padding`.
    pub fn header_band_height(&self) -> f64 {
        self.font_size + 2.0 * self.padding
    }

    /// Load constants from a TOML file, falling back to defaults for any
    /// field the file omits. Host applications own *where* this file lives;
    /// the core only knows how to parse it.
    pub fn load_from(path: &std::path::Path) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
