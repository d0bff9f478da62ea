use crate::view::ViewState;
use serde::Deserialize;
use std::time::Duration;

/// Tunables for an editor session.
///
/// Every field has a default, so a config file only needs to name what it
/// changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub grid_size: f64,
    pub snap_to_grid: bool,
    pub show_grid: bool,
    /// Maximum number of history snapshots kept.
    pub history_capacity: usize,
    pub autosave_interval_secs: u64,
    /// Raster export scale relative to scene units.
    pub export_scale: f32,
    /// Scene-unit padding added on every side of exported content.
    pub export_padding: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: 20.0,
            snap_to_grid: true,
            show_grid: true,
            history_capacity: 50,
            autosave_interval_secs: 30,
            export_scale: 2.0,
            export_padding: 50.0,
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    /// Initial view state for a session using this config.
    pub fn view_state(&self) -> ViewState {
        ViewState {
            grid_size: self.grid_size,
            snap_to_grid: self.snap_to_grid,
            show_grid: self.show_grid,
            ..ViewState::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg = EditorConfig::from_json(r#"{ "gridSize": 10, "snapToGrid": false }"#).unwrap();
        assert_eq!(cfg.grid_size, 10.0);
        assert!(!cfg.snap_to_grid);
        assert_eq!(cfg.history_capacity, 50);
        assert_eq!(cfg.autosave_interval(), Duration::from_secs(30));
    }

    #[test]
    fn view_state_carries_grid_settings() {
        let cfg = EditorConfig {
            grid_size: 25.0,
            show_grid: false,
            ..EditorConfig::default()
        };
        let view = cfg.view_state();
        assert_eq!(view.grid_size, 25.0);
        assert!(!view.show_grid);
        assert_eq!(view.zoom, 1.0);
    }
}
