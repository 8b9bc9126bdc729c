//! Build configuration.
//!
//! Every key is optional in JSON; missing keys fall back to [`GraphConfig::default`].

use crate::{Direction, Error, Result, Theme};
use docgraph_layout::LayoutOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GraphConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub rank_sep: f64,
    pub node_sep: f64,
    pub edge_sep: f64,
    pub group_padding: f64,
    /// Extra room above the members for the group label.
    pub group_header: f64,
    pub max_nodes: usize,
    pub max_edges: usize,
    /// Result-count limit passed to the document source.
    pub document_limit: usize,
    pub fit_view_delay_ms: u64,
    pub curve_step: f64,
    pub palette: Palette,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 40.0,
            rank_sep: 80.0,
            node_sep: 60.0,
            edge_sep: 20.0,
            group_padding: 20.0,
            group_header: 28.0,
            max_nodes: 100,
            max_edges: 150,
            document_limit: 500,
            fit_view_delay_ms: 50,
            curve_step: 0.25,
            palette: Palette::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub light: Vec<String>,
    pub dark: Vec<String>,
}

const LIGHT_PALETTE: [&str; 10] = [
    "#3b82f6", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#ec4899", "#14b8a6", "#f97316",
    "#6366f1", "#84cc16",
];

const DARK_PALETTE: [&str; 10] = [
    "#60a5fa", "#34d399", "#fbbf24", "#f87171", "#a78bfa", "#f472b6", "#2dd4bf", "#fb923c",
    "#818cf8", "#a3e635",
];

impl Default for Palette {
    fn default() -> Self {
        Self {
            light: LIGHT_PALETTE.iter().map(|c| c.to_string()).collect(),
            dark: DARK_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Palette {
    pub fn for_theme(&self, theme: Theme) -> &[String] {
        match theme {
            Theme::Light => &self.light,
            Theme::Dark => &self.dark,
        }
    }
}

impl GraphConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        positive("nodeWidth", self.node_width)?;
        positive("nodeHeight", self.node_height)?;
        non_negative("rankSep", self.rank_sep)?;
        non_negative("nodeSep", self.node_sep)?;
        non_negative("edgeSep", self.edge_sep)?;
        non_negative("groupPadding", self.group_padding)?;
        non_negative("groupHeader", self.group_header)?;
        if !self.curve_step.is_finite() {
            return Err(Error::config("curveStep", "must be finite"));
        }
        if self.palette.light.is_empty() {
            return Err(Error::config("palette.light", "must not be empty"));
        }
        if self.palette.dark.is_empty() {
            return Err(Error::config("palette.dark", "must not be empty"));
        }
        Ok(())
    }

    pub fn layout_options(&self, direction: Direction) -> LayoutOptions {
        LayoutOptions {
            rankdir: direction,
            nodesep: self.node_sep,
            ranksep: self.rank_sep,
            edgesep: self.edge_sep,
            ..Default::default()
        }
    }
}

fn positive(key: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(Error::config(key, format!("expected a finite positive number, got {v}")))
    }
}

fn non_negative(key: &'static str, v: f64) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(Error::config(key, format!("expected a finite non-negative number, got {v}")))
    }
}
