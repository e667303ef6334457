//! Project configuration.
//!
//! An optional `pipesite.toml` in the project root overrides the stock
//! page list and dev-server settings. The file is sparse: set only the
//! keys you want, everything else keeps its default. Unknown keys are
//! rejected to catch typos early.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [pages]
//! templated = ["index", "login", "scores", "404"]
//! markdown = ["docs"]
//! verbatim = ["pipescore"]
//!
//! [serve]
//! port = 5000
//! app_prefix = "/pipescore"    # requests under here serve the app shell
//! app_file = "/pipescore.html"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the optional config file, looked up in the project root.
pub const CONFIG_FILE: &str = "pipesite.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SiteConfig {
    pub pages: PagesConfig,
    pub serve: ServeConfig,
}

/// The fixed, known list of pages a build processes, by kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PagesConfig {
    /// Pages rendered through the shared template.
    pub templated: Vec<String>,
    /// Markdown documents rendered through the shared template.
    pub markdown: Vec<String>,
    /// Pages copied byte-for-byte, no placeholder semantics.
    pub verbatim: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServeConfig {
    pub port: u16,
    /// Request paths under this prefix all serve `app_file`, matching the
    /// hosting provider's rewrite for the single-page editor.
    pub app_prefix: String,
    pub app_file: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            templated: to_strings(&["index", "login", "scores", "404"]),
            markdown: to_strings(&["docs"]),
            verbatim: to_strings(&["pipescore"]),
        }
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            app_prefix: "/pipescore".to_string(),
            app_file: "/pipescore.html".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load `pipesite.toml` from `root`, or the stock defaults if the file
    /// does not exist.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(&path)?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}
