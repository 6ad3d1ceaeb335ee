use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::SiteError;
use crate::SiteResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["site.toml", ".site.toml", ".config/site.toml"];

pub const DEFAULT_CONTENT_DIR: &str = "content";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_OUTPUT_DIR: &str = "docs";
pub const DEFAULT_TEMPLATE: &str = "template.html";
pub const DEFAULT_BASE_PATH: &str = "/";

/// Configuration loaded from a `site.toml` file.
///
/// ```toml
/// content = "content"
/// static = "static"
/// output = "docs"
/// template = "template.html"
/// base_path = "/"
///
/// [exclude]
/// patterns = ["drafts/", "*.tmp"]
/// ```
///
/// Every path is relative to the site root.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
	/// Directory holding the markdown sources.
	pub content: PathBuf,
	/// Directory of assets copied verbatim into the output.
	#[serde(rename = "static")]
	pub static_dir: PathBuf,
	/// Directory the site is written to. It is deleted before every build.
	pub output: PathBuf,
	/// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
	pub template: PathBuf,
	/// Replaces the leading `/` of `href="/` and `src="/` attributes, so the
	/// site can be served from a sub-path.
	pub base_path: String,
	/// Files and directories skipped in both the content and static trees.
	pub exclude: ExcludeConfig,
}

impl Default for SiteConfig {
	fn default() -> Self {
		Self {
			content: PathBuf::from(DEFAULT_CONTENT_DIR),
			static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
			output: PathBuf::from(DEFAULT_OUTPUT_DIR),
			template: PathBuf::from(DEFAULT_TEMPLATE),
			base_path: DEFAULT_BASE_PATH.to_string(),
			exclude: ExcludeConfig::default(),
		}
	}
}

/// Configuration for excluding files and directories from the build.
///
/// Patterns follow gitignore syntax, relative to the site root. Supports
/// negation (`!pattern`) and directory markers (trailing `/`).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ExcludeConfig {
	#[serde(default)]
	pub patterns: Vec<String>,
}

/// A [`SiteConfig`] with every path joined onto the site root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
	pub root: PathBuf,
	pub content: PathBuf,
	pub static_dir: PathBuf,
	pub output: PathBuf,
	pub template: PathBuf,
	pub base_path: String,
	pub exclude_patterns: Vec<String>,
}

impl SiteConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SiteResult<Option<SiteConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		let config: SiteConfig =
			toml::from_str(&content).map_err(|e| SiteError::ConfigParse(e.to_string()))?;

		Ok(Some(config))
	}

	/// Load the config at `root`, falling back to defaults when there is no
	/// config file.
	pub fn load_or_default(root: &Path) -> SiteResult<SiteConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	/// Join every configured path onto `root`.
	pub fn resolve(&self, root: &Path) -> ResolvedConfig {
		ResolvedConfig {
			root: root.to_path_buf(),
			content: root.join(&self.content),
			static_dir: root.join(&self.static_dir),
			output: root.join(&self.output),
			template: root.join(&self.template),
			base_path: self.base_path.clone(),
			exclude_patterns: self.exclude.patterns.clone(),
		}
	}
}
