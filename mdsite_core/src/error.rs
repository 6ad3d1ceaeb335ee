use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SiteError {
	#[error(transparent)]
	#[diagnostic(code(mdsite::io_error))]
	Io(#[from] std::io::Error),

	#[error("unbalanced `{delimiter}` delimiter in: `{text}`")]
	#[diagnostic(
		code(mdsite::unbalanced_delimiter),
		help("every opening `**`, `_` or `` ` `` needs a matching closing delimiter in the same block")
	)]
	UnbalancedDelimiter { delimiter: String, text: String },

	#[error("parent node is missing a tag")]
	#[diagnostic(code(mdsite::missing_tag))]
	MissingTag,

	#[error("parent node `<{tag}>` is missing its children")]
	#[diagnostic(code(mdsite::missing_children))]
	MissingChildren { tag: String },

	#[error("leaf node `{tag}` is missing a value")]
	#[diagnostic(code(mdsite::missing_value))]
	MissingValue { tag: String },

	#[error("unknown block type: `{0}`")]
	#[diagnostic(
		code(mdsite::unknown_block_type),
		help("available block types: paragraph, heading, code, quote, unordered_list, ordered_list")
	)]
	UnknownBlockType(String),

	#[error("no level one heading found")]
	#[diagnostic(
		code(mdsite::no_title),
		help("add a `# Title` line so the page has a title")
	)]
	NoTitle,

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdsite::config_parse),
		help("check that site.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("symlink cycle detected at: `{path}`")]
	#[diagnostic(
		code(mdsite::symlink_cycle),
		help("remove the circular symlink or exclude this path")
	)]
	SymlinkCycle { path: String },

	#[error("refusing to use `{path}` as the output directory")]
	#[diagnostic(
		code(mdsite::unsafe_output),
		help("the output directory is deleted before every build; point it at a directory that does not contain the site sources")
	)]
	UnsafeOutput { path: String },

	#[error("failed to generate page from `{path}`")]
	#[diagnostic(code(mdsite::page))]
	Page {
		path: String,
		#[source]
		source: Box<SiteError>,
	},
}

impl SiteError {
	/// Attach the markdown file that produced this error.
	pub fn in_page(self, path: impl Into<String>) -> Self {
		Self::Page {
			path: path.into(),
			source: Box::new(self),
		}
	}
}

pub type SiteResult<T> = Result<T, SiteError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
