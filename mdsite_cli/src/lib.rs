use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Turn a tree of markdown files into a static HTML site.",
	long_about = "mdsite converts every markdown file under a content directory into an HTML \
	              page using a template, and copies a directory of static assets alongside \
	              them.\n\nQuick start:\n  mdsite init    Create a config, template and first \
	              page\n  mdsite build   Generate the site into the output directory\n  mdsite \
	              render  Print the HTML for a single markdown file"
)]
pub struct MdsiteCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the site root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Create a starter `site.toml`, `template.html` and `content/index.md`.
	///
	/// Existing files are left untouched.
	Init,
	/// Build the site.
	///
	/// Deletes the output directory, copies the static directory into it and
	/// renders every markdown file under the content directory through the
	/// template. Stops at the first page that fails to convert.
	Build {
		/// Prefix for root-relative `href` and `src` attributes, for sites
		/// served from a sub-path (e.g. `/my-project/`). Overrides
		/// `base_path` in `site.toml`.
		base_path: Option<String>,

		/// Output directory, relative to the site root. Overrides `output`
		/// in `site.toml`.
		#[arg(long, short)]
		output: Option<PathBuf>,

		/// Output format for the build summary.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Convert a single markdown file and print the HTML body.
	Render {
		/// The markdown file to convert.
		file: PathBuf,

		/// Print each block with its detected kind as JSON instead of HTML.
		#[arg(long, default_value_t = false)]
		blocks: bool,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
