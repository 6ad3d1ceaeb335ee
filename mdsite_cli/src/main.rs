use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdsite_cli::Commands;
use mdsite_cli::MdsiteCli;
use mdsite_cli::OutputFormat;
use mdsite_core::AnyEmptyResult;
use mdsite_core::AnyResult;
use mdsite_core::BlockKind;
use mdsite_core::ResolvedConfig;
use mdsite_core::SiteConfig;
use mdsite_core::build_site;
use mdsite_core::classify;
use mdsite_core::markdown_to_html_node;
use mdsite_core::split_blocks;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "MDSITE_LOG";

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdsiteCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Build {
			base_path,
			output,
			format,
		}) => run_build(&args, base_path.as_deref(), output.as_deref(), *format),
		Some(Commands::Render { file, blocks }) => run_render(file, *blocks),
		None => {
			eprintln!("No subcommand specified. Run `mdsite --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<mdsite_core::SiteError>() {
			Ok(site_err) => {
				let report: miette::Report = (*site_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `MDSITE_LOG` wins over the `--verbose` default.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "info" } else { "warn" };
	let filter = EnvFilter::try_from_env(LOG_ENV)
		.unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

fn resolve_root(args: &MdsiteCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn run_build(
	args: &MdsiteCli,
	base_path: Option<&str>,
	output: Option<&Path>,
	format: OutputFormat,
) -> AnyEmptyResult {
	let root = resolve_root(args);
	let resolved = load_site_config(&root, base_path, output)?;
	let report = build_site(&resolved)?;

	match format {
		OutputFormat::Json => {
			println!("{}", serde_json::to_string_pretty(&report)?);
		}
		OutputFormat::Text => {
			for page in &report.pages {
				println!(
					"{} {} -> {}",
					colored!("generated", green),
					make_relative(&page.source, &root),
					make_relative(&page.output, &root)
				);
			}
			println!(
				"{} {} page(s) and copied {} static file(s) into {}",
				colored!("Built", bold),
				report.pages.len(),
				report.copied.len(),
				make_relative(&resolved.output, &root)
			);
		}
	}

	Ok(())
}

/// Load `site.toml` (or defaults) and apply the command line overrides.
fn load_site_config(
	root: &Path,
	base_path: Option<&str>,
	output: Option<&Path>,
) -> AnyResult<ResolvedConfig> {
	match SiteConfig::resolve_path(root) {
		Some(path) => debug!("using config file {}", path.display()),
		None => debug!("no config file found, using defaults"),
	}
	let mut config = SiteConfig::load_or_default(root)?;

	if let Some(base_path) = base_path {
		config.base_path = base_path.to_string();
	}
	if let Some(output) = output {
		config.output = output.to_path_buf();
	}

	Ok(config.resolve(root))
}

#[derive(Serialize)]
struct BlockListing {
	kind: BlockKind,
	text: String,
}

fn run_render(file: &Path, blocks: bool) -> AnyEmptyResult {
	let markdown = std::fs::read_to_string(file)?;

	if blocks {
		let listing: Vec<BlockListing> = split_blocks(&markdown)
			.into_iter()
			.map(|text| {
				BlockListing {
					kind: classify(&text),
					text,
				}
			})
			.collect();
		println!("{}", serde_json::to_string_pretty(&listing)?);
		return Ok(());
	}

	let html = markdown_to_html_node(&markdown)?.to_html()?;
	println!("{html}");

	Ok(())
}

const SAMPLE_CONFIG: &str = "# mdsite configuration\n\n# Markdown sources, rendered to HTML \
                             pages.\ncontent = \"content\"\n\n# Copied verbatim into the \
                             output.\nstatic = \"static\"\n\n# Deleted and regenerated on every \
                             build.\noutput = \"docs\"\n\ntemplate = \"template.html\"\n\n# \
                             Prefix for root-relative links, e.g. \"/my-project/\".\nbase_path \
                             = \"/\"\n\n# [exclude]\n# patterns = [\"drafts/\"]\n";

const SAMPLE_TEMPLATE: &str = "<!doctype html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" \
                               />\n    <title>{{ Title }}</title>\n    <link href=\"/index.css\" \
                               rel=\"stylesheet\" />\n  </head>\n  <body>\n    <article>{{ \
                               Content }}</article>\n  </body>\n</html>\n";

const SAMPLE_PAGE: &str = "# Hello from mdsite\n\nThis page was generated from \
                           `content/index.md`.\n\n- Edit **template.html** to change the \
                           layout\n- Add markdown files under `content/`\n";

fn run_init(args: &MdsiteCli) -> AnyEmptyResult {
	let root = resolve_root(args);
	let files = [
		(root.join("site.toml"), SAMPLE_CONFIG),
		(root.join("template.html"), SAMPLE_TEMPLATE),
		(root.join("content").join("index.md"), SAMPLE_PAGE),
	];

	let mut created = 0;
	for (path, content) in &files {
		let display = make_relative(path, &root);
		if path.exists() {
			println!("{display} already exists, skipping");
			continue;
		}

		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(path, content)?;
		println!("Created {display}");
		created += 1;
	}

	if created > 0 {
		println!();
		println!("Next steps:");
		println!("  1. Write pages under content/");
		println!("  2. Run `mdsite build` to generate the site");
	}

	Ok(())
}
