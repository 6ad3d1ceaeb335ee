use std::collections::HashSet;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use ignore::gitignore::Gitignore;
use ignore::gitignore::GitignoreBuilder;
use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::instrument;
use tracing::warn;

use crate::ResolvedConfig;
use crate::SiteError;
use crate::SiteResult;
use crate::render_markdown;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// A page written during a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPage {
	pub source: PathBuf,
	pub output: PathBuf,
	pub title: String,
}

/// Everything a build wrote to the output directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
	/// Static files copied into the output, in walk order.
	pub copied: Vec<PathBuf>,
	/// Pages generated from markdown, in walk order.
	pub pages: Vec<GeneratedPage>,
}

/// Fill the template placeholders and point root-relative links at
/// `base_path`.
pub fn apply_template(template: &str, title: &str, content: &str, base_path: &str) -> String {
	template
		.replace(TITLE_PLACEHOLDER, title)
		.replace(CONTENT_PLACEHOLDER, content)
		.replace("href=\"/", &format!("href=\"{base_path}"))
		.replace("src=\"/", &format!("src=\"{base_path}"))
}

/// Render one markdown file through the template at `template_path` and
/// write the result to `dest_path`, creating parent directories as needed.
pub fn generate_page(
	from_path: &Path,
	template_path: &Path,
	dest_path: &Path,
	base_path: &str,
) -> SiteResult<GeneratedPage> {
	info!(
		"generating page from {} to {} using {}",
		from_path.display(),
		dest_path.display(),
		template_path.display()
	);

	let markdown = std::fs::read_to_string(from_path)
		.map_err(|e| SiteError::from(e).in_page(from_path.display().to_string()))?;
	let template = std::fs::read_to_string(template_path)
		.map_err(|e| SiteError::from(e).in_page(from_path.display().to_string()))?;

	let page =
		render_markdown(&markdown).map_err(|e| e.in_page(from_path.display().to_string()))?;
	let html = apply_template(&template, &page.title, &page.content, base_path);

	if let Some(parent) = dest_path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(dest_path, html)?;

	Ok(GeneratedPage {
		source: from_path.to_path_buf(),
		output: dest_path.to_path_buf(),
		title: page.title,
	})
}

/// Generate a page for every `.md` file under `content_dir`, mirroring the
/// directory structure into `dest_dir` with an `.html` extension.
pub fn generate_pages_recursive(
	content_dir: &Path,
	template_path: &Path,
	dest_dir: &Path,
	base_path: &str,
) -> SiteResult<Vec<GeneratedPage>> {
	let mut pages = Vec::new();
	let walker = TreeWalker::new(Gitignore::empty());
	walker.generate_pages(content_dir, template_path, dest_dir, base_path, &mut pages)?;
	Ok(pages)
}

/// Recursively copy every file under `src` into `dest`. Returns the copied
/// destination paths.
pub fn copy_directory(src: &Path, dest: &Path) -> SiteResult<Vec<PathBuf>> {
	let mut copied = Vec::new();
	let walker = TreeWalker::new(Gitignore::empty());
	walker.copy_directory(src, dest, &mut copied)?;
	Ok(copied)
}

/// Build the whole site: wipe the output directory, copy the static tree and
/// generate every page. Stops at the first error.
#[instrument(skip_all, fields(root = %config.root.display()))]
pub fn build_site(config: &ResolvedConfig) -> SiteResult<BuildReport> {
	ensure_safe_output(config)?;

	if config.output.exists() {
		info!("deleting existing output directory {}", config.output.display());
		std::fs::remove_dir_all(&config.output)?;
	}

	let exclude = build_exclude_matcher(&config.root, &config.exclude_patterns)?;
	let walker = TreeWalker::new(exclude);
	let mut report = BuildReport::default();

	if config.static_dir.is_dir() {
		walker.copy_directory(&config.static_dir, &config.output, &mut report.copied)?;
	} else {
		warn!(
			"static directory {} does not exist, skipping asset copy",
			config.static_dir.display()
		);
		std::fs::create_dir_all(&config.output)?;
	}

	walker.generate_pages(
		&config.content,
		&config.template,
		&config.output,
		&config.base_path,
		&mut report.pages,
	)?;

	info!(
		copied = report.copied.len(),
		pages = report.pages.len(),
		"site build finished"
	);

	Ok(report)
}

/// The output directory is deleted before each build, so it must not contain
/// the site root or any of the inputs. It must not sit inside the content or
/// static tree either, or the build would walk its own output.
fn ensure_safe_output(config: &ResolvedConfig) -> SiteResult<()> {
	let output = normalize_path(&config.output);
	let inputs = [
		&config.root,
		&config.content,
		&config.static_dir,
		&config.template,
	];
	let walked = [&config.content, &config.static_dir];

	if inputs
		.iter()
		.any(|input| normalize_path(input).starts_with(&output))
		|| walked
			.iter()
			.any(|tree| output.starts_with(normalize_path(tree)))
	{
		return Err(SiteError::UnsafeOutput {
			path: config.output.display().to_string(),
		});
	}

	Ok(())
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
	let mut normalized = PathBuf::new();
	for component in path.components() {
		match component {
			Component::CurDir => {}
			Component::ParentDir => {
				normalized.pop();
			}
			other => normalized.push(other),
		}
	}
	normalized
}

/// Build a `Gitignore` matcher from the `[exclude]` patterns in `site.toml`.
fn build_exclude_matcher(root: &Path, patterns: &[String]) -> SiteResult<Gitignore> {
	let mut builder = GitignoreBuilder::new(root);
	for pattern in patterns {
		builder.add_line(None, pattern).map_err(|e| {
			SiteError::ConfigParse(format!("invalid exclude pattern `{pattern}`: {e}"))
		})?;
	}
	builder
		.build()
		.map_err(|e| SiteError::ConfigParse(format!("failed to build exclude rules: {e}")))
}

struct TreeWalker {
	exclude: Gitignore,
}

impl TreeWalker {
	fn new(exclude: Gitignore) -> Self {
		Self { exclude }
	}

	/// Directory entries that survive the exclude rules, sorted by path.
	fn entries(&self, dir: &Path) -> SiteResult<Vec<PathBuf>> {
		let mut paths = Vec::new();
		for entry in std::fs::read_dir(dir)? {
			let path = entry?.path();
			if self.exclude.matched(&path, path.is_dir()).is_ignore() {
				debug!("excluded {}", path.display());
				continue;
			}
			paths.push(path);
		}
		paths.sort();
		Ok(paths)
	}

	fn copy_directory(&self, src: &Path, dest: &Path, copied: &mut Vec<PathBuf>) -> SiteResult<()> {
		let mut visited = HashSet::new();
		self.copy_inner(src, dest, copied, &mut visited)
	}

	fn copy_inner(
		&self,
		src: &Path,
		dest: &Path,
		copied: &mut Vec<PathBuf>,
		visited: &mut HashSet<PathBuf>,
	) -> SiteResult<()> {
		let canonical = enter_directory(src, visited)?;

		if !dest.exists() {
			std::fs::create_dir_all(dest)?;
			debug!("created directory {}", dest.display());
		}

		for path in self.entries(src)? {
			let Some(name) = path.file_name() else {
				continue;
			};
			let target = dest.join(name);

			if path.is_dir() {
				self.copy_inner(&path, &target, copied, visited)?;
			} else {
				std::fs::copy(&path, &target)?;
				debug!("copied file {} -> {}", path.display(), target.display());
				copied.push(target);
			}
		}

		visited.remove(&canonical);
		Ok(())
	}

	fn generate_pages(
		&self,
		content_dir: &Path,
		template_path: &Path,
		dest_dir: &Path,
		base_path: &str,
		pages: &mut Vec<GeneratedPage>,
	) -> SiteResult<()> {
		let mut visited = HashSet::new();
		self.generate_inner(content_dir, template_path, dest_dir, base_path, pages, &mut visited)
	}

	fn generate_inner(
		&self,
		content_dir: &Path,
		template_path: &Path,
		dest_dir: &Path,
		base_path: &str,
		pages: &mut Vec<GeneratedPage>,
		visited: &mut HashSet<PathBuf>,
	) -> SiteResult<()> {
		let canonical = enter_directory(content_dir, visited)?;

		for path in self.entries(content_dir)? {
			let Some(name) = path.file_name() else {
				continue;
			};

			if path.is_dir() {
				self.generate_inner(
					&path,
					template_path,
					&dest_dir.join(name),
					base_path,
					pages,
					visited,
				)?;
			} else if is_markdown_file(&path) {
				let dest_path = dest_dir.join(name).with_extension("html");
				pages.push(generate_page(&path, template_path, &dest_path, base_path)?);
			}
		}

		visited.remove(&canonical);
		Ok(())
	}
}

/// Record `dir` on the current walk path. `visited` holds only the
/// directories being walked, so a symlink back into one of them is a cycle
/// while two links to the same sibling directory are not. Callers remove the
/// returned canonical path once they leave the directory.
fn enter_directory(dir: &Path, visited: &mut HashSet<PathBuf>) -> SiteResult<PathBuf> {
	let canonical = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
	if !visited.insert(canonical.clone()) {
		return Err(SiteError::SymlinkCycle {
			path: dir.display().to_string(),
		});
	}

	Ok(canonical)
}

fn is_markdown_file(path: &Path) -> bool {
	path.extension().and_then(|ext| ext.to_str()) == Some("md")
}
