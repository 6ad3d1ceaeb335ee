use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use mdsite_core::AnyEmptyResult;

#[allow(dead_code)]
pub const TEMPLATE: &str = "<html><head><title>{{ Title }}</title><link href=\"/index.css\" \
                            /></head><body>{{ Content }}</body></html>";

pub fn mdsite_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("mdsite"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("MDSITE_LOG");
	cmd
}

pub fn write_file(root: &Path, relative: &str, content: &str) -> AnyEmptyResult {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, content)?;
	Ok(())
}

/// A site with a template, one stylesheet and two pages.
#[allow(dead_code)]
pub fn scaffold_site(root: &Path) -> AnyEmptyResult {
	write_file(root, "template.html", TEMPLATE)?;
	write_file(root, "static/index.css", "body { margin: 0; }")?;
	write_file(root, "content/index.md", "# Home\n\nWelcome **home**")?;
	write_file(root, "content/blog/post.md", "# Post\n\n- one\n- two")?;
	Ok(())
}
