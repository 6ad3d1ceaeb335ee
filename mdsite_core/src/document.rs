use tracing::debug;

use crate::HtmlNode;
use crate::SiteError;
use crate::SiteResult;
use crate::block_to_html_node;
use crate::split_blocks;

/// A markdown document rendered to an HTML body together with its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
	pub title: String,
	pub content: String,
}

/// Convert a whole markdown document into a single `div` node holding one
/// child per block.
pub fn markdown_to_html_node(markdown: &str) -> SiteResult<HtmlNode> {
	let blocks = split_blocks(markdown);
	debug!(blocks = blocks.len(), "converting markdown document");

	let children = blocks
		.iter()
		.map(|block| block_to_html_node(block))
		.collect::<SiteResult<Vec<_>>>()?;

	Ok(HtmlNode::parent("div", children))
}

/// Return the text of the first `# ` heading line, trimmed.
///
/// Only level one headings count, and the `#` must be followed by a space.
pub fn extract_title(markdown: &str) -> SiteResult<String> {
	markdown
		.split('\n')
		.find_map(|line| line.strip_prefix("# "))
		.map(|title| title.trim().to_string())
		.ok_or(SiteError::NoTitle)
}

/// Render the HTML body and extract the title in one step.
pub fn render_markdown(markdown: &str) -> SiteResult<RenderedPage> {
	let content = markdown_to_html_node(markdown)?.to_html()?;
	let title = extract_title(markdown)?;

	Ok(RenderedPage { title, content })
}
