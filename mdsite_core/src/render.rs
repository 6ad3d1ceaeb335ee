use crate::BlockKind;
use crate::HtmlNode;
use crate::SiteResult;
use crate::SpanKind;
use crate::TextSpan;
use crate::block::CODE_FENCE;
use crate::block::ordered_prefix;
use crate::classify;
use crate::span_to_html_node;
use crate::text_to_children;

/// Render a single block into its HTML subtree.
pub fn block_to_html_node(block: &str) -> SiteResult<HtmlNode> {
	block_kind_to_html_node(block, classify(block))
}

/// Render `block` as the given kind, skipping classification.
pub fn block_kind_to_html_node(block: &str, kind: BlockKind) -> SiteResult<HtmlNode> {
	match kind {
		BlockKind::Paragraph => paragraph_to_html_node(block),
		BlockKind::Heading => heading_to_html_node(block),
		BlockKind::CodeFence => Ok(code_to_html_node(block)),
		BlockKind::Quote => quote_to_html_node(block),
		BlockKind::UnorderedList => unordered_list_to_html_node(block),
		BlockKind::OrderedList => ordered_list_to_html_node(block),
	}
}

fn paragraph_to_html_node(block: &str) -> SiteResult<HtmlNode> {
	let paragraph = block.split('\n').collect::<Vec<_>>().join(" ");
	Ok(HtmlNode::parent("p", text_to_children(&paragraph)?))
}

fn heading_to_html_node(block: &str) -> SiteResult<HtmlNode> {
	let level = block.chars().take_while(|c| *c == '#').count();
	let text = block.get(level + 1..).unwrap_or_default();
	Ok(HtmlNode::parent(
		format!("h{level}"),
		text_to_children(text)?,
	))
}

/// Code blocks are never tokenized. A first line made only of alphanumeric
/// characters is a language hint and is dropped.
fn code_to_html_node(block: &str) -> HtmlNode {
	let inner = block
		.strip_prefix(CODE_FENCE)
		.and_then(|rest| rest.strip_suffix(CODE_FENCE))
		.unwrap_or_default()
		.trim_matches('\n');

	let body = match inner.split_once('\n') {
		Some((first_line, rest)) if is_language_hint(first_line) => rest,
		_ => inner,
	};

	let code = span_to_html_node(&TextSpan::new(body, SpanKind::Code));
	HtmlNode::parent("pre", vec![code])
}

fn is_language_hint(line: &str) -> bool {
	!line.is_empty() && line.chars().all(char::is_alphanumeric)
}

fn quote_to_html_node(block: &str) -> SiteResult<HtmlNode> {
	let lines: Vec<&str> = block
		.split('\n')
		.filter_map(|line| {
			line.strip_prefix("> ")
				.or_else(|| line.strip_prefix('>'))
		})
		.collect();

	Ok(HtmlNode::parent(
		"blockquote",
		text_to_children(&lines.join(" "))?,
	))
}

fn unordered_list_to_html_node(block: &str) -> SiteResult<HtmlNode> {
	let items = block
		.split('\n')
		.map(|line| {
			let text = line.strip_prefix("- ").unwrap_or(line);
			Ok(HtmlNode::parent("li", text_to_children(text)?))
		})
		.collect::<SiteResult<Vec<_>>>()?;

	Ok(HtmlNode::parent("ul", items))
}

fn ordered_list_to_html_node(block: &str) -> SiteResult<HtmlNode> {
	let items = block
		.split('\n')
		.enumerate()
		.map(|(index, line)| {
			let text = line.strip_prefix(ordered_prefix(index).as_str()).unwrap_or(line);
			Ok(HtmlNode::parent("li", text_to_children(text)?))
		})
		.collect::<SiteResult<Vec<_>>>()?;

	Ok(HtmlNode::parent("ol", items))
}
