use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::SiteError;

/// The fence that opens and closes a code block.
pub const CODE_FENCE: &str = "```";

/// The structural kind of a block, derived from its raw text by [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
	Paragraph,
	Heading,
	#[serde(rename = "code")]
	CodeFence,
	Quote,
	UnorderedList,
	OrderedList,
}

impl BlockKind {
	pub const ALL: [BlockKind; 6] = [
		BlockKind::Paragraph,
		BlockKind::Heading,
		BlockKind::CodeFence,
		BlockKind::Quote,
		BlockKind::UnorderedList,
		BlockKind::OrderedList,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			BlockKind::Paragraph => "paragraph",
			BlockKind::Heading => "heading",
			BlockKind::CodeFence => "code",
			BlockKind::Quote => "quote",
			BlockKind::UnorderedList => "unordered_list",
			BlockKind::OrderedList => "ordered_list",
		}
	}
}

impl Display for BlockKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for BlockKind {
	type Err = SiteError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str() == value)
			.ok_or_else(|| SiteError::UnknownBlockType(value.to_string()))
	}
}

/// Split a document into blocks on blank lines. Each block is trimmed and
/// empty blocks are dropped.
pub fn split_blocks(markdown: &str) -> Vec<String> {
	markdown
		.split("\n\n")
		.map(str::trim)
		.filter(|block| !block.is_empty())
		.map(ToString::to_string)
		.collect()
}

fn heading_regex() -> &'static Regex {
	static HEADING_REGEX: OnceLock<Regex> = OnceLock::new();
	HEADING_REGEX.get_or_init(|| Regex::new(r"^#{1,6} ").expect("invalid heading regex"))
}

/// Classify a block. Checks run in a fixed order and the first match wins.
pub fn classify(block: &str) -> BlockKind {
	if heading_regex().is_match(block) {
		return BlockKind::Heading;
	}

	if block.len() >= CODE_FENCE.len() * 2
		&& block.starts_with(CODE_FENCE)
		&& block.ends_with(CODE_FENCE)
	{
		return BlockKind::CodeFence;
	}

	let lines: Vec<&str> = block.split('\n').collect();

	if lines.iter().all(|line| line.starts_with('>')) {
		return BlockKind::Quote;
	}

	if lines.iter().all(|line| line.starts_with("- ")) {
		return BlockKind::UnorderedList;
	}

	if lines
		.iter()
		.enumerate()
		.all(|(index, line)| line.starts_with(&ordered_prefix(index)))
	{
		return BlockKind::OrderedList;
	}

	BlockKind::Paragraph
}

/// The `N. ` marker expected on the zero-based `index`th line of an ordered
/// list.
pub(crate) fn ordered_prefix(index: usize) -> String {
	format!("{}. ", index + 1)
}
