use std::fmt::Display;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::HtmlNode;
use crate::SiteError;
use crate::SiteResult;

/// The style carried by a [`TextSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
	Plain,
	Bold,
	Italic,
	Code,
	Link,
	Image,
}

/// A contiguous run of inline text with a single style.
///
/// `url` is only set for [`SpanKind::Link`] and [`SpanKind::Image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextSpan {
	pub text: String,
	pub kind: SpanKind,
	pub url: Option<String>,
}

impl TextSpan {
	pub fn new(text: impl Into<String>, kind: SpanKind) -> Self {
		Self {
			text: text.into(),
			kind,
			url: None,
		}
	}

	pub fn plain(text: impl Into<String>) -> Self {
		Self::new(text, SpanKind::Plain)
	}

	pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			kind: SpanKind::Link,
			url: Some(url.into()),
		}
	}

	pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
		Self {
			text: alt.into(),
			kind: SpanKind::Image,
			url: Some(url.into()),
		}
	}
}

impl Display for TextSpan {
	/// Writes the span back out as markdown source.
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let url = self.url.as_deref().unwrap_or_default();
		match self.kind {
			SpanKind::Plain => write!(f, "{}", self.text),
			SpanKind::Bold => write!(f, "**{}**", self.text),
			SpanKind::Italic => write!(f, "_{}_", self.text),
			SpanKind::Code => write!(f, "`{}`", self.text),
			SpanKind::Link => write!(f, "[{}]({url})", self.text),
			SpanKind::Image => write!(f, "![{}]({url})", self.text),
		}
	}
}

/// Tokenize inline markdown into an ordered list of spans.
///
/// Bold is resolved before italic, then code, images and finally links.
/// Styles never nest.
pub fn text_to_spans(text: &str) -> SiteResult<Vec<TextSpan>> {
	let spans = vec![TextSpan::plain(text)];
	let spans = split_spans_delimiter(spans, "**", SpanKind::Bold)?;
	let spans = split_spans_delimiter(spans, "_", SpanKind::Italic)?;
	let spans = split_spans_delimiter(spans, "`", SpanKind::Code)?;
	let spans = split_spans_image(spans);
	Ok(split_spans_link(spans))
}

/// Split every plain span on `delimiter`. Text between a pair of delimiters
/// becomes a span of `kind`.
pub fn split_spans_delimiter(
	spans: Vec<TextSpan>,
	delimiter: &str,
	kind: SpanKind,
) -> SiteResult<Vec<TextSpan>> {
	let mut result = Vec::with_capacity(spans.len());

	for span in spans {
		if span.kind != SpanKind::Plain {
			result.push(span);
			continue;
		}

		let parts: Vec<&str> = span.text.split(delimiter).collect();
		if parts.len() % 2 == 0 {
			return Err(SiteError::UnbalancedDelimiter {
				delimiter: delimiter.to_string(),
				text: span.text.clone(),
			});
		}

		for (index, part) in parts.into_iter().enumerate() {
			if part.is_empty() {
				continue;
			}

			if index % 2 == 0 {
				result.push(TextSpan::plain(part));
			} else {
				result.push(TextSpan::new(part, kind));
			}
		}
	}

	Ok(result)
}

fn image_regex() -> &'static Regex {
	static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
	IMAGE_REGEX.get_or_init(|| {
		Regex::new(r"!\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("invalid image regex")
	})
}

fn link_regex() -> &'static Regex {
	static LINK_REGEX: OnceLock<Regex> = OnceLock::new();
	LINK_REGEX
		.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]\(([^\(\)]*)\)").expect("invalid link regex"))
}

/// Find every `![alt](url)` in `text`, returned as `(alt, url)` pairs.
pub fn extract_markdown_images(text: &str) -> Vec<(String, String)> {
	image_regex()
		.captures_iter(text)
		.map(|captures| (captures[1].to_string(), captures[2].to_string()))
		.collect()
}

/// Find every `[text](url)` that is not part of an image, returned as
/// `(text, url)` pairs.
pub fn extract_markdown_links(text: &str) -> Vec<(String, String)> {
	let regex = link_regex();
	let mut links = Vec::new();
	let mut start = 0;

	while let Some(captures) = regex.captures_at(text, start) {
		let Some(whole) = captures.get(0) else {
			break;
		};

		// `regex` has no look-behind, so reject image openers by hand and
		// resume the search one byte past the bracket.
		if text[..whole.start()].ends_with('!') {
			start = whole.start() + 1;
			continue;
		}

		links.push((captures[1].to_string(), captures[2].to_string()));
		start = whole.end();
	}

	links
}

pub fn split_spans_image(spans: Vec<TextSpan>) -> Vec<TextSpan> {
	split_spans_with(spans, extract_markdown_images, |alt, url| {
		TextSpan::image(alt, url)
	})
}

pub fn split_spans_link(spans: Vec<TextSpan>) -> Vec<TextSpan> {
	split_spans_with(spans, extract_markdown_links, |text, url| {
		TextSpan::link(text, url)
	})
}

/// Shared splitter for images and links. Each extracted match is rebuilt as
/// markdown and cut out of the remaining text at its first occurrence, in the
/// order the matches were found.
fn split_spans_with(
	spans: Vec<TextSpan>,
	extract: fn(&str) -> Vec<(String, String)>,
	build: fn(String, String) -> TextSpan,
) -> Vec<TextSpan> {
	let mut result = Vec::with_capacity(spans.len());

	for span in spans {
		if span.kind != SpanKind::Plain {
			result.push(span);
			continue;
		}

		let matches = extract(&span.text);
		if matches.is_empty() {
			result.push(span);
			continue;
		}

		let mut remaining = span.text.as_str();
		for (text, url) in matches {
			let matched = build(text, url);
			let source = matched.to_string();

			match remaining.split_once(source.as_str()) {
				Some((before, after)) => {
					if !before.is_empty() {
						result.push(TextSpan::plain(before));
					}
					remaining = after;
				}
				None => {
					if !remaining.is_empty() {
						result.push(TextSpan::plain(remaining));
					}
					remaining = "";
				}
			}

			result.push(matched);
		}

		if !remaining.is_empty() {
			result.push(TextSpan::plain(remaining));
		}
	}

	result
}

/// Convert a span into the leaf node that renders it.
pub fn span_to_html_node(span: &TextSpan) -> HtmlNode {
	let url = span.url.clone().unwrap_or_default();
	match span.kind {
		SpanKind::Plain => HtmlNode::text(span.text.as_str()),
		SpanKind::Bold => HtmlNode::leaf("b", span.text.as_str()),
		SpanKind::Italic => HtmlNode::leaf("i", span.text.as_str()),
		SpanKind::Code => HtmlNode::leaf("code", span.text.as_str()),
		SpanKind::Link => HtmlNode::leaf("a", span.text.as_str()).with_attribute("href", url),
		SpanKind::Image => {
			HtmlNode::leaf("img", "")
				.with_attribute("src", url)
				.with_attribute("alt", span.text.as_str())
		}
	}
}

/// Tokenize inline markdown straight into child nodes.
pub fn text_to_children(text: &str) -> SiteResult<Vec<HtmlNode>> {
	let spans = text_to_spans(text)?;
	Ok(spans.iter().map(span_to_html_node).collect())
}
