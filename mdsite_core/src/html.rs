use std::fmt::Write;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::SiteError;
use crate::SiteResult;

/// Attributes attached to an [`HtmlNode`], kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Render the attributes as ` key="value"` pairs. Values are written
	/// verbatim.
	pub fn to_html(&self) -> String {
		let mut html = String::new();
		for (key, value) in self.iter() {
			// Writing into a `String` cannot fail.
			let _ = write!(html, " {key}=\"{value}\"");
		}
		html
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self(
			iter.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		)
	}
}

/// A node in the rendered HTML tree.
///
/// Leaves carry text and no children. A leaf without a tag renders as its
/// raw text. Parents carry children and no text of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
	Leaf {
		tag: Option<String>,
		value: Option<String>,
		attributes: Attributes,
	},
	Parent {
		tag: Option<String>,
		children: Option<Vec<HtmlNode>>,
		attributes: Attributes,
	},
}

impl HtmlNode {
	/// A tagged leaf, e.g. `<b>value</b>`.
	pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
		Self::Leaf {
			tag: Some(tag.into()),
			value: Some(value.into()),
			attributes: Attributes::new(),
		}
	}

	/// An untagged leaf that renders as raw text.
	pub fn text(value: impl Into<String>) -> Self {
		Self::Leaf {
			tag: None,
			value: Some(value.into()),
			attributes: Attributes::new(),
		}
	}

	pub fn parent(tag: impl Into<String>, children: Vec<HtmlNode>) -> Self {
		Self::Parent {
			tag: Some(tag.into()),
			children: Some(children),
			attributes: Attributes::new(),
		}
	}

	/// Append an attribute, keeping any already present.
	#[must_use]
	pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		match &mut self {
			Self::Leaf { attributes, .. } | Self::Parent { attributes, .. } => {
				attributes.push((key.into(), value.into()));
			}
		}
		self
	}

	pub fn tag(&self) -> Option<&str> {
		match self {
			Self::Leaf { tag, .. } | Self::Parent { tag, .. } => tag.as_deref(),
		}
	}

	pub fn attributes(&self) -> &Attributes {
		match self {
			Self::Leaf { attributes, .. } | Self::Parent { attributes, .. } => attributes,
		}
	}

	/// Serialize the node and all of its descendants.
	pub fn to_html(&self) -> SiteResult<String> {
		let mut html = String::new();
		self.write_html(&mut html)?;
		Ok(html)
	}

	fn write_html(&self, html: &mut String) -> SiteResult<()> {
		match self {
			Self::Leaf {
				tag,
				value,
				attributes,
			} => {
				let Some(value) = value else {
					return Err(SiteError::MissingValue {
						tag: tag.clone().unwrap_or_default(),
					});
				};

				match tag {
					Some(tag) => {
						let _ = write!(html, "<{tag}{}>{value}</{tag}>", attributes.to_html());
					}
					None => html.push_str(value),
				}
			}
			Self::Parent {
				tag,
				children,
				attributes,
			} => {
				let Some(tag) = tag else {
					return Err(SiteError::MissingTag);
				};
				let Some(children) = children else {
					return Err(SiteError::MissingChildren { tag: tag.clone() });
				};

				let _ = write!(html, "<{tag}{}>", attributes.to_html());
				for child in children {
					child.write_html(html)?;
				}
				let _ = write!(html, "</{tag}>");
			}
		}

		Ok(())
	}
}
