//! `mdsite_core` turns markdown documents into HTML and builds a static site
//! from a tree of markdown files, a page template and a directory of assets.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Markdown document
//!   → Block splitter (blank-line separated chunks)
//!   → Classifier (heading, code, quote, lists, paragraph)
//!   → Block renderer (one HTML subtree per block)
//!   → Inline tokenizer (bold, italic, code, images, links inside a block)
//!   → HtmlNode tree wrapped in a root `div`, serialized with `to_html`
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `site.toml`.
//! - [`site`]: Static asset copying, page generation and the full site build.
//!
//! ## Key Types
//!
//! - [`HtmlNode`]: A leaf or parent element that renders to an HTML string.
//! - [`TextSpan`]: A run of inline text with one style.
//! - [`BlockKind`]: The structural kind of a block.
//! - [`SiteConfig`]: Configuration loaded from `site.toml`.
//! - [`SiteError`]: Every failure the pipeline and builder can report.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdsite_core::extract_title;
//! use mdsite_core::markdown_to_html_node;
//!
//! let markdown = "# Title\n\nSome **bold** and _italic_ text";
//! let html = markdown_to_html_node(markdown).unwrap().to_html().unwrap();
//!
//! assert_eq!(
//! 	html,
//! 	"<div><h1>Title</h1><p>Some <b>bold</b> and <i>italic</i> text</p></div>"
//! );
//! assert_eq!(extract_title(markdown).unwrap(), "Title");
//! ```

pub use block::*;
pub use config::*;
pub use document::*;
pub use error::*;
pub use html::*;
pub use inline::*;
pub use render::*;
pub use site::*;

mod block;
pub mod config;
mod document;
#[allow(unused_assignments)]
mod error;
mod html;
mod inline;
mod render;
pub mod site;
