//! Menu document node tree.
//!
//! The document is read once into an owned tree of [`DocumentNode`]s. Node
//! names are compared ASCII case-insensitively; attribute names are exact.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

/// Root element every menu document must have.
pub const ROOT_ELEMENT: &str = "openbox_menu";

/// Errors raised while reading a menu document.
#[derive(Debug, Error)]
pub enum DocumentError {
	/// The file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The XML reader rejected the input.
	#[error("XML error: {0}")]
	Xml(#[from] quick_xml::Error),

	/// An attribute was malformed.
	#[error("XML attribute error: {0}")]
	Attribute(#[from] AttrError),

	/// Well-formed XML that still cannot be turned into a tree.
	#[error("malformed document: {0}")]
	Syntax(String),

	/// The root element has an unexpected name.
	#[error("expected root element <{expected}>, found <{found}>")]
	WrongRoot {
		/// Required root element name.
		expected: String,
		/// Root element name found in the document.
		found: String,
	},

	/// The input contains no element at all.
	#[error("document has no root element")]
	Empty,
}

/// One element of a menu document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentNode {
	name: String,
	attributes: Vec<(String, String)>,
	children: Vec<DocumentNode>,
	text: String,
}

impl DocumentNode {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	/// Adds an attribute (builder style).
	pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.push((key.into(), value.into()));
		self
	}

	/// Adds a child element (builder style).
	pub fn with_child(mut self, child: DocumentNode) -> Self {
		self.children.push(child);
		self
	}

	/// Appends text content (builder style).
	pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
		self.text.push_str(text.as_ref());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Whether this element is named `name`, ignoring ASCII case.
	pub fn is(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name)
	}

	/// Value of the first attribute named `key`.
	pub fn attr(&self, key: &str) -> Option<&str> {
		self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	pub fn attributes(&self) -> &[(String, String)] {
		&self.attributes
	}

	pub fn children(&self) -> &[DocumentNode] {
		&self.children
	}

	/// Immediate children named `name`, in document order.
	pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DocumentNode> + 'a {
		self.children.iter().filter(move |child| child.is(name))
	}

	/// Concatenated, unescaped text directly inside this element.
	pub fn text(&self) -> &str {
		&self.text
	}
}

/// A parsed menu document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	path: Option<PathBuf>,
	root: DocumentNode,
}

impl Document {
	/// Wraps an already built tree. The root name is not checked.
	pub fn from_root(root: DocumentNode) -> Self {
		Self { path: None, root }
	}

	/// Parses `source` and checks that the root element is named `root`.
	pub fn parse_str(source: &str, root: &str) -> Result<Self, DocumentError> {
		let tree = parse_tree(source)?;
		if !tree.is(root) {
			return Err(DocumentError::WrongRoot {
				expected: root.to_owned(),
				found: tree.name,
			});
		}
		Ok(Self { path: None, root: tree })
	}

	/// Reads and parses the file at `path`.
	pub fn load(path: &Path, root: &str) -> Result<Self, DocumentError> {
		let source = std::fs::read_to_string(path).map_err(|error| DocumentError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		let mut document = Self::parse_str(&source, root)?;
		document.path = Some(path.to_path_buf());
		Ok(document)
	}

	/// File the document was loaded from, if any.
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn root(&self) -> &DocumentNode {
		&self.root
	}
}

fn parse_tree(source: &str) -> Result<DocumentNode, DocumentError> {
	let mut reader = Reader::from_str(source);

	let mut open: Vec<DocumentNode> = Vec::new();
	let mut root: Option<DocumentNode> = None;

	loop {
		match reader.read_event()? {
			Event::Start(start) => open.push(element(&reader, &start)?),
			Event::Empty(start) => {
				let node = element(&reader, &start)?;
				attach(&mut open, &mut root, node)?;
			}
			Event::End(_) => {
				let node = open.pop().ok_or_else(|| DocumentError::Syntax("unexpected closing tag".to_owned()))?;
				attach(&mut open, &mut root, node)?;
			}
			Event::Text(text) => {
				if let Some(node) = open.last_mut() {
					let raw = decode(&reader, &text)?;
					let unescaped = unescape(&raw).map_err(|e| DocumentError::Syntax(e.to_string()))?;
					node.text.push_str(&unescaped);
				}
			}
			Event::CData(data) => {
				if let Some(node) = open.last_mut() {
					node.text.push_str(&decode(&reader, &data)?);
				}
			}
			Event::GeneralRef(reference) => {
				if let Some(node) = open.last_mut() {
					node.text.push_str(&resolve_reference(&reader, &reference)?);
				}
			}
			Event::Eof => break,
			_ => {}
		}
	}

	if let Some(unclosed) = open.last() {
		return Err(DocumentError::Syntax(format!("element <{}> is never closed", unclosed.name)));
	}
	root.ok_or(DocumentError::Empty)
}

fn element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<DocumentNode, DocumentError> {
	let mut node = DocumentNode::new(decode(reader, start.name().as_ref())?);
	for attribute in start.attributes() {
		let attribute = attribute?;
		let key = decode(reader, attribute.key.as_ref())?.into_owned();
		let raw = decode(reader, &attribute.value)?;
		let value = unescape(&raw).map_err(|e| DocumentError::Syntax(e.to_string()))?;
		node.attributes.push((key, value.into_owned()));
	}
	Ok(node)
}

fn attach(open: &mut [DocumentNode], root: &mut Option<DocumentNode>, mut node: DocumentNode) -> Result<(), DocumentError> {
	// Indentation around child elements ends up in the text buffer.
	let trimmed = node.text.trim();
	if trimmed.len() != node.text.len() {
		node.text = trimmed.to_owned();
	}

	if let Some(parent) = open.last_mut() {
		parent.children.push(node);
		return Ok(());
	}
	if root.is_some() {
		return Err(DocumentError::Syntax(format!("second root element <{}>", node.name)));
	}
	*root = Some(node);
	Ok(())
}

fn decode<'b>(reader: &Reader<&[u8]>, bytes: &'b [u8]) -> Result<Cow<'b, str>, DocumentError> {
	reader.decoder().decode(bytes).map_err(|e| DocumentError::Syntax(e.to_string()))
}

fn resolve_reference(reader: &Reader<&[u8]>, reference: &[u8]) -> Result<String, DocumentError> {
	let name = decode(reader, reference)?;
	if let Some(code) = name.strip_prefix('#') {
		let value = match code.strip_prefix('x').or_else(|| code.strip_prefix('X')) {
			Some(hex) => u32::from_str_radix(hex, 16),
			None => code.parse(),
		};
		return value
			.ok()
			.and_then(char::from_u32)
			.map(String::from)
			.ok_or_else(|| DocumentError::Syntax(format!("invalid character reference &{name};")));
	}
	resolve_predefined_entity(&name)
		.map(str::to_owned)
		.ok_or_else(|| DocumentError::Syntax(format!("unknown entity &{name};")))
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parses_nested_elements_attributes_and_text() {
		let source = r#"<?xml version="1.0"?>
			<!-- comment -->
			<openbox_menu>
				<menu id="root" label="Root &amp; more">
					<item label="Term"><action name="Execute"><execute>xterm -e 'a &lt; b'</execute></action></item>
					<separator/>
				</menu>
			</openbox_menu>"#;

		let document = Document::parse_str(source, ROOT_ELEMENT).expect("document should parse");
		let expected = DocumentNode::new("openbox_menu").with_child(
			DocumentNode::new("menu")
				.with_attr("id", "root")
				.with_attr("label", "Root & more")
				.with_child(
					DocumentNode::new("item").with_attr("label", "Term").with_child(
						DocumentNode::new("action")
							.with_attr("name", "Execute")
							.with_child(DocumentNode::new("execute").with_text("xterm -e 'a < b'")),
					),
				)
				.with_child(DocumentNode::new("separator")),
		);
		assert_eq!(document.root(), &expected);
		assert!(document.path().is_none());
	}

	#[test]
	fn character_references_and_cdata_become_text() {
		let source = "<openbox_menu><execute>a&#65;&#x42;<![CDATA[<raw>]]></execute></openbox_menu>";
		let document = Document::parse_str(source, ROOT_ELEMENT).unwrap();
		assert_eq!(document.root().children()[0].text(), "aAB<raw>");
	}

	#[test]
	fn root_name_is_checked() {
		let error = Document::parse_str("<menus/>", ROOT_ELEMENT).unwrap_err();
		assert!(matches!(error, DocumentError::WrongRoot { ref found, .. } if found == "menus"));
	}

	#[test]
	fn root_name_ignores_case() {
		assert!(Document::parse_str("<OpenBox_Menu/>", ROOT_ELEMENT).is_ok());
	}

	#[test]
	fn empty_input_is_an_error() {
		assert!(matches!(Document::parse_str("  ", ROOT_ELEMENT), Err(DocumentError::Empty)));
	}

	#[test]
	fn mismatched_tags_are_rejected() {
		assert!(Document::parse_str("<openbox_menu><menu></item></openbox_menu>", ROOT_ELEMENT).is_err());
	}

	#[test]
	fn unclosed_elements_are_rejected() {
		assert!(Document::parse_str("<openbox_menu><menu>", ROOT_ELEMENT).is_err());
	}

	#[test]
	fn attribute_lookup_is_exact_and_first_wins() {
		let node = DocumentNode::new("Menu").with_attr("id", "a").with_attr("ID", "b");
		assert_eq!(node.attr("id"), Some("a"));
		assert_eq!(node.attr("ID"), Some("b"));
		assert_eq!(node.attr("label"), None);
		assert!(node.is("menu"));
	}

	#[test]
	fn children_named_filters_in_order() {
		let node = DocumentNode::new("item")
			.with_child(DocumentNode::new("action").with_attr("name", "one"))
			.with_child(DocumentNode::new("other"))
			.with_child(DocumentNode::new("ACTION").with_attr("name", "two"));
		let names: Vec<_> = node.children_named("action").filter_map(|c| c.attr("name")).collect();
		assert_eq!(names, ["one", "two"]);
	}
}
