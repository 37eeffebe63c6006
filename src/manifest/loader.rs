use super::tree::{Attribute, Element, ManifestTree};
use super::ManifestError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;
use std::path::Path;
use tracing::debug;

/// Parser for AndroidManifest.xml files
pub struct ManifestLoader;

impl ManifestLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse the manifest at `path`.
    ///
    /// The file is read in full before parsing, so the handle is already
    /// closed by the time a parse error can be raised.
    pub fn load(&self, path: &Path) -> Result<ManifestTree, ManifestError> {
        let bytes = std::fs::read(path).map_err(|source| ManifestError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;

        let contents = decode(&bytes).map_err(|reason| ManifestError::malformed(path, reason))?;

        debug!("Read manifest {} ({} bytes)", path.display(), bytes.len());
        self.parse(path, &contents)
    }

    /// Parse manifest contents. `path` is only used for error reporting.
    pub fn parse(&self, path: &Path, contents: &str) -> Result<ManifestTree, ManifestError> {
        let mut reader = NsReader::from_str(contents);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position();
            let (ns, event) = reader.read_resolved_event().map_err(|e| {
                ManifestError::malformed(path, format!("{} at byte {}", e, position))
            })?;
            let element_ns = resolved_namespace(path, ns)?;

            match event {
                Event::Start(ref e) => {
                    let element = self.build_element(&reader, path, element_ns, e)?;
                    if stack.is_empty() && root.is_some() {
                        return Err(ManifestError::malformed(path, "junk after document element"));
                    }
                    stack.push(element);
                }
                Event::Empty(ref e) => {
                    let element = self.build_element(&reader, path, element_ns, e)?;
                    attach(path, &mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| ManifestError::malformed(path, "unexpected closing tag"))?;
                    attach(path, &mut stack, &mut root, element)?;
                }
                Event::Text(ref text) => {
                    let blank = text.iter().all(|b| b.is_ascii_whitespace());
                    if stack.is_empty() && !blank {
                        return Err(ManifestError::malformed(path, "text outside of root element"));
                    }
                    // Escapes are validated even though text content is never consulted
                    text.unescape().map_err(|e| ManifestError::malformed(path, e.to_string()))?;
                }
                Event::CData(_) if stack.is_empty() => {
                    return Err(ManifestError::malformed(path, "CDATA outside of root element"));
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ManifestError::malformed(
                path,
                format!("unclosed element <{}>", open.name),
            ));
        }

        let root = root.ok_or_else(|| ManifestError::malformed(path, "no element found"))?;
        debug!(
            "Parsed manifest {}: root <{}> with {} children",
            path.display(),
            root.name,
            root.children.len()
        );

        Ok(ManifestTree::new(root))
    }

    fn build_element(
        &self,
        reader: &NsReader<&[u8]>,
        path: &Path,
        namespace: Option<String>,
        start: &BytesStart,
    ) -> Result<Element, ManifestError> {
        let local = String::from_utf8_lossy(start.local_name().as_ref()).to_string();
        let mut element = Element::new(match namespace {
            Some(uri) => format!("{{{}}}{}", uri, local),
            None => local,
        });

        for attr in start.attributes() {
            let attr = attr.map_err(|e| ManifestError::malformed(path, e.to_string()))?;

            // xmlns declarations are consumed by the reader, not stored
            if attr.key.as_namespace_binding().is_some() {
                continue;
            }

            let (ns, local) = reader.resolve_attribute(attr.key);
            let namespace = resolved_namespace(path, ns)?;
            let value = attr
                .unescape_value()
                .map_err(|e| ManifestError::malformed(path, e.to_string()))?;

            element.attributes.push(Attribute {
                namespace,
                name: String::from_utf8_lossy(local.as_ref()).to_string(),
                value: value.into_owned(),
            });
        }

        Ok(element)
    }
}

impl Default for ManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode raw manifest bytes. A BOM wins over the XML declaration;
/// without either the document is UTF-8.
fn decode(bytes: &[u8]) -> Result<Cow<'_, str>, String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (sniff_encoding(bytes), bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| format!("content is not valid {}", encoding.name()))
}

fn sniff_encoding(bytes: &[u8]) -> &'static Encoding {
    match bytes {
        [b'<', 0, b'?', 0, ..] => UTF_16LE,
        [0, b'<', 0, b'?', ..] => UTF_16BE,
        _ => declared_encoding(bytes).unwrap_or(UTF_8),
    }
}

/// The `encoding` pseudo-attribute of an ASCII-compatible XML declaration
fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let head = bytes.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|w| w == b"?>")?;
    let decl = std::str::from_utf8(&head[..end]).ok()?;

    let rest = &decl[decl.find("encoding")? + "encoding".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let value = &rest[1..];
    let label = &value[..value.find(quote)?];

    let encoding = Encoding::for_label(label.as_bytes());
    if encoding.is_none() {
        debug!("Unknown declared encoding '{}', assuming UTF-8", label);
    }
    encoding
}

fn resolved_namespace(path: &Path, ns: ResolveResult) -> Result<Option<String>, ManifestError> {
    match ns {
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).to_string())),
        ResolveResult::Unknown(prefix) => Err(ManifestError::malformed(
            path,
            format!("unbound prefix '{}'", String::from_utf8_lossy(&prefix)),
        )),
    }
}

/// Hand a finished element to its parent, or make it the document root
fn attach(
    path: &Path,
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ManifestError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(ManifestError::malformed(path, "junk after document element")),
    }
    Ok(())
}
