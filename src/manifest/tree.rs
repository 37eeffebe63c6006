/// Namespace URI used by `android:*` attributes
pub const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// An attribute resolved against the namespaces in scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Namespace URI, `None` for unprefixed attributes
    pub namespace: Option<String>,
    /// Local name without prefix
    pub name: String,
    pub value: String,
}

/// An element of a parsed manifest document.
///
/// Names of elements bound to a namespace are kept in Clark notation
/// (`{uri}local`). Android manifests declare their elements without a
/// namespace, so tag searches use the bare local name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up an attribute by namespace URI and local name
    pub fn attribute(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.namespace.as_deref() == namespace && attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Look up an attribute in the Android namespace
    pub fn android_attribute(&self, name: &str) -> Option<&str> {
        self.attribute(Some(ANDROID_NS), name)
    }

    /// Direct children with the given tag, in document order
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == tag)
    }

    /// All elements below this one with the given tag, in document order.
    /// The element itself is never included.
    pub fn descendants<'a>(&'a self, tag: &'a str) -> Descendants<'a> {
        Descendants {
            tag,
            stack: self.children.iter().rev().collect(),
        }
    }
}

/// Pre-order walk over the subtree of an element
pub struct Descendants<'a> {
    tag: &'a str,
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(element) = self.stack.pop() {
            self.stack.extend(element.children.iter().rev());
            if element.name == self.tag {
                return Some(element);
            }
        }
        None
    }
}

/// A parsed manifest document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTree {
    root: Element,
}

impl ManifestTree {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}
