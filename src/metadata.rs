use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;

/// A typed tag value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(#[serde(serialize_with = "serialize_hex")] Vec<u8>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
}

fn serialize_hex<S: Serializer>(bytes: &[u8], s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(&hex::encode(bytes))
}

impl TagValue {
    /// Integer view of `Int` and `Long` values.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Int(v) => Some(*v as i64),
            TagValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of any scalar number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Int(v) => Some(*v as f64),
            TagValue::Long(v) => Some(*v as f64),
            TagValue::Float(v) => Some(*v as f64),
            TagValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }
}

fn join<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Int(v) => write!(f, "{}", v),
            TagValue::Long(v) => write!(f, "{}", v),
            TagValue::Float(v) => write!(f, "{}", v),
            TagValue::Double(v) => write!(f, "{}", v),
            TagValue::String(s) => f.write_str(s),
            TagValue::Bytes(b) if b.len() <= 16 => f.write_str(&hex::encode(b)),
            TagValue::Bytes(b) => write!(f, "[{} bytes]", b.len()),
            TagValue::IntArray(v) => join(f, v),
            TagValue::LongArray(v) => join(f, v),
            TagValue::DoubleArray(v) => join(f, v),
            TagValue::StringArray(v) => join(f, v),
        }
    }
}

impl From<i32> for TagValue { fn from(v: i32) -> Self { TagValue::Int(v) } }
impl From<u16> for TagValue { fn from(v: u16) -> Self { TagValue::Int(v as i32) } }
impl From<i16> for TagValue { fn from(v: i16) -> Self { TagValue::Int(v as i32) } }
impl From<u8> for TagValue { fn from(v: u8) -> Self { TagValue::Int(v as i32) } }
impl From<u32> for TagValue { fn from(v: u32) -> Self { TagValue::Long(v as i64) } }
impl From<i64> for TagValue { fn from(v: i64) -> Self { TagValue::Long(v) } }
impl From<f32> for TagValue { fn from(v: f32) -> Self { TagValue::Float(v) } }
impl From<f64> for TagValue { fn from(v: f64) -> Self { TagValue::Double(v) } }
impl From<String> for TagValue { fn from(v: String) -> Self { TagValue::String(v) } }
impl From<&str> for TagValue { fn from(v: &str) -> Self { TagValue::String(v.to_string()) } }
impl From<Vec<u8>> for TagValue { fn from(v: Vec<u8>) -> Self { TagValue::Bytes(v) } }
impl From<Vec<i32>> for TagValue { fn from(v: Vec<i32>) -> Self { TagValue::IntArray(v) } }
impl From<Vec<i64>> for TagValue { fn from(v: Vec<i64>) -> Self { TagValue::LongArray(v) } }
impl From<Vec<f64>> for TagValue { fn from(v: Vec<f64>) -> Self { TagValue::DoubleArray(v) } }
impl From<Vec<String>> for TagValue { fn from(v: Vec<String>) -> Self { TagValue::StringArray(v) } }

/// Resolves a tag id to its display name.
pub type TagNames = fn(u32) -> Option<&'static str>;

fn no_names(_: u32) -> Option<&'static str> {
    None
}

/// A named group of tag values plus the decode errors attributed to it.
#[derive(Clone)]
pub struct Directory {
    name: &'static str,
    tag_names: TagNames,
    tags: Vec<(u32, TagValue)>,
    errors: Vec<String>,
}

impl Directory {
    pub fn new(name: &'static str) -> Self {
        Self::with_tag_names(name, no_names)
    }

    pub fn with_tag_names(name: &'static str, tag_names: TagNames) -> Self {
        Self { name, tag_names, tags: Vec::new(), errors: Vec::new() }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Set a tag, replacing any previous value in place.
    pub fn set(&mut self, tag: u32, value: impl Into<TagValue>) {
        let value = value.into();
        match self.tags.iter_mut().find(|(id, _)| *id == tag) {
            Some(slot) => slot.1 = value,
            None => self.tags.push((tag, value)),
        }
    }

    pub fn get(&self, tag: u32) -> Option<&TagValue> {
        self.tags.iter().find(|(id, _)| *id == tag).map(|(_, v)| v)
    }

    pub fn get_i64(&self, tag: u32) -> Option<i64> {
        self.get(tag).and_then(TagValue::as_i64)
    }

    pub fn get_f64(&self, tag: u32) -> Option<f64> {
        self.get(tag).and_then(TagValue::as_f64)
    }

    pub fn get_str(&self, tag: u32) -> Option<&str> {
        self.get(tag).and_then(TagValue::as_str)
    }

    pub fn contains(&self, tag: u32) -> bool {
        self.get(tag).is_some()
    }

    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = (u32, &TagValue)> {
        self.tags.iter().map(|(id, v)| (*id, v))
    }

    pub fn tag_name(&self, tag: u32) -> String {
        match (self.tag_names)(tag) {
            Some(name) => name.to_string(),
            None => format!("Unknown tag (0x{:04x})", tag),
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// No tags and no errors.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.errors.is_empty()
    }
}

impl fmt::Debug for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Directory")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .field("errors", &self.errors)
            .finish()
    }
}

#[derive(Serialize)]
struct TagEntry<'a> {
    id: u32,
    name: String,
    value: &'a TagValue,
}

impl Serialize for Directory {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        let tags: Vec<TagEntry<'_>> = self
            .tags
            .iter()
            .map(|(id, value)| TagEntry { id: *id, name: self.tag_name(*id), value })
            .collect();
        let mut st = s.serialize_struct("Directory", 3)?;
        st.serialize_field("name", self.name)?;
        st.serialize_field("tags", &tags)?;
        st.serialize_field("errors", &self.errors)?;
        st.end()
    }
}

/// Handle to a directory registered in a [`Metadata`] aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirectoryId(usize);

/// Every directory produced by one extraction, in discovery order.
#[derive(Debug, Default, Clone, Serialize)]
#[serde(transparent)]
pub struct Metadata {
    directories: Vec<Directory>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory; directories are never removed.
    pub fn add_directory(&mut self, directory: Directory) -> DirectoryId {
        self.directories.push(directory);
        DirectoryId(self.directories.len() - 1)
    }

    pub fn get(&self, id: DirectoryId) -> Option<&Directory> {
        self.directories.get(id.0)
    }

    /// Directory registered under `id`.
    ///
    /// Panics if `id` came from a different aggregate.
    pub fn directory(&self, id: DirectoryId) -> &Directory {
        &self.directories[id.0]
    }

    /// Mutable directory registered under `id`.
    ///
    /// Panics if `id` came from a different aggregate.
    pub fn directory_mut(&mut self, id: DirectoryId) -> &mut Directory {
        &mut self.directories[id.0]
    }

    pub fn add_error(&mut self, id: DirectoryId, message: impl Into<String>) {
        self.directory_mut(id).add_error(message);
    }

    pub fn directories(&self) -> &[Directory] {
        &self.directories
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Directory> {
        self.directories.iter()
    }

    /// First directory with the given name.
    pub fn first(&self, name: &str) -> Option<&Directory> {
        self.directories.iter().find(|d| d.name == name)
    }

    pub fn all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Directory> + 'a {
        self.directories.iter().filter(move |d| d.name == name)
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.directories.iter().any(Directory::has_errors)
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = &'a Directory;
    type IntoIter = std::slice::Iter<'a, Directory>;

    fn into_iter(self) -> Self::IntoIter {
        self.directories.iter()
    }
}
