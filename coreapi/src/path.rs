//! Dotted field paths used in violations and codec errors.
//!
//! Paths use wire names: `tunnelConfiguration[0].ikeVersion`,
//! `definedTags["Operations"]["CostCenter"]`. The empty path renders as
//! `<root>`.

use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A record field, by wire name.
    Field(String),
    /// A sequence index.
    Index(usize),
    /// A mapping key.
    Key(String),
}

/// Location of a value inside a decoded or outgoing tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Path segments from the root.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Extends the path with a field name.
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.child(Segment::Field(name.into()))
    }

    /// Extends the path with a sequence index.
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    /// Extends the path with a mapping key.
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if i == 0 => f.write_str(name)?,
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
                Segment::Key(key) => write!(f, "[\"{key}\"]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(FieldPath::root().to_string(), "<root>");
    }

    #[test]
    fn test_nested_display() {
        let path = FieldPath::root()
            .field("tunnelConfiguration")
            .index(0)
            .field("ikeVersion");
        assert_eq!(path.to_string(), "tunnelConfiguration[0].ikeVersion");
    }

    #[test]
    fn test_mapping_keys() {
        let path = FieldPath::root()
            .field("definedTags")
            .key("Operations")
            .key("CostCenter");
        assert_eq!(path.to_string(), "definedTags[\"Operations\"][\"CostCenter\"]");
    }

    #[test]
    fn test_index_at_root() {
        assert_eq!(FieldPath::root().index(2).field("id").to_string(), "[2].id");
    }
}
