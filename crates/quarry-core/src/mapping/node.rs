use super::{Declaration, Direction, Entry, ProjectionType};
use crate::Path;

/// Leaf of a mapping tree: one application path to one database path.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatMapping {
    /// Application-side path, with every enclosing embedded prefix applied.
    pub from_path: Path,

    /// Database-side path.
    pub to_path: Path,

    pub projection: ProjectionType,
}

/// A group of mappings sharing an application-side prefix.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedMapping {
    pub from_prefix: Path,
    pub mappings: Vec<MappingNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MappingNode {
    Flat(FlatMapping),
    Embedded(EmbeddedMapping),
}

/// The top-level mapping passed to every projection call.
///
/// Root mappings are immutable once built and are meant to live for the
/// whole process, typically in a `static LazyLock`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootMapping {
    pub mappings: Vec<MappingNode>,
}

/// Builds a root mapping from a declaration.
///
/// Leaves with an empty column name are dropped. Leaves with an unrecognized
/// type are kept as [`ProjectionType::Ignore`].
pub fn root_mapping(declaration: &Declaration) -> RootMapping {
    RootMapping {
        mappings: build(&Path::default(), declaration),
    }
}

/// Builds an embedded mapping whose children live under `prefix` on the
/// application side.
pub fn embedded_mapping(prefix: impl Into<Path>, declaration: &Declaration) -> EmbeddedMapping {
    let from_prefix = prefix.into();
    let mappings = build(&from_prefix, declaration);

    EmbeddedMapping {
        from_prefix,
        mappings,
    }
}

fn build(prefix: &Path, declaration: &Declaration) -> Vec<MappingNode> {
    let mut mappings = Vec::with_capacity(declaration.len());

    for (key, entry) in declaration.entries() {
        match entry {
            Entry::Leaf(leaf) => {
                if leaf.map_to.is_empty() {
                    if leaf.ty != Some(ProjectionType::Ignore) {
                        tracing::warn!(field = %prefix.child(key), "dropping mapping without a column name");
                    }
                    continue;
                }

                if leaf.ty.is_none() {
                    tracing::warn!(field = %prefix.child(key), column = %leaf.map_to, "unrecognized projection type; field is ignored");
                }

                mappings.push(MappingNode::Flat(FlatMapping {
                    from_path: prefix.child(key),
                    to_path: Path::key(leaf.map_to.as_str()),
                    projection: leaf.projection(),
                }));
            }
            Entry::Embedded(nested) => {
                mappings.push(MappingNode::Embedded(embedded_mapping(
                    prefix.child(key),
                    nested,
                )));
            }
        }
    }

    mappings
}

impl RootMapping {
    /// All leaves of the tree, depth-first, in declaration order.
    pub fn flatten(&self) -> Vec<&FlatMapping> {
        let mut out = Vec::new();
        collect(&self.mappings, &mut out);
        out
    }

    /// Database columns that take part in projecting in `direction`, in
    /// declaration order.
    pub fn columns(&self, direction: Direction) -> Vec<&str> {
        self.flatten()
            .into_iter()
            .filter(|flat| flat.projection.applies(direction))
            .filter_map(|flat| flat.to_path.last())
            .collect()
    }

    /// Looks up the column an application path is written to.
    pub fn column_for(&self, from_path: &Path) -> Option<&str> {
        self.flatten()
            .into_iter()
            .find(|flat| flat.from_path == *from_path)
            .and_then(|flat| flat.to_path.last())
    }
}

impl EmbeddedMapping {
    pub fn flatten(&self) -> Vec<&FlatMapping> {
        let mut out = Vec::new();
        collect(&self.mappings, &mut out);
        out
    }
}

fn collect<'a>(nodes: &'a [MappingNode], out: &mut Vec<&'a FlatMapping>) {
    for node in nodes {
        match node {
            MappingNode::Flat(flat) => out.push(flat),
            MappingNode::Embedded(embedded) => collect(&embedded.mappings, out),
        }
    }
}
