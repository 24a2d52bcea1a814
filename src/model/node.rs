/// Host node class that produces render output.
pub const WRITE_CLASS: &str = "Write";

/// Serialisable snapshot of a host graph node.
///
/// The host application owns the real node graph; callers hand over the instance
/// node and, for group instances, its children.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeSnapshot {
    /// Full node name (`Group1.Write1`).
    pub name: String,
    /// Node class (`Write`, `Group`, ...).
    #[serde(default)]
    pub class: String,
    /// Output settings, present on nodes that write files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub write: Option<WriteSettings>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

/// Output knobs of a write node.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WriteSettings {
    /// Evaluated output path, frame token still in place (`/r/sh010.%04d.exr`).
    pub file: String,
    /// Declared file type (`exr`, `mov`).
    pub file_type: String,
    /// Declared channel layout (`rgba`).
    #[serde(default)]
    pub channels: String,
    /// Whether `first`/`last` override the workfile range.
    #[serde(default)]
    pub use_limit: bool,
    #[serde(default)]
    pub first: i64,
    #[serde(default)]
    pub last: i64,
}

impl NodeSnapshot {
    pub fn is_write(&self) -> bool {
        self.class == WRITE_CLASS && self.write.is_some()
    }
}
