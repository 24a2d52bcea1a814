use std::path::{Path, PathBuf};

use crate::foundation::core::FrameRange;
use crate::model::instance::Instance;
use crate::model::node::NodeSnapshot;
use crate::sequence::token::frame_glob_pattern;
use crate::session::publish_session::PublishSession;

/// Output configuration of the node rendering an instance.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOutputDescriptor {
    /// Full name of the write node.
    pub node_name: String,
    /// Output path, frame token in place.
    pub output_path: String,
    /// Declared file type, used as representation name and extension.
    pub file_type: String,
    pub channels: String,
    /// Node-level range override.
    pub limit: Option<FrameRange>,
}

impl RenderOutputDescriptor {
    /// Descriptor of `node` when it carries write settings.
    pub fn from_node(node: &NodeSnapshot) -> Option<Self> {
        let write = node.write.as_ref()?;
        let limit = if write.use_limit {
            match FrameRange::new(write.first, write.last) {
                Ok(range) => Some(range),
                Err(err) => {
                    tracing::warn!(node = %node.name, %err, "ignoring node frame limits");
                    None
                }
            }
        } else {
            None
        };
        Some(Self {
            node_name: node.name.clone(),
            output_path: write.file.clone(),
            file_type: write.file_type.clone(),
            channels: write.channels.clone(),
            limit,
        })
    }

    /// Directory the node writes into.
    pub fn output_dir(&self) -> PathBuf {
        Path::new(&self.output_path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
    }

    /// Glob matching every file the node can produce.
    pub fn glob_pattern(&self) -> String {
        frame_glob_pattern(&self.output_path)
    }
}

/// Result of looking up an instance's write node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DescriptorLookup {
    Found(RenderOutputDescriptor),
    NotFound,
}

/// Write node of an instance: the last `Write` child of a group, or the node itself.
pub fn find_write_node(node: &NodeSnapshot) -> Option<&NodeSnapshot> {
    if node.children.is_empty() {
        return node.write.is_some().then_some(node);
    }
    node.children.iter().rev().find(|child| child.is_write())
}

impl PublishSession {
    /// Resolve and cache the output descriptor of `instance`.
    pub fn resolve_descriptor(&mut self, instance: &Instance) -> DescriptorLookup {
        if let Some(cached) = self.descriptors.get(&instance.name) {
            return DescriptorLookup::Found(cached.clone());
        }

        let Some(descriptor) =
            find_write_node(&instance.node).and_then(RenderOutputDescriptor::from_node)
        else {
            return DescriptorLookup::NotFound;
        };

        self.descriptors.insert(instance.name.clone(), descriptor.clone());
        DescriptorLookup::Found(descriptor)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/descriptor.rs"]
mod tests;
