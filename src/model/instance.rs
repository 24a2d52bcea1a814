use std::path::PathBuf;

use crate::foundation::core::RenderTarget;
use crate::model::node::NodeSnapshot;
use crate::model::representation::Representation;

/// Family marking an instance for slate insertion.
pub const SLATE_FAMILY: &str = "slate";

/// One publishable unit within a publish session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    /// Unique within a session; keys every session cache.
    pub name: String,
    pub product_type: String,
    pub render_target: RenderTarget,
    #[serde(default)]
    pub families: Vec<String>,
    #[serde(default)]
    pub slate: bool,
    #[serde(default)]
    pub review: bool,
    /// Version this instance publishes, when already known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    pub node: NodeSnapshot,
    /// Filled in by collection.
    #[serde(default)]
    pub output: InstanceOutput,
}

impl Instance {
    pub fn new(
        name: impl Into<String>,
        product_type: impl Into<String>,
        render_target: RenderTarget,
        node: NodeSnapshot,
    ) -> Self {
        Self {
            name: name.into(),
            product_type: product_type.into(),
            render_target,
            families: Vec::new(),
            slate: false,
            review: false,
            version: None,
            node,
            output: InstanceOutput::default(),
        }
    }

    /// Slate frames are requested either by flag or by family.
    pub fn wants_slate(&self) -> bool {
        self.slate || self.families.iter().any(|f| f == SLATE_FAMILY)
    }

    /// Family tag naming product type and render target (`render.frames_farm`).
    pub fn target_family(&self) -> String {
        format!("{}.{}", self.product_type, self.render_target)
    }
}

/// Output fields produced by collection.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceOutput {
    #[serde(default)]
    pub representations: Vec<Representation>,
    /// Absolute paths the farm is expected to produce; farm-pending instances only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_files: Option<Vec<PathBuf>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_channels: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_start: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_end: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_start_handle: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_end_handle: Option<i64>,
    #[serde(default)]
    pub handle_start: i64,
    #[serde(default)]
    pub handle_end: i64,

    #[serde(default)]
    pub farm: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_sequence_for_review: Option<bool>,
    #[serde(default)]
    pub staging_dir_persistent: bool,
}
