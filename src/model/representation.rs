use std::path::PathBuf;

/// Review tags attached to representations when none are configured.
pub const DEFAULT_REVIEW_TAGS: &[&str] = &["shotgridreview", "review"];

/// Files of a representation: one basename, or an ordered list of basenames.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum RepresentationFiles {
    Single(String),
    Sequence(Vec<String>),
}

impl RepresentationFiles {
    /// Single basename when there is exactly one, the full list otherwise.
    pub fn from_basenames(mut basenames: Vec<String>) -> Self {
        if basenames.len() == 1 {
            Self::Single(basenames.remove(0))
        } else {
            Self::Sequence(basenames)
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(name) => std::slice::from_ref(name),
            Self::Sequence(names) => names,
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Packaged description of an instance's output, handed to integration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Representation {
    pub name: String,
    pub ext: String,
    pub staging_dir: PathBuf,
    pub files: RepresentationFiles,
    /// Zero-padded first frame, padded to the last frame's digit count.
    pub frame_start: String,
    pub tags: Vec<String>,
}
