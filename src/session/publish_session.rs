use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::core::FrameRange;
use crate::foundation::error::CollectResult;
use crate::model::representation::DEFAULT_REVIEW_TAGS;
use crate::probe::VIDEO_FILE_EXTENSIONS;
use crate::probe::ffprobe::{FfprobeProber, MediaProber, ProbeOpts};
use crate::session::descriptor::RenderOutputDescriptor;
use crate::workfile::version::IncrementOpts;

/// Options shared by every instance of a publish session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    pub probe: ProbeOpts,
    /// Extensions (with leading dot) probed as container video.
    pub video_extensions: Vec<String>,
    /// Tags attached to every representation.
    pub review_tags: Vec<String>,
    pub increment: IncrementOpts,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            probe: ProbeOpts::default(),
            video_extensions: VIDEO_FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            review_tags: DEFAULT_REVIEW_TAGS.iter().map(|t| t.to_string()).collect(),
            increment: IncrementOpts::default(),
        }
    }
}

impl SessionOpts {
    /// Case-insensitive check of `path`'s extension against the video set.
    pub fn is_video(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let dotted = format!(".{}", ext.to_ascii_lowercase());
        self.video_extensions
            .iter()
            .any(|v| v.to_ascii_lowercase() == dotted)
    }
}

/// Workfile-level values the host reports for the whole session.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WorkfileSettings {
    pub first_frame: i64,
    pub last_frame: i64,
    /// Saved path of the working file; `None` while unsaved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_file: Option<PathBuf>,
}

impl Default for WorkfileSettings {
    fn default() -> Self {
        Self {
            first_frame: 1,
            last_frame: 100,
            current_file: None,
        }
    }
}

impl WorkfileSettings {
    pub fn range(&self) -> CollectResult<FrameRange> {
        FrameRange::new(self.first_frame, self.last_frame)
    }
}

/// State of one publish session.
///
/// Holds the per-instance caches (output descriptor and frame range, both keyed
/// by instance name). Instances are processed one after another through
/// `&mut self`; instance names must be unique within a session.
pub struct PublishSession {
    pub(crate) opts: SessionOpts,
    pub(crate) workfile: WorkfileSettings,
    pub(crate) prober: Box<dyn MediaProber>,
    pub(crate) descriptors: HashMap<String, RenderOutputDescriptor>,
    pub(crate) ranges: HashMap<String, FrameRange>,
}

impl PublishSession {
    /// Create a session probing media through the system `ffprobe`.
    pub fn new(workfile: WorkfileSettings, opts: SessionOpts) -> Self {
        let prober = FfprobeProber::new(opts.probe.clone());
        Self {
            opts,
            workfile,
            prober: Box::new(prober),
            descriptors: HashMap::new(),
            ranges: HashMap::new(),
        }
    }

    /// Replace the media prober.
    pub fn with_prober(mut self, prober: impl MediaProber + 'static) -> Self {
        self.prober = Box::new(prober);
        self
    }

    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    pub fn workfile(&self) -> &WorkfileSettings {
        &self.workfile
    }

    pub fn prober(&self) -> &dyn MediaProber {
        self.prober.as_ref()
    }

    /// Cached range of `instance_name`, if any resolution or discovery ran.
    pub fn cached_range(&self, instance_name: &str) -> Option<FrameRange> {
        self.ranges.get(instance_name).copied()
    }
}

impl std::fmt::Debug for PublishSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishSession")
            .field("opts", &self.opts)
            .field("workfile", &self.workfile)
            .field("descriptors", &self.descriptors.len())
            .field("ranges", &self.ranges)
            .finish_non_exhaustive()
    }
}
