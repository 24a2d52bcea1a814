use std::fmt;

use crate::foundation::error::{CollectError, CollectResult};

/// Inclusive frame range `[first, last]` in host timeline frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameRange {
    /// Inclusive first frame.
    pub first: i64,
    /// Inclusive last frame.
    pub last: i64,
}

impl FrameRange {
    /// Create a validated range with `first <= last`.
    pub fn new(first: i64, last: i64) -> CollectResult<Self> {
        if first > last {
            return Err(CollectError::validation(
                "invalid_frame_range",
                format!("frame range first ({first}) must be <= last ({last})"),
                [("first", first.to_string()), ("last", last.to_string())],
            ));
        }
        Ok(Self { first, last })
    }

    /// Single-frame range.
    pub fn single(frame: i64) -> Self {
        Self {
            first: frame,
            last: frame,
        }
    }

    /// Number of frames contained in the range.
    pub fn len_frames(self) -> u64 {
        self.last.saturating_sub(self.first).saturating_add(1).max(0) as u64
    }

    /// Zero-padded frame string for `frame`, padded to the digit count of `last`
    /// (`7..120` gives `"007"`).
    pub fn frame_str(self, frame: i64) -> String {
        let width = self.last.to_string().len();
        format!("{frame:0width$}")
    }

    /// Zero-padded string of the first frame.
    pub fn first_str(self) -> String {
        self.frame_str(self.first)
    }
}

impl fmt::Display for FrameRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.first, self.last)
    }
}

/// Where and when an instance's frames get produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    /// Frames already rendered locally.
    Frames,
    /// Rendered on the farm, output path known and partially on disk.
    FramesFarm,
    /// Fully deferred to the farm.
    Farm,
}

impl RenderTarget {
    /// Identifier used in family tags (`render.frames_farm`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Frames => "frames",
            Self::FramesFarm => "frames_farm",
            Self::Farm => "farm",
        }
    }

    /// Return `true` when the instance is routed to the farm.
    pub fn is_farm(self) -> bool {
        matches!(self, Self::FramesFarm | Self::Farm)
    }
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
