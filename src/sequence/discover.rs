use std::path::{Path, PathBuf};

use crate::foundation::core::FrameRange;
use crate::foundation::error::{CollectError, CollectResult, NO_RENDER_FILES};
use crate::probe::ffprobe::{FrameCount, probe_frame_count};
use crate::sequence::assemble::assemble;
use crate::sequence::token::parse_trailing_frame;
use crate::session::descriptor::RenderOutputDescriptor;
use crate::session::publish_session::PublishSession;

/// How the files found on disk were classified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputLayout {
    /// Numbered collection; `holes` lists frames missing inside its range.
    Sequence { holes: Vec<i64> },
    /// Single container video file.
    Video(FrameCount),
    /// Single still; `frame` is its parsed trailing frame number.
    Single { frame: Option<i64> },
}

/// Files of one render and the range they cover.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Discovery {
    /// Basenames in collection order.
    pub basenames: Vec<String>,
    pub range: FrameRange,
    pub layout: OutputLayout,
}

/// List files matching the output pattern of `descriptor`.
///
/// An empty listing is a user-actionable validation error: the render has to
/// be redone or the write path fixed.
pub fn find_render_files(descriptor: &RenderOutputDescriptor) -> CollectResult<Vec<PathBuf>> {
    let pattern = descriptor.glob_pattern();
    let entries = glob::glob(&pattern).map_err(|e| {
        CollectError::validation(
            "invalid_output_path",
            format!("output path does not form a valid glob pattern '{pattern}': {e}"),
            [
                ("output_path", descriptor.output_path.clone()),
                ("write_node_name", descriptor.node_name.clone()),
            ],
        )
    })?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_dir() => {}
            Ok(path) => files.push(path),
            Err(err) => tracing::warn!(%err, "skipping unreadable render output"),
        }
    }

    if files.is_empty() {
        return Err(no_render_files(descriptor));
    }
    Ok(files)
}

fn no_render_files(descriptor: &RenderOutputDescriptor) -> CollectError {
    CollectError::validation(
        NO_RENDER_FILES,
        format!(
            "No frames found on disk to publish matching write node output path: {}",
            descriptor.glob_pattern()
        ),
        [
            ("output_path", descriptor.output_path.clone()),
            ("write_node_name", descriptor.node_name.clone()),
        ],
    )
}

fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}

impl PublishSession {
    /// Find the files of an instance's render and infer its frame range.
    ///
    /// The inferred range replaces the cached range of `instance_name`. Only
    /// when nothing can be inferred (unnumbered still, unknown video length) is
    /// the previously resolved range looked up and kept.
    #[tracing::instrument(skip(self, descriptor), fields(node = %descriptor.node_name))]
    pub fn discover(
        &mut self,
        instance_name: &str,
        descriptor: &RenderOutputDescriptor,
    ) -> CollectResult<Discovery> {
        let files = find_render_files(descriptor)?;
        let mut assembly = assemble(files.iter().map(|p| p.to_string_lossy().into_owned()));

        let discovery = if !assembly.collections.is_empty() {
            let collection = assembly.collections.swap_remove(0);
            if !assembly.collections.is_empty() || !assembly.remainders.is_empty() {
                tracing::debug!(
                    extra_collections = assembly.collections.len(),
                    extra_files = assembly.remainders.len(),
                    "ignoring files outside the main collection"
                );
            }
            let holes = if collection.is_contiguous() {
                Vec::new()
            } else {
                let holes = collection.holes();
                tracing::warn!(%collection, missing = holes.len(), "sequence has missing frames");
                holes
            };
            let range = match collection.range() {
                Some(range) => range,
                None => self.resolve_range(instance_name, descriptor)?,
            };
            Discovery {
                basenames: collection.items().map(basename).collect(),
                range,
                layout: OutputLayout::Sequence { holes },
            }
        } else {
            let mut remainders = assembly.remainders.into_iter();
            let Some(file) = remainders.next() else {
                return Err(no_render_files(descriptor));
            };
            let extra = remainders.len();
            if extra > 0 {
                tracing::debug!(extra_files = extra, "ignoring additional files");
            }

            let path = PathBuf::from(&file);
            if self.opts.is_video(&path) {
                let count = probe_frame_count(self.prober(), &path)?;
                let range = match count {
                    FrameCount::Known(frames) => FrameRange {
                        first: 1,
                        last: i64::try_from(frames).unwrap_or(i64::MAX),
                    },
                    FrameCount::Unknown => self.resolve_range(instance_name, descriptor)?,
                };
                Discovery {
                    basenames: vec![basename(&file)],
                    range,
                    layout: OutputLayout::Video(count),
                }
            } else {
                let name = basename(&file);
                let frame = parse_trailing_frame(&name);
                let range = match frame {
                    Some(frame) => FrameRange::single(frame),
                    None => self.resolve_range(instance_name, descriptor)?,
                };
                Discovery {
                    range,
                    basenames: vec![name],
                    layout: OutputLayout::Single { frame },
                }
            }
        };

        self.set_range(instance_name, discovery.range);
        tracing::info!(
            files = discovery.basenames.len(),
            range = %discovery.range,
            "collected frames"
        );
        Ok(discovery)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/discover.rs"]
mod tests;
