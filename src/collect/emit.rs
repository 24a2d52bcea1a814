use std::path::{Path, PathBuf};

use crate::foundation::core::{FrameRange, RenderTarget};
use crate::foundation::error::{CollectError, CollectResult};
use crate::model::instance::Instance;
use crate::model::representation::{Representation, RepresentationFiles};
use crate::session::descriptor::RenderOutputDescriptor;

/// Files collected for an instance, slate included, and their frame range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collected {
    pub basenames: Vec<String>,
    pub range: FrameRange,
}

/// Representation of files rendered by `descriptor`'s node.
pub fn build_representation(
    descriptor: &RenderOutputDescriptor,
    collected: &Collected,
    tags: &[String],
) -> Representation {
    Representation {
        name: descriptor.file_type.clone(),
        ext: descriptor.file_type.clone(),
        staging_dir: descriptor.output_dir(),
        files: RepresentationFiles::from_basenames(collected.basenames.clone()),
        frame_start: collected.range.first_str(),
        tags: tags.to_vec(),
    }
}

/// Absolute paths of `basenames` inside `output_dir`.
///
/// A relative `output_dir` is resolved against the current directory.
pub fn expected_files(output_dir: &Path, basenames: &[String]) -> CollectResult<Vec<PathBuf>> {
    let dir = std::path::absolute(output_dir)?;
    Ok(basenames.iter().map(|b| dir.join(b)).collect())
}

/// Mark `instance` for farm publishing: no local transfer, integration skipped.
pub fn route_to_farm(instance: &mut Instance) {
    // The farm-rendered sequence must feed review extraction.
    if !instance.review {
        instance.output.use_sequence_for_review = Some(false);
    }
    instance.output.transfer = Some(false);
    instance.output.farm = true;
    tracing::info!(instance = %instance.name, "farm rendering on");
}

/// Write the representation and routing of `instance` for its render target.
///
/// `frames` and `frames_farm` need collected files; `farm` ignores them.
pub fn emit(
    instance: &mut Instance,
    descriptor: &RenderOutputDescriptor,
    collected: Option<&Collected>,
    tags: &[String],
) -> CollectResult<()> {
    if instance.render_target == RenderTarget::Farm {
        route_to_farm(instance);
        return Ok(());
    }

    let collected = match collected {
        Some(c) if !c.basenames.is_empty() => c,
        _ => {
            return Err(CollectError::validation(
                "no_collected_files",
                format!(
                    "instance '{}' targets '{}' but no files were collected",
                    instance.name, instance.render_target
                ),
                [("write_node_name", descriptor.node_name.clone())],
            ));
        }
    };

    instance
        .output
        .representations
        .push(build_representation(descriptor, collected, tags));

    if instance.render_target.is_farm() {
        instance.output.expected_files = Some(expected_files(
            &descriptor.output_dir(),
            &collected.basenames,
        )?);
        route_to_farm(instance);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/collect/emit.rs"]
mod tests;
