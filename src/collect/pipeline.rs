use crate::collect::emit::{Collected, emit};
use crate::collect::slate::{SlateOutcome, insert_slate};
use crate::foundation::core::RenderTarget;
use crate::foundation::error::CollectResult;
use crate::model::instance::Instance;
use crate::session::descriptor::{DescriptorLookup, RenderOutputDescriptor};
use crate::session::publish_session::PublishSession;

/// Result of collecting one instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CollectOutcome {
    Collected,
    /// No write node was found; nothing was changed on the instance.
    Skipped,
}

impl PublishSession {
    /// Collect render output of `instance` and fill in its output fields.
    #[tracing::instrument(
        skip_all,
        fields(instance = %instance.name, target = %instance.render_target)
    )]
    pub fn collect_instance(&mut self, instance: &mut Instance) -> CollectResult<CollectOutcome> {
        let descriptor = match self.resolve_descriptor(instance) {
            DescriptorLookup::Found(descriptor) => descriptor,
            DescriptorLookup::NotFound => {
                tracing::warn!(
                    node = %instance.node.name,
                    "created node is missing a write node"
                );
                return Ok(CollectOutcome::Skipped);
            }
        };

        let collected = match instance.render_target {
            RenderTarget::Frames | RenderTarget::FramesFarm => {
                Some(self.collect_existing_files(instance, &descriptor)?)
            }
            RenderTarget::Farm => None,
        };
        emit(
            instance,
            &descriptor,
            collected.as_ref(),
            &self.opts.review_tags,
        )?;

        self.augment_instance(instance, &descriptor)?;
        Ok(CollectOutcome::Collected)
    }

    fn collect_existing_files(
        &mut self,
        instance: &Instance,
        descriptor: &RenderOutputDescriptor,
    ) -> CollectResult<Collected> {
        let discovery = self.discover(&instance.name, descriptor)?;
        let mut basenames = discovery.basenames;

        if instance.wants_slate() {
            match insert_slate(&mut basenames, discovery.range) {
                SlateOutcome::Inserted(slate) => tracing::debug!(%slate, "slate frame added"),
                SlateOutcome::AlreadyPresent => {
                    tracing::debug!("slate frame already rendered")
                }
                SlateOutcome::NoFrameToken => tracing::warn!(
                    first = basenames.first().map(String::as_str).unwrap_or_default(),
                    "cannot derive slate frame name"
                ),
            }
        }

        Ok(Collected {
            basenames,
            range: discovery.range,
        })
    }

    /// Family tag, output location and frame fields shared by every target.
    fn augment_instance(
        &mut self,
        instance: &mut Instance,
        descriptor: &RenderOutputDescriptor,
    ) -> CollectResult<()> {
        let family = instance.target_family();
        tracing::debug!(%family, "appending render target to families");
        instance.families.push(family);

        let range = self.resolve_range(&instance.name, descriptor)?;
        let out = &mut instance.output;
        out.path = Some(descriptor.output_path.clone());
        out.output_dir = Some(descriptor.output_dir());
        out.ext = Some(descriptor.file_type.clone());
        out.color_channels = Some(descriptor.channels.clone());
        out.handle_start = 0;
        out.handle_end = 0;
        out.frame_start = Some(range.first);
        out.frame_end = Some(range.last);
        out.frame_start_handle = Some(range.first);
        out.frame_end_handle = Some(range.last);
        out.staging_dir_persistent = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collect/pipeline.rs"]
mod tests;
