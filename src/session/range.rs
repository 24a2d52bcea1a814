use crate::foundation::core::FrameRange;
use crate::foundation::error::CollectResult;
use crate::session::descriptor::RenderOutputDescriptor;
use crate::session::publish_session::PublishSession;

impl PublishSession {
    /// Authoritative frame range of an instance.
    ///
    /// The cached range wins, then the node's explicit limits, then the workfile
    /// range. The answer is cached; discovery may later overwrite it through
    /// [`PublishSession::set_range`], so repeated calls within one session can
    /// return different values.
    pub fn resolve_range(
        &mut self,
        instance_name: &str,
        descriptor: &RenderOutputDescriptor,
    ) -> CollectResult<FrameRange> {
        if let Some(range) = self.ranges.get(instance_name) {
            return Ok(*range);
        }

        let range = match descriptor.limit {
            Some(limit) => limit,
            None => self.workfile.range()?,
        };
        self.ranges.insert(instance_name.to_string(), range);
        Ok(range)
    }

    /// Overwrite the cached range of `instance_name`.
    pub fn set_range(&mut self, instance_name: &str, range: FrameRange) {
        self.ranges.insert(instance_name.to_string(), range);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/range.rs"]
mod tests;
