#![forbid(unsafe_code)]
//! Render-output collection for compositing publishes.
//!
//! For each publish instance the crate finds the write node rendering it,
//! resolves the frame range, discovers rendered files on disk (image
//! sequences, stills, or container video probed with `ffprobe`), optionally
//! prepends a slate frame and builds the representation and farm metadata the
//! downstream publish steps consume.
//!
//! All per-instance caching lives in a [`PublishSession`].

pub mod collect;
pub mod foundation;
pub mod model;
pub mod probe;
pub mod sequence;
pub mod session;
pub mod workfile;

pub use collect::batch::{SessionFile, SessionReport, run_session};
pub use collect::pipeline::CollectOutcome;
pub use foundation::core::{FrameRange, RenderTarget};
pub use foundation::error::{CollectError, CollectResult};
pub use model::instance::{Instance, InstanceOutput};
pub use model::node::{NodeSnapshot, WriteSettings};
pub use model::representation::{Representation, RepresentationFiles};
pub use probe::ffprobe::{FfprobeProber, FrameCount, MediaProber, ProbeOpts};
pub use session::descriptor::{DescriptorLookup, RenderOutputDescriptor};
pub use session::publish_session::{PublishSession, SessionOpts, WorkfileSettings};
pub use workfile::autosave::autosave_files;
pub use workfile::version::version_up;
