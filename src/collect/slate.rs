use crate::foundation::core::FrameRange;

/// What [`insert_slate`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlateOutcome {
    /// A slate frame named like the first frame, one index earlier, was prepended.
    Inserted(String),
    /// The file count differs from the range length; a slate is assumed to be there.
    AlreadyPresent,
    /// The first basename does not contain the first frame's number.
    NoFrameToken,
}

/// Prepend a slate frame one index before `range.first`.
///
/// Only a pristine sequence (exactly one file per frame of `range`) gets a
/// slate, so running this again over its own output is a no-op.
pub fn insert_slate(basenames: &mut Vec<String>, range: FrameRange) -> SlateOutcome {
    if basenames.len() as u64 != range.len_frames() {
        return SlateOutcome::AlreadyPresent;
    }
    let Some(first) = basenames.first() else {
        return SlateOutcome::AlreadyPresent;
    };

    let frame_start = range.first_str();
    if !first.contains(&frame_start) {
        return SlateOutcome::NoFrameToken;
    }
    let slate = first.replacen(&frame_start, &range.frame_str(range.first - 1), 1);
    basenames.insert(0, slate.clone());
    SlateOutcome::Inserted(slate)
}
