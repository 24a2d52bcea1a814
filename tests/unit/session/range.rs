use super::*;
use crate::session::publish_session::{SessionOpts, WorkfileSettings};

fn descriptor(limit: Option<FrameRange>) -> RenderOutputDescriptor {
    RenderOutputDescriptor {
        node_name: "Write1".to_string(),
        output_path: "/r/comp.%04d.exr".to_string(),
        file_type: "exr".to_string(),
        channels: "rgba".to_string(),
        limit,
    }
}

fn session() -> PublishSession {
    PublishSession::new(
        WorkfileSettings {
            first_frame: 1001,
            last_frame: 1100,
            current_file: None,
        },
        SessionOpts::default(),
    )
}

#[test]
fn workfile_range_is_the_default() {
    let mut s = session();
    let r = s.resolve_range("a", &descriptor(None)).unwrap();
    assert_eq!(r, FrameRange::new(1001, 1100).unwrap());
    assert_eq!(s.cached_range("a"), Some(r));
}

#[test]
fn node_limits_override_workfile() {
    let mut s = session();
    let limit = FrameRange::new(1010, 1020).unwrap();
    assert_eq!(s.resolve_range("a", &descriptor(Some(limit))).unwrap(), limit);
}

#[test]
fn cached_range_wins_and_can_be_overwritten() {
    let mut s = session();
    let d = descriptor(None);
    s.resolve_range("a", &d).unwrap();

    let discovered = FrameRange::new(1001, 1010).unwrap();
    s.set_range("a", discovered);
    assert_eq!(s.resolve_range("a", &d).unwrap(), discovered);

    let limited = descriptor(Some(FrameRange::single(5)));
    assert_eq!(s.resolve_range("a", &limited).unwrap(), discovered);
    assert_eq!(
        s.resolve_range("b", &d).unwrap(),
        FrameRange::new(1001, 1100).unwrap()
    );
}

#[test]
fn inverted_workfile_range_is_an_error() {
    let mut s = PublishSession::new(
        WorkfileSettings {
            first_frame: 10,
            last_frame: 1,
            current_file: None,
        },
        SessionOpts::default(),
    );
    let err = s.resolve_range("a", &descriptor(None)).unwrap_err();
    assert_eq!(err.key(), Some("invalid_frame_range"));
}
