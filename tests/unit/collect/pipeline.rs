use std::path::{Path, PathBuf};

use super::*;
use crate::foundation::error::NO_RENDER_FILES;
use crate::model::node::{NodeSnapshot, WriteSettings};
use crate::model::representation::RepresentationFiles;
use crate::session::publish_session::{SessionOpts, WorkfileSettings};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "rendercollect_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn render_frames(dir: &Path, frames: std::ops::RangeInclusive<i64>) {
    for f in frames {
        std::fs::write(dir.join(format!("render.{f:04}.exr")), b"").unwrap();
    }
}

fn write_group(dir: &Path) -> NodeSnapshot {
    NodeSnapshot {
        name: "renderMain".to_string(),
        class: "Group".to_string(),
        write: None,
        children: vec![NodeSnapshot {
            name: "renderMain.Write1".to_string(),
            class: "Write".to_string(),
            write: Some(WriteSettings {
                file: dir.join("render.%04d.exr").to_string_lossy().into_owned(),
                file_type: "exr".to_string(),
                channels: "rgba".to_string(),
                ..Default::default()
            }),
            children: Vec::new(),
        }],
    }
}

fn session() -> PublishSession {
    PublishSession::new(
        WorkfileSettings {
            first_frame: 1001,
            last_frame: 1050,
            current_file: None,
        },
        SessionOpts::default(),
    )
}

#[test]
fn frames_farm_collects_sequence_and_expected_files() {
    let dir = temp_dir("pipeline_frames_farm");
    render_frames(&dir, 1001..=1010);
    let mut inst = Instance::new(
        "renderMain",
        "render",
        RenderTarget::FramesFarm,
        write_group(&dir),
    );

    let mut session = session();
    assert_eq!(
        session.collect_instance(&mut inst).unwrap(),
        CollectOutcome::Collected
    );

    let out = &inst.output;
    assert_eq!(out.representations.len(), 1);
    let repre = &out.representations[0];
    assert_eq!(repre.name, "exr");
    assert_eq!(repre.ext, "exr");
    assert_eq!(repre.frame_start, "1001");
    assert_eq!(repre.staging_dir, dir);
    assert_eq!(repre.files.len(), 10);
    assert!(matches!(repre.files, RepresentationFiles::Sequence(_)));
    assert_eq!(repre.tags, vec!["shotgridreview", "review"]);

    let expected = out.expected_files.as_ref().unwrap();
    assert_eq!(expected.len(), 10);
    assert_eq!(expected[0], dir.join("render.1001.exr"));
    assert!(expected.iter().all(|p| p.is_absolute()));

    assert!(out.farm);
    assert_eq!(out.transfer, Some(false));
    assert_eq!(out.use_sequence_for_review, Some(false));
    assert_eq!(out.frame_start, Some(1001));
    assert_eq!(out.frame_end, Some(1010));
    assert!(inst.families.contains(&"render.frames_farm".to_string()));
}

#[test]
fn local_frames_stay_local() {
    let dir = temp_dir("pipeline_frames");
    render_frames(&dir, 1..=3);
    let mut inst = Instance::new(
        "renderMain",
        "render",
        RenderTarget::Frames,
        write_group(&dir),
    );

    session().collect_instance(&mut inst).unwrap();

    let out = &inst.output;
    assert_eq!(out.representations.len(), 1);
    assert_eq!(out.representations[0].frame_start, "1");
    assert_eq!(out.expected_files, None);
    assert!(!out.farm);
    assert_eq!(out.transfer, None);
    assert_eq!(out.path.as_deref(), Some(dir.join("render.%04d.exr").to_str().unwrap()));
    assert_eq!(out.output_dir.as_deref(), Some(dir.as_path()));
    assert_eq!(out.ext.as_deref(), Some("exr"));
    assert_eq!(out.color_channels.as_deref(), Some("rgba"));
    assert_eq!((out.frame_start, out.frame_end), (Some(1), Some(3)));
    assert_eq!((out.handle_start, out.handle_end), (0, 0));
    assert!(out.staging_dir_persistent);
    assert_eq!(inst.families, vec!["render.frames".to_string()]);
}

#[test]
fn farm_target_skips_the_disk() {
    let dir = temp_dir("pipeline_farm");
    let mut inst = Instance::new(
        "renderMain",
        "render",
        RenderTarget::Farm,
        write_group(&dir),
    );
    inst.review = true;

    session().collect_instance(&mut inst).unwrap();

    let out = &inst.output;
    assert!(out.representations.is_empty());
    assert_eq!(out.expected_files, None);
    assert!(out.farm);
    assert_eq!(out.use_sequence_for_review, None);
    assert_eq!((out.frame_start, out.frame_end), (Some(1001), Some(1050)));
}

#[test]
fn slate_family_adds_a_leading_frame() {
    let dir = temp_dir("pipeline_slate");
    render_frames(&dir, 1001..=1005);
    let mut inst = Instance::new(
        "renderMain",
        "render",
        RenderTarget::FramesFarm,
        write_group(&dir),
    );
    inst.families.push("slate".to_string());

    session().collect_instance(&mut inst).unwrap();

    let repre = &inst.output.representations[0];
    assert_eq!(repre.files.len(), 6);
    assert_eq!(repre.files.as_slice()[0], "render.1000.exr");
    assert_eq!(repre.frame_start, "1001");
    let expected = inst.output.expected_files.as_ref().unwrap();
    assert_eq!(expected[0], dir.join("render.1000.exr"));
    assert_eq!(expected.len(), 6);
}

#[test]
fn instance_without_write_node_is_skipped() {
    let node = NodeSnapshot {
        name: "renderMain".to_string(),
        class: "Group".to_string(),
        write: None,
        children: vec![NodeSnapshot {
            name: "renderMain.Grade1".to_string(),
            class: "Grade".to_string(),
            ..Default::default()
        }],
    };
    let mut inst = Instance::new("renderMain", "render", RenderTarget::Frames, node);
    let before = inst.clone();

    assert_eq!(
        session().collect_instance(&mut inst).unwrap(),
        CollectOutcome::Skipped
    );
    assert_eq!(inst, before);
}

#[test]
fn missing_render_is_a_validation_error() {
    let dir = temp_dir("pipeline_empty");
    let mut inst = Instance::new(
        "renderMain",
        "render",
        RenderTarget::Frames,
        write_group(&dir),
    );

    let err = session().collect_instance(&mut inst).unwrap_err();
    assert_eq!(err.key(), Some(NO_RENDER_FILES));
    assert!(inst.output.representations.is_empty());
}
