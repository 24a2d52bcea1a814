use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CollectError::validation(NO_RENDER_FILES, "x", [("k", "v".to_string())])
            .to_string()
            .contains("validation error [no_render_files]:")
    );
    assert!(CollectError::probe("x").to_string().contains("probe error:"));
    assert!(
        CollectError::version("x")
            .to_string()
            .contains("version error:")
    );
    assert!(
        CollectError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn validation_carries_key_and_context() {
    let err = CollectError::validation(
        NO_RENDER_FILES,
        "nothing on disk",
        [("output_path", "/r/a.%04d.exr".to_string())],
    );
    assert_eq!(err.key(), Some(NO_RENDER_FILES));
    let CollectError::Validation { context, .. } = err else {
        panic!("expected validation error");
    };
    assert_eq!(context["output_path"], "/r/a.%04d.exr");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CollectError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
    assert_eq!(err.key(), None);
}
