use super::*;

#[test]
fn printf_token_is_replaced() {
    assert_eq!(
        replace_frame_token("/renders/sh010/render.%04d.exr", "*"),
        "/renders/sh010/render.*.exr"
    );
    assert_eq!(replace_frame_token("out_%d.png", "*"), "out_*.png");
}

#[test]
fn hash_token_is_replaced() {
    assert_eq!(
        replace_frame_token("/renders/comp.####.dpx", "*"),
        "/renders/comp.*.dpx"
    );
}

#[test]
fn evaluated_frame_number_is_replaced() {
    assert_eq!(
        replace_frame_token("/renders/shot010_comp.1042.exr", "*"),
        "/renders/shot010_comp.*.exr"
    );
}

#[test]
fn directory_tokens_are_ignored() {
    assert_eq!(
        replace_frame_token("/renders/v%03d/clip.mov", "*"),
        "/renders/v%03d/clip.mov"
    );
    assert!(split_frame_token("/renders/1001/clip.mov").is_none());
}

#[test]
fn glob_pattern_escapes_literal_text() {
    assert_eq!(
        frame_glob_pattern("/renders/[wip]/render.%04d.exr"),
        "/renders/[[]wip[]]/render.*.exr"
    );
    assert_eq!(frame_glob_pattern("/renders/clip.mov"), "/renders/clip.mov");
}

#[test]
fn trailing_frame_parses_dotted_numbers_only() {
    assert_eq!(parse_trailing_frame("shot010_comp.1042.exr"), Some(1042));
    assert_eq!(parse_trailing_frame("shot010_comp.exr"), None);
    assert_eq!(parse_trailing_frame("shot010_comp_1042.exr"), None);
    assert_eq!(
        parse_trailing_frame("huge.99999999999999999999999.exr"),
        None
    );
}
