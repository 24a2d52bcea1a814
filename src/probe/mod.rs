pub mod ffprobe;
pub mod rate;

/// Extensions of container video formats (as opposed to image sequences).
pub const VIDEO_FILE_EXTENSIONS: &[&str] = &[
    ".avi", ".mov", ".m4v", ".mp4", ".m4a", ".m4p", ".m4b", ".m4r", ".mpg", ".mpeg", ".mxf", ".r3d",
];
