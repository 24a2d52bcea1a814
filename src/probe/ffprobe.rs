use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::Duration;

use serde::Deserialize;
use wait_timeout::ChildExt;

use crate::foundation::error::{CollectError, CollectResult};
use crate::probe::rate::parse_frame_rate;

/// Options for [`FfprobeProber`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ProbeOpts {
    /// Executable name or path of `ffprobe`.
    pub ffprobe_bin: String,
    /// Seconds before a running probe is killed.
    pub timeout_secs: u64,
}

impl Default for ProbeOpts {
    fn default() -> Self {
        Self {
            ffprobe_bin: "ffprobe".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ProbeOpts {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// The stream fields frame counting reads from `ffprobe -show_streams`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ProbeStream {
    #[serde(default)]
    pub codec_type: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    /// Declared frame count; ffprobe reports it as a string (`"240"`, `"N/A"`).
    #[serde(default, deserialize_with = "lenient_text")]
    pub nb_frames: Option<String>,
    /// Stream duration in seconds.
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    /// Rational frame rate (`"30000/1001"`).
    #[serde(default)]
    pub r_frame_rate: Option<String>,
}

impl ProbeStream {
    pub fn is_video(&self) -> bool {
        self.width.is_some() && self.height.is_some()
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// What a probe run produced.
#[derive(Clone, Debug, PartialEq)]
pub enum ProbeReport {
    Streams(Vec<ProbeStream>),
    /// The probe was killed after running longer than the timeout.
    TimedOut(Duration),
}

/// Source of stream metadata for container video files.
pub trait MediaProber {
    /// Probe `path`.
    ///
    /// Failing to run the probe at all, or the probe rejecting the file, is an
    /// error; a timeout is reported as [`ProbeReport::TimedOut`].
    fn probe_streams(&self, path: &Path) -> CollectResult<ProbeReport>;
}

/// Frame count recovered from probe metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameCount {
    Known(u64),
    Unknown,
}

/// [`MediaProber`] backed by the system `ffprobe`.
#[derive(Clone, Debug, Default)]
pub struct FfprobeProber {
    opts: ProbeOpts,
}

impl FfprobeProber {
    pub fn new(opts: ProbeOpts) -> Self {
        Self { opts }
    }
}

type Drain = JoinHandle<std::io::Result<Vec<u8>>>;

fn spawn_drain<R: Read + Send + 'static>(reader: Option<R>) -> Option<Drain> {
    reader.map(|mut r| {
        std::thread::spawn(move || {
            let mut buf = Vec::new();
            r.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn join_drain(drain: Option<Drain>) -> CollectResult<Vec<u8>> {
    let Some(handle) = drain else {
        return Ok(Vec::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| CollectError::probe("ffprobe output reader panicked"))??;
    Ok(bytes)
}

fn unreadable(path: &Path, message: impl std::fmt::Display) -> CollectError {
    CollectError::probe(format!(
        "FFprobe couldn't read information about input file: '{}'. Error message: {message}",
        path.display()
    ))
}

impl MediaProber for FfprobeProber {
    fn probe_streams(&self, path: &Path) -> CollectResult<ProbeReport> {
        #[derive(Deserialize)]
        struct ProbeOut {
            #[serde(default)]
            streams: Vec<ProbeStream>,
        }

        let mut child = Command::new(&self.opts.ffprobe_bin)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                unreadable(path, format!("failed to run '{}': {e}", self.opts.ffprobe_bin))
            })?;

        // Pipes are drained concurrently so a chatty probe cannot block on a full pipe.
        let stdout = spawn_drain(child.stdout.take());
        let stderr = spawn_drain(child.stderr.take());

        let timeout = self.opts.timeout();
        let status = match child
            .wait_timeout(timeout)
            .map_err(|e| unreadable(path, e))?
        {
            Some(status) => status,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::warn!(
                    path = %path.display(),
                    timeout_secs = timeout.as_secs(),
                    "ffprobe timed out"
                );
                return Ok(ProbeReport::TimedOut(timeout));
            }
        };

        let stdout = join_drain(stdout)?;
        let stderr = join_drain(stderr)?;
        if !status.success() {
            return Err(unreadable(
                path,
                String::from_utf8_lossy(&stderr).trim().to_string(),
            ));
        }

        let parsed: ProbeOut = serde_json::from_slice(&stdout)
            .map_err(|e| unreadable(path, format!("ffprobe json parse failed: {e}")))?;
        Ok(ProbeReport::Streams(parsed.streams))
    }
}

/// Frame count of the first stream exposing width and height.
///
/// `nb_frames` wins when it is a positive integer; otherwise the count is
/// `duration * r_frame_rate` rounded to the nearest frame. Anything else is
/// [`FrameCount::Unknown`].
pub fn frame_count_from_streams(streams: &[ProbeStream]) -> FrameCount {
    let Some(stream) = streams.iter().find(|s| s.is_video()) else {
        tracing::warn!("cannot get number of frames: no stream with width and height");
        return FrameCount::Unknown;
    };

    if let Some(nb_frames) = stream.nb_frames.as_deref() {
        match nb_frames.trim().parse::<u64>() {
            Ok(n) if n > 0 => return FrameCount::Known(n),
            _ => tracing::warn!(
                nb_frames,
                codec = stream.codec_type.as_deref().unwrap_or("unknown"),
                "nb_frames not convertible"
            ),
        }
    }

    let duration = stream
        .duration
        .as_deref()
        .and_then(|d| d.trim().parse::<f64>().ok());
    let frame_rate = stream.r_frame_rate.as_deref().and_then(parse_frame_rate);
    tracing::debug!(?duration, ?frame_rate, "frame count from duration and frame rate");

    match (duration, frame_rate) {
        (Some(duration), Some(frame_rate)) => {
            let frames = (duration * frame_rate).round();
            if frames.is_finite() && frames >= 1.0 {
                FrameCount::Known(frames as u64)
            } else {
                tracing::warn!(duration, frame_rate, "duration and frame rate give no frames");
                FrameCount::Unknown
            }
        }
        _ => {
            tracing::warn!(
                duration = ?stream.duration,
                r_frame_rate = ?stream.r_frame_rate,
                "duration or frame rate cannot be converted"
            );
            FrameCount::Unknown
        }
    }
}

/// Probe `path` and count its frames.
pub fn probe_frame_count(prober: &dyn MediaProber, path: &Path) -> CollectResult<FrameCount> {
    match prober.probe_streams(path)? {
        ProbeReport::Streams(streams) => Ok(frame_count_from_streams(&streams)),
        ProbeReport::TimedOut(_) => Ok(FrameCount::Unknown),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/probe/ffprobe.rs"]
mod tests;
