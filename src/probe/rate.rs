/// Convert an ffprobe rate (`"30000/1001"`, `"24/1"`, `"25"`) to frames per second.
///
/// Zero or malformed denominators (`"0/0"`), non-finite values and non-positive
/// rates yield `None`.
pub fn parse_frame_rate(value: &str) -> Option<f64> {
    let value = value.trim();
    let fps = match value.split_once('/') {
        Some((num, den)) => {
            let num = num.trim().parse::<f64>().ok()?;
            let den = den.trim().parse::<f64>().ok()?;
            if den == 0.0 {
                return None;
            }
            num / den
        }
        None => value.parse::<f64>().ok()?,
    };
    (fps.is_finite() && fps > 0.0).then_some(fps)
}
