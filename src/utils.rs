//! Utility functions shared across the pipeline

/// Render a byte count as a human-readable size
///
/// Uses 1024-based units and trims trailing zeros, so policy limits and
/// file sizes read naturally in notifications ("10 MB", "1.5 KB").
///
/// # Examples
///
/// ```
/// use kb_ingest::utils::format_size;
///
/// assert_eq!(format_size(0), "0 Bytes");
/// assert_eq!(format_size(2048), "2 KB");
/// assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
/// ```
#[must_use]
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];
    const K: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let exponent = ((bytes as f64).ln() / K.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / K.powi(exponent as i32);

    // Two decimal places, then strip trailing zeros ("10.00" -> "10")
    let mut rendered = format!("{value:.2}");
    while rendered.ends_with('0') {
        rendered.pop();
    }
    if rendered.ends_with('.') {
        rendered.pop();
    }

    format!("{} {}", rendered, UNITS[exponent])
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes_renders_specially() {
        assert_eq!(format_size(0), "0 Bytes");
    }

    #[test]
    fn sub_kilobyte_values_render_in_bytes() {
        assert_eq!(format_size(1), "1 Bytes");
        assert_eq!(format_size(512), "512 Bytes");
        assert_eq!(format_size(1023), "1023 Bytes");
    }

    #[test]
    fn whole_unit_values_trim_trailing_zeros() {
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(10 * 1024 * 1024), "10 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn fractional_values_keep_up_to_two_decimals() {
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1597), "1.56 KB");
    }

    #[test]
    fn values_past_gigabytes_stay_in_gigabytes() {
        assert_eq!(format_size(2048 * 1024 * 1024 * 1024), "2048 GB");
    }
}
