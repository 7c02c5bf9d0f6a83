const KB: u64 = 1024;
const UNITS: [&str; 3] = ["KB", "MB", "GB"];

/// Human-readable size in binary units, two decimals from 1 KB upwards.
///
/// The unit is picked after rounding, so a size that would print as
/// `1024.00` of one unit is shown as `1.00` of the next.
pub fn format_size(bytes: u64) -> String {
    match bytes {
        1 => return "1 byte".to_string(),
        b if b < KB => return format!("{b} bytes"),
        _ => {}
    }

    let mut value = bytes as f64 / KB as f64;
    let mut unit = 0;
    while unit + 1 < UNITS.len() && (value * 100.0).round() >= 1024.0 * 100.0 {
        value /= KB as f64;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
