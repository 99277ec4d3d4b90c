//! Display helpers

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human-readable byte size: `1536` becomes `"1.5 KB"`
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    // floor(log1024(bytes)) in integer arithmetic, capped at GB
    let mut exponent = 0;
    let mut scaled = bytes;
    while scaled >= 1024 && exponent < UNITS.len() - 1 {
        scaled /= 1024;
        exponent += 1;
    }

    let value = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (value * 100.0).round() / 100.0;

    let mut number = format!("{:.2}", rounded);
    while number.ends_with('0') {
        number.pop();
    }
    if number.ends_with('.') {
        number.pop();
    }

    format!("{} {}", number, UNITS[exponent])
}
