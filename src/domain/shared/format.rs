const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Human readable size using 1024-based units, at most two decimals.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && exponent < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        exponent += 1;
    }

    // Round to two decimals, then drop trailing zeros ("1.50" -> "1.5", "2.00" -> "2")
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    format!("{} {}", trimmed, SIZE_UNITS[exponent])
}

/// Speed slider label, always one decimal.
pub fn format_speed(speed: f32) -> String {
    format!("{:.1}", speed)
}
