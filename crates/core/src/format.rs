/// Unit ladder for [`format_bytes`]. Values beyond the last unit stay in
/// that unit rather than overflowing into an invented one.
const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

pub const DEFAULT_BAR_WIDTH: usize = 20;

const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Humanize a byte count with two decimal places: `0.00 B`, `1.00 KB`,
/// `1.50 KB`, ... Saturates at petabytes.
pub fn format_bytes(bytes: u64) -> String {
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.2} {}", UNITS[unit])
}

/// Bracketed glyph bar for a percentage in `[0, 100]`. `filled` is the
/// percentage rounded onto `width` cells; `filled + empty == width` always.
pub fn proportion_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let empty = width - filled;

    let mut bar = String::with_capacity(width + 2);
    bar.push('[');
    for _ in 0..filled {
        bar.push(BAR_FULL);
    }
    for _ in 0..empty {
        bar.push(BAR_EMPTY);
    }
    bar.push(']');
    bar
}

pub fn proportion_bar_default(percent: f64) -> String {
    proportion_bar(percent, DEFAULT_BAR_WIDTH)
}
