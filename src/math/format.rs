/// Formats a value with at most `decimals` fractional digits
///
/// Trailing zeros and a dangling decimal point are removed, and negative zero prints as `0`,
/// so identical placements always serialize to identical text.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }
    if text == "-0" {
        text.remove(0);
    }
    text
}
