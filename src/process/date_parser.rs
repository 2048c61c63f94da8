/// Closing year used by the export for "still open" or "not known".
pub const OPEN_ENDED_YEAR: &str = "9999";

/// First four characters of the trimmed value, kept only if they are all digits.
///
/// `"1985:1990"` → `Some("1985")`, `"c.1900"` → `None`, `""` → `None`.
pub fn parse_year(raw: Option<&str>) -> Option<String> {
    let year: String = raw?.trim().chars().take(4).collect();
    if year.len() == 4 && year.chars().all(|c| c.is_ascii_digit()) {
        Some(year)
    } else {
        None
    }
}

/// Same as [`parse_year`], with the open-ended sentinel treated as absent.
pub fn parse_closing_year(raw: Option<&str>) -> Option<String> {
    parse_year(raw).filter(|year| year != OPEN_ENDED_YEAR)
}

/// Trimmed date with anything from the first `.` dropped; `None` when nothing is left.
pub fn date_prefix(raw: Option<&str>) -> Option<&str> {
    let trimmed = raw?.trim();
    let head = trimmed.split_once('.').map_or(trimmed, |(head, _)| head);
    if head.is_empty() {
        None
    } else {
        Some(head)
    }
}
