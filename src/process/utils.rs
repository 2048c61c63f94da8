/// Non-breaking spaces in the export become ordinary spaces. Nothing else is touched.
pub fn clean_str(raw: &str) -> String {
    if raw.contains('\u{a0}') {
        raw.replace('\u{a0}', " ")
    } else {
        raw.to_string()
    }
}
