//! Non-colliding sheet names

pub const DEFAULT_SHEET_NAME: &str = "Unpivot";

/// Longest sheet name spreadsheet applications accept
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Replace characters sheet names may not contain and fall back to the
/// default name when nothing usable remains
pub fn sanitize_sheet_name(base: &str) -> String {
    let cleaned: String = base
        .trim()
        .trim_matches('\'')
        .chars()
        .map(|c| if FORBIDDEN.contains(&c) { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        DEFAULT_SHEET_NAME.to_string()
    } else {
        cleaned
    }
}

/// First of `base`, `base2`, `base3`, ... not present in `existing`.
///
/// Comparison ignores case. Candidates are truncated to fit
/// [`MAX_SHEET_NAME_LEN`] before the counter is appended.
pub fn unique_sheet_name<S: AsRef<str>>(base: &str, existing: &[S]) -> String {
    let base = sanitize_sheet_name(base);
    let taken = |candidate: &str| {
        existing
            .iter()
            .any(|name| name.as_ref().to_lowercase() == candidate.to_lowercase())
    };

    let first = truncate_chars(&base, MAX_SHEET_NAME_LEN);
    if !taken(&first) {
        return first;
    }

    let mut i = 2usize;
    loop {
        let suffix = i.to_string();
        let candidate = format!(
            "{}{}",
            truncate_chars(&base, MAX_SHEET_NAME_LEN.saturating_sub(suffix.len())),
            suffix
        );
        if !taken(&candidate) {
            return candidate;
        }
        i += 1;
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
