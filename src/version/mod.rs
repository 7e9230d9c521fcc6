use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;
use std::sync::OnceLock;

use regex::Regex;

/// File extensions that hold release notes rather than payload data. Files
/// with these extensions never count as version candidates.
const NOTES_EXTENSIONS: [&str; 2] = ["txt", "json"];

fn version_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"v\d{3,}").expect("version pattern is valid"))
}

/// Resolve the latest versioned file from a directory listing.
///
/// Returns `(file_name, version_tag)` for the numerically greatest version
/// tag (`v` followed by at least three digits), or `("", "")` when no file
/// in the listing carries a version tag. The empty result is a normal
/// outcome for unversioned components, not an error.
///
/// When two filenames carry the same version tag, the lexicographically
/// greater full filename wins.
pub fn latest_version(file_names: &[String]) -> (String, String) {
    let mut candidates: Vec<(&str, &str)> = Vec::new();
    for name in file_names {
        let extension = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        if NOTES_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        if let Some(found) = version_pattern().find(name) {
            candidates.push((name.as_str(), found.as_str()));
        }
    }

    if candidates.is_empty() {
        return (String::new(), String::new());
    }

    candidates.sort_by(|a, b| {
        version_value(b.1)
            .cmp(&version_value(a.1))
            .then_with(|| natural_cmp(b.0, a.0))
            .then_with(|| b.0.cmp(a.0))
    });

    let (file_name, version) = candidates[0];
    (file_name.to_string(), version.to_string())
}

fn version_value(tag: &str) -> u64 {
    tag[1..].parse().unwrap_or(0)
}

/// Natural-order comparison: digit runs compare as integers, so `v9` sorts
/// before `v10` and `sh020` before `sh100`.
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();
    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let a_number = take_number(&mut a_chars);
                    let b_number = take_number(&mut b_chars);
                    match a_number.cmp(&b_number) {
                        Ordering::Equal => {}
                        other => return other,
                    }
                } else {
                    match x.cmp(&y) {
                        Ordering::Equal => {
                            a_chars.next();
                            b_chars.next();
                        }
                        other => return other,
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut Peekable<Chars>) -> u64 {
    let mut value: u64 = 0;
    while let Some(c) = chars.peek().copied() {
        let Some(digit) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(digit as u64);
        chars.next();
    }
    value
}
