//! Random choice among delimited candidates.

use std::sync::LazyLock;

use rand::Rng;
use rand::prelude::IndexedRandom;
use regex::Regex;

static VS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[vV][sS]").expect("vs pattern is valid"));

/// Drop a leading question such as `"뭐 먹지? 피자 vs 치킨"` and trailing `?`.
fn strip_question(text: &str) -> &str {
    let text = text.trim();
    let text = match text.find('?') {
        Some(pos) if pos + 1 < text.len() => &text[pos + 1..],
        _ => text,
    };
    text.trim().trim_end_matches('?').trim()
}

fn candidates(text: &str) -> Vec<&str> {
    let parts: Vec<&str> = if VS_PATTERN.is_match(text) {
        VS_PATTERN.split(text).collect()
    } else if text.contains('\n') {
        text.split('\n').collect()
    } else {
        text.split(' ').collect()
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// Pick one candidate, or `None` when there is nothing to pick from.
pub fn choose<R: Rng + ?Sized>(text: &str, rng: &mut R) -> Option<String> {
    let text = strip_question(text);
    candidates(text).choose(rng).map(|choice| (*choice).to_string())
}
