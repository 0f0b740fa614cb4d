use std::sync::LazyLock;

use regex::Regex;

static WIKIPEDIA_HOST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"wikipedia\.org").unwrap());

/// True if the URL belongs to the fixed-layout Wikipedia family.
/// Pure string predicate, case-sensitive, no network.
pub fn is_wikipedia_url(url: &str) -> bool {
    WIKIPEDIA_HOST.is_match(url)
}
