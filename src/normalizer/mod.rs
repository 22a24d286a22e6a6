// src/normalizer/mod.rs

pub mod lexicon;

pub use lexicon::{Lexicon, WordList};

/// Digits plus the punctuation and markup characters stripped from article text.
pub const STRIPPED_CHARS: [&str; 37] = [
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ",", ";", "?", "!", ".", "+", "_", "(", ")",
    "[", "]", "{", "}", "\n", "%", "/", "#", "~", "<", ">", "*", "&", "=", "|", "\"", "@", ":",
];

/// Markup leftovers that are never article content. Removed as substrings,
/// so `classtest` loses its `class` too.
pub const BOILERPLATE_TOKENS: [&str; 21] = [
    "class",
    "div",
    "function",
    "click",
    "amp",
    "sections",
    "quot",
    "com",
    "news",
    "var",
    "head",
    "buffer",
    "script",
    "follow",
    "res",
    "homepage",
    "configuration",
    "wrapper",
    "byline",
    "span",
    "copyright",
];

/// Blanks every stripped character, then every boilerplate token, in order.
/// Each occurrence becomes exactly one space.
pub fn strip_markup(raw_text: &str) -> String {
    STRIPPED_CHARS
        .iter()
        .chain(BOILERPLATE_TOKENS.iter())
        .fold(raw_text.to_string(), |text, pattern| text.replace(pattern, " "))
}

/// Turns scraped paragraph markup into the ordered list of real words in it.
pub fn normalize<L: Lexicon + ?Sized>(raw_text: &str, lexicon: &L) -> Vec<String> {
    strip_markup(raw_text)
        .split(' ')
        .filter(|token| token.chars().count() > 1)
        .filter(|token| lexicon.is_known_word(token))
        .map(String::from)
        .collect()
}
