//! Deterministic test text generation.
//!
//! Verse text is keyed by ordinal: the same ordinal always yields the
//! same text, so a test can regenerate the expected content of any verse
//! instead of carrying fixtures around.

const WORDS: &[&str] = &[
    "and", "the", "of", "unto", "for", "behold", "upon", "earth", "light", "waters", "heaven",
    "day", "night", "firmament", "morning", "evening", "great", "land", "beast", "fowl", "seed",
    "tree", "fruit", "herb", "grass", "stars", "darkness", "deep", "spirit", "voice", "word",
    "people", "children", "house", "king", "hand", "face", "way", "mountain", "river", "city",
    "field", "bread", "wine", "stone", "fire", "wind", "rain",
];

/// Deterministic pseudo-English text for one verse ordinal.
///
/// Sentences run 6 to 22 words, so the result always fits the u16 size
/// limit of a stored verse.
pub fn verse_text(ordinal: u32) -> String {
    let mut rng = fastrand::Rng::with_seed(u64::from(ordinal).wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1);
    let count = rng.usize(6..=22);
    let mut text = String::new();
    for index in 0..count {
        let word = WORDS[rng.usize(..WORDS.len())];
        if index == 0 {
            text.push(word.as_bytes()[0].to_ascii_uppercase() as char);
            text.push_str(&word[1..]);
        } else {
            text.push(' ');
            text.push_str(word);
        }
    }
    text.push('.');
    text
}

/// Deterministic introduction text for a module name.
pub fn introduction_text(name: &str) -> String {
    format!("{name}: generated test text, not a real translation.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_deterministic() {
        assert_eq!(verse_text(17), verse_text(17));
        assert_eq!(verse_text(31102), verse_text(31102));
    }

    #[test]
    fn neighboring_ordinals_differ() {
        assert_ne!(verse_text(1), verse_text(2));
        assert_ne!(verse_text(2), verse_text(3));
    }

    #[test]
    fn text_shape_is_sane() {
        for ordinal in [0, 1, 100, 31102] {
            let text = verse_text(ordinal);
            assert!(text.ends_with('.'));
            assert!(text.chars().next().unwrap().is_ascii_uppercase());
            assert!(text.len() >= 6);
            assert!(text.len() < u16::MAX as usize);
        }
    }
}
