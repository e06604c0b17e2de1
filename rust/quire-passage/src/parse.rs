//! Parsing human verse references.
//!
//! The grammar mirrors what the renderers emit, plus the usual shorthand
//! people type. A passage is a list of segments separated by `,` or `;`;
//! each segment is one range, `side` or `side-side`; each side is a book
//! name, a chapter, or a verse:
//!
//! ```text
//! Gen                  whole book
//! Gen 1                whole chapter
//! Gen 1:1              one verse     (also "Gen 1.2" and "Gen 1 2")
//! Obad 3               one verse of a single-chapter book
//! Gen 1:1-3            range within a chapter
//! Gen 1-2              range of whole chapters
//! Gen-Exod             range of whole books
//! Gen 1:1-Exod 2:3     arbitrary range
//! ```
//!
//! Later segments inherit the book, and where sensible the chapter, of the
//! segment before them: `"Gen 1:1, 3"` is Gen 1:3, `"Gen 1, 3"` is all of
//! Gen 3. The second side of a range inherits from the first the same way.
//! Book names match OSIS ids, full names, abbreviations, or an unambiguous
//! prefix of a full name, all case-insensitively, with or without internal
//! spaces (`"1 Cor"`, `"1Cor"`).

use std::sync::Arc;

use quire_common::{Result, error::Error};
use quire_versification::{BookId, Versification};

use crate::passage::Passage;
use crate::verse::Verse;
use crate::verse_range::VerseRange;

/// What one side of a segment resolved to.
#[derive(Clone, Copy)]
enum Anchor {
    Book(BookId),
    Chapter(BookId, u16),
    Verse(BookId, u16, u16),
}

/// Inherited position for bare numbers in later sides and segments.
#[derive(Clone, Copy, Default)]
struct Context {
    book: Option<BookId>,
    chapter: Option<u16>,
    at_verse_level: bool,
}

impl Context {
    fn after(anchor: Anchor) -> Context {
        match anchor {
            Anchor::Book(book) => Context {
                book: Some(book),
                chapter: None,
                at_verse_level: false,
            },
            Anchor::Chapter(book, chapter) => Context {
                book: Some(book),
                chapter: Some(chapter),
                at_verse_level: false,
            },
            Anchor::Verse(book, chapter, _) => Context {
                book: Some(book),
                chapter: Some(chapter),
                at_verse_level: true,
            },
        }
    }
}

/// Parses a reference list into a passage. Empty input is the empty passage.
pub fn parse_passage(v11n: Arc<Versification>, text: &str) -> Result<Passage> {
    let mut ranges = Vec::new();
    let mut context = Context::default();
    for segment in text.split([',', ';']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let (range, after) = parse_segment(&v11n, segment, context)?;
        ranges.push(range);
        context = after;
    }
    Passage::from_ranges(v11n, ranges)
}

/// Parses a single range reference.
pub fn parse_range(v11n: &Arc<Versification>, text: &str) -> Result<VerseRange> {
    if text.contains([',', ';']) {
        return Err(Error::parse(text, "expected a single range, found a list"));
    }
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::parse(text, "empty reference"));
    }
    let (range, _) = parse_segment(v11n, trimmed, Context::default())?;
    Ok(range)
}

/// Parses a single verse reference. A bare book or chapter resolves to its
/// first verse.
pub fn parse_verse(v11n: &Arc<Versification>, text: &str) -> Result<Verse> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::parse(text, "empty reference"));
    }
    if trimmed.contains(['-', ',', ';']) {
        return Err(Error::parse(text, "expected a single verse"));
    }
    let anchor = parse_side(v11n, trimmed, Context::default())?;
    anchor_start(v11n, anchor)
}

fn parse_segment(
    v11n: &Arc<Versification>,
    segment: &str,
    context: Context,
) -> Result<(VerseRange, Context)> {
    let parts: Vec<&str> = segment.split('-').map(str::trim).collect();
    match parts.as_slice() {
        [side] => {
            let anchor = parse_side(v11n, side, context)?;
            let range = match anchor {
                Anchor::Book(book) => VerseRange::whole_book(v11n, book)?,
                Anchor::Chapter(book, chapter) => VerseRange::whole_chapter(v11n, book, chapter)?,
                Anchor::Verse(book, chapter, verse) => {
                    VerseRange::single(Verse::new(Arc::clone(v11n), book, chapter, verse)?)
                }
            };
            Ok((range, Context::after(anchor)))
        }
        [start_side, end_side] => {
            if start_side.is_empty() || end_side.is_empty() {
                return Err(Error::parse(segment, "missing a side of the range"));
            }
            let start_anchor = parse_side(v11n, start_side, context)?;
            let end_anchor = parse_side(v11n, end_side, Context::after(start_anchor))?;
            let start = anchor_start(v11n, start_anchor)?;
            let end = anchor_end(v11n, end_anchor)?;
            let range = VerseRange::new(start, end)?;
            Ok((range, Context::after(end_anchor)))
        }
        _ => Err(Error::parse(segment, "more than one '-' in a range")),
    }
}

/// The verse a range starts at when this anchor is its left side.
fn anchor_start(v11n: &Arc<Versification>, anchor: Anchor) -> Result<Verse> {
    match anchor {
        Anchor::Book(book) => Ok(Verse::from_ordinal(
            Arc::clone(v11n),
            v11n.first_ordinal(book)?,
        )),
        Anchor::Chapter(book, chapter) => Verse::new(Arc::clone(v11n), book, chapter, 1),
        Anchor::Verse(book, chapter, verse) => Verse::new(Arc::clone(v11n), book, chapter, verse),
    }
}

/// The verse a range ends at when this anchor is its right side.
fn anchor_end(v11n: &Arc<Versification>, anchor: Anchor) -> Result<Verse> {
    match anchor {
        Anchor::Book(book) => Ok(Verse::from_ordinal(
            Arc::clone(v11n),
            v11n.last_ordinal(book)?,
        )),
        Anchor::Chapter(book, chapter) => {
            let last = v11n.last_verse(book, chapter)?;
            Verse::new(Arc::clone(v11n), book, chapter, last)
        }
        Anchor::Verse(book, chapter, verse) => Verse::new(Arc::clone(v11n), book, chapter, verse),
    }
}

fn parse_side(v11n: &Arc<Versification>, side: &str, context: Context) -> Result<Anchor> {
    let tokens: Vec<&str> = side.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(Error::parse(side, "empty reference"));
    }

    // Peel the longest numeric tail (at most "C V" or one "N" / "C:V"
    // token); whatever precedes it is the book name.
    let tail_len = if tokens.len() >= 2
        && is_plain_number(tokens[tokens.len() - 2])
        && is_plain_number(tokens[tokens.len() - 1])
    {
        2
    } else if is_numeric_token(tokens[tokens.len() - 1]) {
        1
    } else {
        0
    };
    let (book_tokens, tail) = tokens.split_at(tokens.len() - tail_len);

    let explicit_book = !book_tokens.is_empty();
    let book = if explicit_book {
        resolve_book(v11n, &book_tokens.join(" "))?
    } else {
        context
            .book
            .ok_or_else(|| Error::parse(side, "no book named and none to inherit"))?
    };

    match tail {
        [] => Ok(Anchor::Book(book)),
        [one] => match split_chapter_verse(one) {
            Some((chapter, verse)) => Ok(Anchor::Verse(
                book,
                parse_number(chapter, side)?,
                parse_number(verse, side)?,
            )),
            None => {
                let number = parse_number(one, side)?;
                if single_chapter_book(v11n, book) {
                    Ok(Anchor::Verse(book, 1, number))
                } else if !explicit_book && context.at_verse_level {
                    Ok(Anchor::Verse(book, context.chapter.unwrap_or(1), number))
                } else {
                    Ok(Anchor::Chapter(book, number))
                }
            }
        },
        [chapter, verse] => Ok(Anchor::Verse(
            book,
            parse_number(chapter, side)?,
            parse_number(verse, side)?,
        )),
        _ => unreachable!("numeric tail is at most two tokens"),
    }
}

fn resolve_book(v11n: &Versification, text: &str) -> Result<BookId> {
    if let Some(book) = v11n.find_book(text) {
        return Ok(book);
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    v11n.find_book(&compact)
        .ok_or_else(|| Error::no_such_book(v11n.name(), text))
}

fn single_chapter_book(v11n: &Versification, book: BookId) -> bool {
    v11n.last_chapter(book).map(|last| last == 1).unwrap_or(false)
}

fn is_plain_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// A numeric tail token: a plain number or a `chapter:verse` pair.
fn is_numeric_token(token: &str) -> bool {
    is_plain_number(token) || split_chapter_verse(token).is_some()
}

fn split_chapter_verse(token: &str) -> Option<(&str, &str)> {
    let (chapter, verse) = token.split_once([':', '.'])?;
    (is_plain_number(chapter) && is_plain_number(verse)).then_some((chapter, verse))
}

fn parse_number(token: &str, side: &str) -> Result<u16> {
    token
        .parse::<u16>()
        .map_err(|_| Error::parse(side, format!("'{token}' is not a usable number")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_common::error::ErrorKind;
    use quire_versification::Catalog;

    fn kjv() -> Arc<Versification> {
        Catalog::new().lookup("KJV").unwrap()
    }

    #[test]
    fn display_forms_round_trip() {
        for text in [
            "Gen",
            "Gen 1",
            "Gen 1:1",
            "Obad 3",
            "Gen 1:1-3",
            "Gen 1-2",
            "Gen 1:1-2:3",
            "Gen-Exod",
            "Gen 2-Exod 3",
            "Gen 1:2-Exod 2:3",
            "Obad 3-5",
        ] {
            let range = parse_range(&kjv(), text).unwrap();
            assert_eq!(range.to_string(), text, "round-tripping {text}");
        }
    }

    #[test]
    fn whole_book_and_chapter() {
        let book = parse_range(&kjv(), "Gen").unwrap();
        assert_eq!(book.verse_count(), 1533);
        let chapter = parse_range(&kjv(), "Ps 117").unwrap();
        assert_eq!(chapter.verse_count(), 2);
    }

    #[test]
    fn verse_shorthand_forms() {
        let v11n = kjv();
        for text in ["Gen 1:2", "Gen 1.2", "Gen 1 2", "genesis 1:2", "Ge 1:2"] {
            let verse = parse_verse(&v11n, text).unwrap();
            assert_eq!(verse.triple(), (BookId::Gen, 1, 2), "parsing {text}");
        }
        assert_eq!(
            parse_verse(&v11n, "1 Cor 2:3").unwrap().triple(),
            (BookId::Cor1, 2, 3)
        );
        assert_eq!(
            parse_verse(&v11n, "1Cor 2:3").unwrap().triple(),
            (BookId::Cor1, 2, 3)
        );
        assert_eq!(
            parse_verse(&v11n, "Song of Solomon 2:1").unwrap().triple(),
            (BookId::Song, 2, 1)
        );
        // A bare book or chapter falls to its first verse.
        assert_eq!(parse_verse(&v11n, "Exod").unwrap().triple(), (BookId::Exod, 1, 1));
        assert_eq!(parse_verse(&v11n, "Exod 3").unwrap().triple(), (BookId::Exod, 3, 1));
        assert_eq!(parse_verse(&v11n, "Obad 4").unwrap().triple(), (BookId::Obad, 1, 4));
    }

    #[test]
    fn lists_inherit_context() {
        let passage = parse_passage(kjv(), "Gen 1:1, 3, 5-7; Exod 2").unwrap();
        assert_eq!(passage.to_string(), "Gen 1:1, Gen 1:3, Gen 1:5-7, Exod 2");

        let chapters = parse_passage(kjv(), "Gen 1, 3").unwrap();
        assert_eq!(chapters.to_string(), "Gen 1, Gen 3");

        let crossing = parse_passage(kjv(), "Gen 1:1-2:5, 7").unwrap();
        assert_eq!(crossing.to_string(), "Gen 1:1-2:5, Gen 2:7");
    }

    #[test]
    fn range_sides_inherit_context() {
        let v11n = kjv();
        assert_eq!(
            parse_range(&v11n, "Gen 1:1-3").unwrap().end().triple(),
            (BookId::Gen, 1, 3)
        );
        assert_eq!(
            parse_range(&v11n, "Gen 1-2:5").unwrap().end().triple(),
            (BookId::Gen, 2, 5)
        );
        assert_eq!(
            parse_range(&v11n, "Gen 48-Exod").unwrap().end().triple(),
            (BookId::Exod, 40, 38)
        );
    }

    #[test]
    fn reversed_ranges_normalize() {
        let range = parse_range(&kjv(), "Gen 1:9-Gen 1:3").unwrap();
        assert_eq!(range.to_string(), "Gen 1:3-9");
    }

    #[test]
    fn empty_input_is_empty_passage() {
        let passage = parse_passage(kjv(), "   ").unwrap();
        assert!(passage.is_empty());
        let passage = parse_passage(kjv(), "Gen 1:1,,").unwrap();
        assert_eq!(passage.count_verses(), 1);
    }

    #[test]
    fn parse_errors() {
        let v11n = kjv();
        assert!(matches!(
            parse_range(&v11n, "Nowhere 1:1").unwrap_err().kind(),
            ErrorKind::NoSuchBook { .. }
        ));
        assert!(matches!(
            parse_range(&v11n, "1:1").unwrap_err().kind(),
            ErrorKind::Parse { .. }
        ));
        assert!(matches!(
            parse_range(&v11n, "Gen 1:1-2-3").unwrap_err().kind(),
            ErrorKind::Parse { .. }
        ));
        assert!(matches!(
            parse_range(&v11n, "Gen 1:99").unwrap_err().kind(),
            ErrorKind::NoSuchVerse { .. }
        ));
        assert!(matches!(
            parse_range(&v11n, "Gen 99").unwrap_err().kind(),
            ErrorKind::NoSuchVerse { .. }
        ));
        assert!(matches!(
            parse_verse(&v11n, "Gen 1:1-3").unwrap_err().kind(),
            ErrorKind::Parse { .. }
        ));
        assert!(matches!(
            parse_range(&v11n, "Gen 1:1, Gen 2").unwrap_err().kind(),
            ErrorKind::Parse { .. }
        ));
        // Tobit exists in the catalog of books, but not in the KJV.
        assert!(matches!(
            parse_range(&v11n, "Tob 1").unwrap_err().kind(),
            ErrorKind::NoSuchBook { .. }
        ));
    }
}
