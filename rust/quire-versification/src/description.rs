//! Loading custom versification systems from JSON descriptions.
//!
//! A description is a single JSON document:
//!
//! ```json
//! {
//!     "name": "Custom",
//!     "firstPart": [ { "osis": "Gen", "chapters": 2 } ],
//!     "secondPart": [ { "osis": "Matt", "chapters": 1 } ],
//!     "lastVerses": [ 31, 25, 25 ],
//!     "mappings": [ [ 1, 1 ] ]
//! }
//! ```
//!
//! `firstPart` and `secondPart` list the books of the system in canonical
//! order with their chapter counts. `lastVerses` lists the verse count of
//! every chapter of every book, first part then second part, so its length
//! must equal the sum of all chapter counts. `mappings` is optional and
//! carries `(local, reference)` ordinal pairs for cross-system mapping; see
//! [`crate::mapper`].

use serde::Deserialize;

use quire_common::{Result, error::Error};

use crate::book::BookId;
use crate::versification::Versification;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Description {
    name: String,
    #[serde(default)]
    first_part: Vec<BookChapters>,
    #[serde(default)]
    second_part: Vec<BookChapters>,
    last_verses: Vec<u16>,
    #[serde(default)]
    mappings: Vec<(u32, u32)>,
}

#[derive(Debug, Deserialize)]
struct BookChapters {
    osis: String,
    chapters: u16,
}

/// Parses a JSON description into a versification system.
///
/// The result is not registered anywhere; see
/// [`Catalog::load_description`](crate::Catalog::load_description) for the
/// parse-and-register entry point.
///
/// # Errors
///
/// Returns `Error::malformed_description` when the document does not parse,
/// names no book, repeats a book, gives a book zero chapters, or when the
/// `lastVerses` length disagrees with the chapter counts. Returns
/// `Error::unknown_book_id` when an `osis` value is not a known book.
pub fn parse(json: &str) -> Result<Versification> {
    let desc: Description = serde_json::from_str(json)
        .map_err(|e| Error::malformed_description("<json>", e.to_string()))?;
    build(desc)
}

fn build(desc: Description) -> Result<Versification> {
    let name = desc.name.trim().to_string();
    if name.is_empty() {
        return Err(Error::malformed_description("<json>", "empty system name"));
    }
    let malformed = |message: String| Error::malformed_description(&name, message);

    let first = resolve_books(&desc.first_part, &name)?;
    let second = resolve_books(&desc.second_part, &name)?;
    if first.is_empty() && second.is_empty() {
        return Err(malformed("no books listed".to_string()));
    }
    let mut seen = [false; BookId::COUNT];
    for &(book, _) in first.iter().chain(&second) {
        if seen[book as usize] {
            return Err(malformed(format!("book '{}' listed twice", book.osis())));
        }
        seen[book as usize] = true;
    }

    let total_chapters: usize = first
        .iter()
        .chain(&second)
        .map(|&(_, chapters)| chapters as usize)
        .sum();
    if desc.last_verses.len() != total_chapters {
        return Err(malformed(format!(
            "lastVerses has {} entries but the books declare {} chapters",
            desc.last_verses.len(),
            total_chapters
        )));
    }

    // Slice lastVerses into per-book tables, first part then second.
    let mut remaining = desc.last_verses.as_slice();
    let mut take = |chapters: u16| -> Vec<u16> {
        let (head, tail) = remaining.split_at(chapters as usize);
        remaining = tail;
        head.to_vec()
    };
    let first_tables: Vec<(BookId, Vec<u16>)> = first
        .into_iter()
        .map(|(book, chapters)| (book, take(chapters)))
        .collect();
    let second_tables: Vec<(BookId, Vec<u16>)> = second
        .into_iter()
        .map(|(book, chapters)| (book, take(chapters)))
        .collect();

    let v11n = Versification::new(&name, first_tables, second_tables)
        .map_err(|e| malformed(e.to_string()))?;
    if desc.mappings.is_empty() {
        Ok(v11n)
    } else {
        v11n.with_mappings(desc.mappings)
            .map_err(|e| malformed(e.to_string()))
    }
}

fn resolve_books(part: &[BookChapters], name: &str) -> Result<Vec<(BookId, u16)>> {
    part.iter()
        .map(|entry| {
            let book = BookId::from_osis(&entry.osis)
                .ok_or_else(|| Error::unknown_book_id(&entry.osis))?;
            if entry.chapters == 0 {
                return Err(Error::malformed_description(
                    name,
                    format!("book '{}' declares zero chapters", entry.osis),
                ));
            }
            Ok((book, entry.chapters))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_common::error::ErrorKind;

    #[test]
    fn minimal_description_loads() {
        let v11n = parse(
            r#"{
                "name": "Mini",
                "firstPart": [ { "osis": "Gen", "chapters": 2 } ],
                "lastVerses": [ 3, 4 ]
            }"#,
        )
        .unwrap();
        assert_eq!(v11n.name(), "Mini");
        assert_eq!(v11n.book_count(), 1);
        assert_eq!(v11n.max_ordinal(), 7);
        assert_eq!(v11n.ordinal_of(BookId::Gen, 2, 4).unwrap(), 7);
    }

    #[test]
    fn two_part_description_loads() {
        let v11n = parse(
            r#"{
                "name": "TwoPart",
                "firstPart": [
                    { "osis": "Gen", "chapters": 2 },
                    { "osis": "Exod", "chapters": 1 }
                ],
                "secondPart": [ { "osis": "Matt", "chapters": 1 } ],
                "lastVerses": [ 3, 4, 5, 6 ]
            }"#,
        )
        .unwrap();
        assert_eq!(v11n.first_part(), &[BookId::Gen, BookId::Exod]);
        assert_eq!(v11n.second_part(), &[BookId::Matt]);
        assert_eq!(v11n.ordinal_of(BookId::Exod, 1, 5).unwrap(), 12);
        assert_eq!(v11n.ordinal_of(BookId::Matt, 1, 6).unwrap(), 18);
        assert_eq!(v11n.max_ordinal(), 18);
    }

    #[test]
    fn mappings_are_carried() {
        let v11n = parse(
            r#"{
                "name": "Mapped",
                "firstPart": [ { "osis": "Gen", "chapters": 1 } ],
                "lastVerses": [ 5 ],
                "mappings": [ [ 2, 31 ], [ 3, 33 ] ]
            }"#,
        )
        .unwrap();
        assert_eq!(v11n.map_to_reference(2), Some(31));
        assert_eq!(v11n.map_from_reference(33), Some(3));
    }

    #[test]
    fn last_verses_length_mismatch_is_malformed() {
        let err = parse(
            r#"{
                "name": "Short",
                "firstPart": [ { "osis": "Gen", "chapters": 3 } ],
                "lastVerses": [ 3, 4 ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::MalformedDescription { name, .. } if name == "Short"
        ));
    }

    #[test]
    fn unknown_osis_is_reported() {
        let err = parse(
            r#"{
                "name": "Bad",
                "firstPart": [ { "osis": "NotABook", "chapters": 1 } ],
                "lastVerses": [ 3 ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnknownBookId { osis } if osis == "NotABook"
        ));
    }

    #[test]
    fn structural_problems_are_malformed() {
        for json in [
            "not json at all",
            r#"{ "name": "X", "lastVerses": [] }"#,
            r#"{ "name": "", "firstPart": [ { "osis": "Gen", "chapters": 1 } ], "lastVerses": [ 3 ] }"#,
            r#"{ "name": "X", "firstPart": [ { "osis": "Gen", "chapters": 0 } ], "lastVerses": [] }"#,
            r#"{
                "name": "X",
                "firstPart": [
                    { "osis": "Gen", "chapters": 1 },
                    { "osis": "Gen", "chapters": 1 }
                ],
                "lastVerses": [ 3, 4 ]
            }"#,
        ] {
            let err = parse(json).unwrap_err();
            assert!(
                matches!(err.kind(), ErrorKind::MalformedDescription { .. }),
                "{json} -> {err}"
            );
        }
    }
}
