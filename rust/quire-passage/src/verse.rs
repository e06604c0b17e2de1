//! A single verse address bound to a versification system.

use std::fmt;
use std::sync::Arc;

use quire_common::Result;
use quire_versification::{BookId, Catalog, Versification, mapper};

/// One verse of one versification system.
///
/// A `Verse` always addresses an existing verse: the constructor validates
/// against the system, and [`Verse::from_ordinal`] clamps. The dense ordinal
/// is precomputed, so comparisons and interval arithmetic are integer work.
///
/// Verses are only comparable within one system; `PartialOrd` yields `None`
/// across systems. Use [`Verse::map_to`] to convert first.
#[derive(Clone)]
pub struct Verse {
    v11n: Arc<Versification>,
    book: BookId,
    chapter: u16,
    verse: u16,
    ordinal: u32,
}

impl Verse {
    /// Creates a verse address, validating it against the system.
    ///
    /// # Errors
    ///
    /// `Error::no_such_book` / `Error::no_such_verse` when the address does
    /// not exist in `v11n`.
    pub fn new(v11n: Arc<Versification>, book: BookId, chapter: u16, verse: u16) -> Result<Verse> {
        let ordinal = v11n.ordinal_of(book, chapter, verse)?;
        Ok(Verse {
            v11n,
            book,
            chapter,
            verse,
            ordinal,
        })
    }

    /// The verse at `ordinal`, clamping out-of-range input to the first or
    /// last verse of the system.
    pub fn from_ordinal(v11n: Arc<Versification>, ordinal: u32) -> Verse {
        let ordinal = ordinal.clamp(1, v11n.max_ordinal());
        let (book, chapter, verse) = v11n.decode_ordinal(ordinal);
        Verse {
            v11n,
            book,
            chapter,
            verse,
            ordinal,
        }
    }

    /// Creates a verse from an address that may be out of range, rolling any
    /// excess forward per [`Versification::patch`].
    pub fn patched(
        v11n: Arc<Versification>,
        book: BookId,
        chapter: u16,
        verse: u16,
    ) -> Result<Verse> {
        let (book, chapter, verse) = v11n.patch(book, chapter, verse)?;
        Verse::new(v11n, book, chapter, verse)
    }

    pub fn versification(&self) -> &Arc<Versification> {
        &self.v11n
    }

    pub fn book(&self) -> BookId {
        self.book
    }

    pub fn chapter(&self) -> u16 {
        self.chapter
    }

    pub fn verse(&self) -> u16 {
        self.verse
    }

    /// The dense ordinal of this verse; 1 is the first verse of the system.
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    pub fn triple(&self) -> (BookId, u16, u16) {
        (self.book, self.chapter, self.verse)
    }

    /// True when both verses belong to the same versification system.
    pub fn same_system(&self, other: &Verse) -> bool {
        self.v11n == other.v11n
    }

    /// The following verse in canonical order, or `None` at the end of the
    /// system.
    pub fn next(&self) -> Option<Verse> {
        (self.ordinal < self.v11n.max_ordinal())
            .then(|| Verse::from_ordinal(Arc::clone(&self.v11n), self.ordinal + 1))
    }

    /// The preceding verse in canonical order, or `None` at the start.
    pub fn previous(&self) -> Option<Verse> {
        (self.ordinal > 1).then(|| Verse::from_ordinal(Arc::clone(&self.v11n), self.ordinal - 1))
    }

    /// True when this is the first verse of its chapter.
    pub fn is_chapter_start(&self) -> bool {
        self.verse == 1
    }

    /// True when this is the last verse of its chapter.
    pub fn is_chapter_end(&self) -> bool {
        self.v11n.last_verse(self.book, self.chapter).unwrap_or(0) == self.verse
    }

    /// True when this is the first verse of its book.
    pub fn is_book_start(&self) -> bool {
        self.v11n.first_ordinal(self.book).unwrap_or(0) == self.ordinal
    }

    /// True when this is the last verse of its book.
    pub fn is_book_end(&self) -> bool {
        self.v11n.last_ordinal(self.book).unwrap_or(0) == self.ordinal
    }

    /// Parses a single verse reference, e.g. `"Gen 1:1"`.
    pub fn parse(v11n: &Arc<Versification>, text: &str) -> Result<Verse> {
        crate::parse::parse_verse(v11n, text)
    }

    /// This verse's address in `target`, routed through the catalog's
    /// reference system per [`quire_versification::mapper`].
    ///
    /// # Errors
    ///
    /// `Error::no_such_book` / `Error::no_such_verse` when the target system
    /// has no position for this verse.
    pub fn map_to(&self, target: &Arc<Versification>, catalog: &Catalog) -> Result<Verse> {
        let (book, chapter, verse) = mapper::map(&self.v11n, self.triple(), target, catalog)?;
        Verse::new(Arc::clone(target), book, chapter, verse)
    }

    pub(crate) fn single_chapter_book(&self) -> bool {
        self.v11n.last_chapter(self.book).unwrap_or(0) == 1
    }
}

impl fmt::Display for Verse {
    /// `"Gen 1:1"`, or `"Obad 3"` for books with a single chapter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.single_chapter_book() {
            write!(f, "{} {}", self.book.osis(), self.verse)
        } else {
            write!(f, "{} {}:{}", self.book.osis(), self.chapter, self.verse)
        }
    }
}

impl fmt::Debug for Verse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Verse({}, {}, ord {})", self.v11n.name(), self, self.ordinal)
    }
}

impl PartialEq for Verse {
    fn eq(&self, other: &Self) -> bool {
        self.same_system(other) && self.ordinal == other.ordinal
    }
}

impl Eq for Verse {}

impl PartialOrd for Verse {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.same_system(other)
            .then(|| self.ordinal.cmp(&other.ordinal))
    }
}
