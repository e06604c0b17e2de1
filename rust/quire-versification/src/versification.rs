//! The canonical verse enumeration of a single system.
//!
//! A [`Versification`] fixes the book order and per-chapter verse counts of
//! one system and derives from them a dense ordinal numbering of every verse.
//! Ordinal `0` is reserved for the module introduction slot of the storage
//! layer; the first verse of the first book is ordinal `1`, and the last verse
//! of the last book is [`Versification::max_ordinal`]. The bijection between
//! `(book, chapter, verse)` triples and ordinals is what makes passages and
//! the storage index cheap: a verse address is just an integer.

use std::fmt;

use quire_common::{Result, error::Error, verify_arg};

use crate::book::{BookId, Testament};

/// Index value marking a book absent from a system.
const NO_BOOK: u16 = u16::MAX;

/// Canonical enumeration of books, chapters and verses for one named system.
///
/// Instances are immutable once constructed and are shared behind `Arc`
/// through the [`catalog`](crate::catalog). Two versifications are considered
/// equal when their names are equal; the catalog guarantees one instance per
/// name.
pub struct Versification {
    name: String,
    /// All books in canonical order, first part then second part.
    books: Vec<BookId>,
    first_part_len: usize,
    /// `last_verse[book][chapter - 1]` is the verse count of that chapter.
    last_verse: Vec<Vec<u16>>,
    /// `chapter_starts[book][chapter - 1]` is the ordinal of verse 1 of that
    /// chapter. Empty chapters repeat the next chapter's start.
    chapter_starts: Vec<Vec<u32>>,
    /// `book_starts[book]` is the ordinal of the first verse of the book.
    book_starts: Vec<u32>,
    max_ordinal: u32,
    /// Maps `BookId as usize` to an index into `books`, or [`NO_BOOK`].
    book_index: [u16; BookId::COUNT],
    /// `(local, reference)` ordinal pairs, sorted by the local side.
    to_reference: Vec<(u32, u32)>,
    /// The same pairs, sorted by the reference side.
    from_reference: Vec<(u32, u32)>,
}

impl Versification {
    /// Creates a versification from explicit book tables.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique system name, e.g. `"KJV"`.
    /// * `first_part` - Books of the first part in canonical order, each with
    ///   its per-chapter verse counts. A count of zero marks a chapter that
    ///   exists but contains no verses.
    /// * `second_part` - Books of the second part, in the same shape. May be
    ///   empty for single-part corpora.
    ///
    /// # Errors
    ///
    /// Returns `Error::invalid_arg` when the tables are empty, a book appears
    /// twice, a book has no chapters, or the total verse count overflows the
    /// ordinal space.
    pub fn new(
        name: impl Into<String>,
        first_part: Vec<(BookId, Vec<u16>)>,
        second_part: Vec<(BookId, Vec<u16>)>,
    ) -> Result<Versification> {
        let name = name.into();
        verify_arg!(name, !name.trim().is_empty());
        verify_arg!(first_part, !first_part.is_empty() || !second_part.is_empty());

        let first_part_len = first_part.len();
        let mut books = Vec::with_capacity(first_part_len + second_part.len());
        let mut last_verse = Vec::with_capacity(books.capacity());
        let mut book_index = [NO_BOOK; BookId::COUNT];

        for (book, chapters) in first_part.into_iter().chain(second_part) {
            verify_arg!(chapters, !chapters.is_empty());
            if book_index[book as usize] != NO_BOOK {
                return Err(Error::invalid_arg(
                    "books",
                    format!("book '{}' listed twice", book.osis()),
                ));
            }
            book_index[book as usize] = books.len() as u16;
            books.push(book);
            last_verse.push(chapters);
        }

        let mut book_starts = Vec::with_capacity(books.len());
        let mut chapter_starts = Vec::with_capacity(books.len());
        let mut running: u64 = 1;
        for chapters in &last_verse {
            book_starts.push(running as u32);
            let mut starts = Vec::with_capacity(chapters.len());
            for &count in chapters.iter() {
                starts.push(running as u32);
                running += u64::from(count);
            }
            chapter_starts.push(starts);
        }
        verify_arg!(first_part, running <= u64::from(u32::MAX));
        let max_ordinal = (running - 1) as u32;
        verify_arg!(first_part, max_ordinal >= 1);

        Ok(Versification {
            name,
            books,
            first_part_len,
            last_verse,
            chapter_starts,
            book_starts,
            max_ordinal,
            book_index,
            to_reference: Vec::new(),
            from_reference: Vec::new(),
        })
    }

    /// Attaches cross-system mapping pairs, each `(local, reference)` ordinal.
    ///
    /// Verses without a pair map to the reference system by keeping their
    /// `(book, chapter, verse)` triple unchanged; see [`crate::mapper`].
    ///
    /// # Errors
    ///
    /// Returns `Error::invalid_arg` when a local ordinal is zero, exceeds
    /// [`Versification::max_ordinal`], or appears twice.
    pub fn with_mappings(mut self, pairs: Vec<(u32, u32)>) -> Result<Versification> {
        let mut to_reference = pairs;
        to_reference.sort_unstable();
        for window in to_reference.windows(2) {
            verify_arg!(pairs, window[0].0 != window[1].0);
        }
        for &(local, _) in &to_reference {
            verify_arg!(pairs, local >= 1 && local <= self.max_ordinal);
        }
        let mut from_reference = to_reference.clone();
        from_reference.sort_unstable_by_key(|&(_, reference)| reference);
        self.to_reference = to_reference;
        self.from_reference = from_reference;
        Ok(self)
    }

    /// Builds one of the compiled-in systems from its static tables.
    pub(crate) fn from_tables(
        name: &str,
        first_part: &[(BookId, &[u16])],
        second_part: &[(BookId, &[u16])],
    ) -> Versification {
        let owned = |part: &[(BookId, &[u16])]| {
            part.iter()
                .map(|&(book, chapters)| (book, chapters.to_vec()))
                .collect()
        };
        Versification::new(name, owned(first_part), owned(second_part))
            .expect("built-in versification tables are well formed")
    }

    /// The unique system name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All books in canonical order.
    pub fn books(&self) -> &[BookId] {
        &self.books
    }

    /// Books of the first part (traditionally the old testament).
    pub fn first_part(&self) -> &[BookId] {
        &self.books[..self.first_part_len]
    }

    /// Books of the second part (traditionally the new testament).
    pub fn second_part(&self) -> &[BookId] {
        &self.books[self.first_part_len..]
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// True when `book` is part of this system.
    pub fn contains(&self, book: BookId) -> bool {
        self.index_of(book).is_some()
    }

    /// The part of the system `book` belongs to, or `None` if absent.
    pub fn testament(&self, book: BookId) -> Option<Testament> {
        self.index_of(book).map(|index| {
            if index < self.first_part_len {
                Testament::Old
            } else {
                Testament::New
            }
        })
    }

    /// The ordinal of the last verse of the last book. Also the total number
    /// of verses in the system, since ordinals are dense starting at 1.
    pub fn max_ordinal(&self) -> u32 {
        self.max_ordinal
    }

    /// Ordinal of the first verse of `book`.
    pub fn first_ordinal(&self, book: BookId) -> Result<u32> {
        let index = self.checked_index(book)?;
        Ok(self.book_starts[index])
    }

    /// Ordinal of the last verse of `book`.
    pub fn last_ordinal(&self, book: BookId) -> Result<u32> {
        let index = self.checked_index(book)?;
        match self.book_starts.get(index + 1) {
            Some(&next) => Ok(next - 1),
            None => Ok(self.max_ordinal),
        }
    }

    /// Total number of verses in `book`, across all its chapters.
    pub fn verse_count_in(&self, book: BookId) -> Result<u32> {
        let index = self.checked_index(book)?;
        Ok(self.last_verse[index].iter().map(|&c| u32::from(c)).sum())
    }

    /// Number of chapters in `book`.
    pub fn last_chapter(&self, book: BookId) -> Result<u16> {
        let index = self.checked_index(book)?;
        Ok(self.last_verse[index].len() as u16)
    }

    /// Number of verses in `chapter` of `book`.
    pub fn last_verse(&self, book: BookId, chapter: u16) -> Result<u16> {
        let index = self.checked_index(book)?;
        let chapters = &self.last_verse[index];
        if chapter == 0 || chapter as usize > chapters.len() {
            return Err(Error::no_such_verse(&self.name, book.osis(), chapter, 1));
        }
        Ok(chapters[chapter as usize - 1])
    }

    /// Checks that `(book, chapter, verse)` addresses an existing verse.
    ///
    /// # Errors
    ///
    /// `Error::no_such_book` when the book is absent from this system,
    /// `Error::no_such_verse` when the chapter or verse is out of range.
    pub fn validate(&self, book: BookId, chapter: u16, verse: u16) -> Result<()> {
        self.validated_index(book, chapter, verse).map(|_| ())
    }

    /// Returns the dense ordinal of a valid verse address.
    ///
    /// Ordinal 1 is the first verse of the first book; ordinal 0 is never
    /// produced, being reserved for the storage introduction slot.
    pub fn ordinal_of(&self, book: BookId, chapter: u16, verse: u16) -> Result<u32> {
        let index = self.validated_index(book, chapter, verse)?;
        let start = self.chapter_starts[index][chapter as usize - 1];
        Ok(start + u32::from(verse) - 1)
    }

    /// Returns the verse address of an ordinal, clamping out-of-range input.
    ///
    /// Ordinals below 1 decode to the first verse and ordinals above
    /// [`Versification::max_ordinal`] to the last, so the inverse of
    /// [`Versification::ordinal_of`] never fails. Empty chapters are skipped.
    pub fn decode_ordinal(&self, ordinal: u32) -> (BookId, u16, u16) {
        let ordinal = ordinal.clamp(1, self.max_ordinal);
        let book = self.book_starts.partition_point(|&start| start <= ordinal) - 1;
        let starts = &self.chapter_starts[book];
        let chapter = starts.partition_point(|&start| start <= ordinal) - 1;
        let verse = ordinal - starts[chapter] + 1;
        (self.books[book], chapter as u16 + 1, verse as u16)
    }

    /// Repairs an out-of-range address by rolling the excess forward.
    ///
    /// A chapter past the end of its book continues in the next book, and a
    /// verse past the end of its chapter continues in the next chapter, so
    /// `patch(Gen, 1, 32)` in KJV is `Gen 2:1`. Zero chapter or verse is
    /// promoted to 1. Addresses past the end of the system saturate at the
    /// last verse of the last book.
    ///
    /// # Errors
    ///
    /// `Error::no_such_book` when `book` is absent from this system.
    pub fn patch(&self, book: BookId, chapter: u16, verse: u16) -> Result<(BookId, u16, u16)> {
        let mut index = self.checked_index(book)?;
        let mut chapter = u32::from(chapter.max(1));
        let mut verse = u32::from(verse.max(1));

        while chapter > self.last_verse[index].len() as u32 {
            chapter -= self.last_verse[index].len() as u32;
            index += 1;
            if index == self.books.len() {
                return Ok(self.decode_ordinal(self.max_ordinal));
            }
        }
        while verse > u32::from(self.last_verse[index][chapter as usize - 1]) {
            verse -= u32::from(self.last_verse[index][chapter as usize - 1]);
            chapter += 1;
            if chapter > self.last_verse[index].len() as u32 {
                chapter = 1;
                index += 1;
                if index == self.books.len() {
                    return Ok(self.decode_ordinal(self.max_ordinal));
                }
            }
        }
        Ok((self.books[index], chapter as u16, verse as u16))
    }

    /// The verse `count` positions after `(book, chapter, verse)`, saturating
    /// at the last verse of the system.
    pub fn add(
        &self,
        book: BookId,
        chapter: u16,
        verse: u16,
        count: u32,
    ) -> Result<(BookId, u16, u16)> {
        let ordinal = self.ordinal_of(book, chapter, verse)?;
        Ok(self.decode_ordinal(ordinal.saturating_add(count)))
    }

    /// The verse `count` positions before `(book, chapter, verse)`, saturating
    /// at the first verse of the system.
    pub fn subtract(
        &self,
        book: BookId,
        chapter: u16,
        verse: u16,
        count: u32,
    ) -> Result<(BookId, u16, u16)> {
        let ordinal = self.ordinal_of(book, chapter, verse)?;
        Ok(self.decode_ordinal(ordinal.saturating_sub(count)))
    }

    /// Signed verse count from `from` to `to`: positive when `to` follows
    /// `from` in canonical order, zero when equal.
    pub fn distance(&self, from: (BookId, u16, u16), to: (BookId, u16, u16)) -> Result<i64> {
        let from = self.ordinal_of(from.0, from.1, from.2)?;
        let to = self.ordinal_of(to.0, to.1, to.2)?;
        Ok(i64::from(to) - i64::from(from))
    }

    /// Resolves a human book name within this system.
    ///
    /// Tries, in order: exact OSIS id, exact full name, exact abbreviation,
    /// then an unambiguous prefix of a full name. All comparisons ignore
    /// ASCII case. Returns `None` for unknown or ambiguous input.
    pub fn find_book(&self, name: &str) -> Option<BookId> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        if let Some(&book) = self
            .books
            .iter()
            .find(|b| b.osis().eq_ignore_ascii_case(name))
        {
            return Some(book);
        }
        if let Some(&book) = self
            .books
            .iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
        {
            return Some(book);
        }
        if let Some(&book) = self
            .books
            .iter()
            .find(|b| b.abbrev().eq_ignore_ascii_case(name))
        {
            return Some(book);
        }
        let mut candidate = None;
        for &book in &self.books {
            if starts_with_ignore_ascii_case(book.name(), name) {
                if candidate.is_some() {
                    return None;
                }
                candidate = Some(book);
            }
        }
        candidate
    }

    /// The reference-system ordinal mapped from a local ordinal, if any pair
    /// was registered for it.
    pub fn map_to_reference(&self, ordinal: u32) -> Option<u32> {
        self.to_reference
            .binary_search_by_key(&ordinal, |&(local, _)| local)
            .ok()
            .map(|i| self.to_reference[i].1)
    }

    /// The local ordinal mapped from a reference-system ordinal, if any pair
    /// was registered for it.
    pub fn map_from_reference(&self, reference_ordinal: u32) -> Option<u32> {
        self.from_reference
            .binary_search_by_key(&reference_ordinal, |&(_, reference)| reference)
            .ok()
            .map(|i| self.from_reference[i].0)
    }

    fn index_of(&self, book: BookId) -> Option<usize> {
        let index = self.book_index[book as usize];
        (index != NO_BOOK).then_some(index as usize)
    }

    fn checked_index(&self, book: BookId) -> Result<usize> {
        self.index_of(book)
            .ok_or_else(|| Error::no_such_book(&self.name, book.osis()))
    }

    fn validated_index(&self, book: BookId, chapter: u16, verse: u16) -> Result<usize> {
        let index = self.checked_index(book)?;
        let chapters = &self.last_verse[index];
        if chapter == 0
            || chapter as usize > chapters.len()
            || verse == 0
            || verse > chapters[chapter as usize - 1]
        {
            return Err(Error::no_such_verse(&self.name, book.osis(), chapter, verse));
        }
        Ok(index)
    }
}

fn starts_with_ignore_ascii_case(haystack: &str, prefix: &str) -> bool {
    haystack.len() >= prefix.len() && haystack[..prefix.len()].eq_ignore_ascii_case(prefix)
}

impl PartialEq for Versification {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Versification {}

impl fmt::Debug for Versification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Versification")
            .field("name", &self.name)
            .field("books", &self.books.len())
            .field("max_ordinal", &self.max_ordinal)
            .finish()
    }
}

impl fmt::Display for Versification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
