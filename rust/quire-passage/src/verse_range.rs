//! A contiguous run of verses within one versification system.

use std::fmt;
use std::sync::Arc;

use quire_common::{Result, verify_arg};
use quire_versification::{BookId, Versification};

use crate::restriction::Restriction;
use crate::verse::Verse;

/// A closed interval of verses, `start ..= end`, within one system.
///
/// Stored as a start verse and a count, so the end is derived and the
/// interval can never be hollow: every range holds at least one verse.
/// Ranges in different systems never compare, overlap or merge; convert
/// through the mapper first.
#[derive(Clone)]
pub struct VerseRange {
    start: Verse,
    verse_count: u32,
}

impl VerseRange {
    /// Creates the range spanning `a` and `b`, whichever order they arrive
    /// in.
    ///
    /// # Errors
    ///
    /// `Error::invalid_arg` when the verses belong to different systems.
    pub fn new(a: Verse, b: Verse) -> Result<VerseRange> {
        verify_arg!(b, a.same_system(&b));
        let (start, end) = if a.ordinal() <= b.ordinal() {
            (a, b)
        } else {
            (b, a)
        };
        let verse_count = end.ordinal() - start.ordinal() + 1;
        Ok(VerseRange { start, verse_count })
    }

    /// The range holding exactly one verse.
    pub fn single(verse: Verse) -> VerseRange {
        VerseRange {
            start: verse,
            verse_count: 1,
        }
    }

    /// The range of `verse_count` verses beginning at `start`.
    ///
    /// # Errors
    ///
    /// `Error::invalid_arg` when the count is zero or runs past the end of
    /// the system.
    pub fn with_count(start: Verse, verse_count: u32) -> Result<VerseRange> {
        verify_arg!(verse_count, verse_count >= 1);
        let max = start.versification().max_ordinal();
        verify_arg!(verse_count, verse_count - 1 <= max - start.ordinal());
        Ok(VerseRange { start, verse_count })
    }

    /// The range covering one whole chapter.
    pub fn whole_chapter(
        v11n: &Arc<Versification>,
        book: BookId,
        chapter: u16,
    ) -> Result<VerseRange> {
        let count = v11n.last_verse(book, chapter)?;
        let start = Verse::new(Arc::clone(v11n), book, chapter, 1)?;
        Ok(VerseRange {
            start,
            verse_count: count.into(),
        })
    }

    /// The range covering one whole book.
    pub fn whole_book(v11n: &Arc<Versification>, book: BookId) -> Result<VerseRange> {
        let first = v11n.first_ordinal(book)?;
        let last = v11n.last_ordinal(book)?;
        verify_arg!(book, last >= first);
        Ok(VerseRange {
            start: Verse::from_ordinal(Arc::clone(v11n), first),
            verse_count: last - first + 1,
        })
    }

    /// Parses a range reference, e.g. `"Gen 1:1-3"` or `"Gen-Exod"`.
    pub fn parse(v11n: &Arc<Versification>, text: &str) -> Result<VerseRange> {
        crate::parse::parse_range(v11n, text)
    }

    /// Range from a pre-validated ordinal interval, `start <= end`.
    pub(crate) fn from_ordinals(v11n: &Arc<Versification>, start: u32, end: u32) -> VerseRange {
        debug_assert!(start <= end);
        VerseRange {
            start: Verse::from_ordinal(Arc::clone(v11n), start),
            verse_count: end - start + 1,
        }
    }

    pub fn versification(&self) -> &Arc<Versification> {
        self.start.versification()
    }

    pub fn start(&self) -> &Verse {
        &self.start
    }

    /// The last verse of the range, derived from the start and count.
    pub fn end(&self) -> Verse {
        Verse::from_ordinal(
            Arc::clone(self.start.versification()),
            self.end_ordinal(),
        )
    }

    pub fn verse_count(&self) -> u32 {
        self.verse_count
    }

    pub fn start_ordinal(&self) -> u32 {
        self.start.ordinal()
    }

    pub fn end_ordinal(&self) -> u32 {
        self.start.ordinal() + self.verse_count - 1
    }

    pub fn is_single_verse(&self) -> bool {
        self.verse_count == 1
    }

    /// True when the range is exactly one whole chapter.
    pub fn is_whole_chapter(&self) -> bool {
        let end = self.end();
        self.start.book() == end.book()
            && self.start.chapter() == end.chapter()
            && self.start.is_chapter_start()
            && end.is_chapter_end()
    }

    /// True when the range is exactly one whole book.
    pub fn is_whole_book(&self) -> bool {
        let end = self.end();
        self.start.book() == end.book() && self.start.is_book_start() && end.is_book_end()
    }

    /// True when the range crosses a book boundary.
    pub fn spans_books(&self) -> bool {
        self.start.book() != self.end().book()
    }

    pub fn contains(&self, verse: &Verse) -> bool {
        self.start.same_system(verse)
            && (self.start_ordinal()..=self.end_ordinal()).contains(&verse.ordinal())
    }

    pub fn contains_range(&self, other: &VerseRange) -> bool {
        self.same_system(other)
            && self.start_ordinal() <= other.start_ordinal()
            && other.end_ordinal() <= self.end_ordinal()
    }

    /// True when the ranges share at least one verse.
    pub fn overlaps(&self, other: &VerseRange) -> bool {
        self.same_system(other)
            && self.start_ordinal() <= other.end_ordinal()
            && other.start_ordinal() <= self.end_ordinal()
    }

    /// True when the ranges overlap or abut, i.e. their union is contiguous.
    pub fn adjacent_to(&self, other: &VerseRange) -> bool {
        self.same_system(other)
            && self.start_ordinal() <= other.end_ordinal().saturating_add(1)
            && other.start_ordinal() <= self.end_ordinal().saturating_add(1)
    }

    /// The union of two overlapping or abutting ranges, `None` otherwise.
    pub fn merge(&self, other: &VerseRange) -> Option<VerseRange> {
        if !self.adjacent_to(other) {
            return None;
        }
        let start = self.start_ordinal().min(other.start_ordinal());
        let end = self.end_ordinal().max(other.end_ordinal());
        Some(VerseRange {
            start: Verse::from_ordinal(Arc::clone(self.versification()), start),
            verse_count: end - start + 1,
        })
    }

    /// The verses common to both ranges, `None` when disjoint.
    pub fn intersection(&self, other: &VerseRange) -> Option<VerseRange> {
        if !self.overlaps(other) {
            return None;
        }
        let start = self.start_ordinal().max(other.start_ordinal());
        let end = self.end_ordinal().min(other.end_ordinal());
        Some(VerseRange {
            start: Verse::from_ordinal(Arc::clone(self.versification()), start),
            verse_count: end - start + 1,
        })
    }

    /// The parts of `self` not covered by `other`: zero, one or two pieces.
    pub fn remainder(&self, other: &VerseRange) -> Vec<VerseRange> {
        if !self.overlaps(other) {
            return vec![self.clone()];
        }
        let mut pieces = Vec::new();
        if self.start_ordinal() < other.start_ordinal() {
            pieces.push(VerseRange {
                start: self.start.clone(),
                verse_count: other.start_ordinal() - self.start_ordinal(),
            });
        }
        if other.end_ordinal() < self.end_ordinal() {
            pieces.push(VerseRange {
                start: Verse::from_ordinal(
                    Arc::clone(self.versification()),
                    other.end_ordinal() + 1,
                ),
                verse_count: self.end_ordinal() - other.end_ordinal(),
            });
        }
        pieces
    }

    /// Widens the range by `distance` verses in both directions, clamped per
    /// `restriction`.
    pub fn blur(&self, distance: u32, restriction: Restriction) -> VerseRange {
        let start = restriction.blur_down(&self.start, distance);
        let end = restriction.blur_up(&self.end(), distance);
        let verse_count = end.ordinal() - start.ordinal() + 1;
        VerseRange { start, verse_count }
    }

    /// Iterates the verses of the range in canonical order.
    pub fn verses(&self) -> VerseIter {
        VerseIter {
            v11n: Arc::clone(self.versification()),
            next: self.start_ordinal(),
            end: self.end_ordinal(),
        }
    }

    fn same_system(&self, other: &VerseRange) -> bool {
        self.start.same_system(&other.start)
    }
}

impl PartialEq for VerseRange {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.verse_count == other.verse_count
    }
}

impl Eq for VerseRange {}

impl fmt::Display for VerseRange {
    /// Shortest unambiguous form: `"Gen"`, `"Gen 1"`, `"Gen 1:1"`,
    /// `"Gen 1:1-3"`, `"Gen 1-2"`, `"Gen 1:1-2:3"`, `"Gen-Exod"`,
    /// `"Gen 1-Exod 2"` or `"Gen 1:1-Exod 2:3"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = &self.start;
        let end = self.end();
        if self.is_whole_book() {
            return f.write_str(start.book().osis());
        }
        if self.is_single_verse() {
            return write!(f, "{start}");
        }
        if start.book() == end.book() {
            let osis = start.book().osis();
            if start.chapter() == end.chapter() {
                if self.is_whole_chapter() {
                    return write!(f, "{} {}", osis, start.chapter());
                }
                if start.single_chapter_book() {
                    return write!(f, "{} {}-{}", osis, start.verse(), end.verse());
                }
                return write!(
                    f,
                    "{} {}:{}-{}",
                    osis,
                    start.chapter(),
                    start.verse(),
                    end.verse()
                );
            }
            if start.is_chapter_start() && end.is_chapter_end() {
                return write!(f, "{} {}-{}", osis, start.chapter(), end.chapter());
            }
            return write!(
                f,
                "{} {}:{}-{}:{}",
                osis,
                start.chapter(),
                start.verse(),
                end.chapter(),
                end.verse()
            );
        }
        if start.is_book_start() && end.is_book_end() {
            return write!(f, "{}-{}", start.book().osis(), end.book().osis());
        }
        if start.is_chapter_start() && end.is_chapter_end() {
            return write!(
                f,
                "{} {}-{} {}",
                start.book().osis(),
                start.chapter(),
                end.book().osis(),
                end.chapter()
            );
        }
        write!(f, "{start}-{end}")
    }
}

impl fmt::Debug for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VerseRange({}, {}, ords {}..={})",
            self.versification().name(),
            self,
            self.start_ordinal(),
            self.end_ordinal()
        )
    }
}

/// Iterator over the verses of a range, front to back.
pub struct VerseIter {
    v11n: Arc<Versification>,
    next: u32,
    end: u32,
}

impl Iterator for VerseIter {
    type Item = Verse;

    fn next(&mut self) -> Option<Verse> {
        if self.next > self.end {
            return None;
        }
        let verse = Verse::from_ordinal(Arc::clone(&self.v11n), self.next);
        self.next += 1;
        Some(verse)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1).saturating_sub(self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for VerseIter {}
