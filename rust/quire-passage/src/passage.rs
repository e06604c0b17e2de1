//! Ordered, merged sets of verse ranges.

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use quire_common::{Result, verify_arg};
use quire_versification::{BookId, Versification};

use crate::restriction::Restriction;
use crate::verse::Verse;
use crate::verse_range::VerseRange;

/// A set of verses over one versification system, held as ranges.
///
/// The range list is kept normalized after every mutation: sorted by start
/// ordinal, with no two ranges overlapping or abutting. That invariant makes
/// membership a binary search and lets union, intersection and difference
/// run as linear walks over the range lists.
#[derive(Clone, PartialEq)]
pub struct Passage {
    v11n: Arc<Versification>,
    ranges: Vec<VerseRange>,
}

impl Passage {
    /// The empty passage.
    pub fn new(v11n: Arc<Versification>) -> Passage {
        Passage {
            v11n,
            ranges: Vec::new(),
        }
    }

    /// A passage built from arbitrary ranges, normalized on construction.
    ///
    /// # Errors
    ///
    /// `Error::invalid_arg` when a range belongs to a different system.
    pub fn from_ranges(
        v11n: Arc<Versification>,
        ranges: impl IntoIterator<Item = VerseRange>,
    ) -> Result<Passage> {
        let mut passage = Passage::new(v11n);
        for range in ranges {
            passage.add(range)?;
        }
        Ok(passage)
    }

    /// Parses a reference list, e.g. `"Gen 1:1-3, Exod 2; Lev 3:4"`.
    pub fn parse(v11n: Arc<Versification>, text: &str) -> Result<Passage> {
        crate::parse::parse_passage(v11n, text)
    }

    pub fn versification(&self) -> &Arc<Versification> {
        &self.v11n
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of ranges after normalization.
    pub fn count_ranges(&self) -> usize {
        self.ranges.len()
    }

    /// Total number of verses across all ranges.
    pub fn count_verses(&self) -> u32 {
        self.ranges.iter().map(VerseRange::verse_count).sum()
    }

    /// The normalized ranges, sorted and merged.
    pub fn ranges(&self) -> &[VerseRange] {
        &self.ranges
    }

    /// Iterates every verse of the passage in canonical order.
    pub fn verses(&self) -> PassageVerses {
        let mut intervals = self.intervals().into_iter();
        let current = intervals.next();
        PassageVerses {
            v11n: Arc::clone(&self.v11n),
            intervals,
            current,
        }
    }

    pub fn contains(&self, verse: &Verse) -> bool {
        if self.v11n.as_ref() != verse.versification().as_ref() {
            return false;
        }
        let ordinal = verse.ordinal();
        let index = self
            .ranges
            .partition_point(|range| range.start_ordinal() <= ordinal);
        index > 0 && self.ranges[index - 1].end_ordinal() >= ordinal
    }

    /// Adds a range, merging it with any it overlaps or abuts.
    ///
    /// # Errors
    ///
    /// `Error::invalid_arg` when the range belongs to a different system.
    pub fn add(&mut self, range: VerseRange) -> Result<()> {
        verify_arg!(range, self.v11n.as_ref() == range.versification().as_ref());
        let mut intervals = self.intervals();
        intervals.push((range.start_ordinal(), range.end_ordinal()));
        self.rebuild(intervals);
        Ok(())
    }

    /// Adds a single verse.
    pub fn add_verse(&mut self, verse: Verse) -> Result<()> {
        self.add(VerseRange::single(verse))
    }

    /// Union with another passage.
    pub fn add_all(&mut self, other: &Passage) -> Result<()> {
        verify_arg!(other, self.v11n.as_ref() == other.v11n.as_ref());
        let mut intervals = self.intervals();
        intervals.extend(other.intervals());
        self.rebuild(intervals);
        Ok(())
    }

    /// Removes every verse of `range` from the passage.
    pub fn remove(&mut self, range: &VerseRange) -> Result<()> {
        verify_arg!(range, self.v11n.as_ref() == range.versification().as_ref());
        let cut = (range.start_ordinal(), range.end_ordinal());
        let result = subtract_intervals(&self.intervals(), &[cut]);
        self.rebuild(result);
        Ok(())
    }

    /// Difference with another passage.
    pub fn remove_all(&mut self, other: &Passage) -> Result<()> {
        verify_arg!(other, self.v11n.as_ref() == other.v11n.as_ref());
        let result = subtract_intervals(&self.intervals(), &other.intervals());
        self.rebuild(result);
        Ok(())
    }

    /// Intersection with another passage.
    pub fn retain_all(&mut self, other: &Passage) -> Result<()> {
        verify_arg!(other, self.v11n.as_ref() == other.v11n.as_ref());
        let a = self.intervals();
        let b = other.intervals();
        let mut result = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            let start = a[i].0.max(b[j].0);
            let end = a[i].1.min(b[j].1);
            if start <= end {
                result.push((start, end));
            }
            if a[i].1 < b[j].1 {
                i += 1;
            } else {
                j += 1;
            }
        }
        self.rebuild(result);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Keeps the first `count` verses, returning the removed tail as a new
    /// passage. The remainder is empty when nothing was trimmed.
    pub fn trim_verses(&mut self, count: u32) -> Passage {
        let mut kept = Vec::new();
        let mut overflow = Vec::new();
        let mut remaining = count;
        for (start, end) in self.intervals() {
            let len = end - start + 1;
            if remaining == 0 {
                overflow.push((start, end));
            } else if len <= remaining {
                kept.push((start, end));
                remaining -= len;
            } else {
                kept.push((start, start + remaining - 1));
                overflow.push((start + remaining, end));
                remaining = 0;
            }
        }
        self.rebuild(kept);
        let mut rest = Passage::new(Arc::clone(&self.v11n));
        rest.rebuild(overflow);
        rest
    }

    /// Keeps the first `count` ranges, returning the removed tail as a new
    /// passage. The remainder is empty when nothing was trimmed.
    pub fn trim_ranges(&mut self, count: usize) -> Passage {
        let overflow = if count < self.ranges.len() {
            self.ranges.split_off(count)
        } else {
            Vec::new()
        };
        Passage {
            v11n: Arc::clone(&self.v11n),
            ranges: overflow,
        }
    }

    /// Widens every range by `distance` verses both ways, clamped per
    /// `restriction`, then re-normalizes.
    pub fn blur(&mut self, distance: u32, restriction: Restriction) {
        let blurred = self
            .ranges
            .iter()
            .map(|range| {
                let wide = range.blur(distance, restriction);
                (wide.start_ordinal(), wide.end_ordinal())
            })
            .collect();
        self.rebuild(blurred);
    }

    /// Number of distinct books any verse of the passage falls in.
    pub fn books_in_passage(&self) -> usize {
        let mut books: Vec<BookId> = Vec::new();
        for range in &self.ranges {
            let mut ordinal = range.start_ordinal();
            while ordinal <= range.end_ordinal() {
                let book = self.v11n.decode_ordinal(ordinal).0;
                if !books.contains(&book) {
                    books.push(book);
                }
                match self.v11n.last_ordinal(book) {
                    Ok(last) => ordinal = last + 1,
                    Err(_) => break,
                }
            }
        }
        books.len()
    }

    /// Number of distinct chapters any verse of the passage falls in.
    pub fn chapters_in_passage(&self) -> usize {
        let mut chapters: Vec<(BookId, u16)> = Vec::new();
        for range in &self.ranges {
            let mut ordinal = range.start_ordinal();
            while ordinal <= range.end_ordinal() {
                let (book, chapter, verse) = self.v11n.decode_ordinal(ordinal);
                if !chapters.contains(&(book, chapter)) {
                    chapters.push((book, chapter));
                }
                match self.v11n.last_verse(book, chapter) {
                    // Hop to the verse past the end of this chapter.
                    Ok(last) => ordinal += u32::from(last - verse) + 1,
                    Err(_) => break,
                }
            }
        }
        chapters.len()
    }

    /// One-line summary of the passage's extent, e.g.
    /// `"3 verses in 1 range, 1 chapter and 1 book"`.
    pub fn overview(&self) -> String {
        format!(
            "{} in {}, {} and {}",
            plural(self.count_verses() as usize, "verse"),
            plural(self.count_ranges(), "range"),
            plural(self.chapters_in_passage(), "chapter"),
            plural(self.books_in_passage(), "book"),
        )
    }

    fn intervals(&self) -> Vec<(u32, u32)> {
        self.ranges
            .iter()
            .map(|range| (range.start_ordinal(), range.end_ordinal()))
            .collect()
    }

    /// Replaces the range list with `intervals`, sorted and merged.
    pub(crate) fn rebuild(&mut self, mut intervals: Vec<(u32, u32)>) {
        intervals.sort_unstable();
        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(intervals.len());
        for (start, end) in intervals {
            match merged.last_mut() {
                Some(last) if start <= last.1.saturating_add(1) => last.1 = last.1.max(end),
                _ => merged.push((start, end)),
            }
        }
        self.ranges = merged
            .into_iter()
            .map(|(start, end)| VerseRange::from_ordinals(&self.v11n, start, end))
            .collect();
    }
}

/// Subtracts every interval of `cuts` from `from`; both inputs sorted.
fn subtract_intervals(from: &[(u32, u32)], cuts: &[(u32, u32)]) -> Vec<(u32, u32)> {
    let mut result = Vec::with_capacity(from.len());
    for &(mut start, end) in from {
        for &(cut_start, cut_end) in cuts {
            if cut_end < start || cut_start > end {
                continue;
            }
            if start < cut_start {
                result.push((start, cut_start - 1));
            }
            if cut_end >= end {
                start = end + 1;
                break;
            }
            start = cut_end + 1;
        }
        if start <= end {
            result.push((start, end));
        }
    }
    result
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ranges.iter().format(", "))
    }
}

impl fmt::Debug for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Passage({}, {})", self.v11n.name(), self)
    }
}

/// Iterator over every verse of a passage, in canonical order.
pub struct PassageVerses {
    v11n: Arc<Versification>,
    intervals: std::vec::IntoIter<(u32, u32)>,
    current: Option<(u32, u32)>,
}

impl Iterator for PassageVerses {
    type Item = Verse;

    fn next(&mut self) -> Option<Verse> {
        loop {
            let (start, end) = self.current?;
            if start > end {
                self.current = self.intervals.next();
                continue;
            }
            self.current = Some((start + 1, end));
            return Some(Verse::from_ordinal(Arc::clone(&self.v11n), start));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_versification::Catalog;

    fn kjv() -> Arc<Versification> {
        Catalog::new().lookup("KJV").unwrap()
    }

    fn passage(text: &str) -> Passage {
        Passage::parse(kjv(), text).unwrap()
    }

    #[test]
    fn single_range_counts() {
        let p = passage("Gen 1:1-3");
        assert_eq!(p.count_ranges(), 1);
        assert_eq!(p.count_verses(), 3);
        assert_eq!(p.overview(), "3 verses in 1 range, 1 chapter and 1 book");
    }

    #[test]
    fn adds_merge_overlapping_and_abutting() {
        let mut p = passage("Gen 1:1-3");
        p.add(VerseRange::parse(&kjv(), "Gen 1:4-6").unwrap()).unwrap();
        assert_eq!(p.to_string(), "Gen 1:1-6");
        p.add(VerseRange::parse(&kjv(), "Gen 1:5-9").unwrap()).unwrap();
        assert_eq!(p.to_string(), "Gen 1:1-9");
        p.add(VerseRange::parse(&kjv(), "Gen 2:1").unwrap()).unwrap();
        assert_eq!(p.count_ranges(), 2);
        assert_eq!(p.to_string(), "Gen 1:1-9, Gen 2:1");
    }

    #[test]
    fn merge_invariant_under_random_adds() {
        let v11n = kjv();
        let mut p = Passage::new(Arc::clone(&v11n));
        let mut model = vec![false; v11n.max_ordinal() as usize + 1];
        for _ in 0..300 {
            let start = fastrand::u32(1..=v11n.max_ordinal());
            let len = fastrand::u32(1..=40).min(v11n.max_ordinal() - start + 1);
            let range = VerseRange::with_count(
                Verse::from_ordinal(Arc::clone(&v11n), start),
                len,
            )
            .unwrap();
            p.add(range).unwrap();
            for ordinal in start..start + len {
                model[ordinal as usize] = true;
            }
        }
        assert_eq!(
            p.count_verses() as usize,
            model.iter().filter(|&&v| v).count()
        );
        for window in p.ranges().windows(2) {
            assert!(window[0].end_ordinal() + 1 < window[1].start_ordinal());
        }
    }

    #[test]
    fn set_algebra_matches_models() {
        let mut a = passage("Gen 1:1-10, Gen 2:1-5");
        let b = passage("Gen 1:5-2:2");

        let mut union = a.clone();
        union.add_all(&b).unwrap();
        assert_eq!(union.to_string(), "Gen 1:1-2:5");

        let mut common = a.clone();
        common.retain_all(&b).unwrap();
        assert_eq!(common.to_string(), "Gen 1:5-10, Gen 2:1-2");

        a.remove_all(&b).unwrap();
        assert_eq!(a.to_string(), "Gen 1:1-4, Gen 2:3-5");
    }

    #[test]
    fn remove_splits_ranges() {
        let mut p = passage("Gen 1:1-10");
        p.remove(&VerseRange::parse(&kjv(), "Gen 1:4-6").unwrap())
            .unwrap();
        assert_eq!(p.to_string(), "Gen 1:1-3, Gen 1:7-10");
    }

    #[test]
    fn contains_uses_binary_search() {
        let p = passage("Gen 1:1-3, Gen 2:5, Exod 1");
        let v11n = kjv();
        assert!(p.contains(&Verse::new(Arc::clone(&v11n), BookId::Gen, 1, 2).unwrap()));
        assert!(p.contains(&Verse::new(Arc::clone(&v11n), BookId::Exod, 1, 7).unwrap()));
        assert!(!p.contains(&Verse::new(Arc::clone(&v11n), BookId::Gen, 1, 4).unwrap()));
        assert!(!p.contains(&Verse::new(v11n, BookId::Gen, 2, 4).unwrap()));
    }

    #[test]
    fn trim_verses_returns_remainder() {
        let mut p = passage("Gen 1:1-3");
        let rest = p.trim_verses(2);
        assert_eq!(p.to_string(), "Gen 1:1-2");
        assert_eq!(rest.to_string(), "Gen 1:3");
    }

    #[test]
    fn trim_without_overflow_is_empty() {
        let mut p = passage("Gen 1:1-3");
        let rest = p.trim_verses(10);
        assert_eq!(p.count_verses(), 3);
        assert!(rest.is_empty());
        let rest = p.trim_ranges(5);
        assert!(rest.is_empty());
    }

    #[test]
    fn trim_ranges_splits_list() {
        let mut p = passage("Gen 1:1, Gen 2:1, Gen 3:1");
        let rest = p.trim_ranges(1);
        assert_eq!(p.to_string(), "Gen 1:1");
        assert_eq!(rest.to_string(), "Gen 2:1, Gen 3:1");
    }

    #[test]
    fn blur_merges_neighbours() {
        let mut p = passage("Gen 1:5, Gen 1:9");
        p.blur(2, Restriction::Chapter);
        assert_eq!(p.to_string(), "Gen 1:3-11");
    }

    #[test]
    fn blur_book_restriction_clamps_each_range() {
        // Each range is clamped to its own book; the clamped results may
        // still merge when they abut across the boundary.
        let mut p = passage("Gen 50:26, Exod 1:1");
        p.blur(3, Restriction::Book);
        assert_eq!(p.to_string(), "Gen 50:23-Exod 1:4");

        let mut p = passage("Gen 25:10");
        p.blur(1_000_000, Restriction::Book);
        assert_eq!(p.to_string(), "Gen");
    }

    #[test]
    fn counts_across_books_and_chapters() {
        let p = passage("Gen 50:26-Exod 1:2, Lev 1:1");
        assert_eq!(p.count_verses(), 4);
        assert_eq!(p.books_in_passage(), 3);
        assert_eq!(p.chapters_in_passage(), 3);
        assert_eq!(
            p.overview(),
            "4 verses in 2 ranges, 3 chapters and 3 books"
        );
    }

    #[test]
    fn verse_iteration_covers_all_ranges() {
        let p = passage("Gen 1:1-2, Gen 2:1");
        let verses: Vec<Verse> = p.verses().collect();
        assert_eq!(verses.len(), 3);
        assert_eq!(verses[2].triple(), (BookId::Gen, 2, 1));
    }

    #[test]
    fn cross_system_mutation_is_rejected() {
        let mut p = passage("Gen 1:1");
        let lxx = Catalog::new().lookup("LXX").unwrap();
        let foreign = VerseRange::single(Verse::new(lxx, BookId::Gen, 1, 1).unwrap());
        assert!(p.add(foreign).is_err());
    }
}
