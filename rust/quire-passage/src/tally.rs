//! Per-verse frequency scoring.

use std::cmp::Reverse;
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use quire_common::{Result, verify_arg};
use quire_versification::Versification;

use crate::passage::Passage;
use crate::verse::Verse;
use crate::verse_range::VerseRange;

/// Upper bound on any single verse's score.
///
/// Keeps one noisy source (say, a search hit on every verse of a long book)
/// from drowning every other contribution when tallies are merged.
pub const MAX_TALLY: u32 = 20_000;

/// Iteration and rendering order of a tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Canonical order of the versification system.
    #[default]
    Biblical,
    /// Score descending, ties broken by canonical order.
    Tally,
}

/// A score board over every verse of one versification system.
///
/// Where a [`Passage`] answers "is this verse in the set", a tally answers
/// "how often was it added". Scores saturate at [`MAX_TALLY`]. The board is
/// dense (`max_ordinal + 1` slots), trading memory for constant-time
/// increments; a KJV board is ~120 KiB.
#[derive(Clone)]
pub struct PassageTally {
    v11n: Arc<Versification>,
    /// `board[ordinal]` is the score of that verse; slot 0 is unused.
    board: Vec<u32>,
    total: u32,
    order: Order,
}

impl PassageTally {
    pub fn new(v11n: Arc<Versification>) -> PassageTally {
        let board = vec![0; v11n.max_ordinal() as usize + 1];
        PassageTally {
            v11n,
            board,
            total: 0,
            order: Order::default(),
        }
    }

    pub fn versification(&self) -> &Arc<Versification> {
        &self.v11n
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn set_order(&mut self, order: Order) {
        self.order = order;
    }

    /// Sum of all scores.
    pub fn total(&self) -> u32 {
        self.total
    }

    /// The highest score on the board, 0 when empty.
    pub fn max(&self) -> u32 {
        self.board.iter().copied().max().unwrap_or(0)
    }

    /// Number of verses with a nonzero score.
    pub fn size(&self) -> usize {
        self.board.iter().filter(|&&score| score > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The score of one verse; 0 for verses of other systems.
    pub fn count_of(&self, verse: &Verse) -> u32 {
        if self.v11n.as_ref() != verse.versification().as_ref() {
            return 0;
        }
        self.board[verse.ordinal() as usize]
    }

    /// Adds 1 to the verse's score.
    pub fn add(&mut self, verse: &Verse) -> Result<()> {
        self.add_weighted(verse, 1)
    }

    /// Adds `weight` to the verse's score, saturating at [`MAX_TALLY`].
    pub fn add_weighted(&mut self, verse: &Verse, weight: u32) -> Result<()> {
        verify_arg!(verse, self.v11n.as_ref() == verse.versification().as_ref());
        self.bump(verse.ordinal(), weight);
        Ok(())
    }

    /// Adds 1 to every verse of the range.
    pub fn add_range(&mut self, range: &VerseRange) -> Result<()> {
        verify_arg!(range, self.v11n.as_ref() == range.versification().as_ref());
        for ordinal in range.start_ordinal()..=range.end_ordinal() {
            self.bump(ordinal, 1);
        }
        Ok(())
    }

    /// Adds 1 to every verse of the passage.
    pub fn add_all(&mut self, passage: &Passage) -> Result<()> {
        verify_arg!(passage, self.v11n.as_ref() == passage.versification().as_ref());
        for range in passage.ranges() {
            for ordinal in range.start_ordinal()..=range.end_ordinal() {
                self.bump(ordinal, 1);
            }
        }
        Ok(())
    }

    /// Board-wise sum with another tally, saturating per verse.
    pub fn add_tally(&mut self, other: &PassageTally) -> Result<()> {
        verify_arg!(other, self.v11n.as_ref() == other.v11n.as_ref());
        for (slot, &score) in self.board.iter_mut().zip(&other.board) {
            *slot = slot.saturating_add(score).min(MAX_TALLY);
        }
        self.recompute_total();
        Ok(())
    }

    /// Takes 1 back off the verse's score, stopping at zero.
    pub fn un_add(&mut self, verse: &Verse) -> Result<()> {
        verify_arg!(verse, self.v11n.as_ref() == verse.versification().as_ref());
        let slot = &mut self.board[verse.ordinal() as usize];
        if *slot > 0 {
            *slot -= 1;
            self.total -= 1;
        }
        Ok(())
    }

    /// Zeroes the score of every verse of the passage.
    pub fn remove_all(&mut self, passage: &Passage) -> Result<()> {
        verify_arg!(passage, self.v11n.as_ref() == passage.versification().as_ref());
        for range in passage.ranges() {
            for ordinal in range.start_ordinal()..=range.end_ordinal() {
                let slot = &mut self.board[ordinal as usize];
                self.total -= *slot;
                *slot = 0;
            }
        }
        Ok(())
    }

    /// Collapses every nonzero score to 1, so the maximum becomes 1.
    ///
    /// Flattening each source tally before merging with
    /// [`PassageTally::add_tally`] caps any one source's contribution per
    /// verse at 1.
    pub fn flatten(&mut self) {
        for slot in &mut self.board {
            if *slot > 0 {
                *slot = 1;
            }
        }
        self.recompute_total();
    }

    /// The verses with nonzero score as a merged passage.
    pub fn ranges(&self) -> Passage {
        let mut passage = Passage::new(Arc::clone(&self.v11n));
        passage.rebuild(self.nonzero_intervals());
        passage
    }

    /// Iterates scored verses in the tally's current [`Order`].
    pub fn verses(&self) -> TallyVerses {
        let mut ordinals: Vec<u32> = (1..self.board.len() as u32)
            .filter(|&ordinal| self.board[ordinal as usize] > 0)
            .collect();
        if self.order == Order::Tally {
            ordinals.sort_by_key(|&ordinal| (Reverse(self.board[ordinal as usize]), ordinal));
        }
        TallyVerses {
            v11n: Arc::clone(&self.v11n),
            ordinals: ordinals.into_iter(),
        }
    }

    /// Keeps the `count` highest-scored verses, zeroing the rest; the
    /// removed verses come back as a passage (empty when nothing was cut).
    pub fn trim_verses(&mut self, count: usize) -> Passage {
        let mut ranked: Vec<u32> = (1..self.board.len() as u32)
            .filter(|&ordinal| self.board[ordinal as usize] > 0)
            .collect();
        ranked.sort_by_key(|&ordinal| (Reverse(self.board[ordinal as usize]), ordinal));
        let cut = ranked.split_off(count.min(ranked.len()));
        let mut removed = Passage::new(Arc::clone(&self.v11n));
        removed.rebuild(cut.iter().map(|&ordinal| (ordinal, ordinal)).collect());
        for ordinal in cut {
            self.board[ordinal as usize] = 0;
        }
        self.recompute_total();
        removed
    }

    /// Keeps the `count` ranges with the highest peak score, zeroing the
    /// rest; the removed ranges come back as a passage.
    pub fn trim_ranges(&mut self, count: usize) -> Passage {
        let mut intervals = self.nonzero_intervals();
        intervals.sort_by_key(|&(start, end)| {
            let peak = (start..=end)
                .map(|ordinal| self.board[ordinal as usize])
                .max()
                .unwrap_or(0);
            (Reverse(peak), start)
        });
        let cut = intervals.split_off(count.min(intervals.len()));
        let mut removed = Passage::new(Arc::clone(&self.v11n));
        removed.rebuild(cut.clone());
        for (start, end) in cut {
            for ordinal in start..=end {
                self.board[ordinal as usize] = 0;
            }
        }
        self.recompute_total();
        removed
    }

    fn bump(&mut self, ordinal: u32, weight: u32) {
        let slot = &mut self.board[ordinal as usize];
        let bumped = slot.saturating_add(weight).min(MAX_TALLY);
        self.total += bumped - *slot;
        *slot = bumped;
    }

    fn recompute_total(&mut self) {
        self.total = self.board.iter().sum();
    }

    fn nonzero_intervals(&self) -> Vec<(u32, u32)> {
        let mut intervals: Vec<(u32, u32)> = Vec::new();
        for ordinal in 1..self.board.len() as u32 {
            if self.board[ordinal as usize] == 0 {
                continue;
            }
            match intervals.last_mut() {
                Some(last) if last.1 + 1 == ordinal => last.1 = ordinal,
                _ => intervals.push((ordinal, ordinal)),
            }
        }
        intervals
    }
}

impl fmt::Display for PassageTally {
    /// Biblical order renders the merged passage; tally order lists verses
    /// with their scores, best first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            Order::Biblical => write!(f, "{}", self.ranges()),
            Order::Tally => {
                let scored = self.verses().map(|verse| {
                    let score = self.board[verse.ordinal() as usize];
                    format!("{verse} ({score})")
                });
                write!(f, "{}", scored.format(", "))
            }
        }
    }
}

impl fmt::Debug for PassageTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassageTally")
            .field("v11n", &self.v11n.name())
            .field("size", &self.size())
            .field("total", &self.total)
            .finish()
    }
}

/// Iterator over the scored verses of a tally.
pub struct TallyVerses {
    v11n: Arc<Versification>,
    ordinals: std::vec::IntoIter<u32>,
}

impl Iterator for TallyVerses {
    type Item = Verse;

    fn next(&mut self) -> Option<Verse> {
        self.ordinals
            .next()
            .map(|ordinal| Verse::from_ordinal(Arc::clone(&self.v11n), ordinal))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ordinals.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_versification::{BookId, Catalog};

    fn kjv() -> Arc<Versification> {
        Catalog::new().lookup("KJV").unwrap()
    }

    fn verse(book: BookId, chapter: u16, verse: u16) -> Verse {
        Verse::new(kjv(), book, chapter, verse).unwrap()
    }

    #[test]
    fn scores_accumulate() {
        let mut tally = PassageTally::new(kjv());
        let target = verse(BookId::Gen, 1, 1);
        tally.add(&target).unwrap();
        tally.add(&target).unwrap();
        tally.add(&verse(BookId::Gen, 1, 2)).unwrap();
        assert_eq!(tally.count_of(&target), 2);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.max(), 2);
        assert_eq!(tally.size(), 2);
    }

    #[test]
    fn scores_saturate_at_cap() {
        let mut tally = PassageTally::new(kjv());
        let target = verse(BookId::Gen, 1, 1);
        tally.add_weighted(&target, MAX_TALLY + 500).unwrap();
        assert_eq!(tally.count_of(&target), MAX_TALLY);
        tally.add(&target).unwrap();
        assert_eq!(tally.count_of(&target), MAX_TALLY);
        assert_eq!(tally.total(), MAX_TALLY);
    }

    #[test]
    fn flatten_caps_each_source_at_one() {
        let passage = Passage::parse(kjv(), "Gen 1:1-5").unwrap();
        let mut noisy = PassageTally::new(kjv());
        for _ in 0..5 {
            noisy.add_all(&passage).unwrap();
        }
        noisy.flatten();
        assert_eq!(noisy.max(), 1);

        let mut quiet = PassageTally::new(kjv());
        quiet.add(&verse(BookId::Gen, 1, 3)).unwrap();
        quiet.flatten();

        let mut merged = noisy;
        merged.add_tally(&quiet).unwrap();
        assert_eq!(merged.count_of(&verse(BookId::Gen, 1, 3)), 2);
        assert_eq!(merged.count_of(&verse(BookId::Gen, 1, 1)), 1);
    }

    #[test]
    fn tally_order_ranks_by_score() {
        let mut tally = PassageTally::new(kjv());
        tally.add_weighted(&verse(BookId::Gen, 1, 5), 1).unwrap();
        tally.add_weighted(&verse(BookId::Gen, 1, 2), 3).unwrap();
        tally.add_weighted(&verse(BookId::Gen, 1, 9), 3).unwrap();

        let biblical: Vec<u16> = tally.verses().map(|v| v.verse()).collect();
        assert_eq!(biblical, vec![2, 5, 9]);

        tally.set_order(Order::Tally);
        let ranked: Vec<u16> = tally.verses().map(|v| v.verse()).collect();
        assert_eq!(ranked, vec![2, 9, 5]);
        assert_eq!(tally.to_string(), "Gen 1:2 (3), Gen 1:9 (3), Gen 1:5 (1)");
    }

    #[test]
    fn ranges_view_merges() {
        let mut tally = PassageTally::new(kjv());
        tally
            .add_range(&VerseRange::parse(&kjv(), "Gen 1:1-3").unwrap())
            .unwrap();
        tally.add(&verse(BookId::Gen, 1, 4)).unwrap();
        tally.add(&verse(BookId::Gen, 1, 7)).unwrap();
        assert_eq!(tally.ranges().to_string(), "Gen 1:1-4, Gen 1:7");
    }

    #[test]
    fn trim_verses_keeps_best() {
        let mut tally = PassageTally::new(kjv());
        tally.add_weighted(&verse(BookId::Gen, 1, 1), 5).unwrap();
        tally.add_weighted(&verse(BookId::Gen, 1, 2), 1).unwrap();
        tally.add_weighted(&verse(BookId::Gen, 1, 3), 4).unwrap();
        let removed = tally.trim_verses(2);
        assert_eq!(removed.to_string(), "Gen 1:2");
        assert_eq!(tally.size(), 2);
        assert_eq!(tally.count_of(&verse(BookId::Gen, 1, 2)), 0);
        assert!(tally.trim_verses(10).is_empty());
    }

    #[test]
    fn trim_ranges_keeps_highest_peaks() {
        let mut tally = PassageTally::new(kjv());
        tally
            .add_range(&VerseRange::parse(&kjv(), "Gen 1:1-2").unwrap())
            .unwrap();
        tally.add_weighted(&verse(BookId::Gen, 2, 5), 7).unwrap();
        let removed = tally.trim_ranges(1);
        assert_eq!(removed.to_string(), "Gen 1:1-2");
        assert_eq!(tally.ranges().to_string(), "Gen 2:5");
    }

    #[test]
    fn un_add_and_remove_all() {
        let mut tally = PassageTally::new(kjv());
        let target = verse(BookId::Gen, 1, 1);
        tally.add(&target).unwrap();
        tally.add(&target).unwrap();
        tally.un_add(&target).unwrap();
        assert_eq!(tally.count_of(&target), 1);
        tally.un_add(&target).unwrap();
        tally.un_add(&target).unwrap();
        assert_eq!(tally.count_of(&target), 0);
        assert_eq!(tally.total(), 0);

        tally
            .add_range(&VerseRange::parse(&kjv(), "Gen 1:1-9").unwrap())
            .unwrap();
        tally
            .remove_all(&Passage::parse(kjv(), "Gen 1:3-5").unwrap())
            .unwrap();
        assert_eq!(tally.ranges().to_string(), "Gen 1:1-2, Gen 1:6-9");
    }

    #[test]
    fn cross_system_is_rejected_or_zero() {
        let lxx = Catalog::new().lookup("LXX").unwrap();
        let foreign = Verse::new(lxx, BookId::Gen, 1, 1).unwrap();
        let mut tally = PassageTally::new(kjv());
        assert!(tally.add(&foreign).is_err());
        assert_eq!(tally.count_of(&foreign), 0);
    }
}
