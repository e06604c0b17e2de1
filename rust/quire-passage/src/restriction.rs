//! Clamping policy for blur expansion.

use std::sync::Arc;

use crate::verse::Verse;

/// How far a blurred range may grow past its original verses.
///
/// Blur widens a range by a verse distance in both directions; the
/// restriction decides where that widening stops. [`Restriction::None`]
/// stops only at the ends of the versification system, so a blurred range
/// can cross chapter and book boundaries freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restriction {
    /// No clamping beyond the bounds of the system.
    #[default]
    None,
    /// Stay within the chapter of the original verse.
    Chapter,
    /// Stay within the book of the original verse.
    Book,
}

impl Restriction {
    /// The verse `distance` before `verse`, clamped per this restriction.
    pub fn blur_down(&self, verse: &Verse, distance: u32) -> Verse {
        let target = verse
            .ordinal()
            .saturating_sub(distance)
            .max(self.lower_bound(verse));
        Verse::from_ordinal(Arc::clone(verse.versification()), target)
    }

    /// The verse `distance` after `verse`, clamped per this restriction.
    pub fn blur_up(&self, verse: &Verse, distance: u32) -> Verse {
        let target = verse
            .ordinal()
            .saturating_add(distance)
            .min(self.upper_bound(verse));
        Verse::from_ordinal(Arc::clone(verse.versification()), target)
    }

    fn lower_bound(&self, verse: &Verse) -> u32 {
        let v11n = verse.versification();
        // A valid verse guarantees verse 1 of its chapter and the first
        // verse of its book exist, so the fallbacks never apply.
        match self {
            Restriction::None => 1,
            Restriction::Chapter => v11n
                .ordinal_of(verse.book(), verse.chapter(), 1)
                .unwrap_or(verse.ordinal()),
            Restriction::Book => v11n
                .first_ordinal(verse.book())
                .unwrap_or(verse.ordinal()),
        }
    }

    fn upper_bound(&self, verse: &Verse) -> u32 {
        let v11n = verse.versification();
        match self {
            Restriction::None => v11n.max_ordinal(),
            Restriction::Chapter => {
                let last = v11n
                    .last_verse(verse.book(), verse.chapter())
                    .unwrap_or(verse.verse());
                v11n.ordinal_of(verse.book(), verse.chapter(), last)
                    .unwrap_or(verse.ordinal())
            }
            Restriction::Book => v11n
                .last_ordinal(verse.book())
                .unwrap_or(verse.ordinal()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_versification::{BookId, Catalog};

    #[test]
    fn unrestricted_blur_crosses_books() {
        let v11n = Catalog::new().lookup("KJV").unwrap();
        let exod_1_1 = Verse::new(Arc::clone(&v11n), BookId::Exod, 1, 1).unwrap();
        let down = Restriction::None.blur_down(&exod_1_1, 2);
        assert_eq!(down.triple(), (BookId::Gen, 50, 25));
        let up = Restriction::None.blur_up(&exod_1_1, 1);
        assert_eq!(up.triple(), (BookId::Exod, 1, 2));
    }

    #[test]
    fn unrestricted_blur_saturates_at_system_bounds() {
        let v11n = Catalog::new().lookup("KJV").unwrap();
        let first = Verse::from_ordinal(Arc::clone(&v11n), 1);
        assert_eq!(Restriction::None.blur_down(&first, 100).ordinal(), 1);
        let last = Verse::from_ordinal(Arc::clone(&v11n), v11n.max_ordinal());
        assert_eq!(
            Restriction::None.blur_up(&last, 100).ordinal(),
            v11n.max_ordinal()
        );
    }

    #[test]
    fn chapter_blur_stays_in_chapter() {
        let v11n = Catalog::new().lookup("KJV").unwrap();
        let gen_2_2 = Verse::new(Arc::clone(&v11n), BookId::Gen, 2, 2).unwrap();
        assert_eq!(
            Restriction::Chapter.blur_down(&gen_2_2, 10).triple(),
            (BookId::Gen, 2, 1)
        );
        assert_eq!(
            Restriction::Chapter.blur_up(&gen_2_2, 100).triple(),
            (BookId::Gen, 2, 25)
        );
    }

    #[test]
    fn book_blur_stays_in_book() {
        let v11n = Catalog::new().lookup("KJV").unwrap();
        let gen_1_2 = Verse::new(Arc::clone(&v11n), BookId::Gen, 1, 2).unwrap();
        assert_eq!(
            Restriction::Book.blur_down(&gen_1_2, 50).triple(),
            (BookId::Gen, 1, 1)
        );
        assert_eq!(
            Restriction::Book.blur_up(&gen_1_2, 100_000).triple(),
            (BookId::Gen, 50, 26)
        );
    }
}
