//! Cross-system verse mapping through a shared reference system.
//!
//! Versification systems mostly agree on addresses and differ in pockets:
//! a psalm split differently, a chapter boundary moved, a book absent. Maps
//! are therefore not kept between every pair of systems. Each system may
//! carry `(local, reference)` ordinal pairs against one shared reference
//! system (the catalog default, KJV), and mapping between two arbitrary
//! systems routes through it: source to reference by the source's pairs,
//! reference to target by the target's pairs. A verse with no registered
//! pair keeps its `(book, chapter, verse)` triple, which covers the common
//! case of identical numbering; if the unchanged triple does not exist on
//! the far side, the mapping fails rather than guessing.

use quire_common::Result;

use crate::book::BookId;
use crate::catalog::Catalog;
use crate::versification::Versification;

/// Maps a verse address from `source` to `target` through the catalog's
/// default reference system.
///
/// # Errors
///
/// Returns `Error::no_such_book` or `Error::no_such_verse` when the address
/// is invalid in `source`, or when an unmapped address does not exist
/// unchanged in the reference or target system.
pub fn map(
    source: &Versification,
    triple: (BookId, u16, u16),
    target: &Versification,
    catalog: &Catalog,
) -> Result<(BookId, u16, u16)> {
    map_through(source, triple, target, &catalog.default_versification())
}

/// Maps a verse address from `source` to `target` through an explicit
/// `reference` system.
pub fn map_through(
    source: &Versification,
    (book, chapter, verse): (BookId, u16, u16),
    target: &Versification,
    reference: &Versification,
) -> Result<(BookId, u16, u16)> {
    source.validate(book, chapter, verse)?;
    if source == target {
        return Ok((book, chapter, verse));
    }

    let reference_triple = if source == reference {
        (book, chapter, verse)
    } else {
        let ordinal = source.ordinal_of(book, chapter, verse)?;
        match source.map_to_reference(ordinal) {
            Some(mapped) => reference.decode_ordinal(mapped),
            None => {
                reference.validate(book, chapter, verse)?;
                (book, chapter, verse)
            }
        }
    };

    if target == reference {
        return Ok(reference_triple);
    }
    let (book, chapter, verse) = reference_triple;
    let reference_ordinal = reference.ordinal_of(book, chapter, verse)?;
    match target.map_from_reference(reference_ordinal) {
        Some(local) => Ok(target.decode_ordinal(local)),
        None => {
            target.validate(book, chapter, verse)?;
            Ok(reference_triple)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> Versification {
        Versification::new("Ref", vec![(BookId::Gen, vec![10, 10])], Vec::new()).unwrap()
    }

    #[test]
    fn same_system_is_identity() {
        let v11n = reference();
        assert_eq!(
            map_through(&v11n, (BookId::Gen, 2, 3), &v11n, &v11n).unwrap(),
            (BookId::Gen, 2, 3)
        );
    }

    #[test]
    fn unmapped_addresses_pass_through() {
        let reference = reference();
        let source =
            Versification::new("Src", vec![(BookId::Gen, vec![10, 10])], Vec::new()).unwrap();
        let target =
            Versification::new("Dst", vec![(BookId::Gen, vec![10, 10])], Vec::new()).unwrap();
        assert_eq!(
            map_through(&source, (BookId::Gen, 2, 7), &target, &reference).unwrap(),
            (BookId::Gen, 2, 7)
        );
    }

    #[test]
    fn registered_pairs_redirect() {
        let reference = reference();
        // Source verse 1:5 (ordinal 5) maps to reference ordinal 12 (= 2:2).
        let source = Versification::new("Src", vec![(BookId::Gen, vec![5])], Vec::new())
            .unwrap()
            .with_mappings(vec![(5, 12)])
            .unwrap();
        // Target ordinal 3 (= 1:3) maps from reference ordinal 12.
        let target = Versification::new("Dst", vec![(BookId::Gen, vec![8])], Vec::new())
            .unwrap()
            .with_mappings(vec![(3, 12)])
            .unwrap();
        assert_eq!(
            map_through(&source, (BookId::Gen, 1, 5), &target, &reference).unwrap(),
            (BookId::Gen, 1, 3)
        );
        // Into the reference itself, only the source pairs apply.
        assert_eq!(
            map_through(&source, (BookId::Gen, 1, 5), &reference, &reference).unwrap(),
            (BookId::Gen, 2, 2)
        );
    }

    #[test]
    fn unmappable_addresses_fail() {
        let reference = reference();
        let source =
            Versification::new("Src", vec![(BookId::Gen, vec![10, 10])], Vec::new()).unwrap();
        let narrow =
            Versification::new("Dst", vec![(BookId::Gen, vec![10, 3])], Vec::new()).unwrap();
        // Valid in the source and the reference, absent from the target.
        assert!(map_through(&source, (BookId::Gen, 2, 7), &narrow, &reference).is_err());
        // Invalid in the source to begin with.
        assert!(map_through(&source, (BookId::Gen, 3, 1), &narrow, &reference).is_err());
    }

    #[test]
    fn builtin_systems_pass_common_addresses_through() {
        let catalog = Catalog::new();
        let kjv = catalog.lookup("KJV").unwrap();
        let lxx = catalog.lookup("LXX").unwrap();
        assert_eq!(
            map(&kjv, (BookId::Gen, 1, 1), &lxx, &catalog).unwrap(),
            (BookId::Gen, 1, 1)
        );
        assert_eq!(
            map(&lxx, (BookId::Matt, 5, 9), &kjv, &catalog).unwrap(),
            (BookId::Matt, 5, 9)
        );
        // Deuterocanonical books have no addresses in the KJV.
        assert!(map(&lxx, (BookId::Tob, 1, 1), &kjv, &catalog).is_err());
    }
}
