//! Book identifiers shared by every versification system.
//!
//! [`BookId`] enumerates every book any built-in or custom system may carry:
//! the sixty-six books of the protestant canon followed by the
//! deuterocanonical books used by the LXX system. The enum order is a fixed
//! catalog order for lookups only; the canonical reading order of a given
//! corpus is defined by its [`Versification`](crate::Versification).

use std::fmt;

/// Identifies a single book, independent of any versification system.
///
/// A `BookId` carries no chapter or verse structure. Whether a book is
/// present in a given system, and where it falls in that system's canonical
/// order, is decided by the [`Versification`](crate::Versification) that
/// contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BookId {
    // First part of the protestant canon.
    Gen,
    Exod,
    Lev,
    Num,
    Deut,
    Josh,
    Judg,
    Ruth,
    Sam1,
    Sam2,
    Kgs1,
    Kgs2,
    Chr1,
    Chr2,
    Ezra,
    Neh,
    Esth,
    Job,
    Ps,
    Prov,
    Eccl,
    Song,
    Isa,
    Jer,
    Lam,
    Ezek,
    Dan,
    Hos,
    Joel,
    Amos,
    Obad,
    Jonah,
    Mic,
    Nah,
    Hab,
    Zeph,
    Hag,
    Zech,
    Mal,
    // Second part of the protestant canon.
    Matt,
    Mark,
    Luke,
    John,
    Acts,
    Rom,
    Cor1,
    Cor2,
    Gal,
    Eph,
    Phil,
    Col,
    Thess1,
    Thess2,
    Tim1,
    Tim2,
    Titus,
    Phlm,
    Heb,
    Jas,
    Pet1,
    Pet2,
    John1,
    John2,
    John3,
    Jude,
    Rev,
    // Deuterocanon and apocrypha.
    Esd1,
    Jdt,
    Tob,
    Macc1,
    Macc2,
    Macc3,
    Macc4,
    PrMan,
    Wis,
    Sir,
    PssSol,
    Bar,
    EpJer,
    PrAzar,
    Sus,
    Bel,
    En1,
    Odes,
}

impl BookId {
    /// Every known book, in catalog order.
    pub const ALL: [BookId; 84] = [
        BookId::Gen,
        BookId::Exod,
        BookId::Lev,
        BookId::Num,
        BookId::Deut,
        BookId::Josh,
        BookId::Judg,
        BookId::Ruth,
        BookId::Sam1,
        BookId::Sam2,
        BookId::Kgs1,
        BookId::Kgs2,
        BookId::Chr1,
        BookId::Chr2,
        BookId::Ezra,
        BookId::Neh,
        BookId::Esth,
        BookId::Job,
        BookId::Ps,
        BookId::Prov,
        BookId::Eccl,
        BookId::Song,
        BookId::Isa,
        BookId::Jer,
        BookId::Lam,
        BookId::Ezek,
        BookId::Dan,
        BookId::Hos,
        BookId::Joel,
        BookId::Amos,
        BookId::Obad,
        BookId::Jonah,
        BookId::Mic,
        BookId::Nah,
        BookId::Hab,
        BookId::Zeph,
        BookId::Hag,
        BookId::Zech,
        BookId::Mal,
        BookId::Matt,
        BookId::Mark,
        BookId::Luke,
        BookId::John,
        BookId::Acts,
        BookId::Rom,
        BookId::Cor1,
        BookId::Cor2,
        BookId::Gal,
        BookId::Eph,
        BookId::Phil,
        BookId::Col,
        BookId::Thess1,
        BookId::Thess2,
        BookId::Tim1,
        BookId::Tim2,
        BookId::Titus,
        BookId::Phlm,
        BookId::Heb,
        BookId::Jas,
        BookId::Pet1,
        BookId::Pet2,
        BookId::John1,
        BookId::John2,
        BookId::John3,
        BookId::Jude,
        BookId::Rev,
        BookId::Esd1,
        BookId::Jdt,
        BookId::Tob,
        BookId::Macc1,
        BookId::Macc2,
        BookId::Macc3,
        BookId::Macc4,
        BookId::PrMan,
        BookId::Wis,
        BookId::Sir,
        BookId::PssSol,
        BookId::Bar,
        BookId::EpJer,
        BookId::PrAzar,
        BookId::Sus,
        BookId::Bel,
        BookId::En1,
        BookId::Odes,
    ];

    /// Number of known books.
    pub const COUNT: usize = BookId::ALL.len();

    /// OSIS identifier, full English name and short abbreviation.
    const fn names(&self) -> (&'static str, &'static str, &'static str) {
        match self {
            BookId::Gen => ("Gen", "Genesis", "Ge"),
            BookId::Exod => ("Exod", "Exodus", "Ex"),
            BookId::Lev => ("Lev", "Leviticus", "Le"),
            BookId::Num => ("Num", "Numbers", "Nu"),
            BookId::Deut => ("Deut", "Deuteronomy", "De"),
            BookId::Josh => ("Josh", "Joshua", "Jos"),
            BookId::Judg => ("Judg", "Judges", "Jdg"),
            BookId::Ruth => ("Ruth", "Ruth", "Ru"),
            BookId::Sam1 => ("1Sam", "1 Samuel", "1Sa"),
            BookId::Sam2 => ("2Sam", "2 Samuel", "2Sa"),
            BookId::Kgs1 => ("1Kgs", "1 Kings", "1Ki"),
            BookId::Kgs2 => ("2Kgs", "2 Kings", "2Ki"),
            BookId::Chr1 => ("1Chr", "1 Chronicles", "1Ch"),
            BookId::Chr2 => ("2Chr", "2 Chronicles", "2Ch"),
            BookId::Ezra => ("Ezra", "Ezra", "Ezr"),
            BookId::Neh => ("Neh", "Nehemiah", "Ne"),
            BookId::Esth => ("Esth", "Esther", "Es"),
            BookId::Job => ("Job", "Job", "Jb"),
            BookId::Ps => ("Ps", "Psalms", "Psa"),
            BookId::Prov => ("Prov", "Proverbs", "Pr"),
            BookId::Eccl => ("Eccl", "Ecclesiastes", "Ec"),
            BookId::Song => ("Song", "Song of Solomon", "So"),
            BookId::Isa => ("Isa", "Isaiah", "Is"),
            BookId::Jer => ("Jer", "Jeremiah", "Je"),
            BookId::Lam => ("Lam", "Lamentations", "La"),
            BookId::Ezek => ("Ezek", "Ezekiel", "Eze"),
            BookId::Dan => ("Dan", "Daniel", "Da"),
            BookId::Hos => ("Hos", "Hosea", "Ho"),
            BookId::Joel => ("Joel", "Joel", "Joe"),
            BookId::Amos => ("Amos", "Amos", "Am"),
            BookId::Obad => ("Obad", "Obadiah", "Ob"),
            BookId::Jonah => ("Jonah", "Jonah", "Jon"),
            BookId::Mic => ("Mic", "Micah", "Mi"),
            BookId::Nah => ("Nah", "Nahum", "Na"),
            BookId::Hab => ("Hab", "Habakkuk", "Hab"),
            BookId::Zeph => ("Zeph", "Zephaniah", "Zep"),
            BookId::Hag => ("Hag", "Haggai", "Hag"),
            BookId::Zech => ("Zech", "Zechariah", "Zec"),
            BookId::Mal => ("Mal", "Malachi", "Mal"),
            BookId::Matt => ("Matt", "Matthew", "Mt"),
            BookId::Mark => ("Mark", "Mark", "Mk"),
            BookId::Luke => ("Luke", "Luke", "Lk"),
            BookId::John => ("John", "John", "Jn"),
            BookId::Acts => ("Acts", "Acts", "Ac"),
            BookId::Rom => ("Rom", "Romans", "Ro"),
            BookId::Cor1 => ("1Cor", "1 Corinthians", "1Co"),
            BookId::Cor2 => ("2Cor", "2 Corinthians", "2Co"),
            BookId::Gal => ("Gal", "Galatians", "Ga"),
            BookId::Eph => ("Eph", "Ephesians", "Ep"),
            BookId::Phil => ("Phil", "Philippians", "Php"),
            BookId::Col => ("Col", "Colossians", "Col"),
            BookId::Thess1 => ("1Thess", "1 Thessalonians", "1Th"),
            BookId::Thess2 => ("2Thess", "2 Thessalonians", "2Th"),
            BookId::Tim1 => ("1Tim", "1 Timothy", "1Ti"),
            BookId::Tim2 => ("2Tim", "2 Timothy", "2Ti"),
            BookId::Titus => ("Titus", "Titus", "Tit"),
            BookId::Phlm => ("Phlm", "Philemon", "Phm"),
            BookId::Heb => ("Heb", "Hebrews", "He"),
            BookId::Jas => ("Jas", "James", "Jam"),
            BookId::Pet1 => ("1Pet", "1 Peter", "1Pe"),
            BookId::Pet2 => ("2Pet", "2 Peter", "2Pe"),
            BookId::John1 => ("1John", "1 John", "1Jn"),
            BookId::John2 => ("2John", "2 John", "2Jn"),
            BookId::John3 => ("3John", "3 John", "3Jn"),
            BookId::Jude => ("Jude", "Jude", "Jud"),
            BookId::Rev => ("Rev", "Revelation", "Re"),
            BookId::Esd1 => ("1Esd", "1 Esdras", "1Es"),
            BookId::Jdt => ("Jdt", "Judith", "Jdth"),
            BookId::Tob => ("Tob", "Tobit", "Tb"),
            BookId::Macc1 => ("1Macc", "1 Maccabees", "1Ma"),
            BookId::Macc2 => ("2Macc", "2 Maccabees", "2Ma"),
            BookId::Macc3 => ("3Macc", "3 Maccabees", "3Ma"),
            BookId::Macc4 => ("4Macc", "4 Maccabees", "4Ma"),
            BookId::PrMan => ("PrMan", "Prayer of Manasseh", "Man"),
            BookId::Wis => ("Wis", "Wisdom of Solomon", "Wi"),
            BookId::Sir => ("Sir", "Sirach", "Si"),
            BookId::PssSol => ("PssSol", "Psalms of Solomon", "PsSol"),
            BookId::Bar => ("Bar", "Baruch", "Ba"),
            BookId::EpJer => ("EpJer", "Epistle of Jeremiah", "EpJe"),
            BookId::PrAzar => ("PrAzar", "Prayer of Azariah", "Aza"),
            BookId::Sus => ("Sus", "Susanna", "Su"),
            BookId::Bel => ("Bel", "Bel and the Dragon", "Bel"),
            BookId::En1 => ("1En", "1 Enoch", "1En"),
            BookId::Odes => ("Odes", "Odes", "Ode"),
        }
    }

    /// OSIS identifier, e.g. `"Gen"` or `"1Cor"`.
    pub const fn osis(&self) -> &'static str {
        self.names().0
    }

    /// Full English name, e.g. `"Genesis"`.
    pub const fn name(&self) -> &'static str {
        self.names().1
    }

    /// Short abbreviation, e.g. `"Ge"`.
    pub const fn abbrev(&self) -> &'static str {
        self.names().2
    }

    /// Resolves an OSIS identifier, ignoring ASCII case.
    pub fn from_osis(osis: &str) -> Option<BookId> {
        BookId::ALL
            .iter()
            .find(|b| b.osis().eq_ignore_ascii_case(osis))
            .copied()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.osis())
    }
}

/// The two parts of a versification system.
///
/// Systems enumerate their books as a first part followed by a second part
/// (traditionally the old and new testaments). The split matters to the
/// storage layer and to reference rendering, not to ordinal arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn as_str(&self) -> &'static str {
        match self {
            Testament::Old => "OT",
            Testament::New => "NT",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osis_roundtrip() {
        for book in BookId::ALL {
            assert_eq!(BookId::from_osis(book.osis()), Some(book));
            assert_eq!(BookId::from_osis(&book.osis().to_uppercase()), Some(book));
        }
        assert_eq!(BookId::from_osis("Nope"), None);
    }

    #[test]
    fn names_are_distinct() {
        for (i, a) in BookId::ALL.iter().enumerate() {
            for b in &BookId::ALL[i + 1..] {
                assert!(!a.osis().eq_ignore_ascii_case(b.osis()), "{a} vs {b}");
                assert!(!a.name().eq_ignore_ascii_case(b.name()), "{a} vs {b}");
                assert!(!a.abbrev().eq_ignore_ascii_case(b.abbrev()), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn display_uses_osis() {
        assert_eq!(BookId::Gen.to_string(), "Gen");
        assert_eq!(BookId::Cor1.to_string(), "1Cor");
        assert_eq!(BookId::Song.to_string(), "Song");
    }
}
