//! Verse addresses, ranges, passages and tallies.
//!
//! Everything here is value-like: a [`Verse`] is one address bound to a
//! versification system, a [`VerseRange`] is a contiguous run of verses, a
//! [`Passage`] is an ordered, merged set of ranges, and a [`PassageTally`]
//! scores verses by how often they were added. The set algebra works on
//! ordinal intervals, so union, intersection and difference of arbitrarily
//! large passages cost what their range counts cost, not their verse counts.
//!
//! Human-readable references (`"Gen 1:1-3"`, `"Exod 2; Lev 3:4"`) parse via
//! [`parse`] and render through `Display` in the shortest unambiguous form.

pub mod parse;
pub mod passage;
pub mod restriction;
pub mod tally;
pub mod verse;
pub mod verse_range;

pub use passage::Passage;
pub use restriction::Restriction;
pub use tally::{Order, PassageTally};
pub use verse::Verse;
pub use verse_range::VerseRange;
