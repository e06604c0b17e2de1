//! Search over module text.
//!
//! The store does not prescribe an index structure; it defines the seam
//! an engine plugs into and the bridge from scored matches back into
//! passage arithmetic.

use std::sync::Arc;

use quire_common::Result;
use quire_passage::tally::MAX_TALLY;
use quire_passage::{PassageTally, Verse};
use quire_versification::{BookId, Versification};

use crate::read::Module;

/// A pluggable search engine over one module's text.
///
/// Indexing proceeds book by book so an engine can report progress and
/// persist incrementally. Queries return scored verses; order and score
/// scale are the engine's own.
pub trait SearchIndex: Send + Sync {
    fn index_book(&mut self, module: &Module, book: BookId) -> Result<()>;

    fn query(&self, text: &str) -> Result<Vec<(Verse, f32)>>;
}

/// Folds scored matches into a [`PassageTally`] so they compose with
/// passage arithmetic.
///
/// Scores map to weights on a 0..=100 scale per point; every match
/// counts at least 1 so that zero-scored hits still register.
pub fn tally_results(
    v11n: Arc<Versification>,
    results: &[(Verse, f32)],
) -> Result<PassageTally> {
    let mut tally = PassageTally::new(v11n);
    for (verse, score) in results {
        let weight = ((score.max(0.0) * 100.0) as u32).clamp(1, MAX_TALLY);
        tally.add_weighted(verse, weight)?;
    }
    Ok(tally)
}
