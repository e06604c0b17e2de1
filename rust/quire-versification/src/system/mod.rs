//! Built-in versification systems.
//!
//! Each system module carries its canonical book order and per-chapter verse
//! counts as static tables. The [`catalog`](crate::catalog) instantiates a
//! [`Versification`](crate::Versification) from these tables on first use.

pub(crate) mod kjv;
pub(crate) mod lxx;
