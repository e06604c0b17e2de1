//! The catalog of versification systems.
//!
//! A [`Catalog`] is the explicit home of named systems: it is constructed at
//! startup with the built-ins (KJV and LXX) registered, optionally extended
//! at runtime with further systems, and handed to the components that
//! resolve names (module opening, cross-system mapping). There is no
//! process-wide instance; two catalogs are fully independent, and every
//! consumer of one name within a catalog shares one `Arc<Versification>`.
//!
//! # Thread Safety
//!
//! A catalog can be shared across threads; it uses a `RwLock` to allow
//! concurrent lookups while keeping registration exclusive.

use std::sync::{Arc, RwLock};

use quire_common::{Result, error::Error};

use crate::description;
use crate::system::{kjv, lxx};
use crate::versification::Versification;

/// Name of the default system. Always present in a catalog.
pub const DEFAULT: &str = "KJV";

/// A set of versification systems keyed by case-sensitive name.
pub struct Catalog {
    systems: RwLock<ahash::HashMap<String, Arc<Versification>>>,
}

impl Catalog {
    /// A catalog holding the built-in systems.
    pub fn new() -> Catalog {
        let catalog = Catalog {
            systems: RwLock::new(ahash::HashMap::default()),
        };
        for v11n in [
            Versification::from_tables(kjv::NAME, kjv::FIRST_PART, kjv::SECOND_PART),
            Versification::from_tables(lxx::NAME, lxx::FIRST_PART, lxx::SECOND_PART),
        ] {
            catalog.register(v11n);
        }
        catalog
    }

    /// Registers a versification system.
    ///
    /// A system of the same name already present is replaced; callers
    /// holding the old `Arc` keep it. Returns the shared instance just
    /// registered.
    pub fn register(&self, v11n: impl Into<Arc<Versification>>) -> Arc<Versification> {
        let v11n = v11n.into();
        log::debug!("registering versification system '{}'", v11n.name());
        self.systems
            .write()
            .unwrap()
            .insert(v11n.name().to_string(), Arc::clone(&v11n));
        v11n
    }

    /// Retrieves a system by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::unknown_versification` when no system with the given
    /// name is registered.
    pub fn lookup(&self, name: impl AsRef<str>) -> Result<Arc<Versification>> {
        let name = name.as_ref();
        let v11n = self.systems.read().unwrap().get(name).cloned();
        v11n.ok_or_else(|| Error::unknown_versification(name))
    }

    /// The default system, used wherever a module config names no other.
    pub fn default_versification(&self) -> Arc<Versification> {
        self.lookup(DEFAULT)
            .expect("the default versification system is always registered")
    }

    /// Names of all registered systems, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.systems.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }

    /// Parses a JSON system description and registers the result.
    ///
    /// # Errors
    ///
    /// Returns `Error::malformed_description` when the document does not
    /// parse or its tables are inconsistent, and `Error::unknown_book_id`
    /// when a book identifier is not recognized.
    pub fn load_description(&self, json: &str) -> Result<Arc<Versification>> {
        let v11n = description::parse(json)?;
        Ok(self.register(v11n))
    }
}

impl Default for Catalog {
    fn default() -> Catalog {
        Catalog::new()
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog").field("names", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::BookId;
    use quire_common::error::ErrorKind;

    #[test]
    fn builtins_are_present() {
        let catalog = Catalog::new();
        assert_eq!(catalog.default_versification().name(), "KJV");
        assert_eq!(catalog.default_versification().max_ordinal(), 31_102);
        assert_eq!(catalog.lookup("LXX").unwrap().book_count(), 84);
        assert_eq!(catalog.names(), ["KJV", "LXX"]);
    }

    #[test]
    fn lookups_share_one_instance() {
        let catalog = Catalog::new();
        assert!(Arc::ptr_eq(
            &catalog.lookup("KJV").unwrap(),
            &catalog.lookup("KJV").unwrap()
        ));
    }

    #[test]
    fn catalogs_are_independent() {
        let a = Catalog::new();
        let b = Catalog::new();
        a.register(Versification::new("Local", vec![(BookId::Gen, vec![3])], Vec::new()).unwrap());
        assert!(a.lookup("Local").is_ok());
        assert!(b.lookup("Local").is_err());
    }

    #[test]
    fn unknown_name_fails() {
        let err = Catalog::new().lookup("NoSuchSystem").unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::UnknownVersification { name } if name == "NoSuchSystem"
        ));
    }

    #[test]
    fn registration_replaces_by_name() {
        let catalog = Catalog::new();
        let first = catalog.register(
            Versification::new("CatalogTest", vec![(BookId::Gen, vec![3])], Vec::new()).unwrap(),
        );
        assert!(Arc::ptr_eq(&first, &catalog.lookup("CatalogTest").unwrap()));
        let second = catalog.register(
            Versification::new("CatalogTest", vec![(BookId::Gen, vec![4])], Vec::new()).unwrap(),
        );
        assert!(Arc::ptr_eq(&second, &catalog.lookup("CatalogTest").unwrap()));
        assert_eq!(first.max_ordinal(), 3);
        assert_eq!(catalog.lookup("CatalogTest").unwrap().max_ordinal(), 4);
    }
}
