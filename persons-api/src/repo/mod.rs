//! Person data access layer
//!
//! The HTTP layer only talks to the [`PersonRepository`] trait; the
//! concrete CSV-backed implementation lives in the `csv` module.

use persons_common::Person;

mod csv;
pub use csv::CsvPersonRepository;

/// Contract for accessing and managing person records.
pub trait PersonRepository: Send + Sync {
    /// Every known person: source records in file order followed by
    /// runtime additions in insertion order. Never fails; an absent or
    /// empty source yields only the additions.
    fn get_all(&self) -> Vec<Person>;

    /// The first person in get_all order whose identifier matches,
    /// or `None` when absent.
    fn get_by_id(&self, id: i64) -> Option<Person>;

    /// Every person whose color matches, compared case-insensitively.
    /// `None` or an empty string yields no matches, never the full set.
    fn get_by_color(&self, color: Option<&str>) -> Vec<Person>;

    /// Appends a person to the in-memory store; the CSV source remains
    /// unchanged. `None` is a no-op.
    fn add(&self, person: Option<Person>);
}
