//! CSV-backed person repository
//!
//! The source file is re-read on every call, so external edits show up
//! without a restart. Runtime additions live in memory only and are lost
//! when the process ends.

use std::path::PathBuf;
use std::sync::Mutex;

use persons_common::color::color_name;
use persons_common::Person;
use tracing::debug;

use super::PersonRepository;

/// Repository that parses person records from a flat CSV file and keeps
/// runtime additions in an in-memory list.
pub struct CsvPersonRepository {
    csv_path: PathBuf,
    added: Mutex<Vec<Person>>,
}

impl CsvPersonRepository {
    /// Create a repository for the given CSV file. The file does not
    /// have to exist; a missing source reads as empty.
    pub fn new(csv_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            added: Mutex::new(Vec::new()),
        }
    }

    /// Parse the source file into records, in file order.
    ///
    /// Malformed lines are skipped without shifting the line numbers of
    /// later records.
    fn read_source(&self) -> Vec<Person> {
        let Ok(text) = std::fs::read_to_string(&self.csv_path) else {
            return Vec::new();
        };

        text.lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let person = parse_line(line, index as i64 + 1);
                if person.is_none() {
                    debug!("Skipping malformed line {}: {}", index + 1, line);
                }
                person
            })
            .collect()
    }
}

impl PersonRepository for CsvPersonRepository {
    fn get_all(&self) -> Vec<Person> {
        let mut persons = self.read_source();
        persons.extend(self.added.lock().unwrap().iter().cloned());
        persons
    }

    fn get_by_id(&self, id: i64) -> Option<Person> {
        self.get_all().into_iter().find(|p| p.id == id)
    }

    fn get_by_color(&self, color: Option<&str>) -> Vec<Person> {
        let Some(color) = color.filter(|c| !c.is_empty()) else {
            return Vec::new();
        };

        // Unicode lowercase, so GRÜN matches grün
        let wanted = color.to_lowercase();
        self.get_all()
            .into_iter()
            .filter(|p| p.color.to_lowercase() == wanted)
            .collect()
    }

    fn add(&self, person: Option<Person>) {
        if let Some(person) = person {
            self.added.lock().unwrap().push(person);
        }
    }
}

/// Parse one CSV line into a person.
///
/// Format: `<lastname>, <firstname>, <zipcode> <city>, <colorCode>`.
/// Returns `None` for lines with fewer than four fields or a non-integer
/// color code. `line_number` is 1-based and counts every source line, so
/// a rejected line still consumes its number.
fn parse_line(line: &str, line_number: i64) -> Option<Person> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    if fields.len() < 4 {
        return None;
    }

    let color_code: i64 = fields[fields.len() - 1].parse().ok()?;

    // Zip and city share one field, split at the first space
    let mut zip_city = fields[2].splitn(2, ' ');
    let zipcode = zip_city.next().unwrap_or("").to_string();
    let city = zip_city.next().unwrap_or("").to_string();

    Some(Person {
        id: line_number,
        lastname: fields[0].to_string(),
        name: fields[1].to_string(),
        zipcode,
        city,
        color: color_name(color_code).to_string(),
    })
}
