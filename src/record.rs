//! Validated student record.
//!
//! A `Record` holds a 7-character id, a first and last name, and a grade
//! average in `[0, 100]`. Every constructor and setter runs the same
//! validators, so a record that exists is always valid.
//!
//! Equality and hashing use the id alone ([`Record::identity_key`]). Sorting
//! uses first name then last name ([`Record::compare_order`]). The two are
//! deliberately unrelated, which is why `Record` does not implement `Ord`.

use crate::error::{Field, RecordError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Number of characters in a student id.
pub const ID_LEN: usize = 7;

/// Lowest accepted average.
pub const MIN_AVERAGE: f64 = 0.0;

/// Highest accepted average.
pub const MAX_AVERAGE: f64 = 100.0;

/// Field separator of the text line format.
pub const SEPARATOR: char = ';';

/// Number of fields in a data line.
pub const FIELD_COUNT: usize = 4;

/// One student: id, first name, last name, and grade average.
#[derive(Debug, Clone)]
pub struct Record {
    id: String,
    first_name: String,
    last_name: String,
    average: f64,
}

impl Record {
    /// Create a record, validating every field.
    ///
    /// Fails with [`RecordError::InvalidArgument`] naming the first field
    /// that does not pass (checked in id, first name, last name, average order).
    ///
    /// # Example
    /// ```
    /// use student_records::Record;
    ///
    /// let alice = Record::new("1234567", "Alice", "Dupont", 85.0).unwrap();
    /// assert_eq!(alice.to_line(), "1234567;Alice;Dupont;85.0");
    /// assert!(Record::new("123", "Alice", "Dupont", 85.0).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        average: f64,
    ) -> Result<Self, RecordError> {
        let id = check_id(id.into())?;
        let first_name = check_name(Field::FirstName, first_name.into())?;
        let last_name = check_name(Field::LastName, last_name.into())?;
        let average = check_average(average)?;
        Ok(Self {
            id,
            first_name,
            last_name,
            average,
        })
    }

    /// Parse one data line of the form `id;firstName;lastName;average`.
    ///
    /// A line without exactly four fields, or whose average is not a decimal
    /// number, is a [`RecordError::MalformedRow`]. Parsed fields that fail
    /// validation surface as [`RecordError::InvalidArgument`].
    ///
    /// Only the average is trimmed of surrounding whitespace. The id and both
    /// names are kept verbatim, so `" Alice"` stays `" Alice"` and sorts
    /// before `"Alice"`.
    pub fn from_line(line: &str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split(SEPARATOR).collect();
        if fields.len() != FIELD_COUNT {
            return Err(RecordError::malformed(format!(
                "expected {FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        let average_text = fields[3].trim();
        let average: f64 = average_text.parse().map_err(|_| {
            RecordError::malformed(format!("average {average_text:?} is not a number"))
        })?;

        Self::new(fields[0], fields[1], fields[2], average)
    }

    /// True iff `candidate` is exactly [`ID_LEN`] characters long.
    ///
    /// No character-class rule applies; the id is an opaque code.
    pub fn is_valid_id(candidate: &str) -> bool {
        candidate.chars().count() == ID_LEN
    }

    /// True iff `candidate` is a non-empty name.
    pub fn is_valid_name(candidate: &str) -> bool {
        !candidate.is_empty()
    }

    /// True iff `MIN_AVERAGE <= candidate <= MAX_AVERAGE`. NaN is never valid.
    pub fn is_valid_average(candidate: f64) -> bool {
        (MIN_AVERAGE..=MAX_AVERAGE).contains(&candidate)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    // Setters are all-or-nothing: validation happens before assignment.

    pub fn set_id(&mut self, id: impl Into<String>) -> Result<(), RecordError> {
        self.id = check_id(id.into())?;
        Ok(())
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> Result<(), RecordError> {
        self.first_name = check_name(Field::FirstName, first_name.into())?;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> Result<(), RecordError> {
        self.last_name = check_name(Field::LastName, last_name.into())?;
        Ok(())
    }

    pub fn set_average(&mut self, average: f64) -> Result<(), RecordError> {
        self.average = check_average(average)?;
        Ok(())
    }

    /// Return a copy with a new id, or the validation error.
    pub fn with_id(mut self, id: impl Into<String>) -> Result<Self, RecordError> {
        self.set_id(id)?;
        Ok(self)
    }

    /// Return a copy with new names, or the validation error.
    pub fn with_names(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let first_name = check_name(Field::FirstName, first_name.into())?;
        let last_name = check_name(Field::LastName, last_name.into())?;
        self.first_name = first_name;
        self.last_name = last_name;
        Ok(self)
    }

    /// Return a copy with a new average, or the validation error.
    pub fn with_average(mut self, average: f64) -> Result<Self, RecordError> {
        self.set_average(average)?;
        Ok(self)
    }

    /// Sort order: first name, then last name, both by byte-wise comparison.
    ///
    /// Records with equal names compare `Equal` regardless of id or average,
    /// so a stable sort keeps them in input order.
    pub fn compare_order(&self, other: &Record) -> Ordering {
        self.first_name
            .cmp(&other.first_name)
            .then_with(|| self.last_name.cmp(&other.last_name))
    }

    /// The key that decides equality and hashing: the id.
    ///
    /// Two records with the same id are the same student even when their
    /// names or averages differ.
    pub fn identity_key(&self) -> &str {
        &self.id
    }

    /// Render as a data line: `id;firstName;lastName;average`.
    pub fn to_line(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.id,
            self.first_name,
            self.last_name,
            format_average(self.average)
        )
    }
}

/// Format an average as plain decimal text that parses back to the same value.
///
/// Whole numbers keep one decimal place (`85.0`); other values use the
/// shortest exact representation (`85.25`). Never uses exponent notation.
pub fn format_average(average: f64) -> String {
    if average.fract() == 0.0 {
        format!("{average:.1}")
    } else {
        format!("{average}")
    }
}

fn check_id(id: String) -> Result<String, RecordError> {
    if Record::is_valid_id(&id) {
        Ok(id)
    } else {
        Err(RecordError::invalid(
            Field::Id,
            id,
            "must be exactly 7 characters",
        ))
    }
}

fn check_name(field: Field, name: String) -> Result<String, RecordError> {
    if Record::is_valid_name(&name) {
        Ok(name)
    } else {
        Err(RecordError::invalid(field, name, "must not be empty"))
    }
}

fn check_average(average: f64) -> Result<f64, RecordError> {
    if Record::is_valid_average(average) {
        // -0.0 is stored as 0.0 so it renders as "0.0"
        Ok(if average == 0.0 { 0.0 } else { average })
    } else {
        Err(RecordError::invalid(
            Field::Average,
            average,
            "must be between 0 and 100",
        ))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.identity_key() == other.identity_key()
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl FromStr for Record {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_line(s)
    }
}

/// Human-readable form for diagnostics. Not a stable format.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, First name: {}, Last name: {}, Average: {}",
            self.id,
            self.first_name,
            self.last_name,
            format_average(self.average)
        )
    }
}
