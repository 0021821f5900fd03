//! # student-records
//!
//! Validated student records read from and written to semicolon-delimited
//! text.
//!
//! ## Overview
//!
//! - **Records**: id (7 characters), first name, last name, and an average
//!   in `[0, 100]`; every field is validated on construction and update
//! - **Line format**: `id;firstName;lastName;average`, header line on input
//! - **Collection operations**: load, bulk-adjust averages, stable sort by
//!   name, render
//!
//! Malformed input rows are skipped and reported rather than aborting a load.
//!
//! ## Example
//!
//! ```
//! use student_records::RecordCollection;
//!
//! let lines = [
//!     "id;firstName;lastName;average",
//!     "2345678;Bob;Martin;95.0",
//!     "1234567;Alice;Dupont;85.0",
//!     "3456789;Alice;Durand",
//! ];
//!
//! let mut students = RecordCollection::new();
//! let report = students.populate(lines);
//! assert_eq!(report.loaded, 2);
//! assert_eq!(report.skipped.len(), 1);
//!
//! students.bulk_adjust_average(10.0).unwrap();
//! students.sort_by_order();
//!
//! assert_eq!(
//!     students.render(),
//!     vec!["1234567;Alice;Dupont;95.0", "2345678;Bob;Martin;100.0"]
//! );
//! ```

pub mod collection;
pub mod error;
pub mod io;
pub mod record;

pub use collection::{HEADER, LoadReport, RecordCollection, SkippedRow};
pub use error::{Field, RecordError};
pub use io::{LineSink, LineSource, SourceLine, TextFile, UndecodableLine};
pub use record::{ID_LEN, MAX_AVERAGE, MIN_AVERAGE, Record, format_average};
