use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing a table of records.
///
/// Implementors handle format-specific parsing and serialization; the
/// provided methods take care of opening and creating files.
pub trait RecordFile {
    /// One row of the table.
    type Record;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads every record from `reader`.
    ///
    /// # Errors
    ///
    /// Returns an error if a row cannot be parsed or reading fails.
    fn read_from(reader: impl Read) -> Result<Vec<Self::Record>, Self::Error>;

    /// Writes `records` to `writer`, header first.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be serialized or writing fails.
    fn write_to(records: &[Self::Record], writer: impl Write) -> Result<(), Self::Error>;

    /// Reads every record from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Self::Record>, Self::Error> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }

    /// Writes `records` to the file at `path`, replacing it if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        records: &[Self::Record],
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        Self::write_to(records, BufWriter::new(file))
    }
}
