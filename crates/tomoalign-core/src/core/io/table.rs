use super::records::{PointRecord, ProjectedRecord};
use super::traits::RecordFile;
use crate::core::models::alignment::ProjectionAlignment;
use crate::core::models::particle::ParticlePose;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{self, Read, Write};
use std::marker::PhantomData;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A headed CSV table whose rows are `T`.
///
/// Column names are the field names of `T`. Surrounding whitespace in
/// fields and headers is ignored when reading.
pub struct CsvTable<T>(PhantomData<T>);

pub type ParticleFile = CsvTable<ParticlePose>;
pub type ProjectionFile = CsvTable<ProjectionAlignment>;
pub type PointFile = CsvTable<PointRecord>;
pub type ProjectedParticleFile = CsvTable<ProjectedRecord>;

impl<T> RecordFile for CsvTable<T>
where
    T: Serialize + DeserializeOwned,
{
    type Record = T;
    type Error = CsvError;

    fn read_from(reader: impl Read) -> Result<Vec<T>, CsvError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let records = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
        Ok(records)
    }

    fn write_to(records: &[T], writer: impl Write) -> Result<(), CsvError> {
        let mut writer = csv::Writer::from_writer(writer);
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }
}
