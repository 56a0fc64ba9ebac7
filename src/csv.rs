use serde::de::DeserializeOwned;

use crate::{emissions::RANGE_COLUMN, Error, RawBracket, Result};

fn reader(data: &[u8]) -> csv::Reader<std::io::Cursor<&[u8]>> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data))
}

pub fn serialize(items: impl Iterator<Item = impl serde::Serialize>) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?;
    }
    wtr.into_inner().map_err(|e| e.into_error().into())
}

pub fn deserialize<'a, D: DeserializeOwned + 'a>(
    data: &'a [u8],
) -> impl Iterator<Item = Result<D>> + 'a {
    reader(data)
        .into_deserialize()
        .map(|r| r.map_err(Error::from))
}

/// Reads the rows of an emissions table: the column [`RANGE_COLUMN`] holds the
/// range spec and every other column is a travel class with its factor.
/// # Error
/// Errors if the CSV is invalid or the column [`RANGE_COLUMN`] is missing
pub(crate) fn raw_brackets(data: &[u8]) -> Result<Vec<RawBracket>> {
    let mut rdr = reader(data);
    let headers = rdr.headers()?.clone();
    let range_column = headers
        .iter()
        .position(|h| h == RANGE_COLUMN)
        .ok_or_else(|| Error::MissingColumn(RANGE_COLUMN.to_string()))?;

    rdr.records()
        .map(|record| {
            let record = record?;
            let range = record.get(range_column).unwrap_or_default();
            let factors = headers
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, _)| *i != range_column)
                .map(|(_, (class, factor))| (class, factor));
            Ok(RawBracket::new(range, factors))
        })
        .collect()
}
