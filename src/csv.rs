use std::{collections::HashMap, error::Error, hash::Hash};

use serde::Deserialize;

/// Loads a CSV from disk into a HashMap based on the primary key of the type
/// # Error
/// Errors if the file cannot be read, a row cannot be deserialized or two rows share a key
pub(crate) fn load<H: Hash + Eq, D: for<'de> Deserialize<'de>, PK: Fn(D) -> (H, D)>(
    path: &str,
    map: PK,
) -> Result<HashMap<H, D>, Box<dyn Error>> {
    let data = std::fs::read(path)?;

    let mut items = HashMap::new();
    for (row, item) in deserialize(&data)?.into_iter().map(map).enumerate() {
        if items.insert(item.0, item.1).is_some() {
            // the header is line 1
            return Err(format!("{path}: line {} repeats a previous key", row + 2).into());
        }
    }
    Ok(items)
}

/// Serializes `items` as CSV with a header row
pub fn serialize(
    items: impl Iterator<Item = impl serde::Serialize>,
) -> Result<Vec<u8>, Box<dyn Error>> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for item in items {
        wtr.serialize(item)?
    }
    Ok(wtr.into_inner().map_err(|e| e.into_error())?)
}

pub fn deserialize<D: serde::de::DeserializeOwned>(data: &[u8]) -> Result<Vec<D>, csv::Error> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(std::io::Cursor::new(data))
        .into_deserialize()
        .collect()
}
