use std::path::PathBuf;

use async_trait::async_trait;

use crate::CalculationResult;

/// An object that can be used to get and put blobs.
#[async_trait]
pub trait BlobStorageProvider {
    type Error: std::error::Error + Send;
    async fn maybe_get(&self, blob_name: &str) -> Result<Option<Vec<u8>>, Self::Error>;
    async fn put(&self, blob_name: &str, contents: Vec<u8>) -> Result<(), Self::Error>;
}

/// A [`BlobStorageProvider`] for local disk, storing blobs relative to a root directory
pub struct LocalDisk {
    root: PathBuf,
}

impl LocalDisk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStorageProvider for LocalDisk {
    type Error = std::io::Error;

    async fn maybe_get(&self, blob_name: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        let path = self.root.join(blob_name);
        if path.try_exists()? {
            Ok(Some(std::fs::read(path)?))
        } else {
            Ok(None)
        }
    }

    async fn put(&self, blob_name: &str, contents: Vec<u8>) -> Result<(), Self::Error> {
        let path = self.root.join(blob_name);
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, contents)
    }
}

#[derive(Debug)]
pub enum Error<E: std::error::Error + Send> {
    /// An error originating from reading or writing to the backend
    Backend(E),
    /// A stored calculation could not be (de)serialized
    Serde(serde_json::Error),
}

impl<E: std::error::Error + Send> std::error::Error for Error<E> {}

impl<E: std::error::Error + Send> std::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(e) => std::fmt::Display::fmt(&e, f),
            Self::Serde(e) => std::fmt::Display::fmt(&e, f),
        }
    }
}

/// Lowercase ascii-alphanumeric name of a company, words joined by `-`
fn slug(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "company".to_string()
    } else {
        slug
    }
}

/// The directory (blob prefix) under which a calculation is stored,
/// `{company}/{unix timestamp in nanoseconds}`
pub fn calculation_key(result: &CalculationResult) -> String {
    format!(
        "{}/{}",
        slug(&result.company.name),
        result.calculated_at.unix_timestamp_nanos()
    )
}

/// Stores `result` as `{key}/result.json` and `report` as `{key}/report.md`,
/// where `key` is [`calculation_key`]. Returns the key.
pub async fn store_calculation<P: BlobStorageProvider>(
    result: &CalculationResult,
    report: &str,
    provider: &P,
) -> Result<String, Error<P::Error>> {
    let key = calculation_key(result);
    let json = serde_json::to_vec_pretty(result).map_err(Error::Serde)?;
    provider
        .put(&format!("{key}/result.json"), json)
        .await
        .map_err(Error::Backend)?;
    provider
        .put(&format!("{key}/report.md"), report.as_bytes().to_vec())
        .await
        .map_err(Error::Backend)?;
    log::info!("Calculation stored at {key}");
    Ok(key)
}

/// Reads the calculation stored under `key`, if any.
pub async fn read_calculation<P: BlobStorageProvider>(
    key: &str,
    provider: &P,
) -> Result<Option<CalculationResult>, Error<P::Error>> {
    let Some(data) = provider
        .maybe_get(&format!("{key}/result.json"))
        .await
        .map_err(Error::Backend)?
    else {
        log::info!("{key} - not found");
        return Ok(None);
    };
    serde_json::from_slice(&data).map(Some).map_err(Error::Serde)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slugs() {
        assert_eq!(slug("Bakkerij Jansen B.V."), "bakkerij-jansen-b-v");
        assert_eq!(slug("  "), "company");
        assert_eq!(slug("Café 't Hoekje"), "caf-t-hoekje");
    }

    #[test]
    fn keys_within_a_second_differ() {
        use crate::{calculate_at, ActivityInput, CompanyProfile, EmissionFactors, Industry};
        use time::macros::datetime;

        let at = |t| {
            calculate_at(
                CompanyProfile::new("Jansen BV", Industry::Retail, 4),
                ActivityInput::default(),
                &EmissionFactors::default(),
                t,
            )
        };
        let first = at(datetime!(2024-05-01 08:00:00.100 UTC));
        let second = at(datetime!(2024-05-01 08:00:00.900 UTC));
        assert_ne!(calculation_key(&first), calculation_key(&second));
        assert_eq!(calculation_key(&first), "jansen-bv/1714550400100000000");
    }
}
