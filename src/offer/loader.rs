//! Load offers and request documents from JSON files

use super::CompensationOffer;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading offer files
#[derive(Debug, Error)]
pub enum OfferLoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no offers found")]
    Empty,
}

/// An offer file holds either one offer or a list of them
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OfferDocument {
    Many(Vec<CompensationOffer>),
    One(Box<CompensationOffer>),
}

/// Deserialize any JSON document from a file
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, OfferLoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| OfferLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Load all offers from a JSON file
pub fn load_offers<P: AsRef<Path>>(path: P) -> Result<Vec<CompensationOffer>, OfferLoadError> {
    let document: OfferDocument = load_json(path)?;
    into_offers(document)
}

/// Load offers from any reader (e.g., string buffer, stdin)
pub fn load_offers_from_reader<R: Read>(reader: R) -> Result<Vec<CompensationOffer>, OfferLoadError> {
    let document: OfferDocument = serde_json::from_reader(reader)?;
    into_offers(document)
}

fn into_offers(document: OfferDocument) -> Result<Vec<CompensationOffer>, OfferLoadError> {
    let offers = match document {
        OfferDocument::Many(offers) => offers,
        OfferDocument::One(offer) => vec![*offer],
    };
    if offers.is_empty() {
        return Err(OfferLoadError::Empty);
    }
    log::debug!("Loaded {} offer(s)", offers.len());
    Ok(offers)
}
