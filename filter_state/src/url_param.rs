//! Shareable filter-state tokens: CBOR, then URL-safe base64.

use std::{fmt::Display, str::FromStr};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use common::filter_selection::FilterSelection;
use serde::{Deserialize, Serialize};

use crate::store::sanitize_value;


#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct UrlParam<T>(pub T);

impl<T> From<T> for UrlParam<T> {
    fn from(value: T) -> Self {
        UrlParam(value)
    }
}

// Display output is what FromStr accepts
impl<T: Serialize> Display for UrlParam<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut serialized = Vec::new();
        if ciborium::into_writer(&self.0, &mut serialized).is_ok() {
            write!(f, "{}", URL_SAFE.encode(serialized))?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum StateParseError {
    DecodeError(base64::DecodeError),
    CiboriumError(ciborium::de::Error<std::io::Error>),
}

impl std::fmt::Display for StateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecodeError(err) => write!(f, "Failed to decode base64: {}", err),
            Self::CiboriumError(err) => write!(f, "Failed to deserialize: {}", err),
        }
    }
}

impl std::error::Error for StateParseError {}

impl<T: for<'de> Deserialize<'de>> FromStr for UrlParam<T> {
    type Err = StateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decoded = URL_SAFE
            .decode(s.trim().as_bytes())
            .map_err(StateParseError::DecodeError)?;
        let parsed = ciborium::from_reader(std::io::Cursor::new(decoded))
            .map_err(StateParseError::CiboriumError)?;
        Ok(UrlParam(parsed))
    }
}

/// What a shared link restores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionSnapshot {
    pub selection: FilterSelection,
    pub search_term: String,
    pub page: u64,
}

impl SessionSnapshot {
    pub fn to_token(&self) -> String {
        UrlParam(self).to_string()
    }

    /// Tokens come from links and are untrusted: values that the store's
    /// mutators would refuse are dropped here.
    pub fn from_token(token: &str) -> Result<Self, StateParseError> {
        let UrlParam(snapshot) = token.parse::<UrlParam<SessionSnapshot>>()?;
        Ok(snapshot.sanitized())
    }

    pub fn sanitized(self) -> Self {
        let mut selection = FilterSelection::new();
        for (key, value) in self.selection.iter() {
            if let Some(value) = sanitize_value(key, value.clone()) {
                selection.insert(key, value);
            }
        }
        Self { selection, ..self }
    }
}
