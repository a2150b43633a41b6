//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Sort direction for list views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortDirection {
    type Err = crate::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(crate::CoreError::invalid(
                "direction",
                format!("unknown sort direction '{}'", other),
            )),
        }
    }
}

/// A list filter that either accepts everything ("all") or one exact value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => expected == value,
        }
    }
}

impl<T: FromStr> Selector<T> {
    /// Parse an optional query value; missing, empty and "all" select everything
    pub fn parse(raw: Option<&str>) -> Result<Self, T::Err> {
        match raw.map(str::trim) {
            None | Some("") | Some("all") => Ok(Selector::All),
            Some(value) => value.parse().map(Selector::Only),
        }
    }
}

/// Case-insensitive substring match used by the free-text search boxes
pub fn matches_search(term: Option<&str>, haystacks: &[&str]) -> bool {
    match term.map(str::trim) {
        None | Some("") => true,
        Some(term) => {
            let needle = term.to_lowercase();
            haystacks
                .iter()
                .any(|h| h.to_lowercase().contains(&needle))
        }
    }
}
