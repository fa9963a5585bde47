use serde::Serialize;
use std::fmt;

/// Sentinel written for any field the directory did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Accreditation badge state shown on a listing card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accreditation {
    Accredited,
    NotAccredited,
}

impl fmt::Display for Accreditation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accreditation::Accredited => f.write_str("Accredited"),
            Accreditation::NotAccredited => f.write_str("Not Accredited"),
        }
    }
}

/// Fields read straight off one search-result card
#[derive(Debug, Clone, PartialEq)]
pub struct RawCardFields {
    pub name: String,
    /// Absolute profile URL
    pub url: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub accreditation: Option<Accreditation>,
}

/// Fields read from a listing's detail page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub principal_contact: Option<String>,
}

/// Normalized business listing, as exported.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ListingRecord {
    pub name: String,
    pub phone: String,
    pub principal_contact: String,
    pub url: String,
    pub address: String,
    pub accreditation: String,
}
