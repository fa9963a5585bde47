use crate::models::{DetailFields, ListingRecord, RawCardFields, NOT_AVAILABLE};
use phonenumber::country;

/// Format a phone number as E.164 (`+14155552671`).
///
/// Numbers that do not parse as valid US numbers come back trimmed but
/// otherwise untouched; missing or blank input becomes `N/A`.
pub fn format_phone_number(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|p| !p.is_empty()) else {
        return NOT_AVAILABLE.to_string();
    };

    match phonenumber::parse(Some(country::Id::US), raw) {
        Ok(number) if phonenumber::is_valid(&number) => {
            number.format().mode(phonenumber::Mode::E164).to_string()
        }
        _ => raw.to_string(),
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Merge card and detail fields into an exportable record
pub fn normalize(card: &RawCardFields, detail: &DetailFields) -> ListingRecord {
    ListingRecord {
        name: or_not_available(Some(&card.name)),
        phone: format_phone_number(card.phone.as_deref()),
        principal_contact: or_not_available(detail.principal_contact.as_deref()),
        url: or_not_available(Some(&card.url)),
        address: or_not_available(card.address.as_deref()),
        accreditation: card
            .accreditation
            .map(|a| a.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
