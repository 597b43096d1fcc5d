//! Wire payload types for the fixed-shape AI response contract.
//!
//! Each operation constrains the model to one of three JSON shapes. The
//! resolver deserializes into these structs; a document that fails to match
//! is a "not found", not an error.

use serde::Deserialize;

/// `{"latitude": number, "longitude": number}`
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodePayload {
    pub latitude: f64,
    pub longitude: f64,
}

/// `{"suggestions": ["...", ...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionsPayload {
    pub suggestions: Vec<String>,
}

/// `{"placeName": string, "latitude": number, "longitude": number}`
#[derive(Debug, Clone, Deserialize)]
pub struct DescribedPlacePayload {
    #[serde(rename = "placeName")]
    pub place_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geocode_payload_deserialize() {
        let payload: GeocodePayload =
            serde_json::from_str(r#"{"latitude": 12.9766, "longitude": 77.5713}"#).unwrap();
        assert!((payload.latitude - 12.9766).abs() < 1e-9);
        assert!((payload.longitude - 77.5713).abs() < 1e-9);
    }

    #[test]
    fn test_geocode_payload_rejects_string_fields() {
        let result = serde_json::from_str::<GeocodePayload>(
            r#"{"latitude": "12.9766", "longitude": 77.5713}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_geocode_payload_rejects_missing_fields() {
        assert!(serde_json::from_str::<GeocodePayload>(r#"{"latitude": 12.9}"#).is_err());
    }

    #[test]
    fn test_suggestions_payload_deserialize() {
        let payload: SuggestionsPayload = serde_json::from_str(
            r#"{"suggestions": ["Eiffel Tower, Paris", "Union Station, Los Angeles"]}"#,
        )
        .unwrap();
        assert_eq!(payload.suggestions.len(), 2);
    }

    #[test]
    fn test_suggestions_payload_rejects_non_array() {
        assert!(serde_json::from_str::<SuggestionsPayload>(r#"{"suggestions": "one"}"#).is_err());
    }

    #[test]
    fn test_described_place_payload_deserialize() {
        let payload: DescribedPlacePayload = serde_json::from_str(
            r#"{"placeName": "Cubbon Park", "latitude": 12.9763, "longitude": 77.5929}"#,
        )
        .unwrap();
        assert_eq!(payload.place_name, "Cubbon Park");
    }
}
