//! Structured field values: Entity and Location.
//!
//! Structured fields arrive from extraction as parsed objects and are
//! stored as JSON text. Legacy rows carry free text in the same columns,
//! so parsing is a tolerant one-time sniff at the store boundary: a value
//! that looks like JSON but fails to parse, or never looked like JSON at
//! all, stays `Unparsed` and is treated as opaque text everywhere else.

use serde::{Deserialize, Serialize};

/// Organisation role in a booking. Unknown role text maps to `Unset`
/// rather than failing the whole entity parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityType {
    EndClient,
    EventAgency,
    Medientechnik,
    #[default]
    Unset,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::EndClient => "End-Client",
            EntityType::EventAgency => "Event Agency",
            EntityType::Medientechnik => "Medientechnik",
            EntityType::Unset => "",
        }
    }
}

impl From<String> for EntityType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "End-Client" => EntityType::EndClient,
            "Event Agency" => EntityType::EventAgency,
            "Medientechnik" => EntityType::Medientechnik,
            _ => EntityType::Unset,
        }
    }
}

impl From<EntityType> for String {
    fn from(t: EntityType) -> Self {
        t.as_str().to_string()
    }
}

/// A contact person inside an involved organisation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// An involved party: end client, agency, or technical vendor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Entity {
    #[serde(default)]
    pub organisation: String,
    #[serde(default, rename = "Type")]
    pub entity_type: EntityType,
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// A physical or virtual venue. `Venue == "Online"` plus a link denotes
/// a virtual location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Location {
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub link: String,
}

impl Location {
    pub fn is_virtual(&self) -> bool {
        self.venue == "Online" && !self.link.trim().is_empty()
    }
}

/// A structured field value, decided once at the store boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredValue {
    /// Legacy or non-JSON text, carried through opaquely.
    Unparsed(String),
    Entity(Entity),
    Location(Location),
}

impl StructuredValue {
    /// Sniff an Event_Entities-shaped value. Extraction emits a single
    /// object, older rows sometimes carry an array; the first element
    /// stands for the whole list in that case.
    pub fn sniff_entity(text: &str) -> Self {
        match try_json(text) {
            Some(json) if json.starts_with('[') => {
                match serde_json::from_str::<Vec<Entity>>(json) {
                    Ok(mut list) if !list.is_empty() => Self::Entity(list.remove(0)),
                    _ => Self::Unparsed(text.to_string()),
                }
            }
            Some(json) => match serde_json::from_str::<Entity>(json) {
                Ok(entity) => Self::Entity(entity),
                Err(_) => Self::Unparsed(text.to_string()),
            },
            None => Self::Unparsed(text.to_string()),
        }
    }

    /// Sniff a location-shaped value.
    pub fn sniff_location(text: &str) -> Self {
        match try_json(text) {
            Some(json) => match serde_json::from_str::<Location>(json) {
                Ok(location) => Self::Location(location),
                Err(_) => Self::Unparsed(text.to_string()),
            },
            None => Self::Unparsed(text.to_string()),
        }
    }

    /// Serialize back to the textual storage form.
    pub fn to_storage_text(&self) -> String {
        match self {
            Self::Unparsed(text) => text.clone(),
            Self::Entity(entity) => serde_json::to_string(entity).unwrap_or_default(),
            Self::Location(location) => serde_json::to_string(location).unwrap_or_default(),
        }
    }
}

/// The sender identity used by the upsert fallback lookup: the first
/// contact e-mail in the entity structure, else the organisation name,
/// case-folded. `None` when neither resolves.
pub fn sender_identity(entities_text: &str) -> Option<String> {
    let entity = match StructuredValue::sniff_entity(entities_text) {
        StructuredValue::Entity(e) => e,
        _ => return None,
    };

    if let Some(contact) = entity.contacts.iter().find(|c| !c.email.trim().is_empty()) {
        return Some(contact.email.trim().to_lowercase());
    }
    if !entity.organisation.trim().is_empty() {
        return Some(entity.organisation.trim().to_lowercase());
    }
    None
}

/// Return the trimmed text when it plausibly holds JSON (starts with
/// `{` or `[`), mirroring the tolerant parser on the dashboard side.
fn try_json(text: &str) -> Option<&str> {
    let s = text.trim();
    if s.starts_with('{') || s.starts_with('[') {
        Some(s)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACME: &str = r#"{"Organisation":"ACME GmbH","Type":"End-Client","Contacts":[{"Name":"Eva Berger","Email":"eva@acme.example","Phone":"+43 1 234"}]}"#;

    #[test]
    fn test_sniff_entity() {
        let v = StructuredValue::sniff_entity(ACME);
        match v {
            StructuredValue::Entity(e) => {
                assert_eq!(e.organisation, "ACME GmbH");
                assert_eq!(e.entity_type, EntityType::EndClient);
                assert_eq!(e.contacts[0].email, "eva@acme.example");
            }
            other => panic!("expected Entity, got {:?}", other),
        }
    }

    #[test]
    fn test_sniff_entity_array_takes_first() {
        let text = format!("[{}]", ACME);
        match StructuredValue::sniff_entity(&text) {
            StructuredValue::Entity(e) => assert_eq!(e.organisation, "ACME GmbH"),
            other => panic!("expected Entity, got {:?}", other),
        }
    }

    #[test]
    fn test_legacy_text_stays_unparsed() {
        let v = StructuredValue::sniff_entity("Herr Maier, ACME");
        assert_eq!(v, StructuredValue::Unparsed("Herr Maier, ACME".to_string()));
        // Looks like JSON but is not: still opaque, never a hard failure
        let v = StructuredValue::sniff_entity("{broken json");
        assert_eq!(v, StructuredValue::Unparsed("{broken json".to_string()));
    }

    #[test]
    fn test_unknown_entity_type_is_unset() {
        let v = StructuredValue::sniff_entity(r#"{"Organisation":"X","Type":"Caterer"}"#);
        match v {
            StructuredValue::Entity(e) => assert_eq!(e.entity_type, EntityType::Unset),
            other => panic!("expected Entity, got {:?}", other),
        }
    }

    #[test]
    fn test_sniff_location_and_virtual() {
        let v = StructuredValue::sniff_location(
            r#"{"Venue":"Online","Link":"https://meet.example/abc"}"#,
        );
        match v {
            StructuredValue::Location(l) => assert!(l.is_virtual()),
            other => panic!("expected Location, got {:?}", other),
        }

        let v = StructuredValue::sniff_location(
            r#"{"Venue":"Stadthalle","Room":"A","City":"Wien"}"#,
        );
        match v {
            StructuredValue::Location(l) => {
                assert!(!l.is_virtual());
                assert_eq!(l.city, "Wien");
            }
            other => panic!("expected Location, got {:?}", other),
        }
    }

    #[test]
    fn test_storage_round_trip() {
        let v = StructuredValue::sniff_entity(ACME);
        let text = v.to_storage_text();
        let again = StructuredValue::sniff_entity(&text);
        assert_eq!(v, again);

        let opaque = StructuredValue::sniff_entity("plain note");
        assert_eq!(opaque.to_storage_text(), "plain note");
    }

    #[test]
    fn test_sender_identity_prefers_email() {
        assert_eq!(
            sender_identity(ACME),
            Some("eva@acme.example".to_string())
        );
    }

    #[test]
    fn test_sender_identity_falls_back_to_organisation() {
        let text = r#"{"Organisation":"ACME GmbH","Contacts":[{"Name":"Eva Berger"}]}"#;
        assert_eq!(sender_identity(text), Some("acme gmbh".to_string()));
    }

    #[test]
    fn test_sender_identity_unresolved() {
        assert_eq!(sender_identity(""), None);
        assert_eq!(sender_identity("Herr Maier"), None);
        assert_eq!(sender_identity(r#"{"Contacts":[]}"#), None);
    }
}
