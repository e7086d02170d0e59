//! Static events and services bundled with the program.

use std::error::Error;
use std::fmt::{self, Display};

use pinboard_model::{LatLng, MapMarker, MarkerCategory};
use serde::Deserialize;

const EVENTS_JSON: &str = include_str!("../data/events.json");
const SERVICES_JSON: &str = include_str!("../data/services.json");

/// A named place.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Human readable place name.
    pub name: String,
}

impl Location {
    #[inline]
    fn position(&self) -> LatLng {
        LatLng {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// Price of an event.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Pricing {
    /// Total price in ARS.
    pub total: u64,
}

/// Host of an event.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Host {
    /// Display name.
    pub name: String,
}

/// An event pinned on the map.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct EventRecord {
    /// Identifier, also used as the marker id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Category, controls the marker color.
    #[serde(rename = "type")]
    pub category: MarkerCategory,
    /// Where it happens.
    pub location: Location,
    /// Start date as written in the data.
    pub date: String,
    /// Price.
    pub pricing: Pricing,
    /// Who organizes it.
    pub host: Host,
}

/// A past job listed on a provider's profile.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct PastJob {
    /// What was done.
    pub title: String,
    /// Rating out of five.
    pub rating: u8,
}

/// A person offering a service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecord {
    /// Identifier, matches recommendation card ids.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Kind of service, e.g. "Home Cook".
    #[serde(rename = "type")]
    pub kind: String,
    /// Where the provider is based.
    pub location: Location,
    /// Linked accounts, if the provider has verified any.
    #[serde(default)]
    pub verified_accounts: Option<Vec<String>>,
    /// Jobs done through the marketplace.
    #[serde(default)]
    pub past_jobs: Vec<PastJob>,
}

/// The bundled data could not be parsed.
#[derive(Debug)]
pub struct CatalogError {
    what: &'static str,
    inner: serde_json::Error,
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {} data: {}", self.what, self.inner)
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.inner)
    }
}

/// Every event and service shown on the map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    /// Events, in data order.
    pub events: Vec<EventRecord>,
    /// Services, in data order.
    pub services: Vec<ServiceRecord>,
}

impl Catalog {
    /// Loads the data bundled with the program.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(EVENTS_JSON, SERVICES_JSON)
    }

    /// Parses events and services from JSON arrays.
    pub fn from_json(events: &str, services: &str) -> Result<Self, CatalogError> {
        let events = serde_json::from_str(events).map_err(|inner| CatalogError {
            what: "events",
            inner,
        })?;
        let services =
            serde_json::from_str(services).map_err(|inner| CatalogError {
                what: "services",
                inner,
            })?;
        Ok(Self { events, services })
    }

    /// Looks up a service by id.
    pub fn service(&self, id: &str) -> Option<&ServiceRecord> {
        self.services.iter().find(|service| service.id == id)
    }

    /// Builds the markers for the map: events first, then services.
    pub fn markers(&self) -> Vec<MapMarker> {
        let events = self.events.iter().map(|event| MapMarker {
            id: event.id.clone(),
            title: event.title.clone(),
            position: event.location.position(),
            category: event.category,
        });
        let services = self.services.iter().map(|service| MapMarker {
            id: service.id.clone(),
            title: format!("{} ({})", service.name, service.kind),
            position: service.location.position(),
            category: MarkerCategory::Service,
        });
        events.chain(services).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let catalog = Catalog::bundled().unwrap();
        assert_eq!(catalog.events.len(), 5);

        let markers = catalog.markers();
        assert_eq!(markers.len(), catalog.events.len() + catalog.services.len());
        for id in ["ana-cook", "carlos-cook", "lucia-cook", "maria-babysitter"] {
            let marker = markers.iter().find(|m| m.id == id).unwrap();
            assert_eq!(marker.category, MarkerCategory::Service);
        }
    }

    #[test]
    fn test_optional_fields() {
        let catalog = Catalog::bundled().unwrap();
        let carlos = catalog.service("carlos-cook").unwrap();
        assert_eq!(carlos.verified_accounts, None);
        assert_eq!(carlos.past_jobs.len(), 1);

        let lucia = catalog.service("lucia-cook").unwrap();
        assert!(lucia.past_jobs.is_empty());
        assert_eq!(lucia.verified_accounts.as_deref(), Some(&["lens".to_owned()][..]));
    }

    #[test]
    fn test_invalid_data() {
        let err = Catalog::from_json("[]", "{").unwrap_err();
        assert!(err.to_string().starts_with("invalid services data"));
    }
}
