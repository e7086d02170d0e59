use serde::{Deserialize, Serialize};

/// A geographic position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Visual category of a marker, controlling its color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerCategory {
    /// Things to do.
    Activity,
    /// Rides and transfers.
    Transport,
    /// Scheduled gatherings.
    Event,
    /// Places to stay or work.
    Space,
    /// Jobs and gigs.
    Opportunity,
    /// People offering services.
    Service,
}

impl MarkerCategory {
    /// Categories shown in the map legend, in display order.
    pub const LEGEND: [MarkerCategory; 5] = [
        MarkerCategory::Activity,
        MarkerCategory::Transport,
        MarkerCategory::Event,
        MarkerCategory::Space,
        MarkerCategory::Opportunity,
    ];

    /// Fill color as a CSS hex string.
    pub fn color(self) -> &'static str {
        match self {
            MarkerCategory::Activity => "#F97316",
            MarkerCategory::Transport => "#3B82F6",
            MarkerCategory::Event => "#A855F7",
            MarkerCategory::Space => "#EC4899",
            MarkerCategory::Opportunity => "#EAB308",
            MarkerCategory::Service => "#10b981",
        }
    }

    /// Lowercase name as used in the bundled data.
    pub fn as_str(self) -> &'static str {
        match self {
            MarkerCategory::Activity => "activity",
            MarkerCategory::Transport => "transport",
            MarkerCategory::Event => "event",
            MarkerCategory::Space => "space",
            MarkerCategory::Opportunity => "opportunity",
            MarkerCategory::Service => "service",
        }
    }
}

/// A point marker handed to the map display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    /// Opaque identifier, matched against the highlight signal.
    pub id: String,
    /// Label shown next to the marker.
    pub title: String,
    /// Where the marker is pinned.
    pub position: LatLng,
    /// Visual category.
    pub category: MarkerCategory,
}
