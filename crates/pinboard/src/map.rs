//! Marker emphasis driven by the highlight signal.

use pinboard_model::{HighlightSignal, MapMarker, MarkerCategory};

/// How a marker should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerStyle {
    /// Fill color as a CSS hex string.
    pub color: &'static str,
    /// Diameter in pixels.
    pub size_px: u32,
    /// CSS border.
    pub border: &'static str,
    /// CSS box shadow.
    pub shadow: &'static str,
    /// Whether the marker pulses.
    pub pulse: bool,
}

impl MarkerStyle {
    /// Style of a marker in the given category.
    pub fn new(category: MarkerCategory, emphasized: bool) -> Self {
        if emphasized {
            Self {
                color: category.color(),
                size_px: 32,
                border: "3px solid #fff",
                shadow: "0 4px 16px rgba(16, 185, 129, 0.6)",
                pulse: true,
            }
        } else {
            Self {
                color: category.color(),
                size_px: 24,
                border: "2px solid rgba(255, 255, 255, 0.6)",
                shadow: "0 2px 8px rgba(0, 0, 0, 0.3)",
                pulse: false,
            }
        }
    }
}

/// A marker together with how it should be drawn right now.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyledMarker<'a> {
    /// The marker.
    pub marker: &'a MapMarker,
    /// Whether the marker is in the current highlight signal.
    pub emphasized: bool,
    /// Resulting style.
    pub style: MarkerStyle,
}

/// The markers on the map and the latest highlight signal.
#[derive(Clone, Debug, Default)]
pub struct MarkerBoard {
    markers: Vec<MapMarker>,
    highlight: HighlightSignal,
}

impl MarkerBoard {
    /// Creates a board with nothing emphasized.
    #[inline]
    pub fn new(markers: Vec<MapMarker>) -> Self {
        Self {
            markers,
            highlight: Default::default(),
        }
    }

    /// Replaces the highlight signal. Returns `true` if it changed.
    pub fn set_highlight(&mut self, signal: HighlightSignal) -> bool {
        if self.highlight == signal {
            return false;
        }
        let unknown = signal
            .iter()
            .filter(|id| !self.markers.iter().any(|m| m.id == *id))
            .count();
        if unknown > 0 {
            debug!("{unknown} highlighted ids have no marker");
        }
        self.highlight = signal;
        true
    }

    /// The latest highlight signal.
    #[inline]
    pub fn highlight(&self) -> &HighlightSignal {
        &self.highlight
    }

    /// All markers.
    #[inline]
    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// Every marker with its current style.
    pub fn styled(&self) -> impl Iterator<Item = StyledMarker<'_>> {
        self.markers.iter().map(|marker| {
            let emphasized = self.highlight.contains(&marker.id);
            StyledMarker {
                marker,
                emphasized,
                style: MarkerStyle::new(marker.category, emphasized),
            }
        })
    }

    /// Markers in the current highlight signal.
    pub fn emphasized(&self) -> impl Iterator<Item = &MapMarker> {
        self.markers
            .iter()
            .filter(|marker| self.highlight.contains(&marker.id))
    }
}

#[cfg(test)]
mod tests {
    use pinboard_model::LatLng;

    use super::*;

    fn marker(id: &str, category: MarkerCategory) -> MapMarker {
        MapMarker {
            id: id.to_owned(),
            title: id.to_owned(),
            position: LatLng {
                lat: -40.15,
                lng: -71.35,
            },
            category,
        }
    }

    #[test]
    fn test_emphasis_follows_signal() {
        let mut board = MarkerBoard::new(vec![
            marker("plaza-market", MarkerCategory::Event),
            marker("ana-cook", MarkerCategory::Service),
            marker("maria-babysitter", MarkerCategory::Service),
        ]);
        assert_eq!(board.emphasized().count(), 0);

        assert!(board.set_highlight(["ana-cook", "nobody"].into_iter().collect()));
        let styled: Vec<_> = board.styled().collect();
        assert!(!styled[0].emphasized);
        assert_eq!(styled[0].style.size_px, 24);
        assert_eq!(styled[0].style.color, "#A855F7");
        assert!(styled[1].emphasized);
        assert_eq!(styled[1].style.size_px, 32);
        assert!(styled[1].style.pulse);
        assert!(!styled[2].emphasized);

        // Replaced wholesale, not merged.
        assert!(board.set_highlight(["maria-babysitter"].into_iter().collect()));
        let ids: Vec<_> = board.emphasized().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["maria-babysitter"]);
        assert!(!board.set_highlight(["maria-babysitter"].into_iter().collect()));
    }
}
