/// Navigation context observed when the user lands back on the map.
///
/// It's derived from the query of the landing location, e.g.
/// `from=service&reserved=true` after confirming a reservation on a
/// service detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ReturnNavigation {
    from: Option<String>,
    reserved: bool,
}

impl ReturnNavigation {
    /// Creates a navigation context from its raw parts.
    #[inline]
    pub fn new(from: Option<String>, reserved: bool) -> Self {
        Self { from, reserved }
    }

    /// Parses a query string. A leading `?` is accepted and unknown
    /// parameters are ignored.
    pub fn from_query(query: &str) -> Self {
        let query = query.trim().trim_start_matches('?');
        let mut nav = Self::default();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "from" => nav.from = Some(value.to_owned()),
                "reserved" => nav.reserved = value == "true",
                _ => {}
            }
        }
        nav
    }

    /// The page the user navigated back from, if any.
    #[inline]
    pub fn from(&self) -> Option<&str> {
        self.from.as_deref()
    }

    /// Returns `true` if the user came back from a service detail page.
    #[inline]
    pub fn came_from_service(&self) -> bool {
        self.from.as_deref() == Some("service")
    }

    /// Returns `true` if a reservation was made before navigating back.
    #[inline]
    pub fn reserved(&self) -> bool {
        self.reserved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query() {
        let nav = ReturnNavigation::from_query("?from=service&reserved=true");
        assert!(nav.came_from_service());
        assert!(nav.reserved());

        let nav = ReturnNavigation::from_query("from=event&reserved=1&x");
        assert_eq!(nav.from(), Some("event"));
        assert!(!nav.came_from_service());
        assert!(!nav.reserved());

        assert_eq!(ReturnNavigation::from_query(""), ReturnNavigation::default());
    }
}
