//! Route construction for the Scoreboard Live API.
//!
//! A route is a server-defined path identifying one API operation. The
//! base URL is normalized at construction to end in exactly one slash,
//! so appending a route segment always yields a well-formed URL.

/// Builds full URLs for the server's API routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    base_url: String,
}

impl Routes {
    /// Create a route builder for a server base URL
    /// (e.g. `https://www.scoreboardlive.se`).
    pub fn new(base_url: impl AsRef<str>) -> Self {
        let trimmed = base_url.as_ref().trim_end_matches('/');
        Self {
            base_url: format!("{trimmed}/"),
        }
    }

    /// The normalized base URL, always ending in a single slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn route(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List all units on the server. Anonymous GET.
    pub fn get_units(&self) -> String {
        self.route("api/unit/get_units")
    }

    /// Register a device using an activation code.
    pub fn register_device(&self) -> String {
        self.route("api/device/register_device")
    }

    /// Check whether a credential is still valid.
    pub fn check_registration(&self) -> String {
        self.route("api/device/check_registration")
    }

    /// List the most recent tournaments for the credential's unit.
    pub fn get_tournaments(&self) -> String {
        self.route("api/unit/get_tournaments")
    }

    /// List the unit's courts.
    pub fn get_courts(&self) -> String {
        self.route("api/court/get_courts")
    }

    /// Create an on-the-fly match in a tournament.
    pub fn create_onthefly_match(&self) -> String {
        self.route("api/match/create_onthefly_match")
    }

    /// Assign a match to a court.
    pub fn assign_match_to_court(&self) -> String {
        self.route("api/court/assign_match")
    }

    /// Find matches by tournament match number.
    pub fn get_match_by_matchnumber(&self) -> String {
        self.route("api/match/get_match_by_matchnumber")
    }

    /// Find matches by content tag.
    pub fn get_match_by_tag(&self) -> String {
        self.route("api/match/get_match_by_tag")
    }

    /// Get the push-socket URL. Anonymous GET.
    pub fn get_socket_url(&self) -> String {
        self.route("api/socket/get_socket_url")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_single_trailing_slash() {
        assert_eq!(
            Routes::new("https://dosan.scoreboardlive.se").base_url(),
            "https://dosan.scoreboardlive.se/"
        );
        assert_eq!(
            Routes::new("https://dosan.scoreboardlive.se/").base_url(),
            "https://dosan.scoreboardlive.se/"
        );
        assert_eq!(
            Routes::new("https://dosan.scoreboardlive.se///").base_url(),
            "https://dosan.scoreboardlive.se/"
        );
    }

    #[test]
    fn test_route_paths() {
        let routes = Routes::new("http://localhost:8080");
        assert_eq!(
            routes.get_units(),
            "http://localhost:8080/api/unit/get_units"
        );
        assert_eq!(
            routes.register_device(),
            "http://localhost:8080/api/device/register_device"
        );
        assert_eq!(
            routes.check_registration(),
            "http://localhost:8080/api/device/check_registration"
        );
        assert_eq!(
            routes.get_socket_url(),
            "http://localhost:8080/api/socket/get_socket_url"
        );
    }
}
