//! Path and URL building utilities for upstream endpoints

/// Joins the API base URL and an endpoint path.
///
/// # Example
/// ```
/// use kickoff_corner::data_fetcher::api::build_url;
///
/// let url = build_url("https://api.example.com/v4/", "/competitions/PL");
/// assert_eq!(url, "https://api.example.com/v4/competitions/PL");
/// ```
pub fn build_url(api_domain: &str, path: &str) -> String {
    format!(
        "{}/{}",
        api_domain.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Competition metadata, which carries the current matchday.
///
/// # Example
/// ```
/// use kickoff_corner::data_fetcher::api::competition_path;
///
/// assert_eq!(competition_path("PL"), "/competitions/PL");
/// ```
pub fn competition_path(competition: &str) -> String {
    format!("/competitions/{competition}")
}

/// Full team roster of the competition.
pub fn teams_path(competition: &str) -> String {
    format!("/competitions/{competition}/teams")
}

pub fn standings_path(competition: &str) -> String {
    format!("/competitions/{competition}/standings")
}

pub fn scorers_path(competition: &str) -> String {
    format!("/competitions/{competition}/scorers")
}

/// Fixtures of a single matchday.
///
/// # Example
/// ```
/// use kickoff_corner::data_fetcher::api::matches_path;
///
/// assert_eq!(matches_path("PL", 26), "/competitions/PL/matches?matchday=26");
/// ```
pub fn matches_path(competition: &str, matchday: u32) -> String {
    format!("/competitions/{competition}/matches?matchday={matchday}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_handles_slashes() {
        assert_eq!(
            build_url("http://127.0.0.1:8080", "/competitions/PL/teams"),
            "http://127.0.0.1:8080/competitions/PL/teams"
        );
        assert_eq!(
            build_url("http://127.0.0.1:8080/", "competitions/PL"),
            "http://127.0.0.1:8080/competitions/PL"
        );
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(teams_path("PL"), "/competitions/PL/teams");
        assert_eq!(standings_path("PL"), "/competitions/PL/standings");
        assert_eq!(scorers_path("BL1"), "/competitions/BL1/scorers");
    }
}
