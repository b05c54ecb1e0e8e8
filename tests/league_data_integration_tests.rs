//! End-to-end tests of the league data core against a mock upstream.

use kickoff_corner::{
    Config, LeagueData, MatchdayState, UpstreamError, testing_utils::TestDataBuilder,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn config_for(server: &MockServer) -> Config {
    Config {
        api_domain: server.uri(),
        api_token: "integration-token".to_string(),
        http_timeout_seconds: 1,
        scorer_timeout_seconds: 2,
        backoff_step_seconds: 0,
        ..Config::default()
    }
}

fn json(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "application/json")
        .set_body_string(body)
}

async fn mount_json(server: &MockServer, route: &str, body: String, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("X-Auth-Token", "integration-token"))
        .respond_with(json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_bootstrap_warms_caches_with_one_call_each() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/competitions/PL",
        TestDataBuilder::competition_json(Some(26)),
        1,
    )
    .await;
    mount_json(
        &server,
        "/competitions/PL/teams",
        TestDataBuilder::teams_json(&[(57, "Arsenal"), (64, "Liverpool")]),
        1,
    )
    .await;
    mount_json(
        &server,
        "/competitions/PL/scorers",
        TestDataBuilder::scorers_json(&[(1, 64, 23, 13), (2, 57, 12, 9)]),
        1,
    )
    .await;

    let league = LeagueData::from_config(&config_for(&server)).unwrap();
    let report = league.bootstrap().await;

    assert_eq!(report.matchday, MatchdayState::resolved(26));
    assert_eq!(report.team_count, Some(2));
    assert_eq!(report.scorer_count, Some(2));

    // Served from the caches; the mocks verify one call each on drop
    assert_eq!(league.teams().await.unwrap().len(), 2);
    assert_eq!(league.scorers().await.unwrap().entries[0].rank, 1);
}

#[tokio::test]
async fn test_bootstrap_falls_back_when_competition_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/competitions/PL/teams",
        TestDataBuilder::teams_json(&[(57, "Arsenal")]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL/scorers"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let league = LeagueData::from_config(&config_for(&server)).unwrap();
    let report = league.bootstrap().await;

    assert_eq!(report.matchday, MatchdayState::fallback(25));
    assert!(report.teams_warmed());
    assert!(!report.scorers_warmed());
    assert_eq!(league.effective_matchday(None), 25);
}

#[tokio::test]
async fn test_timeouts_are_retried_up_to_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL"))
        .respond_with(
            json(TestDataBuilder::competition_json(Some(30))).set_delay(Duration::from_secs(3)),
        )
        .expect(3)
        .mount(&server)
        .await;
    mount_json(&server, "/competitions/PL/teams", TestDataBuilder::teams_json(&[]), 1).await;
    mount_json(&server, "/competitions/PL/scorers", TestDataBuilder::scorers_json(&[]), 1).await;

    let league = LeagueData::from_config(&config_for(&server)).unwrap();
    let report = league.bootstrap().await;

    assert!(report.matchday.is_fallback());
    assert!(report.teams_warmed());
}

#[tokio::test]
async fn test_listing_uses_override_and_replaces_index() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/competitions/PL/teams",
        TestDataBuilder::teams_json(&[(57, "Arsenal"), (64, "Liverpool")]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL/matches"))
        .and(query_param("matchday", "25"))
        .respond_with(json(TestDataBuilder::matches_json(
            25,
            &[(101, 57, 64), (102, 64, 57)],
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL/matches"))
        .and(query_param("matchday", "7"))
        .respond_with(json(TestDataBuilder::matches_json(7, &[(201, 57, 64)])))
        .expect(1)
        .mount(&server)
        .await;

    let league = LeagueData::from_config(&config_for(&server)).unwrap();

    let current = league.matchday_listing(None).await.unwrap();
    assert_eq!(current.matchday, 25);
    assert_eq!(current.matches.len(), 2);
    assert_eq!(current.matches[1].venue, "Liverpool Ground");
    assert!(league.match_by_id(101).is_some());

    let listing = league.matchday_listing(Some(7)).await.unwrap();
    assert_eq!(listing.matchday, 7);
    assert!(league.match_by_id(101).is_none());
    assert!(league.match_by_id(102).is_none());
    assert_eq!(
        league.match_by_id(201).map(|m| m.score_display()),
        Some("2 - 1".to_string())
    );
    assert_eq!(league.current_matchday().value, 25);
}

#[tokio::test]
async fn test_standings_served_from_cache_within_ttl() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/competitions/PL/standings",
        TestDataBuilder::standings_json(&[64, 65, 57]),
        1,
    )
    .await;

    let league = LeagueData::from_config(&config_for(&server)).unwrap();
    let first = league.standings().await.unwrap();
    let second = league.standings().await.unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.rows[0].team_id, 64);
    assert_eq!(first.rows[0].position, 1);
}

#[tokio::test]
async fn test_concurrent_standings_requests_share_one_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL/standings"))
        .respond_with(
            json(TestDataBuilder::standings_json(&[57, 64])).set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let league = Arc::new(LeagueData::from_config(&config_for(&server)).unwrap());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let league = Arc::clone(&league);
            tokio::spawn(async move { league.standings().await })
        })
        .collect();

    for handle in handles {
        let standings = handle.await.unwrap().unwrap();
        assert_eq!(standings.rows.len(), 2);
    }
}

#[tokio::test]
async fn test_standings_failure_surfaces_and_keeps_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/competitions/PL/standings"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&server)
        .await;

    let league = LeagueData::from_config(&config_for(&server)).unwrap();

    let err = league.standings().await.unwrap_err();
    assert!(matches!(err, UpstreamError::ServiceUnavailable { status: 503, .. }));
    assert!(league.standings_cache().last_known().await.is_none());

    // No negative caching: the next call reaches the upstream again
    assert!(league.standings().await.is_err());

    let context = league.page_context().await;
    assert!(context.degraded);
}
