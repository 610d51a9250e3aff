use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{Repo, UserEvent, UserProfile};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("hubdash/", env!("CARGO_PKG_VERSION"));

/// Single page, the API maximum. No pagination beyond it.
const PAGE_SIZE: u32 = 100;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the GitHub REST API.
///
/// Unauthenticated, so default rate limits apply. The base URL is
/// swappable for GitHub Enterprise installs and for tests against a mock
/// server. Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: Client,
    base_url: String,
}

impl GitHubClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// GET /users/{username} — raw profile for the dashboard card.
    pub async fn user(&self, username: &str) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.base_url, username);
        let response = self.get_for_user(&url, username).await?;
        Ok(response.json().await?)
    }

    /// GET /users/{username}/repos — first page of up to 100 repositories.
    pub async fn repos(&self, username: &str) -> Result<Vec<Repo>> {
        let url = format!(
            "{}/users/{}/repos?per_page={}",
            self.base_url, username, PAGE_SIZE
        );
        let response = self.get_for_user(&url, username).await?;
        let repos: Vec<Repo> = response.json().await?;
        debug!(username, count = repos.len(), "fetched repository listing");
        Ok(repos)
    }

    /// GET {languages_url} — one repository's language byte breakdown.
    pub async fn repo_languages(&self, languages_url: &str) -> Result<HashMap<String, u64>> {
        let response = self.http.get(languages_url).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }

    /// GET /users/{username}/events — first page of up to 100 recent events.
    pub async fn events(&self, username: &str) -> Result<Vec<UserEvent>> {
        let url = format!(
            "{}/users/{}/events?per_page={}",
            self.base_url, username, PAGE_SIZE
        );
        let response = self.get_for_user(&url, username).await?;
        Ok(response.json().await?)
    }

    /// Issue a per-user GET, turning a 404 into `UserNotFound`.
    async fn get_for_user(&self, url: &str, username: &str) -> Result<Response> {
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::UserNotFound(username.to_string()));
        }
        check_status(response)
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(AppError::UpstreamStatus {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::stats::aggregate_languages;

    async fn setup() -> (MockServer, GitHubClient) {
        let server = MockServer::start().await;
        let client = GitHubClient::new(server.uri()).unwrap();
        (server, client)
    }

    #[tokio::test]
    async fn fetches_user_profile() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "name": "The Octocat",
                "avatar_url": "https://avatars.example.test/u/1"
            })))
            .mount(&server)
            .await;

        let profile = client.user("octocat").await.unwrap();
        assert_eq!(profile.login, "octocat");
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
    }

    #[tokio::test]
    async fn missing_user_maps_to_not_found() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "Not Found"
            })))
            .mount(&server)
            .await;

        match client.user("ghost").await {
            Err(AppError::UserNotFound(login)) => assert_eq!(login, "ghost"),
            other => panic!("expected UserNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_status_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        match client.user("octocat").await {
            Err(AppError::UpstreamStatus { status, .. }) => assert_eq!(status, 503),
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn lists_repos_with_a_full_page() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "name": "site",
                    "fork": false,
                    "languages_url": format!("{}/repos/octocat/site/languages", server.uri())
                },
                {
                    "name": "mirror",
                    "fork": true,
                    "languages_url": format!("{}/repos/octocat/mirror/languages", server.uri())
                }
            ])))
            .mount(&server)
            .await;

        let repos = client.repos("octocat").await.unwrap();
        assert_eq!(repos.len(), 2);
        assert!(!repos[0].fork);
        assert!(repos[1].fork);
    }

    #[tokio::test]
    async fn aggregates_languages_over_the_wire_skipping_failures() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/site/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "JavaScript": 100, "CSS": 40
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/octocat/tool/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "JavaScript": 50, "Go": 20
            })))
            .mount(&server)
            .await;

        // this repository's endpoint is broken; its bytes must simply be missing
        Mock::given(method("GET"))
            .and(path("/repos/octocat/flaky/languages"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        // the fork's endpoint must never be queried at all
        Mock::given(method("GET"))
            .and(path("/repos/octocat/mirror/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "JavaScript": 9999
            })))
            .expect(0)
            .mount(&server)
            .await;

        let mk_repo = |name: &str, fork: bool| Repo {
            name: name.to_string(),
            fork,
            languages_url: format!("{}/repos/octocat/{}/languages", server.uri(), name),
        };
        let repos = vec![
            mk_repo("site", false),
            mk_repo("mirror", true),
            mk_repo("flaky", false),
            mk_repo("tool", false),
        ];

        let client = &client;
        let stats = aggregate_languages(&repos, |repo| async move {
            client.repo_languages(&repo.languages_url).await
        })
        .await;

        assert_eq!(stats.totals.get("JavaScript"), Some(&150));
        assert_eq!(stats.totals.get("CSS"), Some(&40));
        assert_eq!(stats.totals.get("Go"), Some(&20));
        assert_eq!(stats.failures.len(), 1);
        assert_eq!(stats.failures[0].repo, "flaky");
    }

    #[tokio::test]
    async fn parses_mixed_event_kinds() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/users/octocat/events"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "type": "PushEvent",
                    "created_at": "2024-03-10T14:30:00Z",
                    "payload": {
                        "commits": [
                            { "sha": "a".repeat(40), "message": "fix" },
                            { "sha": "b".repeat(40), "message": "feat" }
                        ]
                    }
                },
                {
                    "type": "WatchEvent",
                    "created_at": "2024-03-09T10:00:00Z",
                    "payload": { "action": "started" }
                }
            ])))
            .mount(&server)
            .await;

        let events = client.events("octocat").await.unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_push());
        assert_eq!(events[0].commit_count(), 2);
        assert!(!events[1].is_push());
        assert_eq!(events[1].commit_count(), 0);
    }
}
