//! reqwest implementation of [`LeagueApi`].

use async_trait::async_trait;
use chrono::NaiveDate;
use league_core::error::ApiError;
use league_core::traits::LeagueApi;
use league_core::types::{
    Credentials, Holdings, Leaderboard, League, LeagueId, LeagueListing, Matchup, Schedule, Side,
    Stock, StockInfo, TokenPair, TradeReceipt, TradeRequest,
};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::response::error_from_body;

/// API connection settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000", Duration::from_secs(30))
    }
}

/// Join and set-start-date wrap the league in `{"message", "league"}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum LeagueEnvelope {
    Wrapped { league: League },
    Bare(League),
}

impl LeagueEnvelope {
    fn into_league(self) -> League {
        match self {
            LeagueEnvelope::Wrapped { league } | LeagueEnvelope::Bare(league) => league,
        }
    }
}

#[derive(Deserialize)]
struct RenameResponse {
    #[serde(default)]
    username: Option<String>,
}

#[derive(Serialize)]
struct UsernameBody<'a> {
    username: &'a str,
}

#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct JoinBody<'a> {
    league_id: &'a LeagueId,
}

#[derive(Serialize)]
struct StartDateBody {
    start_date: String,
}

/// Client for the league REST API.
pub struct HttpApi {
    config: ApiConfig,
    client: Client,
}

impl HttpApi {
    /// Create a new API client.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        if config.base_url.trim().is_empty() {
            return Err(ApiError::Configuration("api base_url is empty".into()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Configuration(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url(), path);
        Self::with_token(self.client.request(method, url), token)
    }

    /// `segments` appended to the base URL, each percent-encoded, with a trailing slash.
    fn segment_url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(self.base_url()).map_err(|e| ApiError::Configuration(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Configuration(format!("{} cannot be a base URL", self.base_url()))
            })?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn with_token(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and return the successful body, mapping failures onto [`ApiError`].
    async fn execute(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let resp = builder.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            ApiError::Network(e.to_string())
        })?;

        let status = resp.status();
        let url = resp.url().path().to_string();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            debug!("{} {} -> {}", status.as_u16(), url, text);
            return Err(error_from_body(status, &text));
        }

        debug!("{} {}", status.as_u16(), url);
        Ok(text)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let text = self.execute(builder).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl LeagueApi for HttpApi {
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let req = self
            .request(Method::POST, "/api/token/", None)
            .json(credentials);

        // A 401 here means bad credentials, not an expired session
        match self.fetch(req).await {
            Err(ApiError::Unauthorized { message }) => Err(ApiError::Rejected {
                status: StatusCode::UNAUTHORIZED.as_u16(),
                message,
            }),
            other => other,
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, "/api/user/register/", None)
            .json(credentials);
        self.execute(req).await.map(|_| ())
    }

    async fn update_username(&self, token: &str, username: &str) -> Result<String, ApiError> {
        let req = self
            .request(Method::PUT, "/api/user/update-username/", Some(token))
            .json(&UsernameBody { username });
        let text = self.execute(req).await?;
        let stored = serde_json::from_str::<RenameResponse>(&text)
            .ok()
            .and_then(|r| r.username)
            .unwrap_or_else(|| username.to_string());
        Ok(stored)
    }

    async fn list_stocks(&self) -> Result<Vec<Stock>, ApiError> {
        self.fetch(self.request(Method::GET, "/api/stocks/", None))
            .await
    }

    async fn stock_info(
        &self,
        token: &str,
        league: &LeagueId,
        ticker: &str,
    ) -> Result<StockInfo, ApiError> {
        let league = league.to_string();
        let url = self.segment_url(&["api", "stocks", "info", &league, ticker])?;
        self.fetch(Self::with_token(self.client.get(url), Some(token)))
            .await
    }

    async fn trade(
        &self,
        token: &str,
        side: Side,
        request: &TradeRequest,
    ) -> Result<TradeReceipt, ApiError> {
        let path = format!("/api/stocks/{}/", side);
        debug!(
            "{} {} x{} in league {}",
            side, request.ticker, request.shares, request.league_id
        );
        self.fetch(self.request(Method::POST, &path, Some(token)).json(request))
            .await
    }

    async fn owned_stocks(&self, token: &str, league: &LeagueId) -> Result<Holdings, ApiError> {
        let path = format!("/api/owned-stocks/{}/", league);
        self.fetch(self.request(Method::GET, &path, Some(token)))
            .await
    }

    async fn list_leagues(&self, token: &str) -> Result<LeagueListing, ApiError> {
        self.fetch(self.request(Method::GET, "/api/leagues/", Some(token)))
            .await
    }

    async fn create_league(&self, token: &str, name: &str) -> Result<League, ApiError> {
        let req = self
            .request(Method::POST, "/api/leagues/", Some(token))
            .json(&NameBody { name });
        self.fetch::<LeagueEnvelope>(req)
            .await
            .map(LeagueEnvelope::into_league)
    }

    async fn join_league(&self, token: &str, league: &LeagueId) -> Result<League, ApiError> {
        let req = self
            .request(Method::POST, "/api/leagues/join/", Some(token))
            .json(&JoinBody { league_id: league });
        self.fetch::<LeagueEnvelope>(req)
            .await
            .map(LeagueEnvelope::into_league)
    }

    async fn set_start_date(
        &self,
        token: &str,
        league: &LeagueId,
        start_date: NaiveDate,
    ) -> Result<League, ApiError> {
        let path = format!("/api/leagues/{}/set-start-date/", league);
        let body = StartDateBody {
            start_date: start_date.format("%Y-%m-%d").to_string(),
        };
        let req = self.request(Method::PUT, &path, Some(token)).json(&body);
        self.fetch::<LeagueEnvelope>(req)
            .await
            .map(LeagueEnvelope::into_league)
    }

    async fn delete_league(&self, token: &str, league: &LeagueId) -> Result<(), ApiError> {
        let path = format!("/api/leagues/{}/delete/", league);
        self.execute(self.request(Method::DELETE, &path, Some(token)))
            .await
            .map(|_| ())
    }

    async fn leaderboard(&self, token: &str, league: &LeagueId) -> Result<Leaderboard, ApiError> {
        let path = format!("/api/leagues/{}/leaderboard/", league);
        self.fetch(self.request(Method::GET, &path, Some(token)))
            .await
    }

    async fn schedule(&self, token: &str, league: &LeagueId) -> Result<Schedule, ApiError> {
        let path = format!("/api/leagues/{}/schedule/", league);
        self.fetch(self.request(Method::GET, &path, Some(token)))
            .await
    }

    async fn matchup(&self, token: &str, league: &LeagueId) -> Result<Matchup, ApiError> {
        let path = format!("/api/leagues/{}/matchup/", league);
        self.fetch(self.request(Method::GET, &path, Some(token)))
            .await
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const LEAGUE: &str = "7f1c2a52-0b8e-4a5e-9c1d-3f6e2b4a9d10";

    fn api(server: &mockito::Server) -> HttpApi {
        HttpApi::new(ApiConfig::new(server.url(), Duration::from_secs(5))).unwrap()
    }

    fn league_id() -> LeagueId {
        LEAGUE.parse().unwrap()
    }

    fn league_json(count: u32) -> serde_json::Value {
        json!({
            "league_id": LEAGUE,
            "name": "Friday Traders",
            "start_date": null,
            "end_date": null,
            "participant_count": count,
            "can_set_start_date": false
        })
    }

    #[tokio::test]
    async fn test_list_stocks_without_auth() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/api/stocks/")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[{"ticker": "AAA", "name": "Alpha", "start_price": "10.00", "current_price": 12.5},
                    {"ticker": "BBB", "name": "Beta", "start_price": null, "current_price": "abc"}]"#,
            )
            .create_async()
            .await;

        let stocks = api(&server).list_stocks().await.unwrap();
        m.assert_async().await;
        assert_eq!(stocks.len(), 2);
        assert_eq!(stocks[0].current_price, dec!(12.5));
        assert_eq!(stocks[1].start_price, dec!(0));
        assert_eq!(stocks[1].current_price, dec!(0));
    }

    #[tokio::test]
    async fn test_buy_sends_bearer_and_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/stocks/buy/")
            .match_header("authorization", "Bearer tok")
            .match_body(Matcher::Json(json!({
                "league_id": LEAGUE, "ticker": "AAA", "shares": 5.0
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"message": "Successfully purchased 5 shares of AAA",
                    "new_balance": 9937.5, "total_shares": 5, "cost": 62.5}"#,
            )
            .create_async()
            .await;

        let receipt = api(&server)
            .buy("tok", &TradeRequest::new(league_id(), "AAA", dec!(5)))
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(receipt.new_balance, dec!(9937.5));
        assert_eq!(receipt.shares_held, dec!(5));
        assert_eq!(receipt.amount, dec!(62.5));
    }

    #[tokio::test]
    async fn test_stock_info_encodes_ticker() {
        let mut server = mockito::Server::new_async().await;
        let path = format!("/api/stocks/info/{}/BRK%2FB%3F/", LEAGUE);
        let m = server
            .mock("GET", path.as_str())
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"balance": 9000.0, "owned_shares": 2.0, "current_price": "410.5"}"#)
            .create_async()
            .await;

        let info = api(&server)
            .stock_info("tok", &league_id(), "BRK/B?")
            .await
            .unwrap();
        assert_eq!(info.owned_shares, dec!(2));
        assert_eq!(info.current_price, dec!(410.5));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_sell_rejection_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/stocks/sell/")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "You only own 2 shares of AAA"}"#)
            .create_async()
            .await;

        let err = api(&server)
            .sell("tok", &TradeRequest::new(league_id(), "AAA", dec!(3)))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "You only own 2 shares of AAA");
        assert!(!err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", format!("/api/owned-stocks/{}/", LEAGUE).as_str())
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"detail": "Given token not valid for any token type", "code": "token_not_valid"}"#,
            )
            .create_async()
            .await;

        let err = api(&server)
            .owned_stocks("stale", &league_id())
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_bad_login_is_not_session_expiry() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/token/")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail": "No active account found with the given credentials"}"#)
            .create_async()
            .await;

        let err = api(&server)
            .obtain_token(&Credentials::new("alice", "wrong-password"))
            .await
            .unwrap_err();
        assert!(!err.is_unauthorized());
        assert_eq!(
            err.user_message(),
            "No active account found with the given credentials"
        );
    }

    #[tokio::test]
    async fn test_join_unwraps_league() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/api/leagues/join/")
            .match_body(Matcher::Json(json!({ "league_id": LEAGUE })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"message": "Successfully joined league", "league": league_json(8)})
                    .to_string(),
            )
            .create_async()
            .await;

        let league = api(&server).join_league("tok", &league_id()).await.unwrap();
        m.assert_async().await;
        assert_eq!(league.league_id, league_id());
        assert!(league.is_full());
    }

    #[tokio::test]
    async fn test_create_league_bare_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/leagues/")
            .match_body(Matcher::Json(json!({ "name": "Friday Traders" })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(league_json(1).to_string())
            .create_async()
            .await;

        let league = api(&server)
            .create_league("tok", "Friday Traders")
            .await
            .unwrap();
        assert_eq!(league.participant_count, 1);
    }

    #[tokio::test]
    async fn test_create_league_validation() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/leagues/")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"errors": {"name": ["This field may not be blank."]}}"#)
            .create_async()
            .await;

        let err = api(&server).create_league("tok", " ").await.unwrap_err();
        assert_eq!(err.user_message(), "name: This field may not be blank.");
    }

    #[tokio::test]
    async fn test_set_start_date_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("PUT", format!("/api/leagues/{}/set-start-date/", LEAGUE).as_str())
            .match_body(Matcher::Json(json!({ "start_date": "2026-10-26" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"message": "Start date set successfully", "schedule_info": "",
                       "league": league_json(8)})
                .to_string(),
            )
            .create_async()
            .await;

        let date = NaiveDate::from_ymd_opt(2026, 10, 26).unwrap();
        api(&server)
            .set_start_date("tok", &league_id(), date)
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_rename_falls_back_to_requested_name() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/api/user/update-username/")
            .match_body(Matcher::Json(json!({ "username": "bob" })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Username updated successfully"}"#)
            .create_async()
            .await;

        let name = api(&server).update_username("tok", "bob").await.unwrap();
        assert_eq!(name, "bob");
    }

    #[tokio::test]
    async fn test_delete_ignores_body() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("DELETE", format!("/api/leagues/{}/delete/", LEAGUE).as_str())
            .with_status(204)
            .create_async()
            .await;

        api(&server).delete_league("tok", &league_id()).await.unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_garbage_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/leagues/")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = api(&server).list_leagues("tok").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let api = HttpApi::new(ApiConfig::new(
            "http://127.0.0.1:9",
            Duration::from_secs(2),
        ))
        .unwrap();
        let err = api.list_stocks().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.user_message(), "Network error. Please try again.");
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let result = HttpApi::new(ApiConfig::new("  ", Duration::from_secs(1)));
        assert!(matches!(result, Err(ApiError::Configuration(_))));
    }
}
