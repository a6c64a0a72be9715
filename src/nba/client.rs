use std::time::{Duration, Instant};

use log::debug;
use serde_json::Value;

use crate::nba::error::{Error, Result};

pub const NBA_BASE_URL: &str = "https://stats.nba.com/stats";

/// Transport used by every endpoint. One call is one blocking round trip;
/// failures come back untouched so callers see exactly what went wrong.
pub trait StatsClient {
    fn base_url(&self) -> &str;
    fn get_json(&self, url: &str) -> Result<Value>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    /// `None` leaves ureq's own defaults in place.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: NBA_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

pub struct HttpStatsClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpStatsClient {
    pub fn new(config: ClientConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        HttpStatsClient {
            agent: builder.build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for HttpStatsClient {
    fn default() -> Self {
        HttpStatsClient::new(ClientConfig::default())
    }
}

impl StatsClient for HttpStatsClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get_json(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        let request_start = Instant::now();
        // stats.nba.com drops requests that don't look like they came from a browser
        let r = self
            .agent
            .get(url)
            .set("Host", "stats.nba.com")
            .set("User-Agent", "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:72.0) Gecko/20100101 Firefox/72.0")
            .set("Accept", "application/json, text/plain, */*")
            .set("Accept-Language", "en-US,en;q=0.5")
            .set("x-nba-stats-origin", "stats")
            .set("x-nba-stats-token", "true")
            .set("Connection", "keep-alive")
            .set("Referer", "https://stats.nba.com/")
            .set("Pragma", "no-cache")
            .set("Cache-Control", "no-cache")
            .call()
            .map_err(|e| Error::Request {
                url: url.to_string(),
                source: Box::new(e),
            })?;
        let json: Value = r.into_json().map_err(|e| Error::Io {
            url: url.to_string(),
            source: e,
        })?;
        debug!("fetch took {:?}", request_start.elapsed());
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let client = HttpStatsClient::new(ClientConfig {
            base_url: "http://localhost:9000/stats/".to_string(),
            timeout: Some(Duration::from_secs(5)),
        });
        assert_eq!(client.base_url(), "http://localhost:9000/stats");
    }

    #[test]
    fn default_points_at_stats_nba_com() {
        let client = HttpStatsClient::default();
        assert_eq!(client.base_url(), NBA_BASE_URL);
    }
}
