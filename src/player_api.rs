use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::{Client, Response};
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::http_client::http_client;
use crate::player::{Player, PlayerFilters};

const PLAYER_RESOURCE: &str = "player";
const MAX_ERROR_SNIPPET: usize = 220;

/// CRUD operations against the player backend.
///
/// Implementations do not retry and do not interpret status codes beyond success or failure.
pub trait PlayerApi: Send + Sync {
    fn list_players(&self, filters: &PlayerFilters) -> Result<Vec<Player>>;
    fn create_player(&self, player: &Player) -> Result<Player>;
    fn update_player(&self, player: &Player) -> Result<Player>;
    fn delete_player(&self, name: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PlayerEndpoints {
    base: Url,
}

impl PlayerEndpoints {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim())
            .with_context(|| format!("invalid api base url {base_url:?}"))?;
        if base.cannot_be_a_base() {
            bail!("api base url {base_url:?} cannot hold a path");
        }
        Ok(Self { base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `{base}/player`, the target of list, create and update.
    pub fn collection_url(&self) -> Result<Url> {
        self.resource_url(&[PLAYER_RESOURCE])
    }

    pub fn list_url(&self, filters: &PlayerFilters) -> Result<Url> {
        let mut url = self.collection_url()?;
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// `{base}/player/{name}` with the name encoded as a single path segment.
    pub fn delete_url(&self, name: &str) -> Result<Url> {
        self.resource_url(&[PLAYER_RESOURCE, name])
    }

    fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.set_query(None);
        url.path_segments_mut()
            .map_err(|_| anyhow!("api base url cannot hold a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// HTTP implementation of [`PlayerApi`] over the shared blocking client.
pub struct PlayerClient {
    endpoints: PlayerEndpoints,
    client: &'static Client,
}

impl PlayerClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            endpoints: PlayerEndpoints::new(base_url)?,
            client: http_client()?,
        })
    }

    pub fn endpoints(&self) -> &PlayerEndpoints {
        &self.endpoints
    }
}

impl PlayerApi for PlayerClient {
    fn list_players(&self, filters: &PlayerFilters) -> Result<Vec<Player>> {
        let url = self.endpoints.list_url(filters)?;
        tracing::debug!(%url, "listing players");
        let resp = self.client.get(url).send().context("request failed")?;
        let body = read_success_body(resp)?;
        parse_players_json(&body)
    }

    fn create_player(&self, player: &Player) -> Result<Player> {
        let url = self.endpoints.collection_url()?;
        tracing::debug!(%url, player = %player.player, "creating player");
        let resp = self
            .client
            .post(url)
            .json(player)
            .send()
            .context("request failed")?;
        let body = read_success_body(resp)?;
        parse_player_json(&body)
    }

    fn update_player(&self, player: &Player) -> Result<Player> {
        let Some(id) = player.id else {
            bail!("cannot update {:?}: record has no id", player.player);
        };
        let url = self.endpoints.collection_url()?;
        tracing::debug!(%url, id, "updating player");
        let resp = self
            .client
            .put(url)
            .json(player)
            .send()
            .context("request failed")?;
        let body = read_success_body(resp)?;
        parse_player_json(&body)
    }

    fn delete_player(&self, name: &str) -> Result<()> {
        let url = self.endpoints.delete_url(name)?;
        tracing::debug!(%url, "deleting player");
        let resp = self.client.delete(url).send().context("request failed")?;
        read_success_body(resp)?;
        Ok(())
    }
}

fn read_success_body(resp: Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        return Err(anyhow!(error_message(status, &body)));
    }
    Ok(body)
}

/// Human-readable failure text: the backend's `message`/`error` field, the raw body, or the status.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = map.get(key).and_then(Value::as_str) {
                let text = text.trim();
                if !text.is_empty() {
                    return text.to_string();
                }
            }
        }
    }
    if !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('<') {
        return trimmed
            .replace(['\n', '\r'], " ")
            .chars()
            .take(MAX_ERROR_SNIPPET)
            .collect();
    }
    format!("request failed with status {status}")
}

pub fn parse_players_json(raw: &str) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed).context("invalid players json")
}

/// The backend answers an update of an unknown id with an empty body.
pub fn parse_player_json(raw: &str) -> Result<Player> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        bail!("player not found");
    }
    serde_json::from_str(trimmed).context("invalid player json")
}
