use crate::config::LiveKitConfig;
use crate::error::VoiceError;
use livekit_api::access_token::{AccessToken, VideoGrants};
use livekit_api::services::agent_dispatch::AgentDispatchClient;
use livekit_protocol as proto;
use std::time::Duration;

#[derive(Debug)]
pub struct VoiceService {
    config: LiveKitConfig,
    dispatch_client: AgentDispatchClient,
}

impl VoiceService {
    pub fn new(config: LiveKitConfig) -> Self {
        let dispatch_client = AgentDispatchClient::with_api_key(
            &api_host(&config.url),
            &config.api_key,
            &config.api_secret,
        );
        Self {
            config,
            dispatch_client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_configured()
    }

    pub fn get_url(&self) -> &str {
        &self.config.url
    }

    pub fn agent_name(&self) -> &str {
        &self.config.agent_name
    }

    /// A participant token for `room_name` that may join, publish, subscribe
    /// and send data.
    pub fn generate_join_token(
        &self,
        room_name: &str,
        participant_identity: &str,
    ) -> Result<String, VoiceError> {
        let token = AccessToken::with_api_key(&self.config.api_key, &self.config.api_secret)
            .with_identity(participant_identity)
            .with_grants(VideoGrants {
                room_join: true,
                room: room_name.to_string(),
                can_publish: true,
                can_subscribe: true,
                can_publish_data: true,
                ..Default::default()
            })
            .with_ttl(Duration::from_secs(self.config.token_ttl_seconds));

        token.to_jwt().map_err(VoiceError::LiveKit)
    }

    /// Asks LiveKit to send the configured agent into `room_name`.
    ///
    /// Returns the dispatch id, or `None` when no agent name is configured.
    pub async fn dispatch_agent(&self, room_name: &str) -> Result<Option<String>, VoiceError> {
        if self.config.agent_name.is_empty() {
            return Ok(None);
        }

        let dispatch = self
            .dispatch_client
            .create_dispatch(proto::CreateAgentDispatchRequest {
                agent_name: self.config.agent_name.clone(),
                room: room_name.to_string(),
                ..Default::default()
            })
            .await
            .map_err(|e| VoiceError::Dispatch(e.to_string()))?;

        tracing::info!(
            room = room_name,
            agent = %self.config.agent_name,
            dispatch_id = %dispatch.id,
            "agent dispatched"
        );
        Ok(Some(dispatch.id))
    }
}

/// The server API lives on the same host as signalling, over http(s).
fn api_host(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if let Some(rest) = url.strip_prefix("wss://") {
        format!("https://{rest}")
    } else if let Some(rest) = url.strip_prefix("ws://") {
        format!("http://{rest}")
    } else {
        url.to_string()
    }
}
