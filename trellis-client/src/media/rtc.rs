use crate::error::LinkError;
use crate::media::{MediaLink, MediaLinkFactory};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;
use trellis_core::{CandidatePayload, ConnectionId, IceServerConfig};
use webrtc::api::APIBuilder;
use webrtc::api::interceptor_registry::register_default_interceptors;
use webrtc::api::media_engine::MediaEngine;
use webrtc::ice_transport::ice_candidate::RTCIceCandidateInit;
use webrtc::ice_transport::ice_server::RTCIceServer;
use webrtc::interceptor::registry::Registry;
use webrtc::peer_connection::RTCPeerConnection;
use webrtc::peer_connection::configuration::RTCConfiguration;
use webrtc::peer_connection::sdp::session_description::RTCSessionDescription;
use webrtc::track::track_local::TrackLocal;

/// Knobs for the webrtc-backed factory.
#[derive(Clone, Default)]
pub struct RtcLinkConfig {
    pub ice_servers: Vec<IceServerConfig>,
}

/// Builds `RtcMediaLink`s with default codecs and interceptors, the
/// shared ICE server list, and the local track set attached to every
/// new connection.
pub struct RtcMediaLinkFactory {
    config: RtcLinkConfig,
    tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>,
}

impl RtcMediaLinkFactory {
    pub fn new(config: RtcLinkConfig, tracks: Vec<Arc<dyn TrackLocal + Send + Sync>>) -> Self {
        Self { config, tracks }
    }

    fn rtc_configuration(&self) -> RTCConfiguration {
        let ice_servers = self
            .config
            .ice_servers
            .iter()
            .map(|server| RTCIceServer {
                urls: server.urls.clone(),
                username: server.username.clone().unwrap_or_default(),
                credential: server.credential.clone().unwrap_or_default(),
                ..Default::default()
            })
            .collect();

        RTCConfiguration {
            ice_servers,
            ..Default::default()
        }
    }
}

#[async_trait]
impl MediaLinkFactory for RtcMediaLinkFactory {
    async fn create_link(
        &self,
        remote: ConnectionId,
        candidate_out: mpsc::UnboundedSender<CandidatePayload>,
    ) -> Result<Box<dyn MediaLink>, LinkError> {
        let mut media_engine = MediaEngine::default();
        media_engine.register_default_codecs()?;
        let registry = register_default_interceptors(Registry::new(), &mut media_engine)?;

        let api = APIBuilder::new()
            .with_media_engine(media_engine)
            .with_interceptor_registry(registry)
            .build();

        let connection = Arc::new(api.new_peer_connection(self.rtc_configuration()).await?);

        for track in &self.tracks {
            connection.add_track(Arc::clone(track)).await?;
        }

        connection.on_ice_candidate(Box::new(move |candidate| {
            let candidate_out = candidate_out.clone();
            Box::pin(async move {
                let Some(candidate) = candidate else {
                    return;
                };
                match candidate.to_json() {
                    Ok(init) => {
                        let _ = candidate_out.send(CandidatePayload {
                            candidate: init.candidate,
                            sdp_mid: init.sdp_mid,
                            sdp_m_line_index: init.sdp_mline_index,
                        });
                    }
                    Err(e) => debug!(%remote, "skipping unserializable candidate: {e}"),
                }
            })
        }));

        Ok(Box::new(RtcMediaLink { connection }))
    }
}

/// `MediaLink` over a real `RTCPeerConnection`.
pub struct RtcMediaLink {
    connection: Arc<RTCPeerConnection>,
}

#[async_trait]
impl MediaLink for RtcMediaLink {
    async fn create_offer(&self) -> Result<String, LinkError> {
        let offer = self.connection.create_offer(None).await?;
        let sdp = offer.sdp.clone();
        self.connection.set_local_description(offer).await?;
        Ok(sdp)
    }

    async fn accept_offer(&self, sdp: &str) -> Result<String, LinkError> {
        let offer = RTCSessionDescription::offer(sdp.to_string())?;
        self.connection.set_remote_description(offer).await?;

        let answer = self.connection.create_answer(None).await?;
        let answer_sdp = answer.sdp.clone();
        self.connection.set_local_description(answer).await?;
        Ok(answer_sdp)
    }

    async fn accept_answer(&self, sdp: &str) -> Result<(), LinkError> {
        let answer = RTCSessionDescription::answer(sdp.to_string())?;
        self.connection.set_remote_description(answer).await?;
        Ok(())
    }

    async fn apply_candidate(&self, candidate: &CandidatePayload) -> Result<(), LinkError> {
        let init = RTCIceCandidateInit {
            candidate: candidate.candidate.clone(),
            sdp_mid: candidate.sdp_mid.clone(),
            sdp_mline_index: candidate.sdp_m_line_index,
            username_fragment: None,
        };
        self.connection.add_ice_candidate(init).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), LinkError> {
        self.connection.close().await?;
        Ok(())
    }
}
