use futures::{ Stream, StreamExt };
use log::info;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{ timeout_at, Instant };
use tokio_stream::wrappers::ReceiverStream;

use crate::error::RadarError;
use crate::llm::ChatClient;
use crate::models::chat::ChatMessage;

/// Client-visible events of one relayed chat turn.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayEvent {
    /// One non-empty text fragment, in upstream arrival order.
    Token(String),
    /// Terminal marker; the upstream stream ended normally.
    Done,
}

pub type EventStream = Pin<Box<dyn Stream<Item = Result<RelayEvent, RadarError>> + Send>>;

/// Forwards one live chat turn: issues a single streaming completion and
/// re-emits each fragment as it arrives. Stateless across calls; each
/// invocation owns its own upstream session.
pub struct StreamRelay {
    client: Arc<dyn ChatClient>,
    max_tokens: u32,
    timeout: Duration,
}

impl StreamRelay {
    pub fn new(client: Arc<dyn ChatClient>, max_tokens: u32, timeout: Duration) -> Self {
        Self { client, max_tokens, timeout }
    }

    /// Validates the history, opens the upstream stream, and returns the
    /// ordered event stream. Ends with exactly one `Done` on normal upstream
    /// close, or an `Err` item after which no further events are produced.
    /// Tokens already emitted before a failure are not retracted.
    pub async fn relay(
        &self,
        system: &str,
        history: &[ChatMessage],
    ) -> Result<EventStream, RadarError> {
        for (i, message) in history.iter().enumerate() {
            if !message.has_valid_role() {
                return Err(RadarError::Request(format!(
                    "message {} has invalid role '{}'",
                    i, message.role
                )));
            }
        }

        info!("[Chat] relaying turn with {} messages", history.len());

        // One deadline covers the whole turn, opening the upstream stream
        // included.
        let deadline = Instant::now() + self.timeout;
        let mut upstream = timeout_at(
            deadline,
            self.client.complete_stream(system, history, self.max_tokens),
        )
        .await
        .map_err(|_| deadline_error(self.timeout))??;

        let timeout = self.timeout;
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            loop {
                let item = match timeout_at(deadline, upstream.next()).await {
                    Ok(item) => item,
                    Err(_) => {
                        let _ = tx.send(Err(deadline_error(timeout))).await;
                        return;
                    }
                };

                match item {
                    None => {
                        let _ = tx.send(Ok(RelayEvent::Done)).await;
                        return;
                    }
                    Some(Ok(text)) => {
                        if text.is_empty() {
                            continue;
                        }
                        if tx.send(Ok(RelayEvent::Token(text))).await.is_err() {
                            // Consumer disconnected; dropping `upstream`
                            // releases the channel, no further reads happen.
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}

fn deadline_error(timeout: Duration) -> RadarError {
    RadarError::Upstream(format!("chat turn exceeded the {}s deadline", timeout.as_secs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::TokenStream;
    use async_trait::async_trait;

    /// Plays back a scripted sequence of fragments and errors.
    struct ScriptedClient {
        script: Vec<Result<String, String>>,
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(
            &self,
            _system: &str,
            _history: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, RadarError> {
            unimplemented!("relay tests only stream")
        }

        async fn complete_stream(
            &self,
            _system: &str,
            _history: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<TokenStream, RadarError> {
            let items: Vec<Result<String, RadarError>> = self.script
                .iter()
                .map(|r| r.clone().map_err(RadarError::Upstream))
                .collect();
            Ok(Box::pin(futures::stream::iter(items)))
        }
    }

    /// Opens a stream that never yields anything.
    struct StalledClient;

    #[async_trait]
    impl ChatClient for StalledClient {
        async fn complete(
            &self,
            _system: &str,
            _history: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, RadarError> {
            unimplemented!("relay tests only stream")
        }

        async fn complete_stream(
            &self,
            _system: &str,
            _history: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<TokenStream, RadarError> {
            Ok(Box::pin(futures::stream::pending()))
        }
    }

    fn relay_over(script: Vec<Result<String, String>>) -> StreamRelay {
        StreamRelay::new(
            Arc::new(ScriptedClient { script }),
            2000,
            Duration::from_secs(60),
        )
    }

    #[tokio::test]
    async fn emits_fragments_in_order_then_done() {
        let relay = relay_over(vec![Ok("He".to_string()), Ok("llo".to_string())]);
        let history = vec![ChatMessage::user("hi")];

        let mut events = relay.relay("system", &history).await.unwrap();

        assert_eq!(events.next().await.unwrap().unwrap(), RelayEvent::Token("He".to_string()));
        assert_eq!(events.next().await.unwrap().unwrap(), RelayEvent::Token("llo".to_string()));
        assert_eq!(events.next().await.unwrap().unwrap(), RelayEvent::Done);
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn skips_empty_fragments() {
        let relay = relay_over(vec![Ok("".to_string()), Ok("hi".to_string())]);

        let mut events = relay.relay("system", &[]).await.unwrap();

        assert_eq!(events.next().await.unwrap().unwrap(), RelayEvent::Token("hi".to_string()));
        assert_eq!(events.next().await.unwrap().unwrap(), RelayEvent::Done);
    }

    #[tokio::test]
    async fn mid_stream_error_terminates_without_done() {
        let relay = relay_over(vec![
            Ok("partial".to_string()),
            Err("connection reset".to_string()),
        ]);

        let mut events = relay.relay("system", &[]).await.unwrap();

        assert_eq!(
            events.next().await.unwrap().unwrap(),
            RelayEvent::Token("partial".to_string())
        );
        let err = events.next().await.unwrap().unwrap_err();
        assert!(matches!(err, RadarError::Upstream(_)));
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn stalled_upstream_hits_the_turn_deadline() {
        let relay = StreamRelay::new(Arc::new(StalledClient), 2000, Duration::from_millis(20));

        let mut events = relay.relay("system", &[]).await.unwrap();

        let err = events.next().await.unwrap().unwrap_err();
        assert!(matches!(err, RadarError::Upstream(_)));
        assert!(events.next().await.is_none());
    }

    #[tokio::test]
    async fn rejects_invalid_role_before_upstream_call() {
        let relay = relay_over(vec![Ok("never".to_string())]);
        let history = vec![ChatMessage {
            role: "system".to_string(),
            content: "sneaky".to_string(),
        }];

        let err = match relay.relay("system", &history).await {
            Ok(_) => panic!("expected an error, got a stream"),
            Err(e) => e,
        };
        assert!(matches!(err, RadarError::Request(_)));
    }
}
