use std::time::Duration;
use futures_util::StreamExt;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::protocol::Message;
use tracing::{debug, error, info, warn};
use url::Url;

use botpanel_common::models::PushEvent;
use botpanel_common::Error;

use crate::events::PanelEvent;

/// WebSocket subscriber for the bot-control service's `bot_update` stream.
///
/// Each text frame is one `{"type": ..., "data": ...}` event. The client
/// reconnects forever, waiting `reconnect_delay` between attempts, until the
/// receiving side of the event channel goes away.
pub struct PushClient {
    url: Url,
    reconnect_delay: Duration,
}

impl PushClient {
    pub fn new(url: Url, reconnect_delay: Duration) -> Self {
        Self { url, reconnect_delay }
    }

    pub fn start(self, event_tx: UnboundedSender<PanelEvent>) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                match self.connect_and_run(&event_tx).await {
                    Ok(()) => info!("[Push] connection closed"),
                    Err(e) => error!("[Push] connection error: {}", e),
                }

                if event_tx.is_closed() {
                    debug!("[Push] panel gone, stopping");
                    break;
                }
                tokio::time::sleep(self.reconnect_delay).await;
            }
        })
    }

    async fn connect_and_run(&self, event_tx: &UnboundedSender<PanelEvent>) -> Result<(), Error> {
        let (mut ws, _) = connect_async(self.url.as_str()).await?;
        info!("[Push] connected -> {}", self.url);
        if event_tx.send(PanelEvent::Connected).is_err() {
            return Ok(());
        }

        let result = Self::read_loop(&mut ws, event_tx).await;

        let _ = event_tx.send(PanelEvent::Disconnected);
        result
    }

    async fn read_loop<S>(ws: &mut S, event_tx: &UnboundedSender<PanelEvent>) -> Result<(), Error>
    where
        S: futures_util::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
    {
        while let Some(frame) = ws.next().await {
            match frame? {
                Message::Text(txt) => match PushEvent::from_frame(txt.as_str()) {
                    Ok(event) => {
                        debug!("[Push] event {}", event.event_type());
                        if event_tx.send(PanelEvent::Push(event)).is_err() {
                            return Ok(());
                        }
                    }
                    Err(e) => warn!("[Push] dropping malformed frame: {}", e),
                },
                Message::Close(_) => return Ok(()),
                // tungstenite answers pings itself
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::SinkExt;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc::unbounded_channel;
    use tokio_tungstenite::accept_async;

    #[tokio::test]
    async fn forwards_lifecycle_and_events() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(Message::Text(r#"{"type":"status","data":{"active":false}}"#.into())).await.unwrap();
            ws.send(Message::Text("garbage".into())).await.unwrap();
            ws.send(Message::Text(r#"{"type":"bot_started","data":{"username":"ferris"}}"#.into())).await.unwrap();
            ws.send(Message::Text(r#"{"type":"error","data":{"error":"rate limited"}}"#.into())).await.unwrap();
            ws.close(None).await.unwrap();
        });

        let (tx, mut rx) = unbounded_channel();
        let url = Url::parse(&format!("ws://{}", addr)).unwrap();
        let handle = PushClient::new(url, Duration::from_secs(60)).start(tx);

        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(rx.recv().await.unwrap());
        }
        handle.abort();
        server.await.unwrap();

        assert_eq!(
            seen,
            vec![
                PanelEvent::Connected,
                PanelEvent::Push(PushEvent::Other("status".into())),
                PanelEvent::Push(PushEvent::BotStarted),
                PanelEvent::Push(PushEvent::Error { error: "rate limited".into() }),
                PanelEvent::Disconnected,
            ]
        );
    }

    #[tokio::test]
    async fn reconnects_after_the_server_drops() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            // first session closes right away
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.close(None).await.unwrap();

            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = accept_async(stream).await.unwrap();
            ws.send(Message::Text(r#"{"type":"bot_stopped","data":{}}"#.into())).await.unwrap();
            // hold the second session open until the client goes away
            while ws.next().await.is_some() {}
        });

        let (tx, mut rx) = unbounded_channel();
        let url = Url::parse(&format!("ws://{}", addr)).unwrap();
        let handle = PushClient::new(url, Duration::from_millis(50)).start(tx);

        let mut seen = Vec::new();
        for _ in 0..4 {
            let event = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await.unwrap();
            seen.push(event.unwrap());
        }
        handle.abort();
        server.abort();

        assert_eq!(
            seen,
            vec![
                PanelEvent::Connected,
                PanelEvent::Disconnected,
                PanelEvent::Connected,
                PanelEvent::Push(PushEvent::BotStopped),
            ]
        );
    }
}
