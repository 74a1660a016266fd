//! The minimal surface the [`crate::correlator::Correlator`] relies on to
//! talk to the streaming gateway: send, recv, close. Modelled as a
//! hand-rolled async trait (boxed futures, in the same style as
//! [`crate::rest::FetchNextPage`]) rather than `async-trait`, so the core
//! of this crate stays testable without pulling in a real socket.

use std::future::Future;
use std::pin::Pin;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::errors::Error;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

pub trait Transport: Send {
    fn send<'a>(&'a mut self, text: String) -> BoxFuture<'a, ()>;
    fn recv<'a>(&'a mut self) -> BoxFuture<'a, String>;
    fn close<'a>(&'a mut self) -> BoxFuture<'a, ()>;
}

/// The concrete websocket transport used in production, wrapping
/// `tokio-tungstenite`.
pub struct WebSocketTransport {
    socket: WsStream,
}

impl WebSocketTransport {
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let (socket, _response) = connect_async(url).await?;
        Ok(Self { socket })
    }
}

impl Transport for WebSocketTransport {
    fn send<'a>(&'a mut self, text: String) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.socket.send(Message::Text(text)).await?;
            Ok(())
        })
    }

    fn recv<'a>(&'a mut self) -> BoxFuture<'a, String> {
        Box::pin(async move {
            loop {
                match self.socket.next().await {
                    Some(Ok(Message::Text(text))) => return Ok(text),
                    Some(Ok(Message::Binary(bytes))) => {
                        return Ok(String::from_utf8_lossy(&bytes).into_owned())
                    }
                    Some(Ok(_)) => continue, // ping/pong/close control frames
                    Some(Err(e)) => return Err(Error::from(e)),
                    None => return Err(Error::Transport("connection closed by peer".into())),
                }
            }
        })
    }

    fn close<'a>(&'a mut self) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.socket.close(None).await?;
            Ok(())
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// A shared, cloneable log of the text frames a [`MockTransport`] has
    /// sent, readable after the transport itself has been moved elsewhere.
    #[derive(Clone, Default)]
    pub struct SentLog(Arc<Mutex<Vec<String>>>);

    impl SentLog {
        pub fn snapshot(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    /// A canned transport: replays a fixed sequence of `recv` frames and
    /// records every `send`. Mirrors the reference client's own test
    /// harness (`socket.recv.side_effect = [...]`).
    pub struct MockTransport {
        sent: SentLog,
        recv_queue: VecDeque<String>,
    }

    impl MockTransport {
        pub fn new(frames: Vec<&str>) -> (Self, SentLog) {
            let sent = SentLog::default();
            let transport = Self {
                sent: sent.clone(),
                recv_queue: frames.into_iter().map(str::to_string).collect(),
            };
            (transport, sent)
        }
    }

    impl Transport for MockTransport {
        fn send<'a>(&'a mut self, text: String) -> BoxFuture<'a, ()> {
            self.sent.0.lock().unwrap().push(text);
            Box::pin(async { Ok(()) })
        }

        fn recv<'a>(&'a mut self) -> BoxFuture<'a, String> {
            let next = self.recv_queue.pop_front();
            Box::pin(async move {
                next.ok_or_else(|| Error::Transport("no more frames queued".into()))
            })
        }

        fn close<'a>(&'a mut self) -> BoxFuture<'a, ()> {
            Box::pin(async { Ok(()) })
        }
    }
}
