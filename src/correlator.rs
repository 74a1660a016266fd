//! Assigns request ids, sends requests, and awaits the response that
//! matches a given id, buffering any data frames that arrive first.
//!
//! At most one [`Correlator::await_response`] call is ever outstanding at a
//! time — the Session is single-threaded cooperative (no concurrent
//! requests) — so the "pending" state the design talks about degenerates to
//! the `expected_id` parameter of that single call. The `backlog` is the
//! only state that survives across calls, and is the single hand-off point
//! between the request path and [`crate::session::Session::handle_message`].

use std::collections::VecDeque;

use crate::codec::{self, DataEntry, Frame, ResponseContent};
use crate::errors::Error;
use crate::transport::Transport;

pub struct Correlator<T: Transport> {
    next_request_id: u64,
    backlog: VecDeque<DataEntry>,
    transport: T,
}

impl<T: Transport> Correlator<T> {
    pub fn new(transport: T) -> Self {
        Self { next_request_id: 0, backlog: VecDeque::new(), transport }
    }

    /// Returns the next request id and increments the counter.
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub async fn send(&mut self, text: String) -> Result<(), Error> {
        self.transport.send(text).await
    }

    async fn next_frame(&mut self) -> Result<Frame, Error> {
        let text = self.transport.recv().await?;
        codec::classify(&text)
    }

    /// Reads frames until the response matching `expected_id` arrives.
    /// Data frames seen along the way are appended to the backlog in
    /// arrival order; notify frames are discarded.
    pub async fn await_response(&mut self, expected_id: u64) -> Result<ResponseContent, Error> {
        loop {
            match self.next_frame().await? {
                Frame::Response(entries) => {
                    let entry = entries.first().ok_or_else(|| {
                        Error::UnexpectedResponse("empty response array".into())
                    })?;
                    let actual_id: u64 = entry.requestid.parse().map_err(|_| {
                        Error::UnexpectedResponse(format!(
                            "non-numeric requestid: {}",
                            entry.requestid
                        ))
                    })?;
                    if actual_id != expected_id {
                        return Err(Error::UnexpectedResponse(format!(
                            "unexpected requestid: {}",
                            actual_id
                        )));
                    }
                    if entry.content.code == 0 {
                        return Ok(entry.content.clone());
                    }
                    return Err(Error::UnexpectedResponseCode {
                        code: entry.content.code,
                        msg: entry.content.msg.clone(),
                    });
                }
                Frame::Data(entries) => self.backlog.extend(entries),
                Frame::Notify => continue,
                Frame::Malformed => {
                    return Err(Error::UnexpectedResponse("malformed frame".into()))
                }
            }
        }
    }

    /// Pops the oldest buffered data entry, if any.
    pub fn pop_backlog(&mut self) -> Option<DataEntry> {
        self.backlog.pop_front()
    }

    /// Reads and classifies one fresh frame from the transport, bypassing
    /// the backlog. Used by `handle_message` once the backlog is drained.
    pub async fn recv_frame(&mut self) -> Result<Frame, Error> {
        self.next_frame().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::mock::MockTransport;

    fn response(id: u64, code: i64) -> String {
        serde_json::json!({
            "response": [{
                "service": "ADMIN", "command": "LOGIN", "requestid": id.to_string(),
                "timestamp": 1, "content": {"code": code, "msg": "ok"}
            }]
        })
        .to_string()
    }

    fn data_frame() -> String {
        serde_json::json!({
            "data": [{
                "service": "CHART_EQUITY", "command": "SUBS", "timestamp": 1,
                "content": [{"key": "MSFT", "1": 200}]
            }]
        })
        .to_string()
    }

    fn notify_frame() -> String {
        r#"{"notify":{"heartbeat":"1"}}"#.to_string()
    }

    #[tokio::test]
    async fn await_response_matches_expected_id() {
        let (transport, _sent) = MockTransport::new(vec![response(0, 0).as_str()]);
        let mut correlator = Correlator::new(transport);
        let content = correlator.await_response(0).await.unwrap();
        assert_eq!(content.code, 0);
    }

    #[tokio::test]
    async fn await_response_rejects_mismatched_id() {
        let (transport, _sent) = MockTransport::new(vec![response(2, 0).as_str()]);
        let mut correlator = Correlator::new(transport);
        assert!(matches!(
            correlator.await_response(0).await,
            Err(Error::UnexpectedResponse(_))
        ));
    }

    #[tokio::test]
    async fn await_response_surfaces_nonzero_code() {
        let (transport, _sent) = MockTransport::new(vec![response(0, 21).as_str()]);
        let mut correlator = Correlator::new(transport);
        assert!(matches!(
            correlator.await_response(0).await,
            Err(Error::UnexpectedResponseCode { code: 21, .. })
        ));
    }

    #[tokio::test]
    async fn data_and_notify_frames_are_buffered_or_discarded_before_the_ack() {
        let (transport, _sent) = MockTransport::new(vec![
            data_frame().as_str(),
            notify_frame().as_str(),
            response(0, 0).as_str(),
        ]);
        let mut correlator = Correlator::new(transport);
        correlator.await_response(0).await.unwrap();

        let backlog_entry = correlator.pop_backlog().unwrap();
        assert_eq!(backlog_entry.service, "CHART_EQUITY");
        assert!(correlator.pop_backlog().is_none());
    }

    #[tokio::test]
    async fn next_id_is_monotone() {
        let (transport, _sent) = MockTransport::new(vec![]);
        let mut correlator = Correlator::new(transport);
        assert_eq!(correlator.next_id(), 0);
        assert_eq!(correlator.next_id(), 1);
        assert_eq!(correlator.next_id(), 2);
    }
}
