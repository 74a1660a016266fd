//! Builds outgoing request envelopes and classifies incoming frames into
//! the three disjoint kinds the wire protocol allows: response, data, or
//! notify.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::Error;

#[derive(Debug, Clone, Serialize)]
struct RequestEntry<'a> {
    service: &'a str,
    command: &'a str,
    requestid: String,
    account: &'a str,
    source: &'a str,
    parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
struct RequestEnvelope<'a> {
    requests: [RequestEntry<'a>; 1],
}

/// Serializes a single outgoing request. `request_id` is always sent as a
/// decimal string, per the wire format.
pub fn build_request(
    service: &str,
    command: &str,
    request_id: u64,
    account_id: &str,
    source: &str,
    parameters: BTreeMap<String, String>,
) -> Result<String, Error> {
    let envelope = RequestEnvelope {
        requests: [RequestEntry {
            service,
            command,
            requestid: request_id.to_string(),
            account: account_id,
            source,
            parameters,
        }],
    };
    Ok(serde_json::to_string(&envelope)?)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseContent {
    pub code: i64,
    pub msg: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEntry {
    pub service: String,
    pub command: String,
    pub requestid: String,
    pub timestamp: i64,
    pub content: ResponseContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataEntry {
    pub service: String,
    pub command: String,
    pub timestamp: i64,
    pub content: Vec<Map<String, Value>>,
}

/// The result of classifying one inbound frame.
#[derive(Debug, Clone)]
pub enum Frame {
    Response(Vec<ResponseEntry>),
    Data(Vec<DataEntry>),
    Notify,
    /// Either both `response` and `data` were present, or neither was -
    /// the frame doesn't conform to the wire schema.
    Malformed,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    #[serde(default)]
    response: Option<Vec<ResponseEntry>>,
    #[serde(default)]
    data: Option<Vec<DataEntry>>,
    #[serde(default)]
    notify: Option<Value>,
}

/// Classifies a frame by inspecting only its top-level keys.
pub fn classify(text: &str) -> Result<Frame, Error> {
    let raw: RawFrame = serde_json::from_str(text)?;
    Ok(match (raw.response, raw.data, raw.notify) {
        (Some(r), None, None) => Frame::Response(r),
        (None, Some(d), None) => Frame::Data(d),
        (None, None, Some(_)) => Frame::Notify,
        _ => Frame::Malformed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_serializes_id_as_decimal_string() {
        let mut parameters = BTreeMap::new();
        parameters.insert("keys".to_string(), "GOOG,MSFT".to_string());
        let text =
            build_request("CHART_EQUITY", "SUBS", 1, "1001", "streamerInfo-appId", parameters)
                .unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let request = &value["requests"][0];
        assert_eq!(request["requestid"], "1");
        assert_eq!(request["service"], "CHART_EQUITY");
        assert_eq!(request["command"], "SUBS");
        assert_eq!(request["account"], "1001");
        assert_eq!(request["source"], "streamerInfo-appId");
        assert_eq!(request["parameters"]["keys"], "GOOG,MSFT");
    }

    #[test]
    fn classify_response_frame() {
        let text = r#"{"response":[{"service":"ADMIN","command":"LOGIN","requestid":"0","timestamp":1,"content":{"code":0,"msg":"success"}}]}"#;
        assert!(matches!(classify(text).unwrap(), Frame::Response(entries) if entries.len() == 1));
    }

    #[test]
    fn classify_data_frame() {
        let text = r#"{"data":[{"service":"CHART_EQUITY","command":"SUBS","timestamp":1590186642440,"content":[{"key":"MSFT","1":200}]}]}"#;
        assert!(matches!(classify(text).unwrap(), Frame::Data(entries) if entries.len() == 1));
    }

    #[test]
    fn classify_notify_frame() {
        let text = r#"{"notify":{"heartbeat":"1590186642440"}}"#;
        assert!(matches!(classify(text).unwrap(), Frame::Notify));
    }

    #[test]
    fn classify_both_response_and_data_is_malformed() {
        let text = r#"{"response":[],"data":[]}"#;
        assert!(matches!(classify(text).unwrap(), Frame::Malformed));
    }

    #[test]
    fn classify_neither_is_malformed() {
        let text = r#"{"something_else": true}"#;
        assert!(matches!(classify(text).unwrap(), Frame::Malformed));
    }
}
