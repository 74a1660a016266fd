//! The principals document is fetched by an external HTTP client and is the
//! opaque bootstrap material the login handshake consumes: account
//! metadata, streamer connection info, and the timestamp used to derive
//! the login credential.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Principals {
    pub accounts: Vec<Account>,
    #[serde(rename = "streamerInfo")]
    pub streamer_info: StreamerInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(rename = "accountId")]
    pub account_id: String,
    pub company: String,
    pub segment: String,
    #[serde(rename = "accountCdDomainId")]
    pub account_cd_domain_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamerInfo {
    #[serde(rename = "streamerSocketUrl")]
    pub streamer_socket_url: String,
    pub token: String,
    #[serde(rename = "tokenTimestamp")]
    pub token_timestamp: String,
    #[serde(rename = "userGroup")]
    pub user_group: String,
    #[serde(rename = "accessLevel")]
    pub access_level: String,
    #[serde(rename = "appId")]
    pub app_id: String,
    pub acl: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_principals_document_ignoring_unknown_keys() {
        let text = r#"{
            "accounts": [{
                "accountId": "1001", "company": "co", "segment": "seg", "accountCdDomainId": "dom"
            }],
            "streamerSubscriptionKeys": {"keys": []},
            "streamerInfo": {
                "streamerSocketUrl": "wss://streamer.example.com/ws",
                "token": "tok",
                "tokenTimestamp": "2020-05-22T02:12:48+0000",
                "userGroup": "grp",
                "accessLevel": "lvl",
                "appId": "app",
                "acl": "acl"
            }
        }"#;
        let principals: Principals = serde_json::from_str(text).unwrap();
        assert_eq!(principals.accounts[0].account_id, "1001");
        assert_eq!(principals.streamer_info.token, "tok");
        assert_eq!(principals.streamer_info.token_timestamp, "2020-05-22T02:12:48+0000");
    }
}
