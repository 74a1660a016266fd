//! Orchestrates login and exposes the public subscribe/add/unsubscribe/view
//! API, plus the blocking [`Session::handle_message`] primitive that drains
//! the [`crate::correlator::Correlator`]'s backlog and the transport into
//! the [`crate::dispatcher::Dispatcher`].

use std::collections::BTreeMap;
use std::future::Future;

use tracing::{debug, info, instrument};

use crate::codec::{self, Frame};
use crate::config::SessionConfig;
use crate::correlator::Correlator;
use crate::dispatcher::{Dispatcher, HandlerFn};
use crate::errors::Error;
use crate::fields::{self, ServiceId};
use crate::principals::{Account, Principals, StreamerInfo};
use crate::principals_client::PrincipalsClient;
use crate::transport::{Transport, WebSocketTransport};

/// QoS levels accepted by `ADMIN/QOS`, ordered from fastest to slowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QosLevel {
    Express = 0,
    RealTime = 1,
    Fast = 2,
    Moderate = 3,
    Slow = 4,
    Delayed = 5,
}

/// An authenticated, full-duplex session with the streaming gateway.
///
/// `T` defaults to [`WebSocketTransport`] for production use; tests
/// construct a `Session<transport::mock::MockTransport>` via [`Session::login`]
/// with a connector closure that never touches the network.
pub struct Session<T: Transport = WebSocketTransport> {
    #[allow(dead_code)]
    config: SessionConfig,
    correlator: Correlator<T>,
    dispatcher: Dispatcher,
    account: Account,
    streamer_info: StreamerInfo,
}

impl<T: Transport> Session<T> {
    /// Runs the login bootstrap: fetch principals, select an account,
    /// build the login credential, connect the transport, and exchange the
    /// `ADMIN`/`LOGIN` request/response pair.
    #[instrument(skip_all)]
    pub async fn login<P, C, Fut>(
        principals_client: &P,
        config: SessionConfig,
        connect: C,
    ) -> Result<Self, Error>
    where
        P: PrincipalsClient,
        C: FnOnce(&str) -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        info!("fetching user principals");
        let principals = principals_client.get_user_principals().await?;
        let account = select_account(&principals, config.account_id.as_deref())?.clone();
        let streamer_info = principals.streamer_info.clone();

        let timestamp_ms = parse_timestamp_ms(&streamer_info.token_timestamp)?;
        let credential = build_credential(&account, &streamer_info, timestamp_ms);

        debug!(url = %streamer_info.streamer_socket_url, "connecting to streamer");
        let transport = connect(&streamer_info.streamer_socket_url).await?;
        let mut correlator = Correlator::new(transport);

        let request_id = correlator.next_id();
        let mut parameters = BTreeMap::new();
        parameters.insert("credential".to_string(), credential);
        parameters.insert("token".to_string(), streamer_info.token.clone());
        parameters.insert("version".to_string(), "1.0".to_string());

        let text = codec::build_request(
            ServiceId::Admin.wire_name(),
            "LOGIN",
            request_id,
            &account.account_id,
            &streamer_info.app_id,
            parameters,
        )?;
        correlator.send(text).await?;
        correlator.await_response(request_id).await?;
        info!(account_id = %account.account_id, "login succeeded");

        Ok(Self { config, correlator, dispatcher: Dispatcher::new(), account, streamer_info })
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Registers `handler` for `service`, appended after any previously
    /// registered handlers for the same service.
    pub fn register_handler(&mut self, service: ServiceId, handler: HandlerFn) {
        self.dispatcher.register(service, handler);
    }

    /// Sends `ADMIN/QOS` to request a different push cadence from the
    /// gateway.
    pub async fn quality_of_service(&mut self, level: QosLevel) -> Result<(), Error> {
        let mut parameters = BTreeMap::new();
        parameters.insert("qoslevel".to_string(), (level as i32).to_string());
        self.request(ServiceId::Admin, "QOS", parameters).await
    }

    /// If the backlog has a buffered data entry, delivers it; otherwise
    /// reads and classifies one fresh frame from the transport.
    #[instrument(skip(self))]
    pub async fn handle_message(&mut self) -> Result<(), Error> {
        if let Some(entry) = self.correlator.pop_backlog() {
            debug!(service = %entry.service, "delivering buffered data entry");
            return self.dispatcher.deliver(entry);
        }

        match self.correlator.recv_frame().await? {
            Frame::Data(entries) => {
                for entry in entries {
                    self.dispatcher.deliver(entry)?;
                }
                Ok(())
            }
            Frame::Notify => Ok(()),
            Frame::Response(_) => {
                Err(Error::UnexpectedResponse("unsolicited response frame".into()))
            }
            Frame::Malformed => Err(Error::UnexpectedResponse("malformed frame".into())),
        }
    }

    async fn request(
        &mut self,
        service: ServiceId,
        command: &str,
        parameters: BTreeMap<String, String>,
    ) -> Result<(), Error> {
        let request_id = self.correlator.next_id();
        let text = codec::build_request(
            service.wire_name(),
            command,
            request_id,
            &self.account.account_id,
            &self.streamer_info.app_id,
            parameters,
        )?;
        self.correlator.send(text).await?;
        self.correlator.await_response(request_id).await?;
        Ok(())
    }

    fn fields_param(service: ServiceId, fields: Option<&[u32]>) -> String {
        match fields {
            Some(codes) => {
                let mut sorted = codes.to_vec();
                sorted.sort_unstable();
                sorted.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
            }
            None => fields::all_field_codes(service).iter().map(u32::to_string).collect::<Vec<_>>().join(","),
        }
    }

    async fn subscribe(
        &mut self,
        service: ServiceId,
        keys: &[String],
        fields: Option<&[u32]>,
    ) -> Result<(), Error> {
        self.keyed_request(service, "SUBS", keys, fields).await
    }

    async fn extend(
        &mut self,
        service: ServiceId,
        keys: &[String],
        fields: Option<&[u32]>,
    ) -> Result<(), Error> {
        self.keyed_request(service, "ADD", keys, fields).await
    }

    async fn unsubscribe(&mut self, service: ServiceId, keys: &[String]) -> Result<(), Error> {
        let mut parameters = BTreeMap::new();
        parameters.insert("keys".to_string(), keys.join(","));
        self.request(service, "UNSUBS", parameters).await
    }

    async fn set_view(&mut self, service: ServiceId, fields: &[u32]) -> Result<(), Error> {
        let mut parameters = BTreeMap::new();
        parameters.insert("fields".to_string(), Self::fields_param(service, Some(fields)));
        self.request(service, "VIEW", parameters).await
    }

    async fn keyed_request(
        &mut self,
        service: ServiceId,
        command: &str,
        keys: &[String],
        fields: Option<&[u32]>,
    ) -> Result<(), Error> {
        let mut parameters = BTreeMap::new();
        parameters.insert("keys".to_string(), keys.join(","));
        parameters.insert("fields".to_string(), Self::fields_param(service, fields));
        self.request(service, command, parameters).await
    }
}

/// Generates the `<service>_subs`/`<service>_add`/`<service>_unsubs` thin
/// wrappers over the generic `subscribe`/`extend`/`unsubscribe` operations.
/// Per the "do not hand-roll one struct per service" design note: the
/// rename/request machinery is generic, only the wrapper names are
/// per-service.
macro_rules! service_ops {
    ($subs:ident, $add:ident, $unsubs:ident, $service:expr) => {
        pub async fn $subs(
            &mut self,
            keys: &[String],
            fields: Option<&[u32]>,
        ) -> Result<(), Error> {
            self.subscribe($service, keys, fields).await
        }

        pub async fn $add(
            &mut self,
            keys: &[String],
            fields: Option<&[u32]>,
        ) -> Result<(), Error> {
            self.extend($service, keys, fields).await
        }

        pub async fn $unsubs(&mut self, keys: &[String]) -> Result<(), Error> {
            self.unsubscribe($service, keys).await
        }
    };
}

macro_rules! service_view {
    ($view:ident, $service:expr) => {
        pub async fn $view(&mut self, fields: &[u32]) -> Result<(), Error> {
            self.set_view($service, fields).await
        }
    };
}

impl<T: Transport> Session<T> {
    service_ops!(chart_equity_subs, chart_equity_add, chart_equity_unsubs, ServiceId::ChartEquity);
    service_ops!(
        chart_futures_subs,
        chart_futures_add,
        chart_futures_unsubs,
        ServiceId::ChartFutures
    );
    service_ops!(
        chart_options_subs,
        chart_options_add,
        chart_options_unsubs,
        ServiceId::ChartOptions
    );
    service_ops!(chart_forex_subs, chart_forex_add, chart_forex_unsubs, ServiceId::ChartForex);
    service_ops!(quote_subs, quote_add, quote_unsubs, ServiceId::Quote);
    service_ops!(option_subs, option_add, option_unsubs, ServiceId::Option);
    service_ops!(
        levelone_futures_subs,
        levelone_futures_add,
        levelone_futures_unsubs,
        ServiceId::LevelOneFutures
    );
    service_ops!(
        levelone_forex_subs,
        levelone_forex_add,
        levelone_forex_unsubs,
        ServiceId::LevelOneForex
    );
    service_ops!(
        levelone_futures_options_subs,
        levelone_futures_options_add,
        levelone_futures_options_unsubs,
        ServiceId::LevelOneFuturesOptions
    );
    service_ops!(
        news_headline_subs,
        news_headline_add,
        news_headline_unsubs,
        ServiceId::NewsHeadline
    );
    service_ops!(
        timesale_equity_subs,
        timesale_equity_add,
        timesale_equity_unsubs,
        ServiceId::TimesaleEquity
    );
    service_ops!(
        timesale_futures_subs,
        timesale_futures_add,
        timesale_futures_unsubs,
        ServiceId::TimesaleFutures
    );
    service_ops!(
        timesale_options_subs,
        timesale_options_add,
        timesale_options_unsubs,
        ServiceId::TimesaleOptions
    );
    service_ops!(nasdaq_book_subs, nasdaq_book_add, nasdaq_book_unsubs, ServiceId::NasdaqBook);
    service_ops!(nyse_book_subs, nyse_book_add, nyse_book_unsubs, ServiceId::NyseBook);
    service_ops!(
        options_book_subs,
        options_book_add,
        options_book_unsubs,
        ServiceId::OptionsBook
    );
    service_ops!(listed_book_subs, listed_book_add, listed_book_unsubs, ServiceId::ListedBook);
    service_ops!(
        acct_activity_subs,
        acct_activity_add,
        acct_activity_unsubs,
        ServiceId::AcctActivity
    );

    service_view!(chart_equity_view, ServiceId::ChartEquity);
    service_view!(quote_view, ServiceId::Quote);
    service_view!(option_view, ServiceId::Option);
    service_view!(nasdaq_book_view, ServiceId::NasdaqBook);
    service_view!(nyse_book_view, ServiceId::NyseBook);
    service_view!(options_book_view, ServiceId::OptionsBook);
    service_view!(listed_book_view, ServiceId::ListedBook);
}

fn select_account<'a>(principals: &'a Principals, account_id: Option<&str>) -> Result<&'a Account, Error> {
    match account_id {
        None => {
            if principals.accounts.len() == 1 {
                Ok(&principals.accounts[0])
            } else {
                Err(Error::Login(
                    "initialized with unspecified account_id, but principals carry more than one account"
                        .into(),
                ))
            }
        }
        Some(id) => principals
            .accounts
            .iter()
            .find(|a| a.account_id == id)
            .ok_or_else(|| Error::Login(format!("no account found with account_id {}", id))),
    }
}

/// Parses an ISO-8601 timestamp into epoch milliseconds. Accepts both
/// `+0000` and `+00:00` as the UTC offset.
fn parse_timestamp_ms(timestamp: &str) -> Result<i64, Error> {
    let normalized = normalize_offset(timestamp);
    let parsed = chrono::DateTime::parse_from_rfc3339(&normalized)
        .map_err(|e| Error::Login(format!("invalid tokenTimestamp '{}': {}", timestamp, e)))?;
    Ok(parsed.timestamp_millis())
}

fn normalize_offset(timestamp: &str) -> String {
    if let Some(sign_pos) = timestamp.rfind(['+', '-']) {
        let offset = &timestamp[sign_pos + 1..];
        if offset.len() == 4 && offset.chars().all(|c| c.is_ascii_digit()) {
            let mut normalized = timestamp.to_string();
            normalized.insert(sign_pos + 3, ':');
            return normalized;
        }
    }
    timestamp.to_string()
}

fn build_credential(account: &Account, streamer: &StreamerInfo, timestamp_ms: i64) -> String {
    let pairs: Vec<(&str, String)> = vec![
        ("userid", account.account_id.clone()),
        ("token", streamer.token.clone()),
        ("company", account.company.clone()),
        ("segment", account.segment.clone()),
        ("cddomain", account.account_cd_domain_id.clone()),
        ("usergroup", streamer.user_group.clone()),
        ("accesslevel", streamer.access_level.clone()),
        ("authorized", "Y".to_string()),
        ("timestamp", timestamp_ms.to_string()),
        ("appid", streamer.app_id.clone()),
        ("acl", streamer.acl.clone()),
    ];
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}
