//! The user-principals endpoint is an external collaborator: fetching it is
//! a plain authenticated HTTP GET, but what account and streamer metadata
//! it returns drives everything the login bootstrap does next. The fetch
//! itself sits behind a trait, in the same hand-rolled boxed-future style
//! as [`crate::transport::Transport`], so [`crate::session::Session::login`]
//! can be exercised without a network.

use std::future::Future;
use std::pin::Pin;

use reqwest::header::AUTHORIZATION;

use crate::errors::Error;
use crate::principals::Principals;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

pub trait PrincipalsClient: Send + Sync {
    fn get_user_principals<'a>(&'a self) -> BoxFuture<'a, Principals>;
}

/// Fetches principals over HTTPS using a bearer-token-authenticated GET,
/// in the same header-and-status-check style as [`crate::rest::Client`]'s
/// authenticated request helpers.
pub struct HttpPrincipalsClient {
    client: reqwest::Client,
    url: String,
    access_token: String,
}

impl HttpPrincipalsClient {
    pub fn new(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self { client: reqwest::Client::new(), url: url.into(), access_token: access_token.into() }
    }
}

impl PrincipalsClient for HttpPrincipalsClient {
    fn get_user_principals<'a>(&'a self) -> BoxFuture<'a, Principals> {
        Box::pin(async move {
            let response = self
                .client
                .get(&self.url)
                .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
                .query(&[("fields", "streamerSubscriptionKeys,streamerConnectionInfo")])
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(Error::Login("could not retrieve user principals".into()));
            }
            Ok(response.json::<Principals>().await?)
        })
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    pub struct MockPrincipalsClient(pub Principals);

    impl PrincipalsClient for MockPrincipalsClient {
        fn get_user_principals<'a>(&'a self) -> BoxFuture<'a, Principals> {
            let principals = self.0.clone();
            Box::pin(async move { Ok(principals) })
        }
    }
}
