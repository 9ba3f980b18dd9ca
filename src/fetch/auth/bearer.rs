use crate::error::{ConsoleError, Result};
use crate::fetch::client::{HttpClient, Reply};
use crate::session::TokenProvider;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// An [`HttpClient`] wrapper that sets `Authorization: Bearer <token>`.
///
/// The token is looked up from `tokens` on every request, so a login or
/// logout performed through the same provider is picked up immediately.
/// When the provider has no token the request is not sent and the call
/// fails with [`ConsoleError::Unauthenticated`].
pub struct Bearer<C, P> {
    pub inner: C,
    pub tokens: P,
}

impl<C, P> Bearer<C, P> {
    pub fn new(inner: C, tokens: P) -> Self {
        Self { inner, tokens }
    }
}

#[async_trait]
impl<C: HttpClient, P: TokenProvider> HttpClient for Bearer<C, P> {
    async fn execute(&self, mut req: reqwest::Request) -> Result<Reply> {
        let token = self
            .tokens
            .token()
            .await
            .ok_or(ConsoleError::Unauthenticated)?;
        let value = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| ConsoleError::Unauthenticated)?;
        req.headers_mut().insert(AUTHORIZATION, value);
        self.inner.execute(req).await
    }
}
