//! Interaction token routing.
//!
//! A [`TokenRouter`] is an ordered list of routes. Each route pairs a
//! [`TokenMatcher`] with a handler; the first route whose matcher accepts the
//! token wins. Prefix routes hand the remainder of the token to the handler
//! as its parameter.

use async_trait::async_trait;
use futures::future::BoxFuture;
use pickset_core::error::Result;
use pickset_core::selection::UserId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where an interaction came from, echoed back to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatContext {
    pub chat_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i64>,
}

/// A user pressing a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub token: String,
    pub user_id: UserId,
    #[serde(default)]
    pub chat: ChatContext,
}

impl Interaction {
    pub fn new(token: impl Into<String>, user_id: UserId) -> Self {
        Self {
            token: token.into(),
            user_id,
            chat: ChatContext::default(),
        }
    }

    pub fn with_chat(mut self, chat: ChatContext) -> Self {
        self.chat = chat;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenMatcher {
    /// The whole token must equal the string
    Exact(String),
    /// The token must start with the string; the rest is the parameter
    Prefix(String),
}

impl TokenMatcher {
    /// Matches a token.
    ///
    /// # Returns
    ///
    /// - `None`: No match
    /// - `Some(None)`: Exact match
    /// - `Some(Some(param))`: Prefix match with the remaining text
    pub fn matches<'t>(&self, token: &'t str) -> Option<Option<&'t str>> {
        match self {
            Self::Exact(expected) => (token == expected).then_some(None),
            Self::Prefix(prefix) => token.strip_prefix(prefix.as_str()).map(Some),
        }
    }
}

/// Handles one routed interaction.
#[async_trait]
pub trait TokenHandler<T>: Send + Sync {
    /// # Arguments
    ///
    /// * `interaction` - The routed interaction
    /// * `param` - Token remainder for prefix routes, `None` for exact routes
    async fn handle(&self, interaction: &Interaction, param: Option<&str>) -> Result<T>;
}

/// Adapts a closure returning a boxed future into a [`TokenHandler`].
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<T, F> TokenHandler<T> for FnHandler<F>
where
    T: Send + 'static,
    F: Fn(Interaction, Option<String>) -> BoxFuture<'static, Result<T>> + Send + Sync,
{
    async fn handle(&self, interaction: &Interaction, param: Option<&str>) -> Result<T> {
        (self.f)(interaction.clone(), param.map(str::to_string)).await
    }
}

/// Result of [`TokenRouter::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch<T> {
    Handled(T),
    /// No route matched; nothing was executed
    NoMatch,
}

struct Route<T> {
    matcher: TokenMatcher,
    handler: Arc<dyn TokenHandler<T>>,
}

/// Ordered, first-match-wins token router.
pub struct TokenRouter<T> {
    routes: Vec<Route<T>>,
}

impl<T: Send + 'static> Default for TokenRouter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> TokenRouter<T> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn register_exact(
        &mut self,
        token: impl Into<String>,
        handler: impl TokenHandler<T> + 'static,
    ) -> &mut Self {
        self.register(TokenMatcher::Exact(token.into()), Arc::new(handler))
    }

    pub fn register_prefix(
        &mut self,
        prefix: impl Into<String>,
        handler: impl TokenHandler<T> + 'static,
    ) -> &mut Self {
        self.register(TokenMatcher::Prefix(prefix.into()), Arc::new(handler))
    }

    /// Appends a route. Routes registered earlier take precedence.
    pub fn register(
        &mut self,
        matcher: TokenMatcher,
        handler: Arc<dyn TokenHandler<T>>,
    ) -> &mut Self {
        self.routes.push(Route { matcher, handler });
        self
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the route for a token without running it.
    ///
    /// Returns the matching matcher and the extracted parameter.
    pub fn resolve<'t>(&self, token: &'t str) -> Option<(&TokenMatcher, Option<&'t str>)> {
        self.routes.iter().find_map(|route| {
            route
                .matcher
                .matches(token)
                .map(|param| (&route.matcher, param))
        })
    }

    /// Runs the handler of the first route matching the interaction's token.
    pub async fn dispatch(&self, interaction: &Interaction) -> Result<Dispatch<T>> {
        let token = interaction.token.as_str();
        for route in &self.routes {
            if let Some(param) = route.matcher.matches(token) {
                tracing::debug!(
                    user_id = interaction.user_id,
                    token,
                    ?param,
                    "[TokenRouter] Routing interaction"
                );
                let output = route.handler.handle(interaction, param).await?;
                return Ok(Dispatch::Handled(output));
            }
        }

        tracing::warn!(
            user_id = interaction.user_id,
            token,
            "[TokenRouter] No route for token"
        );
        Ok(Dispatch::NoMatch)
    }
}
