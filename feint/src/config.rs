//! Test adapter configuration.
//!
//! - [`AdapterConfig`] - Canned responses, url matcher and hooks
//! - [`TestAdapterConfig`] - Every shape a configuration may be supplied in
//! - [`ConfigHandle`] - The shared, mutable configuration read on every request
//!
//! # JSON
//!
//! Configurations can be loaded from JSON fixtures. The accepted shapes are:
//!
//! ```json
//! null
//! [{ "id": 1 }, { "id": 2 }]
//! {
//!   "defaultResponse": { "data": [] },
//!   "responses": [
//!     { "url": "Customers", "data": [{ "id": 1 }] },
//!     { "url": "Orders", "status": 500, "isError": true }
//!   ]
//! }
//! ```
//!
//! An array is shorthand for `{ "defaultResponse": { "data": <array> } }`.
//! `responses` may also be a single object. Matchers and hooks are code-only
//! and attach through the builder methods on [`AdapterConfig`].

use feint_core::{
    AfterErrorHook, AfterSuccessHook, BeforeHook, ConfigurationError, NoopHook, Response,
    UrlMatcher,
};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;
use std::{
    borrow::Cow,
    fmt,
    io::Read,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard},
};

/// Canned responses and instrumentation for a test adapter.
///
/// # Example
///
/// ```rust,ignore
/// let config = AdapterConfig::new()
///     .with_response(Response::for_url("Customers").with_data(json!([{ "id": 1 }])))
///     .with_response(Response::for_url("Orders").with_status(500))
///     .with_default_response(Response::new().with_data(json!([])))
///     .before(|request: &Request, response: Option<&Response>| {
///         println!("{:?} -> {:?}", request.url(), response.map(|r| r.pattern()));
///     });
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterConfig {
    /// Response used when no entry of `responses` matches.
    pub default_response: Option<Response>,
    /// Candidate responses, tried in order.
    #[serde(deserialize_with = "one_or_many")]
    pub responses: Vec<Response>,
    /// Decides whether a response's url pattern applies. Regex when absent.
    ///
    /// Runs while the configuration is read-locked and must not reconfigure
    /// the test adapter.
    #[serde(skip)]
    pub url_matcher: Option<Arc<dyn UrlMatcher>>,
    /// Runs before every intercepted request.
    #[serde(skip)]
    pub before: Option<Arc<dyn BeforeHook>>,
    /// Runs on the success channel before the caller's callback.
    #[serde(skip)]
    pub after_success: Option<Arc<dyn AfterSuccessHook>>,
    /// Runs on the error channel before the caller's callback.
    #[serde(skip)]
    pub after_error: Option<Arc<dyn AfterErrorHook>>,
}

impl AdapterConfig {
    /// Create an empty configuration. Every request passes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a candidate response.
    pub fn with_response(mut self, response: Response) -> Self {
        self.responses.push(response);
        self
    }

    /// Append several candidate responses, keeping their order.
    pub fn with_responses(mut self, responses: impl IntoIterator<Item = Response>) -> Self {
        self.responses.extend(responses);
        self
    }

    /// Set the fallback response.
    pub fn with_default_response(mut self, response: Response) -> Self {
        self.default_response = Some(response);
        self
    }

    /// Replace the url matcher.
    pub fn url_matcher(mut self, matcher: impl UrlMatcher + 'static) -> Self {
        self.url_matcher = Some(Arc::new(matcher));
        self
    }

    /// Set the `before` hook.
    pub fn before(mut self, hook: impl BeforeHook + 'static) -> Self {
        self.before = Some(Arc::new(hook));
        self
    }

    /// Set the `afterSuccess` hook.
    pub fn after_success(mut self, hook: impl AfterSuccessHook + 'static) -> Self {
        self.after_success = Some(Arc::new(hook));
        self
    }

    /// Set the `afterError` hook.
    pub fn after_error(mut self, hook: impl AfterErrorHook + 'static) -> Self {
        self.after_error = Some(Arc::new(hook));
        self
    }

    /// The configured hooks, with no-ops standing in for absent ones.
    pub fn hooks(&self) -> Hooks {
        Hooks {
            before: self.before.clone().unwrap_or_else(|| Arc::new(NoopHook)),
            after_success: self
                .after_success
                .clone()
                .unwrap_or_else(|| Arc::new(NoopHook)),
            after_error: self
                .after_error
                .clone()
                .unwrap_or_else(|| Arc::new(NoopHook)),
        }
    }

    /// Load a configuration object from JSON.
    ///
    /// Unlike [`TestAdapterConfig::from_json_str`] this accepts only the
    /// object shape.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl fmt::Debug for AdapterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterConfig")
            .field("default_response", &self.default_response)
            .field("responses", &self.responses)
            .field("url_matcher", &self.url_matcher.is_some())
            .field("before", &self.before.is_some())
            .field("after_success", &self.after_success.is_some())
            .field("after_error", &self.after_error.is_some())
            .finish()
    }
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Response>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                Response::deserialize(item)
                    .map_err(|e| D::Error::custom(format!("responses[{index}]: {e}")))
            })
            .collect(),
        Some(item) => Response::deserialize(&item)
            .map(|response| vec![response])
            .map_err(|e| D::Error::custom(format!("responses: {e}"))),
    }
}

/// Resolved instrumentation hooks.
#[derive(Clone)]
pub struct Hooks {
    /// Runs before every intercepted request.
    pub before: Arc<dyn BeforeHook>,
    /// Runs on the success channel.
    pub after_success: Arc<dyn AfterSuccessHook>,
    /// Runs on the error channel.
    pub after_error: Arc<dyn AfterErrorHook>,
}

/// Every shape a test adapter configuration may take.
///
/// Resolved into an [`AdapterConfig`] by [`normalize`](Self::normalize) on
/// every intercepted request.
#[derive(Clone, Debug, Default)]
pub enum TestAdapterConfig {
    /// No configuration. Every request passes through.
    #[default]
    Unset,
    /// Shorthand: every request succeeds with this sequence as data.
    Data(Vec<Value>),
    /// A full configuration.
    Config(AdapterConfig),
    /// JSON that describes none of the above. Rejected at dispatch time.
    Malformed {
        /// The rejected value.
        value: Value,
        /// Why it was rejected.
        reason: String,
    },
}

impl TestAdapterConfig {
    /// Classify a JSON value.
    ///
    /// `null` is [`Unset`](Self::Unset), an array is [`Data`](Self::Data), an
    /// object is parsed as an [`AdapterConfig`]. Anything else, including an
    /// object that does not parse, is kept as [`Malformed`](Self::Malformed).
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Null => Self::Unset,
            Value::Array(items) => Self::Data(items),
            Value::Object(_) => match AdapterConfig::deserialize(&value) {
                Ok(config) => Self::Config(config),
                Err(e) => Self::Malformed {
                    reason: e.to_string(),
                    value,
                },
            },
            other => Self::Malformed {
                reason: format!("found {}", json_kind(&other)),
                value: other,
            },
        }
    }

    /// Parse and classify a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigurationError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(value))
    }

    /// Read and classify a JSON document.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigurationError> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::from_value(value))
    }

    /// Resolve into the canonical [`AdapterConfig`] shape.
    pub fn normalize(&self) -> Result<Cow<'_, AdapterConfig>, ConfigurationError> {
        match self {
            Self::Unset => Ok(Cow::Owned(AdapterConfig::default())),
            Self::Data(items) => Ok(Cow::Owned(
                AdapterConfig::new()
                    .with_default_response(Response::new().with_data(Value::Array(items.clone()))),
            )),
            Self::Config(config) => Ok(Cow::Borrowed(config)),
            Self::Malformed { reason, .. } => {
                Err(ConfigurationError::MalformedConfig(reason.clone()))
            }
        }
    }

    /// Mutable access to the configuration as an [`AdapterConfig`].
    ///
    /// `Unset` and `Data` are converted to their normalized form first. A
    /// `Malformed` configuration is discarded and replaced with an empty one.
    pub fn config_mut(&mut self) -> &mut AdapterConfig {
        if !matches!(self, Self::Config(_)) {
            let config = self.normalize().map(Cow::into_owned).unwrap_or_default();
            *self = Self::Config(config);
        }
        match self {
            Self::Config(config) => config,
            _ => unreachable!("configuration was just normalized"),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<AdapterConfig> for TestAdapterConfig {
    fn from(config: AdapterConfig) -> Self {
        Self::Config(config)
    }
}

impl From<Vec<Value>> for TestAdapterConfig {
    fn from(items: Vec<Value>) -> Self {
        Self::Data(items)
    }
}

impl From<Value> for TestAdapterConfig {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl<T: Into<TestAdapterConfig>> From<Option<T>> for TestAdapterConfig {
    fn from(config: Option<T>) -> Self {
        config.map_or(Self::Unset, Into::into)
    }
}

/// Shared handle to a test adapter's configuration.
///
/// The fake dispatcher reads it fresh on every request, so changes made
/// through any clone apply to the next request.
#[derive(Clone, Debug, Default)]
pub struct ConfigHandle(Arc<RwLock<TestAdapterConfig>>);

impl ConfigHandle {
    /// Create a handle holding `config`.
    pub fn new(config: impl Into<TestAdapterConfig>) -> Self {
        Self(Arc::new(RwLock::new(config.into())))
    }

    /// A snapshot of the current configuration.
    pub fn get(&self) -> TestAdapterConfig {
        self.read().clone()
    }

    /// Replace the configuration.
    pub fn set(&self, config: impl Into<TestAdapterConfig>) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = config.into();
    }

    /// Mutate the configuration in place.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// handle.update(|config| {
    ///     config.config_mut().responses.push(Response::for_url("Orders").with_status(404));
    /// });
    /// ```
    pub fn update<R>(&self, f: impl FnOnce(&mut TestAdapterConfig) -> R) -> R {
        f(&mut self.0.write().unwrap_or_else(PoisonError::into_inner))
    }

    pub(crate) fn read(&self) -> RwLockReadGuard<'_, TestAdapterConfig> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
}
