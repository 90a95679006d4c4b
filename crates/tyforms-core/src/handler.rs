//! Live API handler
//!
//! Once bootstrap has seen `init`, the instance slot holds a [`Handler`] bound
//! to the merged configuration. Every later call, queued or direct, goes
//! through [`Handler::call`].

use std::rc::Rc;

use serde_json::Value;
use tyforms_host::Host;

use crate::command::Api;
use crate::config::Configuration;
use crate::error::ApiError;
use crate::render::{self, RenderOptions};

/// API handler bound to one configuration
pub struct Handler<H> {
    config: Rc<Configuration>,
    host: Rc<H>,
}

impl<H> Clone for Handler<H> {
    fn clone(&self) -> Self {
        Self {
            config: Rc::clone(&self.config),
            host: Rc::clone(&self.host),
        }
    }
}

impl<H> core::fmt::Debug for Handler<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Handler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H: Host> Handler<H> {
    pub fn new(config: Configuration, host: Rc<H>) -> Self {
        Self {
            config: Rc::new(config),
            host,
        }
    }

    /// The configuration this handler is bound to
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Handle one API call.
    ///
    /// # Returns
    /// * `Ok(())` - Call handled (unsupported names are logged, not rejected)
    /// * `Err(ApiError::MissingApi)` - `api` was empty
    pub fn call(&self, api: &str, params: Option<&Value>) -> Result<(), ApiError> {
        if api.is_empty() {
            return Err(ApiError::MissingApi);
        }
        let api = Api::parse(api);

        let params_json = params.map_or_else(|| "undefined".to_string(), Value::to_string);
        self.host.log(&format!(
            "Handling API call {} {} {}",
            api,
            params_json,
            self.config.to_json()
        ));

        if !api.is_supported() {
            self.host.error(&format!("Method {} is not supported", api));
        }

        match api {
            Api::Render => {
                render::render(
                    self.host.as_ref(),
                    &self.config,
                    &RenderOptions::from_params(params),
                );
            }
            Api::Init | Api::Unsupported(_) => {
                self.host.warn(&format!("No handler defined for {}", api));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tyforms_host_mock::{LogLevel, MockElement, MockHost};

    fn handler(host: &Rc<MockHost>) -> Handler<MockHost> {
        Handler::new(Configuration::default(), Rc::clone(host))
    }

    #[test]
    fn test_missing_api_is_an_error() {
        let host = Rc::new(MockHost::with_body());
        assert_eq!(handler(&host).call("", None), Err(ApiError::MissingApi));
        assert!(host.console_log().is_empty());
        assert!(host.mounted().is_empty());
    }

    #[test]
    fn test_render_mounts_widget() {
        let host = Rc::new(MockHost::new());
        host.add_element(MockElement::new("#w"));

        handler(&host)
            .call("RENDER", Some(&json!({ "selector": "#w", "url": "https://x" })))
            .unwrap();

        let mounted = host.mounted();
        assert_eq!(mounted.len(), 1);
        assert_eq!(mounted[0].frame.url.as_deref(), Some("https://x"));
        assert!(host.has_level_containing(LogLevel::Log, "Handling API call render"));
    }

    #[test]
    fn test_unsupported_api_logged_not_fatal() {
        let host = Rc::new(MockHost::with_body());

        assert!(handler(&host).call("close", None).is_ok());

        assert!(host.has_level_containing(LogLevel::Error, "Method close is not supported"));
        assert!(host.has_level_containing(LogLevel::Warn, "No handler defined for close"));
        assert!(host.mounted().is_empty());
    }

    #[test]
    fn test_init_after_bootstrap_is_a_no_op() {
        let host = Rc::new(MockHost::with_body());
        let handler = handler(&host);

        handler.call("init", Some(&json!({ "debug": true }))).unwrap();

        assert!(!handler.config().debug());
        assert!(host.has_level_containing(LogLevel::Warn, "No handler defined for init"));
        assert!(!host.has_level_containing(LogLevel::Error, "not supported"));
    }

    #[test]
    fn test_render_failure_does_not_propagate() {
        let host = Rc::new(MockHost::new());
        let result = handler(&host).call("render", Some(&json!({ "selector": "#nope" })));
        assert!(result.is_ok());
        assert!(host.has_level_containing(LogLevel::Error, "#nope not found"));
    }
}
