//! Render adapter
//!
//! Resolves the effective options for one widget instance and mounts it:
//!
//! 1. Locate the target element by `selector` (default `body`).
//! 2. Resolve each remaining field: a `data-{prefix}-{field}` attribute on the
//!    target wins over the programmatic value; a default applies only when
//!    both are absent (`id` and `autoResize` have one, size bounds don't).
//! 3. Append a full-width iframe to the target.
//! 4. Hand the iframe to the resize capability.
//!
//! Failures here are local to one render call: they are reported on the host
//! console and nothing propagates.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tyforms_host::{AttributeReader, FrameSpec, Host, HostError, ResizeOptions};

use crate::coerce::{is_truthy, scalar_text, str_to_bool};
use crate::config::Configuration;

/// Selector used when none is given
pub const DEFAULT_SELECTOR: &str = "body";

/// `autoResize` value used when none is given (before boolean coercion)
pub const DEFAULT_AUTO_RESIZE: &str = "true";

/// Random bytes drawn for a generated id
const ID_ENTROPY_BYTES: usize = 8;

// =============================================================================
// Options
// =============================================================================

/// Render options as passed programmatically to `render`.
///
/// Every field is optional. Scalars of any type are accepted and kept in their
/// text form, the same form a data attribute has. Falsy values (`false`, `0`,
/// `null`, `""`) count as absent, so the field falls through to its default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RenderOptions {
    /// Selector of the wrapper element the widget renders into
    #[serde(deserialize_with = "scalar")]
    pub selector: Option<String>,
    /// URL of the widget iframe
    #[serde(deserialize_with = "scalar")]
    pub url: Option<String>,
    /// Element id of the iframe
    #[serde(deserialize_with = "scalar")]
    pub id: Option<String>,
    /// Keep resizing when the page or widget content changes
    #[serde(deserialize_with = "scalar")]
    pub auto_resize: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub max_height: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub min_height: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub max_width: Option<String>,
    #[serde(deserialize_with = "scalar")]
    pub min_width: Option<String>,
}

fn scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(&value).filter(|v| is_truthy(v)).and_then(scalar_text))
}

impl RenderOptions {
    /// Decode handler params. Missing or non-object params give empty options.
    pub fn from_params(params: Option<&Value>) -> Self {
        match params {
            Some(value @ Value::Object(_)) => {
                serde_json::from_value(value.clone()).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }
}

/// Render fields that a data attribute can override.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Url,
    Id,
    AutoResize,
    MaxHeight,
    MinHeight,
    MaxWidth,
    MinWidth,
}

impl Field {
    /// Suffix of the dataset key (`{prefix}{suffix}`)
    fn dataset_suffix(self) -> &'static str {
        match self {
            Field::Url => "Url",
            Field::Id => "Id",
            Field::AutoResize => "AutoResize",
            Field::MaxHeight => "MaxHeight",
            Field::MinHeight => "MinHeight",
            Field::MaxWidth => "MaxWidth",
            Field::MinWidth => "MinWidth",
        }
    }

    /// Attribute name for this field under `prefix`, e.g. `data-ty-auto-resize`.
    pub fn attribute_name(self, prefix: &str) -> String {
        dataset_attribute(&format!("{}{}", prefix, self.dataset_suffix()))
    }

    fn param(self, options: &RenderOptions) -> Option<&str> {
        match self {
            Field::Url => options.url.as_deref(),
            Field::Id => options.id.as_deref(),
            Field::AutoResize => options.auto_resize.as_deref(),
            Field::MaxHeight => options.max_height.as_deref(),
            Field::MinHeight => options.min_height.as_deref(),
            Field::MaxWidth => options.max_width.as_deref(),
            Field::MinWidth => options.min_width.as_deref(),
        }
    }
}

/// Attribute name backing a camelCase dataset key (`tyMaxHeight` -> `data-ty-max-height`).
fn dataset_attribute(key: &str) -> String {
    let mut name = String::with_capacity(key.len() + 8);
    name.push_str("data-");
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            name.push('-');
            name.push(c.to_ascii_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

/// Fully resolved options for one widget instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub selector: String,
    pub url: Option<String>,
    pub id: String,
    pub auto_resize: bool,
    pub max_height: Option<String>,
    pub min_height: Option<String>,
    pub max_width: Option<String>,
    pub min_width: Option<String>,
}

impl ResolvedOptions {
    pub fn frame(&self) -> FrameSpec {
        FrameSpec::new(self.id.clone(), self.url.clone())
    }

    pub fn resize_options(&self, log: bool) -> ResizeOptions {
        ResizeOptions {
            log,
            auto_resize: self.auto_resize,
            max_height: self.max_height.clone(),
            min_height: self.min_height.clone(),
            max_width: self.max_width.clone(),
            min_width: self.min_width.clone(),
        }
    }
}

// =============================================================================
// Resolution
// =============================================================================

/// Attribute value, else programmatic value. Empty strings count as absent.
fn pick<E: AttributeReader>(
    element: &E,
    prefix: &str,
    field: Field,
    options: &RenderOptions,
) -> Option<String> {
    element
        .data_attribute(&field.attribute_name(prefix))
        .filter(|v| !v.is_empty())
        .or_else(|| field.param(options).filter(|v| !v.is_empty()).map(String::from))
}

/// Generate a widget id: the prefix followed by a random decimal token.
pub fn generate_id<H: Host + ?Sized>(host: &H, prefix: &str) -> Result<String, HostError> {
    let mut bytes = [0u8; ID_ENTROPY_BYTES];
    host.random_bytes(&mut bytes)?;
    Ok(format!("{}{}", prefix, u64::from_le_bytes(bytes)))
}

/// Resolve all options against a located target element.
pub fn resolve<H: Host + ?Sized>(
    host: &H,
    element: &H::Element,
    selector: &str,
    prefix: &str,
    options: &RenderOptions,
) -> Result<ResolvedOptions, HostError> {
    let id = match pick(element, prefix, Field::Id, options) {
        Some(id) => id,
        None => generate_id(host, prefix)?,
    };
    let auto_resize = pick(element, prefix, Field::AutoResize, options)
        .unwrap_or_else(|| DEFAULT_AUTO_RESIZE.to_string());

    Ok(ResolvedOptions {
        selector: selector.to_string(),
        url: pick(element, prefix, Field::Url, options),
        id,
        auto_resize: str_to_bool(&auto_resize),
        max_height: pick(element, prefix, Field::MaxHeight, options),
        min_height: pick(element, prefix, Field::MinHeight, options),
        max_width: pick(element, prefix, Field::MaxWidth, options),
        min_width: pick(element, prefix, Field::MinWidth, options),
    })
}

// =============================================================================
// Mounting
// =============================================================================

/// Result of one render call
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Iframe mounted and handed to the resize capability
    Mounted(ResolvedOptions),
    /// No element matched the selector; nothing was mounted
    TargetMissing { selector: String },
    /// A host operation failed; see the console for details
    Failed(HostError),
}

/// Render one widget instance.
pub fn render<H: Host + ?Sized>(
    host: &H,
    config: &Configuration,
    options: &RenderOptions,
) -> RenderOutcome {
    let selector = options
        .selector
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SELECTOR);

    let Some(element) = host.locate(selector) else {
        host.error(&format!(
            "Could not render widget. Wrapper element {} not found",
            selector
        ));
        return RenderOutcome::TargetMissing {
            selector: selector.to_string(),
        };
    };

    let prefix = config.data_attributes_prefix();
    let resolved = match resolve(host, &element, selector, &prefix, options) {
        Ok(resolved) => resolved,
        Err(e) => {
            host.error(&format!("Could not render widget into {}: {}", selector, e));
            return RenderOutcome::Failed(e);
        }
    };

    let frame = resolved.frame();
    if let Err(e) = host.mount_iframe(&element, &frame) {
        host.error(&format!("Could not render widget into {}: {}", selector, e));
        return RenderOutcome::Failed(e);
    }

    // The iframe stays mounted even if the resize library is missing.
    if let Err(e) = host.attach_resize(&resolved.resize_options(config.debug()), &frame.selector()) {
        host.error(&format!("Could not attach resize to {}: {}", frame.selector(), e));
        return RenderOutcome::Failed(e);
    }

    RenderOutcome::Mounted(resolved)
}
