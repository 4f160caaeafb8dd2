//! # Domain Entities
//!
//! The navigation handoff and the assembled dashboard view.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use shared_types::{ContentRecord, StatusMessage, StealthAddress};
use url::{form_urlencoded, Url};

use super::errors::DashboardError;

/// Query parameter carrying the stealth address.
pub const STEALTH_PARAM: &str = "stealth";

/// Resolves relative routes so they parse like full URLs.
const ROUTE_BASE: &str = "http://writex.invalid/";

/// The single value handed from registration to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DashboardHandoff {
    /// The participant's stealth address.
    pub stealth_address: StealthAddress,
}

impl DashboardHandoff {
    /// Wrap a stealth address.
    pub fn new(stealth_address: StealthAddress) -> Self {
        Self { stealth_address }
    }

    /// Percent-encoded query string, e.g. `stealth=0xabc`.
    pub fn query(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(STEALTH_PARAM, self.stealth_address.as_str())
            .finish()
    }

    /// Route for the dashboard page, e.g. `/blog-page?stealth=0xabc`.
    pub fn to_route(&self, route_path: &str) -> String {
        format!("{}?{}", route_path, self.query())
    }

    /// Parse a route (`/blog-page?stealth=..`), a full URL, or a bare query
    /// string (`stealth=..`).
    pub fn parse(input: &str) -> Result<Self, DashboardError> {
        let url = locate(input)
            .map_err(|e| DashboardError::InvalidHandoff(format!("bad route `{input}`: {e}")))?;

        let value = url
            .query_pairs()
            .find(|(key, _)| key == STEALTH_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| {
                DashboardError::InvalidHandoff(format!("missing `{STEALTH_PARAM}` parameter"))
            })?;

        let stealth_address = StealthAddress::new(value)
            .map_err(|_| DashboardError::InvalidHandoff(format!("empty `{STEALTH_PARAM}` parameter")))?;
        Ok(Self { stealth_address })
    }
}

fn locate(input: &str) -> Result<Url, url::ParseError> {
    if let Ok(url) = Url::parse(input) {
        return Ok(url);
    }
    // A bare query has no `?` of its own.
    let relative = if input.contains('?') {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(format!("?{input}"))
    };
    Url::parse(ROUTE_BASE)?.join(&relative)
}

impl From<StealthAddress> for DashboardHandoff {
    fn from(stealth_address: StealthAddress) -> Self {
        Self::new(stealth_address)
    }
}

impl fmt::Display for DashboardHandoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}

/// What the dashboard shows after a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Whose dashboard this is.
    pub stealth_address: StealthAddress,
    /// Records in ledger order.
    pub records: Vec<ContentRecord>,
    /// Load outcome for the participant.
    pub status: StatusMessage,
}

impl DashboardView {
    /// Build a view and its status line.
    pub fn new(stealth_address: StealthAddress, records: Vec<ContentRecord>) -> Self {
        let status = match records.len() {
            0 => StatusMessage::info("No blogs published yet."),
            1 => StatusMessage::success("Loaded 1 blog."),
            n => StatusMessage::success(format!("Loaded {n} blogs.")),
        };
        Self {
            stealth_address,
            records,
            status,
        }
    }

    /// Short form of the stealth address for headers: `0x1234...abcd`.
    pub fn short_address(&self) -> String {
        let addr = self.stealth_address.as_str();
        let chars: Vec<char> = addr.chars().collect();
        if chars.len() <= 10 {
            return addr.to_string();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}
