//! Fixed reply texts.

/// Terminal resolution or direct lookup found no row.
pub const NO_MATCHING_LOCATION: &str = "There is no location matching those conditions.";

/// Hierarchy sheet missing, unreadable or malformed.
pub const DATA_UNAVAILABLE: &str = "Sorry, the investigation data is unavailable right now.";

/// Direct lookup utterance had fewer than six tokens.
pub const DIRECT_LOOKUP_USAGE: &str = "Please enter the places and the target exactly. \
Example: Seoul Gangnam-gu Samseong-dong Polytech Raon-hall 1F-water-purifier";

/// Prefix of the non-terminal option listing.
pub const AVAILABLE_PREFIX: &str = "Available:";

/// Menu button pressed but the hierarchy has no rows.
pub const NO_INVESTIGATION_DATA: &str = "No investigation data.";

pub const AUTH_CODE_REQUIRED: &str = "Please enter your authentication code.";
pub const AUTH_CODE_INVALID: &str = "The authentication code is not valid.";
pub const SETTLEMENT_DEFAULT: &str = "Settlement processed.";
pub const RANDOM_NONE: &str = "No random answer.";
pub const UNKNOWN_REQUEST: &str = "Request not understood.";

/// Name recorded for callers without a credential row.
pub const UNKNOWN_CALLER: &str = "Unknown";

pub fn welcome(name: &str) -> String {
    format!("Welcome, {}.", name)
}

pub fn server_error(detail: &str) -> String {
    format!("Server error: {}", detail)
}

/// `"Available: a, b, c"`
pub fn available(options: &[String]) -> String {
    format!("{} {}", AVAILABLE_PREFIX, options.join(", "))
}
