//! Common constants used throughout craft.

/// Supported project configuration file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["craft.json", "craft.yml", "craft.yaml"];

/// Root prefix every template fragment identifier is resolved under.
pub const TEMPLATE_ROOT: &str = "templates";

pub const DEFAULT_CLI_FRAMEWORK: &str = "cobra";
pub const DEFAULT_LICENSE: &str = "mit";
pub const DEFAULT_GO_VERSION: &str = "1.21";
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";
pub const DEFAULT_CONFIG_FORMAT: &str = "yml";
