//! Base plugin trait definition.

use crate::Result;

/// Base trait implemented by every pluggable component.
///
/// Plugins are shared behind `Arc` across threads, so they must be
/// `Send + Sync`.
///
/// # Example
///
/// ```rust
/// use docio::plugins::Plugin;
///
/// struct AuditPlugin;
///
/// impl Plugin for AuditPlugin {
///     fn name(&self) -> &str {
///         "audit-plugin"
///     }
///
///     fn version(&self) -> String {
///         "1.0.0".to_string()
///     }
/// }
/// ```
pub trait Plugin: Send + Sync {
    /// Unique kebab-case identifier, e.g. `"pdf-extractor"`.
    fn name(&self) -> &str;

    /// Semantic version of the plugin.
    fn version(&self) -> String;

    /// Called once when the plugin is registered.
    ///
    /// Registration is aborted when this returns an error.
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        ""
    }
}
