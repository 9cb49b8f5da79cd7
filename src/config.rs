//! Runtime options for loading and displaying outputs.

use std::time::Duration;

/// Default HTTP timeout for remote datasets.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Default static figure size in pixels (matplotlib's 6.4x4.8in at 100 dpi).
pub const DEFAULT_FIGURE_SIZE: (u32, u32) = (640, 480);

/// Options shared by the loader, table view and static renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Upper bound for a remote fetch, connect included.
    pub http_timeout: Duration,
    pub user_agent: String,
    /// Rows shown by table outputs. `None` shows every row.
    pub max_rows: Option<usize>,
    /// Emit `application/vnd.dataresource+json` alongside text tables.
    pub table_schema: bool,
    pub figure_size: (u32, u32),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            max_rows: None,
            table_schema: true,
            figure_size: DEFAULT_FIGURE_SIZE,
        }
    }
}

impl Config {
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_rows(mut self, max_rows: Option<usize>) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn with_table_schema(mut self, enabled: bool) -> Self {
        self.table_schema = enabled;
        self
    }

    pub fn with_figure_size(mut self, width: u32, height: u32) -> Self {
        self.figure_size = (width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_notebook_options() {
        let config = Config::default();
        assert_eq!(config.max_rows, None);
        assert!(config.table_schema);
        assert_eq!(config.figure_size, (640, 480));
        assert!(config.user_agent.starts_with("chartify_notebook/"));
    }

    #[test]
    fn builder_setters_override_fields() {
        let config = Config::default()
            .with_http_timeout(Duration::from_millis(250))
            .with_max_rows(Some(10))
            .with_table_schema(false)
            .with_figure_size(300, 200);

        assert_eq!(config.http_timeout, Duration::from_millis(250));
        assert_eq!(config.max_rows, Some(10));
        assert!(!config.table_schema);
        assert_eq!(config.figure_size, (300, 200));
    }
}
