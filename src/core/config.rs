//! TOML configuration for queues
//!
//! ```toml
//! order = "fifo-limited"
//! limit = 100
//! stream_buffer = 32
//!
//! [logging]
//! level = "debug"
//! format = "ext"
//! ```
//!
//! Every key is optional; `order` defaults to `fifo`.

use crate::core::logging::{self, LOG_FORMATS};
use crate::queue::{
    ElementStream, OrderDiscipline, Queue, QueueError, QueueResult, DEFAULT_STREAM_BUFFER,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] QueueError),

    #[error("unsupported log format '{0}' (expected one of: text, ext, json)")]
    LogFormat(String),

    #[error("failed to initialise logging: {0}")]
    Logging(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
    pub color: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
            color: false,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_FORMATS.contains(&self.format.as_str()) {
            return Err(ConfigError::LogFormat(self.format.clone()));
        }
        Ok(())
    }

    /// Install the global logger with these settings
    pub fn apply(&self) -> Result<(), ConfigError> {
        self.validate()?;
        logging::init_logging(
            Some(&self.level),
            Some(&self.format),
            self.file.as_deref(),
            self.color,
        )
        .map_err(|e| ConfigError::Logging(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    pub order: OrderDiscipline,
    /// Maximum length for `fifo-limited`; 0 means unbounded
    pub limit: i64,
    /// Channel capacity for snapshot streams
    pub stream_buffer: usize,
    pub logging: LoggingConfig,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            order: OrderDiscipline::Fifo,
            limit: 0,
            stream_buffer: DEFAULT_STREAM_BUFFER,
            logging: LoggingConfig::default(),
        }
    }
}

impl QueueConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: QueueConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!(
            "loaded queue configuration from {} (order: {}, limit: {})",
            path.display(),
            config.order,
            config.limit
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit < 0 {
            return Err(QueueError::InvalidQueueLimit { limit: self.limit }.into());
        }
        self.logging.validate()
    }

    /// Stream `queue` with the configured channel capacity
    pub fn open_stream<T: Clone + Send + 'static>(&self, queue: &Queue<T>) -> ElementStream<T> {
        queue.stream(self.stream_buffer)
    }
}

impl<T: Send + 'static> Queue<T> {
    /// Build a queue with the configured discipline and limit
    pub fn from_config(config: &QueueConfig) -> QueueResult<Self> {
        Queue::with_limit(config.order, config.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::BaseElement;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = QueueConfig::from_toml_str("").unwrap();
        assert_eq!(config, QueueConfig::default());
        assert_eq!(config.order, OrderDiscipline::Fifo);
        assert_eq!(config.stream_buffer, DEFAULT_STREAM_BUFFER);
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_full_config() {
        let config = QueueConfig::from_toml_str(
            r#"
            order = "fifo-limited"
            limit = 3
            stream_buffer = 4

            [logging]
            level = "debug"
            format = "json"
            color = true
            "#,
        )
        .unwrap();

        assert_eq!(config.order, OrderDiscipline::FifoLimited);
        assert_eq!(config.limit, 3);
        assert_eq!(config.stream_buffer, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.color);
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn test_unknown_order_is_a_parse_error() {
        let result = QueueConfig::from_toml_str(r#"order = "random""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_key_is_a_parse_error() {
        let result = QueueConfig::from_toml_str("capacity = 10");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_negative_limit_rejected() {
        match QueueConfig::from_toml_str("limit = -2") {
            Err(ConfigError::Invalid(QueueError::InvalidQueueLimit { limit })) => {
                assert_eq!(limit, -2)
            }
            other => panic!("Expected InvalidQueueLimit, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let result = QueueConfig::from_toml_str("[logging]\nformat = \"xml\"");
        assert!(matches!(result, Err(ConfigError::LogFormat(f)) if f == "xml"));
    }

    #[test]
    #[serial_test::serial]
    fn test_logging_config_apply() {
        let bad = LoggingConfig {
            format: "xml".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(bad.apply(), Err(ConfigError::LogFormat(_))));

        let good = LoggingConfig {
            level: "debug".to_string(),
            ..LoggingConfig::default()
        };
        // the global logger may already be installed by another test
        match good.apply() {
            Ok(()) | Err(ConfigError::Logging(_)) => {}
            Err(other) => panic!("Expected logger setup to run, got {:?}", other),
        }
    }

    #[test]
    fn test_queue_from_config() {
        let config = QueueConfig::from_toml_str("order = \"fifo-limited\"\nlimit = 2").unwrap();
        let queue = Queue::from_config(&config).unwrap();
        for c in 0..5 {
            queue.insert(BaseElement::new(c)).unwrap();
        }
        assert_eq!(queue.order(), OrderDiscipline::FifoLimited);
        assert_eq!(queue.all_elements(), vec![4, 3]);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "order = \"priority-low\"").unwrap();
        writeln!(file, "stream_buffer = 2").unwrap();

        let config = QueueConfig::load(file.path()).await.unwrap();
        assert_eq!(config.order, OrderDiscipline::PriorityLow);

        let queue: Queue<u8> = Queue::from_config(&config).unwrap();
        queue.insert(BaseElement::new(1)).unwrap();
        let mut stream = config.open_stream(&queue);
        assert_eq!(stream.recv().await, Some(1));
        assert_eq!(stream.recv().await, None);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        match QueueConfig::load(&path).await {
            Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }
}
