//! Archive writer configuration.

use std::borrow::Cow;

/// Archive writer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterConfig {
    /// Prefix of the temporary file created next to the destination.
    pub temp_prefix: Cow<'static, str>,
    /// Suffix of the temporary file.
    pub temp_suffix: Cow<'static, str>,
    /// Images of at least this many bytes are read twice from disk (once to
    /// measure, once to copy) instead of being buffered in memory.
    pub stream_threshold: u64,
    /// Flush the temporary file to stable storage before it replaces the
    /// destination.
    pub sync: bool,
}

impl WriterConfig {
    /// Default settings: 8 MiB stream threshold, synced.
    pub const DEFAULT: Self = Self {
        temp_prefix: Cow::Borrowed("oxicbz-"),
        temp_suffix: Cow::Borrowed(".tmp"),
        stream_threshold: 8 * 1024 * 1024,
        sync: true,
    };

    /// Skip the final sync. The replace is still atomic, but a crash right
    /// after it may leave an incomplete file behind.
    pub const FAST: Self = Self {
        sync: false,
        ..Self::DEFAULT
    };

    /// Never buffer an image in memory.
    pub const LOW_MEMORY: Self = Self {
        stream_threshold: 0,
        ..Self::DEFAULT
    };

    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// Set the temporary file prefix.
    pub fn temp_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.temp_prefix = prefix.into();
        self
    }

    /// Set the temporary file suffix.
    pub fn temp_suffix(mut self, suffix: impl Into<Cow<'static, str>>) -> Self {
        self.temp_suffix = suffix.into();
        self
    }

    /// Set the stream threshold in bytes.
    pub fn stream_threshold(mut self, bytes: u64) -> Self {
        self.stream_threshold = bytes;
        self
    }

    /// Set whether the temporary file is synced.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Whether an image of `len` bytes is copied from a reopened file.
    pub(crate) fn streams(&self, len: u64) -> bool {
        len >= self.stream_threshold
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let config = WriterConfig::default();
        assert_eq!(config.temp_prefix, "oxicbz-");
        assert_eq!(config.temp_suffix, ".tmp");
        assert_eq!(config.stream_threshold, 8 * 1024 * 1024);
        assert!(config.sync);

        assert!(!WriterConfig::FAST.sync);
        assert_eq!(WriterConfig::FAST.stream_threshold, config.stream_threshold);
        assert!(WriterConfig::LOW_MEMORY.streams(0));
    }

    #[test]
    fn test_builder() {
        let config = WriterConfig::new()
            .temp_prefix(format!("job-{}-", 7))
            .temp_suffix(".part")
            .stream_threshold(1024)
            .sync(false);
        assert_eq!(config.temp_prefix, "job-7-");
        assert_eq!(config.temp_suffix, ".part");
        assert!(!config.streams(1023));
        assert!(config.streams(1024));
        assert!(!config.sync);
    }
}
