// Shape cache configuration

/// Options controlling how shape documents are loaded and looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Accepted metadata format versions (empty accepts any)
    supported_formats: Vec<i32>,

    /// Retry failed lookups with the file suffix removed ("hero.png" -> "hero")
    suffix_fallback: bool,

    /// Track loaded documents so changed ones can be reloaded
    hot_reload: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            supported_formats: Vec::new(),
            suffix_fallback: true,
            hot_reload: cfg!(debug_assertions),
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept documents whose metadata format is one of `formats`
    pub fn with_supported_formats(mut self, formats: impl IntoIterator<Item = i32>) -> Self {
        self.supported_formats = formats.into_iter().collect();
        self
    }

    pub fn with_suffix_fallback(mut self, enabled: bool) -> Self {
        self.suffix_fallback = enabled;
        self
    }

    pub fn with_hot_reload(mut self, enabled: bool) -> Self {
        self.hot_reload = enabled;
        self
    }

    /// Check if a format version is accepted
    pub fn accepts_format(&self, format: i32) -> bool {
        self.supported_formats.is_empty() || self.supported_formats.contains(&format)
    }

    pub fn suffix_fallback(&self) -> bool {
        self.suffix_fallback
    }

    pub fn hot_reload(&self) -> bool {
        self.hot_reload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_accept_any_format() {
        let config = LoaderConfig::default();
        assert!(config.accepts_format(1));
        assert!(config.accepts_format(42));
        assert!(config.suffix_fallback());
    }

    #[test]
    fn test_restricted_formats() {
        let config = LoaderConfig::new()
            .with_supported_formats([1])
            .with_suffix_fallback(false)
            .with_hot_reload(true);

        assert!(config.accepts_format(1));
        assert!(!config.accepts_format(2));
        assert!(!config.suffix_fallback());
        assert!(config.hot_reload());
    }
}
