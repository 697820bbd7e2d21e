//! Formatting context
//!
//! Owns the state shared by every render: the format cache, the buffer pool
//! and the number locale. Build one at startup and share it (usually behind
//! an `Arc`); tests can build their own for isolation.

use unitas_core::{NumberLocale, UnitsConfig};
use crate::format_cache::FormatCache;
use crate::pool::BufferPool;

/// Shared state for parsing and formatting units and quantities
pub struct UnitsContext {
    cache: FormatCache,
    pool: BufferPool,
    locale: NumberLocale,
}

impl UnitsContext {
    pub fn new() -> Self {
        Self::from_config(&UnitsConfig::default())
    }

    pub fn from_config(config: &UnitsConfig) -> Self {
        Self {
            cache: FormatCache::new(),
            pool: BufferPool::new(config.pool_capacity, config.buffer_capacity),
            locale: config.locale,
        }
    }

    pub fn with_locale(mut self, locale: NumberLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_pool_capacity(mut self, capacity: usize) -> Self {
        self.pool = BufferPool::new(capacity, self.pool.buffer_capacity());
        self
    }

    pub fn cache(&self) -> &FormatCache {
        &self.cache
    }

    pub fn pool(&self) -> &BufferPool {
        &self.pool
    }

    pub fn locale(&self) -> &NumberLocale {
        &self.locale
    }
}

impl Default for UnitsContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_from_config() {
        let config = UnitsConfig::from_json(r#"{ "pool_capacity": 3, "locale": { "decimal_separator": "," } }"#).unwrap();
        let ctx = UnitsContext::from_config(&config);
        assert_eq!(ctx.pool().capacity(), 3);
        assert_eq!(ctx.locale().decimal_separator, ',');
        assert!(ctx.cache().is_empty());
    }

    #[test]
    fn test_builder() {
        let ctx = UnitsContext::new()
            .with_pool_capacity(1)
            .with_locale(NumberLocale::new(',', '.'));
        assert_eq!(ctx.pool().capacity(), 1);
        assert_eq!(ctx.locale().group_separator, '.');
    }

    #[test]
    fn test_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UnitsContext>();

        let ctx = Arc::new(UnitsContext::default());
        let clone = Arc::clone(&ctx);
        std::thread::spawn(move || {
            clone.pool().borrow().push('x');
        })
            .join()
            .unwrap();
        assert_eq!(ctx.pool().idle_count(), 1);
    }
}
