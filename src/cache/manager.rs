//! Cache Manager Module
//!
//! Owns one pool per content category, built once from the static policy
//! table, and aggregates their statistics. Reads and writes go straight to
//! the pools; the manager only owns their lifecycle.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{CachePool, Clock, EvictionStrategy, PoolPolicy, PoolStats, SystemClock};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{Product, Testimonial};

/// Key under which the full testimonial list is stored.
pub const TESTIMONIALS_KEY: &str = "all_testimonials";

// == Category ==
/// Content categories, each backed by its own pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Static,
    Api,
    Products,
    Testimonials,
    Preferences,
    Images,
}

impl Category {
    /// Every category, in policy table order.
    pub const ALL: [Category; 6] = [
        Category::Static,
        Category::Api,
        Category::Products,
        Category::Testimonials,
        Category::Preferences,
        Category::Images,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Static => "static",
            Category::Api => "api",
            Category::Products => "products",
            Category::Testimonials => "testimonials",
            Category::Preferences => "preferences",
            Category::Images => "images",
        }
    }

    // == Policy Table ==
    /// Returns the fixed policy for this category with the default capacity.
    ///
    /// Downstream pages rely on these retention windows; do not tune them.
    pub const fn policy(&self) -> PoolPolicy {
        use EvictionStrategy::{Frequency, Recency};

        match self {
            // 365 days
            Category::Static => PoolPolicy::new(31_536_000_000, Recency, true),
            // 5 minutes
            Category::Api => PoolPolicy::new(300_000, Frequency, true),
            // 1 hour
            Category::Products => PoolPolicy::new(3_600_000, Recency, true),
            // 30 minutes
            Category::Testimonials => PoolPolicy::new(1_800_000, Recency, false),
            // 24 hours
            Category::Preferences => PoolPolicy::new(86_400_000, Recency, false),
            // 30 days
            Category::Images => PoolPolicy::new(2_592_000_000, Recency, false),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| CacheError::UnknownCategory(s.to_string()))
    }
}

// == Key Helpers ==
/// Derives a memoization key from a call name and its serialized arguments.
///
/// Use at an explicit call site: compute the key, `get` it, and `set` the
/// computed result on a miss.
pub fn memo_key<A: Serialize + ?Sized>(name: &str, args: &A) -> Result<String> {
    Ok(format!("{}_{}", name, serde_json::to_string(args)?))
}

fn product_key(id: &str) -> String {
    format!("product_{}", id)
}

fn api_key(endpoint: &str) -> String {
    format!("api_{}", endpoint)
}

// == Cache Manager ==
/// Registry of category pools.
///
/// Construct one explicitly and share it (e.g. behind an `Arc`) with the
/// components that cache content. Pools are independent: each has its own
/// lock, so traffic on one category never blocks another.
#[derive(Debug)]
pub struct CacheManager<C = SystemClock> {
    pools: BTreeMap<Category, CachePool<Value, C>>,
}

impl CacheManager<SystemClock> {
    // == Constructors ==
    /// Creates a manager with the default per-pool capacity.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Creates a manager from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for CacheManager<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CacheManager<C>
where
    C: Clock + Clone,
{
    /// Creates a manager whose pools share a custom clock (useful for testing).
    pub fn with_clock(config: &Config, clock: C) -> Self {
        let pools = Category::ALL
            .into_iter()
            .map(|category| {
                let policy = category.policy().with_max_entries(config.max_entries);
                (category, CachePool::with_clock(policy, clock.clone()))
            })
            .collect::<BTreeMap<_, _>>();

        info!(
            "Cache manager initialized: {} pools, max_entries={}",
            pools.len(),
            config.max_entries
        );

        Self { pools }
    }

    // == Pool Lookup ==
    /// Returns the pool for a category name, or None if the name is unknown.
    pub fn pool(&self, name: &str) -> Option<&CachePool<Value, C>> {
        name.parse::<Category>()
            .ok()
            .and_then(|category| self.category_pool(category))
    }

    pub fn category_pool(&self, category: Category) -> Option<&CachePool<Value, C>> {
        self.pools.get(&category)
    }

    // == Generic Accessors ==
    /// Serializes `value` and stores it in the named category.
    ///
    /// Returns false for unknown categories and rejected values.
    pub fn store<T>(&self, category: &str, key: &str, value: &T) -> bool
    where
        T: Serialize + DeserializeOwned,
    {
        match category.parse::<Category>() {
            Ok(category) => self.store_in::<T, T>(category, key, value),
            Err(err) => {
                warn!("Cache store for '{}' skipped: {}", key, err);
                false
            }
        }
    }

    /// Fetches and deserializes a value from the named category.
    pub fn fetch<T: DeserializeOwned>(&self, category: &str, key: &str) -> Option<T> {
        let category = category.parse::<Category>().ok()?;
        self.fetch_from(category, key)
    }

    /// Stores `value` as JSON. With the transform step enabled, the JSON
    /// must also read back as `T`; otherwise the write is rejected and the
    /// pool is left unchanged.
    fn store_in<T, S>(&self, category: Category, key: &str, value: &S) -> bool
    where
        T: DeserializeOwned,
        S: Serialize + ?Sized,
    {
        let Some(pool) = self.category_pool(category) else {
            return false;
        };

        let json = match serde_json::to_value(value) {
            Ok(json) => json,
            Err(err) => {
                warn!("Cache store for '{}' in {} rejected: {}", key, category, err);
                return false;
            }
        };

        if pool.policy().transform_on_store {
            if let Err(err) = serde_json::from_value::<T>(json.clone()) {
                warn!(
                    "Cache store for '{}' in {} rejected: value does not round-trip: {}",
                    key, category, err
                );
                return false;
            }
        }

        pool.set(key, json)
    }

    fn fetch_from<T: DeserializeOwned>(&self, category: Category, key: &str) -> Option<T> {
        let value = self.category_pool(category)?.get(key)?;

        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(err) => {
                warn!("Cached '{}' in {} has unexpected shape: {}", key, category, err);
                None
            }
        }
    }

    // == Convenience Accessors ==
    pub fn cache_product(&self, id: &str, product: &Product) -> bool {
        self.store_in::<Product, _>(Category::Products, &product_key(id), product)
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.fetch_from(Category::Products, &product_key(id))
    }

    pub fn cache_testimonials(&self, testimonials: &[Testimonial]) -> bool {
        self.store_in::<Vec<Testimonial>, _>(
            Category::Testimonials,
            TESTIMONIALS_KEY,
            testimonials,
        )
    }

    pub fn testimonials(&self) -> Option<Vec<Testimonial>> {
        self.fetch_from(Category::Testimonials, TESTIMONIALS_KEY)
    }

    /// Caches the response of an API endpoint in the `api` pool.
    pub fn cache_api_response<T>(&self, endpoint: &str, data: &T) -> bool
    where
        T: Serialize + DeserializeOwned,
    {
        self.store_in::<T, T>(Category::Api, &api_key(endpoint), data)
    }

    pub fn api_response<T: DeserializeOwned>(&self, endpoint: &str) -> Option<T> {
        self.fetch_from(Category::Api, &api_key(endpoint))
    }

    // == Stats ==
    /// Returns statistics for every pool, keyed by category name.
    pub fn all_stats(&self) -> BTreeMap<&'static str, PoolStats> {
        self.pools
            .iter()
            .map(|(category, pool)| (category.as_str(), pool.stats()))
            .collect()
    }

    // == Clear ==
    /// Empties every pool.
    pub fn clear_all(&self) {
        for pool in self.pools.values() {
            pool.clear();
        }
        debug!("All cache pools cleared");
    }

    /// Empties one pool by category name. Returns false if the name is unknown.
    pub fn clear_category(&self, name: &str) -> bool {
        match self.pool(name) {
            Some(pool) => {
                pool.clear();
                debug!("Cache pool '{}' cleared", name);
                true
            }
            None => false,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;

    fn test_manager() -> (CacheManager<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_700_000_000_000);
        (CacheManager::with_clock(&Config::default(), clock.clone()), clock)
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: "Purrify 120g".to_string(),
            price: 19.99,
            description: "Activated carbon litter additive".to_string(),
            image: "/images/120g.webp".to_string(),
        }
    }

    #[test]
    fn test_policy_table() {
        let expected = [
            (Category::Static, 31_536_000_000, EvictionStrategy::Recency, true),
            (Category::Api, 300_000, EvictionStrategy::Frequency, true),
            (Category::Products, 3_600_000, EvictionStrategy::Recency, true),
            (Category::Testimonials, 1_800_000, EvictionStrategy::Recency, false),
            (Category::Preferences, 86_400_000, EvictionStrategy::Recency, false),
            (Category::Images, 2_592_000_000, EvictionStrategy::Recency, false),
        ];

        for (category, ttl_ms, strategy, transform) in expected {
            let policy = category.policy();
            assert_eq!(policy.ttl_ms, ttl_ms, "{} ttl", category);
            assert_eq!(policy.strategy, strategy, "{} strategy", category);
            assert_eq!(policy.transform_on_store, transform, "{} transform", category);
            assert_eq!(policy.max_entries, 100);
        }
    }

    #[test]
    fn test_category_from_str() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "videos".parse::<Category>(),
            Err(CacheError::UnknownCategory(name)) if name == "videos"
        ));
    }

    #[test]
    fn test_manager_owns_every_category() {
        let (manager, _) = test_manager();

        for category in Category::ALL {
            assert!(manager.pool(category.as_str()).is_some());
        }
        assert!(manager.pool("videos").is_none());
        assert_eq!(manager.all_stats().len(), 6);
    }

    #[test]
    fn test_manager_uses_configured_capacity() {
        let config = Config { max_entries: 7 };
        let manager = CacheManager::with_clock(&config, ManualClock::new(0));

        let stats = manager.all_stats();
        assert!(stats.values().all(|s| s.max_entries == 7));
    }

    #[test]
    fn test_product_round_trip() {
        let (manager, _) = test_manager();

        assert!(manager.cache_product("p1", &product("p1")));
        assert_eq!(manager.product("p1"), Some(product("p1")));
        assert_eq!(manager.product("p2"), None);

        let pool = manager.pool("products").unwrap();
        assert!(pool.contains_key("product_p1"));
    }

    #[test]
    fn test_product_expires_after_one_hour() {
        let (manager, clock) = test_manager();

        manager.cache_product("p1", &product("p1"));
        clock.advance(3_600_000);
        assert!(manager.product("p1").is_some());

        clock.advance(1);
        assert!(manager.product("p1").is_none());
    }

    #[test]
    fn test_testimonials_round_trip() {
        let (manager, _) = test_manager();
        let list = vec![Testimonial {
            id: "t1".to_string(),
            name: "Sam".to_string(),
            avatar: "/avatars/sam.png".to_string(),
            testimonial: "No more litter smell".to_string(),
        }];

        assert_eq!(manager.testimonials(), None);
        assert!(manager.cache_testimonials(&list));
        assert_eq!(manager.testimonials(), Some(list));

        let stats = manager.all_stats();
        assert!(!stats["testimonials"].transform_enabled);
    }

    #[test]
    fn test_api_response_round_trip() {
        let (manager, _) = test_manager();
        let body = json!({"items": [1, 2, 3], "next": null});

        assert!(manager.cache_api_response("/api/blog", &body));
        assert_eq!(manager.api_response::<Value>("/api/blog"), Some(body));
        assert!(manager.pool("api").unwrap().contains_key("api_/api/blog"));
    }

    #[test]
    fn test_fetch_with_wrong_shape_is_none() {
        let (manager, _) = test_manager();

        manager.cache_api_response("count", &42);
        assert_eq!(manager.api_response::<u32>("count"), Some(42));
        assert_eq!(manager.api_response::<Product>("count"), None);
    }

    #[test]
    fn test_generic_accessors_unknown_category() {
        let (manager, _) = test_manager();

        assert!(!manager.store("videos", "k", &1));
        assert_eq!(manager.fetch::<u32>("videos", "k"), None);
        assert!(!manager.clear_category("videos"));
    }

    #[test]
    fn test_generic_accessors_known_category() {
        let (manager, _) = test_manager();

        assert!(manager.store("preferences", "theme", &"dark".to_string()));
        assert_eq!(
            manager.fetch::<String>("preferences", "theme"),
            Some("dark".to_string())
        );
    }

    #[test]
    fn test_clear_category_is_isolated() {
        let (manager, _) = test_manager();

        manager.cache_product("p1", &product("p1"));
        manager.cache_testimonials(&[]);

        assert!(manager.clear_category("products"));

        let stats = manager.all_stats();
        assert_eq!(stats["products"].size, 0);
        assert_eq!(stats["testimonials"].size, 1);
    }

    #[test]
    fn test_clear_all() {
        let (manager, _) = test_manager();

        manager.cache_product("p1", &product("p1"));
        manager.store("images", "hero", &"/hero.webp".to_string());
        manager.clear_all();

        assert!(manager.all_stats().values().all(|s| s.size == 0));
    }

    #[test]
    fn test_rejected_product_leaves_pool_unchanged() {
        let config = Config { max_entries: 1 };
        let manager = CacheManager::with_clock(&config, ManualClock::new(0));

        assert!(manager.cache_product("good", &product("good")));
        let before = manager.all_stats()["products"].clone();

        // NaN becomes `null` in JSON and cannot be read back as a price
        let mut bad = product("bad");
        bad.price = f64::NAN;
        assert!(!manager.cache_product("bad", &bad));

        assert_eq!(manager.all_stats()["products"], before);
        assert_eq!(manager.product("good"), Some(product("good")));
        assert_eq!(manager.product("bad"), None);
    }

    #[test]
    fn test_rejected_api_response_via_store() {
        let config = Config { max_entries: 1 };
        let manager = CacheManager::with_clock(&config, ManualClock::new(0));

        assert!(manager.store("api", "ok", &1.5f64));
        assert!(!manager.store("api", "nan", &f64::NAN));
        assert!(!manager.cache_api_response("nan", &f64::NAN));

        assert_eq!(manager.all_stats()["api"].size, 1);
        assert_eq!(manager.fetch::<f64>("api", "ok"), Some(1.5));
    }

    #[test]
    fn test_memo_key() {
        assert_eq!(
            memo_key("related_posts", &("cat-litter", 3)).unwrap(),
            r#"related_posts_["cat-litter",3]"#
        );
    }
}
