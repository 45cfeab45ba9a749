use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::Any;

pub mod capabilities;

// store keys
pub const KEY_MOUNT_CONFIG: &str = "mount_config";
pub const KEY_CAPABILITIES: &str = "capabilities";

// console-wide state, keyed by the constants above
static GLOBAL_STORE: Lazy<DashMap<String, Box<dyn Any + Send + Sync>>> = Lazy::new(DashMap::new);

pub fn insert<T: Any + Send + Sync + 'static>(key: &str, value: T) {
    GLOBAL_STORE.insert(key.to_string(), Box::new(value));
}

pub fn get<T: Any + Clone + Send + Sync + 'static>(key: &str) -> Option<T> {
    let entry = GLOBAL_STORE.get(key)?;
    let any_ref = entry.downcast_ref::<T>()?;
    Some(any_ref.clone())
}

pub fn remove(key: &str) {
    GLOBAL_STORE.remove(key);
}
