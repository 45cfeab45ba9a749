//! Capability resolution for the issuer action endpoints.
//!
//! This module only builds paths and extracts booleans; the permission
//! decision belongs entirely to the injected oracle. A lookup that fails
//! resolves to `false` — absence of permission and a resolution failure are
//! indistinguishable to callers.

use async_trait::async_trait;
use dashmap::DashMap;
use sealbox_error::SealboxError;
use sealbox_types::action::{ActionConfig, KeySource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityVerb {
    Create,
}

impl CapabilityVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
        }
    }
}

/// Raw answer from the permissions backend for one path.
///
/// `Some(true)` grants; everything else — an explicit deny, or an
/// unknown/pending result — does not.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityResult {
    #[serde(default)]
    pub can_create: Option<bool>,
}

/// The permissions backend of the console, injected by the caller.
#[async_trait]
pub trait PermissionsOracle: Send + Sync {
    async fn resolve(
        &self,
        path: &str,
        verb: CapabilityVerb,
    ) -> Result<CapabilityResult, SealboxError>;
}

/// Oracle backed by a fixed set of granted paths. Used by the CLI and by
/// tests; deployments inject the console's real permissions service instead.
#[derive(Debug, Clone, Default)]
pub struct StaticOracle {
    granted: HashSet<String>,
}

impl StaticOracle {
    pub fn granting<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            granted: paths.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl PermissionsOracle for StaticOracle {
    async fn resolve(
        &self,
        path: &str,
        _verb: CapabilityVerb,
    ) -> Result<CapabilityResult, SealboxError> {
        Ok(CapabilityResult {
            can_create: Some(self.granted.contains(path)),
        })
    }
}

/// Resolved flags for the actions the console may offer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_import_bundle: bool,
    pub can_generate_issuer_root: bool,
    pub can_generate_issuer_intermediate: bool,
    pub can_cross_sign: bool,
}

pub fn import_bundle_path(mount_path: &str) -> String {
    format!("{}/issuers/import/bundle", mount_path)
}

pub fn generate_root_path(mount_path: &str, source: KeySource) -> String {
    format!("{}/issuers/generate/root/{}", mount_path, source.as_str())
}

pub fn generate_intermediate_path(mount_path: &str, source: KeySource) -> String {
    format!(
        "{}/issuers/generate/intermediate/{}",
        mount_path,
        source.as_str()
    )
}

pub fn cross_sign_path(mount_path: &str) -> String {
    format!("{}/intermediate/cross-sign", mount_path)
}

/// Lazy per-path capability lookup for one configuration record.
///
/// Each path is asked of the oracle at most once for the resolver's (and so
/// the record's) lifetime; later reads come from the cache.
pub struct CapabilityResolver {
    oracle: Arc<dyn PermissionsOracle>,
    mount_path: String,
    cache: DashMap<String, bool>,
}

impl CapabilityResolver {
    pub fn new(oracle: Arc<dyn PermissionsOracle>, mount_path: impl Into<String>) -> Self {
        Self {
            oracle,
            mount_path: mount_path.into(),
            cache: DashMap::new(),
        }
    }

    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    pub async fn can_import_bundle(&self) -> bool {
        self.can_create(import_bundle_path(&self.mount_path)).await
    }

    pub async fn can_generate_issuer_root(&self, config: &ActionConfig) -> bool {
        let path = generate_root_path(&self.mount_path, key_source_for_path(config));
        self.can_create(path).await
    }

    pub async fn can_generate_issuer_intermediate(&self, config: &ActionConfig) -> bool {
        let path = generate_intermediate_path(&self.mount_path, key_source_for_path(config));
        self.can_create(path).await
    }

    pub async fn can_cross_sign(&self) -> bool {
        self.can_create(cross_sign_path(&self.mount_path)).await
    }

    /// Resolve every action flag for the record at once.
    pub async fn resolve_all(&self, config: &ActionConfig) -> Capabilities {
        Capabilities {
            can_import_bundle: self.can_import_bundle().await,
            can_generate_issuer_root: self.can_generate_issuer_root(config).await,
            can_generate_issuer_intermediate: self
                .can_generate_issuer_intermediate(config)
                .await,
            can_cross_sign: self.can_cross_sign().await,
        }
    }

    async fn can_create(&self, path: String) -> bool {
        if let Some(hit) = self.cache.get(&path) {
            return *hit;
        }
        let allowed = match self.oracle.resolve(&path, CapabilityVerb::Create).await {
            Ok(result) => result.can_create == Some(true),
            Err(e) => {
                warn!("Capability lookup failed for {}: {}", path, e);
                false
            }
        };
        self.cache.insert(path, allowed);
        allowed
    }
}

/// The two generate endpoints embed the key source in their path. A record
/// that has not picked one yet resolves against the "internal" flow.
fn key_source_for_path(config: &ActionConfig) -> KeySource {
    config.kind.unwrap_or(KeySource::Internal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealbox_types::action::ActionType;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingOracle;

    #[async_trait]
    impl PermissionsOracle for FailingOracle {
        async fn resolve(
            &self,
            path: &str,
            _verb: CapabilityVerb,
        ) -> Result<CapabilityResult, SealboxError> {
            Err(SealboxError::CapabilityError(format!(
                "backend unreachable for {}",
                path
            )))
        }
    }

    struct PendingOracle;

    #[async_trait]
    impl PermissionsOracle for PendingOracle {
        async fn resolve(
            &self,
            _path: &str,
            _verb: CapabilityVerb,
        ) -> Result<CapabilityResult, SealboxError> {
            // backend answered but has not decided yet
            Ok(CapabilityResult { can_create: None })
        }
    }

    struct CountingOracle {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PermissionsOracle for CountingOracle {
        async fn resolve(
            &self,
            _path: &str,
            _verb: CapabilityVerb,
        ) -> Result<CapabilityResult, SealboxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CapabilityResult {
                can_create: Some(true),
            })
        }
    }

    fn record() -> ActionConfig {
        let mut config = ActionConfig::new(ActionType::GenerateRoot);
        config.kind = Some(KeySource::Internal);
        config
    }

    #[test]
    fn test_path_templates() {
        assert_eq!(import_bundle_path("pki"), "pki/issuers/import/bundle");
        assert_eq!(
            generate_root_path("pki", KeySource::Exported),
            "pki/issuers/generate/root/exported"
        );
        assert_eq!(
            generate_intermediate_path("ns1/pki", KeySource::Internal),
            "ns1/pki/issuers/generate/intermediate/internal"
        );
        assert_eq!(cross_sign_path("pki"), "pki/intermediate/cross-sign");
    }

    #[tokio::test]
    async fn test_only_granted_path_is_allowed() {
        let oracle = Arc::new(StaticOracle::granting(["pki/issuers/import/bundle"]));
        let resolver = CapabilityResolver::new(oracle, "pki");

        let caps = resolver.resolve_all(&record()).await;
        assert!(caps.can_import_bundle);
        assert!(!caps.can_generate_issuer_root);
        assert!(!caps.can_generate_issuer_intermediate);
        assert!(!caps.can_cross_sign);
    }

    #[tokio::test]
    async fn test_oracle_failure_resolves_to_false() {
        let resolver = CapabilityResolver::new(Arc::new(FailingOracle), "pki");
        let caps = resolver.resolve_all(&record()).await;
        assert_eq!(caps, Capabilities::default());
    }

    #[tokio::test]
    async fn test_pending_result_resolves_to_false() {
        let resolver = CapabilityResolver::new(Arc::new(PendingOracle), "pki");
        assert!(!resolver.can_import_bundle().await);
    }

    #[tokio::test]
    async fn test_lookups_cached_per_path() {
        let oracle = Arc::new(CountingOracle {
            calls: AtomicUsize::new(0),
        });
        let resolver = CapabilityResolver::new(oracle.clone(), "pki");

        assert!(resolver.can_import_bundle().await);
        assert!(resolver.can_import_bundle().await);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);

        // a different path is a fresh lookup
        assert!(resolver.can_cross_sign().await);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unset_key_source_falls_back_to_internal() {
        let oracle = Arc::new(StaticOracle::granting([
            "pki/issuers/generate/root/internal",
        ]));
        let resolver = CapabilityResolver::new(oracle, "pki");

        let mut config = ActionConfig::new(ActionType::GenerateRoot);
        config.kind = None;
        assert!(resolver.can_generate_issuer_root(&config).await);
    }
}
