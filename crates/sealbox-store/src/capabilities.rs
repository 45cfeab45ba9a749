use crate::{KEY_CAPABILITIES, get, insert};
use sealbox_pki::Capabilities;
use std::collections::HashMap;

/// Keep the resolved capability snapshot for a mount so the display layer can
/// read it without asking the oracle again.
pub fn store_snapshot(mount_path: &str, capabilities: Capabilities) {
    let mut snapshots =
        get::<HashMap<String, Capabilities>>(KEY_CAPABILITIES).unwrap_or_default();
    snapshots.insert(mount_path.to_string(), capabilities);
    insert(KEY_CAPABILITIES, snapshots);
}

/// The last resolved snapshot for a mount, if any.
pub fn snapshot(mount_path: &str) -> Option<Capabilities> {
    get::<HashMap<String, Capabilities>>(KEY_CAPABILITIES)?
        .get(mount_path)
        .copied()
}
