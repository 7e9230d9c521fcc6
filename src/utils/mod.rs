pub struct Utils;

use std::path::PathBuf;

impl Utils {
    /// Map a remote asset path onto the configured local mirror root.
    ///
    /// Remote paths use forward slashes; the remote root prefix is replaced
    /// with the local root and the remaining segments are joined with native
    /// separators, preserving order.
    ///
    /// e.g. ```Utils::remote_to_local("/LongGong/assets/char/Hei/rig", "/LongGong", "L:") // returns "L:/assets/char/Hei/rig"```
    pub fn remote_to_local(remote_path: &str, remote_root: &str, local_root: &str) -> PathBuf {
        let relative = remote_path.strip_prefix(remote_root).unwrap_or(remote_path);
        let mut local = PathBuf::from(local_root);
        for segment in relative.split('/').filter(|s| !s.is_empty()) {
            local.push(segment);
        }
        local
    }
}
