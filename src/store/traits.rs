use anyhow::Result;

/// Key-value substrate the listing store persists into
///
/// Values are whole serialized documents; every save overwrites the key.
/// Implementations exist for a data directory on disk and for memory.
pub trait Storage: Send {
    /// Read the value under `key`, `None` when the key was never written
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value under `key`
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Name used in log lines
    fn backend_name(&self) -> &'static str;
}
