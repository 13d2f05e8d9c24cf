use crate::utils::error::Result;

/// Byte-level access to the place reservations are persisted.
///
/// Paths are relative to whatever root the implementation was created with.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn describe(&self, path: &str) -> String;
}
