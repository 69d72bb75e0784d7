use anyhow::Result;

/// Trait for building configuration structs
///
/// Implementors specify how their config is assembled, typically from
/// environment variables. Call sites keep the built value in a
/// `OnceCell` so the sources are only read once per process.
pub trait ConfigBuilder: Clone + Send + Sync + 'static {
    /// Build the configuration instance
    ///
    /// This method should read from environment variables, files, or other
    /// sources and construct the configuration struct.
    fn build() -> Result<Self>;
}
