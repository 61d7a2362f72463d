use anyhow::Result;

/// The widget process only renders and sleeps, so it never needs more than one thread.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
