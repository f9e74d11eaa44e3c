use anyhow::Result;

/// The monitor is a single polling loop, notification display runs on the blocking pool.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
