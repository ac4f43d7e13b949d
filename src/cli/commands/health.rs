use crate::cli::client::ApiClient;
use crate::cli::utils::{output, render_health};
use crate::cli::OutputFormat;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let health = client.health().await?;
    output(&output_format, &health, |h| render_health(client.base_url(), h))?;

    if health.get("status").and_then(|s| s.as_str()) != Some("ok") {
        anyhow::bail!("server reports degraded health");
    }
    Ok(())
}
