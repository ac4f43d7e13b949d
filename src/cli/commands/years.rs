use crate::cli::client::ApiClient;
use crate::cli::utils::{output, render_years};
use crate::cli::OutputFormat;

pub async fn handle(client: &ApiClient, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = client.years().await?;
    output(&output_format, &result, |r| render_years(&r.years))
}
