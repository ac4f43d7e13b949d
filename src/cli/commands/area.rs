use clap::Args;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output, render_area};
use crate::cli::OutputFormat;

#[derive(Args, Debug)]
pub struct AreaArgs {
    #[arg(long, help = "Election year (four digits)")]
    pub year: i32,
    #[arg(long, help = "Province code (2 digits)")]
    pub province: Option<String>,
    #[arg(long, help = "City code (3 digits)")]
    pub city: Option<String>,
    #[arg(long, help = "Town code (3 digits)")]
    pub town: Option<String>,
    #[arg(long, help = "Village code (4 digits)")]
    pub village: Option<String>,
}

impl AreaArgs {
    /// Query pairs for `/api/area`; unset segments are left to the server defaults
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("year", self.year.to_string())];
        for (key, value) in [
            ("provinceCode", &self.province),
            ("cityCode", &self.city),
            ("townCode", &self.town),
            ("villageCode", &self.village),
        ] {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        pairs
    }
}

pub async fn handle(client: &ApiClient, args: AreaArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let result = client.area(&args.query_pairs()).await?;
    output(&output_format, &result, render_area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_unset_segments() {
        let args = AreaArgs {
            year: 2024,
            province: Some("63".into()),
            city: None,
            town: Some("010".into()),
            village: None,
        };
        assert_eq!(
            args.query_pairs(),
            vec![
                ("year", "2024".to_string()),
                ("provinceCode", "63".to_string()),
                ("townCode", "010".to_string()),
            ]
        );
    }
}
