use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ec2-uptime-reporter",
    version,
    about = "Reports EC2 instance uptimes and spot interruption counts by instance type"
)]
pub struct Config {
    /// AWS region
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Maximum pages to fetch per paginated API call (0 = unbounded)
    #[arg(long, env = "PAGE_LIMIT", default_value = "0")]
    pub page_limit: usize,

    /// Log format: json or pretty
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn display(&self, actual_region: &str) {
        let region_info = match &self.region {
            Some(region) => region.clone(),
            None => format!("auto-detect ({})", actual_region),
        };

        let page_limit_info = if self.page_limit == 0 {
            "unbounded".to_string()
        } else {
            self.page_limit.to_string()
        };

        tracing::debug!(
            region = %region_info,
            page_limit = %page_limit_info,
            log_format = %self.log_format,
            log_level = %self.log_level,
            "Configuration initialized"
        );
    }
}
