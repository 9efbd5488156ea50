use aws_config::BehaviorVersion;
use aws_sdk_ec2::Client;
use tracing::{debug, info};

/// Shared EC2 client handle, constructed once and passed into every fetch.
pub struct Ec2Client {
    pub(super) client: Client,
    pub(super) page_limit: usize,
    region: String,
}

impl Ec2Client {
    /// Creates the EC2 client with AWS SDK configuration.
    ///
    /// Region resolution priority:
    /// 1. Explicit region from Config (--region CLI arg or AWS_REGION env var)
    /// 2. AWS SDK defaults (environment variables, ~/.aws/config, IMDS)
    pub async fn new(region: Option<&str>, page_limit: usize) -> Self {
        let config = match region {
            Some(r) => {
                info!(region = %r, "Using explicit AWS region");
                aws_config::defaults(BehaviorVersion::latest())
                    .region(aws_config::Region::new(r.to_string()))
                    .load()
                    .await
            }
            None => {
                debug!("Using default AWS region from environment/credentials file/IMDS");
                aws_config::load_defaults(BehaviorVersion::latest()).await
            }
        };

        let region = config
            .region()
            .map(|r| r.as_ref())
            .unwrap_or("unknown")
            .to_string();
        let client = Client::new(&config);

        info!(region = %region, "AWS EC2 client initialized");

        Self {
            client,
            page_limit,
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// True once `taken` pages have been consumed and a page limit is set.
    pub(super) fn page_limit_reached(&self, taken: usize) -> bool {
        self.page_limit > 0 && taken >= self.page_limit
    }
}
