use chrono::Utc;
use tracing::{error, info};

use ec2_uptime_reporter::config::Config;
use ec2_uptime_reporter::ec2::Ec2Client;
use ec2_uptime_reporter::{logging, output, report};

#[tokio::main]
async fn main() {
    let config = Config::from_args();
    logging::init(&config.log_format, &config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT"),
        build_date = env!("BUILD_DATE"),
        "EC2 uptime reporter starting"
    );

    let client = Ec2Client::new(config.region.as_deref(), config.page_limit).await;
    config.display(client.region());

    let mut failed_sections = 0usize;

    // Sections 1 and 2 share one DescribeInstances pass.
    match client.list_instances().await {
        Ok(instances) => {
            let now = Utc::now();
            output::print_all_instances(&instances, now);

            let grouped = report::group_uptimes_by_type(&instances, now);
            output::print_average_uptimes(&report::average_uptime_by_type(&grouped));
        }
        Err(e) => {
            error!(error = %e, "Failed to list instances, skipping uptime sections");
            failed_sections += 2;
        }
    }

    match client.list_spot_instances().await {
        Ok(spot_instances) => output::print_spot_instances(&spot_instances),
        Err(e) => {
            error!(error = %e, "Failed to list spot instances, skipping spot section");
            failed_sections += 1;
        }
    }

    match client.list_spot_requests().await {
        Ok(requests) => {
            output::print_interruptions(&report::count_interruptions_by_type(&requests));
        }
        Err(e) => {
            error!(error = %e, "Failed to list spot requests, skipping interruption section");
            failed_sections += 1;
        }
    }

    if failed_sections > 0 {
        error!(failed_sections, "Report incomplete");
        std::process::exit(1);
    }
}
