use anyhow::{Context, Result};
use aws_sdk_ec2::types::SpotInstanceRequest;
use tracing::{debug, warn};

use super::Ec2Client;

/// One entry from the spot-instance-request history. The fault-injection
/// predicate over state and status code is applied by the aggregation layer,
/// not here.
#[derive(Debug, Clone)]
pub struct SpotRequestRecord {
    pub instance_type: String,
    pub state: String,
    pub status_code: String,
}

impl Ec2Client {
    /// Full spot-instance-request history, across every page of the
    /// DescribeSpotInstanceRequests response.
    pub async fn list_spot_requests(&self) -> Result<Vec<SpotRequestRecord>> {
        let mut records = Vec::new();
        let mut pages = 0usize;
        let mut stream = self
            .client
            .describe_spot_instance_requests()
            .into_paginator()
            .send();

        while let Some(page) = stream.next().await {
            let page = page.context("Failed to describe spot instance requests")?;
            pages += 1;

            for request in page.spot_instance_requests() {
                match spot_request_record(request) {
                    Some(record) => records.push(record),
                    None => warn!(
                        request_id = request.spot_instance_request_id().unwrap_or("unknown"),
                        "Skipping spot request with incomplete metadata"
                    ),
                }
            }

            if self.page_limit_reached(pages) {
                warn!(
                    pages,
                    "Stopping DescribeSpotInstanceRequests pagination at page limit"
                );
                break;
            }
        }

        debug!(
            request_count = records.len(),
            pages, "Fetched spot request records"
        );

        Ok(records)
    }
}

/// Extract the report fields from an SDK spot request. Returns `None` when
/// the record is missing its launch-specification type, state, or status.
fn spot_request_record(request: &SpotInstanceRequest) -> Option<SpotRequestRecord> {
    let instance_type = request
        .launch_specification()?
        .instance_type()?
        .as_str()
        .to_string();
    let state = request.state()?.as_str().to_string();
    let status_code = request.status()?.code()?.to_string();

    Some(SpotRequestRecord {
        instance_type,
        state,
        status_code,
    })
}
