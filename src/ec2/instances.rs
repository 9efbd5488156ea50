use anyhow::{Context, Result};
use aws_sdk_ec2::types::{Filter, Instance};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use super::Ec2Client;

/// One EC2 instance as observed at fetch time.
#[derive(Debug, Clone)]
pub struct InstanceRecord {
    pub id: String,
    pub instance_type: String,
    pub state: String,
    pub launch_time: DateTime<Utc>,
}

impl Ec2Client {
    /// All instances in the region, regardless of state, across every page
    /// of the DescribeInstances response.
    pub async fn list_instances(&self) -> Result<Vec<InstanceRecord>> {
        self.describe_instances(None).await
    }

    /// Instances whose lifecycle is `spot`, filtered server-side.
    pub async fn list_spot_instances(&self) -> Result<Vec<InstanceRecord>> {
        self.describe_instances(Some(spot_lifecycle_filter())).await
    }

    async fn describe_instances(&self, filter: Option<Filter>) -> Result<Vec<InstanceRecord>> {
        let mut request = self.client.describe_instances();
        if let Some(filter) = filter {
            request = request.filters(filter);
        }

        let mut records = Vec::new();
        let mut pages = 0usize;
        let mut stream = request.into_paginator().send();

        while let Some(page) = stream.next().await {
            let page = page.context("Failed to describe instances")?;
            pages += 1;

            for reservation in page.reservations() {
                for instance in reservation.instances() {
                    match instance_record(instance) {
                        Some(record) => records.push(record),
                        None => warn!(
                            instance_id = instance.instance_id().unwrap_or("unknown"),
                            "Skipping instance with incomplete metadata"
                        ),
                    }
                }
            }

            if self.page_limit_reached(pages) {
                warn!(pages, "Stopping DescribeInstances pagination at page limit");
                break;
            }
        }

        debug!(
            instance_count = records.len(),
            pages, "Fetched instance records"
        );

        Ok(records)
    }
}

fn spot_lifecycle_filter() -> Filter {
    Filter::builder()
        .name("instance-lifecycle")
        .values("spot")
        .build()
}

/// Extract the report fields from an SDK instance. Returns `None` when the
/// provider record is missing an id, type, state, or launch time.
fn instance_record(instance: &Instance) -> Option<InstanceRecord> {
    let id = instance.instance_id()?.to_string();
    let instance_type = instance.instance_type()?.as_str().to_string();
    let state = instance.state()?.name()?.as_str().to_string();
    let launch = instance.launch_time()?;
    let launch_time = DateTime::from_timestamp(launch.secs(), launch.subsec_nanos())?;

    Some(InstanceRecord {
        id,
        instance_type,
        state,
        launch_time,
    })
}
