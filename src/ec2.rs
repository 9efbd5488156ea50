//! EC2 API access: instance listings and spot request history.

mod client;
mod instances;
mod spot;

pub use client::Ec2Client;
pub use instances::InstanceRecord;
pub use spot::SpotRequestRecord;
