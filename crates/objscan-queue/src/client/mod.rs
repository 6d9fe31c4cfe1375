//! Amazon SQS client and its configuration.

mod sqs_client;
mod sqs_config;

pub use sqs_client::SqsQueue;
pub use sqs_config::SqsConfig;
