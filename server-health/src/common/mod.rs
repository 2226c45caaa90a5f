//! 共通型定義・エラー型

pub mod error;
pub mod types;

pub use error::{ErrorBody, HealthError, HealthResult};
pub use types::{
    ConnectionState, Connections, EnvInfo, GitInfo, HealthReport, PingDocument, PingEnvInfo,
    ServiceInfo, StatusDocument,
};
