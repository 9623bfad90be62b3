// Prometheus query models

mod metric;
mod query;
mod response;

pub use metric::{Label, METRIC_NAME_LABEL, Metric};
pub use query::{QueryResult, RangeSeries, ResultKind, Sample, ValuePair};
pub use response::{ApiResponse, ApiStatus};
