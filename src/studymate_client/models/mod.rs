mod labels;
mod snapshot;
mod student;

pub use labels::{CardKind, CountBucket, LabelTable};
pub use snapshot::StatsSnapshot;
pub use student::OnlineStudent;
