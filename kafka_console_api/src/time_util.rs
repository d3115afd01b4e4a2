use chrono::{DateTime, Timelike, Utc};
use prost_types::Timestamp;

pub trait ProtoTimestampConvert {
    fn to_proto_timestamp(&self) -> Timestamp;
}

impl ProtoTimestampConvert for DateTime<Utc> {
    fn to_proto_timestamp(&self) -> Timestamp {
        Timestamp {
            nanos: self.nanosecond() as i32,
            seconds: self.timestamp(),
        }
    }
}

/// Epoch seconds as a protobuf timestamp.
pub fn epoch_seconds_to_proto_timestamp(seconds: i64) -> Timestamp {
    DateTime::from_timestamp(seconds, 0)
        .map(|date_time| date_time.to_proto_timestamp())
        .unwrap_or(Timestamp { seconds, nanos: 0 })
}
