mod responses;

pub use responses::{
    CountResponse, OnlineStudentsResponse, PingResponse, StatsResponse, StudentEntry,
};
