pub mod time;

pub use time::{
    DatetimeInfo, FormatTimestampInput, GetCurrentDateInput, GetCurrentTimeInput,
    GetDatetimeInfoInput, TimeTools,
};
