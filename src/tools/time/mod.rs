pub mod dto;
pub mod handler;
pub mod helpers;
pub mod implementation;

pub use dto::{
    DatetimeInfo, FormatTimestampInput, GetCurrentDateInput, GetCurrentTimeInput,
    GetDatetimeInfoInput,
};
pub use handler::{format_timestamp, get_current_date, get_current_time, get_datetime_info};
pub use implementation::{TimeTools, DEFAULT_FORMAT, LOCAL_TIMEZONE};
