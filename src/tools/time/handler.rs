use super::dto::{
    FormatTimestampInput, GetCurrentDateInput, GetCurrentTimeInput, GetDatetimeInfoInput,
};
use super::implementation::TimeTools;
use crate::error::Result;

pub fn get_current_time(tools: &TimeTools, input: GetCurrentTimeInput) -> Result<String> {
    tools.get_current_time(input)
}

pub fn get_current_date(tools: &TimeTools, input: GetCurrentDateInput) -> Result<String> {
    tools.get_current_date(input)
}

pub fn get_datetime_info(tools: &TimeTools, input: GetDatetimeInfoInput) -> Result<String> {
    tools.get_datetime_info(input)
}

pub fn format_timestamp(tools: &TimeTools, input: FormatTimestampInput) -> Result<String> {
    tools.format_timestamp(input)
}
