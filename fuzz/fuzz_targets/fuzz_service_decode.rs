#![no_main]

use bacwire_core::encoding::reader::Reader;
use bacwire_core::services::alarm_summary::AlarmSummary;
use bacwire_core::services::cov_notification::CovNotification;
use bacwire_core::services::error::decode_error_payload;
use bacwire_core::services::event_notification::EventNotification;
use bacwire_core::services::life_safety_operation::LifeSafetyOperationRequest;
use bacwire_core::services::list_element::AddListElementRequest;
use bacwire_core::services::read_property::ReadPropertyRequest;
use bacwire_core::services::read_range::{decode_log_records, ReadRangeRequest};
use bacwire_core::services::write_property::WritePropertyRequest;
use bacwire_core::services::write_property_multiple::WritePropertyMultipleRequest;
use bacwire_core::services::ConfirmedService;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let mut r = Reader::new(payload);
    match selector % 14 {
        0 => drop(ReadPropertyRequest::decode(&mut r)),
        1 => drop(ReadPropertyRequest::decode_acknowledge(&mut r)),
        2 => drop(WritePropertyRequest::decode(&mut r)),
        3 => drop(WritePropertyMultipleRequest::decode(&mut r)),
        4 => drop(AddListElementRequest::decode(&mut r)),
        5 => drop(ReadRangeRequest::decode(&mut r)),
        6 => drop(ReadRangeRequest::decode_acknowledge(&mut r)),
        7 => drop(decode_log_records(payload)),
        8 => drop(EventNotification::decode(&mut r)),
        9 => drop(CovNotification::decode(&mut r)),
        10 => drop(AlarmSummary::decode(&mut r)),
        11 => drop(LifeSafetyOperationRequest::decode(&mut r)),
        12 => drop(decode_error_payload(&mut r)),
        _ => drop(WritePropertyRequest::decode(&mut r)),
    }
});
