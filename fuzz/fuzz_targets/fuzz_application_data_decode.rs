#![no_main]

use bacwire_core::encoding::reader::Reader;
use bacwire_core::services::value_codec::{decode_application_data, DecodeContext};
use bacwire_core::types::{ObjectType, PropertyId};
use libfuzzer_sys::fuzz_target;

const CONTEXTS: [DecodeContext; 6] = [
    DecodeContext::NONE,
    DecodeContext::new(ObjectType::Schedule, PropertyId::WeeklySchedule),
    DecodeContext::new(ObjectType::Schedule, PropertyId::ExceptionSchedule),
    DecodeContext::new(ObjectType::Schedule, PropertyId::EffectivePeriod),
    DecodeContext::new(ObjectType::Calendar, PropertyId::DateList),
    DecodeContext::new(ObjectType::StructuredView, PropertyId::SubordinateList),
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let ctx = CONTEXTS[selector as usize % CONTEXTS.len()];
    let mut r = Reader::new(rest);
    while !r.is_empty() {
        if decode_application_data(&mut r, ctx).is_err() {
            break;
        }
    }
});
