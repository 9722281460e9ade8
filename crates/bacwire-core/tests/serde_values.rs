#![cfg(feature = "serde")]

use bacwire_core::types::{
    BitString, CalendarEntry, DataValue, Date, DateRange, ObjectId, ObjectType, RawDate, Time,
    TimeValue, WeekNDay,
};

fn through_json(value: &DataValue) -> DataValue {
    let json = serde_json::to_string(value).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn value_model_survives_json() {
    let values = [
        DataValue::Null,
        DataValue::Real(21.5),
        DataValue::character_string("lobby"),
        DataValue::BitString(BitString::from_bits(&[true, false, true])),
        DataValue::ObjectId(ObjectId::new(ObjectType::Schedule, 4)),
        DataValue::Date(Date::from_raw(RawDate::new(124, 0xFF, 32, 0xFF))),
        DataValue::WeeklySchedule(vec![
            vec![TimeValue::new(Time::new(8, 0, 0, 0), DataValue::Enumerated(1))];
            7
        ]),
        DataValue::CalendarEntries(vec![
            CalendarEntry::Range(DateRange {
                start: Date::from_ymd(2024, 12, 24).unwrap(),
                end: Date::from_ymd(2024, 12, 26).unwrap(),
            }),
            CalendarEntry::WeekNDay(WeekNDay::new(5, 0xFF, 1)),
        ]),
    ];
    for value in &values {
        assert_eq!(&through_json(value), value);
    }
}

#[test]
fn wildcard_dates_keep_their_raw_bytes() {
    let date = Date::from_raw(RawDate::new(0xFF, 3, 0xFF, 0xFF));
    let json = serde_json::to_value(date).unwrap();
    let back: Date = serde_json::from_value(json).unwrap();
    assert!(back.is_zero());
    assert_eq!(back.raw().to_bytes(), [0xFF, 3, 0xFF, 0xFF]);
}
