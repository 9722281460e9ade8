pub mod bit_string;
pub mod data_value;
pub mod date_time;
pub mod event;
pub mod object_id;
pub mod object_type;
pub mod property_id;
pub mod references;
pub mod schedule;
pub mod spec;

pub use bit_string::BitString;
pub use data_value::DataValue;
pub use date_time::{
    to_naive_date_time, CalendarDate, Date, DateInput, RawDate, Time, DAY_EVEN, DAY_LAST, DAY_ODD,
    MONTH_EVEN, MONTH_ODD, WILDCARD,
};
pub use event::{EventState, EventType, NotifyType, TimeStamp};
pub use object_id::{ObjectId, MAX_INSTANCE};
pub use object_type::ObjectType;
pub use property_id::PropertyId;
pub use references::{
    DeviceObjectPropertyReference, DeviceObjectReference, PropertyAccess, PropertyResult,
    ReadAccessResult,
};
pub use schedule::{
    CalendarEntry, CalendarEntryInput, DateRange, SpecialEvent, SpecialEventInput,
    SpecialEventPeriod, SpecialEventPeriodInput, TimeValue, WeekNDay,
};
pub use spec::{ErrorClass, ErrorCode, MaxApdu, ServiceError};
