#![no_main]

use bacwire_core::encoding::reader::Reader;
use bacwire_core::encoding::tag::{AppTag, Tag};
use bacwire_core::encoding::writer::Writer;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut r = Reader::new(data);
    while let Ok(tag) = Tag::decode(&mut r) {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        tag.encode(&mut w).expect("a tag header fits in 8 bytes");
        assert_eq!(Tag::decode(&mut Reader::new(w.as_written())), Ok(tag));

        // Application booleans carry their value in the length field.
        let payload = match tag {
            Tag::Application {
                tag: AppTag::Boolean,
                ..
            } => 0,
            Tag::Application { len, .. } | Tag::Context { len, .. } => len as usize,
            Tag::Opening { .. } | Tag::Closing { .. } => 0,
        };
        if r.read_exact(payload).is_err() {
            break;
        }
    }
});
