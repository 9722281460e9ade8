//! Round-trips a ReadProperty through the request manager without a network.
//!
//! The "device" side is simulated in-process: it decodes the request and
//! answers with a ComplexAck that `route_reply` hands back to the caller.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p bacwire-client --example read_property

use bacwire_client::{route_reply, RequestManager, RequestManagerConfig};
use bacwire_core::apdu::{ComplexAckHeader, ConfirmedRequestHeader};
use bacwire_core::encoding::{reader::Reader, writer::Writer};
use bacwire_core::services::read_property::{ReadPropertyAck, ReadPropertyRequest};
use bacwire_core::services::ConfirmedService;
use bacwire_core::types::{DataValue, ObjectId, ObjectType, PropertyId};
use std::time::Duration;

fn answer(request: &[u8]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let mut r = Reader::new(request);
    let header = ConfirmedRequestHeader::decode(&mut r)?;
    let req = ReadPropertyRequest::decode(&mut r)?;

    let ack = ReadPropertyAck {
        object_id: req.object_id,
        property_id: req.property_id,
        array_index: req.array_index,
        values: vec![DataValue::Real(21.5)],
    };
    let mut buf = [0u8; 64];
    let mut w = Writer::new(&mut buf);
    ComplexAckHeader::new(header.service_choice, header.invoke_id).encode(&mut w)?;
    ReadPropertyRequest::encode_acknowledge(&ack, &mut w)?;
    Ok(w.as_written().to_vec())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let manager =
        RequestManager::new(RequestManagerConfig::default().with_timeout(Duration::from_secs(2)));

    let request = ReadPropertyRequest::new(
        ObjectId::new(ObjectType::AnalogInput, 1),
        PropertyId::PresentValue,
    );
    let mut buf = [0u8; 64];
    let mut w = Writer::new(&mut buf);
    request.encode_request(1, &mut w)?;
    println!("request: {:02X?}", w.as_written());

    let pending = manager.add(1);
    let reply = answer(w.as_written())?;
    println!("reply:   {reply:02X?}");
    route_reply(&manager, &reply)?;

    let payload = pending.await?;
    let ack = ReadPropertyRequest::decode_acknowledge(&mut Reader::new(&payload))?;
    println!("{:?} {:?} = {:?}", ack.object_id, ack.property_id, ack.values);

    // Nobody answers this one.
    let unanswered = manager.add(2);
    println!("invoke id 2: {:?}", unanswered.await);

    Ok(())
}
