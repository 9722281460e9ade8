use crate::{ClientError, RequestManager};
use bacwire_core::apdu::{
    AbortPdu, ApduType, BacnetErrorPdu, ComplexAckHeader, RejectPdu, SimpleAck,
};
use bacwire_core::encoding::reader::Reader;
use bacwire_core::DecodeError;

/// Resolves the pending request an inbound reply APDU belongs to.
///
/// Acks resolve with the service payload that follows the header (empty for
/// a SimpleAck). Error, Reject and Abort replies resolve with the matching
/// [`ClientError`]. Returns whether a pending request was matched; APDUs that
/// are not replies are ignored.
pub fn route_reply(manager: &RequestManager<Vec<u8>>, apdu: &[u8]) -> Result<bool, ClientError> {
    let first = *apdu.first().ok_or(DecodeError::UnexpectedEof)?;
    let apdu_type = ApduType::of(first).ok_or(DecodeError::InvalidValue)?;
    let mut r = Reader::new(apdu);

    let (invoke_id, outcome) = match apdu_type {
        ApduType::SimpleAck => {
            let ack = SimpleAck::decode(&mut r)?;
            (ack.invoke_id, Ok(Vec::new()))
        }
        ApduType::ComplexAck => {
            let header = ComplexAckHeader::decode(&mut r)?;
            if header.is_segmented() {
                (header.invoke_id, Err(DecodeError::Unsupported.into()))
            } else {
                (header.invoke_id, Ok(r.rest().to_vec()))
            }
        }
        ApduType::Error => {
            let pdu = BacnetErrorPdu::decode(&mut r)?;
            (
                pdu.invoke_id,
                Err(ClientError::remote_service_error(pdu.service_choice, pdu.error)),
            )
        }
        ApduType::Reject => {
            let pdu = RejectPdu::decode(&mut r)?;
            (pdu.invoke_id, Err(ClientError::RemoteReject { reason: pdu.reason }))
        }
        ApduType::Abort => {
            let pdu = AbortPdu::decode(&mut r)?;
            (
                pdu.invoke_id,
                Err(ClientError::RemoteAbort {
                    reason: pdu.reason,
                    server: pdu.server,
                }),
            )
        }
        other => {
            log::debug!("ignoring {other:?} apdu");
            return Ok(false);
        }
    };

    Ok(manager.resolve(invoke_id, outcome))
}
