//! Record encoding
//!
//! Records travel as compact UTF-8 JSON, one record per datagram, with the
//! field names of [`MeasurementRecord`] preserved verbatim.

use super::{TransportError, MAX_DATAGRAM_SIZE};
use crate::telemetry::MeasurementRecord;

/// Encode a record into a datagram payload
pub fn encode_record(record: &MeasurementRecord) -> Result<Vec<u8>, TransportError> {
    let payload = serde_json::to_vec(record)?;

    if payload.len() > MAX_DATAGRAM_SIZE {
        return Err(TransportError::PayloadTooLarge {
            size: payload.len(),
            max: MAX_DATAGRAM_SIZE,
        });
    }

    Ok(payload)
}

/// Decode a datagram payload back into a record
pub fn decode_record(payload: &[u8]) -> Result<MeasurementRecord, TransportError> {
    Ok(serde_json::from_slice(payload)?)
}
