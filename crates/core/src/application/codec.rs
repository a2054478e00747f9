// Message Codec - framing between the collector and the orchestrator
//
// Layout (native endian):
//   count:i32, then count x { len:i32, bytes[len], 0x00 }

use crate::domain::{MessageBundle, ProtocolError};

const HEADER_LEN: usize = std::mem::size_of::<i32>();

/// Encode a bundle into its wire form
pub fn encode(bundle: &MessageBundle) -> Result<Vec<u8>, ProtocolError> {
    encode_fields(bundle.fields())
}

/// Decode a bundle, rejecting anything not produced by `encode`
pub fn decode(bytes: &[u8]) -> Result<MessageBundle, ProtocolError> {
    MessageBundle::from_fields(decode_fields(bytes)?)
}

/// Encode arbitrary string fields
pub fn encode_fields<'a, I>(fields: I) -> Result<Vec<u8>, ProtocolError>
where
    I: IntoIterator<Item = &'a str>,
{
    let fields: Vec<&str> = fields.into_iter().collect();
    let count = i32::try_from(fields.len()).map_err(|_| ProtocolError::FieldTooLarge {
        field: fields.len(),
        length: fields.len(),
    })?;

    let payload: usize = fields.iter().map(|f| HEADER_LEN + f.len() + 1).sum();
    let mut buf = Vec::with_capacity(HEADER_LEN + payload);
    buf.extend_from_slice(&count.to_ne_bytes());

    for (field, text) in fields.iter().enumerate() {
        let length = i32::try_from(text.len()).map_err(|_| ProtocolError::FieldTooLarge {
            field,
            length: text.len(),
        })?;
        buf.extend_from_slice(&length.to_ne_bytes());
        buf.extend_from_slice(text.as_bytes());
        buf.push(0);
    }
    Ok(buf)
}

/// Decode string fields, slicing exactly `len + 1` bytes per field
pub fn decode_fields(bytes: &[u8]) -> Result<Vec<String>, ProtocolError> {
    let mut cursor = Cursor { bytes, offset: 0 };

    let count = cursor.read_i32()?;
    let count = usize::try_from(count).map_err(|_| ProtocolError::NegativeCount(count))?;

    // Never trust `count` for the allocation size
    let mut fields = Vec::with_capacity(count.min(bytes.len() / (HEADER_LEN + 1)));
    for field in 0..count {
        let length = cursor.read_i32()?;
        let length = usize::try_from(length)
            .map_err(|_| ProtocolError::NegativeLength { field, length })?;

        let framed = cursor.take(length + 1)?;
        let (text, terminator) = framed.split_at(length);
        if terminator != [0] {
            return Err(ProtocolError::MissingTerminator { field });
        }
        let text =
            std::str::from_utf8(text).map_err(|_| ProtocolError::InvalidUtf8 { field })?;
        fields.push(text.to_string());
    }

    let trailing = bytes.len() - cursor.offset;
    if trailing > 0 {
        return Err(ProtocolError::TrailingBytes(trailing));
    }
    Ok(fields)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, needed: usize) -> Result<&'a [u8], ProtocolError> {
        let available = self.bytes.len() - self.offset;
        if needed > available {
            return Err(ProtocolError::Truncated {
                offset: self.offset,
                needed,
                available,
            });
        }
        let slice = &self.bytes[self.offset..self.offset + needed];
        self.offset += needed;
        Ok(slice)
    }

    fn read_i32(&mut self) -> Result<i32, ProtocolError> {
        let mut raw = [0u8; HEADER_LEN];
        raw.copy_from_slice(self.take(HEADER_LEN)?);
        Ok(i32::from_ne_bytes(raw))
    }
}
