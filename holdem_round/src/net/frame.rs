use bincode::config;
use serde::{Serialize, de::DeserializeOwned};
use std::io::{self, Read, Write};

use super::errors::{Result, SerializationError};

/// Maximum allowed payload size (1MB) to prevent unbounded allocation
/// from a bad length prefix.
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

const PREFIX_SIZE: usize = 4;

fn check_size(len: usize) -> Result<()> {
    if len > MAX_MESSAGE_SIZE {
        return Err(SerializationError::MessageTooLarge {
            actual: len,
            max: MAX_MESSAGE_SIZE,
        });
    }
    Ok(())
}

/// Serialize `value` into a single length-prefixed frame.
pub fn encode_frame<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let payload = bincode::serde::encode_to_vec(value, config::standard())?;
    check_size(payload.len())?;

    // Prefix and payload go out in one buffer so readers never observe a
    // prefix without its payload.
    let size = payload.len() as u32;
    let mut buf = Vec::with_capacity(PREFIX_SIZE + payload.len());
    buf.extend_from_slice(&size.to_le_bytes());
    buf.extend(payload);
    Ok(buf)
}

/// Decode the first frame in `buf`, returning the value and the number
/// of bytes it occupied. A partial frame is reported as
/// [`SerializationError::Truncated`] so callers can wait for more bytes.
pub fn decode_frame<T: DeserializeOwned>(buf: &[u8]) -> Result<(T, usize)> {
    let Some(prefix) = buf.first_chunk::<PREFIX_SIZE>() else {
        return Err(SerializationError::Truncated {
            needed: PREFIX_SIZE,
            available: buf.len(),
        });
    };
    let len = u32::from_le_bytes(*prefix) as usize;
    check_size(len)?;

    let end = PREFIX_SIZE + len;
    let Some(payload) = buf.get(PREFIX_SIZE..end) else {
        return Err(SerializationError::Truncated {
            needed: end,
            available: buf.len(),
        });
    };
    let (value, read) = bincode::serde::decode_from_slice(payload, config::standard())?;
    if read != len {
        return Err(SerializationError::InvalidFormat(format!(
            "{} trailing bytes after payload",
            len - read
        )));
    }
    Ok((value, end))
}

pub fn write_prefixed<T: Serialize, W: Write>(writer: &mut W, value: &T) -> Result<()> {
    let frame = encode_frame(value)?;
    writer.write_all(&frame)?;
    Ok(())
}

pub fn read_prefixed<T: DeserializeOwned, R: Read>(reader: &mut R) -> Result<T> {
    let mut len_bytes = [0; PREFIX_SIZE];
    reader.read_exact(&mut len_bytes)?;
    let len = u32::from_le_bytes(len_bytes) as usize;
    check_size(len)?;

    let mut buf = vec![0; len];
    if let Err(error) = reader.read_exact(&mut buf) {
        let kind = match error.kind() {
            io::ErrorKind::WouldBlock => io::ErrorKind::InvalidData,
            kind => kind,
        };
        return Err(io::Error::from(kind).into());
    }

    let (value, read) = bincode::serde::decode_from_slice(&buf, config::standard())?;
    if read != len {
        return Err(SerializationError::InvalidFormat(format!(
            "{} trailing bytes after payload",
            len - read
        )));
    }
    Ok(value)
}
