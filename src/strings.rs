use crate::byte_source::ByteSource;
use crate::constants;
use crate::result::{Error, Result};

pub fn read_variable_int(source: &mut dyn ByteSource) -> Result<u32> {
    let mut value: u32 = 0;
    let mut shift = 0u32;
    for _ in 0..5 {
        let byte = source.read_u8().ok_or(Error::UnexpectedEof)?;
        value |= u32::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
    }
    Ok(value)
}

pub fn read_string(source: &mut dyn ByteSource) -> Result<String> {
    let len = read_variable_int(source)? as usize;
    let mut buf = vec![0u8; len];
    if len > 0 && !source.read_exact(&mut buf) {
        return Err(Error::UnexpectedEof);
    }
    Ok(String::from_utf8(buf)?)
}

pub fn read_string_with_code(source: &mut dyn ByteSource) -> Result<String> {
    let tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
    if tag != constants::STRING_WITH_CODE {
        return Err(Error::Unsupported("string-with-code leading byte was not 18"));
    }
    read_string(source)
}
