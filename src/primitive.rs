use crate::byte_source::ByteSource;
use crate::constants::*;
use crate::result::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Boolean(bool),
    Byte(u8),
    Char(char),
    Decimal(f64),
    Double(f64),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    SByte(i8),
    Single(f32),
    TimeSpan(i64),
    DateTime(DateTimeValue),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Null,
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateTimeKind {
    Unspecified,
    Utc,
    Local,
}

impl DateTimeKind {
    fn from_raw(raw: u64) -> Self {
        match raw >> 62 {
            1 => DateTimeKind::Utc,
            2 => DateTimeKind::Local,
            _ => DateTimeKind::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeValue {
    pub kind: DateTimeKind,
    pub millis_since_unix_epoch: i64,
}

fn decode_date_time(raw: u64) -> DateTimeValue {
    let kind = DateTimeKind::from_raw(raw);
    let ticks = raw & DATE_TIME_KIND_MASK;
    let millis = (ticks as i64 - TICKS_AT_UNIX_EPOCH as i64) / TICKS_PER_MILLISECOND as i64;
    DateTimeValue {
        kind,
        millis_since_unix_epoch: millis,
    }
}

fn eof(source: &mut dyn ByteSource, n: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; n];
    if !source.read_exact(&mut buf) {
        return Err(Error::UnexpectedEof);
    }
    Ok(buf)
}

pub(crate) fn read_u8(source: &mut dyn ByteSource) -> Result<u8> {
    source.read_u8().ok_or(Error::UnexpectedEof)
}

pub(crate) fn read_u16(source: &mut dyn ByteSource) -> Result<u16> {
    Ok(u16::from_le_bytes(eof(source, 2)?.try_into().unwrap()))
}

pub(crate) fn read_u32(source: &mut dyn ByteSource) -> Result<u32> {
    Ok(u32::from_le_bytes(eof(source, 4)?.try_into().unwrap()))
}

pub(crate) fn read_u64(source: &mut dyn ByteSource) -> Result<u64> {
    Ok(u64::from_le_bytes(eof(source, 8)?.try_into().unwrap()))
}

pub(crate) fn read_i32(source: &mut dyn ByteSource) -> Result<i32> {
    Ok(read_u32(source)? as i32)
}

fn read_char(source: &mut dyn ByteSource) -> Result<char> {
    let first = read_u8(source)?;
    let extra = if first & 0x80 == 0 {
        0
    } else if first & 0xE0 == 0xC0 {
        1
    } else if first & 0xF0 == 0xE0 {
        2
    } else if first & 0xF8 == 0xF0 {
        3
    } else {
        return Err(Error::Unsupported("invalid UTF-8 leading byte in Char"));
    };
    let mut bytes = vec![first];
    bytes.extend(eof(source, extra)?);
    let s = String::from_utf8(bytes)?;
    s.chars().next().ok_or(Error::UnexpectedEof)
}

fn read_decimal(source: &mut dyn ByteSource) -> Result<f64> {
    let text = crate::strings::read_string(source)?;
    text.parse::<f64>()
        .map_err(|_| Error::Unsupported("decimal payload was not a valid number"))
}

pub fn read_primitive(tag: u8, source: &mut dyn ByteSource) -> Result<PrimitiveValue> {
    Ok(match tag {
        PT_BOOLEAN => PrimitiveValue::Boolean(read_u8(source)? != 0),
        PT_BYTE => PrimitiveValue::Byte(read_u8(source)?),
        PT_CHAR => PrimitiveValue::Char(read_char(source)?),
        PT_DECIMAL => PrimitiveValue::Decimal(read_decimal(source)?),
        PT_DOUBLE => PrimitiveValue::Double(f64::from_le_bytes(eof(source, 8)?.try_into().unwrap())),
        PT_INT16 => PrimitiveValue::Int16(read_u16(source)? as i16),
        PT_INT32 => PrimitiveValue::Int32(read_u32(source)? as i32),
        PT_INT64 => PrimitiveValue::Int64(read_u64(source)? as i64),
        PT_SBYTE => PrimitiveValue::SByte(read_u8(source)? as i8),
        PT_SINGLE => PrimitiveValue::Single(f32::from_le_bytes(eof(source, 4)?.try_into().unwrap())),
        PT_TIME_SPAN => PrimitiveValue::TimeSpan(read_u64(source)? as i64),
        PT_DATE_TIME => PrimitiveValue::DateTime(decode_date_time(read_u64(source)?)),
        PT_UINT16 => PrimitiveValue::UInt16(read_u16(source)?),
        PT_UINT32 => PrimitiveValue::UInt32(read_u32(source)?),
        PT_UINT64 => PrimitiveValue::UInt64(read_u64(source)?),
        PT_NULL => PrimitiveValue::Null,
        PT_STRING => PrimitiveValue::String(crate::strings::read_string(source)?),
        other => return Err(Error::UnknownRecord(other)),
    })
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveArray {
    Boolean(Vec<bool>),
    Byte(Vec<u8>),
    Char,
    Decimal,
    Double(Vec<f64>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    SByte(Vec<i8>),
    Single(Vec<f32>),
    TimeSpan(Vec<i64>),
    DateTime(Vec<DateTimeValue>),
    UInt16(Vec<u16>),
    UInt32(Vec<u32>),
    UInt64(Vec<u64>),
    Null,
    String(Vec<String>),
}

pub fn read_primitive_array(tag: u8, length: usize, source: &mut dyn ByteSource) -> Result<PrimitiveArray> {
    Ok(match tag {
        PT_NULL => PrimitiveArray::Null,
        PT_CHAR => PrimitiveArray::Char,
        PT_DECIMAL => PrimitiveArray::Decimal,
        PT_BOOLEAN => PrimitiveArray::Boolean((0..length).map(|_| Ok(read_u8(source)? != 0)).collect::<Result<_>>()?),
        PT_BYTE => PrimitiveArray::Byte((0..length).map(|_| read_u8(source)).collect::<Result<_>>()?),
        PT_DOUBLE => PrimitiveArray::Double(
            (0..length)
                .map(|_| Ok(f64::from_le_bytes(eof(source, 8)?.try_into().unwrap())))
                .collect::<Result<_>>()?,
        ),
        PT_INT16 => PrimitiveArray::Int16((0..length).map(|_| Ok(read_u16(source)? as i16)).collect::<Result<_>>()?),
        PT_INT32 => PrimitiveArray::Int32((0..length).map(|_| Ok(read_u32(source)? as i32)).collect::<Result<_>>()?),
        PT_INT64 => PrimitiveArray::Int64((0..length).map(|_| Ok(read_u64(source)? as i64)).collect::<Result<_>>()?),
        PT_SBYTE => PrimitiveArray::SByte((0..length).map(|_| Ok(read_u8(source)? as i8)).collect::<Result<_>>()?),
        PT_SINGLE => PrimitiveArray::Single(
            (0..length)
                .map(|_| Ok(f32::from_le_bytes(eof(source, 4)?.try_into().unwrap())))
                .collect::<Result<_>>()?,
        ),
        PT_TIME_SPAN => PrimitiveArray::TimeSpan((0..length).map(|_| Ok(read_u64(source)? as i64)).collect::<Result<_>>()?),
        PT_DATE_TIME => {
            PrimitiveArray::DateTime((0..length).map(|_| Ok(decode_date_time(read_u64(source)?))).collect::<Result<_>>()?)
        }
        PT_UINT16 => PrimitiveArray::UInt16((0..length).map(|_| read_u16(source)).collect::<Result<_>>()?),
        PT_UINT32 => PrimitiveArray::UInt32((0..length).map(|_| read_u32(source)).collect::<Result<_>>()?),
        PT_UINT64 => PrimitiveArray::UInt64((0..length).map(|_| read_u64(source)).collect::<Result<_>>()?),
        PT_STRING => {
            PrimitiveArray::String((0..length).map(|_| crate::strings::read_string(source)).collect::<Result<_>>()?)
        }
        other => return Err(Error::UnknownRecord(other)),
    })
}

impl PrimitiveArray {
    pub fn len(&self) -> usize {
        match self {
            PrimitiveArray::Boolean(v) => v.len(),
            PrimitiveArray::Byte(v) => v.len(),
            PrimitiveArray::Char | PrimitiveArray::Decimal | PrimitiveArray::Null => 0,
            PrimitiveArray::Double(v) => v.len(),
            PrimitiveArray::Int16(v) => v.len(),
            PrimitiveArray::Int32(v) => v.len(),
            PrimitiveArray::Int64(v) => v.len(),
            PrimitiveArray::SByte(v) => v.len(),
            PrimitiveArray::Single(v) => v.len(),
            PrimitiveArray::TimeSpan(v) => v.len(),
            PrimitiveArray::DateTime(v) => v.len(),
            PrimitiveArray::UInt16(v) => v.len(),
            PrimitiveArray::UInt32(v) => v.len(),
            PrimitiveArray::UInt64(v) => v.len(),
            PrimitiveArray::String(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, idx: usize) -> Option<PrimitiveValue> {
        Some(match self {
            PrimitiveArray::Boolean(v) => PrimitiveValue::Boolean(*v.get(idx)?),
            PrimitiveArray::Byte(v) => PrimitiveValue::Byte(*v.get(idx)?),
            PrimitiveArray::Char | PrimitiveArray::Decimal | PrimitiveArray::Null => return None,
            PrimitiveArray::Double(v) => PrimitiveValue::Double(*v.get(idx)?),
            PrimitiveArray::Int16(v) => PrimitiveValue::Int16(*v.get(idx)?),
            PrimitiveArray::Int32(v) => PrimitiveValue::Int32(*v.get(idx)?),
            PrimitiveArray::Int64(v) => PrimitiveValue::Int64(*v.get(idx)?),
            PrimitiveArray::SByte(v) => PrimitiveValue::SByte(*v.get(idx)?),
            PrimitiveArray::Single(v) => PrimitiveValue::Single(*v.get(idx)?),
            PrimitiveArray::TimeSpan(v) => PrimitiveValue::TimeSpan(*v.get(idx)?),
            PrimitiveArray::DateTime(v) => PrimitiveValue::DateTime(*v.get(idx)?),
            PrimitiveArray::UInt16(v) => PrimitiveValue::UInt16(*v.get(idx)?),
            PrimitiveArray::UInt32(v) => PrimitiveValue::UInt32(*v.get(idx)?),
            PrimitiveArray::UInt64(v) => PrimitiveValue::UInt64(*v.get(idx)?),
            PrimitiveArray::String(v) => PrimitiveValue::String(v.get(idx)?.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::IoByteSource;

    #[test]
    fn int32_round_trips_raw_little_endian() {
        let mut source = IoByteSource::new(&0x2A2A_2A2Au32.to_le_bytes()[..]);
        assert_eq!(
            read_primitive(PT_INT32, &mut source).unwrap(),
            PrimitiveValue::Int32(707_406_378)
        );
    }

    #[test]
    fn date_time_unix_epoch_and_one_day_later() {
        // top two bits = 01 (UTC), low 62 bits = ticks at year 0001 matching the unix epoch.
        let raw = TICKS_AT_UNIX_EPOCH | (1u64 << 62);
        let v = decode_date_time(raw);
        assert_eq!(v.kind, DateTimeKind::Utc);
        assert_eq!(v.millis_since_unix_epoch, 0);

        let one_day_ticks = 864_000_000_000u64;
        let v = decode_date_time(raw + one_day_ticks);
        assert_eq!(v.millis_since_unix_epoch, 86_400_000);
    }

    #[test]
    fn char_decodes_multi_byte_utf8() {
        let mut source = IoByteSource::new("é".as_bytes());
        assert_eq!(read_primitive(PT_CHAR, &mut source).unwrap(), PrimitiveValue::Char('é'));
    }

    #[test]
    fn null_and_char_and_decimal_arrays_decode_empty() {
        let mut source = IoByteSource::new(&[][..]);
        assert_eq!(read_primitive_array(PT_NULL, 5, &mut source).unwrap(), PrimitiveArray::Null);
        assert_eq!(read_primitive_array(PT_CHAR, 5, &mut source).unwrap(), PrimitiveArray::Char);
        assert_eq!(read_primitive_array(PT_DECIMAL, 5, &mut source).unwrap(), PrimitiveArray::Decimal);
    }

    #[test]
    fn int32_array_reads_values_back_to_back() {
        let bytes: Vec<u8> = [1i32, -2, 3].iter().flat_map(|v| v.to_le_bytes()).collect();
        let mut source = IoByteSource::new(&bytes[..]);
        assert_eq!(
            read_primitive_array(PT_INT32, 3, &mut source).unwrap(),
            PrimitiveArray::Int32(vec![1, -2, 3])
        );
    }
}
