use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::byte_source::ByteSource;
use crate::constants::*;
use crate::primitive::{read_i32, read_primitive, PrimitiveValue};
use crate::record::{decode_record, Record};
use crate::result::{Error, Result};
use crate::stream::Stream;

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryTypeKind {
    Primitive(u8),
    String,
    Object,
    SystemClass(String),
    Class { name: String, library_id: i32 },
    ObjectArray,
    StringArray,
    PrimitiveArray(u8),
}

impl BinaryTypeKind {
    fn from_tag(tag: u8) -> Result<Self> {
        Ok(match tag {
            BT_PRIMITIVE => BinaryTypeKind::Primitive(0),
            BT_STRING => BinaryTypeKind::String,
            BT_OBJECT => BinaryTypeKind::Object,
            BT_SYSTEM_CLASS => BinaryTypeKind::SystemClass(String::new()),
            BT_CLASS => BinaryTypeKind::Class { name: String::new(), library_id: 0 },
            BT_OBJECT_ARRAY => BinaryTypeKind::ObjectArray,
            BT_STRING_ARRAY => BinaryTypeKind::StringArray,
            BT_PRIMITIVE_ARRAY => BinaryTypeKind::PrimitiveArray(0),
            other => return Err(Error::UnknownRecord(other)),
        })
    }

    pub(crate) fn read_header(tag: u8, source: &mut dyn ByteSource) -> Result<Self> {
        let shell = Self::from_tag(tag)?;
        Ok(match shell {
            BinaryTypeKind::Primitive(_) => {
                BinaryTypeKind::Primitive(source.read_u8().ok_or(Error::UnexpectedEof)?)
            }
            BinaryTypeKind::SystemClass(_) => BinaryTypeKind::SystemClass(crate::strings::read_string(source)?),
            BinaryTypeKind::Class { .. } => {
                let name = crate::strings::read_string(source)?;
                let library_id = read_i32(source)?;
                BinaryTypeKind::Class { name, library_id }
            }
            BinaryTypeKind::PrimitiveArray(_) => {
                BinaryTypeKind::PrimitiveArray(source.read_u8().ok_or(Error::UnexpectedEof)?)
            }
            other => other,
        })
    }
}

#[derive(Debug, Clone)]
pub enum SlotValue {
    Inline(PrimitiveValue),
    StringRef(i32),
    ObjectRef(i32),
    Null,
}

pub struct BinaryTypeSlot {
    pub kind: BinaryTypeKind,
    pub value: SlotValue,
    pub(crate) ref_record: RefCell<Option<Weak<Record>>>,
}

impl BinaryTypeSlot {
    pub(crate) fn new(kind: BinaryTypeKind, value: SlotValue) -> Self {
        Self { kind, value, ref_record: RefCell::new(None) }
    }

    pub fn ref_id(&self) -> Option<i32> {
        match self.value {
            SlotValue::StringRef(id) | SlotValue::ObjectRef(id) => Some(id),
            _ => None,
        }
    }

    pub(crate) fn set_ref_record(&self, record: &Rc<Record>) {
        *self.ref_record.borrow_mut() = Some(Rc::downgrade(record));
    }

    pub fn ref_record(&self) -> Option<Rc<Record>> {
        self.ref_record.borrow().as_ref().and_then(Weak::upgrade)
    }
}

pub fn decode_slot(tag: u8, source: &mut dyn ByteSource, stream: &mut Stream) -> Result<BinaryTypeSlot> {
    let kind = BinaryTypeKind::read_header(tag, source)?;
    read_slot_value(kind, source, stream)
}

pub fn decode_slot_with_kind(kind: BinaryTypeKind, source: &mut dyn ByteSource, stream: &mut Stream) -> Result<BinaryTypeSlot> {
    read_slot_value(kind, source, stream)
}

fn read_slot_value(kind: BinaryTypeKind, source: &mut dyn ByteSource, stream: &mut Stream) -> Result<BinaryTypeSlot> {
    let value = match &kind {
        BinaryTypeKind::Primitive(sub_tag) => SlotValue::Inline(read_primitive(*sub_tag, source)?),
        BinaryTypeKind::String => read_string_slot_value(source, stream)?,
        BinaryTypeKind::Object | BinaryTypeKind::SystemClass(_) | BinaryTypeKind::Class { .. } => {
            read_object_slot_value(source, stream, false)?
        }
        BinaryTypeKind::ObjectArray | BinaryTypeKind::StringArray | BinaryTypeKind::PrimitiveArray(_) => {
            read_object_slot_value(source, stream, true)?
        }
    };
    Ok(BinaryTypeSlot { kind, value, ref_record: RefCell::new(None) })
}

fn read_string_slot_value(source: &mut dyn ByteSource, stream: &mut Stream) -> Result<SlotValue> {
    let tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
    match tag {
        REC_BINARY_OBJECT_STRING => {
            let record = decode_record(REC_BINARY_OBJECT_STRING, source, stream)?;
            let object_id = record.object_id;
            stream.push(record);
            Ok(SlotValue::StringRef(object_id))
        }
        REC_MEMBER_REFERENCE => Ok(SlotValue::StringRef(read_i32(source)?)),
        REC_OBJECT_NULL => Ok(SlotValue::Null),
        other => Err(Error::UnknownRecord(other)),
    }
}

fn read_object_slot_value(source: &mut dyn ByteSource, stream: &mut Stream, is_array: bool) -> Result<SlotValue> {
    let tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
    match tag {
        REC_MEMBER_REFERENCE => Ok(SlotValue::ObjectRef(read_i32(source)?)),
        REC_OBJECT_NULL => Ok(SlotValue::Null),
        _ if is_array => Err(Error::Unsupported("inline object/string/primitive array nested in a binary-type slot")),
        nested_tag => {
            let record = decode_record(nested_tag, source, stream)?;
            let object_id = record.object_id;
            stream.push(record);
            Ok(SlotValue::ObjectRef(object_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::IoByteSource;

    #[test]
    fn primitive_slot_reads_subtag_then_value() {
        let mut stream = empty_stream();
        let bytes = [PT_INT32, 0x2A, 0x2A, 0x2A, 0x2A];
        let mut source = IoByteSource::new(&bytes[..]);
        let slot = decode_slot(BT_PRIMITIVE, &mut source, &mut stream).unwrap();
        match slot.value {
            SlotValue::Inline(PrimitiveValue::Int32(v)) => assert_eq!(v, 707_406_378),
            other => panic!("unexpected slot value: {other:?}"),
        }
    }

    #[test]
    fn string_slot_rejects_unknown_tag() {
        let mut stream = empty_stream();
        let bytes = [0xFFu8];
        let mut source = IoByteSource::new(&bytes[..]);
        assert!(decode_slot(BT_STRING, &mut source, &mut stream).is_err());
    }

    #[test]
    fn string_slot_null_tag_yields_null() {
        let mut stream = empty_stream();
        let bytes = [REC_OBJECT_NULL];
        let mut source = IoByteSource::new(&bytes[..]);
        let slot = decode_slot(BT_STRING, &mut source, &mut stream).unwrap();
        assert!(matches!(slot.value, SlotValue::Null));
    }

    #[test]
    fn object_array_slot_rejects_inline_nesting() {
        let mut stream = empty_stream();
        // tag 6 (BinaryObjectString) is a valid record tag but not a
        // reference/null tag, so an array-kind slot must reject it.
        let bytes = [REC_BINARY_OBJECT_STRING];
        let mut source = IoByteSource::new(&bytes[..]);
        assert!(decode_slot(BT_OBJECT_ARRAY, &mut source, &mut stream).is_err());
    }

    fn empty_stream() -> Stream {
        let payload = [0u8, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x0B];
        let mut source = IoByteSource::new(&payload[..]);
        Stream::decode(&mut source).unwrap()
    }
}
