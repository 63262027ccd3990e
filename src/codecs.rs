use crate::binary_type::{BinaryTypeKind, BinaryTypeSlot, SlotValue};
use crate::byte_source::ByteSource;
use crate::constants::*;
use crate::primitive::{read_i32, read_primitive, read_u8, PrimitiveValue};
use crate::record::decode_record;
use crate::result::{Error, Result};
use crate::stream::Stream;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArrayChildPolicy {
    Object,
    String,
}

pub(crate) fn read_array_elements(
    length: usize,
    element_kind: &BinaryTypeKind,
    policy: ArrayChildPolicy,
    source: &mut dyn ByteSource,
    stream: &mut Stream,
) -> Result<Vec<BinaryTypeSlot>> {
    let mut out = Vec::with_capacity(length);
    while out.len() < length {
        let tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
        match tag {
            REC_OBJECT_NULL => out.push(BinaryTypeSlot::new(element_kind.clone(), SlotValue::Null)),
            REC_OBJECT_NULL_MULTIPLE_256 => {
                let run = read_u8(source)? as usize;
                push_null_run(&mut out, run, length, element_kind);
            }
            REC_OBJECT_NULL_MULTIPLE => {
                let run = read_i32(source)?.max(0) as usize;
                push_null_run(&mut out, run, length, element_kind);
            }
            REC_MEMBER_REFERENCE => {
                let id = read_i32(source)?;
                let value = match policy {
                    ArrayChildPolicy::String => SlotValue::StringRef(id),
                    ArrayChildPolicy::Object => SlotValue::ObjectRef(id),
                };
                out.push(BinaryTypeSlot::new(element_kind.clone(), value));
            }
            REC_MEMBER_PRIMITIVE_TYPED if policy == ArrayChildPolicy::Object => {
                let sub_tag = read_u8(source)?;
                let value = read_primitive(sub_tag, source)?;
                if !matches!(
                    value,
                    PrimitiveValue::Boolean(_) | PrimitiveValue::Double(_) | PrimitiveValue::Int32(_) | PrimitiveValue::Int64(_)
                ) {
                    return Err(Error::Unsupported(
                        "ArraySingleObject companion arrays only cover bool/double/int32/int64",
                    ));
                }
                out.push(BinaryTypeSlot::new(element_kind.clone(), SlotValue::Inline(value)));
            }
            REC_ARRAY_SINGLE_OBJECT => {
                return Err(Error::Unsupported("nested array within an array"));
            }
            REC_BINARY_OBJECT_STRING if policy == ArrayChildPolicy::String => {
                let record = decode_record(REC_BINARY_OBJECT_STRING, source, stream)?;
                let id = record.object_id;
                stream.push(record);
                out.push(BinaryTypeSlot::new(element_kind.clone(), SlotValue::StringRef(id)));
            }
            nested if policy == ArrayChildPolicy::Object => {
                let record = decode_record(nested, source, stream)?;
                let id = record.object_id;
                stream.push(record);
                out.push(BinaryTypeSlot::new(element_kind.clone(), SlotValue::ObjectRef(id)));
            }
            other => return Err(Error::UnknownRecord(other)),
        }
    }
    out.truncate(length);
    Ok(out)
}

fn push_null_run(out: &mut Vec<BinaryTypeSlot>, run: usize, length: usize, element_kind: &BinaryTypeKind) {
    let remaining = length.saturating_sub(out.len());
    for _ in 0..run.min(remaining) {
        out.push(BinaryTypeSlot::new(element_kind.clone(), SlotValue::Null));
    }
}
