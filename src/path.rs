use std::rc::Rc;

use crate::accessor::Value;
use crate::binary_type::{BinaryTypeSlot, SlotValue};
use crate::primitive::PrimitiveValue;
use crate::record::{ArrayContents, Record, RecordKind};
use crate::stream::Stream;

enum Cursor {
    Scalar(PrimitiveValue),
    Record(Rc<Record>),
}

pub fn resolve(streams: &[Stream], path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return None;
    }

    let stream_idx: usize = segments[0].parse().ok()?;
    let stream = streams.get(stream_idx)?;
    let class_name = segments[1];
    let root = stream
        .records()
        .iter()
        .find(|r| r.class_info.as_ref().map(|ci| ci.display_name.as_str()) == Some(class_name))?
        .clone();

    let mut cursor = Cursor::Record(root);
    let mut i = 2;
    while i < segments.len() {
        cursor = step(stream, cursor, &segments, &mut i)?;
    }
    Some(match cursor {
        Cursor::Scalar(pv) => Value::from_primitive(pv),
        Cursor::Record(record) => Value::from_record(stream, record),
    })
}

fn step(stream: &Stream, cursor: Cursor, segments: &[&str], i: &mut usize) -> Option<Cursor> {
    let record = match cursor {
        Cursor::Record(record) => record,
        Cursor::Scalar(_) => return None,
    };

    if let RecordKind::BinaryArray { lengths, contents, .. } = &record.kind {
        let rank = lengths.len().max(1);
        if rank > 1 {
            if *i + rank > segments.len() {
                return None;
            }
            let coords: Vec<usize> = segments[*i..*i + rank].iter().map(|s| s.parse().ok()).collect::<Option<_>>()?;
            *i += rank;
            let flat = flat_index(lengths, &coords)?;
            return array_contents_cursor(stream, contents, flat);
        }
    }

    let seg = segments[*i];
    *i += 1;
    index_into_record(stream, &record, seg)
}

fn flat_index(lengths: &[i32], coords: &[usize]) -> Option<usize> {
    if coords.len() != lengths.len() {
        return None;
    }
    for (&c, &l) in coords.iter().zip(lengths) {
        if l < 0 || c >= l as usize {
            return None;
        }
    }
    let mut flat = 0usize;
    for (i, &c) in coords.iter().enumerate() {
        let stride: usize = lengths[i + 1..].iter().map(|&l| l.max(0) as usize).product();
        flat += c * stride;
    }
    Some(flat)
}

fn index_into_record(stream: &Stream, record: &Rc<Record>, seg: &str) -> Option<Cursor> {
    match &record.kind {
        RecordKind::BinaryArray { lengths, contents, .. } => {
            let idx: usize = seg.parse().ok()?;
            if lengths.len() != 1 || lengths[0] < 0 || idx >= lengths[0] as usize {
                return None;
            }
            array_contents_cursor(stream, contents, idx)
        }
        RecordKind::ArraySinglePrimitive { values, .. } => {
            let idx: usize = seg.parse().ok()?;
            Some(Cursor::Scalar(values.get(idx)?))
        }
        RecordKind::ArraySingleObject { elements } | RecordKind::ArraySingleString { elements } => {
            let idx: usize = seg.parse().ok()?;
            slot_cursor(stream, elements.get(idx)?)
        }
        _ => {
            let class_info = record.class_info.as_ref()?;
            let idx = match seg.parse::<usize>() {
                Ok(idx) => idx,
                Err(_) => class_info.member_names.iter().position(|name| name == seg)?,
            };
            slot_cursor(stream, record.members.get(idx)?)
        }
    }
}

fn array_contents_cursor(stream: &Stream, contents: &ArrayContents, idx: usize) -> Option<Cursor> {
    match contents {
        ArrayContents::Primitive(values) => Some(Cursor::Scalar(values.get(idx)?)),
        ArrayContents::Slots(slots) => slot_cursor(stream, slots.get(idx)?),
    }
}

fn slot_cursor(stream: &Stream, slot: &BinaryTypeSlot) -> Option<Cursor> {
    match &slot.value {
        SlotValue::Inline(pv) => Some(Cursor::Scalar(pv.clone())),
        SlotValue::Null => Some(Cursor::Scalar(PrimitiveValue::Null)),
        SlotValue::StringRef(id) | SlotValue::ObjectRef(id) => {
            let target = slot.ref_record().or_else(|| stream.find(*id).cloned())?;
            match &target.kind {
                RecordKind::BinaryObjectString { value } => Some(Cursor::Scalar(PrimitiveValue::String(value.clone()))),
                _ => Some(Cursor::Record(target)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::IoByteSource;
    use crate::constants::*;
    use crate::linker;

    fn header_bytes() -> Vec<u8> {
        let mut bytes = vec![0u8];
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(0i32.to_le_bytes());
        bytes.extend(0i32.to_le_bytes());
        bytes
    }

    #[test]
    fn resolves_a_scalar_member_by_name() {
        let mut bytes = header_bytes();
        bytes.push(REC_CLASS_WITH_MEMBERS_AND_TYPES);
        bytes.extend(1i32.to_le_bytes());
        bytes.push(4);
        bytes.extend(b"Main");
        bytes.extend(1i32.to_le_bytes());
        bytes.push(4);
        bytes.extend(b"Main");
        bytes.push(BT_PRIMITIVE);
        bytes.push(PT_INT32);
        bytes.extend(0i32.to_le_bytes());
        bytes.extend(0x2A2A_2A2Au32.to_le_bytes());
        bytes.push(REC_MESSAGE_END);

        let mut source = IoByteSource::new(&bytes[..]);
        let stream = Stream::decode(&mut source).unwrap();
        linker::link(&stream).ok();
        let streams = vec![stream];

        let value = resolve(&streams, "0/Main/Main").unwrap();
        assert_eq!(value.as_i64(), Some(707_406_378));
    }

    #[test]
    fn unknown_member_name_is_not_found() {
        let mut bytes = header_bytes();
        bytes.push(REC_CLASS_WITH_MEMBERS_AND_TYPES);
        bytes.extend(1i32.to_le_bytes());
        bytes.push(4);
        bytes.extend(b"Main");
        bytes.extend(1i32.to_le_bytes());
        bytes.push(4);
        bytes.extend(b"Main");
        bytes.push(BT_PRIMITIVE);
        bytes.push(PT_INT32);
        bytes.extend(0i32.to_le_bytes());
        bytes.extend(0u32.to_le_bytes());
        bytes.push(REC_MESSAGE_END);

        let mut source = IoByteSource::new(&bytes[..]);
        let stream = Stream::decode(&mut source).unwrap();
        let streams = vec![stream];

        assert!(resolve(&streams, "0/Main/NoSuchMember").is_none());
    }

    #[test]
    fn empty_path_is_not_found() {
        assert!(resolve(&[], "").is_none());
    }
}
