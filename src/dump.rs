use crate::binary_type::{BinaryTypeSlot, SlotValue};
use crate::constants::{MAX_ARRAY_PRINT_SIZE, MAX_INDENT};
use crate::primitive::{PrimitiveArray, PrimitiveValue};
use crate::record::{ArrayContents, Record, RecordKind};
use crate::stream::Stream;
use crate::utils::indent;

pub fn dump_streams(streams: &[Stream]) -> String {
    let mut out = String::new();
    for stream in streams {
        for (index, record) in stream.records().iter().enumerate() {
            if record.is_referenced.get() {
                continue;
            }
            out.push_str(&format!("--- Record: {index} ---\n"));
            render_record(&mut out, stream, record, 0);
        }
    }
    out
}

fn render_record(out: &mut String, stream: &Stream, record: &Record, depth: usize) {
    if depth >= MAX_INDENT {
        out.push_str(&format!("{}...\n", indent(depth)));
        return;
    }
    let pad = indent(depth);
    match &record.kind {
        RecordKind::StreamHeader { root_id, header_id, major_version, minor_version } => {
            out.push_str(&format!(
                "{pad}SerializationHeader rootID={root_id} headerID={header_id} majorVersion={major_version} minorVersion={minor_version}\n"
            ));
        }
        RecordKind::ClassWithId { .. } | RecordKind::SystemClassWithMembersAndTypes | RecordKind::ClassWithMembersAndTypes { .. } => {
            let class_info = record.class_info.as_ref();
            let name = class_info.map(|ci| ci.display_name.as_str()).unwrap_or("?");
            out.push_str(&format!("{pad}{name}\n"));
            for (i, slot) in record.members.iter().enumerate() {
                let member_name = class_info.and_then(|ci| ci.member_names.get(i)).map(String::as_str).unwrap_or("?");
                render_member(out, stream, member_name, slot, depth + 1);
            }
        }
        RecordKind::BinaryObjectString { value } => out.push_str(&format!("{pad}\"{value}\"\n")),
        RecordKind::BinaryArray { contents, .. } => render_array_contents(out, stream, contents, depth),
        RecordKind::MemberPrimitiveTyped { value } => {
            out.push_str(&format!("{pad}({}) {}\n", primitive_type_label(value), format_primitive_value(value)));
        }
        RecordKind::MemberReference { target_id } => out.push_str(&format!("{pad}-> #{target_id}\n")),
        RecordKind::ObjectNull => out.push_str(&format!("{pad}null\n")),
        RecordKind::MessageEnd => out.push_str(&format!("{pad}MessageEnd\n")),
        RecordKind::BinaryLibrary { library_id, library_name } => {
            out.push_str(&format!("{pad}BinaryLibrary #{library_id} \"{library_name}\"\n"))
        }
        RecordKind::ObjectNullMultiple { count } => out.push_str(&format!("{pad}{count} null(s)\n")),
        RecordKind::ArraySinglePrimitive { values, .. } => render_primitive_array(out, values, depth),
        RecordKind::ArraySingleObject { elements } | RecordKind::ArraySingleString { elements } => {
            render_slots(out, stream, elements, depth)
        }
    }
}

fn render_member(out: &mut String, stream: &Stream, name: &str, slot: &BinaryTypeSlot, depth: usize) {
    if depth >= MAX_INDENT {
        out.push_str(&format!("{}...\n", indent(depth)));
        return;
    }
    let pad = indent(depth);
    match &slot.value {
        SlotValue::Inline(value) => {
            out.push_str(&format!("{pad}{name} ({}) {}\n", primitive_type_label(value), format_primitive_value(value)));
        }
        SlotValue::Null => out.push_str(&format!("{pad}{name} = null\n")),
        SlotValue::StringRef(id) => match slot.ref_record().or_else(|| stream.find(*id).cloned()) {
            Some(target) => match &target.kind {
                RecordKind::BinaryObjectString { value } => out.push_str(&format!("{pad}{name} (string) \"{value}\"\n")),
                _ => out.push_str(&format!("{pad}{name} -> <unexpected record for string ref #{id}>\n")),
            },
            None => out.push_str(&format!("{pad}{name} -> <unresolved #{id}>\n")),
        },
        SlotValue::ObjectRef(id) => match slot.ref_record().or_else(|| stream.find(*id).cloned()) {
            Some(target) => {
                out.push_str(&format!("{pad}{name}:\n"));
                render_record(out, stream, &target, depth + 1);
            }
            None => out.push_str(&format!("{pad}{name} -> <unresolved #{id}>\n")),
        },
    }
}

fn render_array_contents(out: &mut String, stream: &Stream, contents: &ArrayContents, depth: usize) {
    match contents {
        ArrayContents::Primitive(values) => render_primitive_array(out, values, depth),
        ArrayContents::Slots(slots) => render_slots(out, stream, slots, depth),
    }
}

fn render_primitive_array(out: &mut String, values: &PrimitiveArray, depth: usize) {
    let pad = indent(depth);
    let shown = values.len().min(MAX_ARRAY_PRINT_SIZE);
    for i in 0..shown {
        let Some(value) = values.get(i) else { continue };
        out.push_str(&format!("{pad}[{i}] ({}) {}\n", primitive_type_label(&value), format_primitive_value(&value)));
    }
    if values.len() > shown {
        out.push_str(&format!("{pad}...\n"));
    }
}

fn render_slots(out: &mut String, stream: &Stream, slots: &[BinaryTypeSlot], depth: usize) {
    let pad = indent(depth);
    let shown = slots.len().min(MAX_ARRAY_PRINT_SIZE);
    for (i, slot) in slots.iter().take(shown).enumerate() {
        render_member(out, stream, &format!("[{i}]"), slot, depth);
    }
    if slots.len() > shown {
        out.push_str(&format!("{pad}...\n"));
    }
}

fn primitive_type_label(value: &PrimitiveValue) -> &'static str {
    match value {
        PrimitiveValue::Boolean(_) => "bool",
        PrimitiveValue::Byte(_) => "byte",
        PrimitiveValue::Char(_) => "char",
        PrimitiveValue::Decimal(_) => "decimal",
        PrimitiveValue::Double(_) => "double",
        PrimitiveValue::Int16(_) => "int16",
        PrimitiveValue::Int32(_) => "int32",
        PrimitiveValue::Int64(_) => "int64",
        PrimitiveValue::SByte(_) => "sbyte",
        PrimitiveValue::Single(_) => "single",
        PrimitiveValue::TimeSpan(_) => "timespan",
        PrimitiveValue::DateTime(_) => "datetime",
        PrimitiveValue::UInt16(_) => "uint16",
        PrimitiveValue::UInt32(_) => "uint32",
        PrimitiveValue::UInt64(_) => "uint64",
        PrimitiveValue::Null => "null",
        PrimitiveValue::String(_) => "string",
    }
}

fn format_primitive_value(value: &PrimitiveValue) -> String {
    match value {
        PrimitiveValue::Boolean(v) => v.to_string(),
        PrimitiveValue::Byte(v) => v.to_string(),
        PrimitiveValue::Char(v) => format!("'{v}'"),
        PrimitiveValue::Decimal(v) => v.to_string(),
        PrimitiveValue::Double(v) => v.to_string(),
        PrimitiveValue::Int16(v) => v.to_string(),
        PrimitiveValue::Int32(v) => v.to_string(),
        PrimitiveValue::Int64(v) => v.to_string(),
        PrimitiveValue::SByte(v) => v.to_string(),
        PrimitiveValue::Single(v) => v.to_string(),
        PrimitiveValue::TimeSpan(v) => v.to_string(),
        PrimitiveValue::DateTime(v) => format!("{}ms since epoch", v.millis_since_unix_epoch),
        PrimitiveValue::UInt16(v) => v.to_string(),
        PrimitiveValue::UInt32(v) => v.to_string(),
        PrimitiveValue::UInt64(v) => v.to_string(),
        PrimitiveValue::Null => "null".to_string(),
        PrimitiveValue::String(v) => format!("\"{v}\""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::IoByteSource;
    use crate::constants::*;

    #[test]
    fn single_integer_member_renders_the_documented_line() {
        let mut bytes = vec![0u8];
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(0i32.to_le_bytes());
        bytes.extend(0i32.to_le_bytes());
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
        let dumped = dump_streams(&[stream]);
        assert!(dumped.contains("Main (int32) 707406378"));
    }

    #[test]
    fn referenced_records_are_not_emitted_at_top_level() {
        let mut bytes = vec![0u8];
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(1i32.to_le_bytes());
        bytes.extend(0i32.to_le_bytes());
        bytes.extend(0i32.to_le_bytes());

        bytes.push(REC_CLASS_WITH_MEMBERS_AND_TYPES);
        bytes.extend(10i32.to_le_bytes());
        bytes.push(1);
        bytes.extend(b"A");
        bytes.extend(1i32.to_le_bytes());
        bytes.push(1);
        bytes.extend(b"A");
        bytes.push(BT_OBJECT);
        bytes.extend(0i32.to_le_bytes());
        bytes.push(REC_MEMBER_REFERENCE);
        bytes.extend(20i32.to_le_bytes());

        bytes.push(REC_BINARY_OBJECT_STRING);
        bytes.extend(20i32.to_le_bytes());
        bytes.push(1);
        bytes.extend(b"b");

        bytes.push(REC_MESSAGE_END);

        let mut source = IoByteSource::new(&bytes[..]);
        let stream = Stream::decode(&mut source).unwrap();
        crate::linker::link(&stream).unwrap();
        let dumped = dump_streams(&[stream]);
        assert!(dumped.contains("--- Record: 1 ---"));
        assert!(!dumped.contains("--- Record: 2 ---"));
    }
}
