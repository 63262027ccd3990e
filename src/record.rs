use std::cell::Cell;
use std::rc::Rc;

use crate::binary_type::{decode_slot_with_kind, BinaryTypeKind, BinaryTypeSlot};
use crate::byte_source::ByteSource;
use crate::class_info::ClassInfo;
use crate::codecs::{read_array_elements, ArrayChildPolicy};
use crate::constants::*;
use crate::primitive::{read_i32, read_primitive_array, PrimitiveArray, PrimitiveValue};
use crate::result::{Error, Result};
use crate::stream::Stream;

#[derive(Debug)]
pub enum ArrayContents {
    Primitive(PrimitiveArray),
    Slots(Vec<BinaryTypeSlot>),
}

#[derive(Debug)]
pub enum RecordKind {
    StreamHeader {
        root_id: i32,
        header_id: i32,
        major_version: i32,
        minor_version: i32,
    },
    ClassWithId {
        metadata_id: i32,
    },
    SystemClassWithMembersAndTypes,
    ClassWithMembersAndTypes {
        library_id: i32,
    },
    BinaryObjectString {
        value: String,
    },
    BinaryArray {
        array_kind: u8,
        rank: i32,
        lengths: Vec<i32>,
        lower_bounds: Vec<i32>,
        element_kind: BinaryTypeKind,
        contents: ArrayContents,
    },
    MemberPrimitiveTyped {
        value: PrimitiveValue,
    },
    MemberReference {
        target_id: i32,
    },
    ObjectNull,
    MessageEnd,
    BinaryLibrary {
        library_id: i32,
        library_name: String,
    },
    ObjectNullMultiple {
        count: i32,
    },
    ArraySinglePrimitive {
        primitive_tag: u8,
        values: PrimitiveArray,
    },
    ArraySingleObject {
        elements: Vec<BinaryTypeSlot>,
    },
    ArraySingleString {
        elements: Vec<BinaryTypeSlot>,
    },
}

impl RecordKind {
    pub fn name(&self) -> &'static str {
        match self {
            RecordKind::StreamHeader { .. } => "SerializationHeaderRecord",
            RecordKind::ClassWithId { .. } => "ClassWithId",
            RecordKind::SystemClassWithMembersAndTypes => "SystemClassWithMembersAndTypes",
            RecordKind::ClassWithMembersAndTypes { .. } => "ClassWithMembersAndTypes",
            RecordKind::BinaryObjectString { .. } => "BinaryObjectString",
            RecordKind::BinaryArray { .. } => "BinaryArray",
            RecordKind::MemberPrimitiveTyped { .. } => "MemberPrimitiveTyped",
            RecordKind::MemberReference { .. } => "MemberReference",
            RecordKind::ObjectNull => "ObjectNull",
            RecordKind::MessageEnd => "MessageEnd",
            RecordKind::BinaryLibrary { .. } => "BinaryLibrary",
            RecordKind::ObjectNullMultiple { .. } => "ObjectNullMultiple",
            RecordKind::ArraySinglePrimitive { .. } => "ArraySinglePrimitive",
            RecordKind::ArraySingleObject { .. } => "ArraySingleObject",
            RecordKind::ArraySingleString { .. } => "ArraySingleString",
        }
    }
}

#[derive(Debug)]
pub struct Record {
    pub kind: RecordKind,
    pub object_id: i32,
    pub class_info: Option<ClassInfo>,
    pub members: Vec<BinaryTypeSlot>,
    pub is_referenced: Cell<bool>,
}

impl Record {
    fn new(kind: RecordKind, object_id: i32) -> Self {
        Self {
            kind,
            object_id,
            class_info: None,
            members: Vec::new(),
            is_referenced: Cell::new(false),
        }
    }

    fn with_class(kind: RecordKind, class_info: ClassInfo, members: Vec<BinaryTypeSlot>) -> Self {
        Self {
            object_id: class_info.object_id,
            kind,
            class_info: Some(class_info),
            members,
            is_referenced: Cell::new(false),
        }
    }
}

pub fn visit_slots<'a>(record: &'a Record, mut visit: impl FnMut(&'a BinaryTypeSlot)) {
    fn go<'a>(record: &'a Record, visit: &mut dyn FnMut(&'a BinaryTypeSlot)) {
        for slot in &record.members {
            visit(slot);
        }
        if let RecordKind::BinaryArray { contents: ArrayContents::Slots(slots), .. }
        | RecordKind::ArraySingleObject { elements: slots }
        | RecordKind::ArraySingleString { elements: slots } = &record.kind
        {
            for slot in slots {
                visit(slot);
            }
        }
    }
    go(record, &mut visit)
}

fn read_class_info(source: &mut dyn ByteSource) -> Result<ClassInfo> {
    let object_id = read_i32(source)?;
    let name = crate::strings::read_string(source)?;
    let member_count = read_i32(source)?.max(0) as usize;
    let mut member_names = Vec::with_capacity(member_count);
    for _ in 0..member_count {
        member_names.push(crate::strings::read_string(source)?);
    }
    Ok(ClassInfo::new(object_id, name, member_names))
}

fn read_member_kinds(count: usize, source: &mut dyn ByteSource) -> Result<Vec<BinaryTypeKind>> {
    let mut kinds = Vec::with_capacity(count);
    for _ in 0..count {
        let tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
        kinds.push(BinaryTypeKind::read_header(tag, source)?);
    }
    Ok(kinds)
}

fn read_members(kinds: Vec<BinaryTypeKind>, source: &mut dyn ByteSource, stream: &mut Stream) -> Result<Vec<BinaryTypeSlot>> {
    kinds
        .into_iter()
        .map(|kind| decode_slot_with_kind(kind, source, stream))
        .collect()
}

pub(crate) fn decode_record(tag: u8, source: &mut dyn ByteSource, stream: &mut Stream) -> Result<Rc<Record>> {
    let record = match tag {
        REC_SERIALIZED_STREAM_HEADER => {
            let root_id = read_i32(source)?;
            let header_id = read_i32(source)?;
            let major_version = read_i32(source)?;
            let minor_version = read_i32(source)?;
            Record::new(
                RecordKind::StreamHeader { root_id, header_id, major_version, minor_version },
                0,
            )
        }
        REC_CLASS_WITH_ID => {
            let object_id = read_i32(source)?;
            let metadata_id = read_i32(source)?;
            let metadata = stream.find(metadata_id).cloned().ok_or(Error::MetadataNotFound(metadata_id))?;
            let metadata_class = metadata.class_info.as_ref().ok_or(Error::MetadataNotFound(metadata_id))?;
            let class_info = ClassInfo::new(object_id, metadata_class.name.clone(), metadata_class.member_names.clone());
            let kinds: Vec<_> = metadata.members.iter().map(|slot| slot.kind.clone()).collect();
            let members = read_members(kinds, source, stream)?;
            Record::with_class(RecordKind::ClassWithId { metadata_id }, class_info, members)
        }
        REC_SYSTEM_CLASS_WITH_MEMBERS => {
            let _ = read_class_info(source)?;
            return Err(Error::Unsupported("SystemClassWithMembers (untyped member layout)"));
        }
        REC_CLASS_WITH_MEMBERS => {
            let _ = read_class_info(source)?;
            let _library_id = read_i32(source)?;
            return Err(Error::Unsupported("ClassWithMembers (untyped member layout)"));
        }
        REC_SYSTEM_CLASS_WITH_MEMBERS_AND_TYPES => {
            let class_info = read_class_info(source)?;
            let kinds = read_member_kinds(class_info.member_names.len(), source)?;
            let members = read_members(kinds, source, stream)?;
            Record::with_class(RecordKind::SystemClassWithMembersAndTypes, class_info, members)
        }
        REC_CLASS_WITH_MEMBERS_AND_TYPES => {
            let class_info = read_class_info(source)?;
            let kinds = read_member_kinds(class_info.member_names.len(), source)?;
            let library_id = read_i32(source)?;
            let members = read_members(kinds, source, stream)?;
            Record::with_class(RecordKind::ClassWithMembersAndTypes { library_id }, class_info, members)
        }
        REC_BINARY_OBJECT_STRING => {
            let object_id = read_i32(source)?;
            let value = crate::strings::read_string(source)?;
            Record::new(RecordKind::BinaryObjectString { value }, object_id)
        }
        REC_BINARY_ARRAY => {
            let object_id = read_i32(source)?;
            let array_kind = source.read_u8().ok_or(Error::UnexpectedEof)?;
            let rank = read_i32(source)?;
            let rank_usize = rank.max(0) as usize;
            let mut lengths = Vec::with_capacity(rank_usize);
            for _ in 0..rank_usize {
                lengths.push(read_i32(source)?);
            }
            let mut lower_bounds = Vec::new();
            if matches!(array_kind, ARRAY_SINGLE_OFFSET | ARRAY_JAGGED_OFFSET | ARRAY_RECTANGULAR_OFFSET) {
                for _ in 0..rank_usize {
                    lower_bounds.push(read_i32(source)?);
                }
            }
            let elem_tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
            let element_kind = BinaryTypeKind::read_header(elem_tag, source)?;

            if !matches!(array_kind, ARRAY_SINGLE | ARRAY_RECTANGULAR) {
                return Err(Error::Unsupported("jagged/offset BinaryArray variants"));
            }
            let total: usize = lengths.iter().map(|&l| l.max(0) as usize).product();
            let contents = if let BinaryTypeKind::Primitive(sub_tag) = &element_kind {
                ArrayContents::Primitive(read_primitive_array(*sub_tag, total, source)?)
            } else {
                let policy = if matches!(element_kind, BinaryTypeKind::String) {
                    ArrayChildPolicy::String
                } else {
                    ArrayChildPolicy::Object
                };
                ArrayContents::Slots(read_array_elements(total, &element_kind, policy, source, stream)?)
            };
            Record::new(
                RecordKind::BinaryArray { array_kind, rank, lengths, lower_bounds, element_kind, contents },
                object_id,
            )
        }
        REC_MEMBER_PRIMITIVE_TYPED => {
            let sub_tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
            let value = crate::primitive::read_primitive(sub_tag, source)?;
            Record::new(RecordKind::MemberPrimitiveTyped { value }, 0)
        }
        REC_MEMBER_REFERENCE => {
            let target_id = read_i32(source)?;
            Record::new(RecordKind::MemberReference { target_id }, 0)
        }
        REC_OBJECT_NULL => Record::new(RecordKind::ObjectNull, 0),
        REC_MESSAGE_END => Record::new(RecordKind::MessageEnd, 0),
        REC_BINARY_LIBRARY => {
            let library_id = read_i32(source)?;
            let library_name = crate::strings::read_string(source)?;
            Record::new(RecordKind::BinaryLibrary { library_id, library_name }, 0)
        }
        REC_OBJECT_NULL_MULTIPLE_256 => {
            let count = source.read_u8().ok_or(Error::UnexpectedEof)? as i32;
            Record::new(RecordKind::ObjectNullMultiple { count }, 0)
        }
        REC_OBJECT_NULL_MULTIPLE => {
            let count = read_i32(source)?;
            Record::new(RecordKind::ObjectNullMultiple { count }, 0)
        }
        REC_ARRAY_SINGLE_PRIMITIVE => {
            let object_id = read_i32(source)?;
            let length = read_i32(source)?.max(0) as usize;
            let primitive_tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
            let values = read_primitive_array(primitive_tag, length, source)?;
            Record::new(RecordKind::ArraySinglePrimitive { primitive_tag, values }, object_id)
        }
        REC_ARRAY_SINGLE_OBJECT => {
            let object_id = read_i32(source)?;
            let length = read_i32(source)?.max(0) as usize;
            let elements = read_array_elements(length, &BinaryTypeKind::Object, ArrayChildPolicy::Object, source, stream)?;
            Record::new(RecordKind::ArraySingleObject { elements }, object_id)
        }
        REC_ARRAY_SINGLE_STRING => {
            let object_id = read_i32(source)?;
            let length = read_i32(source)?.max(0) as usize;
            let elements = read_array_elements(length, &BinaryTypeKind::String, ArrayChildPolicy::String, source, stream)?;
            Record::new(RecordKind::ArraySingleString { elements }, object_id)
        }
        REC_METHOD_CALL | REC_METHOD_RETURN => {
            let _message_flags = read_i32(source)?;
            let _method_name = crate::strings::read_string_with_code(source)?;
            let _type_name = crate::strings::read_string_with_code(source)?;
            return Err(Error::Unsupported("MethodCall/MethodReturn call-context and argument payloads"));
        }
        other => return Err(Error::UnknownRecord(other)),
    };
    Ok(Rc::new(record))
}
