pub const REC_SERIALIZED_STREAM_HEADER: u8 = 0;
pub const REC_CLASS_WITH_ID: u8 = 1;
pub const REC_SYSTEM_CLASS_WITH_MEMBERS: u8 = 2;
pub const REC_CLASS_WITH_MEMBERS: u8 = 3;
pub const REC_SYSTEM_CLASS_WITH_MEMBERS_AND_TYPES: u8 = 4;
pub const REC_CLASS_WITH_MEMBERS_AND_TYPES: u8 = 5;
pub const REC_BINARY_OBJECT_STRING: u8 = 6;
pub const REC_BINARY_ARRAY: u8 = 7;
pub const REC_MEMBER_PRIMITIVE_TYPED: u8 = 8;
pub const REC_MEMBER_REFERENCE: u8 = 9;
pub const REC_OBJECT_NULL: u8 = 10;
pub const REC_MESSAGE_END: u8 = 11;
pub const REC_BINARY_LIBRARY: u8 = 12;
pub const REC_OBJECT_NULL_MULTIPLE_256: u8 = 13;
pub const REC_OBJECT_NULL_MULTIPLE: u8 = 14;
pub const REC_ARRAY_SINGLE_PRIMITIVE: u8 = 15;
pub const REC_ARRAY_SINGLE_OBJECT: u8 = 16;
pub const REC_ARRAY_SINGLE_STRING: u8 = 17;
pub const REC_METHOD_CALL: u8 = 21;
pub const REC_METHOD_RETURN: u8 = 22;

pub const BT_PRIMITIVE: u8 = 0;
pub const BT_STRING: u8 = 1;
pub const BT_OBJECT: u8 = 2;
pub const BT_SYSTEM_CLASS: u8 = 3;
pub const BT_CLASS: u8 = 4;
pub const BT_OBJECT_ARRAY: u8 = 5;
pub const BT_STRING_ARRAY: u8 = 6;
pub const BT_PRIMITIVE_ARRAY: u8 = 7;

pub const PT_BOOLEAN: u8 = 1;
pub const PT_BYTE: u8 = 2;
pub const PT_CHAR: u8 = 3;
pub const PT_DECIMAL: u8 = 5;
pub const PT_DOUBLE: u8 = 6;
pub const PT_INT16: u8 = 7;
pub const PT_INT32: u8 = 8;
pub const PT_INT64: u8 = 9;
pub const PT_SBYTE: u8 = 10;
pub const PT_SINGLE: u8 = 11;
pub const PT_TIME_SPAN: u8 = 12;
pub const PT_DATE_TIME: u8 = 13;
pub const PT_UINT16: u8 = 14;
pub const PT_UINT32: u8 = 15;
pub const PT_UINT64: u8 = 16;
pub const PT_NULL: u8 = 17;
pub const PT_STRING: u8 = 18;

pub const ARRAY_SINGLE: u8 = 0;
pub const ARRAY_JAGGED: u8 = 1;
pub const ARRAY_RECTANGULAR: u8 = 2;
pub const ARRAY_SINGLE_OFFSET: u8 = 3;
pub const ARRAY_JAGGED_OFFSET: u8 = 4;
pub const ARRAY_RECTANGULAR_OFFSET: u8 = 5;

pub const STRING_WITH_CODE: u8 = 18;

pub const MAX_INDENT: usize = 20;
pub const MAX_ARRAY_PRINT_SIZE: usize = 20;

pub const DATE_TIME_KIND_MASK: u64 = 0x3FFF_FFFF_FFFF_FFFF;
pub const TICKS_AT_UNIX_EPOCH: u64 = 0x089F_7FF5_F7B5_8000;
pub const TICKS_PER_MILLISECOND: u64 = 10_000;
