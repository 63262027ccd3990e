mod accessor;
mod binary_type;
mod byte_source;
mod class_info;
mod codecs;
mod constants;
mod deserializer;
mod dump;
mod linker;
mod path;
mod primitive;
mod record;
mod result;
mod stream;
mod strings;
mod utils;

pub use accessor::Value;
pub use binary_type::{BinaryTypeKind, BinaryTypeSlot, SlotValue};
pub use byte_source::{ByteSource, HexTraceSource, IoByteSource};
pub use class_info::ClassInfo;
pub use deserializer::Deserializer;
pub use primitive::{DateTimeKind, DateTimeValue, PrimitiveArray, PrimitiveValue};
pub use record::{ArrayContents, Record, RecordKind};
pub use result::{Error, Result};
pub use stream::Stream;
