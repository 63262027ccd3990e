use std::rc::Rc;

use crate::primitive::{DateTimeValue, PrimitiveArray, PrimitiveValue};
use crate::record::{ArrayContents, Record, RecordKind};
use crate::stream::Stream;

#[derive(Debug, Clone)]
pub enum ArrayElement {
    Null,
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Str(String),
    Object(Rc<Record>),
    Unresolved(i32),
}

#[derive(Debug, Clone)]
pub enum Value {
    Scalar(PrimitiveValue),
    PrimitiveArray(PrimitiveArray),
    Elements(Vec<ArrayElement>),
    Object(Rc<Record>),
}

impl Value {
    pub(crate) fn from_primitive(value: PrimitiveValue) -> Self {
        Value::Scalar(value)
    }

    pub(crate) fn from_record(stream: &Stream, record: Rc<Record>) -> Self {
        match &record.kind {
            RecordKind::ArraySinglePrimitive { values, .. } => Value::PrimitiveArray(values.clone()),
            RecordKind::BinaryArray { contents: ArrayContents::Primitive(values), .. } => {
                Value::PrimitiveArray(values.clone())
            }
            RecordKind::BinaryArray { contents: ArrayContents::Slots(slots), .. } => {
                Value::Elements(resolve_elements(stream, slots))
            }
            RecordKind::ArraySingleObject { elements } | RecordKind::ArraySingleString { elements } => {
                Value::Elements(resolve_elements(stream, elements))
            }
            _ => Value::Object(record),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Scalar(PrimitiveValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Scalar(PrimitiveValue::SByte(v)) => Some(*v as i64),
            Value::Scalar(PrimitiveValue::Int16(v)) => Some(*v as i64),
            Value::Scalar(PrimitiveValue::Int32(v)) => Some(*v as i64),
            Value::Scalar(PrimitiveValue::Int64(v)) => Some(*v),
            Value::Scalar(PrimitiveValue::Byte(v)) => Some(*v as i64),
            Value::Scalar(PrimitiveValue::UInt16(v)) => Some(*v as i64),
            Value::Scalar(PrimitiveValue::UInt32(v)) => Some(*v as i64),
            Value::Scalar(PrimitiveValue::TimeSpan(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Scalar(PrimitiveValue::Byte(v)) => Some(*v as u64),
            Value::Scalar(PrimitiveValue::UInt16(v)) => Some(*v as u64),
            Value::Scalar(PrimitiveValue::UInt32(v)) => Some(*v as u64),
            Value::Scalar(PrimitiveValue::UInt64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Scalar(PrimitiveValue::Double(v)) => Some(*v),
            Value::Scalar(PrimitiveValue::Decimal(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Scalar(PrimitiveValue::Single(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(PrimitiveValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date_time(&self) -> Option<DateTimeValue> {
        match self {
            Value::Scalar(PrimitiveValue::DateTime(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool_array(&self) -> Option<Vec<bool>> {
        match self {
            Value::PrimitiveArray(PrimitiveArray::Boolean(v)) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_i32_array(&self) -> Option<Vec<i32>> {
        match self {
            Value::PrimitiveArray(PrimitiveArray::Int32(v)) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_f64_array(&self) -> Option<Vec<f64>> {
        match self {
            Value::PrimitiveArray(PrimitiveArray::Double(v)) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_string_array(&self) -> Option<Vec<Option<String>>> {
        match self {
            Value::PrimitiveArray(PrimitiveArray::String(v)) => Some(v.iter().cloned().map(Some).collect()),
            Value::Elements(els) => Some(
                els.iter()
                    .map(|e| match e {
                        ArrayElement::Str(s) => Some(s.clone()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn as_object_array(&self) -> Option<Vec<Option<Rc<Record>>>> {
        match self {
            Value::Elements(els) => Some(
                els.iter()
                    .map(|e| match e {
                        ArrayElement::Object(r) => Some(r.clone()),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }
}

pub(crate) fn resolve_elements(stream: &Stream, slots: &[crate::binary_type::BinaryTypeSlot]) -> Vec<ArrayElement> {
    use crate::binary_type::SlotValue;
    slots
        .iter()
        .map(|slot| match &slot.value {
            SlotValue::Null => ArrayElement::Null,
            SlotValue::Inline(PrimitiveValue::Boolean(b)) => ArrayElement::Bool(*b),
            SlotValue::Inline(PrimitiveValue::Int32(v)) => ArrayElement::Int32(*v),
            SlotValue::Inline(PrimitiveValue::Int64(v)) => ArrayElement::Int64(*v),
            SlotValue::Inline(PrimitiveValue::Double(v)) => ArrayElement::Double(*v),
            SlotValue::Inline(_) => ArrayElement::Null,
            SlotValue::StringRef(id) | SlotValue::ObjectRef(id) => {
                match slot.ref_record().or_else(|| stream.find(*id).cloned()) {
                    Some(target) => match &target.kind {
                        RecordKind::BinaryObjectString { value } => ArrayElement::Str(value.clone()),
                        _ => ArrayElement::Object(target),
                    },
                    None => ArrayElement::Unresolved(*id),
                }
            }
        })
        .collect()
}
