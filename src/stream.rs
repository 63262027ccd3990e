use std::collections::HashMap;
use std::rc::Rc;

use crate::byte_source::ByteSource;
use crate::constants::*;
use crate::record::{decode_record, Record};
use crate::result::{Error, Result};

pub struct Stream {
    records: Vec<Rc<Record>>,
    by_object_id: HashMap<i32, Rc<Record>>,
}

impl Stream {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            by_object_id: HashMap::new(),
        }
    }

    pub(crate) fn next_index(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn push(&mut self, record: Rc<Record>) {
        if record.object_id != 0 {
            self.by_object_id.insert(record.object_id, record.clone());
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[Rc<Record>] {
        &self.records
    }

    pub fn find(&self, object_id: i32) -> Option<&Rc<Record>> {
        self.by_object_id.get(&object_id)
    }

    pub(crate) fn decode(source: &mut dyn ByteSource) -> Result<Self> {
        let mut stream = Stream::empty();
        let header = decode_record(REC_SERIALIZED_STREAM_HEADER, source, &mut stream)
            .map_err(|e| Error::RecordReadFailed { index: 0, source: Box::new(e) })?;
        stream.push(header);

        loop {
            let tag = source.read_u8().ok_or(Error::UnexpectedEof)?;
            if tag == REC_MESSAGE_END {
                break;
            }
            let index = stream.next_index();
            let record = decode_record(tag, source, &mut stream)
                .map_err(|e| Error::RecordReadFailed { index, source: Box::new(e) })?;
            stream.push(record);
        }
        Ok(stream)
    }
}
