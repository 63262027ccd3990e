use std::io;

use log::{debug, warn};

use crate::accessor::Value;
use crate::byte_source::{ByteSource, IoByteSource};
use crate::constants::REC_SERIALIZED_STREAM_HEADER;
use crate::dump;
use crate::linker;
use crate::path;
use crate::result::{Error, Result};
use crate::stream::Stream;

pub struct Deserializer {
    streams: Vec<Stream>,
}

impl Deserializer {
    pub fn open<R: io::Read>(source: R) -> Result<Self> {
        Self::from_byte_source(&mut IoByteSource::new(source))
    }

    pub fn from_byte_source(source: &mut dyn ByteSource) -> Result<Self> {
        let mut streams = Vec::new();
        loop {
            let Some(tag) = source.read_u8() else {
                debug!("end of input after {} stream(s)", streams.len());
                break;
            };
            if tag != REC_SERIALIZED_STREAM_HEADER {
                return Err(Error::NoHeader(tag));
            }
            let stream = Stream::decode(source)?;
            debug!("decoded stream #{} with {} record(s)", streams.len(), stream.records().len());
            if let Err(ref_id) = linker::link(&stream) {
                warn!("stream #{} has an unresolved reference id {ref_id}", streams.len());
            }
            streams.push(stream);
        }
        Ok(Self { streams })
    }

    pub fn streams(&self) -> &[Stream] {
        &self.streams
    }

    pub fn dump(&self) -> String {
        dump::dump_streams(&self.streams)
    }

    pub fn resolve(&self, path: &str) -> Option<Value> {
        path::resolve(&self.streams, path)
    }
}
