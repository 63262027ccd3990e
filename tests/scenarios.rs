use assert_matches::assert_matches;
use nrbf_sdk::{Deserializer, Error, RecordKind};

fn header(root_id: i32) -> Vec<u8> {
    let mut bytes = vec![0x00u8];
    bytes.extend(root_id.to_le_bytes());
    bytes.extend(1i32.to_le_bytes());
    bytes.extend(0i32.to_le_bytes());
    bytes.extend(0i32.to_le_bytes());
    bytes
}

#[test]
fn empty_header_only() {
    let mut bytes = header(0);
    bytes.push(0x0B);
    let des = Deserializer::open(&bytes[..]).unwrap();
    assert_eq!(des.streams().len(), 1);
    assert_eq!(des.streams()[0].records().len(), 1);
    assert_matches!(&des.streams()[0].records()[0].kind, RecordKind::StreamHeader { .. });
}

#[test]
fn single_integer_member() {
    let mut bytes = header(1);
    bytes.push(0x05); // ClassWithMembersAndTypes
    bytes.extend(1i32.to_le_bytes()); // object id
    bytes.push(4);
    bytes.extend(b"Main"); // class name
    bytes.extend(1i32.to_le_bytes()); // member count
    bytes.push(4);
    bytes.extend(b"Main"); // member name
    bytes.push(0); // BT_PRIMITIVE
    bytes.push(8); // PT_INT32
    bytes.extend(0i32.to_le_bytes()); // library id
    bytes.extend(0x2A2A_2A2Au32.to_le_bytes()); // value
    bytes.push(0x0B);

    let des = Deserializer::open(&bytes[..]).unwrap();
    assert!(des.dump().contains("Main (int32) 707406378"));

    let value = des.resolve("0/Main/Main").unwrap();
    assert_eq!(value.as_i64(), Some(707_406_378));
}

#[test]
fn null_run_inside_a_rank_one_array() {
    let mut bytes = header(1);
    bytes.push(0x07); // BinaryArray
    bytes.extend(2i32.to_le_bytes()); // object id
    bytes.push(0); // ARRAY_SINGLE
    bytes.extend(1i32.to_le_bytes()); // rank
    bytes.extend(5i32.to_le_bytes()); // length
    bytes.push(2); // BT_OBJECT element kind, no extra header
    bytes.extend([0x0A, 0x0D, 0x03, 0x0A]); // null, 256-run(3), null -> 5 slots
    bytes.push(0x0B);

    let des = Deserializer::open(&bytes[..]).unwrap();
    let stream = &des.streams()[0];
    let contents = stream
        .records()
        .iter()
        .find_map(|r| match &r.kind {
            RecordKind::BinaryArray { contents, .. } => Some(contents),
            _ => None,
        })
        .unwrap();
    match contents {
        nrbf_sdk::ArrayContents::Slots(slots) => {
            assert_eq!(slots.len(), 5);
            assert!(slots.iter().all(|s| matches!(s.value, nrbf_sdk::SlotValue::Null)));
        }
        _ => panic!("expected slot-backed array contents"),
    }
}

#[test]
fn forward_reference() {
    let mut bytes = header(1);
    bytes.push(0x05);
    bytes.extend(10i32.to_le_bytes());
    bytes.push(1);
    bytes.extend(b"A");
    bytes.extend(1i32.to_le_bytes());
    bytes.push(1);
    bytes.extend(b"A");
    bytes.push(2); // BT_OBJECT
    bytes.extend(0i32.to_le_bytes());
    bytes.push(9); // MemberReference
    bytes.extend(20i32.to_le_bytes());

    bytes.push(0x06); // BinaryObjectString
    bytes.extend(20i32.to_le_bytes());
    bytes.push(1);
    bytes.extend(b"b");
    bytes.push(0x0B);

    let des = Deserializer::open(&bytes[..]).unwrap();
    let stream = &des.streams()[0];
    let a = stream.find(10).unwrap();
    let target = a.members[0].ref_record().unwrap();
    assert_eq!(target.object_id, 20);
    assert!(stream.find(20).unwrap().is_referenced.get());
}

#[test]
fn display_name_derivation() {
    let mut bytes = header(1);
    bytes.push(0x05);
    bytes.extend(1i32.to_le_bytes());
    let name = b"System.Collections.Generic.List`1[[System.Int32, mscorlib]]";
    bytes.push(name.len() as u8);
    bytes.extend(name);
    bytes.extend(0i32.to_le_bytes()); // no members
    bytes.extend(0i32.to_le_bytes()); // library id
    bytes.push(0x0B);

    let des = Deserializer::open(&bytes[..]).unwrap();
    let record = &des.streams()[0].records()[1];
    let class_info = record.class_info.as_ref().unwrap();
    assert_eq!(class_info.display_name, "System.Collections.Generic.List");
}

#[test]
fn date_time_epoch_decoding() {
    const TICKS_AT_UNIX_EPOCH: u64 = 0x089F_7FF5_F7B5_8000;
    let raw = TICKS_AT_UNIX_EPOCH | (1u64 << 62); // UTC, epoch instant

    let mut bytes = header(1);
    bytes.push(0x08); // MemberPrimitiveTyped
    bytes.push(13); // PT_DATE_TIME
    bytes.extend(raw.to_le_bytes());
    bytes.push(0x0B);

    let des = Deserializer::open(&bytes[..]).unwrap();
    match &des.streams()[0].records()[1].kind {
        RecordKind::MemberPrimitiveTyped { value: nrbf_sdk::PrimitiveValue::DateTime(dt) } => {
            assert_eq!(dt.millis_since_unix_epoch, 0);
        }
        other => panic!("unexpected record kind: {other:?}"),
    }
}

#[test]
fn untyped_class_members_are_unsupported() {
    let mut bytes = header(1);
    bytes.push(0x03);
    bytes.extend(1i32.to_le_bytes());
    bytes.push(1);
    bytes.extend(b"A");
    bytes.extend(0i32.to_le_bytes()); // member count
    bytes.extend(0i32.to_le_bytes()); // library id
    bytes.push(0x0B);

    match Deserializer::open(&bytes[..]) {
        Err(Error::RecordReadFailed { source, .. }) => assert_matches!(*source, Error::Unsupported(_)),
        other => panic!("expected a wrapped Unsupported error, got {other:?}"),
    }
}
