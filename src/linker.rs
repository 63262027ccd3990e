use crate::record::visit_slots;
use crate::stream::Stream;

pub fn link(stream: &Stream) -> Result<(), i32> {
    let mut first_failure = None;
    for record in stream.records() {
        visit_slots(record, |slot| {
            let Some(ref_id) = slot.ref_id() else { return };
            match stream.find(ref_id) {
                Some(target) => {
                    slot.set_ref_record(target);
                    target.is_referenced.set(true);
                }
                None if first_failure.is_none() => first_failure = Some(ref_id),
                None => {}
            }
        });
    }
    match first_failure {
        Some(ref_id) => Err(ref_id),
        None => Ok(()),
    }
}
