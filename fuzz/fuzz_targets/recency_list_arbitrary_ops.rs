#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::{RecencyList, SlotId};

// Fuzz arbitrary operation sequences on RecencyList
//
// Handles of removed nodes are kept around on purpose so stale-id rejection
// is exercised alongside push_front, pop_back, pop_front, move_to_front,
// remove and clear.
fuzz_target!(|data: &[u8]| {
    let mut list: RecencyList<u32> = RecencyList::new();
    let mut ids: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let (op, arg) = (pair[0] % 7, pair[1]);
        match op {
            0 | 1 => {
                let value = u32::from(arg);
                let id = list.push_front(value);
                ids.push(id);
                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.front_id(), Some(id));
            },
            2 => {
                let len = list.len();
                match list.pop_back() {
                    Some(_) => assert_eq!(list.len(), len - 1),
                    None => assert_eq!(len, 0),
                }
            },
            3 => {
                let len = list.len();
                if list.pop_front().is_some() {
                    assert_eq!(list.len(), len - 1);
                }
            },
            4 => {
                if let Some(&id) = ids.get(usize::from(arg) % ids.len().max(1)) {
                    let live = list.contains(id);
                    assert_eq!(list.move_to_front(id), live);
                    if live {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            },
            5 => {
                if let Some(&id) = ids.get(usize::from(arg) % ids.len().max(1)) {
                    let live = list.contains(id);
                    assert_eq!(list.remove(id).is_some(), live);
                    assert!(!list.contains(id));
                }
            },
            _ => {
                if arg == 0 {
                    list.clear();
                    assert!(list.is_empty());
                }
            },
        }

        assert_eq!(list.iter().count(), list.len());
        if let Err(err) = list.validate() {
            panic!("invariant violated: {}", err);
        }
    }
});
