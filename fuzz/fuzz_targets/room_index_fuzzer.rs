//! Fuzz target for RoomGroupIndex against the reference model
//!
//! # Strategy
//!
//! - Upserts with arbitrary names, group masks and tag weights
//! - Removals of present and absent rooms
//! - Policy switches between mutations
//! - Lookups with and without a starting group
//!
//! # Invariants
//!
//! - Every operation returns the same result on model and index
//! - Outlines (groups and rows in display order) are identical
//! - All standard structural invariants hold after every operation

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomdock_core::RoomGroupIndex;
use roomdock_harness::{IndexSnapshot, InvariantRegistry, ModelIndex, Operation};

fuzz_target!(|ops: Vec<Operation>| {
    let registry = InvariantRegistry::standard();
    let mut model = ModelIndex::new();
    let mut index = RoomGroupIndex::default();

    for op in ops.iter().take(256) {
        let expected = model.apply(op);
        let actual = op.apply(&mut index);
        assert_eq!(expected, actual, "result divergence on {op:?}");

        let outline: Vec<_> =
            index.groups().map(|(key, rooms)| (key.clone(), rooms.to_vec())).collect();
        assert_eq!(model.outline(), outline, "outline divergence on {op:?}");

        registry.assert_all(&IndexSnapshot::from_index(&index), "in fuzz run");
    }
});
