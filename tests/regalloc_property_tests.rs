//! Property tests for allocator invariants over randomly built functions

use proptest::prelude::*;

use opentac::{
    live_intervals, BasicType, BinOp, Builder, Item, LinearScanAllocator, Placement, Value,
};

/// Build one function from a compact recipe: `param_count` parameters
/// followed by binary statements whose operands are chosen (by index) among
/// every previously available register, or an immediate when the selector
/// overflows.
fn build_from_recipe(param_count: usize, ops: &[(usize, usize)]) -> Builder {
    let mut b = Builder::new();
    let i64_ty = b.types_mut().intern_basic(BasicType::I64);
    b.begin_function("f");
    let f = b.function_mut();

    let mut available: Vec<Value> = Vec::new();
    for i in 0..param_count {
        let reg = f.add_param(&format!("p{}", i), i64_ty).unwrap();
        available.push(Value::Reg(reg));
    }

    for &(left_sel, right_sel) in ops {
        let pick = |sel: usize, avail: &[Value]| -> Value {
            if avail.is_empty() || sel % (avail.len() + 1) == avail.len() {
                Value::I64(sel as i64)
            } else {
                avail[sel % (avail.len() + 1)]
            }
        };
        let left = pick(left_sel, &available);
        let right = pick(right_sel, &available);
        let out = f.build_binary(BinOp::Add, left, right);
        available.push(out);
    }

    let last = available.last().copied();
    f.build_return(last);
    b.end_function();
    b
}

fn pool(k: usize) -> Vec<String> {
    (0..k).map(|i| format!("r{}", i)).collect()
}

proptest! {
    #[test]
    fn prop_allocation_is_deterministic(
        param_count in 0usize..4,
        ops in proptest::collection::vec((0usize..16, 0usize..16), 0..24),
        k in 0usize..5,
    ) {
        let b = build_from_recipe(param_count, &ops);
        let first = LinearScanAllocator::new(pool(k)).allocate(&b);
        let second = LinearScanAllocator::new(pool(k)).allocate(&b);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn prop_every_register_is_placed_exactly_once(
        param_count in 0usize..4,
        ops in proptest::collection::vec((0usize..16, 0usize..16), 0..24),
        k in 0usize..5,
    ) {
        let b = build_from_recipe(param_count, &ops);
        let table = LinearScanAllocator::new(pool(k)).allocate(&b);

        let func = match &b.items()[0] {
            Item::Function(f) => f,
            _ => unreachable!(),
        };
        let intervals = live_intervals(func);
        prop_assert_eq!(table.len(), intervals.len());

        let mut names: Vec<&str> =
            table.entries.iter().map(|e| e.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), table.len());
    }

    #[test]
    fn prop_at_most_k_allocated_live_per_statement(
        param_count in 0usize..4,
        ops in proptest::collection::vec((0usize..16, 0usize..16), 1..24),
        k in 0usize..4,
    ) {
        let b = build_from_recipe(param_count, &ops);
        let table = LinearScanAllocator::new(pool(k)).allocate(&b);

        let func = match &b.items()[0] {
            Item::Function(f) => f,
            _ => unreachable!(),
        };
        let intervals = live_intervals(func);

        for idx in 0..func.statements().len() {
            let allocated_live = intervals
                .iter()
                .filter(|iv| iv.start <= idx && idx <= iv.end)
                .filter(|iv| {
                    matches!(
                        table.get("f", &iv.reg.to_string()),
                        Some(Placement::Allocated(_))
                    )
                })
                .count();
            prop_assert!(
                allocated_live <= k,
                "{} allocated registers live at statement {} with k = {}",
                allocated_live, idx, k
            );
        }
    }

    #[test]
    fn prop_spill_offsets_never_collide(
        param_count in 0usize..4,
        ops in proptest::collection::vec((0usize..16, 0usize..16), 0..24),
        k in 0usize..3,
    ) {
        let b = build_from_recipe(param_count, &ops);
        let table = LinearScanAllocator::new(pool(k)).allocate(&b);

        let mut offsets: Vec<u64> = table
            .entries
            .iter()
            .filter_map(|e| match e.placement {
                Placement::Spilled(off) => Some(off),
                Placement::Allocated(_) => None,
            })
            .collect();
        let total = offsets.len();
        offsets.sort_unstable();
        offsets.dedup();
        prop_assert_eq!(offsets.len(), total);
    }
}
