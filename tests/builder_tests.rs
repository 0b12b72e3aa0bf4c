//! Tests for the front-end-to-builder protocol

use opentac::{
    BasicType, BinOp, Builder, Instruction, Item, Label, Reg, RelOp, UnOp, Value,
};

fn i64_builder() -> (Builder, opentac::TypeId) {
    let mut b = Builder::new();
    let i64_ty = b.types_mut().intern_basic(BasicType::I64);
    (b, i64_ty)
}

// ====================
// Items and cursor
// ====================

#[test]
fn test_program_order_of_items() {
    let (mut b, i64_ty) = i64_builder();
    b.declare_global("counter", i64_ty);
    b.begin_function("main");
    b.function_mut().build_return(None);
    b.end_function();
    b.declare_global("limit", i64_ty);

    assert_eq!(b.len(), 3);
    assert!(matches!(b.items()[0], Item::Declaration { .. }));
    assert!(matches!(b.items()[1], Item::Function(_)));
    assert!(matches!(b.items()[2], Item::Declaration { .. }));
}

#[test]
fn test_insert_item_mid_stream_shifts_later_items() {
    let (mut b, i64_ty) = i64_builder();
    b.declare_global("a", i64_ty);
    b.declare_global("c", i64_ty);

    b.insert_at(1);
    b.begin_function("b");
    b.end_function();
    b.goto_end();

    let names: Vec<String> = b
        .items()
        .iter()
        .map(|item| match item {
            Item::Declaration { name, .. } => name.clone(),
            Item::Function(f) => f.name().to_string(),
        })
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
    assert_eq!(b.cursor(), 3);
}

#[test]
fn test_reopening_a_function_via_goto() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("early");
    b.function_mut().add_param("x", i64_ty).unwrap();
    b.end_function();
    b.begin_function("late");
    b.end_function();

    b.goto_index(0);
    let f = b.function_mut();
    assert_eq!(f.name(), "early");
    assert_eq!(f.lookup_int("x"), Some(-1));
}

// ====================
// Statements
// ====================

#[test]
fn test_sequential_appends_preserve_call_order() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    let x = f.add_param("x", i64_ty).unwrap();

    let doubled = f.build_binary(BinOp::Add, Value::Reg(x), Value::Reg(x));
    let negated = f.build_unary(UnOp::Neg, doubled);
    f.build_param(negated);
    let result = f.build_call(Value::Ptr(0), 1);
    f.build_return(Some(result));
    b.end_function();

    let f = match &b.items()[0] {
        Item::Function(f) => f,
        other => panic!("expected function, got {:?}", other),
    };
    let stmts = f.statements();
    assert_eq!(stmts.len(), 5);
    assert!(matches!(stmts[0], Instruction::Binary { target: Reg(0), .. }));
    assert!(matches!(stmts[1], Instruction::Unary { target: Reg(1), .. }));
    assert!(matches!(stmts[2], Instruction::Param { .. }));
    assert!(
        matches!(stmts[3], Instruction::Call { target: Reg(2), arg_count: 1, .. })
    );
    assert!(matches!(stmts[4], Instruction::Return { value: Some(_) }));
}

#[test]
fn test_memory_statements_do_not_mint_registers_for_stores() {
    let (mut b, _) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    let base = f.build_binary(BinOp::Add, Value::U64(0x1000), Value::U64(0));
    assert_eq!(f.local_count(), 1);

    f.build_index_assign(base.as_reg().unwrap(), Value::U64(8), Value::I64(7));
    assert_eq!(f.local_count(), 1); // store mints nothing

    let loaded = f.build_assign_index(base, Value::U64(8));
    assert_eq!(loaded, Value::Reg(Reg(1)));
    assert_eq!(f.local_count(), 2);
}

#[test]
fn test_branch_statements_carry_labels_and_values() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("loop");
    let f = b.function_mut();
    let n = f.add_param("n", i64_ty).unwrap();
    f.build_if_branch(RelOp::Le, Value::Reg(n), Value::I64(0), Label(3));
    f.build_branch(Value::Ptr(1));

    let stmts = f.statements();
    assert_eq!(
        stmts[0],
        Instruction::BranchIf {
            rel: RelOp::Le,
            left: Value::Reg(n),
            right: Value::I64(0),
            label: Label(3),
        }
    );
    assert_eq!(stmts[1], Instruction::Branch { target: Value::Ptr(1) });
}

#[test]
fn test_forward_branch_back_patching() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    let x = f.add_param("x", i64_ty).unwrap();

    // Emit the branch before its target exists, then patch it.
    f.build_if_branch(RelOp::Ne, Value::Reg(x), Value::I64(0), Label(u32::MAX));
    let patch_site = f.cursor() - 1;
    f.build_return(Some(Value::I64(0)));
    let target = f.cursor() as u32;
    f.build_return(Some(Value::Reg(x)));

    f.goto_index(patch_site);
    f.build_if_branch(RelOp::Ne, Value::Reg(x), Value::I64(0), Label(target));
    f.goto_end();

    assert_eq!(f.statements().len(), 3);
    assert!(matches!(
        f.statements()[0],
        Instruction::BranchIf { label: Label(2), .. }
    ));
}

#[test]
fn test_statement_insert_opens_nop_slot() {
    let (mut b, _) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    f.build_param(Value::I64(1));
    f.build_param(Value::I64(2));

    f.insert_at(1);
    assert_eq!(f.statements()[1], Instruction::Nop);
    f.build_param(Value::I64(99));

    let stmts = f.statements();
    assert_eq!(stmts[0], Instruction::Param { value: Value::I64(1) });
    assert_eq!(stmts[1], Instruction::Param { value: Value::I64(99) });
    assert_eq!(stmts[2], Instruction::Param { value: Value::I64(2) });
}

// ====================
// Name table
// ====================

#[test]
fn test_name_table_round_trip_and_absence() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    f.add_param("x", i64_ty).unwrap();
    f.bind_int("tmp", 4).unwrap();
    f.bind_label("exit", Label(9)).unwrap();

    assert_eq!(f.lookup_int("x"), Some(-1));
    assert_eq!(f.lookup_int("tmp"), Some(4));
    assert_eq!(f.lookup_label("exit"), Some(Label(9)));
    assert_eq!(f.lookup_int("unbound"), None);
    assert_eq!(f.lookup_label("unbound"), None);
}

#[test]
fn test_duplicate_parameter_name_is_an_error() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    f.add_param("x", i64_ty).unwrap();
    assert!(f.add_param("x", i64_ty).is_err());
}

#[test]
fn test_rejected_parameter_does_not_consume_an_id() {
    let (mut b, i64_ty) = i64_builder();
    b.begin_function("f");
    let f = b.function_mut();
    assert_eq!(f.add_param("x", i64_ty).unwrap(), Reg(-1));
    assert!(f.add_param("x", i64_ty).is_err());
    assert_eq!(f.param_count(), 1);

    // Recovering from the error, the next parameter takes the next id:
    // ids stay exactly {-1, ..., -p}.
    assert_eq!(f.add_param("y", i64_ty).unwrap(), Reg(-2));
    assert_eq!(f.param_count(), 2);
    assert_eq!(f.lookup_int("y"), Some(-2));
}

// ====================
// Listings
// ====================

#[test]
fn test_dump_ir_renders_a_readable_listing() {
    let (mut b, i64_ty) = i64_builder();
    b.declare_global("g", i64_ty);
    b.begin_function("sq");
    let f = b.function_mut();
    let x = f.add_param("x", i64_ty).unwrap();
    let sq = f.build_binary(BinOp::Mul, Value::Reg(x), Value::Reg(x));
    f.build_return(Some(sq));
    b.end_function();

    let listing = b.dump_ir();
    assert!(listing.contains("decl g: i64"));
    assert!(listing.contains("fn sq(%-1: i64)"));
    assert!(listing.contains("%0 = %-1 * %-1"));
    assert!(listing.contains("ret %0"));
}
