//! Live interval computation over a function's statement stream

use std::collections::BTreeMap;

use crate::ir::{FunctionBuilder, Instruction, Reg};

/// A live interval for a virtual register: the statement-index range over
/// which its value may be needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveInterval {
    /// The virtual register
    pub reg: Reg,
    /// First statement index that defines it (parameters: 0, function entry)
    pub start: usize,
    /// Last statement index that uses it (never below `start`)
    pub end: usize,
}

/// Compute live intervals for every virtual register in `func`, sorted by
/// increasing start point with ties broken by register id ascending.
///
/// Parameters are live from function entry; locals from their first
/// defining statement. A register that is never used ends where it starts.
///
/// # Panics
///
/// Panics when a local register is used before any statement defines it;
/// a malformed input stream is a front-end bug, not a recoverable error.
pub fn live_intervals(func: &FunctionBuilder) -> Vec<LiveInterval> {
    let mut intervals: BTreeMap<Reg, (usize, usize)> = BTreeMap::new();

    // Parameters are defined at entry whether or not they are ever read.
    for i in 0..func.param_count() {
        intervals.insert(Reg(-(i as i32) - 1), (0, 0));
    }

    for (idx, instr) in func.statements().iter().enumerate() {
        for reg in instr_uses(instr) {
            match intervals.get_mut(&reg) {
                Some((_, end)) => *end = (*end).max(idx),
                None => panic!(
                    "register {} used at statement {} before any definition in `{}`",
                    reg,
                    idx,
                    func.name()
                ),
            }
        }
        if let Some(reg) = instr_def(instr) {
            intervals
                .entry(reg)
                .and_modify(|(_, end)| *end = (*end).max(idx))
                .or_insert((idx, idx));
        }
    }

    let mut out: Vec<LiveInterval> = intervals
        .into_iter()
        .map(|(reg, (start, end))| {
            assert!(
                end >= start,
                "malformed live interval for {}: [{}, {}]",
                reg,
                start,
                end
            );
            LiveInterval { reg, start, end }
        })
        .collect();
    out.sort_by_key(|iv| (iv.start, iv.reg.0));
    out
}

/// The register defined (written) by a statement, if any
fn instr_def(instr: &Instruction) -> Option<Reg> {
    match instr {
        Instruction::Binary { target, .. }
        | Instruction::Unary { target, .. }
        | Instruction::AssignIndex { target, .. }
        | Instruction::Call { target, .. } => Some(*target),
        // IndexAssign's target addresses the written memory; it is a use.
        Instruction::IndexAssign { .. }
        | Instruction::Param { .. }
        | Instruction::Return { .. }
        | Instruction::BranchIf { .. }
        | Instruction::Branch { .. }
        | Instruction::Nop => None,
    }
}

/// The registers read by a statement
fn instr_uses(instr: &Instruction) -> Vec<Reg> {
    fn push(uses: &mut Vec<Reg>, v: &crate::ir::Value) {
        if let Some(reg) = v.as_reg() {
            uses.push(reg);
        }
    }

    let mut uses = Vec::new();
    match instr {
        Instruction::Binary { left, right, .. } => {
            push(&mut uses, left);
            push(&mut uses, right);
        }
        Instruction::Unary { operand, .. } => push(&mut uses, operand),
        Instruction::IndexAssign {
            target,
            offset,
            value,
        } => {
            uses.push(*target);
            push(&mut uses, offset);
            push(&mut uses, value);
        }
        Instruction::AssignIndex { value, offset, .. } => {
            push(&mut uses, value);
            push(&mut uses, offset);
        }
        Instruction::Param { value } => push(&mut uses, value),
        Instruction::Call { callee, .. } => push(&mut uses, callee),
        Instruction::Return { value: Some(v) } => push(&mut uses, v),
        Instruction::Return { value: None } => {}
        Instruction::BranchIf { left, right, .. } => {
            push(&mut uses, left);
            push(&mut uses, right);
        }
        Instruction::Branch { target } => push(&mut uses, target),
        Instruction::Nop => {}
    }
    uses
}
