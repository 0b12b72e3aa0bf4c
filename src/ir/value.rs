//! Operand values and virtual registers

use std::fmt;

/// Virtual register id, scoped to one function.
///
/// Parameters are assigned ids starting at -1 and decreasing in declaration
/// order; locals and temporaries start at 0 and increase. The two id spaces
/// never overlap, which lets the allocator tell incoming arguments from
/// temporaries without a side flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reg(pub i32);

impl Reg {
    /// True for parameter registers (negative ids)
    pub fn is_param(self) -> bool {
        self.0 < 0
    }

    /// True for local/temporary registers (non-negative ids)
    pub fn is_local(self) -> bool {
        self.0 >= 0
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%{}", self.0)
    }
}

/// An operand: a register reference or an immediate literal.
///
/// Values are plain data, copied freely between statements. `Ptr` is a raw
/// pointer-sized immediate used for builder-internal wiring (for example the
/// target slot of an unconditional branch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Reference to a virtual register
    Reg(Reg),
    /// Boolean immediate
    Bool(bool),
    /// 8-bit signed immediate
    I8(i8),
    /// 16-bit signed immediate
    I16(i16),
    /// 32-bit signed immediate
    I32(i32),
    /// 64-bit signed immediate
    I64(i64),
    /// 8-bit unsigned immediate
    U8(u8),
    /// 16-bit unsigned immediate
    U16(u16),
    /// 32-bit unsigned immediate
    U32(u32),
    /// 64-bit unsigned immediate
    U64(u64),
    /// 32-bit float immediate
    F32(f32),
    /// 64-bit float immediate
    F64(f64),
    /// Pointer-sized immediate for builder-internal wiring
    Ptr(u64),
}

impl Value {
    /// The referenced register, when this operand is a register
    pub fn as_reg(self) -> Option<Reg> {
        match self {
            Value::Reg(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Reg> for Value {
    fn from(reg: Reg) -> Self {
        Value::Reg(reg)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Reg(r) => write!(f, "{}", r),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I8(v) => write!(f, "{}i8", v),
            Value::I16(v) => write!(f, "{}i16", v),
            Value::I32(v) => write!(f, "{}i32", v),
            Value::I64(v) => write!(f, "{}i64", v),
            Value::U8(v) => write!(f, "{}u8", v),
            Value::U16(v) => write!(f, "{}u16", v),
            Value::U32(v) => write!(f, "{}u32", v),
            Value::U64(v) => write!(f, "{}u64", v),
            Value::F32(v) => write!(f, "{}f32", v),
            Value::F64(v) => write!(f, "{}f64", v),
            Value::Ptr(v) => write!(f, "0x{:x}", v),
        }
    }
}
