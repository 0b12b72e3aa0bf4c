//! IR construction: top-level items, functions, and cursors
//!
//! The front end drives a [`Builder`] in program order: declare globals,
//! open a function, bind parameters, append statements, close the function,
//! repeat. Both the item list and each function's statement stream carry a
//! bounds-checked cursor so previously built positions can be revisited for
//! patching without pointer arithmetic on growable storage.

use std::fmt::Write as _;

use crate::error::Result;
use crate::types::{TypeId, TypeInterner};

use super::instruction::{BinOp, Instruction, Label, RelOp, UnOp};
use super::names::NameTable;
use super::value::{Reg, Value};

/// A top-level unit: a global declaration or a function
#[derive(Debug)]
pub enum Item {
    /// Global declaration: a name with a type
    Declaration {
        /// Declared name
        name: String,
        /// Declared type
        ty: TypeId,
    },
    /// A function with its statement stream and name table
    Function(FunctionBuilder),
}

/// Builder for one function's statement stream.
///
/// Owns the statements, the parameter-type list, the name table, and the two
/// register counters. Obtained from [`Builder::function_mut`] while the
/// function is open (or re-opened via the item cursor).
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    params: Vec<TypeId>,
    stmts: Vec<Instruction>,
    names: NameTable,
    /// Next local id, post-incremented (0, 1, ...)
    next_local: i32,
    /// Next parameter id, pre-decremented (-1, -2, ...)
    next_param: i32,
    cursor: usize,
}

impl FunctionBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
            stmts: Vec::new(),
            names: NameTable::new(),
            next_local: 0,
            next_param: 0,
            cursor: 0,
        }
    }

    /// The function's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter types in declaration order
    pub fn params(&self) -> &[TypeId] {
        &self.params
    }

    /// The statement stream
    pub fn statements(&self) -> &[Instruction] {
        &self.stmts
    }

    /// The name table
    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Number of declared parameters
    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    /// Number of local registers minted so far
    pub fn local_count(&self) -> usize {
        self.next_local as usize
    }

    /// Current statement cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Declare the next parameter: binds `name` to a fresh parameter
    /// register (-1, -2, ... in declaration order) and records its type.
    ///
    /// A rejected duplicate name leaves the counter untouched, so parameter
    /// ids stay contiguous across a recovered error.
    pub fn add_param(&mut self, name: &str, ty: TypeId) -> Result<Reg> {
        let id = self.next_param - 1;
        self.names.bind_int(name, id)?;
        self.next_param = id;
        self.params.push(ty);
        Ok(Reg(id))
    }

    /// Append `target = left op right`; returns the fresh target register
    pub fn build_binary(&mut self, op: BinOp, left: Value, right: Value) -> Value {
        let target = self.fresh_local();
        self.write(Instruction::Binary {
            op,
            target,
            left,
            right,
        });
        Value::Reg(target)
    }

    /// Append `target = op operand`; returns the fresh target register
    pub fn build_unary(&mut self, op: UnOp, operand: Value) -> Value {
        let target = self.fresh_local();
        self.write(Instruction::Unary {
            op,
            target,
            operand,
        });
        Value::Reg(target)
    }

    /// Append the store `target[offset] = value`; no result register
    pub fn build_index_assign(&mut self, target: Reg, offset: Value, value: Value) {
        self.write(Instruction::IndexAssign {
            target,
            offset,
            value,
        });
    }

    /// Append the load `target = value[offset]`; returns the fresh target
    pub fn build_assign_index(&mut self, value: Value, offset: Value) -> Value {
        let target = self.fresh_local();
        self.write(Instruction::AssignIndex {
            target,
            value,
            offset,
        });
        Value::Reg(target)
    }

    /// Append a call-argument push; no result
    pub fn build_param(&mut self, value: Value) {
        self.write(Instruction::Param { value });
    }

    /// Append a call consuming `arg_count` previously-pushed arguments;
    /// returns the fresh target register. The builder does not verify the
    /// argument count against preceding `param` statements.
    pub fn build_call(&mut self, callee: Value, arg_count: u64) -> Value {
        let target = self.fresh_local();
        self.write(Instruction::Call {
            target,
            callee,
            arg_count,
        });
        Value::Reg(target)
    }

    /// Append a return statement. Further appends are not prevented; the
    /// front end is responsible for not emitting unintended unreachable code.
    pub fn build_return(&mut self, value: Option<Value>) {
        self.write(Instruction::Return { value });
    }

    /// Append a conditional branch comparing `left rel right`
    pub fn build_if_branch(&mut self, rel: RelOp, left: Value, right: Value, label: Label) {
        self.write(Instruction::BranchIf {
            rel,
            left,
            right,
            label,
        });
    }

    /// Append an unconditional branch; the operand holds the target in the
    /// value place.
    pub fn build_branch(&mut self, target: Value) {
        self.write(Instruction::Branch { target });
    }

    /// Open a placeholder slot at `index`, shifting statements at and after
    /// it one position, and park the cursor on it. The next build fills the
    /// slot; until then it reads as [`Instruction::Nop`].
    ///
    /// # Panics
    ///
    /// Panics when `index` is past the end of the stream.
    pub fn insert_at(&mut self, index: usize) {
        assert!(
            index <= self.stmts.len(),
            "statement insert at {} past end of stream (len {})",
            index,
            self.stmts.len()
        );
        if index < self.stmts.len() {
            self.stmts.insert(index, Instruction::Nop);
        }
        self.cursor = index;
    }

    /// Reposition the statement cursor without mutating the stream.
    /// Subsequent builds overwrite in place from here, which is how forward
    /// branches are back-patched once their label's position is known.
    ///
    /// # Panics
    ///
    /// Panics when `index` is past the end of the stream.
    pub fn goto_index(&mut self, index: usize) {
        assert!(
            index <= self.stmts.len(),
            "statement seek to {} past end of stream (len {})",
            index,
            self.stmts.len()
        );
        self.cursor = index;
    }

    /// Move the statement cursor past the last statement
    pub fn goto_end(&mut self) {
        self.cursor = self.stmts.len();
    }

    /// Bind `name` to an integer in the name table
    pub fn bind_int(&mut self, name: &str, value: i32) -> Result<()> {
        self.names.bind_int(name, value)
    }

    /// Bind `name` to a label identity in the name table
    pub fn bind_label(&mut self, name: &str, label: Label) -> Result<()> {
        self.names.bind_label(name, label)
    }

    /// Look up the integer bound to `name`; `None` when unbound
    pub fn lookup_int(&self, name: &str) -> Option<i32> {
        self.names.lookup_int(name)
    }

    /// Look up the label bound to `name`; `None` when unbound
    pub fn lookup_label(&self, name: &str) -> Option<Label> {
        self.names.lookup_label(name)
    }

    fn fresh_local(&mut self) -> Reg {
        let reg = Reg(self.next_local);
        self.next_local += 1;
        reg
    }

    /// Write at the cursor: overwrite mid-stream, append at the end.
    fn write(&mut self, instr: Instruction) {
        if self.cursor < self.stmts.len() {
            self.stmts[self.cursor] = instr;
        } else {
            self.stmts.push(instr);
        }
        self.cursor += 1;
    }
}

/// Builder for a whole program: an ordered collection of items, the
/// embedded type interner, and an item cursor.
#[derive(Debug, Default)]
pub struct Builder {
    items: Vec<Item>,
    types: TypeInterner,
    cursor: usize,
}

impl Builder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with pre-allocated item and type capacity
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            types: TypeInterner::with_capacity(cap),
            cursor: 0,
        }
    }

    /// The interned type store
    pub fn types(&self) -> &TypeInterner {
        &self.types
    }

    /// The interned type store, mutably (for interning)
    pub fn types_mut(&mut self) -> &mut TypeInterner {
        &mut self.types
    }

    /// All items built so far, in program order
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no items have been built
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current item cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Insert a global declaration at the cursor and advance past it
    pub fn declare_global(&mut self, name: &str, ty: TypeId) {
        let item = Item::Declaration {
            name: name.to_string(),
            ty,
        };
        self.items.insert(self.cursor, item);
        self.cursor += 1;
    }

    /// Insert a function item at the cursor and park the cursor on it.
    /// The function stays "open" (statement, parameter, and name-table
    /// operations apply to it) until [`end_function`](Self::end_function).
    pub fn begin_function(&mut self, name: &str) {
        self.items
            .insert(self.cursor, Item::Function(FunctionBuilder::new(name)));
    }

    /// Close the open function and advance the cursor past it.
    ///
    /// # Panics
    ///
    /// Panics when the cursor does not address a function item.
    pub fn end_function(&mut self) {
        assert!(
            matches!(self.items.get(self.cursor), Some(Item::Function(_))),
            "end_function: cursor {} does not address a function item",
            self.cursor
        );
        self.cursor += 1;
    }

    /// The function currently under the cursor.
    ///
    /// # Panics
    ///
    /// Panics when the cursor does not address a function item.
    pub fn function(&self) -> &FunctionBuilder {
        match self.items.get(self.cursor) {
            Some(Item::Function(f)) => f,
            _ => panic!(
                "function: cursor {} does not address a function item",
                self.cursor
            ),
        }
    }

    /// The function currently under the cursor, mutably.
    ///
    /// # Panics
    ///
    /// Panics when the cursor does not address a function item.
    pub fn function_mut(&mut self) -> &mut FunctionBuilder {
        match self.items.get_mut(self.cursor) {
            Some(Item::Function(f)) => f,
            _ => panic!(
                "function_mut: cursor {} does not address a function item",
                self.cursor
            ),
        }
    }

    /// Reposition the item cursor without mutating storage; used to re-open
    /// a previously built function for patching.
    ///
    /// # Panics
    ///
    /// Panics when `index` is past the end of the item list.
    pub fn goto_index(&mut self, index: usize) {
        assert!(
            index <= self.items.len(),
            "item seek to {} past end of list (len {})",
            index,
            self.items.len()
        );
        self.cursor = index;
    }

    /// Move the item cursor past the last item
    pub fn goto_end(&mut self) {
        self.cursor = self.items.len();
    }

    /// Position the cursor for a mid-stream insertion; the next
    /// `declare_global`/`begin_function` inserts at `index`, shifting items
    /// at and after it one slot.
    ///
    /// # Panics
    ///
    /// Panics when `index` is past the end of the item list.
    pub fn insert_at(&mut self, index: usize) {
        self.goto_index(index);
    }

    /// Render the whole program as a readable TAC listing
    pub fn dump_ir(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                Item::Declaration { name, ty } => {
                    let _ = writeln!(out, "decl {}: {}", name, self.types.render(*ty));
                }
                Item::Function(func) => {
                    let params: Vec<String> = func
                        .params()
                        .iter()
                        .enumerate()
                        .map(|(i, ty)| format!("%-{}: {}", i + 1, self.types.render(*ty)))
                        .collect();
                    let _ = writeln!(out, "fn {}({}) {{", func.name(), params.join(", "));
                    for (i, instr) in func.statements().iter().enumerate() {
                        let _ = writeln!(out, "{:04}:    {}", i, instr);
                    }
                    let _ = writeln!(out, "}}");
                }
            }
        }
        out
    }
}
