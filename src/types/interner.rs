//! Type descriptors and the structural interner

use std::fmt;

/// Stable handle to an interned type.
///
/// Handles are indices into the interner's arena and remain valid for the
/// interner's whole lifetime. `TypeId` equality is type equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

impl TypeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Non-parametric type kinds, interned by tag alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasicType {
    /// The unit type (no value)
    Unit,
    /// The never type (diverging computations)
    Never,
    /// Boolean
    Bool,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl fmt::Display for BasicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BasicType::Unit => "unit",
            BasicType::Never => "never",
            BasicType::Bool => "bool",
            BasicType::I8 => "i8",
            BasicType::I16 => "i16",
            BasicType::I32 => "i32",
            BasicType::I64 => "i64",
            BasicType::U8 => "u8",
            BasicType::U16 => "u16",
            BasicType::U32 => "u32",
            BasicType::U64 => "u64",
            BasicType::F32 => "f32",
            BasicType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Which kind of named aggregate a forward declaration introduces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    /// Product type with named identity
    Struct,
    /// Overlapping-storage type with named identity
    Union,
}

/// A type descriptor.
///
/// Component types are referenced by [`TypeId`], never inline, so comparing
/// two candidate shapes is component-wise id equality rather than recursive
/// structural comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Non-parametric scalar kind
    Basic(BasicType),
    /// Pointer to a pointee type
    Pointer(TypeId),
    /// Function type: ordered parameters and a result
    Function {
        /// Parameter types in declaration order
        params: Vec<TypeId>,
        /// Result type
        result: TypeId,
    },
    /// Anonymous product type
    Tuple(Vec<TypeId>),
    /// Named struct; `fields` is empty while forward-declared
    Struct {
        /// Nominal identity
        name: String,
        /// Field types in declaration order
        fields: Vec<TypeId>,
    },
    /// Named union; `fields` is empty while forward-declared
    Union {
        /// Nominal identity
        name: String,
        /// Field types in declaration order
        fields: Vec<TypeId>,
    },
    /// Fixed-length array
    Array {
        /// Element type
        elem: TypeId,
        /// Number of elements
        len: u64,
    },
}

/// Canonical store of type descriptors.
///
/// Structurally-identical interning requests yield the same [`TypeId`].
/// Storage is append-only: types are never individually freed, and a handle
/// stays valid for the interner's lifetime.
#[derive(Debug, Default)]
pub struct TypeInterner {
    types: Vec<Type>,
}

impl TypeInterner {
    /// Create an empty interner
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    /// Create an empty interner with pre-allocated arena capacity
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            types: Vec::with_capacity(cap),
        }
    }

    /// Intern a non-parametric kind
    pub fn intern_basic(&mut self, kind: BasicType) -> TypeId {
        for (i, ty) in self.types.iter().enumerate() {
            if matches!(ty, Type::Basic(k) if *k == kind) {
                return TypeId(i as u32);
            }
        }
        self.push(Type::Basic(kind))
    }

    /// Intern a pointer to `pointee`
    pub fn intern_pointer(&mut self, pointee: TypeId) -> TypeId {
        self.check(pointee);
        for (i, ty) in self.types.iter().enumerate() {
            if matches!(ty, Type::Pointer(p) if *p == pointee) {
                return TypeId(i as u32);
            }
        }
        self.push(Type::Pointer(pointee))
    }

    /// Intern a function type with the given parameter and result types
    pub fn intern_function(&mut self, params: Vec<TypeId>, result: TypeId) -> TypeId {
        for &p in &params {
            self.check(p);
        }
        self.check(result);
        for (i, ty) in self.types.iter().enumerate() {
            if let Type::Function {
                params: ps,
                result: r,
            } = ty
            {
                if *r == result && ps == &params {
                    return TypeId(i as u32);
                }
            }
        }
        self.push(Type::Function { params, result })
    }

    /// Intern a tuple type with the given element types
    pub fn intern_tuple(&mut self, elems: Vec<TypeId>) -> TypeId {
        for &e in &elems {
            self.check(e);
        }
        for (i, ty) in self.types.iter().enumerate() {
            if matches!(ty, Type::Tuple(es) if es == &elems) {
                return TypeId(i as u32);
            }
        }
        self.push(Type::Tuple(elems))
    }

    /// Intern a fixed-length array type
    pub fn intern_array(&mut self, elem: TypeId, len: u64) -> TypeId {
        self.check(elem);
        for (i, ty) in self.types.iter().enumerate() {
            if matches!(ty, Type::Array { elem: e, len: l } if *e == elem && *l == len) {
                return TypeId(i as u32);
            }
        }
        self.push(Type::Array { elem, len })
    }

    /// Intern a named aggregate as a forward declaration.
    ///
    /// Returns the existing instance when one with the same kind and name was
    /// interned before; otherwise creates one with an empty field list, to be
    /// filled later via [`complete_named`](Self::complete_named). Matching is
    /// direct string equality on the name.
    pub fn intern_named(&mut self, kind: AggregateKind, name: &str) -> TypeId {
        for (i, ty) in self.types.iter().enumerate() {
            let found = match (kind, ty) {
                (AggregateKind::Struct, Type::Struct { name: n, .. }) => n == name,
                (AggregateKind::Union, Type::Union { name: n, .. }) => n == name,
                _ => false,
            };
            if found {
                return TypeId(i as u32);
            }
        }
        let ty = match kind {
            AggregateKind::Struct => Type::Struct {
                name: name.to_string(),
                fields: Vec::new(),
            },
            AggregateKind::Union => Type::Union {
                name: name.to_string(),
                fields: Vec::new(),
            },
        };
        self.push(ty)
    }

    /// Fill a forward-declared aggregate's field list in place.
    ///
    /// Calling this on an already-completed aggregate replaces the fields
    /// (last writer wins). The completion mutates the single canonical
    /// instance, so every holder of the handle observes it.
    ///
    /// # Panics
    ///
    /// Panics when `id` does not address a struct or union.
    pub fn complete_named(&mut self, id: TypeId, fields: Vec<TypeId>) {
        for &f in &fields {
            self.check(f);
        }
        self.check(id);
        match &mut self.types[id.index()] {
            Type::Struct { fields: fs, .. } | Type::Union { fields: fs, .. } => *fs = fields,
            other => panic!("complete_named on non-aggregate type {:?}", other),
        }
    }

    /// Read a type descriptor
    pub fn get(&self, id: TypeId) -> &Type {
        self.check(id);
        &self.types[id.index()]
    }

    /// Number of interned types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True when nothing has been interned yet
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Render a type as readable text, resolving component handles
    pub fn render(&self, id: TypeId) -> String {
        match self.get(id) {
            Type::Basic(k) => k.to_string(),
            Type::Pointer(p) => format!("*{}", self.render(*p)),
            Type::Function { params, result } => {
                let ps: Vec<String> = params.iter().map(|p| self.render(*p)).collect();
                format!("fn({}) -> {}", ps.join(", "), self.render(*result))
            }
            Type::Tuple(elems) => {
                let es: Vec<String> = elems.iter().map(|e| self.render(*e)).collect();
                format!("({})", es.join(", "))
            }
            Type::Struct { name, .. } => format!("struct {}", name),
            Type::Union { name, .. } => format!("union {}", name),
            Type::Array { elem, len } => format!("[{}; {}]", self.render(*elem), len),
        }
    }

    fn check(&self, id: TypeId) {
        assert!(
            id.index() < self.types.len(),
            "dangling TypeId {:?} (interner holds {} types)",
            id,
            self.types.len()
        );
    }

    fn push(&mut self, ty: Type) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(ty);
        id
    }
}
