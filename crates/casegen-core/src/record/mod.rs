mod compare;


pub use compare::{field_eq, field_hash};

use crate::{
    error::{ConstraintViolation, RuntimeError},
    value::Value,
};
use casegen_schema::{
    node::{HashContribution, RecordTypeDefinition},
    prelude::*,
};
use std::{fmt, sync::Arc};

///
/// RecordType
///
/// A materialized record definition. Generic definitions start open and
/// must be instantiated with type arguments before values can be built.
///

#[derive(Debug)]
pub struct RecordType {
    def: Arc<RecordTypeDefinition>,
    type_arguments: Vec<TypeDescriptor>,
    field_types: Vec<TypeDescriptor>,
}

impl RecordType {
    #[must_use]
    pub fn materialize(def: RecordTypeDefinition) -> Arc<Self> {
        tracing::debug!(record = %def.name, fields = def.arity(), "materialized record type");

        let field_types = def
            .fields
            .iter()
            .map(|f| f.backing_storage_type.clone())
            .collect();

        Arc::new(Self {
            def: Arc::new(def),
            type_arguments: Vec::new(),
            field_types,
        })
    }

    #[must_use]
    pub fn definition(&self) -> &RecordTypeDefinition {
        &self.def
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    #[must_use]
    pub fn type_arguments(&self) -> &[TypeDescriptor] {
        &self.type_arguments
    }

    /// Storage types, with type arguments applied once instantiated.
    #[must_use]
    pub fn field_types(&self) -> &[TypeDescriptor] {
        &self.field_types
    }

    /// Whether generic parameters are still unbound.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.def.is_generic() && self.type_arguments.is_empty()
    }

    /// Close an open generic record over concrete type arguments, checking
    /// each argument against its parameter's constraints.
    pub fn instantiate<R: CapabilityResolver + ?Sized>(
        &self,
        type_arguments: Vec<TypeDescriptor>,
        resolver: &R,
    ) -> Result<Arc<Self>, RuntimeError> {
        if !self.is_open() {
            return Err(RuntimeError::NotOpen {
                record: self.to_string(),
            });
        }

        let params = &self.def.generic_parameters;
        if params.len() != type_arguments.len() {
            return Err(RuntimeError::TypeArity {
                record: self.def.name.clone(),
                expected: params.len(),
                found: type_arguments.len(),
            });
        }

        for (param, argument) in params.iter().zip(&type_arguments) {
            if let Some(violation) = check_argument(param, argument, resolver) {
                return Err(RuntimeError::Constraint {
                    record: self.def.name.clone(),
                    parameter: param.name.clone(),
                    argument: argument.to_string(),
                    violation,
                });
            }
        }

        let field_types = self
            .def
            .fields
            .iter()
            .map(|f| instantiate(&f.backing_storage_type, params, &type_arguments))
            .collect::<Result<Vec<_>, _>>()?;

        let closed = Self {
            def: Arc::clone(&self.def),
            type_arguments,
            field_types,
        };
        tracing::trace!(record = %closed, "instantiated record type");

        Ok(Arc::new(closed))
    }

    /// Build a record from values in declaration order. Values are stored
    /// verbatim; null is preserved.
    pub fn construct(self: &Arc<Self>, values: Vec<Value>) -> Result<Record, RuntimeError> {
        if self.is_open() {
            return Err(RuntimeError::OpenType {
                record: self.def.name.clone(),
            });
        }
        if values.len() != self.def.arity() {
            return Err(RuntimeError::Arity {
                record: self.def.name.clone(),
                expected: self.def.arity(),
                found: values.len(),
            });
        }

        Ok(Record {
            ty: Arc::clone(self),
            values,
        })
    }

    // Same definition, shared or structurally identical, and same type
    // arguments. A name match alone is not enough.
    fn same_instantiation(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.def, &other.def) || *self.def == *other.def)
            && self.type_arguments == other.type_arguments
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.def.name)?;
        if !self.type_arguments.is_empty() {
            let args = self
                .type_arguments
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            write!(f, "<{}>", args.join(", "))?;
        }

        Ok(())
    }
}

// The first constraint the argument fails, if any.
fn check_argument<R: CapabilityResolver + ?Sized>(
    param: &GenericParamSpec,
    argument: &TypeDescriptor,
    resolver: &R,
) -> Option<ConstraintViolation> {
    let constraints = &param.constraints;

    if argument.is_generic() {
        return Some(ConstraintViolation::Generic);
    }
    if constraints.reference && !is_reference_type(argument) {
        return Some(ConstraintViolation::Reference);
    }
    if constraints.value && !is_value_type(argument) {
        return Some(ConstraintViolation::Value);
    }
    if constraints.require_equatable(resolver) && !resolver.is_equatable(argument) {
        return Some(ConstraintViolation::Equatable);
    }

    None
}

const fn is_reference_type(ty: &TypeDescriptor) -> bool {
    match ty {
        TypeDescriptor::Concrete(concrete) => matches!(concrete.kind, TypeKind::Reference),
        TypeDescriptor::Array { .. } | TypeDescriptor::Collection(_) => true,
        TypeDescriptor::GenericParameter(_) => false,
    }
}

const fn is_value_type(ty: &TypeDescriptor) -> bool {
    matches!(
        ty,
        TypeDescriptor::Concrete(ConcreteType {
            kind: TypeKind::Value,
            ..
        })
    )
}

///
/// Record
///
/// An immutable instance of a materialized record type.
///

#[derive(Clone, Debug)]
pub struct Record {
    ty: Arc<RecordType>,
    values: Vec<Value>,
}

impl Record {
    #[must_use]
    pub const fn record_type(&self) -> &Arc<RecordType> {
        &self.ty
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.ty.name()
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn field(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Look a value up by field name, then by accessor name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let def = &self.ty.def;
        let index = def
            .field_index(name)
            .or_else(|| def.fields.iter().position(|f| f.accessor == name))?;

        self.values.get(index)
    }

    pub fn try_get(&self, name: &str) -> Result<&Value, RuntimeError> {
        self.get(name).ok_or_else(|| RuntimeError::UnknownField {
            record: self.ty.to_string(),
            field: name.to_string(),
        })
    }

    /// Field-by-field equality in declaration order; stops at the first
    /// mismatch. Records of different types are never equal.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        if !self.ty.same_instantiation(&other.ty) {
            return false;
        }

        self.ty
            .def
            .equality
            .iter()
            .zip(self.values.iter().zip(&other.values))
            .all(|(check, (a, b))| field_eq(&check.comparison, a, b))
    }

    /// Combined hash, consistent with `equals`.
    #[must_use]
    pub fn hash_code(&self) -> u64 {
        let def = &self.ty.def;
        let contributions = def
            .hash
            .steps
            .iter()
            .zip(&def.equality)
            .zip(&self.values)
            .map(|((step, check), value)| match step.contribution {
                HashContribution::Referenced if value.is_null() => 0,
                HashContribution::Referenced | HashContribution::Intrinsic => {
                    field_hash(&check.comparison, value)
                }
            });

        def.hash.combine(contributions)
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Record {}

impl std::hash::Hash for Record {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendering = &self.ty.def.rendering;
        let fields = rendering
            .fields
            .iter()
            .zip(&self.values)
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>();

        write!(f, "{}({})", rendering.type_name, fields.join(", "))
    }
}
