//! Capability lookups the classifier needs from its host.
//!
//! The classifier never inspects a type universe itself; it asks a
//! `CapabilityResolver` whether a type implements the equatable capability and
//! whether it is a collection. Resolvers are passed in at call time.

mod builtin;
mod table;

pub use builtin::BuiltinResolver;
pub use table::{Capabilities, CapabilityTable, CollectionCapability};

use crate::types::{ConcreteType, TypeDescriptor};
use std::sync::Arc;

///
/// CapabilityResolver
///

pub trait CapabilityResolver {
    /// Whether `ty` implements "equatable to itself".
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool;

    /// Whether `ty` is enumerable, and if so over which element type.
    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape>;
}

impl<R: CapabilityResolver + ?Sized> CapabilityResolver for &R {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        (**self).is_equatable(ty)
    }

    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape> {
        (**self).collection_of(ty)
    }
}

impl<R: CapabilityResolver + ?Sized> CapabilityResolver for Box<R> {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        (**self).is_equatable(ty)
    }

    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape> {
        (**self).collection_of(ty)
    }
}

impl<R: CapabilityResolver + ?Sized> CapabilityResolver for Arc<R> {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        (**self).is_equatable(ty)
    }

    fn collection_of(&self, ty: &ConcreteType) -> Option<CollectionShape> {
        (**self).collection_of(ty)
    }
}

///
/// CollectionShape
///
/// A typed collection reports its element; the element may be a parameter
/// of the collection's own definition (the `T` of `Vec<T>`), which the
/// classifier binds through the declared type's arguments.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CollectionShape {
    Typed(TypeDescriptor),
    Untyped,
}

///
/// DescriptorResolver
/// Trusts only the flags carried by the descriptors themselves.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DescriptorResolver;

impl CapabilityResolver for DescriptorResolver {
    fn is_equatable(&self, ty: &TypeDescriptor) -> bool {
        descriptor_is_equatable(self, ty)
    }

    fn collection_of(&self, _: &ConcreteType) -> Option<CollectionShape> {
        None
    }
}

// Flag-based equatability shared by every resolver; parameters defer to
// their constraint set so bounds are checked through `resolver`.
pub(crate) fn descriptor_is_equatable<R: CapabilityResolver + ?Sized>(
    resolver: &R,
    ty: &TypeDescriptor,
) -> bool {
    match ty {
        TypeDescriptor::GenericParameter(param) => param.constraints.require_equatable(resolver),
        TypeDescriptor::Concrete(concrete) => concrete.equatable,
        TypeDescriptor::Array { .. } | TypeDescriptor::Collection(_) => false,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GenericParamSpec;

    #[test]
    fn descriptor_resolver_reads_flags() {
        let resolver = DescriptorResolver;

        assert!(resolver.is_equatable(&TypeDescriptor::reference("Name").equatable()));
        assert!(!resolver.is_equatable(&TypeDescriptor::reference("Name")));
        assert!(!resolver.is_equatable(&TypeDescriptor::array(
            TypeDescriptor::value("i32").equatable()
        )));
    }

    #[test]
    fn parameter_equatability_follows_bounds_transitively() {
        let resolver = DescriptorResolver;
        let inner = GenericParamSpec::factory("U", "f").equatable();
        let outer = GenericParamSpec::factory("T", "f").with_bound(inner.to_descriptor());
        let plain = GenericParamSpec::factory("V", "f")
            .with_bound(TypeDescriptor::reference("Marker"));

        assert!(resolver.is_equatable(&outer.to_descriptor()));
        assert!(!resolver.is_equatable(&plain.to_descriptor()));
    }

    #[test]
    fn references_and_boxes_delegate() {
        let boxed: Box<dyn CapabilityResolver> = Box::new(DescriptorResolver);
        let shared = Arc::new(DescriptorResolver);
        let ty = TypeDescriptor::value("i32").equatable();

        assert!(boxed.is_equatable(&ty));
        assert!((&shared).is_equatable(&ty));
    }
}
