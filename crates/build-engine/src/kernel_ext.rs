use kernel_api::{Kernel, KernelIntrospect};

/// Both halves of the kernel surface on one object: mutating construction
/// calls plus read-only topology queries. The accessor hands out the
/// introspection view without fighting the borrow checker over a value
/// that is otherwise held as `&mut`.
pub trait KernelBundle: Kernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

impl<T: Kernel + KernelIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}
