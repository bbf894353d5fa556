// @generated by di_compile. Do not edit.

#[allow(non_snake_case, unused_imports, unused_variables, clippy::all)]
pub mod __Cache__ {
    use super::*;
    use ::std::rc::Rc;
    use ::di_runtime::{ContainerError, Value};

    pub struct CompiledContainer {
        base: ::di_runtime::CompiledBase<CompiledContainer>,
    }

    impl CompiledContainer {
        pub fn new(options: ::di_runtime::CompiledOptions) -> Rc<Self> {
            Rc::new_cyclic(|this| Self {
                base: ::di_runtime::CompiledBase::new(this.clone(), options),
            })
        }

        pub fn get0(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("id", ::di_runtime::construct::<crate::NoArgClass>(vec![])?))
        }
    }

    impl ::di_runtime::Compiled for CompiledContainer {
        const MAPPINGS: &'static [(&'static str, usize)] = &[
            ("id", 0),
        ];

        fn base(&self) -> &::di_runtime::CompiledBase<Self> {
            &self.base
        }

        fn dispatch(c: &Rc<Self>, slot: usize) -> Result<Value, ContainerError> {
            match slot {
                0 => Self::get0(c),
                _ => Err(ContainerError::UnknownSlot(slot)),
            }
        }
    }

    impl ::di_runtime::Container for CompiledContainer {
        fn get(&self, id: &str) -> Result<Value, ContainerError> {
            ::di_runtime::compiled::get(self, id)
        }

        fn has(&self, id: &str) -> bool {
            ::di_runtime::compiled::has(self, id)
        }
    }
}
