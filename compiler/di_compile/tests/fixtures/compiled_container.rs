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
            Ok(c.base.share("logger", ::di_runtime::construct::<crate::Logger>(vec![])?))
        }

        pub fn get1(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("mailer", ::di_runtime::construct::<crate::Mailer>(vec![c.base.resolved("logger").map_or_else(|| Self::get0(c), Ok)?, Value::from("noreply")])?))
        }

        pub fn get2(c: &Rc<Self>) -> Result<Value, ContainerError> {
            (c.base.remember("fresh", |c: &Rc<Self>| -> Result<Value, ContainerError> {
                Ok(::di_runtime::construct::<crate::Logger>(vec![])?)
            }))(c)
        }

        pub fn get3(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("holder", ::di_runtime::construct::<crate::Holder>(vec![::di_runtime::construct::<crate::Logger>(vec![])?])?))
        }

        pub fn get4(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("heavy", c.base.proxy_manager().get_proxy("crate::Heavy", {
                let c = Rc::downgrade(c);
                Box::new(move || -> Result<Value, ContainerError> {
                    let c = &::di_runtime::upgrade(&c)?;
                    Ok(::di_runtime::construct::<crate::Heavy>(vec![])?)
                })
            })?))
        }

        pub fn get5(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("alias", c.base.resolved("logger").map_or_else(|| Self::get0(c), Ok)?))
        }

        pub fn get6(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("settings", Value::List(vec![Value::Int(1), Value::from("two"), Value::Null])))
        }

        pub fn get7(c: &Rc<Self>) -> Result<Value, ContainerError> {
            (c.base.remember("port", |c: &Rc<Self>| -> Result<Value, ContainerError> {
                Ok((crate::make_port)(&**c as &dyn ::di_runtime::Container)?)
            }))(c)
        }

        pub fn get8(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("greeting", (|_c: &dyn ::di_runtime::Container| -> Result<Value, ContainerError> { Ok(Value::from("inline")) })(&**c as &dyn ::di_runtime::Container)?))
        }

        pub fn get9(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("aware", ::di_runtime::construct::<crate::NeedsContainer>(vec![Value::Container(Rc::clone(c) as Rc<dyn ::di_runtime::Container>)])?))
        }

        pub fn get10(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("dispatcher", ::di_runtime::construct::<crate::Dispatcher>(vec![Value::List(vec![
                c.base.resolved("mailer").map_or_else(|| Self::get1(c), Ok)?,
                c.base.resolved("logger").map_or_else(|| Self::get0(c), Ok)?
            ])])?))
        }

        pub fn get11(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("banner", (|c: &dyn ::di_runtime::Container| -> Result<Value, ContainerError> { banner_text(c) })(&**c as &dyn ::di_runtime::Container)?))
        }

        pub fn get12(c: &Rc<Self>) -> Result<Value, ContainerError> {
            Ok(c.base.share("lazy_heavy", c.base.proxy_manager().get_proxy("crate::Heavy", {
                let c = Rc::downgrade(c);
                Box::new(move || -> Result<Value, ContainerError> {
                    let c = &::di_runtime::upgrade(&c)?;
                    Ok((crate::make_heavy)(&**c as &dyn ::di_runtime::Container)?)
                })
            })?))
        }

        pub fn get13(c: &Rc<Self>) -> Result<Value, ContainerError> {
            (c.base.remember("fresh_heavy", |c: &Rc<Self>| -> Result<Value, ContainerError> {
                Ok(c.base.proxy_manager().get_proxy("crate::Heavy", {
                    let c = Rc::downgrade(c);
                    Box::new(move || -> Result<Value, ContainerError> {
                        let c = &::di_runtime::upgrade(&c)?;
                        Ok(::di_runtime::construct::<crate::Heavy>(vec![])?)
                    })
                })?)
            }))(c)
        }
    }

    impl ::di_runtime::Compiled for CompiledContainer {
        const MAPPINGS: &'static [(&'static str, usize)] = &[
            ("logger", 0),
            ("mailer", 1),
            ("fresh", 2),
            ("holder", 3),
            ("heavy", 4),
            ("alias", 5),
            ("settings", 6),
            ("port", 7),
            ("greeting", 8),
            ("aware", 9),
            ("dispatcher", 10),
            ("banner", 11),
            ("lazy_heavy", 12),
            ("fresh_heavy", 13),
        ];

        fn base(&self) -> &::di_runtime::CompiledBase<Self> {
            &self.base
        }

        fn dispatch(c: &Rc<Self>, slot: usize) -> Result<Value, ContainerError> {
            match slot {
                0 => Self::get0(c),
                1 => Self::get1(c),
                2 => Self::get2(c),
                3 => Self::get3(c),
                4 => Self::get4(c),
                5 => Self::get5(c),
                6 => Self::get6(c),
                7 => Self::get7(c),
                8 => Self::get8(c),
                9 => Self::get9(c),
                10 => Self::get10(c),
                11 => Self::get11(c),
                12 => Self::get12(c),
                13 => Self::get13(c),
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
