//! Object Macro Module
//!
//! Boilerplate shared by every concrete element:
//!
//! - `sed_object_common` fills in the identity, attribute and reflection
//!   methods of a `SedObject` implementation. It expects a `base` field and
//!   the methods generated by `sed_attributes`.
//! - `sed_constructors` adds `new(level, version)` and `Default` on top of
//!   the element's own `with_namespaces`.
//! - `sed_list_item` makes an element storable in a `SedListOf`.
//! - `sed_child_lists` and `sed_child` give access to `listOfX` children and
//!   to optional single children.

#[macro_export]
/// Common `SedObject` methods of an element, used inside its trait impl.
///
/// The tag is either a literal or, for a type written under several tags,
/// `element: field` naming a `&'static str` field that holds it.
macro_rules! sed_object_common {
    (@shared $type_code:expr, required: [$($required:literal),*]) => {
        fn base(&self) -> &$crate::base::SedBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::base::SedBase {
            &mut self.base
        }

        fn type_code(&self) -> $crate::typecode::TypeCode {
            $type_code
        }

        fn has_required_attributes(&self) -> bool {
            $crate::base::missing_attributes(self, &[$($required),*]).is_empty()
        }

        fn add_expected_attributes(&self, expected: &mut $crate::xml::ExpectedAttributes) {
            self.base.add_expected_attributes(expected);
            self.add_own_expected_attributes(expected);
        }

        fn read_attributes(
            &mut self,
            attributes: &$crate::xml::XmlAttributes,
            expected: &$crate::xml::ExpectedAttributes,
            ctx: &mut $crate::base::ReadContext<'_>,
        ) {
            let element = self.element_name().to_string();
            self.base
                .read_attributes(attributes, expected, ctx, &element, $type_code);
            self.read_own_attributes(attributes, ctx, &element, $type_code);
            $crate::base::log_missing_attributes(self, &[$($required),*], ctx);
        }

        fn write_attributes(
            &self,
            stream: &mut $crate::xml::XmlOutputStream,
        ) -> Result<(), $crate::error::SedIoError> {
            self.base.write_attributes(stream)?;
            self.write_own_attributes(stream)
        }

        fn get_attribute(&self, name: &str) -> Option<$crate::attribute::AttributeValue> {
            match self.get_own_attribute(name) {
                Some(value) => value,
                None => self.base.get_attribute(name),
            }
        }

        fn is_set_attribute(&self, name: &str) -> bool {
            self.is_set_own_attribute(name)
                .unwrap_or_else(|| self.base.is_set_attribute(name))
        }

        fn set_attribute(
            &mut self,
            name: &str,
            value: &$crate::attribute::AttributeValue,
        ) -> $crate::error::SedResult {
            match self.set_own_attribute(name, value) {
                Some(result) => result,
                None => self.base.set_attribute(name, value),
            }
        }

        fn unset_attribute(&mut self, name: &str) -> $crate::error::SedResult {
            match self.unset_own_attribute(name) {
                Some(result) => result,
                None => self.base.unset_attribute(name),
            }
        }
    };
    ($type_code:expr, $element:literal, required: [$($required:literal),* $(,)?]) => {
        fn element_name(&self) -> &str {
            $element
        }

        $crate::sed_object_common!(@shared $type_code, required: [$($required),*]);
    };
    ($type_code:expr, element: $field:ident, required: [$($required:literal),* $(,)?]) => {
        fn element_name(&self) -> &str {
            self.$field
        }

        $crate::sed_object_common!(@shared $type_code, required: [$($required),*]);
    };
}

#[macro_export]
/// `new(level, version)` and a Level 1 Version 4 `Default` for an element.
macro_rules! sed_constructors {
    ($owner:ident) => {
        impl $owner {
            /// # Arguments
            ///
            /// * `level` - SED-ML level
            /// * `version` - SED-ML version within the level
            ///
            /// # Returns
            ///
            /// The element, or an error for an unknown level/version combination.
            pub fn new(
                level: u32,
                version: u32,
            ) -> Result<Self, $crate::error::SedConstructorError> {
                Ok(Self::with_namespaces(
                    $crate::namespaces::SedNamespaces::new(level, version)?,
                ))
            }
        }

        impl Default for $owner {
            fn default() -> Self {
                Self::with_namespaces($crate::namespaces::SedNamespaces::default())
            }
        }
    };
}

#[macro_export]
/// Implements `ListItem` for a concrete element.
macro_rules! sed_list_item {
    ($owner:ident, $list:literal, $type_code:expr, $element:literal) => {
        impl $crate::list::ListItem for $owner {
            type Mut<'a> = &'a mut $owner;

            const LIST_ELEMENT_NAME: &'static str = $list;
            const LIST_ITEM_TYPE: $crate::typecode::TypeCode = $type_code;

            fn view_mut(&mut self) -> Self::Mut<'_> {
                self
            }

            fn create_item(
                name: &str,
                namespaces: &$crate::namespaces::SedNamespaces,
            ) -> Option<Self> {
                (name == $element).then(|| Self::with_namespaces(namespaces.clone()))
            }
        }
    };
}

#[macro_export]
/// Accessors for the `listOfX` children of an element.
///
/// Each entry `field: Item => singular` yields `field()`, `field_mut()`,
/// `num_field()`, `get_singular()`, `get_singular_by_id()`, `add_singular()`,
/// `remove_singular()` and `remove_singular_by_id()`. Entries marked
/// `[create]` also get `create_singular()`.
macro_rules! sed_child_lists {
    ($owner:ident { $( $field:ident : $item:ty => $singular:ident $([$create:ident])? ),* $(,)? }) => {
        $crate::paste::paste! {
            impl $owner {
                $(
                    pub fn $field(&self) -> &$crate::list::SedListOf<$item> {
                        &self.$field
                    }

                    pub fn [<$field _mut>](&mut self) -> &mut $crate::list::SedListOf<$item> {
                        &mut self.$field
                    }

                    pub fn [<num_ $field>](&self) -> usize {
                        self.$field.size()
                    }

                    pub fn [<get_ $singular>](&self, index: usize) -> Option<&$item> {
                        self.$field.get(index)
                    }

                    pub fn [<get_ $singular _by_id>](&self, id: &str) -> Option<&$item> {
                        self.$field.get_by_id(id)
                    }

                    /// Appends a copy of the item.
                    pub fn [<add_ $singular>](&mut self, item: &$item) -> $crate::error::SedResult {
                        self.$field.append(item)
                    }

                    pub fn [<remove_ $singular>](&mut self, index: usize) -> Option<$item> {
                        self.$field.remove(index)
                    }

                    pub fn [<remove_ $singular _by_id>](&mut self, id: &str) -> Option<$item> {
                        self.$field.remove_by_id(id)
                    }

                    $( $crate::sed_child_create!($create, $field, $item, $singular); )?
                )*
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! sed_child_create {
    (create, $field:ident, $item:ty, $singular:ident) => {
        $crate::paste::paste! {
            /// Appends a new item in this element's namespaces.
            pub fn [<create_ $singular>](&mut self) -> Option<&mut $item> {
                let item = <$item>::with_namespaces(self.base.namespaces().clone());
                self.$field.push_and_get(item)
            }
        }
    };
}

#[macro_export]
/// Accessors for optional single children such as `algorithm` or `xAxis`.
///
/// Each entry `field: Child => constructor` yields `field()`,
/// `field_mut()`, `is_set_field()`, `set_field()`, `create_field()` and
/// `unset_field()`. The constructor builds an empty child from the owner's
/// namespaces.
macro_rules! sed_child {
    ($owner:ident { $( $field:ident : $child:ty => $ctor:expr ),* $(,)? }) => {
        $crate::paste::paste! {
            impl $owner {
                $(
                    pub fn $field(&self) -> Option<&$child> {
                        self.$field.as_ref()
                    }

                    pub fn [<$field _mut>](&mut self) -> Option<&mut $child> {
                        self.$field.as_mut()
                    }

                    pub fn [<is_set_ $field>](&self) -> bool {
                        self.$field.is_some()
                    }

                    /// Stores a copy of `child`.
                    pub fn [<set_ $field>](&mut self, child: &$child) -> $crate::error::SedResult {
                        let link = $crate::base::SedObject::child_link(self);
                        let mut child = child.clone();
                        $crate::base::SedObject::connect_to_parent(&mut child, &link);
                        self.$field = Some(child);
                        Ok(())
                    }

                    /// Replaces the child with a new, empty one.
                    pub fn [<create_ $field>](&mut self) -> &mut $child {
                        let build: fn($crate::namespaces::SedNamespaces) -> $child = $ctor;
                        let link = $crate::base::SedObject::child_link(self);
                        let mut child = build(self.base.namespaces().clone());
                        $crate::base::SedObject::connect_to_parent(&mut child, &link);
                        self.$field.insert(child)
                    }

                    pub fn [<unset_ $field>](&mut self) -> $crate::error::SedResult {
                        self.$field = None;
                        Ok(())
                    }
                )*
            }
        }
    };
}

#[macro_export]
/// Accessors for an element's `math` child.
macro_rules! sed_math {
    ($owner:ident) => {
        impl $owner {
            pub fn math(&self) -> Option<&$crate::xml::XmlNode> {
                self.math.as_ref()
            }

            pub fn is_set_math(&self) -> bool {
                self.math.is_some()
            }

            /// Fails with `InvalidObject` unless `math` is a `math` element.
            pub fn set_math(&mut self, math: $crate::xml::XmlNode) -> $crate::error::SedResult {
                self.math = Some($crate::elements::math_node(math)?);
                Ok(())
            }

            /// Parses `math` as MathML and sets it.
            pub fn set_math_string(&mut self, math: &str) -> $crate::error::SedResult {
                let node = $crate::xml::XmlNode::parse(math)
                    .map_err(|_| $crate::error::SedOperationError::InvalidObject)?;
                self.set_math(node)
            }

            pub fn unset_math(&mut self) -> $crate::error::SedResult {
                self.math = None;
                Ok(())
            }
        }
    };
}
