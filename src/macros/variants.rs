//! Variants Macro Module
//!
//! `sed_variants` turns a closed set of related elements into a tagged enum
//! that behaves like any other `SedObject`:
//!
//! ```ignore
//! sed_variants! {
//!     /// A change applied to a model.
//!     SedChange, SedChangeMut, TypeCode::Change, "listOfChanges" {
//!         ChangeAttribute(SedChangeAttribute) = "changeAttribute",
//!         RemoveXml(SedRemoveXml) = "removeXML",
//!     }
//! }
//! ```
//!
//! Besides the enum itself this generates a view enum of mutable references
//! (the `ListItem::Mut` of the enum), `From` conversions from every variant
//! and a `SedObject` implementation forwarding to the wrapped element.

#[macro_export]
macro_rules! sed_variants {
    (
        $(#[$meta:meta])*
        $name:ident, $view:ident, $type_code:expr, $list:literal {
            $( $variant:ident ( $inner:ty ) = $element:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, ::variantly::Variantly)]
        pub enum $name {
            $( $variant($inner), )+
        }

        /// Mutable access to the wrapped element that cannot change its kind.
        #[derive(Debug)]
        pub enum $view<'a> {
            $( $variant(&'a mut $inner), )+
        }

        impl $name {
            pub fn as_object(&self) -> &dyn $crate::base::SedObject {
                match self {
                    $( $name::$variant(inner) => inner, )+
                }
            }

            pub fn as_object_mut(&mut self) -> &mut dyn $crate::base::SedObject {
                match self {
                    $( $name::$variant(inner) => inner, )+
                }
            }
        }

        impl<'a> $view<'a> {
            pub fn as_object(&mut self) -> &mut dyn $crate::base::SedObject {
                match self {
                    $( $view::$variant(inner) => &mut **inner, )+
                }
            }
        }

        $(
            impl From<$inner> for $name {
                fn from(inner: $inner) -> Self {
                    $name::$variant(inner)
                }
            }
        )+

        impl $crate::list::ListItem for $name {
            type Mut<'a> = $view<'a>;

            const LIST_ELEMENT_NAME: &'static str = $list;
            const LIST_ITEM_TYPE: $crate::typecode::TypeCode = $type_code;

            fn view_mut(&mut self) -> Self::Mut<'_> {
                match self {
                    $( $name::$variant(inner) => $view::$variant(inner), )+
                }
            }

            fn create_item(
                name: &str,
                namespaces: &$crate::namespaces::SedNamespaces,
            ) -> Option<Self> {
                match name {
                    $( $element => Some($name::$variant(
                        <$inner>::with_namespaces(namespaces.clone()),
                    )), )+
                    _ => None,
                }
            }
        }

        impl $crate::base::SedObject for $name {
            fn base(&self) -> &$crate::base::SedBase {
                self.as_object().base()
            }

            fn base_mut(&mut self) -> &mut $crate::base::SedBase {
                self.as_object_mut().base_mut()
            }

            fn type_code(&self) -> $crate::typecode::TypeCode {
                self.as_object().type_code()
            }

            fn element_name(&self) -> &str {
                self.as_object().element_name()
            }

            fn has_required_attributes(&self) -> bool {
                self.as_object().has_required_attributes()
            }

            fn has_required_elements(&self) -> bool {
                self.as_object().has_required_elements()
            }

            fn add_expected_attributes(&self, expected: &mut $crate::xml::ExpectedAttributes) {
                self.as_object().add_expected_attributes(expected)
            }

            fn read_attributes(
                &mut self,
                attributes: &$crate::xml::XmlAttributes,
                expected: &$crate::xml::ExpectedAttributes,
                ctx: &mut $crate::base::ReadContext<'_>,
            ) {
                self.as_object_mut().read_attributes(attributes, expected, ctx)
            }

            fn write_attributes(
                &self,
                stream: &mut $crate::xml::XmlOutputStream,
            ) -> Result<(), $crate::error::SedIoError> {
                self.as_object().write_attributes(stream)
            }

            fn write_elements(
                &self,
                stream: &mut $crate::xml::XmlOutputStream,
            ) -> Result<(), $crate::error::SedIoError> {
                self.as_object().write_elements(stream)
            }

            fn create_object(
                &mut self,
                name: &str,
                ctx: &mut $crate::base::ReadContext<'_>,
            ) -> Option<&mut dyn $crate::base::SedObject> {
                self.as_object_mut().create_object(name, ctx)
            }

            fn read_other_xml(
                &mut self,
                stream: &mut $crate::xml::XmlInputStream,
                ctx: &mut $crate::base::ReadContext<'_>,
            ) -> bool {
                self.as_object_mut().read_other_xml(stream, ctx)
            }

            fn children(&self) -> Vec<&dyn $crate::base::SedObject> {
                self.as_object().children()
            }

            fn children_mut(&mut self) -> Vec<&mut dyn $crate::base::SedObject> {
                self.as_object_mut().children_mut()
            }

            fn child_link(&self) -> $crate::base::ParentLink {
                self.as_object().child_link()
            }

            fn connect_to_parent(&mut self, parent: &$crate::base::ParentLink) {
                self.as_object_mut().connect_to_parent(parent)
            }

            fn get_attribute(&self, name: &str) -> Option<$crate::attribute::AttributeValue> {
                self.as_object().get_attribute(name)
            }

            fn is_set_attribute(&self, name: &str) -> bool {
                self.as_object().is_set_attribute(name)
            }

            fn set_attribute(
                &mut self,
                name: &str,
                value: &$crate::attribute::AttributeValue,
            ) -> $crate::error::SedResult {
                self.as_object_mut().set_attribute(name, value)
            }

            fn unset_attribute(&mut self, name: &str) -> $crate::error::SedResult {
                self.as_object_mut().unset_attribute(name)
            }
        }
    };
}
