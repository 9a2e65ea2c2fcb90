//! Attribute Macro Module
//!
//! `sed_attributes` generates the accessor set of an element's own
//! attributes from a single table:
//!
//! ```ignore
//! sed_attributes!(SedDataSet {
//!     label: string("label"),
//!     data_reference: sidref("dataReference"),
//! });
//! ```
//!
//! For every entry the element gets `x()`, `is_set_x()`, `set_x()` and
//! `unset_x()`. The table also drives reading, writing and the reflective
//! accessors used by the `SedObject` implementation. Supported kinds are
//! `string`, `sidref` (validated identifier reference), `double`, `int` and
//! `bool`. Each field must be an `Option` of the matching Rust type.
//!
//! `steps` is an `int` spelled `numberOfPoints` before Level 1 Version 4.
//! Both spellings are read and reflected, the one of the element's release
//! is written. List it last to keep it behind the other attributes.

/// Accessors of one attribute, dispatched on its kind.
#[doc(hidden)]
#[macro_export]
macro_rules! sed_attribute_accessors {
    (string, $field:ident, $xml:literal) => {
        $crate::paste::paste! {
            #[doc = concat!("The `", $xml, "` attribute, empty when unset.")]
            pub fn $field(&self) -> &str {
                self.$field.as_deref().unwrap_or("")
            }

            pub fn [<is_set_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            /// An empty value unsets the attribute.
            pub fn [<set_ $field>](&mut self, value: &str) -> $crate::error::SedResult {
                self.$field = (!value.is_empty()).then(|| value.to_string());
                Ok(())
            }

            pub fn [<unset_ $field>](&mut self) -> $crate::error::SedResult {
                self.$field = None;
                Ok(())
            }
        }
    };
    (sidref, $field:ident, $xml:literal) => {
        $crate::paste::paste! {
            #[doc = concat!("The `", $xml, "` reference, empty when unset.")]
            pub fn $field(&self) -> &str {
                self.$field.as_deref().unwrap_or("")
            }

            pub fn [<is_set_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            /// Fails with `InvalidAttributeValue` unless `value` is a valid identifier.
            pub fn [<set_ $field>](&mut self, value: &str) -> $crate::error::SedResult {
                if value.is_empty() {
                    self.$field = None;
                    return Ok(());
                }
                if !$crate::syntax::is_valid_sid(value) {
                    return Err($crate::error::SedOperationError::InvalidAttributeValue);
                }
                self.$field = Some(value.to_string());
                Ok(())
            }

            pub fn [<unset_ $field>](&mut self) -> $crate::error::SedResult {
                self.$field = None;
                Ok(())
            }
        }
    };
    (double, $field:ident, $xml:literal) => {
        $crate::paste::paste! {
            #[doc = concat!("The `", $xml, "` attribute, `NaN` when unset.")]
            pub fn $field(&self) -> f64 {
                self.$field.unwrap_or(f64::NAN)
            }

            pub fn [<is_set_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            pub fn [<set_ $field>](&mut self, value: f64) -> $crate::error::SedResult {
                self.$field = Some(value);
                Ok(())
            }

            pub fn [<unset_ $field>](&mut self) -> $crate::error::SedResult {
                self.$field = None;
                Ok(())
            }
        }
    };
    (int, $field:ident, $xml:literal) => {
        $crate::paste::paste! {
            #[doc = concat!("The `", $xml, "` attribute, `i32::MAX` when unset.")]
            pub fn $field(&self) -> i32 {
                self.$field.unwrap_or(i32::MAX)
            }

            pub fn [<is_set_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            pub fn [<set_ $field>](&mut self, value: i32) -> $crate::error::SedResult {
                self.$field = Some(value);
                Ok(())
            }

            pub fn [<unset_ $field>](&mut self) -> $crate::error::SedResult {
                self.$field = None;
                Ok(())
            }
        }
    };
    (steps, $field:ident, $xml:literal) => {
        $crate::sed_attribute_accessors!(int, $field, $xml);

        /// Pre-Version 4 name of [`number_of_steps`](Self::number_of_steps).
        pub fn number_of_points(&self) -> i32 {
            self.$field()
        }

        pub fn set_number_of_points(&mut self, value: i32) -> $crate::error::SedResult {
            $crate::paste::paste! { self.[<set_ $field>](value) }
        }
    };
    (bool, $field:ident, $xml:literal) => {
        $crate::paste::paste! {
            #[doc = concat!("The `", $xml, "` attribute, `false` when unset.")]
            pub fn $field(&self) -> bool {
                self.$field.unwrap_or(false)
            }

            pub fn [<is_set_ $field>](&self) -> bool {
                self.$field.is_some()
            }

            pub fn [<set_ $field>](&mut self, value: bool) -> $crate::error::SedResult {
                self.$field = Some(value);
                Ok(())
            }

            pub fn [<unset_ $field>](&mut self) -> $crate::error::SedResult {
                self.$field = None;
                Ok(())
            }
        }
    };
}

/// Whether `name` addresses an attribute of the given kind.
#[doc(hidden)]
#[macro_export]
macro_rules! sed_attribute_is {
    (steps, $xml:literal, $name:expr) => {
        $name == $xml || $name == "numberOfPoints"
    };
    ($kind:ident, $xml:literal, $name:expr) => {
        $name == $xml
    };
}

/// Registers the accepted spellings of one attribute.
#[doc(hidden)]
#[macro_export]
macro_rules! sed_attribute_expect {
    (steps, $xml:literal, $expected:expr, $base:expr) => {
        $expected.add("numberOfPoints");
        if !$crate::attribute::uses_points_spelling($base) {
            $expected.add($xml);
        }
    };
    ($kind:ident, $xml:literal, $expected:expr, $base:expr) => {
        $expected.add($xml);
    };
}

/// Writes one attribute under the spelling of the element's release.
#[doc(hidden)]
#[macro_export]
macro_rules! sed_attribute_write {
    (steps, $xml:literal, $stream:expr, $slot:expr, $base:expr) => {
        $crate::attribute::write_int(
            $stream,
            $crate::attribute::steps_spelling($base, $xml),
            $slot,
        )
    };
    ($kind:ident, $xml:literal, $stream:expr, $slot:expr, $base:expr) => {
        $crate::paste::paste! { $crate::attribute::[<write_ $kind>]($stream, $xml, $slot) }
    };
}

#[macro_export]
/// Generates accessors, reading, writing and reflection for an element's own attributes.
macro_rules! sed_attributes {
    ($owner:ident { $( $field:ident : $kind:ident ( $xml:literal ) ),* $(,)? }) => {
        $crate::paste::paste! {
            impl $owner {
                $( $crate::sed_attribute_accessors!($kind, $field, $xml); )*

                #[allow(unused_variables)]
                fn add_own_expected_attributes(&self, expected: &mut $crate::xml::ExpectedAttributes) {
                    $( $crate::sed_attribute_expect!($kind, $xml, expected, &self.base); )*
                }

                #[allow(unused_variables)]
                fn read_own_attributes(
                    &mut self,
                    attributes: &$crate::xml::XmlAttributes,
                    ctx: &mut $crate::base::ReadContext<'_>,
                    element: &str,
                    type_code: $crate::typecode::TypeCode,
                ) {
                    let origin = $crate::attribute::AttributeOrigin {
                        element,
                        type_code,
                        line: self.base.line(),
                        column: self.base.column(),
                    };
                    $(
                        $crate::attribute::[<read_ $kind>](
                            attributes,
                            $xml,
                            &mut self.$field,
                            ctx,
                            &origin,
                        );
                    )*
                }

                #[allow(unused_variables)]
                fn write_own_attributes(
                    &self,
                    stream: &mut $crate::xml::XmlOutputStream,
                ) -> Result<(), $crate::error::SedIoError> {
                    $( $crate::sed_attribute_write!($kind, $xml, stream, &self.$field, &self.base)?; )*
                    Ok(())
                }

                /// `None` when `name` is not one of this element's own attributes.
                #[allow(unused_variables)]
                fn get_own_attribute(
                    &self,
                    name: &str,
                ) -> Option<Option<$crate::attribute::AttributeValue>> {
                    $(
                        if $crate::sed_attribute_is!($kind, $xml, name) {
                            return Some(
                                self.$field
                                    .clone()
                                    .map($crate::attribute::AttributeValue::from),
                            );
                        }
                    )*
                    None
                }

                #[allow(unused_variables)]
                fn is_set_own_attribute(&self, name: &str) -> Option<bool> {
                    $(
                        if $crate::sed_attribute_is!($kind, $xml, name) {
                            return Some(self.$field.is_some());
                        }
                    )*
                    None
                }

                #[allow(unused_variables)]
                fn set_own_attribute(
                    &mut self,
                    name: &str,
                    value: &$crate::attribute::AttributeValue,
                ) -> Option<$crate::error::SedResult> {
                    $(
                        if $crate::sed_attribute_is!($kind, $xml, name) {
                            return Some(
                                $crate::attribute::[<as_ $kind>](value)
                                    .and_then(|value| self.[<set_ $field>](value)),
                            );
                        }
                    )*
                    None
                }

                #[allow(unused_variables)]
                fn unset_own_attribute(&mut self, name: &str) -> Option<$crate::error::SedResult> {
                    $(
                        if $crate::sed_attribute_is!($kind, $xml, name) {
                            return Some(self.[<unset_ $field>]());
                        }
                    )*
                    None
                }
            }
        }
    };
}
