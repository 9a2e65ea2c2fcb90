//! Curves and shaded areas of a 2D plot, surfaces of a 3D plot.

use crate::attribute::{
    read_bool, read_sidref, read_string, write_bool, write_sidref, write_string, AttributeOrigin,
    AttributeValue,
};
use crate::base::{log_missing_attributes, missing_attributes, ReadContext, SedBase, SedObject};
use crate::error::{SedIoError, SedResult};
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;
use crate::xml::{ExpectedAttributes, XmlAttributes, XmlOutputStream};

/// A y-over-x line drawn from two data generators.
///
/// From Version 4 on, the four error references name data generators giving
/// the extent of error bars around each point.
#[derive(Debug, Clone, PartialEq)]
pub struct SedCurve {
    base: SedBase,
    log_x: Option<bool>,
    log_y: Option<bool>,
    x_data_reference: Option<String>,
    y_data_reference: Option<String>,
    order: Option<i32>,
    style: Option<String>,
    curve_type: Option<String>,
    y_axis: Option<String>,
    x_error_upper: Option<String>,
    x_error_lower: Option<String>,
    y_error_upper: Option<String>,
    y_error_lower: Option<String>,
}

impl SedCurve {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedCurve {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            log_x: None,
            log_y: None,
            x_data_reference: None,
            y_data_reference: None,
            order: None,
            style: None,
            curve_type: None,
            y_axis: None,
            x_error_upper: None,
            x_error_lower: None,
            y_error_upper: None,
            y_error_lower: None,
        }
    }
}

sed_constructors!(SedCurve);

sed_attributes!(SedCurve {
    log_x: bool("logX"),
    log_y: bool("logY"),
    x_data_reference: sidref("xDataReference"),
    y_data_reference: sidref("yDataReference"),
    order: int("order"),
    style: sidref("style"),
    curve_type: string("type"),
    y_axis: string("yAxis"),
    x_error_upper: sidref("xErrorUpper"),
    x_error_lower: sidref("xErrorLower"),
    y_error_upper: sidref("yErrorUpper"),
    y_error_lower: sidref("yErrorLower"),
});

impl SedObject for SedCurve {
    sed_object_common!(
        TypeCode::Curve,
        "curve",
        required: ["xDataReference", "yDataReference"]
    );
}

/// The band between two y data generators over a common x.
#[derive(Debug, Clone, PartialEq)]
pub struct SedShadedArea {
    base: SedBase,
    log_x: Option<bool>,
    x_data_reference: Option<String>,
    y_data_reference_from: Option<String>,
    y_data_reference_to: Option<String>,
    order: Option<i32>,
    style: Option<String>,
    y_axis: Option<String>,
}

impl SedShadedArea {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedShadedArea {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            log_x: None,
            x_data_reference: None,
            y_data_reference_from: None,
            y_data_reference_to: None,
            order: None,
            style: None,
            y_axis: None,
        }
    }
}

sed_constructors!(SedShadedArea);

sed_attributes!(SedShadedArea {
    log_x: bool("logX"),
    x_data_reference: sidref("xDataReference"),
    y_data_reference_from: sidref("yDataReferenceFrom"),
    y_data_reference_to: sidref("yDataReferenceTo"),
    order: int("order"),
    style: sidref("style"),
    y_axis: string("yAxis"),
});

impl SedObject for SedShadedArea {
    sed_object_common!(
        TypeCode::ShadedArea,
        "shadedArea",
        required: ["xDataReference", "yDataReferenceFrom", "yDataReferenceTo"]
    );
}

sed_variants! {
    /// Anything drawn in the `listOfCurves` of a 2D plot.
    SedAbstractCurve, SedAbstractCurveMut, TypeCode::AbstractCurve, "listOfCurves" {
        Curve(SedCurve) = "curve",
        ShadedArea(SedShadedArea) = "shadedArea",
    }
}

/// A z-over-(x, y) surface.
///
/// Shares every curve attribute except `type`, which names the surface kind
/// instead. The curve part is reachable through [`curve`](Self::curve).
#[derive(Debug, Clone, PartialEq)]
pub struct SedSurface {
    curve: SedCurve,
    log_z: Option<bool>,
    z_data_reference: Option<String>,
    surface_type: Option<String>,
}

impl SedSurface {
    const REQUIRED: [&'static str; 3] = ["xDataReference", "yDataReference", "zDataReference"];

    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedSurface {
            curve: SedCurve::with_namespaces(namespaces),
            log_z: None,
            z_data_reference: None,
            surface_type: None,
        }
    }

    pub fn curve(&self) -> &SedCurve {
        &self.curve
    }

    pub fn curve_mut(&mut self) -> &mut SedCurve {
        &mut self.curve
    }

    pub fn x_data_reference(&self) -> &str {
        self.curve.x_data_reference()
    }

    pub fn set_x_data_reference(&mut self, value: &str) -> SedResult {
        self.curve.set_x_data_reference(value)
    }

    pub fn y_data_reference(&self) -> &str {
        self.curve.y_data_reference()
    }

    pub fn set_y_data_reference(&mut self, value: &str) -> SedResult {
        self.curve.set_y_data_reference(value)
    }

    sed_attribute_accessors!(bool, log_z, "logZ");
    sed_attribute_accessors!(sidref, z_data_reference, "zDataReference");
    sed_attribute_accessors!(string, surface_type, "type");
}

sed_constructors!(SedSurface);

sed_list_item!(SedSurface, "listOfSurfaces", TypeCode::Surface, "surface");

impl SedObject for SedSurface {
    fn base(&self) -> &SedBase {
        self.curve.base()
    }

    fn base_mut(&mut self) -> &mut SedBase {
        self.curve.base_mut()
    }

    fn type_code(&self) -> TypeCode {
        TypeCode::Surface
    }

    fn element_name(&self) -> &str {
        "surface"
    }

    fn has_required_attributes(&self) -> bool {
        missing_attributes(self, &Self::REQUIRED).is_empty()
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        self.curve.add_expected_attributes(expected);
        expected.add("logZ");
        expected.add("zDataReference");
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        ctx: &mut ReadContext<'_>,
    ) {
        let element = "surface";
        let type_code = TypeCode::Surface;
        self.curve
            .base
            .read_attributes(attributes, expected, ctx, element, type_code);
        self.curve
            .read_own_attributes(attributes, ctx, element, type_code);
        self.curve.curve_type = None;

        let origin = AttributeOrigin {
            element,
            type_code,
            line: self.curve.base.line(),
            column: self.curve.base.column(),
        };
        read_bool(attributes, "logZ", &mut self.log_z, ctx, &origin);
        read_sidref(attributes, "zDataReference", &mut self.z_data_reference, ctx, &origin);
        read_string(attributes, "type", &mut self.surface_type, ctx, &origin);

        log_missing_attributes(self, &Self::REQUIRED, ctx);
    }

    fn write_attributes(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.curve.base.write_attributes(stream)?;
        self.curve.write_own_attributes(stream)?;
        write_bool(stream, "logZ", &self.log_z)?;
        write_sidref(stream, "zDataReference", &self.z_data_reference)?;
        write_string(stream, "type", &self.surface_type)
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "logZ" => self.log_z.map(AttributeValue::from),
            "zDataReference" => self.z_data_reference.clone().map(AttributeValue::from),
            "type" => self.surface_type.clone().map(AttributeValue::from),
            _ => self.curve.get_attribute(name),
        }
    }

    fn is_set_attribute(&self, name: &str) -> bool {
        match name {
            "logZ" => self.is_set_log_z(),
            "zDataReference" => self.is_set_z_data_reference(),
            "type" => self.is_set_surface_type(),
            _ => self.curve.is_set_attribute(name),
        }
    }

    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> SedResult {
        match name {
            "logZ" => crate::attribute::as_bool(value).and_then(|value| self.set_log_z(value)),
            "zDataReference" => crate::attribute::as_sidref(value)
                .and_then(|value| self.set_z_data_reference(value)),
            "type" => {
                crate::attribute::as_string(value).and_then(|value| self.set_surface_type(value))
            }
            _ => self.curve.set_attribute(name, value),
        }
    }

    fn unset_attribute(&mut self, name: &str) -> SedResult {
        match name {
            "logZ" => self.unset_log_z(),
            "zDataReference" => self.unset_z_data_reference(),
            "type" => self.unset_surface_type(),
            _ => self.curve.unset_attribute(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{read_object, write_object};
    use crate::list::ListItem;
    use crate::errorlog::SedErrorLog;
    use crate::xml::XmlInputStream;

    #[test]
    fn test_curve_required_references() {
        let mut curve = SedCurve::default();
        curve.set_x_data_reference("time").expect("Invalid reference");
        assert!(!curve.has_required_attributes());
        curve.set_y_data_reference("S1").expect("Invalid reference");
        assert!(curve.has_required_attributes());
        assert!(curve.set_style("not a sid").is_err());
    }

    #[test]
    fn test_curve_error_bars() {
        let xml = r#"<curve id="c1" xDataReference="time" yDataReference="S1" yErrorUpper="S1_upper" yErrorLower="S1_lower"/>"#;
        let mut curve = SedAbstractCurve::from(SedCurve::default());
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(xml);
        read_object(&mut curve, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.is_empty(), "{log}");
        match &curve {
            SedAbstractCurve::Curve(inner) => {
                assert_eq!(inner.y_error_upper(), "S1_upper");
                assert!(!inner.is_set_x_error_lower());
            }
            other => panic!("Expected a curve, got {other:?}"),
        }

        let mut output = XmlOutputStream::compact();
        write_object(&curve, &mut output).expect("Failed to write");
        assert_eq!(output.finish().expect("Failed to finish"), xml);
    }

    #[test]
    fn test_shaded_area_needs_both_bounds() {
        let namespaces = SedNamespaces::default();
        let mut area = match SedAbstractCurve::create_item("shadedArea", &namespaces) {
            Some(SedAbstractCurve::ShadedArea(area)) => area,
            other => panic!("Expected a shaded area, got {other:?}"),
        };
        area.set_x_data_reference("time").expect("Invalid reference");
        area.set_y_data_reference_from("S1_min")
            .expect("Invalid reference");
        assert!(!area.has_required_attributes());
        area.set_y_data_reference_to("S1_max").expect("Invalid reference");
        assert!(area.has_required_attributes());
        assert!(SedAbstractCurve::create_item("surface", &namespaces).is_none());
    }

    #[test]
    fn test_surface_type_is_its_own() {
        let xml = r#"<surface id="s" xDataReference="x" yDataReference="y" logZ="true" zDataReference="z" type="heatMap"/>"#;
        let mut surface = SedSurface::default();
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(xml);
        read_object(&mut surface, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.is_empty(), "{log}");
        assert_eq!(surface.surface_type(), "heatMap");
        assert!(!surface.curve().is_set_curve_type());
        assert!(surface.log_z());
        assert_eq!(
            surface.get_attribute("xDataReference"),
            Some(AttributeValue::from("x"))
        );
        assert!(surface.has_required_attributes());

        let mut output = XmlOutputStream::compact();
        write_object(&surface, &mut output).expect("Failed to write");
        assert_eq!(output.finish().expect("Failed to finish"), xml);
    }

    #[test]
    fn test_surface_shares_curve_identity() {
        let mut surface = SedSurface::new(1, 3).expect("Invalid namespaces");
        surface.set_id("surface1").expect("Surfaces carry ids");
        assert_eq!(surface.curve().id(), "surface1");
        assert_eq!(
            surface.set_attribute("zDataReference", &AttributeValue::from("1z")),
            Err(crate::error::SedOperationError::InvalidAttributeValue)
        );
    }
}
