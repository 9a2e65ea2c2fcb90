//! Plot axes.

use crate::base::{SedBase, SedObject};
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// One axis of a plot, written as `xAxis`, `yAxis`, `zAxis` or `rightYAxis`
/// depending on where the plot keeps it.
#[derive(Debug, Clone, PartialEq)]
pub struct SedAxis {
    base: SedBase,
    element_name: &'static str,
    axis_type: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    grid: Option<bool>,
    reverse: Option<bool>,
    style: Option<String>,
}

impl SedAxis {
    /// An `xAxis`.
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        Self::named(namespaces, "xAxis")
    }

    pub fn named(namespaces: SedNamespaces, element_name: &'static str) -> Self {
        SedAxis {
            base: SedBase::new(namespaces),
            element_name,
            axis_type: None,
            min: None,
            max: None,
            grid: None,
            reverse: None,
            style: None,
        }
    }
}

sed_constructors!(SedAxis);

sed_attributes!(SedAxis {
    axis_type: string("type"),
    min: double("min"),
    max: double("max"),
    grid: bool("grid"),
    reverse: bool("reverse"),
    style: sidref("style"),
});

impl SedObject for SedAxis {
    sed_object_common!(TypeCode::Axis, element: element_name, required: ["type"]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{read_object, write_object, ReadContext};
    use crate::errorlog::SedErrorLog;
    use crate::xml::{XmlInputStream, XmlOutputStream};

    #[test]
    fn test_axis_keeps_its_tag() {
        let xml = r#"<rightYAxis type="log10" min="0.1" max="100" grid="true"/>"#;
        let mut axis = SedAxis::named(SedNamespaces::default(), "rightYAxis");
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(xml);
        read_object(&mut axis, &mut stream, &mut ReadContext::new(&mut log, 1, 4));

        assert!(log.is_empty(), "{log}");
        assert_eq!(axis.element_name(), "rightYAxis");
        assert_eq!(axis.axis_type(), "log10");
        assert!(axis.grid());
        assert!(!axis.is_set_reverse());

        let mut output = XmlOutputStream::compact();
        write_object(&axis, &mut output).expect("Failed to write");
        assert_eq!(output.finish().expect("Failed to finish"), xml);
    }

    #[test]
    fn test_axis_type_is_required() {
        let mut axis = SedAxis::default();
        assert_eq!(axis.element_name(), "xAxis");
        assert!(!axis.has_required_attributes());
        axis.set_axis_type("linear").expect("Failed to set type");
        assert!(axis.has_required_attributes());
    }
}
