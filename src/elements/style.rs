//! Styles shared by curves, surfaces and axes.

use crate::base::{optional_child, optional_child_mut, ReadContext, SedBase, SedObject};
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// Line drawing settings of a style.
#[derive(Debug, Clone, PartialEq)]
pub struct SedLine {
    base: SedBase,
    line_type: Option<String>,
    color: Option<String>,
    thickness: Option<f64>,
}

impl SedLine {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedLine {
            base: SedBase::new(namespaces),
            line_type: None,
            color: None,
            thickness: None,
        }
    }
}

sed_constructors!(SedLine);

sed_attributes!(SedLine {
    line_type: string("type"),
    color: string("color"),
    thickness: double("thickness"),
});

impl SedObject for SedLine {
    sed_object_common!(TypeCode::Line, "line", required: []);
}

/// Marker drawn at each data point.
#[derive(Debug, Clone, PartialEq)]
pub struct SedMarker {
    base: SedBase,
    size: Option<f64>,
    marker_type: Option<String>,
    fill: Option<String>,
    line_color: Option<String>,
    line_thickness: Option<f64>,
}

impl SedMarker {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedMarker {
            base: SedBase::new(namespaces),
            size: None,
            marker_type: None,
            fill: None,
            line_color: None,
            line_thickness: None,
        }
    }
}

sed_constructors!(SedMarker);

sed_attributes!(SedMarker {
    size: double("size"),
    marker_type: string("type"),
    fill: string("fill"),
    line_color: string("lineColor"),
    line_thickness: double("lineThickness"),
});

impl SedObject for SedMarker {
    sed_object_common!(TypeCode::Marker, "marker", required: []);
}

#[derive(Debug, Clone, PartialEq)]
pub struct SedFill {
    base: SedBase,
    color: Option<String>,
    second_color: Option<String>,
}

impl SedFill {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedFill {
            base: SedBase::new(namespaces),
            color: None,
            second_color: None,
        }
    }
}

sed_constructors!(SedFill);

sed_attributes!(SedFill {
    color: string("color"),
    second_color: string("secondColor"),
});

impl SedObject for SedFill {
    sed_object_common!(TypeCode::Fill, "fill", required: ["color"]);
}

/// A named set of line, marker and fill settings.
///
/// A style may derive from another through `baseStyle`; settings it leaves
/// unset are taken from there.
#[derive(Debug, Clone, PartialEq)]
pub struct SedStyle {
    base: SedBase,
    base_style: Option<String>,
    line: Option<SedLine>,
    marker: Option<SedMarker>,
    fill: Option<SedFill>,
}

impl SedStyle {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedStyle {
            base: SedBase::new(namespaces),
            base_style: None,
            line: None,
            marker: None,
            fill: None,
        }
    }
}

sed_constructors!(SedStyle);

sed_attributes!(SedStyle {
    base_style: sidref("baseStyle"),
});

sed_child!(SedStyle {
    line: SedLine => SedLine::with_namespaces,
    marker: SedMarker => SedMarker::with_namespaces,
    fill: SedFill => SedFill::with_namespaces,
});

sed_list_item!(SedStyle, "listOfStyles", TypeCode::Style, "style");

impl SedObject for SedStyle {
    sed_object_common!(TypeCode::Style, "style", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        let namespaces = self.base.namespaces().clone();
        match name {
            "line" => Some(self.line.insert(SedLine::with_namespaces(namespaces))),
            "marker" => Some(self.marker.insert(SedMarker::with_namespaces(namespaces))),
            "fill" => Some(self.fill.insert(SedFill::with_namespaces(namespaces))),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        [
            optional_child(&self.line),
            optional_child(&self.marker),
            optional_child(&self.fill),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        [
            optional_child_mut(&mut self.line),
            optional_child_mut(&mut self.marker),
            optional_child_mut(&mut self.fill),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
