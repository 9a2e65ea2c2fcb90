//! Outputs: tabular reports, 2D/3D plots of data generators, figures and
//! the plots and reports drawn from one task's results.

use crate::base::{optional_child, optional_child_mut, ReadContext, SedBase, SedObject};
use crate::elements::{SedAbstractCurve, SedAxis, SedCurve, SedFigure, SedShadedArea, SedSurface};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// One column of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDataSet {
    base: SedBase,
    label: Option<String>,
    data_reference: Option<String>,
}

impl SedDataSet {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedDataSet {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            label: None,
            data_reference: None,
        }
    }
}

sed_constructors!(SedDataSet);

sed_attributes!(SedDataSet {
    label: string("label"),
    data_reference: sidref("dataReference"),
});

sed_list_item!(SedDataSet, "listOfDataSets", TypeCode::DataSet, "dataSet");

impl SedObject for SedDataSet {
    sed_object_common!(
        TypeCode::DataSet,
        "dataSet",
        required: ["id", "label", "dataReference"]
    );
}

#[derive(Debug, Clone, PartialEq)]
pub struct SedReport {
    base: SedBase,
    data_sets: SedListOf<SedDataSet>,
}

impl SedReport {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut report = SedReport {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            data_sets: SedListOf::with_namespaces(namespaces),
        };
        report.connect_to_child();
        report
    }
}

sed_constructors!(SedReport);

sed_attributes!(SedReport {});

sed_child_lists!(SedReport {
    data_sets: SedDataSet => data_set [create],
});

impl SedObject for SedReport {
    sed_object_common!(TypeCode::Report, "report", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        (name == "listOfDataSets").then_some(&mut self.data_sets as &mut dyn SedObject)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.data_sets as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.data_sets as &mut dyn SedObject]
    }
}

/// A plot of curves and shaded areas, with optional legend, size hints
/// and axes.
#[derive(Debug, Clone, PartialEq)]
pub struct SedPlot2D {
    base: SedBase,
    legend: Option<bool>,
    height: Option<f64>,
    width: Option<f64>,
    x_axis: Option<SedAxis>,
    y_axis: Option<SedAxis>,
    right_y_axis: Option<SedAxis>,
    curves: SedListOf<SedAbstractCurve>,
}

impl SedPlot2D {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut plot = SedPlot2D {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            legend: None,
            height: None,
            width: None,
            x_axis: None,
            y_axis: None,
            right_y_axis: None,
            curves: SedListOf::with_namespaces(namespaces),
        };
        plot.connect_to_child();
        plot
    }

    pub fn create_curve(&mut self) -> Option<&mut SedCurve> {
        let curve = SedCurve::with_namespaces(self.base.namespaces().clone());
        match self.curves.push_and_get(curve.into())? {
            SedAbstractCurve::Curve(curve) => Some(curve),
            _ => None,
        }
    }

    pub fn create_shaded_area(&mut self) -> Option<&mut SedShadedArea> {
        let area = SedShadedArea::with_namespaces(self.base.namespaces().clone());
        match self.curves.push_and_get(area.into())? {
            SedAbstractCurve::ShadedArea(area) => Some(area),
            _ => None,
        }
    }
}

sed_constructors!(SedPlot2D);

sed_attributes!(SedPlot2D {
    legend: bool("legend"),
    height: double("height"),
    width: double("width"),
});

sed_child!(SedPlot2D {
    x_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "xAxis"),
    y_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "yAxis"),
    right_y_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "rightYAxis"),
});

sed_child_lists!(SedPlot2D {
    curves: SedAbstractCurve => curve,
});

impl SedObject for SedPlot2D {
    sed_object_common!(TypeCode::Plot2D, "plot2D", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        let namespaces = self.base.namespaces().clone();
        match name {
            "xAxis" => Some(self.x_axis.insert(SedAxis::named(namespaces, "xAxis"))),
            "yAxis" => Some(self.y_axis.insert(SedAxis::named(namespaces, "yAxis"))),
            "rightYAxis" => Some(
                self.right_y_axis
                    .insert(SedAxis::named(namespaces, "rightYAxis")),
            ),
            "listOfCurves" => Some(&mut self.curves),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        [
            optional_child(&self.x_axis),
            optional_child(&self.y_axis),
            optional_child(&self.right_y_axis),
            Some(&self.curves as &dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        [
            optional_child_mut(&mut self.x_axis),
            optional_child_mut(&mut self.y_axis),
            optional_child_mut(&mut self.right_y_axis),
            Some(&mut self.curves as &mut dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// A plot of surfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct SedPlot3D {
    base: SedBase,
    legend: Option<bool>,
    height: Option<f64>,
    width: Option<f64>,
    x_axis: Option<SedAxis>,
    y_axis: Option<SedAxis>,
    z_axis: Option<SedAxis>,
    surfaces: SedListOf<SedSurface>,
}

impl SedPlot3D {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut plot = SedPlot3D {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            legend: None,
            height: None,
            width: None,
            x_axis: None,
            y_axis: None,
            z_axis: None,
            surfaces: SedListOf::with_namespaces(namespaces),
        };
        plot.connect_to_child();
        plot
    }
}

sed_constructors!(SedPlot3D);

sed_attributes!(SedPlot3D {
    legend: bool("legend"),
    height: double("height"),
    width: double("width"),
});

sed_child!(SedPlot3D {
    x_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "xAxis"),
    y_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "yAxis"),
    z_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "zAxis"),
});

sed_child_lists!(SedPlot3D {
    surfaces: SedSurface => surface [create],
});

impl SedObject for SedPlot3D {
    sed_object_common!(TypeCode::Plot3D, "plot3D", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        let namespaces = self.base.namespaces().clone();
        match name {
            "xAxis" => Some(self.x_axis.insert(SedAxis::named(namespaces, "xAxis"))),
            "yAxis" => Some(self.y_axis.insert(SedAxis::named(namespaces, "yAxis"))),
            "zAxis" => Some(self.z_axis.insert(SedAxis::named(namespaces, "zAxis"))),
            "listOfSurfaces" => Some(&mut self.surfaces),
            _ => None,
        }
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        [
            optional_child(&self.x_axis),
            optional_child(&self.y_axis),
            optional_child(&self.z_axis),
            Some(&self.surfaces as &dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        [
            optional_child_mut(&mut self.x_axis),
            optional_child_mut(&mut self.y_axis),
            optional_child_mut(&mut self.z_axis),
            Some(&mut self.surfaces as &mut dyn SedObject),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Plots drawn from the results of one task rather than from curves: a
/// waterfall plot of a repeated task, or the fit of a parameter estimation.
/// The last argument is the field and attribute referencing the task.
macro_rules! task_plot {
    ($owner:ident, $type_code:expr, $element:literal, $task_field:ident: $task:literal) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $owner {
            base: SedBase,
            $task_field: Option<String>,
            legend: Option<bool>,
            height: Option<f64>,
            width: Option<f64>,
            x_axis: Option<SedAxis>,
            y_axis: Option<SedAxis>,
        }

        impl $owner {
            pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
                $owner {
                    base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
                    $task_field: None,
                    legend: None,
                    height: None,
                    width: None,
                    x_axis: None,
                    y_axis: None,
                }
            }
        }

        sed_constructors!($owner);

        sed_attributes!($owner {
            $task_field: sidref($task),
            legend: bool("legend"),
            height: double("height"),
            width: double("width"),
        });

        sed_child!($owner {
            x_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "xAxis"),
            y_axis: SedAxis => |namespaces| SedAxis::named(namespaces, "yAxis"),
        });

        impl SedObject for $owner {
            sed_object_common!($type_code, $element, required: ["id", $task]);

            fn create_object(
                &mut self,
                name: &str,
                _ctx: &mut ReadContext<'_>,
            ) -> Option<&mut dyn SedObject> {
                let namespaces = self.base.namespaces().clone();
                match name {
                    "xAxis" => Some(self.x_axis.insert(SedAxis::named(namespaces, "xAxis"))),
                    "yAxis" => Some(self.y_axis.insert(SedAxis::named(namespaces, "yAxis"))),
                    _ => None,
                }
            }

            fn children(&self) -> Vec<&dyn SedObject> {
                [optional_child(&self.x_axis), optional_child(&self.y_axis)]
                    .into_iter()
                    .flatten()
                    .collect()
            }

            fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
                [
                    optional_child_mut(&mut self.x_axis),
                    optional_child_mut(&mut self.y_axis),
                ]
                .into_iter()
                .flatten()
                .collect()
            }
        }
    };
}

task_plot!(SedWaterfallPlot, TypeCode::WaterfallPlot, "waterfallPlot", task_ref: "taskRef");

task_plot!(
    SedParameterEstimationResultPlot,
    TypeCode::ParameterEstimationResultPlot,
    "parameterEstimationResultPlot",
    task_reference: "taskReference"
);

/// A report of the fitted parameter values of a parameter estimation task.
#[derive(Debug, Clone, PartialEq)]
pub struct SedParameterEstimationReport {
    base: SedBase,
    task_reference: Option<String>,
}

impl SedParameterEstimationReport {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedParameterEstimationReport {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            task_reference: None,
        }
    }
}

sed_constructors!(SedParameterEstimationReport);

sed_attributes!(SedParameterEstimationReport {
    task_reference: sidref("taskReference"),
});

impl SedObject for SedParameterEstimationReport {
    sed_object_common!(
        TypeCode::ParameterEstimationReport,
        "parameterEstimationReport",
        required: ["id", "taskReference"]
    );
}

sed_variants! {
    /// Any of the output kinds of `listOfOutputs`.
    SedOutput, SedOutputMut, TypeCode::Output, "listOfOutputs" {
        Report(SedReport) = "report",
        Plot2D(SedPlot2D) = "plot2D",
        Plot3D(SedPlot3D) = "plot3D",
        Figure(SedFigure) = "figure",
        WaterfallPlot(SedWaterfallPlot) = "waterfallPlot",
        ParameterEstimationReport(SedParameterEstimationReport) = "parameterEstimationReport",
        ParameterEstimationResultPlot(SedParameterEstimationResultPlot) = "parameterEstimationResultPlot",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::ListItem;

    #[test]
    fn test_data_set_label_is_required() {
        let mut data_set = SedDataSet::default();
        data_set.set_id("ds1").expect("Invalid id");
        data_set.set_label("Label").expect("Failed to set label");
        data_set
            .set_data_reference("var1")
            .expect("Invalid data reference");
        assert!(data_set.has_required_attributes());

        data_set.unset_label().expect("Failed to unset label");
        assert!(!data_set.has_required_attributes());
    }

    #[test]
    fn test_report_owns_data_sets() {
        let mut report = SedReport::default();
        report.set_id("report1").expect("Invalid id");
        report
            .create_data_set()
            .expect("Failed to create data set")
            .set_id("ds1")
            .expect("Invalid id");

        let output = SedOutput::from(report);
        assert!(output.is_report());
        let data_set = output.element_by_sid("ds1").expect("Missing data set");
        assert!(data_set.base().parent_link().has_ancestor(TypeCode::Report));
    }

    #[test]
    fn test_output_kinds_by_element_name() {
        let namespaces = SedNamespaces::default();
        for (name, type_code) in [
            ("report", TypeCode::Report),
            ("plot2D", TypeCode::Plot2D),
            ("plot3D", TypeCode::Plot3D),
            ("figure", TypeCode::Figure),
            ("waterfallPlot", TypeCode::WaterfallPlot),
            ("parameterEstimationReport", TypeCode::ParameterEstimationReport),
            ("parameterEstimationResultPlot", TypeCode::ParameterEstimationResultPlot),
        ] {
            let output = SedOutput::create_item(name, &namespaces).expect("Unknown kind");
            assert_eq!(output.type_code(), type_code);
        }
        assert!(SedOutput::create_item("curve", &namespaces).is_none());
    }

    #[test]
    fn test_plot_axes_and_curve_kinds() {
        let mut plot = SedPlot2D::default();
        plot.set_id("plot1").expect("Invalid id");
        plot.create_shaded_area().expect("Failed to create shaded area");
        plot.create_curve().expect("Failed to create curve");
        plot.create_right_y_axis()
            .set_axis_type("log10")
            .expect("Failed to set type");
        plot.create_x_axis()
            .set_axis_type("linear")
            .expect("Failed to set type");

        let names: Vec<&str> = plot
            .children()
            .into_iter()
            .map(|child| child.element_name())
            .collect();
        assert_eq!(names, ["xAxis", "rightYAxis", "listOfCurves"]);
        assert!(matches!(plot.get_curve(0), Some(SedAbstractCurve::ShadedArea(_))));
        assert!(plot.get_curve(1).is_some_and(SedAbstractCurve::is_curve));
    }

    #[test]
    fn test_task_plots_name_their_task() {
        let mut plot = SedWaterfallPlot::default();
        plot.set_id("waterfall").expect("Invalid id");
        assert!(!plot.has_required_attributes());
        plot.set_task_ref("scan").expect("Invalid reference");
        assert!(plot.has_required_attributes());
        assert_eq!(
            plot.get_attribute("taskRef"),
            Some(crate::attribute::AttributeValue::from("scan"))
        );

        let mut result = SedParameterEstimationResultPlot::default();
        result.set_id("fit_plot").expect("Invalid id");
        result.set_task_reference("fit").expect("Invalid reference");
        assert!(result.has_required_attributes());
        assert_eq!(result.create_y_axis().element_name(), "yAxis");
    }
}
