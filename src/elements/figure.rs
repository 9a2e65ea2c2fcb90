//! Figures arrange plots on a grid.

use crate::base::{ReadContext, SedBase, SedObject};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;

/// An output laying out other plots in `numRows` by `numCols` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SedFigure {
    base: SedBase,
    num_rows: Option<i32>,
    num_cols: Option<i32>,
    sub_plots: SedListOf<SedSubPlot>,
}

impl SedFigure {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut figure = SedFigure {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            num_rows: None,
            num_cols: None,
            sub_plots: SedListOf::with_namespaces(namespaces),
        };
        figure.connect_to_child();
        figure
    }
}

sed_constructors!(SedFigure);

sed_attributes!(SedFigure {
    num_rows: int("numRows"),
    num_cols: int("numCols"),
});

sed_child_lists!(SedFigure {
    sub_plots: SedSubPlot => sub_plot [create],
});

impl SedObject for SedFigure {
    sed_object_common!(TypeCode::Figure, "figure", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        (name == "listOfSubPlots").then_some(&mut self.sub_plots as &mut dyn SedObject)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.sub_plots as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.sub_plots as &mut dyn SedObject]
    }
}

/// Places one plot in a cell of a figure, optionally spanning several.
#[derive(Debug, Clone, PartialEq)]
pub struct SedSubPlot {
    base: SedBase,
    plot: Option<String>,
    row: Option<i32>,
    col: Option<i32>,
    row_span: Option<i32>,
    col_span: Option<i32>,
}

impl SedSubPlot {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedSubPlot {
            base: SedBase::new(namespaces),
            plot: None,
            row: None,
            col: None,
            row_span: None,
            col_span: None,
        }
    }
}

sed_constructors!(SedSubPlot);

sed_attributes!(SedSubPlot {
    plot: sidref("plot"),
    row: int("row"),
    col: int("col"),
    row_span: int("rowSpan"),
    col_span: int("colSpan"),
});

sed_list_item!(SedSubPlot, "listOfSubPlots", TypeCode::SubPlot, "subPlot");

impl SedObject for SedSubPlot {
    sed_object_common!(TypeCode::SubPlot, "subPlot", required: ["plot", "row", "col"]);
}
