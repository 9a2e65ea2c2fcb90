//! External data files and the slices of them a simulation experiment uses.

use crate::base::{write_object, ReadContext, SedBase, SedObject};
use crate::error::{SedIoError, SedOperationError, SedResult};
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;
use crate::xml::{XmlInputStream, XmlNode, XmlOutputStream};

/// A reference to an external data file.
///
/// The NuML `dimensionDescription` describing the file's layout is kept as
/// free-form XML.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDataDescription {
    base: SedBase,
    format: Option<String>,
    source: Option<String>,
    dimension_description: Option<XmlNode>,
    data_sources: SedListOf<SedDataSource>,
}

impl SedDataDescription {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut description = SedDataDescription {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            format: None,
            source: None,
            dimension_description: None,
            data_sources: SedListOf::with_namespaces(namespaces),
        };
        description.connect_to_child();
        description
    }

    pub fn dimension_description(&self) -> Option<&XmlNode> {
        self.dimension_description.as_ref()
    }

    pub fn is_set_dimension_description(&self) -> bool {
        self.dimension_description.is_some()
    }

    /// Fails with `InvalidObject` unless `node` is a `dimensionDescription` element.
    pub fn set_dimension_description(&mut self, node: XmlNode) -> SedResult {
        if !node.is_element() || node.local_name() != "dimensionDescription" {
            return Err(SedOperationError::InvalidObject);
        }
        self.dimension_description = Some(node);
        Ok(())
    }

    pub fn unset_dimension_description(&mut self) -> SedResult {
        self.dimension_description = None;
        Ok(())
    }
}

sed_constructors!(SedDataDescription);

sed_attributes!(SedDataDescription {
    format: string("format"),
    source: string("source"),
});

sed_child_lists!(SedDataDescription {
    data_sources: SedDataSource => data_source [create],
});

sed_list_item!(
    SedDataDescription,
    "listOfDataDescriptions",
    TypeCode::DataDescription,
    "dataDescription"
);

impl SedObject for SedDataDescription {
    sed_object_common!(
        TypeCode::DataDescription,
        "dataDescription",
        required: ["id"]
    );

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        (name == "listOfDataSources").then_some(&mut self.data_sources as &mut dyn SedObject)
    }

    fn read_other_xml(&mut self, stream: &mut XmlInputStream, _ctx: &mut ReadContext<'_>) -> bool {
        let uri = match stream.peek_start() {
            Some(start) if start.local_name == "dimensionDescription" => start.uri.clone(),
            _ => return false,
        };
        self.dimension_description = stream.read_node().map(|node| {
            if uri.is_empty() {
                node
            } else {
                super::declare_namespace(node, &uri)
            }
        });
        true
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.base.write_elements(stream)?;
        if let Some(node) = &self.dimension_description {
            stream.write_node(node)?;
        }
        write_object(&self.data_sources, stream)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.data_sources as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.data_sources as &mut dyn SedObject]
    }
}

/// A named selection of the described data, narrowed by slices.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDataSource {
    base: SedBase,
    index_set: Option<String>,
    slices: SedListOf<SedSlice>,
}

impl SedDataSource {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut source = SedDataSource {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, true),
            index_set: None,
            slices: SedListOf::with_namespaces(namespaces),
        };
        source.connect_to_child();
        source
    }
}

sed_constructors!(SedDataSource);

sed_attributes!(SedDataSource {
    index_set: sidref("indexSet"),
});

sed_child_lists!(SedDataSource {
    slices: SedSlice => slice [create],
});

sed_list_item!(SedDataSource, "listOfDataSources", TypeCode::DataSource, "dataSource");

impl SedObject for SedDataSource {
    sed_object_common!(TypeCode::DataSource, "dataSource", required: ["id"]);

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        (name == "listOfSlices").then_some(&mut self.slices as &mut dyn SedObject)
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.slices as &dyn SedObject]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.slices as &mut dyn SedObject]
    }
}

/// Fixes one dimension of the data, either to a single `value` or, when
/// `index` is set, to the range `startIndex..=endIndex` of it.
#[derive(Debug, Clone, PartialEq)]
pub struct SedSlice {
    base: SedBase,
    reference: Option<String>,
    value: Option<String>,
    index: Option<String>,
    start_index: Option<i32>,
    end_index: Option<i32>,
}

impl SedSlice {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedSlice {
            base: SedBase::new(namespaces),
            reference: None,
            value: None,
            index: None,
            start_index: None,
            end_index: None,
        }
    }
}

sed_constructors!(SedSlice);

sed_attributes!(SedSlice {
    reference: sidref("reference"),
    value: string("value"),
    index: sidref("index"),
    start_index: int("startIndex"),
    end_index: int("endIndex"),
});

sed_list_item!(SedSlice, "listOfSlices", TypeCode::Slice, "slice");

impl SedObject for SedSlice {
    sed_object_common!(TypeCode::Slice, "slice", required: ["reference", "value"]);
}
