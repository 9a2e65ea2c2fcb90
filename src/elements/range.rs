//! Ranges iterated by a repeated task.

use log::debug;

use crate::attribute::{format_double, parse_double};
use crate::base::{write_child_objects, ReadContext, SedBase, SedObject};
use crate::elements::{math_node, read_math, SedParameter, SedVariable};
use crate::error::{SedIoError, SedResult};
use crate::errorlog::SedErrorCode;
use crate::list::SedListOf;
use crate::namespaces::SedNamespaces;
use crate::typecode::TypeCode;
use crate::xml::{XmlInputStream, XmlNode, XmlOutputStream};

/// `numberOfSteps` evenly spaced points from `start` to `end`.
///
/// `type` is either `linear` or `log`. Like the time course, the step count
/// is spelled `numberOfPoints` before Version 4.
#[derive(Debug, Clone, PartialEq)]
pub struct SedUniformRange {
    base: SedBase,
    start: Option<f64>,
    end: Option<f64>,
    number_of_steps: Option<i32>,
    range_type: Option<String>,
}

impl SedUniformRange {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedUniformRange {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, false),
            start: None,
            end: None,
            number_of_steps: None,
            range_type: None,
        }
    }
}

sed_constructors!(SedUniformRange);

sed_attributes!(SedUniformRange {
    start: double("start"),
    end: double("end"),
    range_type: string("type"),
    number_of_steps: steps("numberOfSteps"),
});

impl SedObject for SedUniformRange {
    sed_object_common!(
        TypeCode::UniformRange,
        "uniformRange",
        required: ["id", "start", "end", "numberOfSteps", "type"]
    );
}

/// An explicit list of values, each written as a `<value>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct SedVectorRange {
    base: SedBase,
    values: Vec<f64>,
}

impl SedVectorRange {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedVectorRange {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, false),
            values: Vec::new(),
        }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn num_values(&self) -> usize {
        self.values.len()
    }

    pub fn set_values(&mut self, values: Vec<f64>) -> SedResult {
        self.values = values;
        Ok(())
    }

    pub fn append_value(&mut self, value: f64) -> SedResult {
        self.values.push(value);
        Ok(())
    }

    pub fn clear_values(&mut self) -> SedResult {
        self.values.clear();
        Ok(())
    }
}

sed_constructors!(SedVectorRange);

sed_attributes!(SedVectorRange {});

impl SedObject for SedVectorRange {
    sed_object_common!(TypeCode::VectorRange, "vectorRange", required: ["id"]);

    fn read_other_xml(&mut self, stream: &mut XmlInputStream, ctx: &mut ReadContext<'_>) -> bool {
        let (line, column) = match stream.peek_start() {
            Some(start) if start.local_name == "value" => (start.line, start.column),
            _ => return false,
        };

        let text = stream.read_element_text().unwrap_or_default();
        match parse_double(&text) {
            Some(value) => self.values.push(value),
            None => ctx.log_error(
                SedErrorCode::NotSchemaConformant,
                &format!("The <value> '{}' of a <vectorRange> is not a double.", text.trim()),
                line,
                column,
            ),
        }
        true
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.base.write_elements(stream)?;
        for value in &self.values {
            stream.write_text_element("value", &format_double(*value))?;
        }
        Ok(())
    }
}

/// Values computed from another range by a math expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SedFunctionalRange {
    base: SedBase,
    range: Option<String>,
    variables: SedListOf<SedVariable>,
    parameters: SedListOf<SedParameter>,
    math: Option<XmlNode>,
}

impl SedFunctionalRange {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        let mut range = SedFunctionalRange {
            base: SedBase::new(namespaces.clone()).with_identity_pre_v4(true, false),
            range: None,
            variables: SedListOf::with_namespaces(namespaces.clone()),
            parameters: SedListOf::with_namespaces(namespaces),
            math: None,
        };
        range.connect_to_child();
        range
    }
}

sed_constructors!(SedFunctionalRange);

sed_attributes!(SedFunctionalRange {
    range: sidref("range"),
});

sed_child_lists!(SedFunctionalRange {
    variables: SedVariable => variable [create],
    parameters: SedParameter => parameter [create],
});

sed_math!(SedFunctionalRange);

impl SedObject for SedFunctionalRange {
    sed_object_common!(
        TypeCode::FunctionalRange,
        "functionalRange",
        required: ["id", "range"]
    );

    fn has_required_elements(&self) -> bool {
        self.math.is_some()
    }

    fn create_object(&mut self, name: &str, _ctx: &mut ReadContext<'_>) -> Option<&mut dyn SedObject> {
        match name {
            "listOfVariables" => Some(&mut self.variables),
            "listOfParameters" => Some(&mut self.parameters),
            _ => None,
        }
    }

    /// Accepts the math either wrapped in `<function>` or bare.
    fn read_other_xml(&mut self, stream: &mut XmlInputStream, ctx: &mut ReadContext<'_>) -> bool {
        if stream.peek_name() != Some("function") {
            return read_math(stream, &mut self.math, ctx);
        }

        if let Some(function) = stream.read_node() {
            let math = function
                .children()
                .iter()
                .find(|child| child.is_element() && child.local_name() == "math");
            match math {
                Some(math) => self.math = math_node(math.clone()).ok(),
                None => debug!("<function> of a functionalRange holds no math"),
            }
        }
        true
    }

    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        write_child_objects(&self.base, &self.children(), stream)?;
        if let Some(math) = &self.math {
            stream.start_element("function")?;
            stream.write_node(math)?;
            stream.end_element("function")?;
        }
        Ok(())
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        vec![&self.variables as &dyn SedObject, &self.parameters]
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        vec![&mut self.variables as &mut dyn SedObject, &mut self.parameters]
    }
}

/// Iterates over the values of a data source.
#[derive(Debug, Clone, PartialEq)]
pub struct SedDataRange {
    base: SedBase,
    source_reference: Option<String>,
}

impl SedDataRange {
    pub fn with_namespaces(namespaces: SedNamespaces) -> Self {
        SedDataRange {
            base: SedBase::new(namespaces).with_identity_pre_v4(true, true),
            source_reference: None,
        }
    }
}

sed_constructors!(SedDataRange);

sed_attributes!(SedDataRange {
    source_reference: sidref("sourceReference"),
});

impl SedObject for SedDataRange {
    sed_object_common!(
        TypeCode::DataRange,
        "dataRange",
        required: ["id", "sourceReference"]
    );
}

sed_variants! {
    /// Any of the range kinds of `listOfRanges`.
    SedRange, SedRangeMut, TypeCode::Range, "listOfRanges" {
        UniformRange(SedUniformRange) = "uniformRange",
        VectorRange(SedVectorRange) = "vectorRange",
        FunctionalRange(SedFunctionalRange) = "functionalRange",
        DataRange(SedDataRange) = "dataRange",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{read_object, write_object};
    use crate::attribute::AttributeValue;
    use crate::errorlog::SedErrorLog;
    use pretty_assertions::assert_eq;

    fn read_into(object: &mut dyn SedObject, xml: &str) -> SedErrorLog {
        let mut log = SedErrorLog::new();
        let mut stream = XmlInputStream::new(xml);
        let mut ctx = ReadContext::new(&mut log, 1, 4);
        read_object(object, &mut stream, &mut ctx);
        log
    }

    #[test]
    fn test_vector_range_values() {
        let mut range = SedVectorRange::default();
        let log = read_into(
            &mut range,
            r#"<vectorRange id="v"><value>1</value><value> 2.5 </value><value>x</value></vectorRange>"#,
        );

        assert_eq!(range.values(), [1.0, 2.5]);
        assert!(log.contains(SedErrorCode::NotSchemaConformant));

        let mut stream = XmlOutputStream::compact();
        write_object(&range, &mut stream).expect("Failed to write");
        assert_eq!(
            stream.finish().expect("Failed to finish"),
            r#"<vectorRange id="v"><value>1</value><value>2.5</value></vectorRange>"#
        );
    }

    #[test]
    fn test_functional_range_reads_wrapped_and_bare_math() {
        let wrapped = r#"<functionalRange id="f" range="r"><function><math xmlns="http://www.w3.org/1998/Math/MathML"><ci>x</ci></math></function></functionalRange>"#;
        let bare = r#"<functionalRange id="f" range="r"><math xmlns="http://www.w3.org/1998/Math/MathML"><ci>x</ci></math></functionalRange>"#;

        let mut from_wrapped = SedFunctionalRange::default();
        assert!(read_into(&mut from_wrapped, wrapped).is_empty());
        let mut from_bare = SedFunctionalRange::default();
        assert!(read_into(&mut from_bare, bare).is_empty());

        assert!(from_wrapped.has_required_elements());
        assert_eq!(from_wrapped.math(), from_bare.math());

        let mut stream = XmlOutputStream::compact();
        write_object(&from_bare, &mut stream).expect("Failed to write");
        assert_eq!(stream.finish().expect("Failed to finish"), wrapped);
    }

    #[test]
    fn test_uniform_range_required_attributes() {
        let mut range = SedUniformRange::new(1, 3).expect("Invalid namespaces");
        range.set_id("r").expect("Ranges carry ids before Version 4");
        range.set_start(0.0).expect("Failed to set start");
        range.set_end(10.0).expect("Failed to set end");
        range.set_number_of_steps(10).expect("Failed to set steps");
        assert!(!range.has_required_attributes());

        range.set_range_type("linear").expect("Failed to set type");
        assert!(range.has_required_attributes());
        assert!(range.set_name("R").is_err());
    }

    #[test]
    fn test_uniform_range_points_before_version_4() {
        let xml = r#"<uniformRange id="r" start="0" end="10" type="linear" numberOfPoints="10"/>"#;
        let mut range = SedUniformRange::new(1, 3).expect("Invalid namespaces");
        assert!(read_into(&mut range, xml).is_empty());
        assert_eq!(range.number_of_steps(), 10);

        let mut stream = XmlOutputStream::compact();
        write_object(&range, &mut stream).expect("Failed to write");
        assert_eq!(stream.finish().expect("Failed to finish"), xml);

        let mut current = SedUniformRange::default();
        let log = read_into(&mut current, r#"<uniformRange id="r" start="0" end="10" type="linear" numberOfSteps="4"/>"#);
        assert!(log.is_empty());
        assert_eq!(current.number_of_points(), 4);
    }

    #[test]
    fn test_points_spelling_is_reflected() {
        let mut range = SedUniformRange::default();
        range
            .set_attribute("numberOfPoints", &AttributeValue::Int(7))
            .expect("Failed to set steps");

        assert_eq!(range.number_of_steps(), 7);
        assert!(range.is_set_attribute("numberOfSteps"));
        assert!(range.is_set_attribute("numberOfPoints"));
        assert_eq!(
            range.get_attribute("numberOfSteps"),
            Some(AttributeValue::Int(7))
        );
    }

    #[test]
    fn test_data_range() {
        let mut range = SedDataRange::default();
        let log = read_into(
            &mut range,
            r#"<dataRange id="times" sourceReference="time_source"/>"#,
        );

        assert!(log.is_empty(), "{log}");
        assert_eq!(range.source_reference(), "time_source");
        assert!(range.has_required_attributes());
        assert!(SedRange::from(range).is_data_range());
    }
}
