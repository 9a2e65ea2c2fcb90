//! The contract every SED-ML object implements.
//!
//! [`SedBase`] holds what all elements share: identity (`id`, `name`,
//! `metaid`), notes, annotation, namespaces, source position and the link
//! to the enclosing element. [`SedObject`] is the capability set built on
//! top of it: type code, element name, attribute vocabulary, reading and
//! writing, child traversal and parent linkage.
//!
//! Reading and writing are driven by [`read_object`] and [`write_object`],
//! which call the hooks of the trait in document order.

use std::fmt;

use log::debug;

use crate::attribute::AttributeValue;
use crate::error::{SedIoError, SedOperationError, SedResult};
use crate::errorlog::{SedErrorCode, SedErrorLog};
use crate::namespaces::SedNamespaces;
use crate::syntax::{is_valid_sid, is_valid_xml_id};
use crate::typecode::TypeCode;
use crate::visitor::SedVisitor;
use crate::xml::{ExpectedAttributes, XmlAttributes, XmlInputStream, XmlNode, XmlOutputStream, XmlToken};

/// Level and version of the document an object is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentLink {
    pub level: u32,
    pub version: u32,
}

/// One enclosing element of an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    pub type_code: TypeCode,
    pub element_name: String,
}

/// Non-owning description of where an object sits in a tree.
///
/// Objects own their children outright; the way up is stored as a value
/// (the chain of enclosing element kinds and the document release) rather
/// than as a pointer, so it can neither dangle nor form cycles. The link is
/// refreshed by [`SedObject::connect_to_parent`] whenever the tree changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentLink {
    ancestors: Vec<Ancestor>,
    document: Option<DocumentLink>,
}

impl ParentLink {
    /// The link handed to the direct children of a document.
    pub fn document_root(level: u32, version: u32) -> Self {
        ParentLink {
            ancestors: vec![Ancestor {
                type_code: TypeCode::Document,
                element_name: "sedML".to_string(),
            }],
            document: Some(DocumentLink { level, version }),
        }
    }

    /// The link of a child of the element described by `parent`.
    pub fn child(&self, type_code: TypeCode, element_name: &str) -> Self {
        let mut link = self.clone();
        link.ancestors.push(Ancestor {
            type_code,
            element_name: element_name.to_string(),
        });
        link
    }

    /// The immediate parent, if any.
    pub fn parent(&self) -> Option<&Ancestor> {
        self.ancestors.last()
    }

    /// Enclosing elements, outermost first.
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.ancestors
    }

    pub fn document(&self) -> Option<DocumentLink> {
        self.document
    }

    pub fn is_in_document(&self) -> bool {
        self.document.is_some()
    }

    pub fn is_detached(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Whether any enclosing element is of kind `type_code`.
    pub fn has_ancestor(&self, type_code: TypeCode) -> bool {
        self.ancestors
            .iter()
            .any(|ancestor| ancestor.type_code == type_code)
    }
}

/// Parse-time context threaded through every read hook.
///
/// Diagnostics go to the log of the document being read; there is no
/// process-wide log.
pub struct ReadContext<'a> {
    log: &'a mut SedErrorLog,
    level: u32,
    version: u32,
}

impl<'a> ReadContext<'a> {
    pub fn new(log: &'a mut SedErrorLog, level: u32, version: u32) -> Self {
        ReadContext {
            log,
            level,
            version,
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub(crate) fn set_level_version(&mut self, level: u32, version: u32) {
        self.level = level;
        self.version = version;
    }

    pub fn log_error(&mut self, code: SedErrorCode, details: &str, line: usize, column: usize) {
        self.log
            .log_error(code, details, line, column, self.level, self.version);
    }

    pub fn log(&self) -> &SedErrorLog {
        &*self.log
    }
}

/// State shared by every SED-ML object.
#[derive(Clone, Default)]
pub struct SedBase {
    id: Option<String>,
    name: Option<String>,
    metaid: Option<String>,
    notes: Option<XmlNode>,
    annotation: Option<XmlNode>,
    namespaces: SedNamespaces,
    id_allowed_pre_v4: bool,
    name_allowed_pre_v4: bool,
    line: usize,
    column: usize,
    parent: ParentLink,
}

impl SedBase {
    pub fn new(namespaces: SedNamespaces) -> Self {
        SedBase {
            namespaces,
            ..Default::default()
        }
    }

    /// Marks `id` and `name` as allowed before Level 1 Version 4.
    ///
    /// Until Version 4 only some elements carried an identity. On the others
    /// `set_id`/`set_name` are rejected and the attributes are neither
    /// reported nor written.
    pub fn with_identity_pre_v4(mut self, id: bool, name: bool) -> Self {
        self.id_allowed_pre_v4 = id;
        self.name_allowed_pre_v4 = name;
        self
    }

    pub fn level(&self) -> u32 {
        self.namespaces.level()
    }

    pub fn version(&self) -> u32 {
        self.namespaces.version()
    }

    pub fn namespaces(&self) -> &SedNamespaces {
        &self.namespaces
    }

    pub fn namespaces_mut(&mut self) -> &mut SedNamespaces {
        &mut self.namespaces
    }

    pub(crate) fn set_namespaces(&mut self, namespaces: SedNamespaces) {
        self.namespaces = namespaces;
    }

    fn pre_v4(&self) -> bool {
        self.level() == 1 && self.version() < 4
    }

    fn id_allowed(&self) -> bool {
        self.id_allowed_pre_v4 || !self.pre_v4()
    }

    fn name_allowed(&self) -> bool {
        self.name_allowed_pre_v4 || !self.pre_v4()
    }

    /// The `id`, or an empty string when unset or not allowed in this version.
    pub fn id(&self) -> &str {
        match &self.id {
            Some(id) if self.id_allowed() => id,
            _ => "",
        }
    }

    pub fn is_set_id(&self) -> bool {
        !self.id().is_empty()
    }

    /// Sets the `id`. An empty string unsets it.
    ///
    /// # Returns
    ///
    /// `InvalidAttributeValue` for a malformed identifier and
    /// `UnexpectedAttribute` when the element had no `id` in this version.
    pub fn set_id(&mut self, id: &str) -> SedResult {
        if id.is_empty() {
            self.id = None;
            return Ok(());
        }
        if !is_valid_sid(id) {
            return Err(SedOperationError::InvalidAttributeValue);
        }
        if !self.id_allowed() {
            return Err(SedOperationError::UnexpectedAttribute);
        }
        self.id = Some(id.to_string());
        Ok(())
    }

    pub fn unset_id(&mut self) -> SedResult {
        self.id = None;
        Ok(())
    }

    pub fn name(&self) -> &str {
        match &self.name {
            Some(name) if self.name_allowed() => name,
            _ => "",
        }
    }

    pub fn is_set_name(&self) -> bool {
        !self.name().is_empty()
    }

    pub fn set_name(&mut self, name: &str) -> SedResult {
        if name.is_empty() {
            self.name = None;
            return Ok(());
        }
        if !self.name_allowed() {
            return Err(SedOperationError::UnexpectedAttribute);
        }
        self.name = Some(name.to_string());
        Ok(())
    }

    pub fn unset_name(&mut self) -> SedResult {
        self.name = None;
        Ok(())
    }

    pub fn metaid(&self) -> &str {
        self.metaid.as_deref().unwrap_or("")
    }

    pub fn is_set_metaid(&self) -> bool {
        self.metaid.is_some()
    }

    pub fn set_metaid(&mut self, metaid: &str) -> SedResult {
        if metaid.is_empty() {
            self.metaid = None;
            return Ok(());
        }
        if !is_valid_xml_id(metaid) {
            return Err(SedOperationError::InvalidAttributeValue);
        }
        self.metaid = Some(metaid.to_string());
        Ok(())
    }

    pub fn unset_metaid(&mut self) -> SedResult {
        self.metaid = None;
        Ok(())
    }

    /// The `<notes>` element, wrapper included.
    pub fn notes(&self) -> Option<&XmlNode> {
        self.notes.as_ref()
    }

    pub fn is_set_notes(&self) -> bool {
        self.notes.is_some()
    }

    /// Sets the notes. Content that is not a `<notes>` element is wrapped in one.
    pub fn set_notes(&mut self, notes: XmlNode) -> SedResult {
        self.notes = Some(wrap(notes, "notes")?);
        Ok(())
    }

    /// Parses `notes` as XML and sets it.
    pub fn set_notes_string(&mut self, notes: &str) -> SedResult {
        let node = XmlNode::parse(notes).map_err(|_| SedOperationError::InvalidObject)?;
        self.set_notes(node)
    }

    /// The notes serialized, or an empty string.
    pub fn notes_string(&self) -> String {
        node_string(self.notes.as_ref())
    }

    pub fn unset_notes(&mut self) -> SedResult {
        self.notes = None;
        Ok(())
    }

    /// The `<annotation>` element, wrapper included.
    pub fn annotation(&self) -> Option<&XmlNode> {
        self.annotation.as_ref()
    }

    pub fn is_set_annotation(&self) -> bool {
        self.annotation.is_some()
    }

    pub fn set_annotation(&mut self, annotation: XmlNode) -> SedResult {
        self.annotation = Some(wrap(annotation, "annotation")?);
        Ok(())
    }

    pub fn set_annotation_string(&mut self, annotation: &str) -> SedResult {
        let node = XmlNode::parse(annotation).map_err(|_| SedOperationError::InvalidObject)?;
        self.set_annotation(node)
    }

    pub fn annotation_string(&self) -> String {
        node_string(self.annotation.as_ref())
    }

    /// Adds content to the annotation, creating it when missing.
    ///
    /// The children of an `<annotation>` argument are appended one by one;
    /// any other element is appended as a single child.
    pub fn append_annotation(&mut self, annotation: XmlNode) -> SedResult {
        if !annotation.is_element() {
            return Err(SedOperationError::InvalidObject);
        }

        let target = self
            .annotation
            .get_or_insert_with(|| XmlNode::element("annotation"));
        if annotation.local_name() == "annotation" {
            for child in annotation.children() {
                target.add_child(child.clone());
            }
        } else {
            target.add_child(annotation);
        }
        Ok(())
    }

    pub fn unset_annotation(&mut self) -> SedResult {
        self.annotation = None;
        Ok(())
    }

    /// Line of the start tag this object was read from, 0 when built in code.
    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub(crate) fn set_position(&mut self, line: usize, column: usize) {
        self.line = line;
        self.column = column;
    }

    pub fn parent_link(&self) -> &ParentLink {
        &self.parent
    }

    pub(crate) fn set_parent_link(&mut self, parent: ParentLink) {
        self.parent = parent;
    }

    pub fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        // id and name are declared for every version; pre-V4 use is handled by the accessors
        expected.add("metaid");
        expected.add("id");
        expected.add("name");
    }

    /// Reads `id`, `name` and `metaid` and reports attributes missing from `expected`.
    pub fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        ctx: &mut ReadContext<'_>,
        element: &str,
        type_code: TypeCode,
    ) {
        let (line, column) = (self.line, self.column);

        for attribute in attributes.iter() {
            let known = if attribute.prefix.is_empty() {
                expected.has(&attribute.name)
            } else {
                expected.has(&attribute.qualified_name())
                    || attribute.uri == "http://www.w3.org/2001/XMLSchema-instance"
            };

            if !known {
                ctx.log_error(
                    SedErrorCode::allowed_attributes(type_code),
                    &format!(
                        "Attribute '{}' is not part of the definition of a SED-ML Level {} Version {} <{element}> element.",
                        attribute.name,
                        ctx.level(),
                        ctx.version()
                    ),
                    line,
                    column,
                );
            }
        }

        if let Some(id) = attributes.get("id") {
            if id.is_empty() {
                log_empty_string(ctx, "id", element, line, column);
                self.id = None;
            } else {
                if !is_valid_sid(id) {
                    ctx.log_error(
                        SedErrorCode::IdSyntaxRule,
                        &format!(
                            "The id on the <{element}> is '{id}', which does not conform to the syntax."
                        ),
                        line,
                        column,
                    );
                }
                self.id = Some(id.to_string());
            }
        }

        if let Some(name) = attributes.get("name") {
            if name.is_empty() {
                log_empty_string(ctx, "name", element, line, column);
                self.name = None;
            } else {
                self.name = Some(name.to_string());
            }
        }

        if let Some(metaid) = attributes.get("metaid") {
            if metaid.is_empty() {
                log_empty_string(ctx, "metaid", element, line, column);
                self.metaid = None;
            } else {
                if !is_valid_xml_id(metaid) {
                    ctx.log_error(
                        SedErrorCode::InvalidMetaidSyntax,
                        &format!("The metaid '{metaid}' does not conform to the syntax."),
                        line,
                        column,
                    );
                }
                self.metaid = Some(metaid.to_string());
            }
        }
    }

    /// Writes the identity attributes that are set and allowed in this version.
    pub fn write_attributes(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        if self.is_set_id() {
            stream.write_attribute("id", self.id());
        }
        if self.is_set_name() {
            stream.write_attribute("name", self.name());
        }
        if let Some(metaid) = &self.metaid {
            stream.write_attribute("metaid", metaid);
        }
        Ok(())
    }

    /// Writes notes and annotation, which precede all other children.
    pub fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        if let Some(notes) = &self.notes {
            stream.write_node(notes)?;
        }
        if let Some(annotation) = &self.annotation {
            stream.write_node(annotation)?;
        }
        Ok(())
    }

    pub fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        match name {
            "id" if self.is_set_id() => Some(self.id().into()),
            "name" if self.is_set_name() => Some(self.name().into()),
            "metaid" => self.metaid.clone().map(AttributeValue::from),
            _ => None,
        }
    }

    pub fn is_set_attribute(&self, name: &str) -> bool {
        match name {
            "id" => self.is_set_id(),
            "name" => self.is_set_name(),
            "metaid" => self.is_set_metaid(),
            _ => false,
        }
    }

    pub fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> SedResult {
        let value = crate::attribute::as_string(value)?;
        match name {
            "id" => self.set_id(value),
            "name" => self.set_name(value),
            "metaid" => self.set_metaid(value),
            _ => Err(SedOperationError::OperationFailed),
        }
    }

    pub fn unset_attribute(&mut self, name: &str) -> SedResult {
        match name {
            "id" => self.unset_id(),
            "name" => self.unset_name(),
            "metaid" => self.unset_metaid(),
            _ => Err(SedOperationError::OperationFailed),
        }
    }
}

impl fmt::Debug for SedBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SedBase")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("metaid", &self.metaid)
            .field("level", &self.level())
            .field("version", &self.version())
            .finish_non_exhaustive()
    }
}

/// Compares content only; source positions and parent links are ignored.
impl PartialEq for SedBase {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.metaid == other.metaid
            && self.notes == other.notes
            && self.annotation == other.annotation
            && self.namespaces == other.namespaces
    }
}

/// `node` itself when it is a `wrapper` element, otherwise `node` inside a new one.
pub(crate) fn wrap(node: XmlNode, wrapper: &str) -> Result<XmlNode, SedOperationError> {
    match node {
        XmlNode::Element { .. } if node.local_name() == wrapper => Ok(node),
        XmlNode::Element { .. } => Ok(XmlNode::element(wrapper).with_child(node)),
        XmlNode::Text(_) => Err(SedOperationError::InvalidObject),
    }
}

fn node_string(node: Option<&XmlNode>) -> String {
    node.and_then(|node| node.to_xml_string().ok())
        .unwrap_or_default()
}

fn log_empty_string(
    ctx: &mut ReadContext<'_>,
    attribute: &str,
    element: &str,
    line: usize,
    column: usize,
) {
    ctx.log_error(
        SedErrorCode::NotSchemaConformant,
        &format!("Attribute '{attribute}' on an <{element}> must not be an empty string."),
        line,
        column,
    );
}

/// The capability set of every SED-ML object.
///
/// Concrete elements, the closed enums over related elements, lists and the
/// document all implement it. The provided methods are written in terms of
/// [`children`](Self::children) and [`children_mut`](Self::children_mut),
/// which list owned sub-objects in schema order.
pub trait SedObject: fmt::Debug {
    fn base(&self) -> &SedBase;

    fn base_mut(&mut self) -> &mut SedBase;

    fn type_code(&self) -> TypeCode;

    /// Tag name of the element, for instance `dataSet`.
    fn element_name(&self) -> &str;

    /// Declared item type when this object is a list.
    fn list_item_type(&self) -> Option<TypeCode> {
        None
    }

    fn has_required_attributes(&self) -> bool {
        true
    }

    fn has_required_elements(&self) -> bool {
        true
    }

    fn add_expected_attributes(&self, expected: &mut ExpectedAttributes) {
        self.base().add_expected_attributes(expected);
    }

    fn read_attributes(
        &mut self,
        attributes: &XmlAttributes,
        expected: &ExpectedAttributes,
        ctx: &mut ReadContext<'_>,
    ) {
        let element = self.element_name().to_string();
        let type_code = self.type_code();
        self.base_mut()
            .read_attributes(attributes, expected, ctx, &element, type_code);
    }

    fn write_attributes(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        self.base().write_attributes(stream)
    }

    /// Writes notes, annotation and every child from [`children`](Self::children).
    fn write_elements(&self, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
        write_child_objects(self.base(), &self.children(), stream)
    }

    /// Creates the child for a nested element named `name`.
    fn create_object(
        &mut self,
        _name: &str,
        _ctx: &mut ReadContext<'_>,
    ) -> Option<&mut dyn SedObject> {
        None
    }

    /// Consumes free-form content (math, `newXML`, values) at the front of
    /// `stream`. Returns `false` if the next element is not handled here.
    fn read_other_xml(&mut self, _stream: &mut XmlInputStream, _ctx: &mut ReadContext<'_>) -> bool {
        false
    }

    /// Whether the object appears in the output at all.
    fn should_write(&self) -> bool {
        true
    }

    fn children(&self) -> Vec<&dyn SedObject> {
        Vec::new()
    }

    fn children_mut(&mut self) -> Vec<&mut dyn SedObject> {
        Vec::new()
    }

    /// The link given to the children of this object.
    fn child_link(&self) -> ParentLink {
        self.base()
            .parent_link()
            .child(self.type_code(), self.element_name())
    }

    fn connect_to_parent(&mut self, parent: &ParentLink) {
        self.base_mut().set_parent_link(parent.clone());
        self.connect_to_child();
    }

    /// Refreshes the links of the whole subtree.
    fn connect_to_child(&mut self) {
        let link = self.child_link();
        for child in self.children_mut() {
            child.connect_to_parent(&link);
        }
    }

    /// First object in the subtree whose `id` is `id`, depth-first in document order.
    fn element_by_sid(&self, id: &str) -> Option<&dyn SedObject> {
        if id.is_empty() {
            return None;
        }
        for child in self.children() {
            if child.base().id() == id {
                return Some(child);
            }
            if let Some(found) = child.element_by_sid(id) {
                return Some(found);
            }
        }
        None
    }

    /// First object in the subtree whose `metaid` is `metaid`.
    fn element_by_metaid(&self, metaid: &str) -> Option<&dyn SedObject> {
        if metaid.is_empty() {
            return None;
        }
        for child in self.children() {
            if child.base().metaid() == metaid {
                return Some(child);
            }
            if let Some(found) = child.element_by_metaid(metaid) {
                return Some(found);
            }
        }
        None
    }

    /// Every object of the subtree, lists included, in document order.
    fn all_elements(&self) -> Vec<&dyn SedObject> {
        self.all_elements_filtered(&|_| true)
    }

    fn all_elements_filtered(&self, filter: &dyn Fn(&dyn SedObject) -> bool) -> Vec<&dyn SedObject> {
        let mut elements = Vec::new();
        for child in self.children() {
            if filter(child) {
                elements.push(child);
            }
            elements.extend(child.all_elements_filtered(filter));
        }
        elements
    }

    fn get_attribute(&self, name: &str) -> Option<AttributeValue> {
        self.base().get_attribute(name)
    }

    fn is_set_attribute(&self, name: &str) -> bool {
        self.base().is_set_attribute(name)
    }

    /// Sets the attribute called `name` (its XML name).
    ///
    /// # Returns
    ///
    /// `OperationFailed` for names the element does not have,
    /// `InvalidAttributeValue` for values of the wrong type.
    fn set_attribute(&mut self, name: &str, value: &AttributeValue) -> SedResult {
        self.base_mut().set_attribute(name, value)
    }

    fn unset_attribute(&mut self, name: &str) -> SedResult {
        self.base_mut().unset_attribute(name)
    }

    fn id(&self) -> &str {
        self.base().id()
    }

    fn is_set_id(&self) -> bool {
        self.base().is_set_id()
    }

    fn set_id(&mut self, id: &str) -> SedResult {
        self.base_mut().set_id(id)
    }

    fn unset_id(&mut self) -> SedResult {
        self.base_mut().unset_id()
    }

    fn name(&self) -> &str {
        self.base().name()
    }

    fn is_set_name(&self) -> bool {
        self.base().is_set_name()
    }

    fn set_name(&mut self, name: &str) -> SedResult {
        self.base_mut().set_name(name)
    }

    fn unset_name(&mut self) -> SedResult {
        self.base_mut().unset_name()
    }

    fn metaid(&self) -> &str {
        self.base().metaid()
    }

    fn set_metaid(&mut self, metaid: &str) -> SedResult {
        self.base_mut().set_metaid(metaid)
    }

    fn level(&self) -> u32 {
        self.base().level()
    }

    fn version(&self) -> u32 {
        self.base().version()
    }

    /// Walks the subtree with `visitor`.
    fn accept(&self, visitor: &mut dyn SedVisitor)
    where
        Self: Sized,
    {
        crate::visitor::accept(self, visitor);
    }
}

/// Names of `required` attributes that are not set on `object`.
pub(crate) fn missing_attributes(
    object: &dyn SedObject,
    required: &[&'static str],
) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|name| !object.is_set_attribute(name))
        .collect()
}

/// Logs each missing required attribute with the element's attribute code.
pub(crate) fn log_missing_attributes(
    object: &dyn SedObject,
    required: &[&'static str],
    ctx: &mut ReadContext<'_>,
) {
    let type_code = object.type_code();
    for name in missing_attributes(object, required) {
        ctx.log_error(
            SedErrorCode::allowed_attributes(type_code),
            &format!(
                "Sedml attribute '{name}' is missing from the <Sed{}> element.",
                type_code.name()
            ),
            object.base().line(),
            object.base().column(),
        );
    }
}

/// Moves `object` and its whole subtree to `namespaces`.
pub(crate) fn apply_namespaces(object: &mut dyn SedObject, namespaces: &SedNamespaces) {
    object.base_mut().set_namespaces(namespaces.clone());
    for child in object.children_mut() {
        apply_namespaces(child, namespaces);
    }
}

/// Reads the element at the front of `stream` into `object`.
///
/// Attributes are read first, then each nested element is offered to
/// [`SedObject::create_object`] and [`SedObject::read_other_xml`]. Elements
/// nobody claims are reported and skipped.
pub fn read_object(
    object: &mut dyn SedObject,
    stream: &mut XmlInputStream,
    ctx: &mut ReadContext<'_>,
) {
    stream.skip_text();
    let start = match stream.next() {
        Some(XmlToken::Start(start)) => start,
        _ => return,
    };

    object.base_mut().set_position(start.line, start.column);
    let mut expected = ExpectedAttributes::new();
    object.add_expected_attributes(&mut expected);
    object.read_attributes(&start.attributes, &expected, ctx);
    ctx.set_level_version(object.base().level(), object.base().version());

    let mut seen_notes = false;
    let mut seen_annotation = false;

    loop {
        stream.skip_text();
        let (name, line, column) = match stream.peek() {
            Some(XmlToken::Start(child)) => (child.local_name.clone(), child.line, child.column),
            Some(XmlToken::End { .. }) => {
                stream.next();
                break;
            }
            Some(XmlToken::Text { .. }) => {
                stream.next();
                continue;
            }
            None => break,
        };

        match name.as_str() {
            "notes" => {
                if seen_notes {
                    ctx.log_error(
                        SedErrorCode::OnlyOneNotesElementAllowed,
                        &format!(
                            "Only one <notes> element is permitted inside a particular containing element. Another <notes> element was found for the <{}> element.",
                            object.element_name()
                        ),
                        line,
                        column,
                    );
                }
                seen_notes = true;
                if let Some(notes) = stream.read_node() {
                    object.base_mut().notes = Some(notes);
                }
            }
            "annotation" => {
                if seen_annotation {
                    ctx.log_error(
                        SedErrorCode::MultipleAnnotations,
                        &format!(
                            "Only one <annotation> element is permitted inside a particular containing element. Another <annotation> element was found for the <{}> element.",
                            object.element_name()
                        ),
                        line,
                        column,
                    );
                }
                seen_annotation = true;
                if let Some(annotation) = stream.read_node() {
                    object.base_mut().annotation = Some(annotation);
                }
            }
            _ => {
                if let Some(child) = object.create_object(&name, ctx) {
                    debug!("Reading <{name}> at {line}:{column}");
                    read_object(child, stream, ctx);
                    if child.list_item_type().is_some() && child.children().is_empty() {
                        ctx.log_error(
                            SedErrorCode::EmptyListElement,
                            &format!("{name} cannot be empty."),
                            line,
                            column,
                        );
                    }
                } else if !object.read_other_xml(stream, ctx) {
                    ctx.log_error(
                        SedErrorCode::UnrecognizedElement,
                        &format!(
                            "Element '{name}' is not part of the definition of SED-ML Level {} Version {}.",
                            ctx.level(),
                            ctx.version()
                        ),
                        line,
                        column,
                    );
                    stream.skip_past_end();
                }
            }
        }
    }
}

/// Writes `object` as an element: start tag, attributes, children, end tag.
pub fn write_object(object: &dyn SedObject, stream: &mut XmlOutputStream) -> Result<(), SedIoError> {
    if !object.should_write() {
        return Ok(());
    }

    let name = object.element_name();
    stream.start_element(name)?;
    object.write_attributes(stream)?;
    object.write_elements(stream)?;
    stream.end_element(name)
}

/// An optional single child as an entry of [`SedObject::children`].
pub(crate) fn optional_child<T: SedObject>(child: &Option<T>) -> Option<&dyn SedObject> {
    child.as_ref().map(|child| child as &dyn SedObject)
}

pub(crate) fn optional_child_mut<T: SedObject>(
    child: &mut Option<T>,
) -> Option<&mut dyn SedObject> {
    child.as_mut().map(|child| child as &mut dyn SedObject)
}

/// Writes notes and annotation of `base`, then each of `children`.
pub(crate) fn write_child_objects(
    base: &SedBase,
    children: &[&dyn SedObject],
    stream: &mut XmlOutputStream,
) -> Result<(), SedIoError> {
    base.write_elements(stream)?;
    for child in children {
        write_object(*child, stream)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rules_before_version_4() {
        let namespaces = SedNamespaces::new(1, 3).expect("Invalid namespaces");
        let mut base = SedBase::new(namespaces.clone());
        assert_eq!(base.set_id("a"), Err(SedOperationError::UnexpectedAttribute));
        assert_eq!(base.set_name("A"), Err(SedOperationError::UnexpectedAttribute));
        assert_eq!(base.set_id(""), Ok(()));

        let mut allowed = SedBase::new(namespaces).with_identity_pre_v4(true, true);
        assert_eq!(allowed.set_id("a"), Ok(()));
        assert_eq!(allowed.id(), "a");
    }

    #[test]
    fn test_set_id_validates_syntax() {
        let mut base = SedBase::default();
        assert_eq!(base.set_id("1x"), Err(SedOperationError::InvalidAttributeValue));
        assert!(!base.is_set_id());
        assert_eq!(base.set_id("x1"), Ok(()));
        assert_eq!(base.unset_id(), Ok(()));
        assert!(!base.is_set_id());
    }

    #[test]
    fn test_metaid_uses_xml_id_syntax() {
        let mut base = SedBase::default();
        assert_eq!(base.set_metaid("_m.1"), Ok(()));
        assert_eq!(
            base.set_metaid("1m"),
            Err(SedOperationError::InvalidAttributeValue)
        );
        assert_eq!(base.metaid(), "_m.1");
    }

    #[test]
    fn test_notes_are_wrapped() {
        let mut base = SedBase::default();
        base.set_notes(XmlNode::element("p").with_child(XmlNode::text("hi")))
            .expect("Failed to set notes");

        let notes = base.notes().expect("Missing notes");
        assert_eq!(notes.name(), "notes");
        assert_eq!(base.notes_string(), "<notes><p>hi</p></notes>");
        assert_eq!(
            base.set_notes(XmlNode::text("plain")),
            Err(SedOperationError::InvalidObject)
        );
    }

    #[test]
    fn test_append_annotation() {
        let mut base = SedBase::default();
        base.append_annotation(XmlNode::element("a"))
            .expect("Failed to append");
        base.append_annotation(XmlNode::element("annotation").with_child(XmlNode::element("b")))
            .expect("Failed to append");

        let annotation = base.annotation().expect("Missing annotation");
        assert_eq!(annotation.num_children(), 2);
        assert_eq!(base.annotation_string(), "<annotation><a/><b/></annotation>");
    }

    #[test]
    fn test_parent_link_lineage() {
        let link = ParentLink::document_root(1, 4).child(TypeCode::ListOf, "listOfOutputs");
        assert!(link.is_in_document());
        assert!(link.has_ancestor(TypeCode::Document));
        assert_eq!(link.parent().map(|p| p.type_code), Some(TypeCode::ListOf));
        assert!(ParentLink::default().is_detached());
    }
}
