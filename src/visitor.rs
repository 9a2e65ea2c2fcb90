//! Depth-first traversal of a SED-ML tree.

use crate::base::SedObject;
use crate::typecode::TypeCode;

/// Callbacks invoked by [`accept`] in document order.
///
/// Every method has an empty default, so a visitor only implements what it
/// needs. Returning `false` from [`visit`](Self::visit) skips the children
/// of that object; [`leave`](Self::leave) is still called.
pub trait SedVisitor {
    fn visit(&mut self, _object: &dyn SedObject) -> bool {
        true
    }

    fn leave(&mut self, _object: &dyn SedObject) {}

    /// Called when entering a `listOfX` element, before its items.
    fn visit_list(&mut self, _list_name: &str, _item_type: TypeCode) -> bool {
        true
    }

    fn leave_list(&mut self, _list_name: &str, _item_type: TypeCode) {}
}

/// Walks `object` and its subtree with `visitor`.
///
/// Lists are reported through `visit_list`/`leave_list` instead of
/// `visit`/`leave`.
pub fn accept(object: &dyn SedObject, visitor: &mut dyn SedVisitor) {
    match object.list_item_type() {
        Some(item_type) => {
            let name = object.element_name();
            if visitor.visit_list(name, item_type) {
                for child in object.children() {
                    accept(child, visitor);
                }
            }
            visitor.leave_list(name, item_type);
        }
        None => {
            if visitor.visit(object) {
                for child in object.children() {
                    accept(child, visitor);
                }
            }
            visitor.leave(object);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::SedDocument;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl SedVisitor for Recorder {
        fn visit(&mut self, object: &dyn SedObject) -> bool {
            self.events.push(format!("+{}", object.element_name()));
            object.type_code() != TypeCode::DataGenerator
        }

        fn leave(&mut self, object: &dyn SedObject) {
            self.events.push(format!("-{}", object.element_name()));
        }

        fn visit_list(&mut self, list_name: &str, _item_type: TypeCode) -> bool {
            self.events.push(format!("[{list_name}"));
            true
        }

        fn leave_list(&mut self, list_name: &str, _item_type: TypeCode) {
            self.events.push(format!("{list_name}]"));
        }
    }

    #[test]
    fn test_visits_in_document_order() {
        let mut document = SedDocument::default();
        document.create_model().expect("Failed to create model");
        document
            .create_data_generator()
            .expect("Failed to create data generator")
            .create_variable()
            .expect("Failed to create variable");

        let mut recorder = Recorder::default();
        document.accept(&mut recorder);

        assert_eq!(
            recorder.events,
            [
                "+sedML",
                "[listOfModels",
                "+model",
                "[listOfChanges",
                "listOfChanges]",
                "-model",
                "listOfModels]",
                "[listOfSimulations",
                "listOfSimulations]",
                "[listOfTasks",
                "listOfTasks]",
                "[listOfDataGenerators",
                "+dataGenerator",
                "-dataGenerator",
                "listOfDataGenerators]",
                "[listOfOutputs",
                "listOfOutputs]",
                "-sedML",
            ]
        );
    }
}
