// crates/l5x-rs/src/project.rs

//! Top-level accessors for an exported controller project.

use crate::access::{ElementAccess, FromElement};
use crate::attribute::Attribute;
use crate::codec::Text;
use crate::collection::ElementDict;
use crate::config::{ParseOptions, WriteOptions};
use crate::dom::{Document, Element};
use crate::error::L5xError;
use crate::module::Module;
use alloc::string::String;
use core::str::FromStr;
use log::debug;

/// Tag of the root element of every L5X export.
const ROOT_TAG: &str = "RSLogix5000Content";

/// The `<Controller>` element and the modules configured under it.
#[derive(Debug)]
pub struct Controller {
    element: Element,
    modules: ElementDict<String, Module>,
}

impl Controller {
    pub const NAME: Attribute<Text> = Attribute::new("Name", Text);
    pub const PROCESSOR_TYPE: Attribute<Text> = Attribute::new("ProcessorType", Text);
    pub const COMM_PATH: Attribute<Text> = Attribute::new("CommPath", Text);

    pub fn name(&self) -> Result<String, L5xError> {
        Self::NAME.get(self)
    }

    pub fn processor_type(&self) -> Result<String, L5xError> {
        Self::PROCESSOR_TYPE.get(self)
    }

    /// Communication path used to go online, or `None` if never set.
    pub fn comm_path(&self) -> Result<Option<String>, L5xError> {
        Self::COMM_PATH.get_opt(self)
    }

    pub fn set_comm_path(&self, path: &str) -> Result<(), L5xError> {
        Self::COMM_PATH.set(self, &path.into())
    }

    /// Modules keyed by `Name`, in document order.
    pub fn modules(&self) -> &ElementDict<String, Module> {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> &mut ElementDict<String, Module> {
        &mut self.modules
    }
}

impl ElementAccess for Controller {
    fn element(&self) -> &Element {
        &self.element
    }
}

impl FromElement for Controller {
    const TAG: &'static str = "Controller";

    fn from_element(element: Element) -> Result<Self, L5xError> {
        let modules = ElementDict::new(element.get_child("Modules")?, "Name")?;
        Ok(Controller { element, modules })
    }
}

/// A parsed L5X project.
#[derive(Debug)]
pub struct Project {
    document: Document,
    controller: Controller,
}

impl Project {
    pub const SCHEMA_REVISION: Attribute<Text> = Attribute::read_only("SchemaRevision", Text);
    pub const SOFTWARE_REVISION: Attribute<Text> = Attribute::read_only("SoftwareRevision", Text);

    /// Parses a project with the default [`ParseOptions`].
    pub fn parse(xml: &str) -> Result<Self, L5xError> {
        Self::parse_with(xml, &ParseOptions::default())
    }

    /// Parses a project and binds its controller.
    ///
    /// # Errors
    /// `MalformedDocument` if the root is not an L5X content element, plus
    /// any error from parsing or from binding the controller and its modules.
    pub fn parse_with(xml: &str, options: &ParseOptions) -> Result<Self, L5xError> {
        Self::from_document(Document::parse_with(xml, options)?)
    }

    /// Binds an already parsed document.
    pub fn from_document(document: Document) -> Result<Self, L5xError> {
        if document.root().tag() != ROOT_TAG {
            return Err(L5xError::MalformedDocument(
                "root element is not RSLogix5000Content",
            ));
        }
        let controller = Controller::from_element(document.root().get_child(Controller::TAG)?)?;
        debug!(
            "Loaded project with {} module(s)",
            controller.modules().len()
        );
        Ok(Self {
            document,
            controller,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller {
        &mut self.controller
    }

    pub fn schema_revision(&self) -> Result<String, L5xError> {
        Self::SCHEMA_REVISION.get(self)
    }

    pub fn software_revision(&self) -> Result<String, L5xError> {
        Self::SOFTWARE_REVISION.get(self)
    }

    /// Serializes the current state of the document.
    pub fn to_xml_string(&self) -> Result<String, L5xError> {
        self.document.to_xml_string()
    }

    pub fn write_with(&self, options: &WriteOptions) -> Result<String, L5xError> {
        self.document.write_with(options)
    }
}

impl ElementAccess for Project {
    fn element(&self) -> &Element {
        self.document.root()
    }
}

impl FromStr for Project {
    type Err = L5xError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Project::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_XML: &str = r#"<RSLogix5000Content SchemaRevision="1.0" SoftwareRevision="32.00">
  <Controller Name="Line1" ProcessorType="1756-L83E">
    <Modules>
      <Module Name="Local" CatalogNumber="1756-L83E">
        <Ports><Port Id="1" Address="0" Type="ICP" Upstream="false"/></Ports>
      </Module>
    </Modules>
  </Controller>
</RSLogix5000Content>"#;

    #[test]
    fn test_project_binds_controller() {
        let project = Project::parse(PROJECT_XML).unwrap();
        assert_eq!(project.schema_revision().unwrap(), "1.0");
        assert_eq!(project.software_revision().unwrap(), "32.00");
        assert_eq!(project.controller().name().unwrap(), "Line1");
        assert_eq!(project.controller().processor_type().unwrap(), "1756-L83E");
        assert_eq!(project.controller().comm_path().unwrap(), None);
        assert_eq!(project.controller().modules().len(), 1);
    }

    #[test]
    fn test_revisions_are_read_only() {
        let project = Project::parse(PROJECT_XML).unwrap();
        assert!(matches!(
            Project::SOFTWARE_REVISION.set(&project, &"33.00".into()),
            Err(L5xError::ReadOnlyAttribute { .. })
        ));
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let result = Project::parse("<Controller><Modules/></Controller>");
        assert!(matches!(result, Err(L5xError::MalformedDocument(_))));
    }

    #[test]
    fn test_missing_modules_is_rejected() {
        let result = Project::parse(
            r#"<RSLogix5000Content><Controller Name="Empty"/></RSLogix5000Content>"#,
        );
        assert!(matches!(
            result,
            Err(L5xError::MissingChild { tag, .. }) if tag == "Modules"
        ));
    }

    #[test]
    fn test_comm_path_round_trips() {
        let project = Project::parse(PROJECT_XML).unwrap();
        project.controller().set_comm_path("AB_ETHIP-1\\10.0.0.10").unwrap();

        let reparsed: Project = project.to_xml_string().unwrap().parse().unwrap();
        assert_eq!(
            reparsed.controller().comm_path().unwrap().as_deref(),
            Some("AB_ETHIP-1\\10.0.0.10")
        );
    }
}
