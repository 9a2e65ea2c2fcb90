//! SED-ML levels, versions and their namespaces.

use serde::Serialize;

use crate::error::{SedConstructorError, SedOperationError, SedResult};
use crate::xml::XmlNamespaces;

/// Default SED-ML level of newly created objects.
pub const DEFAULT_LEVEL: u32 = 1;
/// Default SED-ML version of newly created objects.
pub const DEFAULT_VERSION: u32 = 4;

pub const SEDML_XMLNS_L1V1: &str = "http://sed-ml.org/";
pub const SEDML_XMLNS_L1V2: &str = "http://sed-ml.org/sed-ml/level1/version2";
pub const SEDML_XMLNS_L1V3: &str = "http://sed-ml.org/sed-ml/level1/version3";
pub const SEDML_XMLNS_L1V4: &str = "http://sed-ml.org/sed-ml/level1/version4";
pub const SEDML_XMLNS_L1V5: &str = "http://sed-ml.org/sed-ml/level1/version5";

/// Namespace of MathML content.
pub const MATHML_XMLNS: &str = "http://www.w3.org/1998/Math/MathML";
/// Namespace of XHTML notes content.
pub const XHTML_XMLNS: &str = "http://www.w3.org/1999/xhtml";

const KNOWN: [(u32, u32, &str); 5] = [
    (1, 1, SEDML_XMLNS_L1V1),
    (1, 2, SEDML_XMLNS_L1V2),
    (1, 3, SEDML_XMLNS_L1V3),
    (1, 4, SEDML_XMLNS_L1V4),
    (1, 5, SEDML_XMLNS_L1V5),
];

/// Namespace URI of a SED-ML level/version.
pub fn sedml_namespace_uri(level: u32, version: u32) -> Option<&'static str> {
    KNOWN
        .iter()
        .find(|(l, v, _)| *l == level && *v == version)
        .map(|(_, _, uri)| *uri)
}

/// Level/version identified by a SED-ML namespace URI.
pub fn level_version_from_uri(uri: &str) -> Option<(u32, u32)> {
    KNOWN
        .iter()
        .find(|(_, _, known)| *known == uri)
        .map(|(level, version, _)| (*level, *version))
}

pub fn is_sed_namespace(uri: &str) -> bool {
    level_version_from_uri(uri).is_some()
}

pub fn is_valid_combination(level: u32, version: u32) -> bool {
    sedml_namespace_uri(level, version).is_some()
}

/// The level, version and namespace declarations an object belongs to.
///
/// The SED-ML namespace itself is always declared as the default namespace.
/// Further declarations (for instance a model language prefix used in XPath
/// targets) are kept alongside and written on the document element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SedNamespaces {
    level: u32,
    version: u32,
    namespaces: XmlNamespaces,
}

impl SedNamespaces {
    /// # Arguments
    ///
    /// * `level` - SED-ML level, currently always 1
    /// * `version` - SED-ML version, 1 to 5
    ///
    /// # Returns
    ///
    /// The namespaces of that release, or an error for an unknown combination.
    pub fn new(level: u32, version: u32) -> Result<Self, SedConstructorError> {
        let uri = sedml_namespace_uri(level, version)
            .ok_or(SedConstructorError::InvalidLevelVersion { level, version })?;

        let mut namespaces = XmlNamespaces::new();
        namespaces.add(uri, "");

        Ok(SedNamespaces {
            level,
            version,
            namespaces,
        })
    }

    /// Namespaces of the release identified by `uri`.
    pub fn from_uri(uri: &str) -> Result<Self, SedConstructorError> {
        let (level, version) = level_version_from_uri(uri)
            .ok_or_else(|| SedConstructorError::UnknownNamespace(uri.to_string()))?;
        Self::new(level, version)
    }

    /// Builds the namespaces from the declarations of a document element.
    ///
    /// The first SED-ML namespace found decides level and version; every
    /// other declaration is kept. Returns `None` if no SED-ML namespace is
    /// declared.
    pub fn from_declarations(declarations: &XmlNamespaces) -> Option<Self> {
        let (level, version) = declarations
            .iter()
            .find_map(|(_, uri)| level_version_from_uri(uri))?;
        let mut namespaces = Self::new(level, version).ok()?;
        for (prefix, uri) in declarations.iter() {
            if !is_sed_namespace(uri) {
                namespaces.namespaces.add(uri, prefix);
            }
        }
        Some(namespaces)
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// The SED-ML namespace URI.
    pub fn uri(&self) -> &'static str {
        sedml_namespace_uri(self.level, self.version).unwrap_or(SEDML_XMLNS_L1V4)
    }

    /// All declarations, the SED-ML namespace included.
    pub fn namespaces(&self) -> &XmlNamespaces {
        &self.namespaces
    }

    /// Declares an additional namespace.
    ///
    /// The default prefix is reserved for the SED-ML namespace.
    pub fn add_namespace(&mut self, uri: &str, prefix: &str) -> SedResult {
        if prefix.is_empty() || is_sed_namespace(uri) {
            return Err(SedOperationError::InvalidAttributeValue);
        }
        self.namespaces.add(uri, prefix);
        Ok(())
    }

    pub fn remove_namespace(&mut self, prefix: &str) -> SedResult {
        if prefix.is_empty() || !self.namespaces.remove_prefix(prefix) {
            return Err(SedOperationError::InvalidAttributeValue);
        }
        Ok(())
    }

    /// Moves to another release, keeping the additional declarations.
    pub(crate) fn set_level_version(&mut self, level: u32, version: u32) -> SedResult {
        let uri =
            sedml_namespace_uri(level, version).ok_or(SedOperationError::InvalidAttributeValue)?;
        self.level = level;
        self.version = version;
        self.namespaces.add(uri, "");
        Ok(())
    }
}

impl Default for SedNamespaces {
    fn default() -> Self {
        let mut namespaces = XmlNamespaces::new();
        namespaces.add(SEDML_XMLNS_L1V4, "");
        SedNamespaces {
            level: DEFAULT_LEVEL,
            version: DEFAULT_VERSION,
            namespaces,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_combinations() {
        for version in 1..=5 {
            assert!(SedNamespaces::new(1, version).is_ok());
        }
        assert_eq!(
            SedNamespaces::new(2, 1),
            Err(SedConstructorError::InvalidLevelVersion {
                level: 2,
                version: 1
            })
        );
        assert!(SedNamespaces::new(1, 6).is_err());
    }

    #[test]
    fn test_uris() {
        assert_eq!(sedml_namespace_uri(1, 1), Some("http://sed-ml.org/"));
        assert_eq!(
            level_version_from_uri("http://sed-ml.org/sed-ml/level1/version3"),
            Some((1, 3))
        );
        assert_eq!(SedNamespaces::default().uri(), SEDML_XMLNS_L1V4);
    }

    #[test]
    fn test_from_declarations_keeps_extra_prefixes() {
        let mut declarations = XmlNamespaces::new();
        declarations.add(SEDML_XMLNS_L1V2, "");
        declarations.add("http://www.sbml.org/sbml/level2", "sbml");

        let namespaces =
            SedNamespaces::from_declarations(&declarations).expect("Missing SED-ML namespace");
        assert_eq!(namespaces.version(), 2);
        assert_eq!(
            namespaces.namespaces().uri("sbml"),
            Some("http://www.sbml.org/sbml/level2")
        );
        assert_eq!(namespaces.namespaces().len(), 2);
    }

    #[test]
    fn test_default_prefix_is_reserved() {
        let mut namespaces = SedNamespaces::default();
        assert_eq!(
            namespaces.add_namespace("http://other", ""),
            Err(SedOperationError::InvalidAttributeValue)
        );
        assert!(namespaces.add_namespace("http://other", "o").is_ok());
        assert!(namespaces.remove_namespace("o").is_ok());
    }
}
