//! Tag, attribute and type names of the Enterprise Architect XMI 2.1 export.

/// UML 2.1 namespace used for the `uml:` prefix.
pub const UML_2_1: &str = "http://schema.omg.org/spec/UML/2.1";
/// XMI 2.1 namespace used for the `xmi:` prefix.
pub const XMI_2_1: &str = "http://schema.omg.org/spec/XMI/2.1";

// ============================================================================
// MODEL SECTION
// ============================================================================

/// `uml:Model`, child of the document root (UML namespace).
pub const MODEL: &str = "Model";
pub const PACKAGED_ELEMENT: &str = "packagedElement";
pub const OWNED_END: &str = "ownedEnd";
pub const END_TYPE: &str = "type";
pub const LOWER_VALUE: &str = "lowerValue";
pub const UPPER_VALUE: &str = "upperValue";
pub const OWNED_ATTRIBUTE: &str = "ownedAttribute";
pub const ATTRIBUTE_TYPE: &str = "type";
pub const OWNED_OPERATION: &str = "ownedOperation";
pub const OWNED_PARAMETER: &str = "ownedParameter";
pub const PARAMETER_TYPE: &str = "type";
/// Optional literal child carrying an attribute's initial or a parameter's default value.
pub const DEFAULT_VALUE: &str = "defaultValue";

// ============================================================================
// DIAGRAM SECTION
// ============================================================================

/// `xmi:Extension`, child of the document root (XMI namespace).
pub const EXTENSION: &str = "Extension";
pub const DIAGRAMS: &str = "diagrams";
pub const DIAGRAM: &str = "diagram";
pub const DIAGRAM_PROPERTIES: &str = "properties";
pub const DIAGRAM_ELEMENTS: &str = "elements";
pub const DIAGRAM_ELEMENT: &str = "element";

// ============================================================================
// ATTRIBUTES
// ============================================================================

/// `xmi:id` (XMI namespace).
pub const ATTR_ID: &str = "id";
/// `xmi:type` (XMI namespace).
pub const ATTR_TYPE: &str = "type";
/// `xmi:idref` (XMI namespace).
pub const ATTR_IDREF: &str = "idref";
pub const ATTR_NAME: &str = "name";
pub const ATTR_VALUE: &str = "value";
pub const ATTR_HREF: &str = "href";
/// Plain `type` attribute carrying the return type of a `return` parameter.
pub const ATTR_RETURN_TYPE: &str = "type";
pub const ATTR_SUBJECT: &str = "subject";

// ============================================================================
// VALUES
// ============================================================================

/// `xmi:type` values of the packaged elements that are built.
pub const CLASS_TYPE: &str = "uml:Class";
pub const INTERFACE_TYPE: &str = "uml:Interface";
pub const ASSOCIATION_TYPE: &str = "uml:Association";

pub const END_SOURCE_PREFIX: &str = "EAID_src";
pub const END_TARGET_PREFIX: &str = "EAID_dst";
pub const LITERAL_UNLIMITED_NATURAL: &str = "uml:LiteralUnlimitedNatural";
/// Name of the `ownedParameter` that holds a method's return type.
pub const RETURN_PARAMETER: &str = "return";

/// Packaged element types skipped without inspection.
pub const DEFAULT_IGNORED_TYPES: &[&str] = &["uml:Package"];

/// Known EA type references and the type names they map to.
pub const DEFAULT_TYPE_MAPPING: &[(&str, &str)] = &[
    ("http://schema.omg.org/spec/UML/2.1/uml.xml#Integer", "integer"),
    ("EAnone_void", "void"),
];
