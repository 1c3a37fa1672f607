//! Job descriptor catalog.
//!
//! A static, startup-built table of known job types. Each descriptor
//! names the connector type it runs against and the ordered list of
//! configurable properties; a property's example value fixes its
//! primitive type tag, and a property may reference a named choice
//! source on the connector for its enumerated values.
//!
//! This closed table replaces runtime class introspection: there is no
//! reflection anywhere, adding a job type means adding a descriptor.

use invex_connector::types::ConnectorType;

/// Example value for a job property; its variant fixes the primitive
/// type tag rendered in the projected schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyExample {
    Int(i64),
    Bool(bool),
    Str(&'static str),
}

impl PropertyExample {
    /// The JSON-schema primitive type tag for this example.
    pub fn type_tag(&self) -> &'static str {
        match self {
            PropertyExample::Int(_) => "number",
            PropertyExample::Bool(_) => "boolean",
            PropertyExample::Str(_) => "string",
        }
    }
}

/// One configurable property of a job type.
#[derive(Debug, Clone)]
pub struct JobProperty {
    pub name: &'static str,
    pub example: PropertyExample,
    /// Name of a connector choice source whose result enumerates the
    /// valid values for this property.
    pub choice_source: Option<&'static str>,
}

impl JobProperty {
    /// Plain property with no enumerated choices.
    pub fn plain(name: &'static str, example: PropertyExample) -> Self {
        Self {
            name,
            example,
            choice_source: None,
        }
    }

    /// Property whose valid values come from a connector choice source.
    pub fn with_choices(
        name: &'static str,
        example: PropertyExample,
        choice_source: &'static str,
    ) -> Self {
        Self {
            name,
            example,
            choice_source: Some(choice_source),
        }
    }
}

/// Static metadata for one job type.
#[derive(Debug, Clone)]
pub struct JobDescriptor {
    /// Unique job type name, also the `type` query value on the
    /// schema endpoint.
    pub job_type: &'static str,
    /// The connector this job type requires.
    pub connector_type: ConnectorType,
    /// Ordered configurable properties.
    pub properties: Vec<JobProperty>,
}

/// The table of job types known to this process.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    descriptors: Vec<JobDescriptor>,
}

impl JobCatalog {
    /// Build a catalog from explicit descriptors.
    pub fn new(descriptors: Vec<JobDescriptor>) -> Self {
        Self { descriptors }
    }

    /// The built-in job types.
    pub fn builtin() -> Self {
        Self::new(vec![
            JobDescriptor {
                job_type: "VCenterExportJob",
                connector_type: ConnectorType::VCenter,
                properties: vec![
                    JobProperty::with_choices(
                        "datacenter",
                        PropertyExample::Str(""),
                        "list_datacenters",
                    ),
                    JobProperty::plain("include_templates", PropertyExample::Bool(false)),
                    JobProperty::plain("max_depth", PropertyExample::Int(3)),
                ],
            },
            JobDescriptor {
                job_type: "DemoJob",
                connector_type: ConnectorType::Demo,
                properties: vec![
                    JobProperty::plain("message", PropertyExample::Str("hello")),
                    JobProperty::plain("value", PropertyExample::Int(5)),
                    JobProperty::with_choices("region", PropertyExample::Str(""), "list_regions"),
                ],
            },
        ])
    }

    /// Look up a descriptor by job type name.
    pub fn get(&self, job_type: &str) -> Option<&JobDescriptor> {
        self.descriptors.iter().find(|d| d.job_type == job_type)
    }

    /// All descriptors, declaration order.
    pub fn descriptors(&self) -> &[JobDescriptor] {
        &self.descriptors
    }

    /// Distinct connector types referenced by the catalog.
    pub fn required_connector_types(&self) -> Vec<ConnectorType> {
        let mut types = Vec::new();
        for descriptor in &self.descriptors {
            if !types.contains(&descriptor.connector_type) {
                types.push(descriptor.connector_type);
            }
        }
        types
    }
}
