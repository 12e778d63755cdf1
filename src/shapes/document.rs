use super::body::BodyTemplate;
use super::element::Element;
use super::metadata::Metadata;
use super::LoadError;
use log::warn;

/// A fully parsed shape document: every `<body>` plus the `<metadata>`
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDocument {
    bodies: Vec<BodyTemplate>,
    metadata: Metadata,
}

impl ShapeDocument {
    /// Parse a document from XML text
    ///
    /// Either every body parses or an error is returned. A name that occurs
    /// twice keeps the later definition.
    pub fn parse(xml: &str) -> Result<Self, LoadError> {
        let root = Element::parse(xml)?;
        Self::from_element(&root)
    }

    pub(crate) fn from_element(root: &Element) -> Result<Self, LoadError> {
        let mut bodies: Vec<BodyTemplate> = Vec::new();
        for elem in root.children_named("body") {
            let body = BodyTemplate::from_element(elem)?;

            if let Some(existing) = bodies.iter_mut().find(|b| b.name() == body.name()) {
                warn!("Body \"{}\" defined twice, keeping the last one", body.name());
                *existing = body;
            } else {
                bodies.push(body);
            }
        }

        let metadata = root.child("metadata").ok_or_else(|| LoadError::MissingElement {
            element: root.name().to_string(),
            name: "metadata".to_string(),
        })?;

        Ok(Self {
            bodies,
            metadata: Metadata::from_element(metadata)?,
        })
    }

    /// Bodies in document order
    pub fn bodies(&self) -> &[BodyTemplate] {
        &self.bodies
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub(crate) fn into_parts(self) -> (Vec<BodyTemplate>, Metadata) {
        (self.bodies, self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_BODY: &str =
        "<linear_damping>0</linear_damping><angular_damping>0</angular_damping>";

    #[test]
    fn test_parse_document() {
        let xml = format!(
            "<bodydef><body name='a'>{0}</body><body name='b'>{0}</body>\
             <metadata><format>1</format><ptm_ratio>32</ptm_ratio></metadata></bodydef>",
            EMPTY_BODY
        );
        let doc = ShapeDocument::parse(&xml).unwrap();

        let names: Vec<_> = doc.bodies().iter().map(|b| b.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(doc.metadata().ptm_ratio, 32.0);
    }

    #[test]
    fn test_duplicate_name_keeps_last() {
        let xml = format!(
            "<bodydef><body name='a'>{0}</body><body name='a'><is_dynamic/>{0}</body>\
             <metadata format='1' ptm_ratio='16'/></bodydef>",
            EMPTY_BODY
        );
        let doc = ShapeDocument::parse(&xml).unwrap();

        assert_eq!(doc.bodies().len(), 1);
        assert!(doc.bodies()[0].is_dynamic);
        assert_eq!(doc.metadata().ptm_ratio, 16.0);
    }

    #[test]
    fn test_missing_metadata() {
        let err = ShapeDocument::parse("<bodydef/>").unwrap_err();
        assert!(matches!(err, LoadError::MissingElement { ref name, .. } if name == "metadata"));
    }

    #[test]
    fn test_one_bad_body_fails_the_document() {
        let xml = format!(
            "<bodydef><body name='a'>{0}</body><body name='b'/>\
             <metadata><format>1</format><ptm_ratio>32</ptm_ratio></metadata></bodydef>",
            EMPTY_BODY
        );
        assert!(ShapeDocument::parse(&xml).is_err());
    }
}
