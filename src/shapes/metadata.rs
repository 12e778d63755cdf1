use super::element::Element;
use super::LoadError;

/// Document-wide metadata: export format version and pixels-to-meter ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metadata {
    pub format: i32,
    pub ptm_ratio: f32,
}

impl Metadata {
    pub(crate) fn from_element(data: &Element) -> Result<Self, LoadError> {
        Ok(Self {
            format: data.parse_value("format")?,
            ptm_ratio: data.parse_value("ptm_ratio")?,
        })
    }

    /// Scale that converts authoring pixels into meters
    pub fn meter_scale(&self) -> f32 {
        1.0 / self.ptm_ratio
    }
}
