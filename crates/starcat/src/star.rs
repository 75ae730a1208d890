use std::sync::Arc;

/// A star as returned by queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// HIP number when known, otherwise the record index.
    pub id: i32,
    pub ra_deg: f32,
    pub dec_deg: f32,
    /// NaN when unknown.
    pub mag: f32,
    pub name: Option<Arc<str>>,
    pub bayer: Option<String>,
    pub flamsteed: Option<String>,
    /// Uppercase IAU code.
    pub constellation: Option<&'static str>,
}

impl Star {
    /// Proper name if present, else the designation parts, else the id.
    #[must_use]
    pub fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.to_string();
        }
        match (&self.bayer, &self.flamsteed) {
            (Some(b), Some(f)) => format!("{b} {f}"),
            (Some(b), None) => b.clone(),
            (None, Some(f)) => f.clone(),
            (None, None) => format!("#{}", self.id),
        }
    }
}
