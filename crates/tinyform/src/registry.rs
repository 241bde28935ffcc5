/// Tag value the counter is reset to at the start of every render.
pub const FIELD_TAG_BASE: u32 = 10;

/// Field tag and count state for one page render.
///
/// Tags are handed out in strict declaration order, so the Nth tag-consuming
/// field of a render always ends up with `FIELD_TAG_BASE + N`. The submission
/// side relies on this to correlate values positionally, without keeping a
/// name-to-tag table.
///
/// The recorded field count outlives the render itself: it bounds how many
/// submitted values the dispatcher will accept for the page that was served.
#[derive(Debug)]
pub struct FieldRegistry {
    tag: u32,
    fields: usize,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self {
            tag: FIELD_TAG_BASE,
            fields: 0,
        }
    }
}

impl FieldRegistry {
    /// Reset the tag counter and field count for a fresh render.
    pub fn start_render(&mut self) {
        self.tag = FIELD_TAG_BASE;
        self.fields = 0;
    }

    /// Allocate the tag for the next emitted field.
    ///
    /// Called exactly once per rendered field. Subheadings and skipped
    /// fields never allocate.
    pub fn allocate(&mut self) -> u32 {
        self.tag += 1;
        self.fields += 1;
        self.tag
    }

    /// Number of fields emitted during the most recent render.
    pub fn field_count(&self) -> usize {
        self.fields
    }
}
