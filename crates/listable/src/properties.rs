//! Everything needed to describe a list in one value.

use listable_layout::LayoutDescription;
use listable_types::Content;

use crate::config::ListConfig;

/// Configuration, layout, and content applied together by
/// [`ListView::set_properties`](crate::ListView::set_properties).
#[derive(Clone, Debug, Default)]
pub struct ListProperties {
    pub config: ListConfig,
    pub layout: LayoutDescription,
    pub content: Content,
}

impl ListProperties {
    /// Properties whose layout is the default description of the
    /// configured family.
    pub fn new(config: ListConfig, content: Content) -> Self {
        let layout = config.layout_family.description();
        Self {
            config,
            layout,
            content,
        }
    }

    pub fn with_layout(mut self, layout: LayoutDescription) -> Self {
        self.layout = layout;
        self
    }
}
