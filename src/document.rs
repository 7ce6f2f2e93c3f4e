use log::debug;

use crate::core::{DocumentError, DocumentKind, DocumentRecord};
use crate::layout::Fragment;
use crate::options::RenderOptions;
use crate::render::{DocumentInfo, PageConfig, render_pdf};
use crate::template::DocumentTemplate;

/// A laid-out document, ready to be paginated.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub kind: DocumentKind,
    /// Used for the PDF Info title, e.g. `Quotation Q-100`.
    pub title: String,
    pub creator: String,
    pub fragments: Vec<Fragment>,
}

impl RenderedDocument {
    /// Build the fragment sequence for `record` using the template for `kind`.
    pub fn compose(kind: DocumentKind, record: &DocumentRecord, options: &RenderOptions) -> Self {
        let template = DocumentTemplate::for_kind(kind);
        let fragments = template.build(record, options);
        let title = format!(
            "{} {}",
            kind.display_name(),
            record.text_or_na(kind.number_field())
        );
        debug!("composed {title} from {} fragment(s)", fragments.len());
        Self {
            kind,
            title,
            creator: options.company_name.clone(),
            fragments,
        }
    }

    /// Every line of text in reading order; table rows are joined with `" | "`.
    pub fn text_lines(&self) -> Vec<String> {
        self.fragments.iter().flat_map(Fragment::text_lines).collect()
    }

    pub fn to_pdf(&self, page: &PageConfig) -> Result<Vec<u8>, DocumentError> {
        render_pdf(
            &self.fragments,
            page,
            &DocumentInfo::new(&self.title, &self.creator),
        )
    }
}
