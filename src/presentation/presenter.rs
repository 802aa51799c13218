use serde::Serialize;

use crate::domain::{JobResult, OutfitItem, Payload};

/// Display-ready projection of a job result. The variant tells the client
/// which rendering to use; all binary content travels as data URIs.
#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ResultView {
    Text {
        content: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        page_count: Option<usize>,
    },
    Audio {
        data_uri: String,
    },
    Download {
        filename: String,
        size: String,
        data_uri: String,
        /// Text rendition of the downloadable document, shown alongside the
        /// download link when the operation produced one (translations).
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Gallery {
        images: Vec<String>,
    },
    Outfit {
        items: Vec<OutfitItemView>,
    },
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutfitItemView {
    pub item_type: String,
    pub description: String,
    pub segmented_image: String,
    pub suggestions: Vec<SuggestionView>,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionView {
    pub item: String,
    pub description: String,
    pub links: Vec<LinkView>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct LinkView {
    pub platform: String,
    pub url: String,
}

/// Projects a result for display. `source_filename` is the name of the
/// uploaded document, used to derive download filenames.
pub fn present(result: &JobResult, source_filename: Option<&str>) -> ResultView {
    match result {
        JobResult::Summary {
            summary,
            page_count,
        } => ResultView::Text {
            content: summary.clone(),
            page_count: Some(*page_count),
        },
        JobResult::Translation {
            document,
            translated_text,
        } => download_view(
            document,
            derive_download_name("translated", source_filename),
            Some(translated_text.clone()),
        ),
        JobResult::Narration { audio } => ResultView::Audio {
            data_uri: audio.to_data_uri(),
        },
        JobResult::Outfit(items) => ResultView::Outfit {
            items: items.iter().map(outfit_item_view).collect(),
        },
        JobResult::PageImages(pages) => ResultView::Gallery {
            images: pages.iter().map(Payload::to_data_uri).collect(),
        },
        JobResult::Document(document) => download_view(
            document,
            derive_download_name("composed", source_filename),
            None,
        ),
    }
}

fn download_view(document: &Payload, filename: String, text: Option<String>) -> ResultView {
    ResultView::Download {
        filename,
        size: format_bytes(document.size_bytes()),
        data_uri: document.to_data_uri(),
        text,
    }
}

fn outfit_item_view(item: &OutfitItem) -> OutfitItemView {
    OutfitItemView {
        item_type: item.item_type.clone(),
        description: item.description.clone(),
        segmented_image: item.segmented_image.clone(),
        suggestions: item
            .suggestions
            .iter()
            .map(|s| SuggestionView {
                item: s.item.clone(),
                description: s.description.clone(),
                links: s
                    .links
                    .iter()
                    .map(|l| LinkView {
                        platform: l.platform.clone(),
                        url: l.url.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// "translated" + "report.pdf" becomes "translated_report.pdf"; without a
/// source name the prefix alone carries the purpose.
pub fn derive_download_name(prefix: &str, source_filename: Option<&str>) -> String {
    match source_filename {
        Some(name) => {
            let stem = name.rsplit_once('.').map(|(s, _)| s).unwrap_or(name);
            format!("{prefix}_{stem}.pdf")
        }
        None => format!("{prefix}_document.pdf"),
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
