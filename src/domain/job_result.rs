use super::Payload;

/// Successful outcome of a job; the variant is determined by the job kind.
#[derive(Debug, Clone, PartialEq)]
pub enum JobResult {
    Summary {
        summary: String,
        page_count: usize,
    },
    Translation {
        document: Payload,
        translated_text: String,
    },
    Narration {
        audio: Payload,
    },
    Outfit(Vec<OutfitItem>),
    PageImages(Vec<Payload>),
    Document(Payload),
}

/// One detected clothing item together with its shopping suggestions.
/// Suggestions are paired to the item by an explicit correlation key carried
/// through the suggestion call, never by array position.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitItem {
    pub item_type: String,
    pub description: String,
    pub segmented_image: String,
    pub suggestions: Vec<ShoppingSuggestion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingSuggestion {
    pub item: String,
    pub description: String,
    pub links: Vec<EcommerceLink>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EcommerceLink {
    pub platform: String,
    pub url: String,
}
