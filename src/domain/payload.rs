use base64::{Engine as _, engine::general_purpose};

/// Sentinel prefix marking an input reference that is a remote URL rather
/// than inline bytes. The referenced resource is fetched server-side.
pub const URL_SENTINEL: &str = "url:";

/// A self-describing byte blob transferred as a `data:<mime>;base64,<data>`
/// URI. No length limit is enforced at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Payload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime,
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }

    pub fn from_data_uri(uri: &str) -> Result<Self, PayloadError> {
        let rest = uri.strip_prefix("data:").ok_or(PayloadError::MalformedDataUri)?;
        let (mime, encoded) = rest
            .split_once(";base64,")
            .ok_or(PayloadError::MalformedDataUri)?;
        if mime.is_empty() {
            return Err(PayloadError::MalformedDataUri);
        }
        let bytes = general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| PayloadError::InvalidBase64(e.to_string()))?;
        Ok(Self {
            mime: mime.to_string(),
            bytes,
        })
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Input owned by a job: inline bytes, a remote reference to be fetched by
/// the gateway, or an ordered batch of images.
#[derive(Debug, Clone, PartialEq)]
pub enum InputRef {
    Inline(Payload),
    Remote(String),
    Batch(Vec<Payload>),
}

impl InputRef {
    /// Parses either a `url:` sentinel reference or a data URI.
    pub fn parse(raw: &str) -> Result<Self, PayloadError> {
        if let Some(url) = raw.strip_prefix(URL_SENTINEL) {
            if url.is_empty() {
                return Err(PayloadError::EmptyUrl);
            }
            return Ok(InputRef::Remote(url.to_string()));
        }
        Ok(InputRef::Inline(Payload::from_data_uri(raw)?))
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PayloadError {
    #[error("malformed data uri, expected data:<mime>;base64,<data>")]
    MalformedDataUri,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
    #[error("url reference is empty")]
    EmptyUrl,
}
